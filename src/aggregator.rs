//! Filtered sums over a [`TransactionLedger`].
//!
//! Every report line is a call to [`sum_amount`] with a [`Filter`] that picks
//! rows by category or account and, optionally, by period or cutoff date.
//! No match sums to `0.0`.

use crate::period::Period;
use crate::schema::{Account, Category, Transaction, TransactionLedger};
use chrono::NaiveDate;
use log::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    /// Rows whose category is any of the listed values.
    Categories(Vec<Category>),
    /// Rows posted to exactly this account.
    Account(Account),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Window {
    #[default]
    All,
    /// Rows whose derived period equals this one.
    Period(Period),
    /// Rows dated on or before the cutoff.
    AsOf(NaiveDate),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub selector: Selector,
    pub window: Window,
}

impl Filter {
    pub fn category(category: Category) -> Self {
        Self {
            selector: Selector::Categories(vec![category]),
            window: Window::All,
        }
    }

    pub fn categories(categories: &[Category]) -> Self {
        Self {
            selector: Selector::Categories(categories.to_vec()),
            window: Window::All,
        }
    }

    pub fn account(account: Account) -> Self {
        Self {
            selector: Selector::Account(account),
            window: Window::All,
        }
    }

    pub fn in_period(mut self, period: Option<Period>) -> Self {
        self.window = period.map_or(Window::All, Window::Period);
        self
    }

    pub fn as_of(mut self, cutoff: Option<NaiveDate>) -> Self {
        self.window = cutoff.map_or(Window::All, Window::AsOf);
        self
    }

    pub fn matches(&self, transaction: &Transaction) -> bool {
        let selected = match &self.selector {
            Selector::Categories(categories) => categories.contains(&transaction.category),
            Selector::Account(account) => transaction.account == *account,
        };

        selected
            && match self.window {
                Window::All => true,
                Window::Period(period) => transaction.period() == period,
                Window::AsOf(cutoff) => transaction.date <= cutoff,
            }
    }
}

pub fn sum_amount(ledger: &TransactionLedger, filter: &Filter) -> f64 {
    let mut matched = 0usize;
    let total = ledger
        .iter()
        .filter(|t| filter.matches(t))
        .inspect(|_| matched += 1)
        .fold(0.0_f64, |acc, t| acc + t.amount);

    debug!("{:?} matched {} of {} rows", filter, matched, ledger.len());
    total
}
