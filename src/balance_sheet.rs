use crate::aggregator::{sum_amount, Filter};
use crate::balancer::BalanceCheck;
use crate::report::{LineItem, Report};
use crate::schema::{Account, TotalsConvention, TransactionLedger};
use chrono::NaiveDate;
use log::{info, warn};
use serde::{Deserialize, Serialize};

pub const TOTAL_LIABILITIES_AND_EQUITY: &str = "TOTAL LIABILITIES & EQUITY";

/// Running account balances as of a cutoff date, with their subtotals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheet {
    pub as_of: Option<NaiveDate>,
    pub cash: f64,
    pub accounts_receivable: f64,
    pub inventory: f64,
    pub current_assets: f64,
    pub ppe: f64,
    pub total_assets: f64,
    pub accounts_payable: f64,
    pub short_term_debt: f64,
    pub current_liabilities: f64,
    pub long_term_debt: f64,
    pub total_liabilities: f64,
    pub common_stock: f64,
    pub retained_earnings: f64,
    pub total_equity: f64,
}

impl BalanceSheet {
    /// Sums every row posted on or before `as_of`; the whole ledger when `None`.
    pub fn build(ledger: &TransactionLedger, as_of: Option<NaiveDate>) -> Self {
        let balance = |account: Account| sum_amount(ledger, &Filter::account(account).as_of(as_of));

        let cash = balance(Account::Cash);
        let accounts_receivable = balance(Account::AccountsReceivable);
        let inventory = balance(Account::Inventory);
        let current_assets = cash + accounts_receivable + inventory;

        let ppe = balance(Account::PropertyPlantEquipment);
        let total_assets = current_assets + ppe;

        let accounts_payable = balance(Account::AccountsPayable);
        let short_term_debt = balance(Account::ShortTermDebt);
        let current_liabilities = accounts_payable + short_term_debt;

        let long_term_debt = balance(Account::LongTermDebt);
        let total_liabilities = current_liabilities + long_term_debt;

        let common_stock = balance(Account::CommonStock);
        let retained_earnings = balance(Account::RetainedEarnings);
        let total_equity = common_stock + retained_earnings;

        Self {
            as_of,
            cash,
            accounts_receivable,
            inventory,
            current_assets,
            ppe,
            total_assets,
            accounts_payable,
            short_term_debt,
            current_liabilities,
            long_term_debt,
            total_liabilities,
            common_stock,
            retained_earnings,
            total_equity,
        }
    }

    pub fn total_liabilities_and_equity(&self) -> f64 {
        self.total_liabilities + self.total_equity
    }

    pub fn check(&self) -> BalanceCheck {
        BalanceCheck::from_sheet(self)
    }

    pub fn title(&self) -> String {
        match self.as_of {
            Some(date) => format!("Balance Sheet - as of {}", date),
            None => "Balance Sheet".to_string(),
        }
    }

    pub fn to_report(&self, convention: TotalsConvention) -> Report {
        let closing_total = match convention {
            TotalsConvention::Independent => self.total_liabilities_and_equity(),
            TotalsConvention::MirrorAssets => self.total_assets,
        };

        let lines = vec![
            LineItem::header("ASSETS"),
            LineItem::header("Current Assets:"),
            LineItem::value("  Cash", self.cash),
            LineItem::value("  Accounts Receivable", self.accounts_receivable),
            LineItem::value("  Inventory", self.inventory),
            LineItem::value("Total Current Assets", self.current_assets),
            LineItem::header("Fixed Assets:"),
            LineItem::value("  PP&E", self.ppe),
            LineItem::value("TOTAL ASSETS", self.total_assets),
            LineItem::blank(),
            LineItem::header("LIABILITIES & EQUITY"),
            LineItem::header("Current Liabilities:"),
            LineItem::value("  Accounts Payable", self.accounts_payable),
            LineItem::value("  Short-term Debt", self.short_term_debt),
            LineItem::value("Total Current Liabilities", self.current_liabilities),
            LineItem::value("Long-term Debt", self.long_term_debt),
            LineItem::value("Total Liabilities", self.total_liabilities),
            LineItem::blank(),
            LineItem::header("Equity:"),
            LineItem::value("  Common Stock", self.common_stock),
            LineItem::value("  Retained Earnings", self.retained_earnings),
            LineItem::value("Total Equity", self.total_equity),
            LineItem::blank(),
            LineItem::value(TOTAL_LIABILITIES_AND_EQUITY, closing_total),
        ];

        Report::new(self.title(), lines)
    }
}

pub fn build_balance_sheet(
    ledger: &TransactionLedger,
    as_of: Option<NaiveDate>,
    convention: TotalsConvention,
    tolerance: f64,
) -> Report {
    let sheet = BalanceSheet::build(ledger, as_of);
    let check = sheet.check();

    info!(
        "Built balance sheet as of {}: total assets {:.2}",
        as_of.map_or_else(|| "end of ledger".to_string(), |d| d.to_string()),
        sheet.total_assets
    );
    if !check.is_balanced(tolerance) {
        warn!(
            "Balance sheet does not balance: assets {:.2}, liabilities + equity {:.2}, difference {:.2}",
            check.assets,
            check.liabilities + check.equity,
            check.difference
        );
    }

    sheet.to_report(convention)
}
