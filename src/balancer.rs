use crate::balance_sheet::BalanceSheet;
use crate::error::{Result, StatementError};
use crate::schema::TransactionLedger;
use crate::utils::{last_day_of_month, month_ends_between};
use chrono::{Datelike, NaiveDate};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Both sides of the accounting equation, computed independently.
///
/// `difference` is assets minus (liabilities + equity). Diagnostic only; no
/// builder ever adjusts a balance to close the gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceCheck {
    pub as_of: Option<NaiveDate>,
    pub assets: f64,
    pub liabilities: f64,
    pub equity: f64,
    pub difference: f64,
}

impl BalanceCheck {
    pub fn from_sheet(sheet: &BalanceSheet) -> Self {
        Self {
            as_of: sheet.as_of,
            assets: sheet.total_assets,
            liabilities: sheet.total_liabilities,
            equity: sheet.total_equity,
            difference: sheet.total_assets - sheet.total_liabilities_and_equity(),
        }
    }

    pub fn is_balanced(&self, tolerance: f64) -> bool {
        self.difference.abs() <= tolerance
    }

    pub fn verify(&self, tolerance: f64) -> Result<()> {
        if self.is_balanced(tolerance) {
            return Ok(());
        }

        Err(StatementError::AccountingEquationViolation {
            date: self
                .as_of
                .map_or_else(|| "end of ledger".to_string(), |d| d.to_string()),
            assets: self.assets,
            liabilities: self.liabilities,
            equity: self.equity,
            difference: self.difference,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerificationResult {
    pub dates_checked: usize,
    pub imbalances: Vec<BalanceCheck>,
}

impl VerificationResult {
    pub fn is_balanced(&self) -> bool {
        self.imbalances.is_empty()
    }
}

pub struct AccountingBalancer<'a> {
    ledger: &'a TransactionLedger,
}

impl<'a> AccountingBalancer<'a> {
    pub fn new(ledger: &'a TransactionLedger) -> Self {
        Self { ledger }
    }

    pub fn check_at(&self, as_of: Option<NaiveDate>) -> BalanceCheck {
        BalanceSheet::build(self.ledger, as_of).check()
    }

    /// Checks the equation at every month-end spanned by the ledger.
    ///
    /// The month containing the last transaction is always included, even
    /// when that transaction falls before the month-end.
    pub fn verify_at_month_ends(&self, tolerance: f64) -> VerificationResult {
        let Some((first, last)) = self.ledger.date_range() else {
            return VerificationResult::default();
        };

        let dates = month_ends_between(first, last_day_of_month(last.year(), last.month()));

        let mut result = VerificationResult {
            dates_checked: dates.len(),
            imbalances: Vec::new(),
        };

        for date in dates {
            let check = self.check_at(Some(date));
            if check.is_balanced(tolerance) {
                debug!("Balance sheet balances as of {}", date);
            } else {
                warn!(
                    "Balance sheet out of balance as of {} by {:.2}",
                    date, check.difference
                );
                result.imbalances.push(check);
            }
        }

        result
    }

    pub fn verify_accounting_equation(&self, tolerance: f64) -> Result<()> {
        let result = self.verify_at_month_ends(tolerance);
        match result.imbalances.into_iter().next() {
            Some(first) => first.verify(tolerance),
            None => Ok(()),
        }
    }
}

pub fn verify_accounting_equation(ledger: &TransactionLedger, tolerance: f64) -> Result<()> {
    let balancer = AccountingBalancer::new(ledger);
    balancer.verify_accounting_equation(tolerance)
}
