//! # Financial Statement Builder
//!
//! A library for turning a ledger of dated, categorized transactions into
//! standard accounting reports: an income statement, a balance sheet and a
//! period-over-period variance analysis, plus a spreadsheet-style export.
//!
//! ## Core Concepts
//!
//! - **Ledger**: An immutable, in-memory list of transactions, each tagged with
//!   an [`Account`] and a [`Category`] from a closed set
//! - **Period**: A calendar month derived from the transaction date
//! - **Income Statement**: Category sums for one period (or the whole ledger)
//!   with derived subtotals and a configurable flat tax rate
//! - **Balance Sheet**: Cumulative account balances up to a cutoff date
//! - **Variance**: Line-by-line comparison of two income statements
//!
//! ## Example
//!
//! ```rust,ignore
//! use financial_statement_builder::*;
//!
//! let ledger = generate_sample_data(&SampleDataConfig::default());
//! let engine = StatementEngine::new(ledger, StatementConfig::default())?;
//!
//! let december: Period = "2024-12".parse()?;
//! let income = engine.income_statement(Some(december));
//! println!("Net income: {:?}", income.amount_of("Net Income"));
//!
//! engine.workbook()?.write_csv_dir("statements")?;
//! ```

pub mod aggregator;
pub mod balance_sheet;
pub mod balancer;
pub mod error;
pub mod export;
pub mod income_statement;
pub mod ingestion;
pub mod period;
pub mod report;
pub mod sample_data;
pub mod schema;
pub mod utils;
pub mod variance;

pub use aggregator::{sum_amount, Filter, Selector, Window};
pub use balance_sheet::{build_balance_sheet, BalanceSheet, TOTAL_LIABILITIES_AND_EQUITY};
pub use balancer::{verify_accounting_equation, AccountingBalancer, BalanceCheck, VerificationResult};
pub use error::{ParseLabelError, Result, StatementError};
pub use export::{format_currency, format_percent, Cell, Sheet, Workbook};
pub use income_statement::{build_income_statement, IncomeStatement, INCOME_STATEMENT_LABELS};
pub use ingestion::*;
pub use period::Period;
pub use report::{LineItem, Report};
pub use sample_data::{generate_sample_data, SampleDataConfig};
pub use schema::*;
pub use variance::{build_variance, VarianceReport, VarianceRow};

use chrono::NaiveDate;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Owns a ledger snapshot and builds every report from it.
#[derive(Debug, Clone)]
pub struct StatementEngine {
    ledger: TransactionLedger,
    config: StatementConfig,
}

impl StatementEngine {
    pub fn new(ledger: TransactionLedger, config: StatementConfig) -> Result<Self> {
        config.validate()?;

        info!(
            "Preparing statements for {} from {} transactions",
            config.organization_name,
            ledger.len()
        );

        Ok(Self { ledger, config })
    }

    pub fn from_csv_path(path: impl AsRef<Path>, config: StatementConfig) -> Result<Self> {
        let ledger = read_transactions_path(path)?;
        Self::new(ledger, config)
    }

    pub fn ledger(&self) -> &TransactionLedger {
        &self.ledger
    }

    pub fn config(&self) -> &StatementConfig {
        &self.config
    }

    pub fn periods(&self) -> Vec<Period> {
        self.ledger.periods()
    }

    /// The latest period and the one before it.
    ///
    /// With a single period both are the same; `None` for an empty ledger.
    pub fn reporting_periods(&self) -> Option<(Period, Period)> {
        let periods = self.periods();
        let current = *periods.last()?;
        let prior = if periods.len() > 1 {
            periods[periods.len() - 2]
        } else {
            current
        };

        debug!("Reporting periods: current {}, prior {}", current, prior);
        Some((current, prior))
    }

    pub fn income_statement_detail(&self, period: Option<Period>) -> IncomeStatement {
        IncomeStatement::build(&self.ledger, period, self.config.tax_rate)
    }

    pub fn income_statement(&self, period: Option<Period>) -> Report {
        build_income_statement(&self.ledger, period, self.config.tax_rate)
    }

    pub fn balance_sheet_detail(&self, as_of: Option<NaiveDate>) -> BalanceSheet {
        BalanceSheet::build(&self.ledger, as_of)
    }

    pub fn balance_sheet(&self, as_of: Option<NaiveDate>) -> Report {
        build_balance_sheet(
            &self.ledger,
            as_of,
            self.config.totals_convention,
            self.config.balance_tolerance,
        )
    }

    pub fn balance_check(&self, as_of: Option<NaiveDate>) -> BalanceCheck {
        AccountingBalancer::new(&self.ledger).check_at(as_of)
    }

    pub fn verify_balances(&self) -> VerificationResult {
        AccountingBalancer::new(&self.ledger).verify_at_month_ends(self.config.balance_tolerance)
    }

    pub fn variance(&self, current: Period, prior: Period) -> VarianceReport {
        build_variance(&self.ledger, current, prior, self.config.tax_rate)
    }

    /// Income statement for the latest period, whole-ledger balance sheet,
    /// and variance of the latest period against the one before.
    pub fn workbook(&self) -> Result<Workbook> {
        let (current, prior) = self.reporting_periods().ok_or(StatementError::EmptyLedger)?;
        let organization = &self.config.organization_name;

        let mut workbook = Workbook::new();

        let income = self.income_statement(Some(current));
        workbook.push(Sheet::from_report(
            "Income Statement",
            format!("{} - Income Statement - {}", organization, current),
            &income,
        ));

        let balance = self.balance_sheet(None);
        workbook.push(Sheet::from_report(
            "Balance Sheet",
            format!("{} - Balance Sheet - {}", organization, current),
            &balance,
        ));

        let variance = self.variance(current, prior);
        workbook.push(Sheet::from_variance(
            "Variance Analysis",
            format!("{} - Variance Analysis: {} vs {}", organization, prior, current),
            &variance,
        ));

        Ok(workbook)
    }

    pub fn export_csv_dir(&self, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        self.workbook()?.write_csv_dir(dir)
    }
}
