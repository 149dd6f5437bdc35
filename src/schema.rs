use crate::error::{ParseLabelError, Result, StatementError};
use crate::period::Period;
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, JsonSchema)]
pub enum Category {
    #[serde(rename = "Revenue")]
    #[schemars(description = "Sales of goods or services (Income Statement)")]
    Revenue,

    #[serde(rename = "COGS")]
    #[schemars(description = "Cost of goods sold: direct cost of producing revenue")]
    Cogs,

    #[serde(rename = "Sales & Marketing")]
    #[schemars(description = "Operating expense: sales and marketing")]
    SalesMarketing,

    #[serde(rename = "General & Administrative")]
    #[schemars(description = "Operating expense: general and administrative")]
    GeneralAdministrative,

    #[serde(rename = "R&D")]
    #[schemars(description = "Operating expense: research and development")]
    ResearchDevelopment,

    #[serde(rename = "Interest Expense")]
    #[schemars(description = "Non-operating interest cost")]
    InterestExpense,

    #[serde(rename = "Other Income")]
    #[schemars(description = "Non-operating income such as interest received or investment gains")]
    OtherIncome,

    #[serde(rename = "Asset")]
    #[schemars(description = "Balance sheet movement on an asset account")]
    Asset,

    #[serde(rename = "Liability")]
    #[schemars(description = "Balance sheet movement on a liability account")]
    Liability,

    #[serde(rename = "Equity")]
    #[schemars(description = "Balance sheet movement on an equity account")]
    Equity,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Revenue,
        Category::Cogs,
        Category::SalesMarketing,
        Category::GeneralAdministrative,
        Category::ResearchDevelopment,
        Category::InterestExpense,
        Category::OtherIncome,
        Category::Asset,
        Category::Liability,
        Category::Equity,
    ];

    /// Categories rolled up into the "Operating Expenses" line.
    pub const OPERATING_EXPENSES: [Category; 3] = [
        Category::SalesMarketing,
        Category::GeneralAdministrative,
        Category::ResearchDevelopment,
    ];

    /// The label used by transaction feeds.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Revenue => "Revenue",
            Category::Cogs => "COGS",
            Category::SalesMarketing => "Sales & Marketing",
            Category::GeneralAdministrative => "General & Administrative",
            Category::ResearchDevelopment => "R&D",
            Category::InterestExpense => "Interest Expense",
            Category::OtherIncome => "Other Income",
            Category::Asset => "Asset",
            Category::Liability => "Liability",
            Category::Equity => "Equity",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.label() == s)
            .ok_or_else(|| ParseLabelError {
                kind: "category",
                label: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub enum AccountType {
    #[schemars(description = "Resources owned by the company (debit balance)")]
    Asset,

    #[schemars(description = "Obligations owed to creditors (credit balance)")]
    Liability,

    #[schemars(description = "Owner's residual interest (credit balance)")]
    Equity,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, JsonSchema)]
pub enum Account {
    #[serde(rename = "Cash")]
    Cash,

    #[serde(rename = "Accounts Receivable")]
    AccountsReceivable,

    #[serde(rename = "Inventory")]
    Inventory,

    #[serde(rename = "PP&E")]
    #[schemars(description = "Property, plant & equipment (fixed asset)")]
    PropertyPlantEquipment,

    #[serde(rename = "Accounts Payable")]
    AccountsPayable,

    #[serde(rename = "Short-term Debt")]
    ShortTermDebt,

    #[serde(rename = "Long-term Debt")]
    LongTermDebt,

    #[serde(rename = "Common Stock")]
    CommonStock,

    #[serde(rename = "Retained Earnings")]
    RetainedEarnings,
}

impl Account {
    pub const ALL: [Account; 9] = [
        Account::Cash,
        Account::AccountsReceivable,
        Account::Inventory,
        Account::PropertyPlantEquipment,
        Account::AccountsPayable,
        Account::ShortTermDebt,
        Account::LongTermDebt,
        Account::CommonStock,
        Account::RetainedEarnings,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Account::Cash => "Cash",
            Account::AccountsReceivable => "Accounts Receivable",
            Account::Inventory => "Inventory",
            Account::PropertyPlantEquipment => "PP&E",
            Account::AccountsPayable => "Accounts Payable",
            Account::ShortTermDebt => "Short-term Debt",
            Account::LongTermDebt => "Long-term Debt",
            Account::CommonStock => "Common Stock",
            Account::RetainedEarnings => "Retained Earnings",
        }
    }

    pub fn account_type(&self) -> AccountType {
        match self {
            Account::Cash
            | Account::AccountsReceivable
            | Account::Inventory
            | Account::PropertyPlantEquipment => AccountType::Asset,
            Account::AccountsPayable | Account::ShortTermDebt | Account::LongTermDebt => {
                AccountType::Liability
            }
            Account::CommonStock | Account::RetainedEarnings => AccountType::Equity,
        }
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Account {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Account::ALL
            .iter()
            .copied()
            .find(|a| a.label() == s)
            .ok_or_else(|| ParseLabelError {
                kind: "account",
                label: s.to_string(),
            })
    }
}

/// Debit/credit marker carried from the source feed. Informational only:
/// amounts are summed as given regardless of entry type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Debit,
    Credit,
}

impl EntryType {
    pub fn label(&self) -> &'static str {
        match self {
            EntryType::Debit => "debit",
            EntryType::Credit => "credit",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EntryType {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "debit" => Ok(EntryType::Debit),
            "credit" => Ok(EntryType::Credit),
            _ => Err(ParseLabelError {
                kind: "entry type",
                label: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Transaction {
    #[schemars(description = "Booking date in YYYY-MM-DD format")]
    pub date: NaiveDate,

    #[schemars(description = "Ledger account the amount is posted to")]
    pub account: Account,

    #[schemars(description = "Reporting category used by the income statement")]
    pub category: Category,

    #[schemars(description = "Signed amount exactly as delivered by the source feed")]
    pub amount: f64,

    #[serde(rename = "type")]
    #[schemars(description = "Debit or credit marker (informational)")]
    pub entry_type: EntryType,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        account: Account,
        category: Category,
        amount: f64,
        entry_type: EntryType,
    ) -> Self {
        Self {
            date,
            account,
            category,
            amount,
            entry_type,
        }
    }

    pub fn period(&self) -> Period {
        Period::from_date(self.date)
    }
}

/// Immutable, ordered snapshot of ingested transactions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionLedger {
    transactions: Vec<Transaction>,
}

impl TransactionLedger {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.transactions.iter()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Distinct periods present in the ledger, oldest first.
    pub fn periods(&self) -> Vec<Period> {
        self.transactions
            .iter()
            .map(Transaction::period)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.transactions.iter().map(|t| t.date).min()?;
        let last = self.transactions.iter().map(|t| t.date).max()?;
        Some((first, last))
    }

    pub fn transaction_schema_json() -> std::result::Result<String, serde_json::Error> {
        let schema = schemars::schema_for!(Transaction);
        serde_json::to_string_pretty(&schema)
    }
}

impl<'a> IntoIterator for &'a TransactionLedger {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.transactions.iter()
    }
}

impl FromIterator<Transaction> for TransactionLedger {
    fn from_iter<I: IntoIterator<Item = Transaction>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TotalsConvention {
    #[default]
    #[schemars(
        description = "TOTAL LIABILITIES & EQUITY is computed as Total Liabilities + Total Equity. Mismatches against TOTAL ASSETS stay visible."
    )]
    Independent,

    #[schemars(
        description = "TOTAL LIABILITIES & EQUITY repeats TOTAL ASSETS. Hides any imbalance in the presented sheet."
    )]
    MirrorAssets,
}

pub const DEFAULT_TAX_RATE: f64 = 0.25;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StatementConfig {
    #[serde(default = "default_organization_name")]
    #[schemars(description = "Name printed in report titles")]
    pub organization_name: String,

    #[serde(default = "default_tax_rate")]
    #[schemars(description = "Flat tax rate applied to pre-tax income (0.0 to 1.0)")]
    pub tax_rate: f64,

    #[serde(default)]
    #[schemars(description = "How the final balance sheet row is derived")]
    pub totals_convention: TotalsConvention,

    #[serde(default = "default_balance_tolerance")]
    #[schemars(description = "Absolute difference tolerated when verifying Assets = Liabilities + Equity")]
    pub balance_tolerance: f64,
}

fn default_organization_name() -> String {
    "Company".to_string()
}

fn default_tax_rate() -> f64 {
    DEFAULT_TAX_RATE
}

fn default_balance_tolerance() -> f64 {
    0.01
}

impl Default for StatementConfig {
    fn default() -> Self {
        Self {
            organization_name: default_organization_name(),
            tax_rate: default_tax_rate(),
            totals_convention: TotalsConvention::default(),
            balance_tolerance: default_balance_tolerance(),
        }
    }
}

impl StatementConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.tax_rate.is_finite() || !(0.0..=1.0).contains(&self.tax_rate) {
            return Err(StatementError::InvalidTaxRate(self.tax_rate));
        }
        if !self.balance_tolerance.is_finite() || self.balance_tolerance < 0.0 {
            return Err(StatementError::InvalidTolerance(self.balance_tolerance));
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn schema_as_json() -> std::result::Result<String, serde_json::Error> {
        let schema = schemars::schema_for!(StatementConfig);
        serde_json::to_string_pretty(&schema)
    }
}
