use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatementError {
    #[error("Malformed input at row {row}: {details}")]
    MalformedInput { row: usize, details: String },

    #[error("Invalid period '{0}': expected YYYY-MM")]
    InvalidPeriod(String),

    #[error("Invalid tax rate {0}: must be between 0.0 and 1.0")]
    InvalidTaxRate(f64),

    #[error("Invalid balance tolerance {0}: must be a non-negative number")]
    InvalidTolerance(f64),

    #[error("Accounting equation violation as of {date}: Assets ({assets}) != Liabilities ({liabilities}) + Equity ({equity}), difference {difference}")]
    AccountingEquationViolation {
        date: String,
        assets: f64,
        liabilities: f64,
        equity: f64,
        difference: f64,
    },

    #[error("Ledger contains no transactions")]
    EmptyLedger,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StatementError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {kind} label '{label}'")]
pub struct ParseLabelError {
    pub kind: &'static str,
    pub label: String,
}
