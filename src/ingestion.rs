use crate::error::{Result, StatementError};
use crate::schema::{Account, Category, EntryType, Transaction, TransactionLedger};
use crate::utils::parse_transaction_date;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

/// One row of a transaction feed before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTransaction {
    pub date: String,
    pub account: String,
    pub category: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub entry_type: String,
}

impl RawTransaction {
    /// Validates the row. `row` is the 1-based data row used in error messages.
    pub fn into_transaction(self, row: usize) -> Result<Transaction> {
        let malformed = |details: String| StatementError::MalformedInput { row, details };

        let date = parse_transaction_date(&self.date)
            .ok_or_else(|| malformed(format!("unparseable date '{}'", self.date)))?;
        let account: Account = self
            .account
            .trim()
            .parse()
            .map_err(|e| malformed(format!("{}", e)))?;
        let category: Category = self
            .category
            .trim()
            .parse()
            .map_err(|e| malformed(format!("{}", e)))?;
        let entry_type: EntryType = self
            .entry_type
            .parse()
            .map_err(|e| malformed(format!("{}", e)))?;

        if !self.amount.is_finite() {
            return Err(malformed(format!("non-finite amount {}", self.amount)));
        }

        Ok(Transaction::new(date, account, category, self.amount, entry_type))
    }
}

pub fn ingest_records<I>(records: I) -> Result<TransactionLedger>
where
    I: IntoIterator<Item = RawTransaction>,
{
    let transactions = records
        .into_iter()
        .enumerate()
        .map(|(idx, raw)| raw.into_transaction(idx + 1))
        .collect::<Result<Vec<_>>>()?;

    debug!("Ingested {} transactions", transactions.len());
    Ok(TransactionLedger::new(transactions))
}

/// Reads a headed CSV feed with columns `date,account,category,amount,type`.
pub fn read_transactions_csv<R: io::Read>(reader: R) -> Result<TransactionLedger> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut transactions = Vec::new();
    for (idx, record) in rdr.deserialize::<RawTransaction>().enumerate() {
        let raw = record?;
        transactions.push(raw.into_transaction(idx + 1)?);
    }

    info!("Read {} transactions from CSV", transactions.len());
    Ok(TransactionLedger::new(transactions))
}

pub fn read_transactions_str(csv_text: &str) -> Result<TransactionLedger> {
    read_transactions_csv(csv_text.as_bytes())
}

pub fn read_transactions_path(path: impl AsRef<Path>) -> Result<TransactionLedger> {
    let file = std::fs::File::open(path)?;
    read_transactions_csv(io::BufReader::new(file))
}

/// Writes the ledger back out in the layout [`read_transactions_csv`] accepts.
pub fn write_transactions_csv<W: io::Write>(ledger: &TransactionLedger, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for transaction in ledger {
        wtr.serialize(transaction)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_transactions_path(ledger: &TransactionLedger, path: impl AsRef<Path>) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_transactions_csv(ledger, io::BufWriter::new(file))
}
