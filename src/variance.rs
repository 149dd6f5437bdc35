use crate::income_statement::{IncomeStatement, INCOME_STATEMENT_LABELS};
use crate::period::Period;
use crate::schema::TransactionLedger;
use crate::utils::round_to_one_decimal;
use log::info;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarianceRow {
    pub label: String,
    pub prior: f64,
    pub current: f64,
    pub delta: f64,
    /// `None` when the prior amount is zero.
    pub delta_percent: Option<f64>,
}

impl VarianceRow {
    pub fn new(label: impl Into<String>, prior: f64, current: f64) -> Self {
        let delta = current - prior;
        let delta_percent = if prior == 0.0 {
            None
        } else {
            Some(round_to_one_decimal(delta / prior * 100.0))
        };

        Self {
            label: label.into(),
            prior,
            current,
            delta,
            delta_percent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarianceReport {
    pub title: String,
    pub current_period: Period,
    pub prior_period: Period,
    pub rows: Vec<VarianceRow>,
}

impl VarianceReport {
    /// Compares two income statements line by line, on presented amounts.
    pub fn from_statements(current: &IncomeStatement, prior: &IncomeStatement) -> Option<Self> {
        let current_period = current.period?;
        let prior_period = prior.period?;

        Some(Self {
            title: format!("Variance Analysis: {} vs {}", prior_period, current_period),
            current_period,
            prior_period,
            rows: compare_statements(current, prior),
        })
    }

    pub fn row(&self, label: &str) -> Option<&VarianceRow> {
        self.rows.iter().find(|row| row.label == label)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn compare_statements(current: &IncomeStatement, prior: &IncomeStatement) -> Vec<VarianceRow> {
    INCOME_STATEMENT_LABELS
        .iter()
        .zip(prior.presented_amounts())
        .zip(current.presented_amounts())
        .map(|((label, prior), current)| VarianceRow::new(*label, prior, current))
        .collect()
}

pub fn build_variance(
    ledger: &TransactionLedger,
    current: Period,
    prior: Period,
    tax_rate: f64,
) -> VarianceReport {
    let current_statement = IncomeStatement::build(ledger, Some(current), tax_rate);
    let prior_statement = IncomeStatement::build(ledger, Some(prior), tax_rate);

    let rows = compare_statements(&current_statement, &prior_statement);

    info!("Built variance analysis {} vs {}", prior, current);

    VarianceReport {
        title: format!("Variance Analysis: {} vs {}", prior, current),
        current_period: current,
        prior_period: prior,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Account, Category, EntryType, Transaction, DEFAULT_TAX_RATE};
    use chrono::NaiveDate;

    fn revenue(y: i32, m: u32, amount: f64) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(y, m, 10).unwrap(),
            Account::Cash,
            Category::Revenue,
            amount,
            EntryType::Credit,
        )
    }

    #[test]
    fn test_row_percent() {
        let row = VarianceRow::new("Revenue", 800.0, 1000.0);
        assert_eq!(row.delta, 200.0);
        assert_eq!(row.delta_percent, Some(25.0));

        let row = VarianceRow::new("Revenue", 3.0, 4.0);
        assert_eq!(row.delta_percent, Some(33.3));

        // Negative prior: percent follows the sign of delta / prior
        let row = VarianceRow::new("Cost of Goods Sold", -200.0, -300.0);
        assert_eq!(row.delta, -100.0);
        assert_eq!(row.delta_percent, Some(50.0));
    }

    #[test]
    fn test_percent_ties_round_to_even() {
        // 0.25% and -0.25% sit exactly on the rounding boundary
        let row = VarianceRow::new("Revenue", 400.0, 401.0);
        assert_eq!(row.delta_percent, Some(0.2));

        let row = VarianceRow::new("Revenue", 400.0, 399.0);
        assert_eq!(row.delta_percent, Some(-0.2));
    }

    #[test]
    fn test_zero_prior_is_undefined() {
        let row = VarianceRow::new("Revenue", 0.0, 1000.0);
        assert_eq!(row.delta, 1000.0);
        assert_eq!(row.delta_percent, None);

        // Negated zero from a flipped cost line is still zero
        let row = VarianceRow::new("Cost of Goods Sold", -0.0, -50.0);
        assert_eq!(row.delta_percent, None);
    }

    #[test]
    fn test_revenue_drops_to_zero() {
        let a = Period::new(2024, 1).unwrap();
        let b = Period::new(2024, 2).unwrap();
        let ledger = TransactionLedger::new(vec![revenue(2024, 1, 1000.0)]);

        let report = build_variance(&ledger, b, a, DEFAULT_TAX_RATE);
        let rev = report.row("Revenue").unwrap();
        assert_eq!(rev.prior, 1000.0);
        assert_eq!(rev.current, 0.0);
        assert_eq!(rev.delta, -1000.0);
        assert_eq!(rev.delta_percent, Some(-100.0));

        let cogs = report.row("Cost of Goods Sold").unwrap();
        assert_eq!(cogs.delta_percent, None);

        for row in &report.rows {
            if let Some(pct) = row.delta_percent {
                assert!(pct.is_finite());
            }
        }
    }

    #[test]
    fn test_growth_from_zero_prior() {
        let a = Period::new(2024, 1).unwrap();
        let b = Period::new(2024, 2).unwrap();
        let ledger = TransactionLedger::new(vec![revenue(2024, 1, 1000.0)]);

        let report = build_variance(&ledger, a, b, DEFAULT_TAX_RATE);
        let rev = report.row("Revenue").unwrap();
        assert_eq!(rev.delta, 1000.0);
        assert_eq!(rev.delta_percent, None);
        assert_eq!(report.title, "Variance Analysis: 2024-02 vs 2024-01");
    }

    #[test]
    fn test_rows_follow_income_statement_order() {
        let ledger = TransactionLedger::new(vec![revenue(2024, 1, 10.0), revenue(2024, 2, 20.0)]);
        let report = build_variance(
            &ledger,
            Period::new(2024, 2).unwrap(),
            Period::new(2024, 1).unwrap(),
            DEFAULT_TAX_RATE,
        );
        let labels: Vec<&str> = report.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, INCOME_STATEMENT_LABELS.to_vec());
        assert_eq!(report.row("Net Income").unwrap().delta_percent, Some(100.0));
    }

    #[test]
    fn test_from_statements_requires_periods() {
        let ledger = TransactionLedger::new(vec![revenue(2024, 1, 10.0)]);
        let whole = IncomeStatement::build(&ledger, None, DEFAULT_TAX_RATE);
        let jan = IncomeStatement::build(&ledger, Some(Period::new(2024, 1).unwrap()), DEFAULT_TAX_RATE);

        assert!(VarianceReport::from_statements(&jan, &whole).is_none());
        let report = VarianceReport::from_statements(&jan, &jan).unwrap();
        assert!(report.rows.iter().all(|r| r.delta == 0.0));
    }
}
