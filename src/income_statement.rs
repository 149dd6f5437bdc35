use crate::aggregator::{sum_amount, Filter};
use crate::period::Period;
use crate::report::{LineItem, Report};
use crate::schema::{Category, TransactionLedger};
use log::info;
use serde::{Deserialize, Serialize};

pub const INCOME_STATEMENT_LABELS: [&str; 10] = [
    "Revenue",
    "Cost of Goods Sold",
    "Gross Profit",
    "Operating Expenses",
    "Operating Income",
    "Interest Expense",
    "Other Income",
    "Pre-tax Income",
    "Tax Expense",
    "Net Income",
];

/// Income statement accumulators, all stored unflipped.
///
/// Costs are positive here; the sign flip for cost lines happens only in
/// [`IncomeStatement::presented_amounts`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeStatement {
    pub period: Option<Period>,
    pub tax_rate: f64,
    pub revenue: f64,
    pub cogs: f64,
    pub gross_profit: f64,
    pub operating_expenses: f64,
    pub operating_income: f64,
    pub interest_expense: f64,
    pub other_income: f64,
    pub pretax_income: f64,
    pub tax_expense: f64,
    pub net_income: f64,
}

impl IncomeStatement {
    /// Builds the statement for one period, or for the whole ledger when
    /// `period` is `None`.
    pub fn build(ledger: &TransactionLedger, period: Option<Period>, tax_rate: f64) -> Self {
        let sum = |filter: Filter| sum_amount(ledger, &filter.in_period(period));

        let revenue = sum(Filter::category(Category::Revenue));
        let cogs = sum(Filter::category(Category::Cogs));
        let gross_profit = revenue - cogs;

        let operating_expenses = sum(Filter::categories(&Category::OPERATING_EXPENSES));
        let operating_income = gross_profit - operating_expenses;

        let interest_expense = sum(Filter::category(Category::InterestExpense));
        let other_income = sum(Filter::category(Category::OtherIncome));

        let pretax_income = operating_income - interest_expense + other_income;
        let tax_expense = pretax_income * tax_rate;
        let net_income = pretax_income - tax_expense;

        Self {
            period,
            tax_rate,
            revenue,
            cogs,
            gross_profit,
            operating_expenses,
            operating_income,
            interest_expense,
            other_income,
            pretax_income,
            tax_expense,
            net_income,
        }
    }

    /// Amounts in presentation order, with cost lines negated.
    pub fn presented_amounts(&self) -> [f64; 10] {
        [
            self.revenue,
            -self.cogs,
            self.gross_profit,
            -self.operating_expenses,
            self.operating_income,
            -self.interest_expense,
            self.other_income,
            self.pretax_income,
            -self.tax_expense,
            self.net_income,
        ]
    }

    pub fn title(&self) -> String {
        match self.period {
            Some(period) => format!("Income Statement - {}", period),
            None => "Income Statement - All Periods".to_string(),
        }
    }

    pub fn to_report(&self) -> Report {
        let lines = INCOME_STATEMENT_LABELS
            .iter()
            .zip(self.presented_amounts())
            .map(|(label, amount)| LineItem::value(*label, amount))
            .collect();

        Report::new(self.title(), lines)
    }
}

pub fn build_income_statement(
    ledger: &TransactionLedger,
    period: Option<Period>,
    tax_rate: f64,
) -> Report {
    let statement = IncomeStatement::build(ledger, period, tax_rate);
    info!(
        "Built income statement for {}: revenue {:.2}, net income {:.2}",
        period.map_or_else(|| "all periods".to_string(), |p| p.to_string()),
        statement.revenue,
        statement.net_income
    );
    statement.to_report()
}
