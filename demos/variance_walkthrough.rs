use chrono::NaiveDate;
use financial_statement_builder::{
    Account, Category, EntryType, Sheet, StatementConfig, StatementEngine, Transaction,
    TransactionLedger,
};

fn row(date: (i32, u32, u32), account: Account, category: Category, amount: f64) -> Transaction {
    Transaction::new(
        NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        account,
        category,
        amount,
        EntryType::Debit,
    )
}

fn main() {
    let ledger = TransactionLedger::new(vec![
        row((2024, 1, 5), Account::Cash, Category::Revenue, 120_000.0),
        row((2024, 1, 5), Account::Inventory, Category::Cogs, 48_000.0),
        row((2024, 1, 15), Account::Cash, Category::SalesMarketing, 18_000.0),
        row((2024, 1, 15), Account::Cash, Category::GeneralAdministrative, 12_000.0),
        row((2024, 2, 5), Account::Cash, Category::Revenue, 138_000.0),
        row((2024, 2, 5), Account::Inventory, Category::Cogs, 51_000.0),
        row((2024, 2, 15), Account::Cash, Category::SalesMarketing, 21_000.0),
        row((2024, 2, 15), Account::Cash, Category::GeneralAdministrative, 12_000.0),
        row((2024, 2, 15), Account::Cash, Category::ResearchDevelopment, 9_000.0),
        row((2024, 2, 28), Account::Cash, Category::InterestExpense, 1_500.0),
    ]);

    let config = StatementConfig {
        organization_name: "Northwind Traders".to_string(),
        ..StatementConfig::default()
    };
    let engine = StatementEngine::new(ledger, config).expect("default config is valid");

    let (current, prior) = engine.reporting_periods().expect("ledger has periods");
    let variance = engine.variance(current, prior);

    let sheet = Sheet::from_variance("Variance Analysis", variance.title.clone(), &variance);
    print!("{}", sheet.to_text());

    println!();
    for line in &variance.rows {
        match line.delta_percent {
            Some(pct) => println!("{:<20} {:>+8.1}%", line.label, pct),
            None => println!("{:<20} {:>9}", line.label, "n/a"),
        }
    }
}
