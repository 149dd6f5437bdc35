use financial_statement_builder::{
    generate_sample_data, write_transactions_path, SampleDataConfig, Sheet, StatementConfig,
    StatementEngine,
};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    println!("Generating sample transaction data...");
    let ledger = generate_sample_data(&SampleDataConfig::default());

    write_transactions_path(&ledger, "sample_transactions.csv")?;
    println!("Sample data saved to sample_transactions.csv");

    println!("\nGenerating financial statements...");
    let config = match std::env::args().nth(1) {
        Some(path) => StatementConfig::from_path(path)?,
        None => StatementConfig::default(),
    };
    let engine = StatementEngine::new(ledger, config)?;

    let (current, _) = engine
        .reporting_periods()
        .ok_or("sample ledger has no periods")?;

    println!("\n=== INCOME STATEMENT ===");
    let income = engine.income_statement(Some(current));
    let sheet = Sheet::from_report("Income Statement", income.title.clone(), &income);
    print!("{}", sheet.to_text());

    let verification = engine.verify_balances();
    if verification.is_balanced() {
        println!(
            "\n✅ Balance sheet balances at all {} month-ends",
            verification.dates_checked
        );
    } else {
        println!(
            "\n⚠️  Balance sheet out of balance at {} of {} month-ends",
            verification.imbalances.len(),
            verification.dates_checked
        );
    }

    let written = engine.export_csv_dir("financial_statements")?;
    for path in &written {
        println!(" - {}", path.display());
    }
    println!("\n✓ Complete! Check financial_statements/ for full reports");

    Ok(())
}
