use chrono::NaiveDate;
use financial_statement_builder::*;
use std::fs;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn period(label: &str) -> Period {
    label.parse().unwrap()
}

fn tx(on: NaiveDate, account: Account, category: Category, amount: f64) -> Transaction {
    Transaction::new(on, account, category, amount, EntryType::Debit)
}

fn opening_balances() -> Vec<Transaction> {
    let jan1 = date(2024, 1, 1);
    vec![
        tx(jan1, Account::Cash, Category::Asset, 500_000.0),
        tx(jan1, Account::AccountsReceivable, Category::Asset, 150_000.0),
        tx(jan1, Account::Inventory, Category::Asset, 100_000.0),
        tx(jan1, Account::PropertyPlantEquipment, Category::Asset, 300_000.0),
        tx(jan1, Account::AccountsPayable, Category::Liability, 80_000.0),
        tx(jan1, Account::LongTermDebt, Category::Liability, 200_000.0),
        tx(jan1, Account::CommonStock, Category::Equity, 500_000.0),
        tx(jan1, Account::RetainedEarnings, Category::Equity, 270_000.0),
    ]
}

#[test]
fn test_single_revenue_income_statement() -> anyhow::Result<()> {
    let ledger = TransactionLedger::new(vec![tx(
        date(2024, 1, 15),
        Account::Cash,
        Category::Revenue,
        1000.0,
    )]);
    let engine = StatementEngine::new(ledger, StatementConfig::default())?;

    let report = engine.income_statement(Some(period("2024-01")));
    assert_eq!(report.title, "Income Statement - 2024-01");
    assert_eq!(report.len(), 10);

    assert_eq!(report.amount_of("Revenue"), Some(1000.0));
    assert_eq!(report.amount_of("Cost of Goods Sold"), Some(0.0));
    assert_eq!(report.amount_of("Gross Profit"), Some(1000.0));
    assert_eq!(report.amount_of("Operating Expenses"), Some(0.0));
    assert_eq!(report.amount_of("Operating Income"), Some(1000.0));
    assert_eq!(report.amount_of("Interest Expense"), Some(0.0));
    assert_eq!(report.amount_of("Other Income"), Some(0.0));
    assert_eq!(report.amount_of("Pre-tax Income"), Some(1000.0));
    assert_eq!(report.amount_of("Tax Expense"), Some(-250.0));
    assert_eq!(report.amount_of("Net Income"), Some(750.0));

    // Nothing posted in February
    let february = engine.income_statement(Some(period("2024-02")));
    assert!(february
        .lines
        .iter()
        .all(|line| line.amount.map_or(true, |a| a == 0.0)));

    Ok(())
}

#[test]
fn test_full_income_statement_subtotals() -> anyhow::Result<()> {
    let on = date(2024, 3, 10);
    let ledger = TransactionLedger::new(vec![
        tx(on, Account::Cash, Category::Revenue, 10_000.0),
        tx(on, Account::Inventory, Category::Cogs, 4_000.0),
        tx(on, Account::Cash, Category::SalesMarketing, 1_000.0),
        tx(on, Account::Cash, Category::GeneralAdministrative, 500.0),
        tx(on, Account::Cash, Category::ResearchDevelopment, 500.0),
        tx(on, Account::Cash, Category::InterestExpense, 200.0),
        tx(on, Account::Cash, Category::OtherIncome, 200.0),
        // Balance sheet rows never reach the income statement
        tx(on, Account::Cash, Category::Asset, 99_999.0),
    ]);
    let engine = StatementEngine::new(ledger, StatementConfig::default())?;
    let statement = engine.income_statement_detail(Some(period("2024-03")));

    assert_eq!(statement.gross_profit, 6_000.0);
    assert_eq!(statement.operating_expenses, 2_000.0);
    assert_eq!(statement.operating_income, 4_000.0);
    assert_eq!(statement.pretax_income, 4_000.0);
    assert_eq!(statement.tax_expense, 1_000.0);
    assert_eq!(statement.net_income, 3_000.0);

    let report = statement.to_report();
    assert_eq!(report.amount_of("Cost of Goods Sold"), Some(-4_000.0));
    assert_eq!(report.amount_of("Operating Expenses"), Some(-2_000.0));
    assert_eq!(report.amount_of("Interest Expense"), Some(-200.0));

    Ok(())
}

#[test]
fn test_balance_sheet_totals() -> anyhow::Result<()> {
    let engine = StatementEngine::new(
        TransactionLedger::new(opening_balances()),
        StatementConfig::default(),
    )?;

    let report = engine.balance_sheet(Some(date(2024, 6, 30)));
    assert_eq!(report.len(), 24);
    assert_eq!(report.amount_of("Total Current Assets"), Some(750_000.0));
    assert_eq!(report.amount_of("TOTAL ASSETS"), Some(1_050_000.0));
    assert_eq!(report.amount_of("Total Liabilities"), Some(280_000.0));
    assert_eq!(report.amount_of("Total Equity"), Some(770_000.0));
    assert_eq!(report.amount_of(TOTAL_LIABILITIES_AND_EQUITY), Some(1_050_000.0));
    assert_eq!(report.amount_of("ASSETS"), None);

    let check = engine.balance_check(Some(date(2024, 6, 30)));
    assert!(check.is_balanced(0.01));
    assert!(engine.verify_balances().is_balanced());

    // Before the opening entries nothing has been posted
    let before = engine.balance_sheet(Some(date(2023, 12, 31)));
    assert_eq!(before.amount_of("TOTAL ASSETS"), Some(0.0));

    Ok(())
}

#[test]
fn test_imbalance_is_surfaced_not_hidden() -> anyhow::Result<()> {
    let mut transactions = opening_balances();
    transactions.push(tx(date(2024, 2, 3), Account::Cash, Category::Asset, 1_000.0));
    let ledger = TransactionLedger::new(transactions);

    let engine = StatementEngine::new(ledger.clone(), StatementConfig::default())?;
    let report = engine.balance_sheet(None);
    assert_eq!(report.amount_of("TOTAL ASSETS"), Some(1_051_000.0));
    assert_eq!(report.amount_of(TOTAL_LIABILITIES_AND_EQUITY), Some(1_050_000.0));

    let check = engine.balance_check(None);
    assert_eq!(check.difference, 1_000.0);

    let result = engine.verify_balances();
    assert!(!result.is_balanced());
    // January is fine, February onward is not
    assert_eq!(result.imbalances.len(), result.dates_checked - 1);

    match verify_accounting_equation(&ledger, 0.01) {
        Err(StatementError::AccountingEquationViolation { difference, .. }) => {
            assert_eq!(difference, 1_000.0);
        }
        other => panic!("expected AccountingEquationViolation, got {:?}", other),
    }

    // The legacy presentation repeats total assets in the closing row
    let mirror = StatementEngine::new(
        ledger,
        StatementConfig {
            totals_convention: TotalsConvention::MirrorAssets,
            ..StatementConfig::default()
        },
    )?;
    let report = mirror.balance_sheet(None);
    assert_eq!(report.amount_of(TOTAL_LIABILITIES_AND_EQUITY), Some(1_051_000.0));

    Ok(())
}

#[test]
fn test_variance_between_periods() -> anyhow::Result<()> {
    let ledger = TransactionLedger::new(vec![tx(
        date(2024, 1, 20),
        Account::Cash,
        Category::Revenue,
        1000.0,
    )]);
    let engine = StatementEngine::new(ledger, StatementConfig::default())?;

    let report = engine.variance(period("2024-02"), period("2024-01"));
    let revenue = report.row("Revenue").unwrap();
    assert_eq!(revenue.delta, -1000.0);
    assert_eq!(revenue.delta_percent, Some(-100.0));

    let report = engine.variance(period("2024-01"), period("2024-02"));
    let revenue = report.row("Revenue").unwrap();
    assert_eq!(revenue.delta, 1000.0);
    assert_eq!(revenue.delta_percent, None);

    let json = report.to_json()?;
    assert!(json.contains("\"delta_percent\": null"));
    assert!(!json.contains("NaN"));

    Ok(())
}

#[test]
fn test_csv_feed_to_statements() -> anyhow::Result<()> {
    let feed = "\
date,account,category,amount,type
2024-01-01,Cash,Asset,5000,debit
2024-01-01,Common Stock,Equity,5000,credit
2024-01-12,Cash,Revenue,1200,credit
2024-01-12 09:30:00,Inventory,COGS,200,debit
2024/02/05,Cash,Revenue,1500,credit
2024-02-06,Cash,Sales & Marketing,100,debit
";
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("transactions.csv");
    fs::write(&path, feed)?;

    let engine = StatementEngine::from_csv_path(&path, StatementConfig::default())?;
    assert_eq!(engine.ledger().len(), 6);
    assert_eq!(engine.periods(), vec![period("2024-01"), period("2024-02")]);

    let january = engine.income_statement(Some(period("2024-01")));
    assert_eq!(january.amount_of("Gross Profit"), Some(1000.0));

    let whole = engine.income_statement(None);
    assert_eq!(whole.title, "Income Statement - All Periods");
    assert_eq!(whole.amount_of("Revenue"), Some(2700.0));
    assert_eq!(whole.amount_of("Operating Expenses"), Some(-100.0));

    Ok(())
}

#[test]
fn test_malformed_feed_is_rejected() {
    let feed = "date,account,category,amount,type\n2024-01-01,Cash,Revenue,1,credit\n2024-01-02,Cash,Revenues,1,credit\n";
    assert!(matches!(
        read_transactions_str(feed),
        Err(StatementError::MalformedInput { row: 2, .. })
    ));
}

#[test]
fn test_config_from_file() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        r#"{ "organization_name": "Retail Haven Inc", "tax_rate": 0.21 }"#,
    )?;

    let config = StatementConfig::from_path(&path)?;
    assert_eq!(config.organization_name, "Retail Haven Inc");
    assert_eq!(config.tax_rate, 0.21);
    assert_eq!(config.totals_convention, TotalsConvention::Independent);

    fs::write(&path, r#"{ "tax_rate": 1.5 }"#)?;
    assert!(StatementConfig::from_path(&path).is_err());

    Ok(())
}

#[test]
fn test_sample_data_workbook_export() -> anyhow::Result<()> {
    let ledger = generate_sample_data(&SampleDataConfig::default());
    let engine = StatementEngine::new(ledger, StatementConfig::default())?;

    let (current, prior) = engine.reporting_periods().unwrap();
    assert_eq!(current, period("2024-12"));
    assert_eq!(prior, period("2024-11"));

    let balance = engine.balance_sheet(None);
    assert_eq!(balance.amount_of("  PP&E"), Some(300_000.0));
    assert_eq!(balance.amount_of("Total Liabilities"), Some(280_000.0));

    let dir = tempfile::tempdir()?;
    let written = engine.export_csv_dir(dir.path().join("statements"))?;
    assert_eq!(written.len(), 3);

    let income = fs::read_to_string(&written[0])?;
    let mut lines = income.lines();
    assert_eq!(lines.next(), Some("Company - Income Statement - 2024-12"));
    assert_eq!(lines.next(), Some(","));
    assert_eq!(lines.next(), Some("Line Item,Amount"));
    assert!(lines.next().unwrap_or_default().starts_with("Revenue,"));

    let variance = fs::read_to_string(&written[2])?;
    assert!(variance.contains("Variance Analysis: 2024-11 vs 2024-12"));
    assert!(variance.contains("Line Item,Prior Period,Current Period,Variance $,Variance %"));

    let text = engine.workbook()?.to_text();
    assert!(text.contains("TOTAL ASSETS"));
    assert!(!text.contains("NaN"));

    // Exported feed reads back into the same ledger
    let feed_path = dir.path().join("transactions.csv");
    write_transactions_path(engine.ledger(), &feed_path)?;
    let reread = read_transactions_path(&feed_path)?;
    assert_eq!(reread.len(), engine.ledger().len());

    Ok(())
}
