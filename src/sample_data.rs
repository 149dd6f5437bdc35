//! Synthetic transaction feed for demos and tests.
//!
//! One calendar year of weekly revenue and cost of sales, operating expenses
//! every 30 days, and a set of opening balance sheet entries on January 1st.
//! Output is deterministic for a given seed.

use crate::schema::{Account, Category, EntryType, Transaction, TransactionLedger};
use chrono::{Datelike, Days, NaiveDate};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Uniform};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleDataConfig {
    pub year: i32,
    pub seed: u64,
}

impl Default for SampleDataConfig {
    fn default() -> Self {
        Self {
            year: 2024,
            seed: 42,
        }
    }
}

/// Every `step`-th day of `year`, starting January 1st.
fn days_of_year_every(year: i32, step: u64) -> Vec<NaiveDate> {
    let Some(start) = NaiveDate::from_ymd_opt(year, 1, 1) else {
        return Vec::new();
    };

    std::iter::successors(Some(start), |d| d.checked_add_days(Days::new(step)))
        .take_while(|d| d.year() == year)
        .collect()
}

pub fn generate_sample_data(config: &SampleDataConfig) -> TransactionLedger {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let weekly = days_of_year_every(config.year, 7);
    let monthly = days_of_year_every(config.year, 30);

    let mut transactions = Vec::new();

    let revenue = Uniform::new(50_000.0, 100_000.0);
    for &date in &weekly {
        transactions.push(Transaction::new(
            date,
            Account::Cash,
            Category::Revenue,
            revenue.sample(&mut rng),
            EntryType::Credit,
        ));
    }

    let cogs = Uniform::new(20_000.0, 40_000.0);
    for &date in &weekly {
        transactions.push(Transaction::new(
            date,
            Account::Inventory,
            Category::Cogs,
            cogs.sample(&mut rng),
            EntryType::Debit,
        ));
    }

    let marketing = Uniform::new(15_000.0, 25_000.0);
    let admin = Uniform::new(10_000.0, 20_000.0);
    let research = Uniform::new(8_000.0, 15_000.0);
    for &date in &monthly {
        for (category, range) in [
            (Category::SalesMarketing, &marketing),
            (Category::GeneralAdministrative, &admin),
            (Category::ResearchDevelopment, &research),
        ] {
            transactions.push(Transaction::new(
                date,
                Account::Cash,
                category,
                range.sample(&mut rng),
                EntryType::Debit,
            ));
        }
    }

    if let Some(&opening_date) = weekly.first() {
        let opening = [
            (Account::Cash, Category::Asset, 500_000.0, EntryType::Debit),
            (Account::AccountsReceivable, Category::Asset, 150_000.0, EntryType::Debit),
            (Account::Inventory, Category::Asset, 100_000.0, EntryType::Debit),
            (Account::PropertyPlantEquipment, Category::Asset, 300_000.0, EntryType::Debit),
            (Account::AccountsPayable, Category::Liability, 80_000.0, EntryType::Credit),
            (Account::LongTermDebt, Category::Liability, 200_000.0, EntryType::Credit),
            (Account::CommonStock, Category::Equity, 500_000.0, EntryType::Credit),
            (Account::RetainedEarnings, Category::Equity, 270_000.0, EntryType::Credit),
        ];
        for (account, category, amount, entry_type) in opening {
            transactions.push(Transaction::new(
                opening_date,
                account,
                category,
                amount,
                entry_type,
            ));
        }
    }

    info!(
        "Generated {} sample transactions for {} (seed {})",
        transactions.len(),
        config.year,
        config.seed
    );

    TransactionLedger::new(transactions)
}
