//! Record fixtures for tests
//!
//! Builders for the monthly shapes the analytics tests keep reaching for:
//! steady budgets, the one-month spending spike, and CSV text for loaders.

use chrono::NaiveDate;

use crate::analytics::MonthlySeries;
use crate::models::{PeriodBucket, PeriodKey, Record, RecordKind};

/// Twelve months of expenses with a single spike in September
pub const SPIKE_EXPENSES: [f64; 12] = [
    500.0, 520.0, 510.0, 530.0, 515.0, 525.0, 540.0, 560.0, 2000.0, 530.0, 520.0, 535.0,
];

/// Index of the spike in [`SPIKE_EXPENSES`]
pub const SPIKE_INDEX: usize = 8;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn income(year: i32, month: u32, amount: f64) -> Record {
    Record::new(date(year, month, 1), amount, RecordKind::Income)
}

pub fn expense(year: i32, month: u32, amount: f64) -> Record {
    Record::new(date(year, month, 15), amount, RecordKind::Expense)
}

/// One income and one expense record per month, starting January 2024
pub fn monthly_records(incomes: &[f64], expenses: &[f64]) -> Vec<Record> {
    let start = PeriodKey::new(2024, 1).unwrap();
    let mut records = Vec::new();
    for (offset, (&inc, &exp)) in incomes.iter().zip(expenses).enumerate() {
        let period = start.advance(offset);
        records.push(income(period.year(), period.month(), inc));
        records.push(expense(period.year(), period.month(), exp));
    }
    records
}

/// Series with monthly periods from January 2024
pub fn series(incomes: &[f64], expenses: &[f64]) -> MonthlySeries {
    let start = PeriodKey::new(2024, 1).unwrap();
    let buckets: Vec<PeriodBucket> = incomes
        .iter()
        .zip(expenses)
        .enumerate()
        .map(|(offset, (&income, &expenses))| PeriodBucket {
            period: start.advance(offset),
            income,
            expenses,
        })
        .collect();
    MonthlySeries::from_buckets(&buckets)
}

/// Flat 3000 income against [`SPIKE_EXPENSES`]
pub fn spike_records() -> Vec<Record> {
    monthly_records(&[3000.0; 12], &SPIKE_EXPENSES)
}

/// CSV text for the given records, in the signed-amount layout banks export
pub fn signed_csv(records: &[Record]) -> String {
    let mut csv = String::from("Date,Description,Amount\n");
    for record in records {
        let amount = match record.kind {
            RecordKind::Expense => -record.amount,
            _ => record.amount,
        };
        csv.push_str(&format!(
            "{},{},{:.2}\n",
            record.date.format("%m/%d/%Y"),
            record.kind,
            amount
        ));
    }
    csv
}
