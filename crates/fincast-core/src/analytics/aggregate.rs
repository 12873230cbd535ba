//! Monthly aggregation of raw records

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::models::{PeriodBucket, PeriodKey, Record, RecordKind};

/// Group records into one bucket per calendar month, ascending by month
///
/// Transfers and unknown kinds still create their month's bucket but add to
/// neither total. Records with a NaN or infinite amount are skipped.
pub fn aggregate(records: &[Record]) -> BTreeMap<PeriodKey, PeriodBucket> {
    let mut buckets: BTreeMap<PeriodKey, PeriodBucket> = BTreeMap::new();
    let mut skipped = 0usize;

    for record in records {
        if !record.amount.is_finite() {
            warn!(
                date = %record.date,
                kind = %record.kind,
                "Skipping record with non-finite amount"
            );
            skipped += 1;
            continue;
        }

        let period = record.period();
        let bucket = buckets
            .entry(period)
            .or_insert_with(|| PeriodBucket::new(period));

        match record.kind {
            RecordKind::Income => bucket.income += record.amount,
            RecordKind::Expense => bucket.expenses += record.amount,
            RecordKind::Transfer | RecordKind::Unknown => {}
        }
    }

    debug!(
        records = records.len(),
        skipped,
        buckets = buckets.len(),
        "Aggregated records into monthly buckets"
    );
    buckets
}

/// Monthly buckets projected into parallel arrays
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MonthlySeries {
    pub periods: Vec<PeriodKey>,
    pub income: Vec<f64>,
    pub expenses: Vec<f64>,
    pub net: Vec<f64>,
}

impl MonthlySeries {
    /// Project buckets in the order given (a bucket map yields them ascending)
    pub fn from_buckets<'a>(buckets: impl IntoIterator<Item = &'a PeriodBucket>) -> Self {
        let mut series = Self::default();
        for bucket in buckets {
            series.periods.push(bucket.period);
            series.income.push(bucket.income);
            series.expenses.push(bucket.expenses);
            series.net.push(bucket.net());
        }
        series
    }

    pub fn from_records(records: &[Record]) -> Self {
        Self::from_buckets(aggregate(records).values())
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn last_period(&self) -> Option<PeriodKey> {
        self.periods.last().copied()
    }

    /// Month a seasonal phase refers to: the observed month at that index,
    /// or for phases past the data, the first month advanced by the phase
    pub fn phase_period(&self, phase: usize) -> Option<PeriodKey> {
        let first = self.periods.first()?;
        Some(
            self.periods
                .get(phase)
                .copied()
                .unwrap_or_else(|| first.advance(phase)),
        )
    }

    /// Rebuild the buckets (net recomputed from the totals)
    pub fn buckets(&self) -> Vec<PeriodBucket> {
        self.periods
            .iter()
            .zip(self.income.iter().zip(&self.expenses))
            .map(|(&period, (&income, &expenses))| PeriodBucket {
                period,
                income,
                expenses,
            })
            .collect()
    }
}
