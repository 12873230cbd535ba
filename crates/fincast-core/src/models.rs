//! Data models for fincast

use chrono::{Datelike, NaiveDate};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Kind of a transaction record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Income,
    Expense,
    /// Moves money between accounts; counts toward neither side
    Transfer,
    /// Unrecognized kind from the source data
    Unknown,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Transfer => "transfer",
            Self::Unknown => "unknown",
        }
    }

    /// Parse a kind label, mapping anything unrecognized to `Unknown`
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or(Self::Unknown)
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "credit" | "deposit" => Ok(Self::Income),
            "expense" | "debit" | "withdrawal" => Ok(Self::Expense),
            "transfer" => Ok(Self::Transfer),
            _ => Err(format!("Unknown record kind: {}", s)),
        }
    }
}

/// A dated amount from the transaction store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub date: NaiveDate,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: RecordKind,
}

impl Record {
    pub fn new(date: NaiveDate, amount: f64, kind: RecordKind) -> Self {
        Self { date, amount, kind }
    }

    pub fn period(&self) -> PeriodKey {
        PeriodKey::from_date(self.date)
    }
}

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A calendar month, ordered chronologically and written as "YYYY-MM"
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PeriodKey {
    year: i32,
    month: u32,
}

impl PeriodKey {
    /// Returns None if `month` is outside 1..=12
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Short month name ("Jan".."Dec")
    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }

    /// The month `months` after this one
    pub fn advance(&self, months: usize) -> Self {
        let zero_based = self.year as i64 * 12 + (self.month as i64 - 1) + months as i64;
        Self {
            year: zero_based.div_euclid(12) as i32,
            month: zero_based.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn next(&self) -> Self {
        self.advance(1)
    }

    /// Label used on forecast charts, e.g. "Mar 25"
    pub fn short_label(&self) -> String {
        format!("{} {:02}", self.month_name(), self.year.rem_euclid(100))
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for PeriodKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| format!("Invalid period key: {} (expected YYYY-MM)", s))?;
        let year: i32 = year
            .parse()
            .map_err(|_| format!("Invalid year in period key: {}", s))?;
        let month: u32 = month
            .parse()
            .map_err(|_| format!("Invalid month in period key: {}", s))?;
        Self::new(year, month).ok_or_else(|| format!("Month out of range in period key: {}", s))
    }
}

impl Serialize for PeriodKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PeriodKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Income and expense totals for one calendar month
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodBucket {
    pub period: PeriodKey,
    pub income: f64,
    pub expenses: f64,
}

impl PeriodBucket {
    pub fn new(period: PeriodKey) -> Self {
        Self {
            period,
            income: 0.0,
            expenses: 0.0,
        }
    }

    /// Always derived from the two totals
    pub fn net(&self) -> f64 {
        self.income - self.expenses
    }
}

impl Serialize for PeriodBucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PeriodBucket", 4)?;
        state.serialize_field("period", &self.period)?;
        state.serialize_field("income", &self.income)?;
        state.serialize_field("expenses", &self.expenses)?;
        state.serialize_field("net", &self.net())?;
        state.end()
    }
}
