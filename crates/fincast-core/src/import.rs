//! Record file parsers (CSV and JSON)
//!
//! Rows with an unparseable date or amount are skipped and counted rather
//! than failing the whole file.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::{Record, RecordKind};

/// Records parsed from a file plus the number of rows that were dropped
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    pub records: Vec<Record>,
    pub skipped: usize,
}

impl ImportReport {
    fn push(&mut self, record: Option<Record>) {
        match record {
            Some(record) => self.records.push(record),
            None => self.skipped += 1,
        }
    }
}

/// Load records from a file, choosing the parser by extension
/// (`.json` is JSON, anything else CSV)
pub fn load_records(path: &Path) -> Result<ImportReport> {
    let file = File::open(path)?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let report = if is_json {
        parse_json(file)?
    } else {
        parse_csv(file)?
    };

    debug!(
        path = %path.display(),
        records = report.records.len(),
        skipped = report.skipped,
        "Loaded records"
    );
    Ok(report)
}

/// Column positions resolved from the CSV header
struct Columns {
    date: usize,
    amount: usize,
    kind: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |names: &[&str]| {
            headers
                .iter()
                .position(|h| names.iter().any(|n| h.trim().eq_ignore_ascii_case(n)))
        };

        Ok(Self {
            date: find(&["date", "timestamp", "transaction date"])
                .ok_or_else(|| Error::Import("Missing date column".into()))?,
            amount: find(&["amount"])
                .ok_or_else(|| Error::Import("Missing amount column".into()))?,
            kind: find(&["type", "kind"]),
        })
    }
}

/// Parse CSV records with a header row
///
/// Format: date,amount[,type][,...]. Without a type column the sign of the
/// amount decides: negative is an expense, positive is income.
pub fn parse_csv<R: Read>(reader: R) -> Result<ImportReport> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = Columns::from_headers(rdr.headers()?)?;
    let mut report = ImportReport::default();

    for (line, result) in rdr.records().enumerate() {
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                warn!(line = line + 2, error = %e, "Skipping unreadable CSV row");
                report.skipped += 1;
                continue;
            }
        };

        let record = build_record(
            row.get(columns.date),
            row.get(columns.amount).map(AmountField::Text),
            columns.kind.and_then(|i| row.get(i)),
        );
        if record.is_none() {
            warn!(line = line + 2, "Skipping malformed record");
        }
        report.push(record);
    }

    debug!("Parsed {} CSV records", report.records.len());
    Ok(report)
}

/// Parse a JSON array of `{ "date", "amount", "type" }` objects
pub fn parse_json<R: Read>(reader: R) -> Result<ImportReport> {
    let value: Value = serde_json::from_reader(reader)?;
    let items = value
        .as_array()
        .ok_or_else(|| Error::Import("Expected a JSON array of records".into()))?;

    let mut report = ImportReport::default();
    for (index, item) in items.iter().enumerate() {
        let amount = match item.get("amount") {
            Some(Value::Number(n)) => n.as_f64().map(AmountField::Number),
            Some(Value::String(s)) => Some(AmountField::Text(s)),
            _ => None,
        };
        let kind = item
            .get("type")
            .or_else(|| item.get("kind"))
            .and_then(Value::as_str);

        let record = build_record(item.get("date").and_then(Value::as_str), amount, kind);
        if record.is_none() {
            warn!(index, "Skipping malformed record");
        }
        report.push(record);
    }

    debug!("Parsed {} JSON records", report.records.len());
    Ok(report)
}

enum AmountField<'a> {
    Text(&'a str),
    Number(f64),
}

fn build_record(
    date: Option<&str>,
    amount: Option<AmountField<'_>>,
    kind: Option<&str>,
) -> Option<Record> {
    let date = parse_date(date?).ok()?;
    let amount = match amount? {
        AmountField::Text(s) => parse_amount(s).ok()?,
        AmountField::Number(n) if n.is_finite() => n,
        AmountField::Number(_) => return None,
    };

    let record = match kind.map(str::trim).filter(|k| !k.is_empty()) {
        Some(label) => {
            let kind = RecordKind::parse_lenient(label);
            if kind == RecordKind::Unknown {
                debug!(kind = label, "Unrecognized record kind");
            }
            Record::new(date, amount.abs(), kind)
        }
        None if amount < 0.0 => Record::new(date, -amount, RecordKind::Expense),
        None => Record::new(date, amount, RecordKind::Income),
    };
    Some(record)
}

/// Parse a date string in various common formats, including RFC 3339
/// timestamps (the time part is dropped)
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();

    let formats = [
        "%Y-%m-%d", // 2024-01-15
        "%m/%d/%Y", // 01/15/2024
        "%m/%d/%y", // 01/15/24
        "%m-%d-%Y", // 01-15-2024
        "%d/%m/%Y", // 15/01/2024 (European)
    ];

    for fmt in formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(date);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt.date());
    }

    Err(Error::Import(format!("Unable to parse date: {}", s)))
}

/// Parse an amount string, handling currency symbols, commas and
/// accounting-style parentheses
pub fn parse_amount(s: &str) -> Result<f64> {
    let cleaned: String = s
        .trim()
        .replace(['$', ',', ' '], "")
        .replace('(', "-")
        .replace(')', "");

    cleaned
        .parse::<f64>()
        .ok()
        .filter(|a| a.is_finite())
        .ok_or_else(|| Error::Import(format!("Unable to parse amount: {}", s)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(parse_date("01/15/2024").unwrap(), expected);
        assert_eq!(parse_date("2024-01-15").unwrap(), expected);
        assert_eq!(parse_date("2024-01-15T10:30:00Z").unwrap(), expected);
        assert_eq!(parse_date("2024-01-15T23:59:59+02:00").unwrap(), expected);
        assert_eq!(parse_date("2024-01-15T10:30:00").unwrap(), expected);
        assert!(parse_date("yesterday").is_err());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("$1,234.56").unwrap(), 1234.56);
        assert_eq!(parse_amount("-123.45").unwrap(), -123.45);
        assert_eq!(parse_amount("(100.00)").unwrap(), -100.0);
        assert!(parse_amount("abc").is_err());
        assert!(parse_amount("NaN").is_err());
        assert!(parse_amount("inf").is_err());
    }

    #[test]
    fn test_parse_csv_with_type_column() {
        let csv = "Date,Amount,Type,Description\n\
                   2024-01-03,3200.00,income,Salary\n\
                   2024-01-05,-45.10,expense,Groceries\n\
                   2024-01-09,500,transfer,Savings\n\
                   2024-02-01,12.00,refund,Odd kind\n";
        let report = parse_csv(csv.as_bytes()).unwrap();

        assert_eq!(report.skipped, 0);
        assert_eq!(report.records.len(), 4);
        assert_eq!(report.records[0].kind, RecordKind::Income);
        assert_eq!(report.records[1].kind, RecordKind::Expense);
        assert_eq!(report.records[1].amount, 45.10);
        assert_eq!(report.records[2].kind, RecordKind::Transfer);
        assert_eq!(report.records[3].kind, RecordKind::Unknown);
    }

    #[test]
    fn test_parse_csv_signed_amounts() {
        let csv = "date,description,amount\n\
                   01/15/2024,PAYCHECK,\"2,500.00\"\n\
                   01/16/2024,COFFEE,-4.50\n";
        let report = parse_csv(csv.as_bytes()).unwrap();

        assert_eq!(report.records.len(), 2);
        assert_eq!(report.records[0].kind, RecordKind::Income);
        assert_eq!(report.records[0].amount, 2500.0);
        assert_eq!(report.records[1].kind, RecordKind::Expense);
        assert_eq!(report.records[1].amount, 4.5);
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let csv = "date,amount,type\n\
                   2024-01-03,100,income\n\
                   not-a-date,100,income\n\
                   2024-01-04,lots,expense\n\
                   2024-01-05,,expense\n\
                   2024-01-06,20,expense\n";
        let report = parse_csv(csv.as_bytes()).unwrap();

        assert_eq!(report.records.len(), 2);
        assert_eq!(report.skipped, 3);
    }

    #[test]
    fn test_missing_required_column() {
        let csv = "when,amount\n2024-01-01,10\n";
        let err = parse_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Import(_)));
    }

    #[test]
    fn test_parse_json() {
        let json = r#"[
            {"date": "2024-03-01", "amount": 3000, "type": "income"},
            {"date": "2024-03-02", "amount": "$45.00", "type": "expense"},
            {"date": "2024-03-03T08:00:00Z", "amount": -12.5},
            {"date": "bad", "amount": 1, "type": "expense"},
            {"amount": 1, "type": "expense"},
            {"date": "2024-03-04", "amount": true}
        ]"#;
        let report = parse_json(json.as_bytes()).unwrap();

        assert_eq!(report.records.len(), 3);
        assert_eq!(report.skipped, 3);
        assert_eq!(report.records[1].amount, 45.0);
        assert_eq!(report.records[2].kind, RecordKind::Expense);
        assert_eq!(report.records[2].amount, 12.5);
    }

    #[test]
    fn test_parse_json_requires_array() {
        let err = parse_json(r#"{"date": "2024-01-01"}"#.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Import(_)));
    }

    #[test]
    fn test_load_records_by_extension() {
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("records.json");
        std::fs::File::create(&json_path)
            .unwrap()
            .write_all(br#"[{"date": "2024-01-01", "amount": 10, "type": "expense"}]"#)
            .unwrap();
        assert_eq!(load_records(&json_path).unwrap().records.len(), 1);

        let csv_path = dir.path().join("records.csv");
        std::fs::File::create(&csv_path)
            .unwrap()
            .write_all(b"date,amount\n2024-01-01,-10\n")
            .unwrap();
        assert_eq!(load_records(&csv_path).unwrap().records.len(), 1);

        assert!(load_records(&dir.path().join("missing.csv")).is_err());
    }
}
