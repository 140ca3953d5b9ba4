//! Record normalizer: loosely-typed rows in, [`ClaimRecord`]s out.
//!
//! Malformed content never fails the run. An unparseable date becomes
//! `None`, an unparseable or negative amount becomes `0.0`, and a blank
//! categorical field becomes [`NOT_SPECIFIED`]. The input rows are only
//! borrowed, so a caller can keep using them afterwards.

use super::{fields, ClaimRecord, RawRow, NOT_SPECIFIED};
use crate::errors::{Error, Result};
use chrono::{DateTime, Days, NaiveDate, NaiveDateTime};
use serde_json::Value;

// Two-digit years must be tried before four-digit ones: `%Y` happily
// reads "24" as the year 24.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%y", "%m/%d/%Y", "%Y/%m/%d"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Largest spreadsheet serial day we accept (9999-12-31).
const MAX_SERIAL_DAY: f64 = 2_958_465.0;

/// Normalize every row, preserving order.
pub fn normalize_rows(rows: &[RawRow]) -> Vec<ClaimRecord> {
    rows.iter().map(normalize_row).collect()
}

/// Normalize an arbitrary JSON value that should be an array of row objects.
///
/// This is the one place the normalizer rejects input: a value that is not
/// an array, or an element that is not an object, is an invocation failure.
pub fn normalize_value(input: &Value) -> Result<Vec<ClaimRecord>> {
    let rows = input.as_array().ok_or_else(|| {
        Error::invalid_input(format!("expected an array of rows, got {}", kind(input)))
    })?;

    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            row.as_object().map(normalize_row).ok_or_else(|| {
                Error::invalid_input(format!("row {index} is {}, expected an object", kind(row)))
            })
        })
        .collect()
}

pub fn normalize_row(row: &RawRow) -> ClaimRecord {
    let text = |name: &str| row.get(name).and_then(parse_text);
    let date = |name: &str| row.get(name).and_then(parse_date);

    ClaimRecord {
        contract_number: text(fields::CONTRACT_NUMBER),
        claim_number: text(fields::CLAIM_NUMBER),
        vin: text(fields::VIN).unwrap_or_default(),
        vehicle: text(fields::VEHICLE).unwrap_or_default(),
        ro_date: date(fields::RO_DATE),
        entry_date: date(fields::ENTRY_DATE),
        default_servicer: text(fields::DEFAULT_SERVICER)
            .unwrap_or_else(|| NOT_SPECIFIED.to_string()),
        paid_amount: row.get(fields::PAID_AMOUNT).map_or(0.0, parse_amount),
        selling_dealer: text(fields::SELLING_DEALER).unwrap_or_else(|| NOT_SPECIFIED.to_string()),
        coverage: text(fields::COVERAGE),
        status: text(fields::STATUS),
    }
}

/// Whether a row carries no usable value in any recognized column.
pub fn is_blank_row(row: &RawRow) -> bool {
    fields::ALL
        .iter()
        .all(|name| row.get(*name).and_then(parse_text).is_none())
}

/// Trimmed, non-empty text. Numbers render as their decimal form so that a
/// numeric VIN or claim number still groups as text.
fn parse_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// Parse a paid amount. Anything that is not a finite, non-negative number
/// yields `0.0`.
pub fn parse_amount(value: &Value) -> f64 {
    let raw = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_amount_text(s),
        _ => None,
    };
    raw.map_or(0.0, sanitize_amount)
}

fn parse_amount_text(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let unsigned = trimmed.strip_prefix('$').unwrap_or(trimmed);
    let digits: String = unsigned.chars().filter(|c| *c != ',').collect();
    digits.trim().parse::<f64>().ok()
}

pub(crate) fn sanitize_amount(amount: f64) -> f64 {
    if amount.is_finite() && amount >= 0.0 {
        // folds -0.0 into 0.0
        amount + 0.0
    } else {
        0.0
    }
}

/// Parse a date cell. Strings may be ISO dates, US-style dates or
/// timestamps (time discarded); numbers are spreadsheet serial days.
pub fn parse_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::String(s) => parse_date_text(s.trim()),
        Value::Number(n) => n.as_f64().and_then(serial_day_to_date),
        _ => None,
    }
}

fn parse_date_text(text: &str) -> Option<NaiveDate> {
    if text.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Spreadsheet serial day (1900 date system) to calendar date.
fn serial_day_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 || serial > MAX_SERIAL_DAY {
        return None;
    }
    NaiveDate::from_ymd_opt(1899, 12, 30)?.checked_add_days(Days::new(serial.floor() as u64))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> RawRow {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_full_row_normalizes_every_field() {
        let record = normalize_row(&row(json!({
            "Contract Number": "K-100",
            "Claim #": 5521,
            "VIN": " 1HGCM82633A004352 ",
            "Vehicle": "2022 AUDI Q7",
            "RO Date": "2024-02-10",
            "Entry Date": "02/14/2024",
            "Default Servicer": "Main St Service",
            "Paid Amount": "$1,250.75",
            "Selling Dealer": "Metro Motors",
            "Coverage": "Powertrain",
            "Status": "Paid",
            "Notes": "ignored"
        })));

        assert_eq!(record.contract_number.as_deref(), Some("K-100"));
        assert_eq!(record.claim_number.as_deref(), Some("5521"));
        assert_eq!(record.vin, "1HGCM82633A004352");
        assert_eq!(record.ro_date, NaiveDate::from_ymd_opt(2024, 2, 10));
        assert_eq!(record.entry_date, NaiveDate::from_ymd_opt(2024, 2, 14));
        assert_eq!(record.paid_amount, 1250.75);
        assert_eq!(record.coverage.as_deref(), Some("Powertrain"));
        assert_eq!(record.status.as_deref(), Some("Paid"));
    }

    #[test]
    fn test_missing_fields_take_sentinels() {
        let record = normalize_row(&RawRow::new());
        assert_eq!(record.vin, "");
        assert_eq!(record.selling_dealer, NOT_SPECIFIED);
        assert_eq!(record.default_servicer, NOT_SPECIFIED);
        assert_eq!(record.paid_amount, 0.0);
        assert_eq!(record.ro_date, None);
        assert_eq!(record.coverage, None);
    }

    #[test]
    fn test_blank_strings_are_absent() {
        let record = normalize_row(&row(json!({
            "Selling Dealer": "   ",
            "Coverage": "",
            "RO Date": " "
        })));
        assert_eq!(record.selling_dealer, NOT_SPECIFIED);
        assert_eq!(record.coverage, None);
        assert_eq!(record.ro_date, None);
    }

    #[test]
    fn test_parse_amount_degrades_to_zero() {
        assert_eq!(parse_amount(&json!("n/a")), 0.0);
        assert_eq!(parse_amount(&json!("NaN")), 0.0);
        assert_eq!(parse_amount(&json!("inf")), 0.0);
        assert_eq!(parse_amount(&json!(-40)), 0.0);
        assert_eq!(parse_amount(&json!(null)), 0.0);
        assert_eq!(parse_amount(&json!(true)), 0.0);
        assert_eq!(parse_amount(&json!(" 300 ")), 300.0);
        assert_eq!(parse_amount(&json!(19.99)), 19.99);
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 7, 4);
        assert_eq!(parse_date(&json!("2024-07-04")), expected);
        assert_eq!(parse_date(&json!("2024/07/04")), expected);
        assert_eq!(parse_date(&json!("7/4/2024")), expected);
        assert_eq!(parse_date(&json!("07/04/24")), expected);
        assert_eq!(parse_date(&json!("2024-07-04T15:30:00")), expected);
        assert_eq!(parse_date(&json!("2024-07-04 08:00:00")), expected);
        assert_eq!(parse_date(&json!("2024-07-04T23:00:00Z")), expected);
    }

    #[test]
    fn test_parse_date_invalid_is_absent() {
        assert_eq!(parse_date(&json!("2024-02-30")), None);
        assert_eq!(parse_date(&json!("yesterday")), None);
        assert_eq!(parse_date(&json!(false)), None);
        assert_eq!(parse_date(&json!(-3)), None);
    }

    #[test]
    fn test_parse_date_serial_day() {
        // 45292 is 2024-01-01 in the 1900 date system
        assert_eq!(parse_date(&json!(45292)), NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(parse_date(&json!(45292.75)), NaiveDate::from_ymd_opt(2024, 1, 1));
    }

    #[test]
    fn test_normalize_value_rejects_non_sequence() {
        let err = normalize_value(&json!({"VIN": "V1"})).unwrap_err();
        assert!(err.is_invocation_failure());
        assert!(err.to_string().contains("an object"));
    }

    #[test]
    fn test_normalize_value_rejects_non_object_row() {
        let err = normalize_value(&json!([{"VIN": "V1"}, 42])).unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn test_normalize_value_empty_array() {
        assert!(normalize_value(&json!([])).unwrap().is_empty());
    }

    #[test]
    fn test_input_rows_are_untouched() {
        let rows = vec![row(json!({"Paid Amount": "bogus", "VIN": "V1"}))];
        let before = rows.clone();
        let _ = normalize_rows(&rows);
        assert_eq!(rows, before);
    }

    #[test]
    fn test_is_blank_row() {
        assert!(is_blank_row(&row(json!({"VIN": "", "Notes": "x"}))));
        assert!(!is_blank_row(&row(json!({"Paid Amount": 0}))));
    }
}
