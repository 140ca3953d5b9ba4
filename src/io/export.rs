//! Delimited-text export of detector output.
//!
//! Flagged records are written with the columns present on the first
//! record, in canonical column order. Values holding the delimiter, a quote
//! or a line break are quoted. An empty record list produces no output.

use crate::core::{fields, ClaimRecord};
use crate::detectors::{AnalyzerKind, DetectionReport, GroupStats};
use crate::errors::{Error, Result};
use std::io::Write;

/// Column names for a record list: the canonical columns the first record
/// carries a value for.
pub fn export_columns(records: &[ClaimRecord]) -> Vec<&'static str> {
    match records.first() {
        Some(first) => fields::ALL
            .iter()
            .copied()
            .filter(|name| first.has_field(name))
            .collect(),
        None => Vec::new(),
    }
}

pub fn write_records<W: Write>(records: &[ClaimRecord], writer: W, delimiter: u8) -> Result<()> {
    let columns = export_columns(records);
    if columns.is_empty() {
        return Ok(());
    }

    let mut out = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);
    out.write_record(&columns)?;
    for record in records {
        out.write_record(columns.iter().map(|name| record.field_text(name)))?;
    }
    out.flush()?;
    Ok(())
}

/// Render a record list to a string.
pub fn export_records(records: &[ClaimRecord], delimiter: u8) -> Result<String> {
    let mut buffer = Vec::new();
    write_records(records, &mut buffer, delimiter)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Per-group statistics of one detector as a header plus rows.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsTable {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

fn group_stats_rows(stats: &[GroupStats], money: fn(f64) -> String) -> Vec<Vec<String>> {
    stats
        .iter()
        .map(|g| {
            vec![
                g.key.clone(),
                g.claim_count.to_string(),
                money(g.total_paid),
                money(g.avg_paid),
                money(g.max_paid),
            ]
        })
        .collect()
}

impl StatsTable {
    /// Statistics for `kind` with amounts as plain numbers. High-dollar
    /// findings are individual claims and have no group statistics.
    pub fn for_analyzer(report: &DetectionReport, kind: AnalyzerKind) -> Option<Self> {
        Self::build(report, kind, |v| v.to_string())
    }

    /// Same table with amounts rendered as dollars, for reports.
    pub fn for_display(report: &DetectionReport, kind: AnalyzerKind) -> Option<Self> {
        Self::build(report, kind, |v| format!("${v:.2}"))
    }

    fn build(
        report: &DetectionReport,
        kind: AnalyzerKind,
        money: fn(f64) -> String,
    ) -> Option<Self> {
        let table = match kind {
            AnalyzerKind::MultiClaim => Self {
                headers: vec!["VIN", "Vehicle", "Claim Count", "Total Paid"],
                rows: report
                    .multi_claim
                    .vehicles
                    .iter()
                    .map(|v| {
                        vec![
                            v.vin.clone(),
                            v.vehicle.clone(),
                            v.claim_count.to_string(),
                            money(v.total_paid),
                        ]
                    })
                    .collect(),
            },
            AnalyzerKind::HighDollar => return None,
            AnalyzerKind::MultiDealer => Self {
                headers: vec![
                    "VIN",
                    "Vehicle",
                    "Dealer Count",
                    "Dealers",
                    "Claim Count",
                    "Total Paid",
                ],
                rows: report
                    .multi_dealer
                    .vehicles
                    .iter()
                    .map(|v| {
                        vec![
                            v.vin.clone(),
                            v.vehicle.clone(),
                            v.dealer_count.to_string(),
                            v.dealers.join("; "),
                            v.claim_count.to_string(),
                            money(v.total_paid),
                        ]
                    })
                    .collect(),
            },
            AnalyzerKind::RapidRepeat => Self {
                headers: vec!["VIN", "Vehicle", "Claim Count", "Min Days Between", "Total Paid"],
                rows: report
                    .rapid_repeat
                    .vehicles
                    .iter()
                    .map(|v| {
                        vec![
                            v.vin.clone(),
                            v.vehicle.clone(),
                            v.claim_count.to_string(),
                            v.min_days_between.to_string(),
                            money(v.total_paid),
                        ]
                    })
                    .collect(),
            },
            AnalyzerKind::DealerRisk => Self {
                headers: vec![
                    "Selling Dealer",
                    "Claim Count",
                    "Total Paid",
                    "Average Paid",
                    "Exceeds Count",
                    "Exceeds Amount",
                ],
                rows: report
                    .dealer_risk
                    .dealers
                    .iter()
                    .map(|d| {
                        vec![
                            d.dealer.clone(),
                            d.claim_count.to_string(),
                            money(d.total_paid),
                            money(d.avg_paid),
                            d.exceeds_count.to_string(),
                            d.exceeds_amount.to_string(),
                        ]
                    })
                    .collect(),
            },
            AnalyzerKind::Luxury => Self {
                headers: vec!["Brand", "Claim Count", "Total Paid", "Average Paid", "Max Paid"],
                rows: group_stats_rows(&report.luxury.brands, money),
            },
            AnalyzerKind::Coverage => Self {
                headers: vec!["Coverage", "Claim Count", "Total Paid", "Average Paid", "Max Paid"],
                rows: group_stats_rows(&report.coverage.coverage_types, money),
            },
        };
        Some(table)
    }
}

pub fn write_group_stats<W: Write>(table: &StatsTable, writer: W, delimiter: u8) -> Result<()> {
    if table.rows.is_empty() {
        return Ok(());
    }

    let mut out = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);
    out.write_record(&table.headers)?;
    for row in &table.rows {
        out.write_record(row)?;
    }
    out.flush()?;
    Ok(())
}

pub fn export_group_stats(table: &StatsTable, delimiter: u8) -> Result<String> {
    let mut buffer = Vec::new();
    write_group_stats(table, &mut buffer, delimiter)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Delimiter byte from a user-supplied character.
pub fn delimiter_byte(delimiter: char) -> Result<u8> {
    u8::try_from(delimiter)
        .ok()
        .filter(|b| b.is_ascii() && *b != b'"' && *b != b'\n' && *b != b'\r')
        .ok_or_else(|| Error::invalid_input(format!("unusable delimiter {delimiter:?}")))
}
