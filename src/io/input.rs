//! Loading claim rows from files.
//!
//! CSV cells and JSON values are handed to the normalizer untouched; this
//! layer only turns a file into [`RawRow`]s and drops rows with no
//! recognized value at all.

use crate::core::normalize::is_blank_row;
use crate::core::RawRow;
use crate::errors::{Error, Result};
use serde_json::Value;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Json,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Read every non-blank row from a `.csv` or `.json` file.
pub fn load_rows(path: &Path) -> Result<Vec<RawRow>> {
    let format =
        InputFormat::from_path(path).ok_or_else(|| Error::UnsupportedFormat(path.to_path_buf()))?;
    let content = std::fs::read_to_string(path)?;

    let rows = match format {
        InputFormat::Csv => parse_csv_rows(&content)?,
        InputFormat::Json => parse_json_rows(&content)?,
    };

    log::debug!("Loaded {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Parse CSV text with a header row. Every cell becomes a string value.
pub fn parse_csv_rows(content: &str) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(name, cell)| (name.to_string(), Value::String(cell.to_string())))
            .collect();
        if !is_blank_row(&row) {
            rows.push(row);
        }
    }
    Ok(rows)
}

/// Parse a JSON array of row objects.
pub fn parse_json_rows(content: &str) -> Result<Vec<RawRow>> {
    let value: Value = serde_json::from_str(content)?;
    let Value::Array(items) = value else {
        return Err(Error::invalid_input("expected a JSON array of rows"));
    };

    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match item {
            Value::Object(row) => (!is_blank_row(&row)).then_some(Ok(row)),
            _ => Some(Err(Error::invalid_input(format!(
                "row {index} is not an object"
            )))),
        })
        .collect()
}
