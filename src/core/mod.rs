//! Claim record model shared by every detector.
//!
//! Rows arrive from a spreadsheet or CSV parser as loosely-typed maps
//! ([`RawRow`]). [`normalize`] resolves each row once into a [`ClaimRecord`]
//! whose fields are already defaulted, so detectors never repeat
//! "field or default" checks.

pub mod normalize;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use normalize::{normalize_row, normalize_rows, normalize_value, parse_amount, parse_date};

/// A single input row as produced by an external parser.
pub type RawRow = serde_json::Map<String, serde_json::Value>;

/// Sentinel grouping key for absent or empty categorical fields.
pub const NOT_SPECIFIED: &str = "Not Specified";

/// Sentinel brand for vehicle descriptions with no brand token.
pub const NOT_IDENTIFIED: &str = "Not Identified";

/// Brands the luxury analyzer reports on. Matched against the second
/// whitespace-delimited token of the vehicle description.
pub const LUXURY_BRANDS: &[&str] = &[
    "BENTLEY",
    "FERRARI",
    "LAMBORGHINI",
    "MCLAREN",
    "ROLLS-ROYCE",
    "ASTON MARTIN",
    "PORSCHE",
    "MERCEDES-BENZ",
    "BMW",
    "AUDI",
    "MASERATI",
    "LAND ROVER",
    "TESLA",
];

/// Recognized column names. Anything else on an input row is ignored.
pub mod fields {
    pub const CONTRACT_NUMBER: &str = "Contract Number";
    pub const CLAIM_NUMBER: &str = "Claim #";
    pub const VIN: &str = "VIN";
    pub const VEHICLE: &str = "Vehicle";
    pub const RO_DATE: &str = "RO Date";
    pub const ENTRY_DATE: &str = "Entry Date";
    pub const DEFAULT_SERVICER: &str = "Default Servicer";
    pub const PAID_AMOUNT: &str = "Paid Amount";
    pub const SELLING_DEALER: &str = "Selling Dealer";
    pub const COVERAGE: &str = "Coverage";
    pub const STATUS: &str = "Status";

    /// Canonical column order used for export.
    pub const ALL: &[&str] = &[
        CONTRACT_NUMBER,
        CLAIM_NUMBER,
        VIN,
        VEHICLE,
        RO_DATE,
        ENTRY_DATE,
        DEFAULT_SERVICER,
        PAID_AMOUNT,
        SELLING_DEALER,
        COVERAGE,
        STATUS,
    ];
}

/// One normalized claim. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimRecord {
    pub contract_number: Option<String>,
    pub claim_number: Option<String>,
    /// Empty when the row carried no VIN; groups under [`NOT_SPECIFIED`].
    pub vin: String,
    /// Free-text description, e.g. "2023 BMW X5".
    pub vehicle: String,
    pub ro_date: Option<NaiveDate>,
    pub entry_date: Option<NaiveDate>,
    pub default_servicer: String,
    /// Always finite and non-negative.
    pub paid_amount: f64,
    pub selling_dealer: String,
    pub coverage: Option<String>,
    pub status: Option<String>,
}

impl ClaimRecord {
    /// Minimal record with every optional field absent; handy for callers
    /// that build records directly rather than through the normalizer.
    pub fn new(vin: impl Into<String>, paid_amount: f64) -> Self {
        Self {
            contract_number: None,
            claim_number: None,
            vin: vin.into(),
            vehicle: String::new(),
            ro_date: None,
            entry_date: None,
            default_servicer: NOT_SPECIFIED.to_string(),
            paid_amount: normalize::sanitize_amount(paid_amount),
            selling_dealer: NOT_SPECIFIED.to_string(),
            coverage: None,
            status: None,
        }
    }

    /// Brand token: the second whitespace-delimited word of the vehicle
    /// description, or [`NOT_IDENTIFIED`].
    pub fn brand(&self) -> &str {
        self.vehicle.split_whitespace().nth(1).unwrap_or(NOT_IDENTIFIED)
    }

    pub fn is_luxury(&self) -> bool {
        LUXURY_BRANDS.contains(&self.brand())
    }

    /// Claim identifier or the sentinel, for display and flag keys.
    pub fn claim_key(&self) -> &str {
        self.claim_number.as_deref().unwrap_or(NOT_SPECIFIED)
    }

    /// Whether the named column carries a value on this record.
    pub fn has_field(&self, name: &str) -> bool {
        match name {
            fields::CONTRACT_NUMBER => self.contract_number.is_some(),
            fields::CLAIM_NUMBER => self.claim_number.is_some(),
            fields::RO_DATE => self.ro_date.is_some(),
            fields::ENTRY_DATE => self.entry_date.is_some(),
            fields::COVERAGE => self.coverage.is_some(),
            fields::STATUS => self.status.is_some(),
            fields::VIN
            | fields::VEHICLE
            | fields::DEFAULT_SERVICER
            | fields::PAID_AMOUNT
            | fields::SELLING_DEALER => true,
            _ => false,
        }
    }

    /// Text rendering of a column; empty for absent values and unknown names.
    pub fn field_text(&self, name: &str) -> String {
        let date = |d: &Option<NaiveDate>| {
            d.map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default()
        };
        match name {
            fields::CONTRACT_NUMBER => self.contract_number.clone().unwrap_or_default(),
            fields::CLAIM_NUMBER => self.claim_number.clone().unwrap_or_default(),
            fields::VIN => self.vin.clone(),
            fields::VEHICLE => self.vehicle.clone(),
            fields::RO_DATE => date(&self.ro_date),
            fields::ENTRY_DATE => date(&self.entry_date),
            fields::DEFAULT_SERVICER => self.default_servicer.clone(),
            fields::PAID_AMOUNT => self.paid_amount.to_string(),
            fields::SELLING_DEALER => self.selling_dealer.clone(),
            fields::COVERAGE => self.coverage.clone().unwrap_or_default(),
            fields::STATUS => self.status.clone().unwrap_or_default(),
            _ => String::new(),
        }
    }
}
