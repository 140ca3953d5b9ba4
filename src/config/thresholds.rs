use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The five detection thresholds. Fixed for the duration of one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionSettings {
    /// Minimum claims on one VIN to flag it (>= 1)
    #[serde(default = "default_vin_threshold")]
    pub vin_threshold: usize,

    /// Standard deviations above the mean for a high-dollar claim (>= 0)
    #[serde(default = "default_dollar_threshold")]
    pub dollar_threshold: f64,

    /// Largest gap in days between repeat claims on one VIN (>= 0)
    #[serde(default = "default_days_threshold")]
    pub days_threshold: u32,

    /// Minimum claims for a dealer to be flagged on volume alone (>= 1)
    #[serde(default = "default_dealer_count_threshold")]
    pub dealer_count_threshold: usize,

    /// Multiple of the portfolio mean a dealer's average must reach (>= 0)
    #[serde(default = "default_dealer_amount_multiplier")]
    pub dealer_amount_multiplier: f64,
}

impl Default for DetectionSettings {
    fn default() -> Self {
        Self {
            vin_threshold: default_vin_threshold(),
            dollar_threshold: default_dollar_threshold(),
            days_threshold: default_days_threshold(),
            dealer_count_threshold: default_dealer_count_threshold(),
            dealer_amount_multiplier: default_dealer_amount_multiplier(),
        }
    }
}

fn default_vin_threshold() -> usize {
    2
}
fn default_dollar_threshold() -> f64 {
    2.0
}
fn default_days_threshold() -> u32 {
    30
}
fn default_dealer_count_threshold() -> usize {
    3
}
fn default_dealer_amount_multiplier() -> f64 {
    1.5
}

/// Setting names: the snake_case key first, then the camelCase alias
/// used by front ends.
const VIN_THRESHOLD: [&str; 2] = ["vin_threshold", "vinThreshold"];
const DOLLAR_THRESHOLD: [&str; 2] = ["dollar_threshold", "dollarThreshold"];
const DAYS_THRESHOLD: [&str; 2] = ["days_threshold", "daysThreshold"];
const DEALER_COUNT_THRESHOLD: [&str; 2] = ["dealer_count_threshold", "dealerCountThreshold"];
const DEALER_AMOUNT_MULTIPLIER: [&str; 2] =
    ["dealer_amount_multiplier", "dealerAmountMultiplier"];

impl DetectionSettings {
    /// Build settings from a loosely-typed table.
    ///
    /// Missing, non-numeric or out-of-range entries take their default.
    /// Only a value that is not a table at all is rejected.
    pub fn from_value(value: &Value) -> Result<Self> {
        Self::default().merge_value(value)
    }

    /// Overlay a loosely-typed table onto these settings. Entries that fail
    /// to coerce leave the current value in place.
    pub fn merge_value(self, value: &Value) -> Result<Self> {
        let table = match value {
            Value::Object(table) => table,
            Value::Null => return Ok(self),
            other => {
                return Err(Error::invalid_settings(format!(
                    "expected a table of thresholds, got {other}"
                )))
            }
        };

        Ok(Self {
            vin_threshold: lookup(table, VIN_THRESHOLD)
                .map_or(self.vin_threshold, |(name, v)| {
                    coerce_count(name, v, 1, self.vin_threshold)
                }),
            dollar_threshold: lookup(table, DOLLAR_THRESHOLD)
                .map_or(self.dollar_threshold, |(name, v)| {
                    coerce_real(name, v, self.dollar_threshold)
                }),
            days_threshold: lookup(table, DAYS_THRESHOLD).map_or(self.days_threshold, |(name, v)| {
                let days = coerce_count(name, v, 0, self.days_threshold as usize);
                u32::try_from(days).unwrap_or(self.days_threshold)
            }),
            dealer_count_threshold: lookup(table, DEALER_COUNT_THRESHOLD)
                .map_or(self.dealer_count_threshold, |(name, v)| {
                    coerce_count(name, v, 1, self.dealer_count_threshold)
                }),
            dealer_amount_multiplier: lookup(table, DEALER_AMOUNT_MULTIPLIER)
                .map_or(self.dealer_amount_multiplier, |(name, v)| {
                    coerce_real(name, v, self.dealer_amount_multiplier)
                }),
        })
    }
}

fn lookup<'a>(
    table: &'a serde_json::Map<String, Value>,
    names: [&'static str; 2],
) -> Option<(&'static str, &'a Value)> {
    names
        .iter()
        .find_map(|name| table.get(*name).map(|v| (names[0], v)))
}

fn as_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

fn coerce_count(name: &str, value: &Value, min: usize, fallback: usize) -> usize {
    match as_number(value) {
        Some(n) if n.fract() == 0.0 && n >= min as f64 && n <= u32::MAX as f64 => n as usize,
        _ => {
            tracing::warn!(setting = name, %value, fallback, "ignoring invalid threshold");
            fallback
        }
    }
}

fn coerce_real(name: &str, value: &Value, fallback: f64) -> f64 {
    match as_number(value) {
        Some(n) if n >= 0.0 => n,
        _ => {
            tracing::warn!(setting = name, %value, fallback, "ignoring invalid threshold");
            fallback
        }
    }
}
