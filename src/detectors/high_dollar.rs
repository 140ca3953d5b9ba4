//! Individual claims paid far above the portfolio norm.
//!
//! The cutoff is `mean + multiplier * std_dev` over every paid amount in
//! the run, and a claim must be strictly above it. When every amount is
//! identical the deviation is zero and nothing is flagged.

use super::Findings;
use crate::common::{mean, std_dev};
use crate::core::ClaimRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighDollarResult {
    pub multiplier: f64,
    pub mean: f64,
    pub std_dev: f64,
    pub threshold: f64,
    /// Flagged claims, largest payment first
    pub flagged_records: Vec<ClaimRecord>,
}

impl HighDollarResult {
    pub fn flagged_total(&self) -> f64 {
        self.flagged_records.iter().map(|r| r.paid_amount).sum()
    }
}

impl Findings for HighDollarResult {
    fn flagged_keys(&self) -> Vec<&str> {
        self.flagged_records.iter().map(ClaimRecord::claim_key).collect()
    }

    fn flagged_records(&self) -> &[ClaimRecord] {
        &self.flagged_records
    }
}

pub fn detect_high_dollar_claims(records: &[ClaimRecord], multiplier: f64) -> HighDollarResult {
    let amounts: Vec<f64> = records.iter().map(|r| r.paid_amount).collect();
    let mean = mean(&amounts);
    let std_dev = std_dev(&amounts, Some(mean));
    let threshold = mean + multiplier * std_dev;

    let mut flagged_records: Vec<ClaimRecord> = records
        .iter()
        .filter(|r| r.paid_amount > threshold)
        .cloned()
        .collect();
    flagged_records.sort_by(|a, b| b.paid_amount.total_cmp(&a.paid_amount));

    HighDollarResult {
        multiplier,
        mean,
        std_dev,
        threshold,
        flagged_records,
    }
}
