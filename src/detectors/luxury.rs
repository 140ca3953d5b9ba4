//! Claim totals for luxury brands.
//!
//! Informational: every allow-listed brand present in the data is
//! reported, there is no threshold.

use super::{Findings, GroupStats};
use crate::common::group_by;
use crate::core::{ClaimRecord, LUXURY_BRANDS};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LuxuryResult {
    /// One entry per luxury brand, highest total paid first
    pub brands: Vec<GroupStats>,
    /// Every claim on a luxury vehicle, in input order
    pub flagged_records: Vec<ClaimRecord>,
}

impl Findings for LuxuryResult {
    fn flagged_keys(&self) -> Vec<&str> {
        self.brands.iter().map(|b| b.key.as_str()).collect()
    }

    fn flagged_records(&self) -> &[ClaimRecord] {
        &self.flagged_records
    }
}

pub fn detect_luxury_vehicle_patterns(records: &[ClaimRecord]) -> LuxuryResult {
    let luxury: Vec<&ClaimRecord> = records
        .iter()
        .filter(|r| LUXURY_BRANDS.contains(&r.brand()))
        .collect();

    let brands = GroupStats::ranked(group_by(luxury.iter().copied(), |r| Some(r.brand())));

    LuxuryResult {
        brands,
        flagged_records: luxury.into_iter().cloned().collect(),
    }
}
