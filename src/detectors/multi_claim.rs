//! Vehicles with an unusually high number of claims.

use super::{flagged_in_input_order, Findings};
use crate::common::group_by;
use crate::core::ClaimRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleClaims {
    pub vin: String,
    /// Description from the vehicle's first claim in input order
    pub vehicle: String,
    pub claim_count: usize,
    pub total_paid: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiClaimResult {
    pub threshold: usize,
    /// Flagged vehicles, most claims first
    pub vehicles: Vec<VehicleClaims>,
    pub flagged_records: Vec<ClaimRecord>,
}

impl Findings for MultiClaimResult {
    fn flagged_keys(&self) -> Vec<&str> {
        self.vehicles.iter().map(|v| v.vin.as_str()).collect()
    }

    fn flagged_records(&self) -> &[ClaimRecord] {
        &self.flagged_records
    }
}

/// Flag every VIN with at least `threshold` claims.
pub fn detect_multiple_claims_per_vin(records: &[ClaimRecord], threshold: usize) -> MultiClaimResult {
    let mut vehicles: Vec<VehicleClaims> = group_by(records, |r| Some(r.vin.as_str()))
        .into_iter()
        .filter(|group| group.len() >= threshold)
        .map(|group| VehicleClaims {
            vehicle: group
                .first()
                .map(|r| r.vehicle.clone())
                .unwrap_or_default(),
            claim_count: group.len(),
            total_paid: group.total_paid(),
            vin: group.key,
        })
        .collect();

    // stable: equal counts keep grouping order
    vehicles.sort_by(|a, b| b.claim_count.cmp(&a.claim_count));

    let flagged_records = flagged_in_input_order(
        records,
        |r| Some(r.vin.as_str()),
        vehicles.iter().map(|v| v.vin.as_str()),
    );

    MultiClaimResult {
        threshold,
        vehicles,
        flagged_records,
    }
}
