//! Repeat claims on the same vehicle within a short window.
//!
//! Only vehicles with more than one claim are considered. Claims without a
//! repair-order date still count toward the claim count and total paid,
//! but take no part in the gap computation; a vehicle with fewer than two
//! dated claims is never flagged.

use super::{flagged_in_input_order, Findings};
use crate::common::{group_by, Group};
use crate::core::ClaimRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RapidRepeat {
    pub vin: String,
    pub vehicle: String,
    pub claim_count: usize,
    /// Smallest gap in days between date-adjacent claims
    pub min_days_between: i64,
    pub total_paid: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RapidRepeatResult {
    pub days_threshold: u32,
    /// Flagged vehicles, shortest gap first
    pub vehicles: Vec<RapidRepeat>,
    pub flagged_records: Vec<ClaimRecord>,
}

impl Findings for RapidRepeatResult {
    fn flagged_keys(&self) -> Vec<&str> {
        self.vehicles.iter().map(|v| v.vin.as_str()).collect()
    }

    fn flagged_records(&self) -> &[ClaimRecord] {
        &self.flagged_records
    }
}

/// Smallest day gap between consecutive dates once sorted, or `None` when
/// fewer than two dates are present.
pub fn min_day_gap(dates: impl IntoIterator<Item = NaiveDate>) -> Option<i64> {
    let mut dates: Vec<NaiveDate> = dates.into_iter().collect();
    dates.sort();
    dates
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).num_days().abs())
        .min()
}

fn group_min_gap(group: &Group<'_>) -> Option<i64> {
    min_day_gap(group.records.iter().filter_map(|r| r.ro_date))
}

pub fn detect_rapid_repeat_claims(records: &[ClaimRecord], days_threshold: u32) -> RapidRepeatResult {
    let window = i64::from(days_threshold);

    let mut vehicles: Vec<RapidRepeat> = group_by(records, |r| Some(r.vin.as_str()))
        .into_iter()
        .filter(|group| group.len() > 1)
        .filter_map(|group| {
            let gap = group_min_gap(&group).filter(|gap| *gap <= window)?;
            Some(RapidRepeat {
                vehicle: group
                    .first()
                    .map(|r| r.vehicle.clone())
                    .unwrap_or_default(),
                claim_count: group.len(),
                min_days_between: gap,
                total_paid: group.total_paid(),
                vin: group.key,
            })
        })
        .collect();

    vehicles.sort_by_key(|v| v.min_days_between);

    let flagged_records = flagged_in_input_order(
        records,
        |r| Some(r.vin.as_str()),
        vehicles.iter().map(|v| v.vin.as_str()),
    );

    RapidRepeatResult {
        days_threshold,
        vehicles,
        flagged_records,
    }
}
