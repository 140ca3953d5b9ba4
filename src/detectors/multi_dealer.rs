//! Vehicles whose claims were paid through more than one selling dealer.

use super::{flagged_in_input_order, Findings};
use crate::common::group_by;
use crate::core::ClaimRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleDealers {
    pub vin: String,
    pub vehicle: String,
    /// Distinct selling dealers in order of first appearance
    pub dealers: Vec<String>,
    pub dealer_count: usize,
    pub claim_count: usize,
    pub total_paid: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiDealerResult {
    /// Flagged vehicles, most distinct dealers first
    pub vehicles: Vec<VehicleDealers>,
    pub flagged_records: Vec<ClaimRecord>,
}

impl Findings for MultiDealerResult {
    fn flagged_keys(&self) -> Vec<&str> {
        self.vehicles.iter().map(|v| v.vin.as_str()).collect()
    }

    fn flagged_records(&self) -> &[ClaimRecord] {
        &self.flagged_records
    }
}

pub fn detect_multiple_dealers_per_vin(records: &[ClaimRecord]) -> MultiDealerResult {
    let mut vehicles: Vec<VehicleDealers> = group_by(records, |r| Some(r.vin.as_str()))
        .into_iter()
        .filter_map(|group| {
            let dealers: Vec<String> = group_by(group.records.iter().copied(), |r| {
                Some(r.selling_dealer.as_str())
            })
            .into_iter()
            .map(|dealers| dealers.key)
            .collect();

            (dealers.len() > 1).then(|| VehicleDealers {
                vehicle: group
                    .first()
                    .map(|r| r.vehicle.clone())
                    .unwrap_or_default(),
                dealer_count: dealers.len(),
                claim_count: group.len(),
                total_paid: group.total_paid(),
                vin: group.key.clone(),
                dealers,
            })
        })
        .collect();

    vehicles.sort_by(|a, b| b.dealer_count.cmp(&a.dealer_count));

    let flagged_records = flagged_in_input_order(
        records,
        |r| Some(r.vin.as_str()),
        vehicles.iter().map(|v| v.vin.as_str()),
    );

    MultiDealerResult {
        vehicles,
        flagged_records,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NOT_SPECIFIED;

    fn claim(vin: &str, dealer: &str, paid: f64) -> ClaimRecord {
        ClaimRecord {
            selling_dealer: dealer.to_string(),
            ..ClaimRecord::new(vin, paid)
        }
    }

    #[test]
    fn test_flags_vin_with_two_dealers() {
        let records = vec![
            claim("V1", "North Auto", 100.0),
            claim("V1", "South Auto", 250.0),
            claim("V1", "North Auto", 50.0),
            claim("V2", "North Auto", 75.0),
            claim("V2", "North Auto", 75.0),
        ];
        let result = detect_multiple_dealers_per_vin(&records);

        assert_eq!(result.vehicles.len(), 1);
        let v1 = &result.vehicles[0];
        assert_eq!(v1.dealers, vec!["North Auto", "South Auto"]);
        assert_eq!(v1.dealer_count, 2);
        assert_eq!(v1.claim_count, 3);
        assert_eq!(v1.total_paid, 400.0);
        assert_eq!(result.flagged_records.len(), 3);
    }

    #[test]
    fn test_sorted_by_dealer_count() {
        let records = vec![
            claim("A", "D1", 1.0),
            claim("A", "D2", 1.0),
            claim("B", "D1", 1.0),
            claim("B", "D2", 1.0),
            claim("B", "D3", 1.0),
        ];
        let result = detect_multiple_dealers_per_vin(&records);
        assert_eq!(result.flagged_keys(), vec!["B", "A"]);
    }

    #[test]
    fn test_unspecified_dealer_counts_as_distinct_value() {
        let records = vec![claim("A", "D1", 1.0), claim("A", NOT_SPECIFIED, 1.0)];
        let result = detect_multiple_dealers_per_vin(&records);
        assert_eq!(result.vehicles[0].dealers, vec!["D1", NOT_SPECIFIED]);
    }

    #[test]
    fn test_single_claim_vehicle_never_flagged() {
        let result = detect_multiple_dealers_per_vin(&[claim("A", "D1", 1.0)]);
        assert!(result.vehicles.is_empty());
    }
}
