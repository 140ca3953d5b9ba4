//! Claim totals per coverage type. Purely descriptive.

use super::{Findings, GroupStats};
use crate::common::group_by;
use crate::core::ClaimRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageResult {
    /// One entry per coverage type, highest total paid first
    pub coverage_types: Vec<GroupStats>,
    /// Every record; all coverage types are reported
    pub flagged_records: Vec<ClaimRecord>,
}

impl Findings for CoverageResult {
    fn flagged_keys(&self) -> Vec<&str> {
        self.coverage_types.iter().map(|c| c.key.as_str()).collect()
    }

    fn flagged_records(&self) -> &[ClaimRecord] {
        &self.flagged_records
    }
}

pub fn detect_coverage_type_patterns(records: &[ClaimRecord]) -> CoverageResult {
    CoverageResult {
        coverage_types: GroupStats::ranked(group_by(records, |r| r.coverage.as_deref())),
        flagged_records: records.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NOT_SPECIFIED;

    fn claim(coverage: Option<&str>, paid: f64) -> ClaimRecord {
        ClaimRecord {
            coverage: coverage.map(str::to_string),
            ..ClaimRecord::new("V", paid)
        }
    }

    #[test]
    fn test_stats_per_coverage_type() {
        let records = vec![
            claim(Some("Powertrain"), 500.0),
            claim(Some("Electrical"), 200.0),
            claim(Some("Powertrain"), 1500.0),
            claim(None, 50.0),
        ];
        let result = detect_coverage_type_patterns(&records);

        assert_eq!(
            result.flagged_keys(),
            vec!["Powertrain", "Electrical", NOT_SPECIFIED]
        );
        let powertrain = &result.coverage_types[0];
        assert_eq!(powertrain.claim_count, 2);
        assert_eq!(powertrain.total_paid, 2000.0);
        assert_eq!(powertrain.avg_paid, 1000.0);
        assert_eq!(powertrain.max_paid, 1500.0);
        assert_eq!(result.flagged_records.len(), 4);
    }

    #[test]
    fn test_empty_input() {
        let result = detect_coverage_type_patterns(&[]);
        assert!(result.coverage_types.is_empty());
        assert_eq!(result.flagged_units(), 0);
    }
}
