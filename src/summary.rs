//! Run-level totals and the headline risk-signal count.
//!
//! The headline total adds up flagged units of different kinds (vehicles,
//! claims, dealers, brands and coverage types). It points attention at a
//! run; it is not a count of distinct claims at risk.

use crate::common::{max, mean};
use crate::core::ClaimRecord;
use crate::detectors::{AnalyzerKind, Findings};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One detector's line in the summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternSummary {
    pub analyzer: AnalyzerKind,
    pub label: String,
    /// What a flagged unit is: vehicles, claims, dealers, brands or coverage types
    pub unit: String,
    pub flagged_units: usize,
    /// Claims behind the flagged units
    pub claims_flagged: usize,
    pub flagged_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_claims: usize,
    pub total_paid: f64,
    pub average_paid: f64,
    pub max_paid: f64,
    /// Distinct non-empty VINs
    pub unique_vins: usize,
    /// Distinct selling dealers, the unspecified sentinel included
    pub unique_dealers: usize,
    pub patterns: Vec<PatternSummary>,
    pub total_risk_signals: usize,
}

impl Summary {
    pub fn pattern(&self, kind: AnalyzerKind) -> Option<&PatternSummary> {
        self.patterns.iter().find(|p| p.analyzer == kind)
    }
}

pub fn summarize(records: &[ClaimRecord], results: &[(AnalyzerKind, &dyn Findings)]) -> Summary {
    let amounts: Vec<f64> = records.iter().map(|r| r.paid_amount).collect();

    let unique_vins = records
        .iter()
        .map(|r| r.vin.trim())
        .filter(|vin| !vin.is_empty())
        .collect::<HashSet<_>>()
        .len();
    let unique_dealers = records
        .iter()
        .map(|r| r.selling_dealer.as_str())
        .collect::<HashSet<_>>()
        .len();

    let patterns: Vec<PatternSummary> = results
        .iter()
        .map(|(kind, findings)| {
            let flagged = findings.flagged_records();
            PatternSummary {
                analyzer: *kind,
                label: kind.label().to_string(),
                unit: kind.unit().to_string(),
                flagged_units: findings.flagged_units(),
                claims_flagged: flagged.len(),
                flagged_amount: flagged.iter().map(|r| r.paid_amount).sum(),
            }
        })
        .collect();

    Summary {
        total_claims: records.len(),
        total_paid: amounts.iter().sum(),
        average_paid: mean(&amounts),
        max_paid: max(&amounts),
        unique_vins,
        unique_dealers,
        total_risk_signals: patterns.iter().map(|p| p.flagged_units).sum(),
        patterns,
    }
}
