//! Rule-based pattern detectors and the engine that runs them.
//!
//! Each detector is a pure function from normalized records (plus its
//! thresholds) to an immutable result. The detectors share nothing but the
//! read-only record slice, so [`DetectionEngine`] can run them one after
//! another or concurrently on the rayon pool with identical results.
//!
//! ```
//! use claimguard::{ClaimRecord, DetectionEngine, DetectionSettings};
//!
//! let records = vec![
//!     ClaimRecord::new("V1", 100.0),
//!     ClaimRecord::new("V1", 200.0),
//!     ClaimRecord::new("V1", 300.0),
//! ];
//! let report = DetectionEngine::new(DetectionSettings::default()).run(&records);
//!
//! assert_eq!(report.multi_claim.vehicles[0].claim_count, 3);
//! assert_eq!(report.summary.total_claims, 3);
//! ```

pub mod coverage;
pub mod dealer_risk;
pub mod high_dollar;
pub mod luxury;
pub mod multi_claim;
pub mod multi_dealer;
pub mod rapid_repeat;

pub use coverage::{detect_coverage_type_patterns, CoverageResult};
pub use dealer_risk::{detect_high_risk_dealers, DealerRiskResult, DealerStats};
pub use high_dollar::{detect_high_dollar_claims, HighDollarResult};
pub use luxury::{detect_luxury_vehicle_patterns, LuxuryResult};
pub use multi_claim::{detect_multiple_claims_per_vin, MultiClaimResult, VehicleClaims};
pub use multi_dealer::{detect_multiple_dealers_per_vin, MultiDealerResult, VehicleDealers};
pub use rapid_repeat::{detect_rapid_repeat_claims, RapidRepeat, RapidRepeatResult};

use crate::common::{group_key, max, mean, Group};
use crate::config::DetectionSettings;
use crate::core::{normalize_rows, normalize_value, ClaimRecord, RawRow};
use crate::errors::Result;
use crate::summary::{summarize, Summary};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// What every detector result exposes to the summary and exporters.
pub trait Findings {
    /// Keys of the flagged units: VINs, dealers, brands, coverage types,
    /// or claim numbers for record-level detectors.
    fn flagged_keys(&self) -> Vec<&str>;

    /// Records behind the flagged units.
    fn flagged_records(&self) -> &[ClaimRecord];

    fn flagged_units(&self) -> usize {
        self.flagged_keys().len()
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum AnalyzerKind {
    /// Vehicles with many claims
    MultiClaim,
    /// Claims far above the portfolio mean
    HighDollar,
    /// Vehicles claimed through several selling dealers
    MultiDealer,
    /// Repeat claims on a vehicle within a short window
    RapidRepeat,
    /// Dealers with high claim volume or payouts
    DealerRisk,
    /// Claim totals for luxury brands
    Luxury,
    /// Claim totals per coverage type
    Coverage,
}

impl AnalyzerKind {
    pub const ALL: [AnalyzerKind; 7] = [
        AnalyzerKind::MultiClaim,
        AnalyzerKind::HighDollar,
        AnalyzerKind::MultiDealer,
        AnalyzerKind::RapidRepeat,
        AnalyzerKind::DealerRisk,
        AnalyzerKind::Luxury,
        AnalyzerKind::Coverage,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AnalyzerKind::MultiClaim => "Multiple Claims per VIN",
            AnalyzerKind::HighDollar => "High Dollar Claims",
            AnalyzerKind::MultiDealer => "Multiple Dealers per VIN",
            AnalyzerKind::RapidRepeat => "Repeated Claims in Timeframe",
            AnalyzerKind::DealerRisk => "High Risk Dealers",
            AnalyzerKind::Luxury => "Luxury Vehicle Patterns",
            AnalyzerKind::Coverage => "Coverage Type Patterns",
        }
    }

    /// What one flagged unit is for this detector.
    pub fn unit(self) -> &'static str {
        match self {
            AnalyzerKind::MultiClaim | AnalyzerKind::MultiDealer | AnalyzerKind::RapidRepeat => {
                "vehicles"
            }
            AnalyzerKind::HighDollar => "claims",
            AnalyzerKind::DealerRisk => "dealers",
            AnalyzerKind::Luxury => "brands",
            AnalyzerKind::Coverage => "coverage types",
        }
    }

    /// Stable identifier used in file names and logs.
    pub fn slug(self) -> &'static str {
        match self {
            AnalyzerKind::MultiClaim => "multiple_claims_per_vin",
            AnalyzerKind::HighDollar => "high_dollar_claims",
            AnalyzerKind::MultiDealer => "multiple_dealers_per_vin",
            AnalyzerKind::RapidRepeat => "repeated_claims_timeframe",
            AnalyzerKind::DealerRisk => "high_risk_dealers",
            AnalyzerKind::Luxury => "luxury_vehicle_patterns",
            AnalyzerKind::Coverage => "coverage_type_patterns",
        }
    }
}

impl std::fmt::Display for AnalyzerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Count, total, average and maximum paid for one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupStats {
    pub key: String,
    pub claim_count: usize,
    pub total_paid: f64,
    pub avg_paid: f64,
    pub max_paid: f64,
}

impl GroupStats {
    pub fn from_group(group: Group<'_>) -> Self {
        let amounts = group.paid_amounts();
        Self {
            claim_count: group.len(),
            total_paid: group.total_paid(),
            avg_paid: mean(&amounts),
            max_paid: max(&amounts),
            key: group.key,
        }
    }

    /// Stats for every group, highest total paid first.
    pub fn ranked(groups: Vec<Group<'_>>) -> Vec<Self> {
        let mut stats: Vec<Self> = groups.into_iter().map(Self::from_group).collect();
        stats.sort_by(|a, b| b.total_paid.total_cmp(&a.total_paid));
        stats
    }
}

/// Records whose grouping key is one of `keys`, cloned in input order.
pub(crate) fn flagged_in_input_order<'a, 'k, F, K>(
    records: &'a [ClaimRecord],
    selector: F,
    keys: K,
) -> Vec<ClaimRecord>
where
    F: Fn(&'a ClaimRecord) -> Option<&'a str>,
    K: IntoIterator<Item = &'k str>,
{
    let keys: HashSet<&str> = keys.into_iter().collect();
    if keys.is_empty() {
        return Vec::new();
    }
    records
        .iter()
        .filter(|r| keys.contains(group_key(selector(*r))))
        .cloned()
        .collect()
}

/// Everything one detection run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionReport {
    pub settings: DetectionSettings,
    pub multi_claim: MultiClaimResult,
    pub high_dollar: HighDollarResult,
    pub multi_dealer: MultiDealerResult,
    pub rapid_repeat: RapidRepeatResult,
    pub dealer_risk: DealerRiskResult,
    pub luxury: LuxuryResult,
    pub coverage: CoverageResult,
    pub summary: Summary,
}

impl DetectionReport {
    pub fn findings(&self, kind: AnalyzerKind) -> &dyn Findings {
        match kind {
            AnalyzerKind::MultiClaim => &self.multi_claim,
            AnalyzerKind::HighDollar => &self.high_dollar,
            AnalyzerKind::MultiDealer => &self.multi_dealer,
            AnalyzerKind::RapidRepeat => &self.rapid_repeat,
            AnalyzerKind::DealerRisk => &self.dealer_risk,
            AnalyzerKind::Luxury => &self.luxury,
            AnalyzerKind::Coverage => &self.coverage,
        }
    }
}

/// Runs all seven detectors and the summary over one record set.
#[derive(Debug, Clone, Default)]
pub struct DetectionEngine {
    settings: DetectionSettings,
    parallel: bool,
}

impl DetectionEngine {
    pub fn new(settings: DetectionSettings) -> Self {
        Self {
            settings,
            parallel: false,
        }
    }

    /// Run the detectors on the rayon pool.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn settings(&self) -> &DetectionSettings {
        &self.settings
    }

    /// Normalize raw rows, then run.
    pub fn run_rows(&self, rows: &[RawRow]) -> DetectionReport {
        self.run(&normalize_rows(rows))
    }

    pub fn run(&self, records: &[ClaimRecord]) -> DetectionReport {
        let _span = tracing::info_span!("detection", records = records.len()).entered();
        let s = self.settings;

        let multi_claim = || {
            observe(AnalyzerKind::MultiClaim, || {
                detect_multiple_claims_per_vin(records, s.vin_threshold)
            })
        };
        let high_dollar = || {
            observe(AnalyzerKind::HighDollar, || {
                detect_high_dollar_claims(records, s.dollar_threshold)
            })
        };
        let multi_dealer = || {
            observe(AnalyzerKind::MultiDealer, || {
                detect_multiple_dealers_per_vin(records)
            })
        };
        let rapid_repeat = || {
            observe(AnalyzerKind::RapidRepeat, || {
                detect_rapid_repeat_claims(records, s.days_threshold)
            })
        };
        let dealer_risk = || {
            observe(AnalyzerKind::DealerRisk, || {
                detect_high_risk_dealers(
                    records,
                    s.dealer_count_threshold,
                    s.dealer_amount_multiplier,
                )
            })
        };
        let luxury = || {
            observe(AnalyzerKind::Luxury, || {
                detect_luxury_vehicle_patterns(records)
            })
        };
        let coverage = || {
            observe(AnalyzerKind::Coverage, || {
                detect_coverage_type_patterns(records)
            })
        };

        let ((multi_claim, high_dollar), ((multi_dealer, rapid_repeat), ((dealer_risk, luxury), coverage))) =
            if self.parallel {
                rayon::join(
                    || rayon::join(multi_claim, high_dollar),
                    || {
                        rayon::join(
                            || rayon::join(multi_dealer, rapid_repeat),
                            || rayon::join(|| rayon::join(dealer_risk, luxury), coverage),
                        )
                    },
                )
            } else {
                (
                    (multi_claim(), high_dollar()),
                    ((multi_dealer(), rapid_repeat()), ((dealer_risk(), luxury()), coverage())),
                )
            };

        let findings: [(AnalyzerKind, &dyn Findings); 7] = [
            (AnalyzerKind::MultiClaim, &multi_claim),
            (AnalyzerKind::HighDollar, &high_dollar),
            (AnalyzerKind::MultiDealer, &multi_dealer),
            (AnalyzerKind::RapidRepeat, &rapid_repeat),
            (AnalyzerKind::DealerRisk, &dealer_risk),
            (AnalyzerKind::Luxury, &luxury),
            (AnalyzerKind::Coverage, &coverage),
        ];
        let summary = summarize(records, &findings);
        tracing::info!(
            total_risk_signals = summary.total_risk_signals,
            "detection complete"
        );

        DetectionReport {
            settings: s,
            multi_claim,
            high_dollar,
            multi_dealer,
            rapid_repeat,
            dealer_risk,
            luxury,
            coverage,
            summary,
        }
    }
}

fn observe<R: Findings>(kind: AnalyzerKind, analyze: impl FnOnce() -> R) -> R {
    let _span = tracing::debug_span!("analyzer", name = kind.slug()).entered();
    let result = analyze();
    tracing::debug!(
        flagged = result.flagged_units(),
        records = result.flagged_records().len(),
        "{} finished",
        kind.label()
    );
    result
}

/// Run a detection over records with explicit settings.
pub fn detect(records: &[ClaimRecord], settings: &DetectionSettings) -> DetectionReport {
    DetectionEngine::new(*settings).run(records)
}

/// Run a detection over loosely-typed input: `rows` must be an array of
/// objects and `settings` a table (or null for defaults). Shape errors are
/// reported before any analysis runs.
pub fn detect_value(
    rows: &serde_json::Value,
    settings: &serde_json::Value,
) -> Result<DetectionReport> {
    let settings = DetectionSettings::from_value(settings)?;
    let records = normalize_value(rows)?;
    Ok(detect(&records, &settings))
}
