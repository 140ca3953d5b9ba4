//! Selling dealers with high claim volume or high average payouts.
//!
//! A dealer is flagged when its claim count reaches the count threshold
//! OR its average paid amount reaches `portfolio mean * multiplier`.
//! Either condition alone is enough.

use super::{flagged_in_input_order, Findings};
use crate::common::{group_by, mean};
use crate::core::ClaimRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealerStats {
    pub dealer: String,
    pub claim_count: usize,
    pub total_paid: f64,
    pub avg_paid: f64,
    pub exceeds_count: bool,
    pub exceeds_amount: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealerRiskResult {
    pub count_threshold: usize,
    pub amount_multiplier: f64,
    /// Portfolio-wide mean paid amount
    pub portfolio_mean: f64,
    /// `portfolio_mean * amount_multiplier`
    pub amount_threshold: f64,
    /// Flagged dealers, highest total paid first
    pub dealers: Vec<DealerStats>,
    pub flagged_records: Vec<ClaimRecord>,
}

impl Findings for DealerRiskResult {
    fn flagged_keys(&self) -> Vec<&str> {
        self.dealers.iter().map(|d| d.dealer.as_str()).collect()
    }

    fn flagged_records(&self) -> &[ClaimRecord] {
        &self.flagged_records
    }
}

pub fn detect_high_risk_dealers(
    records: &[ClaimRecord],
    count_threshold: usize,
    amount_multiplier: f64,
) -> DealerRiskResult {
    let amounts: Vec<f64> = records.iter().map(|r| r.paid_amount).collect();
    let portfolio_mean = mean(&amounts);
    let amount_threshold = portfolio_mean * amount_multiplier;

    let mut dealers: Vec<DealerStats> = group_by(records, |r| Some(r.selling_dealer.as_str()))
        .into_iter()
        .map(|group| {
            let avg_paid = mean(&group.paid_amounts());
            DealerStats {
                claim_count: group.len(),
                total_paid: group.total_paid(),
                avg_paid,
                exceeds_count: group.len() >= count_threshold,
                exceeds_amount: avg_paid >= amount_threshold,
                dealer: group.key,
            }
        })
        .filter(|stats| stats.exceeds_count || stats.exceeds_amount)
        .collect();

    dealers.sort_by(|a, b| b.total_paid.total_cmp(&a.total_paid));

    let flagged_records = flagged_in_input_order(
        records,
        |r| Some(r.selling_dealer.as_str()),
        dealers.iter().map(|d| d.dealer.as_str()),
    );

    DealerRiskResult {
        count_threshold,
        amount_multiplier,
        portfolio_mean,
        amount_threshold,
        dealers,
        flagged_records,
    }
}
