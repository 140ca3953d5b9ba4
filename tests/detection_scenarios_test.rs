//! End-to-end detection scenarios over small hand-built portfolios.

mod common;

use claimguard::{
    detect, detect_value, AnalyzerKind, DetectionEngine, DetectionSettings, Error, Findings,
    NOT_IDENTIFIED,
};
use common::{claim, dated_claim, dealer_claim, vehicle_claim};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_three_claims_on_one_vin_are_flagged() {
    let records = vec![claim("V1", 100.0), claim("V1", 200.0), claim("V1", 300.0)];
    let settings = DetectionSettings {
        vin_threshold: 2,
        ..Default::default()
    };

    let report = detect(&records, &settings);
    let vehicles = &report.multi_claim.vehicles;
    assert_eq!(vehicles.len(), 1);
    assert_eq!(vehicles[0].vin, "V1");
    assert_eq!(vehicles[0].claim_count, 3);
    assert_eq!(vehicles[0].total_paid, 600.0);
}

#[test]
fn test_high_dollar_boundary_is_strict() {
    let records: Vec<_> = [100.0, 100.0, 100.0, 100.0, 1000.0]
        .iter()
        .enumerate()
        .map(|(i, paid)| claim(&format!("V{i}"), *paid))
        .collect();

    let report = detect(&records, &DetectionSettings::default());
    assert_eq!(report.high_dollar.mean, 280.0);
    assert_eq!(report.high_dollar.std_dev, 360.0);
    assert_eq!(report.high_dollar.threshold, 1000.0);
    assert!(report.high_dollar.flagged_records.is_empty());
}

#[test]
fn test_repeat_claims_depend_on_window() {
    let records = vec![
        dated_claim("V1", "2024-05-01", 100.0),
        dated_claim("V1", "2024-05-11", 100.0),
    ];

    let wide = detect(
        &records,
        &DetectionSettings {
            days_threshold: 30,
            ..Default::default()
        },
    );
    assert_eq!(wide.rapid_repeat.vehicles.len(), 1);
    assert_eq!(wide.rapid_repeat.vehicles[0].min_days_between, 10);

    let narrow = detect(
        &records,
        &DetectionSettings {
            days_threshold: 5,
            ..Default::default()
        },
    );
    assert!(narrow.rapid_repeat.vehicles.is_empty());
}

#[test]
fn test_dealer_flagged_on_amount_alone() {
    let mut records: Vec<_> = (0..9)
        .map(|i| dealer_claim(&format!("V{i}"), &format!("Small {i}"), 0.0))
        .collect();
    records.push(dealer_claim("V9", "Premier", 10_000.0));

    let settings = DetectionSettings {
        dealer_count_threshold: 3,
        dealer_amount_multiplier: 1.5,
        ..Default::default()
    };
    let report = detect(&records, &settings);

    assert_eq!(report.dealer_risk.portfolio_mean, 1000.0);
    assert_eq!(report.dealer_risk.amount_threshold, 1500.0);
    assert_eq!(report.dealer_risk.flagged_keys(), vec!["Premier"]);
    let premier = &report.dealer_risk.dealers[0];
    assert!(!premier.exceeds_count);
    assert!(premier.exceeds_amount);
}

#[test]
fn test_brand_derivation_and_luxury_exclusion() {
    let bmw = vehicle_claim("V1", "2023 BMW X5", 500.0);
    let unknown = vehicle_claim("V2", "Unknown", 700.0);
    assert_eq!(bmw.brand(), "BMW");
    assert_eq!(unknown.brand(), NOT_IDENTIFIED);

    let report = detect(&[bmw, unknown], &DetectionSettings::default());
    assert_eq!(report.luxury.flagged_keys(), vec!["BMW"]);
    assert_eq!(report.luxury.flagged_records.len(), 1);
    assert_eq!(report.luxury.brands[0].total_paid, 500.0);
}

#[test]
fn test_empty_input_produces_empty_report() {
    let report = detect(&[], &DetectionSettings::default());

    assert_eq!(report.summary.total_claims, 0);
    assert_eq!(report.summary.total_paid, 0.0);
    assert_eq!(report.summary.average_paid, 0.0);
    assert_eq!(report.summary.total_risk_signals, 0);
    assert_eq!(report.high_dollar.mean, 0.0);
    assert_eq!(report.high_dollar.std_dev, 0.0);
    for kind in AnalyzerKind::ALL {
        assert_eq!(report.findings(kind).flagged_units(), 0, "{kind}");
        assert!(report.findings(kind).flagged_records().is_empty(), "{kind}");
    }
    assert_eq!(report.summary.patterns.len(), 7);
}

#[test]
fn test_total_risk_signals_adds_every_detector() {
    let records = vec![
        ClaimBuilder::new("V1", 100.0).dealer("North").date("2024-01-01").vehicle("2022 AUDI A4"),
        ClaimBuilder::new("V1", 100.0).dealer("South").date("2024-01-05").vehicle("2022 AUDI A4"),
        ClaimBuilder::new("V2", 100.0).dealer("North").vehicle("2020 FORD FOCUS"),
    ];
    let records: Vec<_> = records.into_iter().map(ClaimBuilder::build).collect();
    let report = detect(&records, &DetectionSettings::default());

    let expected: usize = AnalyzerKind::ALL
        .iter()
        .map(|kind| report.findings(*kind).flagged_units())
        .sum();
    assert_eq!(report.summary.total_risk_signals, expected);
    // multi-claim, multi-dealer, rapid-repeat, one luxury brand, one coverage group
    assert_eq!(report.summary.total_risk_signals, 5);
}

#[test]
fn test_parallel_matches_sequential() {
    let records: Vec<_> = (0..40)
        .map(|i| {
            let mut record = dealer_claim(&format!("V{}", i % 7), &format!("D{}", i % 4), i as f64 * 37.5);
            record.vehicle = if i % 3 == 0 { "2021 PORSCHE 911" } else { "2019 HONDA CIVIC" }.into();
            record
        })
        .collect();
    let settings = DetectionSettings::default();

    let sequential = DetectionEngine::new(settings).run(&records);
    let parallel = DetectionEngine::new(settings).with_parallel(true).run(&records);
    assert_eq!(sequential, parallel);
}

#[test]
fn test_detect_value_normalizes_loose_rows() {
    let rows = json!([
        {"VIN": "V1", "Paid Amount": "$1,000.50", "RO Date": "2024-01-01", "Selling Dealer": " North "},
        {"VIN": "V1", "Paid Amount": -20, "RO Date": 45300, "Extra": true},
        {"Paid Amount": "n/a"}
    ]);
    let report = detect_value(&rows, &json!({"vinThreshold": "2", "daysThreshold": "soon"})).unwrap();

    assert_eq!(report.settings.vin_threshold, 2);
    assert_eq!(report.settings.days_threshold, 30);
    assert_eq!(report.summary.total_claims, 3);
    assert_eq!(report.summary.total_paid, 1000.5);
    assert_eq!(report.summary.unique_vins, 1);
    assert_eq!(report.multi_claim.vehicles[0].claim_count, 2);
}

#[test]
fn test_detect_value_rejects_wrong_shapes() {
    let err = detect_value(&json!({"VIN": "V1"}), &json!(null)).unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));

    let err = detect_value(&json!([{"VIN": "V1"}, "oops"]), &json!({})).unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));

    let err = detect_value(&json!([]), &json!([1, 2])).unwrap_err();
    assert!(matches!(err, Error::InvalidSettings(_)));
}

struct ClaimBuilder(claimguard::ClaimRecord);

impl ClaimBuilder {
    fn new(vin: &str, paid: f64) -> Self {
        Self(claim(vin, paid))
    }

    fn dealer(mut self, dealer: &str) -> Self {
        self.0.selling_dealer = dealer.into();
        self
    }

    fn date(mut self, date: &str) -> Self {
        self.0.ro_date = chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").ok();
        self
    }

    fn vehicle(mut self, vehicle: &str) -> Self {
        self.0.vehicle = vehicle.into();
        self
    }

    fn build(self) -> claimguard::ClaimRecord {
        self.0
    }
}
