//! Shared fixtures for integration tests.
#![allow(dead_code)]

use chrono::NaiveDate;
use claimguard::ClaimRecord;

pub fn claim(vin: &str, paid: f64) -> ClaimRecord {
    ClaimRecord::new(vin, paid)
}

pub fn dealer_claim(vin: &str, dealer: &str, paid: f64) -> ClaimRecord {
    ClaimRecord {
        selling_dealer: dealer.to_string(),
        ..ClaimRecord::new(vin, paid)
    }
}

pub fn dated_claim(vin: &str, date: &str, paid: f64) -> ClaimRecord {
    ClaimRecord {
        ro_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").ok(),
        ..ClaimRecord::new(vin, paid)
    }
}

pub fn vehicle_claim(vin: &str, vehicle: &str, paid: f64) -> ClaimRecord {
    ClaimRecord {
        vehicle: vehicle.to_string(),
        ..ClaimRecord::new(vin, paid)
    }
}

/// A small mixed portfolio used by CLI and export tests.
pub const SAMPLE_CSV: &str = "\
Claim #,Contract Number,VIN,Vehicle,RO Date,Entry Date,Default Servicer,Paid Amount,Selling Dealer,Coverage,Status
C-1,K-100,VIN001,2023 BMW X5,2024-01-02,2024-01-03,Acme Service,$120.00,North Motors,Powertrain,Paid
C-2,K-100,VIN001,2023 BMW X5,2024-01-12,2024-01-13,Acme Service,$80.00,South Motors,Powertrain,Paid
C-3,K-101,VIN002,2021 FORD F150,03/01/2024,03/02/2024,Acme Service,\"1,500.00\",North Motors,Exclusionary,Paid
C-4,K-102,VIN003,2022 TESLA MODEL3,2024-02-10,2024-02-11,Beta Service,200,East Auto,Powertrain,Open
C-5,K-103,VIN004,2020 PORSCHE 911,2024-04-01,2024-04-02,Beta Service,150,North Motors,Stated Component,Paid
,,,,,,,,,,
";
