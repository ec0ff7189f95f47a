#![allow(dead_code)]

use chrono::NaiveDate;
use forecast_core::engine::{
    BalanceStatus, CommuteInput, DailyLedgerEntry, FuelType, StatusThresholds, VehicleProfile,
};

pub const REFERENCE_YEAR: i32 = 2026;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid calendar date")
}

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

pub fn compact_car(age: i32) -> VehicleProfile {
    VehicleProfile::new("Toyota", "Corolla", REFERENCE_YEAR - age, 25.0, FuelType::Gasoline)
}

/// A spread of commutes covering zero, fractional and full-week patterns.
pub fn commute_grid() -> Vec<CommuteInput> {
    let mut grid = Vec::new();
    for distance in [0.0, 3.5, 10.0, 42.0] {
        for days in [0.0, 1.0, 2.5, 5.0, 7.0] {
            grid.push(
                CommuteInput::new(distance, days, 3.89)
                    .with_parking(days > 2.0)
                    .with_tolls(distance > 20.0),
            );
        }
    }
    grid
}

/// Ninety days of balances starting 2024-01-01 with a payday every 30 days
/// and steady daily spending.
pub fn ninety_day_ledger(thresholds: &StatusThresholds) -> Vec<DailyLedgerEntry> {
    let start = date(2024, 1, 1);
    let mut balance = 800.0;
    (0..90)
        .map(|offset| {
            let day = start + chrono::Duration::days(offset);
            let opening = balance;
            balance += if offset % 30 == 14 { 1500.0 } else { -60.0 };
            DailyLedgerEntry::classified(day, opening, balance, thresholds)
        })
        .collect()
}

pub fn entry(day: NaiveDate, opening: f64, closing: f64, status: BalanceStatus) -> DailyLedgerEntry {
    DailyLedgerEntry::new(day, opening, closing, status)
}
