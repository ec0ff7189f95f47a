//! Rate constants consumed by the commute cost model.
//!
//! Everything here is plain data. Callers may load overrides through
//! [`crate::config::ConfigManager`] or build a [`RateConfig`] by hand.

use serde::{Deserialize, Serialize};

pub const WEEKS_PER_MONTH: f64 = 4.33;
pub const WEEKS_PER_YEAR: f64 = 52.0;

/// Per-distance-unit rate picked by vehicle age in whole years.
///
/// `age <= newer_max_age` uses `newer`, `age <= mid_max_age` uses `mid`,
/// anything older uses `older`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AgeRateSchedule {
    pub newer_max_age: i32,
    pub mid_max_age: i32,
    pub newer: f64,
    pub mid: f64,
    pub older: f64,
}

impl AgeRateSchedule {
    pub fn rate_for_age(&self, age: i32) -> f64 {
        if age > self.mid_max_age {
            self.older
        } else if age > self.newer_max_age {
            self.mid
        } else {
            self.newer
        }
    }

    /// Wear-driven maintenance: older vehicles cost more per distance unit.
    pub fn maintenance() -> Self {
        Self {
            newer_max_age: 5,
            mid_max_age: 10,
            newer: 0.08,
            mid: 0.10,
            older: 0.15,
        }
    }

    /// Depreciation runs the other way: newer vehicles lose value faster.
    pub fn depreciation() -> Self {
        Self {
            newer_max_age: 5,
            mid_max_age: 10,
            newer: 0.12,
            mid: 0.08,
            older: 0.05,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RateConfig {
    pub maintenance: AgeRateSchedule,
    pub depreciation: AgeRateSchedule,
    /// Flat premium prorated as `premium / 12 * days_per_week / 7`.
    pub insurance_premium: f64,
    pub parking_daily_rate: f64,
    pub toll_rate_per_distance_unit: f64,
    pub weeks_per_month: f64,
    pub weeks_per_year: f64,
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            maintenance: AgeRateSchedule::maintenance(),
            depreciation: AgeRateSchedule::depreciation(),
            insurance_premium: 1200.0,
            parking_daily_rate: 15.0,
            toll_rate_per_distance_unit: 0.10,
            weeks_per_month: WEEKS_PER_MONTH,
            weeks_per_year: WEEKS_PER_YEAR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maintenance_tiers_split_at_five_and_ten_years() {
        let schedule = AgeRateSchedule::maintenance();
        assert_eq!(schedule.rate_for_age(0), 0.08);
        assert_eq!(schedule.rate_for_age(5), 0.08);
        assert_eq!(schedule.rate_for_age(6), 0.10);
        assert_eq!(schedule.rate_for_age(10), 0.10);
        assert_eq!(schedule.rate_for_age(11), 0.15);
    }

    #[test]
    fn depreciation_curve_is_inverse_of_maintenance() {
        let schedule = AgeRateSchedule::depreciation();
        assert_eq!(schedule.rate_for_age(2), 0.12);
        assert_eq!(schedule.rate_for_age(8), 0.08);
        assert_eq!(schedule.rate_for_age(15), 0.05);
    }

    #[test]
    fn future_model_years_use_the_newest_tier() {
        assert_eq!(AgeRateSchedule::maintenance().rate_for_age(-1), 0.08);
    }

    #[test]
    fn partial_rate_config_falls_back_to_defaults() {
        let parsed: RateConfig = serde_json::from_str(r#"{"parking_daily_rate": 8.5}"#).unwrap();
        assert_eq!(parsed.parking_daily_rate, 8.5);
        assert_eq!(parsed.weeks_per_month, WEEKS_PER_MONTH);
        assert_eq!(parsed.maintenance, AgeRateSchedule::maintenance());
    }
}
