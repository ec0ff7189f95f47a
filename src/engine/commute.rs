//! Commute cost model: one vehicle driven over one commute, broken down into
//! fuel, maintenance, depreciation, insurance, parking and tolls.
//!
//! Every figure is computed on a weekly basis first and then scaled to
//! monthly and annual projections.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{ensure_finite, ensure_non_negative, ForecastError, ValidationError};
use crate::time::Clock;

use super::rates::RateConfig;

const MAX_DAYS_PER_WEEK: f64 = 7.0;
const MONTHS_PER_YEAR: f64 = 12.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FuelType {
    Gasoline,
    Diesel,
    Hybrid,
    Electric,
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FuelType::Gasoline => "gasoline",
            FuelType::Diesel => "diesel",
            FuelType::Hybrid => "hybrid",
            FuelType::Electric => "electric",
        };
        f.write_str(label)
    }
}

/// Vehicle attributes relevant to running costs.
///
/// `fuel_economy` is distance per unit of fuel (miles per gallon, or miles
/// per kWh for electric vehicles paired with a per-kWh `fuel_price`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VehicleProfile {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub fuel_economy: f64,
    pub fuel_type: FuelType,
}

impl VehicleProfile {
    pub fn new(
        make: impl Into<String>,
        model: impl Into<String>,
        year: i32,
        fuel_economy: f64,
        fuel_type: FuelType,
    ) -> Self {
        Self {
            make: make.into(),
            model: model.into(),
            year,
            fuel_economy,
            fuel_type,
        }
    }

    /// Age in whole years relative to `reference_year`. Negative for model
    /// years in the future.
    pub fn age_in(&self, reference_year: i32) -> i32 {
        reference_year - self.year
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        ensure_finite("fuel_economy", self.fuel_economy)?;
        if self.fuel_economy <= 0.0 {
            return Err(ValidationError::NotPositive {
                field: "fuel_economy",
                value: self.fuel_economy,
            });
        }
        Ok(())
    }

    pub fn display_label(&self) -> String {
        format!("{} {} {}", self.year, self.make, self.model)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommuteInput {
    pub one_way_distance: f64,
    pub days_per_week: f64,
    pub fuel_price: f64,
    #[serde(default)]
    pub include_parking: bool,
    #[serde(default)]
    pub include_tolls: bool,
}

impl CommuteInput {
    pub fn new(one_way_distance: f64, days_per_week: f64, fuel_price: f64) -> Self {
        Self {
            one_way_distance,
            days_per_week,
            fuel_price,
            include_parking: false,
            include_tolls: false,
        }
    }

    pub fn with_parking(mut self, include: bool) -> Self {
        self.include_parking = include;
        self
    }

    pub fn with_tolls(mut self, include: bool) -> Self {
        self.include_tolls = include;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        ensure_non_negative("one_way_distance", self.one_way_distance)?;
        ensure_non_negative("days_per_week", self.days_per_week)?;
        if self.days_per_week > MAX_DAYS_PER_WEEK {
            return Err(ValidationError::OutOfRange {
                field: "days_per_week",
                value: self.days_per_week,
                min: 0.0,
                max: MAX_DAYS_PER_WEEK,
            });
        }
        ensure_non_negative("fuel_price", self.fuel_price)?;
        Ok(())
    }

    /// Round-trip distance driven in one week.
    pub fn weekly_distance(&self) -> f64 {
        self.one_way_distance * 2.0 * self.days_per_week
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct PeriodProjection {
    pub weekly: f64,
    pub monthly: f64,
    pub annual: f64,
}

impl PeriodProjection {
    pub fn from_weekly(weekly: f64, rates: &RateConfig) -> Self {
        Self {
            weekly,
            monthly: weekly * rates.weeks_per_month,
            annual: weekly * rates.weeks_per_year,
        }
    }
}

/// Weekly cost decomposition for one vehicle/commute pair.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CostBreakdown {
    pub fuel: f64,
    pub maintenance: f64,
    pub depreciation: f64,
    pub insurance: f64,
    pub parking: f64,
    pub tolls: f64,
    pub total: f64,
    pub weekly_distance: f64,
    pub cost_per_distance_unit: f64,
    pub projections: PeriodProjection,
}

impl CostBreakdown {
    /// Sum of the six cost categories; equals `total` for any breakdown the
    /// model produced.
    pub fn components_sum(&self) -> f64 {
        self.fuel + self.maintenance + self.depreciation + self.insurance + self.parking + self.tolls
    }

    pub fn monthly(&self) -> f64 {
        self.projections.monthly
    }

    pub fn annual(&self) -> f64 {
        self.projections.annual
    }
}

/// Salary net of commuting, derived from an annualized breakdown.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TrueCompensation {
    pub monthly_salary: f64,
    pub monthly_commute_cost: f64,
    pub true_monthly: f64,
}

impl TrueCompensation {
    pub fn from_salary(
        monthly_salary: f64,
        breakdown: &CostBreakdown,
    ) -> Result<Self, ValidationError> {
        ensure_finite("monthly_salary", monthly_salary)?;
        let monthly_commute_cost = breakdown.annual() / MONTHS_PER_YEAR;
        Ok(Self {
            monthly_salary,
            monthly_commute_cost,
            true_monthly: monthly_salary - monthly_commute_cost,
        })
    }

    /// Share of the salary consumed by the commute, `None` for a zero salary.
    pub fn commute_share(&self) -> Option<f64> {
        if self.monthly_salary.abs() < f64::EPSILON {
            None
        } else {
            Some(self.monthly_commute_cost / self.monthly_salary)
        }
    }
}

pub struct CommuteCostModel;

impl CommuteCostModel {
    /// Computes the breakdown for `vehicle` driven over `commute`, aging the
    /// vehicle against `reference_year`.
    pub fn compute(
        vehicle: &VehicleProfile,
        commute: &CommuteInput,
        rates: &RateConfig,
        reference_year: i32,
    ) -> Result<CostBreakdown, ValidationError> {
        vehicle.validate()?;
        commute.validate()?;
        validate_rates(rates)?;

        let weekly_distance = commute.weekly_distance();
        let age = vehicle.age_in(reference_year);

        let fuel = weekly_distance * (commute.fuel_price / vehicle.fuel_economy);
        let maintenance = weekly_distance * rates.maintenance.rate_for_age(age);
        let depreciation = weekly_distance * rates.depreciation.rate_for_age(age);
        let insurance =
            (rates.insurance_premium / MONTHS_PER_YEAR) * (commute.days_per_week / MAX_DAYS_PER_WEEK);
        let parking = if commute.include_parking {
            commute.days_per_week * rates.parking_daily_rate
        } else {
            0.0
        };
        let tolls = if commute.include_tolls {
            weekly_distance * rates.toll_rate_per_distance_unit
        } else {
            0.0
        };

        let total = fuel + maintenance + depreciation + insurance + parking + tolls;
        let cost_per_distance_unit = if weekly_distance > 0.0 {
            total / weekly_distance
        } else {
            0.0
        };

        debug!(
            vehicle = %vehicle.display_label(),
            age,
            weekly_distance,
            total,
            "computed commute cost"
        );

        Ok(CostBreakdown {
            fuel,
            maintenance,
            depreciation,
            insurance,
            parking,
            tolls,
            total,
            weekly_distance,
            cost_per_distance_unit,
            projections: PeriodProjection::from_weekly(total, rates),
        })
    }

    pub fn compute_with_clock(
        vehicle: &VehicleProfile,
        commute: &CommuteInput,
        rates: &RateConfig,
        clock: &dyn Clock,
    ) -> Result<CostBreakdown, ValidationError> {
        Self::compute(vehicle, commute, rates, clock.current_year())
    }
}

fn validate_rates(rates: &RateConfig) -> Result<(), ValidationError> {
    for (field, value) in [
        ("maintenance.newer", rates.maintenance.newer),
        ("maintenance.mid", rates.maintenance.mid),
        ("maintenance.older", rates.maintenance.older),
        ("depreciation.newer", rates.depreciation.newer),
        ("depreciation.mid", rates.depreciation.mid),
        ("depreciation.older", rates.depreciation.older),
        ("insurance_premium", rates.insurance_premium),
        ("parking_daily_rate", rates.parking_daily_rate),
        ("toll_rate_per_distance_unit", rates.toll_rate_per_distance_unit),
        ("weeks_per_month", rates.weeks_per_month),
        ("weeks_per_year", rates.weeks_per_year),
    ] {
        ensure_non_negative(field, value)?;
    }
    Ok(())
}

/// A job offer evaluated on salary net of the commute it implies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobOffer {
    pub label: String,
    pub monthly_salary: f64,
    pub vehicle: VehicleProfile,
    pub commute: CommuteInput,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobComparison {
    pub label: String,
    pub breakdown: CostBreakdown,
    pub compensation: TrueCompensation,
}

/// Ranks offers by true monthly compensation, best first. Ties keep their
/// input order. The first invalid offer fails the whole comparison.
pub fn compare_jobs(
    offers: &[JobOffer],
    rates: &RateConfig,
    reference_year: i32,
) -> Result<Vec<JobComparison>, ForecastError> {
    let mut rows = Vec::with_capacity(offers.len());
    for offer in offers {
        if offer.label.trim().is_empty() {
            return Err(ValidationError::Empty { field: "label" }.into());
        }
        let (breakdown, compensation) = evaluate_offer(offer, rates, reference_year)
            .map_err(|source| ForecastError::Offer {
                label: offer.label.clone(),
                source,
            })?;
        rows.push(JobComparison {
            label: offer.label.clone(),
            breakdown,
            compensation,
        });
    }
    rows.sort_by(|a, b| {
        b.compensation
            .true_monthly
            .partial_cmp(&a.compensation.true_monthly)
            .unwrap_or(Ordering::Equal)
    });
    Ok(rows)
}

fn evaluate_offer(
    offer: &JobOffer,
    rates: &RateConfig,
    reference_year: i32,
) -> Result<(CostBreakdown, TrueCompensation), ValidationError> {
    let breakdown =
        CommuteCostModel::compute(&offer.vehicle, &offer.commute, rates, reference_year)?;
    let compensation = TrueCompensation::from_salary(offer.monthly_salary, &breakdown)?;
    Ok((breakdown, compensation))
}
