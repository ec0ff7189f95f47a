//! Per-vehicle and fleet-wide monthly expense totals.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{ensure_non_negative, ValidationError};

use super::month::MonthKey;

/// Label of the line that carries costs recorded only as a combined total.
pub const GENERIC_VEHICLE_LINE: &str = "Vehicle costs";

/// One vehicle's expenses for one month.
///
/// `total` is the combined figure older records carry instead of the
/// routine/repair split. It is only consulted when both split fields of the
/// same line are zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VehicleExpenseLine {
    pub vehicle: String,
    #[serde(default)]
    pub routine_cost: f64,
    #[serde(default)]
    pub repair_cost: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
}

impl VehicleExpenseLine {
    pub fn new(vehicle: impl Into<String>, routine_cost: f64, repair_cost: f64) -> Self {
        Self {
            vehicle: vehicle.into(),
            routine_cost,
            repair_cost,
            total: None,
        }
    }

    pub fn legacy(vehicle: impl Into<String>, total: f64) -> Self {
        Self {
            vehicle: vehicle.into(),
            routine_cost: 0.0,
            repair_cost: 0.0,
            total: Some(total),
        }
    }

    /// Combined total of a line that carries no routine/repair split.
    pub fn unsplit_total(&self) -> Option<f64> {
        match self.total {
            Some(total) if self.routine_cost == 0.0 && self.repair_cost == 0.0 && total > 0.0 => {
                Some(total)
            }
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.vehicle.trim().is_empty() {
            return Err(ValidationError::Empty { field: "vehicle" });
        }
        ensure_non_negative("routine_cost", self.routine_cost)?;
        ensure_non_negative("repair_cost", self.repair_cost)?;
        if let Some(total) = self.total {
            ensure_non_negative("total", total)?;
        }
        Ok(())
    }
}

/// Aggregated costs for one vehicle (or the generic line).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VehicleCostLine {
    pub vehicle: String,
    pub routine_cost: f64,
    pub repair_cost: f64,
    /// Combined cost that could not be split into routine and repair.
    pub unsplit_cost: f64,
    pub total: f64,
}

impl VehicleCostLine {
    fn split(vehicle: String, routine_cost: f64, repair_cost: f64) -> Self {
        Self {
            vehicle,
            routine_cost,
            repair_cost,
            unsplit_cost: 0.0,
            total: routine_cost + repair_cost,
        }
    }

    fn unsplit(total: f64) -> Self {
        Self {
            vehicle: GENERIC_VEHICLE_LINE.to_string(),
            routine_cost: 0.0,
            repair_cost: 0.0,
            unsplit_cost: total,
            total,
        }
    }

    pub fn is_generic(&self) -> bool {
        self.vehicle == GENERIC_VEHICLE_LINE && self.unsplit_cost > 0.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VehicleExpenseMonth {
    pub month: MonthKey,
    pub vehicles: Vec<VehicleCostLine>,
    pub routine_total: f64,
    pub repair_total: f64,
    pub unsplit_total: f64,
    pub total_vehicle_cost: f64,
}

impl VehicleExpenseMonth {
    pub fn vehicle(&self, name: &str) -> Option<&VehicleCostLine> {
        self.vehicles.iter().find(|line| line.vehicle == name)
    }
}

#[derive(Default)]
struct VehicleTally {
    routine: f64,
    repair: f64,
}

/// Folds one month's lines into per-vehicle totals, ordered by vehicle
/// identifier. Lines with no split costs but a nonzero legacy total are
/// pooled into a single [`GENERIC_VEHICLE_LINE`] placed last; a vehicle
/// appears under its own name only for the lines that carry a split.
pub fn aggregate_vehicle_expenses(
    month: MonthKey,
    lines: &[VehicleExpenseLine],
) -> Result<VehicleExpenseMonth, ValidationError> {
    lines.iter().try_for_each(VehicleExpenseLine::validate)?;

    let mut tallies: BTreeMap<&str, VehicleTally> = BTreeMap::new();
    let mut unsplit_total = 0.0;
    for line in lines {
        let vehicle = line.vehicle.trim();
        if let Some(total) = line.unsplit_total() {
            warn!(
                month = %month,
                vehicle,
                total,
                "expense line carries only a combined total; moved to generic line"
            );
            unsplit_total += total;
            continue;
        }
        let tally = tallies.entry(vehicle).or_default();
        tally.routine += line.routine_cost;
        tally.repair += line.repair_cost;
    }

    let mut vehicles: Vec<VehicleCostLine> = tallies
        .into_iter()
        .map(|(vehicle, tally)| {
            VehicleCostLine::split(vehicle.to_string(), tally.routine, tally.repair)
        })
        .collect();
    if unsplit_total > 0.0 {
        vehicles.push(VehicleCostLine::unsplit(unsplit_total));
    }

    let routine_total: f64 = vehicles.iter().map(|line| line.routine_cost).sum();
    let repair_total: f64 = vehicles.iter().map(|line| line.repair_cost).sum();
    let total_vehicle_cost: f64 = vehicles.iter().map(|line| line.total).sum();

    debug!(
        month = %month,
        lines = lines.len(),
        vehicles = vehicles.len(),
        "aggregated vehicle expenses"
    );

    Ok(VehicleExpenseMonth {
        month,
        vehicles,
        routine_total,
        repair_total,
        unsplit_total,
        total_vehicle_cost,
    })
}

/// A vehicle expense line tagged with the month it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyExpenseRecord {
    pub month: MonthKey,
    #[serde(flatten)]
    pub line: VehicleExpenseLine,
}

/// Aggregates every month present in `records`, in ascending month order.
pub fn aggregate_fleet_history(
    records: &[MonthlyExpenseRecord],
) -> Result<Vec<VehicleExpenseMonth>, ValidationError> {
    let mut by_month: BTreeMap<MonthKey, Vec<VehicleExpenseLine>> = BTreeMap::new();
    for record in records {
        by_month
            .entry(record.month)
            .or_default()
            .push(record.line.clone());
    }
    by_month
        .into_iter()
        .map(|(month, lines)| aggregate_vehicle_expenses(month, &lines))
        .collect()
}
