//! Pure forecasting engine: no I/O, no shared state. Every function returns
//! the same output for the same input and is safe to call from any thread.

pub mod cashflow;
pub mod commute;
pub mod month;
pub mod rates;
pub mod status;
pub mod vehicles;
pub mod visibility;

pub use cashflow::{
    aggregate_by_month, aggregate_validated, outlook, validate_entries, CashFlowOutlook,
    DailyLedgerEntry, MonthlySummary,
};
pub use commute::{
    compare_jobs, CommuteCostModel, CommuteInput, CostBreakdown, FuelType, JobComparison,
    JobOffer, PeriodProjection, TrueCompensation, VehicleProfile,
};
pub use month::MonthKey;
pub use rates::{AgeRateSchedule, RateConfig};
pub use status::{BalanceStatus, BalanceStatusClassifier, StatusThresholds};
pub use vehicles::{
    aggregate_fleet_history, aggregate_vehicle_expenses, MonthlyExpenseRecord, VehicleCostLine,
    VehicleExpenseLine, VehicleExpenseMonth, GENERIC_VEHICLE_LINE,
};
pub use visibility::{
    resolve_visibility, reveal, GatedFeature, SubscriptionTier, Visibility, VisibilityTable,
};
