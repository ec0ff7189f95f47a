//! JSON request and response documents accepted by the command line.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::engine::{
    BalanceStatus, BalanceStatusClassifier, CashFlowOutlook, CommuteInput, CostBreakdown,
    DailyLedgerEntry, JobOffer, MonthlyExpenseRecord, MonthlySummary, StatusThresholds,
    SubscriptionTier, TrueCompensation, VehicleExpenseMonth, VehicleProfile, Visibility,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommuteRequest {
    pub vehicle: VehicleProfile,
    pub commute: CommuteInput,
    #[serde(default)]
    pub monthly_salary: Option<f64>,
    #[serde(default)]
    pub reference_year: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommuteResponse {
    pub breakdown: CostBreakdown,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compensation: Option<TrueCompensation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobsRequest {
    pub offers: Vec<JobOffer>,
    #[serde(default)]
    pub reference_year: Option<i32>,
}

/// A ledger row as submitted. Missing `status` is classified from the
/// closing balance; missing `net_change` is derived from the two balances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntryRequest {
    pub date: NaiveDate,
    pub opening_balance: f64,
    pub closing_balance: f64,
    #[serde(default)]
    pub net_change: Option<f64>,
    #[serde(default)]
    pub status: Option<BalanceStatus>,
}

impl LedgerEntryRequest {
    pub fn into_entry(self, thresholds: &StatusThresholds) -> DailyLedgerEntry {
        let status = self.status.unwrap_or_else(|| {
            BalanceStatusClassifier::classify(self.closing_balance, thresholds)
        });
        DailyLedgerEntry {
            date: self.date,
            opening_balance: self.opening_balance,
            closing_balance: self.closing_balance,
            net_change: self
                .net_change
                .unwrap_or(self.closing_balance - self.opening_balance),
            status,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashFlowRequest {
    pub entries: Vec<LedgerEntryRequest>,
    #[serde(default)]
    pub tier: Option<SubscriptionTier>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashFlowResponse {
    pub breakdown_visibility: Visibility,
    pub months: Vec<MonthlySummary>,
    pub hidden_months: usize,
    pub chart_visibility: Visibility,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outlook: Option<CashFlowOutlook>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehiclesRequest {
    pub records: Vec<MonthlyExpenseRecord>,
    #[serde(default)]
    pub tier: Option<SubscriptionTier>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehiclesResponse {
    pub drill_down_visibility: Visibility,
    pub months: Vec<VehicleExpenseMonth>,
}
