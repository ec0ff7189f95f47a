//! Folds a daily balance series into per-month summaries.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{ensure_finite, ValidationError};

use super::month::MonthKey;
use super::status::{BalanceStatus, BalanceStatusClassifier, StatusThresholds};

/// Allowed drift between `net_change` and `closing - opening`, relative to
/// the larger balance magnitude (scale floored at 1.0).
const NET_CHANGE_TOLERANCE: f64 = 1e-12;

/// One day's opening/closing balance record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyLedgerEntry {
    pub date: NaiveDate,
    pub opening_balance: f64,
    pub closing_balance: f64,
    pub net_change: f64,
    pub status: BalanceStatus,
}

impl DailyLedgerEntry {
    /// Builds an entry with `net_change` derived from the two balances.
    pub fn new(
        date: NaiveDate,
        opening_balance: f64,
        closing_balance: f64,
        status: BalanceStatus,
    ) -> Self {
        Self {
            date,
            opening_balance,
            closing_balance,
            net_change: closing_balance - opening_balance,
            status,
        }
    }

    /// Builds an entry whose status is classified from the closing balance.
    pub fn classified(
        date: NaiveDate,
        opening_balance: f64,
        closing_balance: f64,
        thresholds: &StatusThresholds,
    ) -> Self {
        let status = BalanceStatusClassifier::classify(closing_balance, thresholds);
        Self::new(date, opening_balance, closing_balance, status)
    }

    pub fn month(&self) -> MonthKey {
        MonthKey::from_date(self.date)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        ensure_finite("opening_balance", self.opening_balance)?;
        ensure_finite("closing_balance", self.closing_balance)?;
        ensure_finite("net_change", self.net_change)?;
        let expected = self.closing_balance - self.opening_balance;
        let scale = self
            .opening_balance
            .abs()
            .max(self.closing_balance.abs())
            .max(1.0);
        if (self.net_change - expected).abs() > NET_CHANGE_TOLERANCE * scale {
            return Err(ValidationError::NetChangeMismatch {
                date: self.date,
                opening: self.opening_balance,
                closing: self.closing_balance,
                net_change: self.net_change,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlySummary {
    pub month: MonthKey,
    pub opening_balance: f64,
    pub closing_balance: f64,
    pub total_income: f64,
    pub total_expenses: f64,
    pub worst_status: BalanceStatus,
}

impl MonthlySummary {
    fn opened_by(entry: &DailyLedgerEntry) -> Self {
        Self {
            month: entry.month(),
            opening_balance: entry.opening_balance,
            closing_balance: entry.closing_balance,
            total_income: 0.0,
            total_expenses: 0.0,
            worst_status: BalanceStatus::Healthy,
        }
    }

    fn absorb(&mut self, entry: &DailyLedgerEntry) {
        self.closing_balance = entry.closing_balance;
        if entry.net_change > 0.0 {
            self.total_income += entry.net_change;
        } else if entry.net_change < 0.0 {
            self.total_expenses += entry.net_change.abs();
        }
        self.worst_status = BalanceStatusClassifier::worst([self.worst_status, entry.status]);
    }

    pub fn net_change(&self) -> f64 {
        self.total_income - self.total_expenses
    }
}

/// Checks every entry, reporting the first failure.
pub fn validate_entries(entries: &[DailyLedgerEntry]) -> Result<(), ValidationError> {
    entries.iter().try_for_each(DailyLedgerEntry::validate)
}

/// Groups `entries` by calendar month.
///
/// Entries are consumed in the order given and never re-sorted: a month's
/// opening balance comes from the first entry seen for it and its closing
/// balance from the last one seen. Rows come back in ascending month order;
/// months with no entries are omitted.
pub fn aggregate_by_month(entries: &[DailyLedgerEntry]) -> Vec<MonthlySummary> {
    let mut months: BTreeMap<MonthKey, MonthlySummary> = BTreeMap::new();
    for entry in entries {
        months
            .entry(entry.month())
            .or_insert_with(|| MonthlySummary::opened_by(entry))
            .absorb(entry);
    }
    debug!(
        entries = entries.len(),
        months = months.len(),
        "aggregated ledger by month"
    );
    months.into_values().collect()
}

/// Validates all entries before aggregating; nothing is computed if any
/// entry is rejected.
pub fn aggregate_validated(
    entries: &[DailyLedgerEntry],
) -> Result<Vec<MonthlySummary>, ValidationError> {
    validate_entries(entries)?;
    Ok(aggregate_by_month(entries))
}

/// Headline figures for a balance series, as shown above the forecast chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CashFlowOutlook {
    pub lowest_balance: f64,
    pub lowest_date: NaiveDate,
    pub first_danger_date: Option<NaiveDate>,
    pub ending_balance: f64,
    pub worst_status: BalanceStatus,
}

/// Summarizes the series in encounter order. The earliest-seen entry wins a
/// tie for the lowest balance. `None` for an empty series.
pub fn outlook(entries: &[DailyLedgerEntry]) -> Option<CashFlowOutlook> {
    let first = entries.first()?;
    let last = entries.last()?;
    let mut lowest = first;
    for entry in entries {
        if entry.closing_balance < lowest.closing_balance {
            lowest = entry;
        }
    }
    Some(CashFlowOutlook {
        lowest_balance: lowest.closing_balance,
        lowest_date: lowest.date,
        first_danger_date: entries
            .iter()
            .find(|entry| entry.status == BalanceStatus::Danger)
            .map(|entry| entry.date),
        ending_balance: last.closing_balance,
        worst_status: BalanceStatusClassifier::worst(entries.iter().map(|entry| entry.status)),
    })
}
