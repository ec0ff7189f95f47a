//! Tri-state balance health classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default balance at or above which a day counts as healthy.
pub const DEFAULT_HEALTHY_FLOOR: f64 = 500.0;

/// Coarse health of an account balance.
///
/// Variants are declared in ascending severity so the derived `Ord` matches
/// `severity()`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BalanceStatus {
    Healthy,
    Warning,
    Danger,
}

impl BalanceStatus {
    /// Numeric rank: danger(3) > warning(2) > healthy(1).
    pub fn severity(self) -> u8 {
        match self {
            BalanceStatus::Healthy => 1,
            BalanceStatus::Warning => 2,
            BalanceStatus::Danger => 3,
        }
    }

    /// Returns whichever of the two statuses is more severe.
    pub fn max_severity(self, other: BalanceStatus) -> BalanceStatus {
        if other.severity() > self.severity() {
            other
        } else {
            self
        }
    }
}

impl Default for BalanceStatus {
    fn default() -> Self {
        BalanceStatus::Healthy
    }
}

impl fmt::Display for BalanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BalanceStatus::Healthy => "healthy",
            BalanceStatus::Warning => "warning",
            BalanceStatus::Danger => "danger",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StatusThresholds {
    pub healthy_floor: f64,
}

impl Default for StatusThresholds {
    fn default() -> Self {
        Self {
            healthy_floor: DEFAULT_HEALTHY_FLOOR,
        }
    }
}

pub struct BalanceStatusClassifier;

impl BalanceStatusClassifier {
    /// Maps a balance onto a status. Total over `f64`: NaN and infinities are
    /// classified as `Danger`.
    pub fn classify(balance: f64, thresholds: &StatusThresholds) -> BalanceStatus {
        if !balance.is_finite() {
            return BalanceStatus::Danger;
        }
        if balance < 0.0 {
            BalanceStatus::Danger
        } else if balance < thresholds.healthy_floor {
            BalanceStatus::Warning
        } else {
            BalanceStatus::Healthy
        }
    }

    /// Most severe status in `statuses`, `Healthy` when empty.
    pub fn worst<I>(statuses: I) -> BalanceStatus
    where
        I: IntoIterator<Item = BalanceStatus>,
    {
        statuses
            .into_iter()
            .fold(BalanceStatus::Healthy, BalanceStatus::max_severity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_uses_floor_and_zero_boundaries() {
        let thresholds = StatusThresholds { healthy_floor: 100.0 };
        assert_eq!(
            BalanceStatusClassifier::classify(100.0, &thresholds),
            BalanceStatus::Healthy
        );
        assert_eq!(
            BalanceStatusClassifier::classify(99.99, &thresholds),
            BalanceStatus::Warning
        );
        assert_eq!(
            BalanceStatusClassifier::classify(0.0, &thresholds),
            BalanceStatus::Warning
        );
        assert_eq!(
            BalanceStatusClassifier::classify(-0.01, &thresholds),
            BalanceStatus::Danger
        );
    }

    #[test]
    fn non_finite_balances_are_danger() {
        let thresholds = StatusThresholds::default();
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(
                BalanceStatusClassifier::classify(value, &thresholds),
                BalanceStatus::Danger
            );
        }
    }

    #[test]
    fn worst_follows_severity_order() {
        use BalanceStatus::*;
        assert_eq!(BalanceStatusClassifier::worst([Healthy, Warning]), Warning);
        assert_eq!(BalanceStatusClassifier::worst([Warning, Danger]), Danger);
        assert_eq!(BalanceStatusClassifier::worst([Danger, Healthy]), Danger);
        assert_eq!(BalanceStatusClassifier::worst(Vec::new()), Healthy);
    }

    #[test]
    fn ord_agrees_with_severity() {
        assert!(BalanceStatus::Danger > BalanceStatus::Warning);
        assert!(BalanceStatus::Warning > BalanceStatus::Healthy);
        assert_eq!(BalanceStatus::Danger.severity(), 3);
    }
}
