//! Subscription-tier gating for computed views.
//!
//! The gate never changes a computed number; it only decides how much of a
//! result the caller may reveal. Decisions come from a static rule table, so a
//! new tier or feature is a new row in [`DEFAULT_RULES`].

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::ForecastError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum SubscriptionTier {
    Budget,
    Mid,
    Professional,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum GatedFeature {
    NinetyDayChart,
    MonthlyBreakdown,
    VehicleDrillDown,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Visibility {
    Full,
    PartialPreview { limit: usize },
    Locked,
}

impl Visibility {
    pub fn is_locked(self) -> bool {
        matches!(self, Visibility::Locked)
    }
}

/// Rows of the default tier table.
pub const DEFAULT_RULES: &[(SubscriptionTier, GatedFeature, Visibility)] = &[
    (
        SubscriptionTier::Budget,
        GatedFeature::NinetyDayChart,
        Visibility::Locked,
    ),
    (
        SubscriptionTier::Budget,
        GatedFeature::MonthlyBreakdown,
        Visibility::PartialPreview { limit: 3 },
    ),
    (
        SubscriptionTier::Budget,
        GatedFeature::VehicleDrillDown,
        Visibility::Locked,
    ),
    (
        SubscriptionTier::Mid,
        GatedFeature::NinetyDayChart,
        Visibility::Full,
    ),
    (
        SubscriptionTier::Mid,
        GatedFeature::MonthlyBreakdown,
        Visibility::Full,
    ),
    (
        SubscriptionTier::Mid,
        GatedFeature::VehicleDrillDown,
        Visibility::Locked,
    ),
    (
        SubscriptionTier::Professional,
        GatedFeature::NinetyDayChart,
        Visibility::Full,
    ),
    (
        SubscriptionTier::Professional,
        GatedFeature::MonthlyBreakdown,
        Visibility::Full,
    ),
    (
        SubscriptionTier::Professional,
        GatedFeature::VehicleDrillDown,
        Visibility::Full,
    ),
];

static DEFAULT_TABLE: Lazy<VisibilityTable> =
    Lazy::new(|| VisibilityTable::from_rules(DEFAULT_RULES.iter().copied()));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityTable {
    rules: BTreeMap<(SubscriptionTier, GatedFeature), Visibility>,
}

impl VisibilityTable {
    pub fn from_rules<I>(rules: I) -> Self
    where
        I: IntoIterator<Item = (SubscriptionTier, GatedFeature, Visibility)>,
    {
        Self {
            rules: rules
                .into_iter()
                .map(|(tier, feature, visibility)| ((tier, feature), visibility))
                .collect(),
        }
    }

    /// Pairs missing from the table resolve to `Locked`.
    pub fn resolve(&self, tier: SubscriptionTier, feature: GatedFeature) -> Visibility {
        self.rules
            .get(&(tier, feature))
            .copied()
            .unwrap_or(Visibility::Locked)
    }

    /// Replaces the row count of every partial preview.
    pub fn with_preview_limit(mut self, limit: usize) -> Self {
        for visibility in self.rules.values_mut() {
            if let Visibility::PartialPreview { .. } = visibility {
                *visibility = Visibility::PartialPreview { limit };
            }
        }
        self
    }
}

impl Default for VisibilityTable {
    fn default() -> Self {
        DEFAULT_TABLE.clone()
    }
}

/// Looks up `(tier, feature)` in the default table.
pub fn resolve_visibility(tier: SubscriptionTier, feature: GatedFeature) -> Visibility {
    DEFAULT_TABLE.resolve(tier, feature)
}

/// The prefix of `rows` a caller may show under `visibility`.
pub fn reveal<T>(rows: &[T], visibility: Visibility) -> &[T] {
    match visibility {
        Visibility::Full => rows,
        Visibility::PartialPreview { limit } => &rows[..limit.min(rows.len())],
        Visibility::Locked => &[],
    }
}

impl fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SubscriptionTier::Budget => "budget",
            SubscriptionTier::Mid => "mid",
            SubscriptionTier::Professional => "professional",
        };
        f.write_str(label)
    }
}

impl FromStr for SubscriptionTier {
    type Err = ForecastError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "budget" => Ok(SubscriptionTier::Budget),
            "mid" => Ok(SubscriptionTier::Mid),
            "professional" => Ok(SubscriptionTier::Professional),
            other => Err(ForecastError::InvalidInput(format!(
                "unknown subscription tier `{other}`"
            ))),
        }
    }
}

impl fmt::Display for GatedFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GatedFeature::NinetyDayChart => "ninety-day-chart",
            GatedFeature::MonthlyBreakdown => "monthly-breakdown",
            GatedFeature::VehicleDrillDown => "vehicle-drill-down",
        };
        f.write_str(label)
    }
}

impl FromStr for GatedFeature {
    type Err = ForecastError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ninety-day-chart" => Ok(GatedFeature::NinetyDayChart),
            "monthly-breakdown" => Ok(GatedFeature::MonthlyBreakdown),
            "vehicle-drill-down" => Ok(GatedFeature::VehicleDrillDown),
            other => Err(ForecastError::InvalidInput(format!(
                "unknown feature `{other}`"
            ))),
        }
    }
}
