use std::result::Result as StdResult;

use chrono::NaiveDate;
use thiserror::Error;

/// Rejected engine input. Raised before any computation starts, so a failing
/// call never yields a partial result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
    #[error("{field} must be between {min} and {max} (got {value})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{field} must be greater than zero (got {value})")]
    NotPositive { field: &'static str, value: f64 },
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    #[error(
        "ledger entry {date}: net change {net_change} does not equal closing {closing} minus opening {opening}"
    )]
    NetChangeMismatch {
        date: NaiveDate,
        opening: f64,
        closing: f64,
        net_change: f64,
    },
}

impl ValidationError {
    /// Name of the offending input field.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Negative { field, .. }
            | ValidationError::NonFinite { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::NotPositive { field, .. }
            | ValidationError::Empty { field } => field,
            ValidationError::NetChangeMismatch { .. } => "net_change",
        }
    }
}

/// Unified error type for the engine, configuration and CLI layers.
#[derive(Error, Debug)]
pub enum ForecastError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("job offer `{label}`: {source}")]
    Offer {
        label: String,
        #[source]
        source: ValidationError,
    },
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ForecastError {
    /// The rejected input, for errors that stem from validation.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            ForecastError::Validation(source) | ForecastError::Offer { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type Result<T> = StdResult<T, ForecastError>;

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] ForecastError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<std::io::Error> for ForecastError {
    fn from(err: std::io::Error) -> Self {
        ForecastError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for ForecastError {
    fn from(err: serde_json::Error) -> Self {
        ForecastError::Storage(err.to_string())
    }
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::Core(ForecastError::from(err))
    }
}

/// Rejects NaN and infinities for `field`.
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> StdResult<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NonFinite { field })
    }
}

/// Rejects non-finite and negative values for `field`.
pub(crate) fn ensure_non_negative(
    field: &'static str,
    value: f64,
) -> StdResult<f64, ValidationError> {
    ensure_finite(field, value)?;
    if value < 0.0 {
        return Err(ValidationError::Negative { field, value });
    }
    Ok(value)
}
