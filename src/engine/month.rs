use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::ForecastError;

/// Calendar month key rendered as `YYYY-MM`. Orders chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Result<Self, ForecastError> {
        if !(1..=12).contains(&month) {
            return Err(ForecastError::InvalidInput(format!(
                "month must be between 1 and 12 (got {month})"
            )));
        }
        Ok(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = ForecastError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || ForecastError::InvalidInput(format!("`{value}` is not a YYYY-MM month"));
        let (year, month) = value.trim().split_once('-').ok_or_else(invalid)?;
        if month.len() != 2 {
            return Err(invalid());
        }
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for MonthKey {
    type Error = ForecastError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_as_iso_prefix() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let key = MonthKey::from_date(date);
        assert_eq!(key.to_string(), "2024-03");
        assert_eq!(key.to_string(), date.to_string()[..7]);
    }

    #[test]
    fn parses_and_orders_chronologically() {
        let dec: MonthKey = "2023-12".parse().unwrap();
        let jan: MonthKey = "2024-01".parse().unwrap();
        assert!(dec < jan);
        assert!("2024-13".parse::<MonthKey>().is_err());
        assert!("2024-1".parse::<MonthKey>().is_err());
        assert!("January".parse::<MonthKey>().is_err());
    }

    #[test]
    fn serializes_as_plain_string() {
        let key = MonthKey::new(2024, 7).unwrap();
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"2024-07\"");
        let back: MonthKey = serde_json::from_str("\"2024-07\"").unwrap();
        assert_eq!(back, key);
    }
}
