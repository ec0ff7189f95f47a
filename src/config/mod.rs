use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use dirs::home_dir;
use serde::{Deserialize, Serialize};

use crate::{
    engine::{RateConfig, StatusThresholds, VisibilityTable},
    errors::{ForecastError, Result},
};

const DEFAULT_DIR_NAME: &str = ".forecast_core";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";
const HOME_ENV: &str = "FORECAST_CORE_HOME";

/// Tunable constants handed to the engine. Missing keys fall back to the
/// defaults, so a config file only needs the values it overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub rates: RateConfig,
    pub thresholds: StatusThresholds,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_months_override: Option<usize>,
}

impl Config {
    /// Default tier table with any preview override applied.
    pub fn visibility_table(&self) -> VisibilityTable {
        match self.preview_months_override {
            Some(limit) => VisibilityTable::default().with_preview_limit(limit),
            None => VisibilityTable::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.thresholds.healthy_floor.is_finite() {
            return Err(ForecastError::Config(
                "thresholds.healthy_floor must be a finite number".into(),
            ));
        }
        if self.rates.weeks_per_month <= 0.0 || self.rates.weeks_per_year <= 0.0 {
            return Err(ForecastError::Config(
                "weeks_per_month and weeks_per_year must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Returns the application data directory, defaulting to `~/.forecast_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::from_base(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        Self::from_base(base)
    }

    fn from_base(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
        })
    }

    /// Loads the stored config, or defaults when none has been saved yet.
    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: Config = serde_json::from_str(&data)
            .map_err(|err| ForecastError::Config(format!("{}: {err}", self.path.display())))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{GatedFeature, SubscriptionTier, Visibility};
    use tempfile::TempDir;

    #[test]
    fn load_returns_defaults_when_missing() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        assert_eq!(manager.load().unwrap(), Config::default());
    }

    #[test]
    fn save_then_load_preserves_overrides() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let mut config = Config::default();
        config.rates.parking_daily_rate = 22.0;
        config.thresholds.healthy_floor = 1000.0;
        manager.save(&config).unwrap();
        assert!(!tmp_path(manager.path()).exists());
        assert_eq!(manager.load().unwrap(), config);
    }

    #[test]
    fn preview_override_feeds_visibility_table() {
        let config = Config {
            preview_months_override: Some(1),
            ..Config::default()
        };
        assert_eq!(
            config
                .visibility_table()
                .resolve(SubscriptionTier::Budget, GatedFeature::MonthlyBreakdown),
            Visibility::PartialPreview { limit: 1 }
        );
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        fs::write(manager.path(), "{ not json").unwrap();
        assert!(matches!(manager.load(), Err(ForecastError::Config(_))));
    }
}
