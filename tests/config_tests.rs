use forecast_core::config::{Config, ConfigManager};
use forecast_core::engine::{GatedFeature, SubscriptionTier, Visibility};
use tempfile::TempDir;

#[test]
fn partial_config_file_keeps_remaining_defaults() {
    let temp = TempDir::new().expect("create temp dir");
    let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).expect("manager");
    std::fs::write(
        manager.path(),
        r#"{ "rates": { "insurance_premium": 960.0 }, "preview_months_override": 2 }"#,
    )
    .expect("write config");

    let config = manager.load().expect("load config");
    let defaults = Config::default();
    assert_eq!(config.rates.insurance_premium, 960.0);
    assert_eq!(config.rates.maintenance, defaults.rates.maintenance);
    assert_eq!(config.thresholds, defaults.thresholds);
    assert_eq!(
        config
            .visibility_table()
            .resolve(SubscriptionTier::Budget, GatedFeature::MonthlyBreakdown),
        Visibility::PartialPreview { limit: 2 }
    );
}

#[test]
fn invalid_week_factor_is_rejected_on_load() {
    let temp = TempDir::new().expect("create temp dir");
    let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).expect("manager");
    std::fs::write(manager.path(), r#"{ "rates": { "weeks_per_month": 0.0 } }"#)
        .expect("write config");
    let err = manager.load().expect_err("zero weeks per month");
    assert!(err.to_string().contains("weeks_per_month"));
}
