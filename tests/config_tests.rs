mod common;

use std::fs;

use ryugaku_core::config::Config;
use ryugaku_core::domain::{HousingType, LifestyleTier};
use ryugaku_core::errors::DirectoryError;

#[test]
fn missing_file_yields_defaults() {
    let (_, manager) = common::setup_test_env();
    let config = manager.load().unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.exchange_rate, 0.048);
    assert_eq!(config.default_duration_months, 12);
    assert_eq!(config.default_housing, HousingType::Dormitory);
    assert_eq!(config.default_lifestyle, LifestyleTier::Mid);
    assert_eq!(config.page_size, 12);
}

#[test]
fn partial_files_fill_in_defaults() {
    let (_, manager) = common::setup_test_env();
    fs::write(manager.path(), r#"{"exchange_rate": 0.05, "default_lifestyle": "high"}"#).unwrap();
    let config = manager.load().unwrap();
    assert_eq!(config.exchange_rate, 0.05);
    assert_eq!(config.default_lifestyle, LifestyleTier::High);
    assert_eq!(config.secondary_currency, "CNY");
    assert_eq!(config.estimator().exchange_rate(), 0.05);
}

#[test]
fn invalid_values_are_rejected_on_load_and_save() {
    let (_, manager) = common::setup_test_env();
    fs::write(manager.path(), r#"{"exchange_rate": 0}"#).unwrap();
    assert!(matches!(manager.load(), Err(DirectoryError::ConfigError(_))));

    let config = Config {
        default_duration_months: 0,
        ..Config::default()
    };
    assert!(manager.save(&config).is_err());
}

#[test]
fn backup_and_restore_round_trip() {
    let (_, manager) = common::setup_test_env();
    let mut config = Config {
        exchange_rate: 0.047,
        ..Config::default()
    };
    manager.save(&config).unwrap();
    let backup = manager.backup(&config, Some("rate 0.047")).unwrap();
    assert!(backup.starts_with("config_"));
    assert_eq!(manager.list_backups().unwrap(), vec![backup.clone()]);

    config.exchange_rate = 0.06;
    manager.save(&config).unwrap();
    let restored = manager.restore(&backup).unwrap();
    assert_eq!(restored.exchange_rate, 0.047);
    assert_eq!(manager.load().unwrap().exchange_rate, 0.047);

    manager.reset().unwrap();
    assert_eq!(manager.load().unwrap(), Config::default());
}
