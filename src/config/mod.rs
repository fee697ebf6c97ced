use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

use crate::{
    domain::{HousingType, LifestyleTier},
    errors::{DirectoryError, Result},
    estimator::{CostEstimator, DEFAULT_EXCHANGE_RATE},
    utils::{
        paths::{ensure_dir, PathResolver},
        persistence::{list_backup_files, read_json, unique_backup_name, write_json_atomic},
    },
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub locale: String,
    pub primary_currency: String,
    pub secondary_currency: String,
    /// Units of secondary currency per unit of primary (JPY → CNY).
    pub exchange_rate: f64,
    pub default_duration_months: i32,
    pub default_housing: HousingType,
    pub default_lifestyle: LifestyleTier,
    pub page_size: usize,
    pub ui_color_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_opened_directory: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "zh-CN".into(),
            primary_currency: "JPY".into(),
            secondary_currency: "CNY".into(),
            exchange_rate: DEFAULT_EXCHANGE_RATE,
            default_duration_months: 12,
            default_housing: HousingType::Dormitory,
            default_lifestyle: LifestyleTier::Mid,
            page_size: 12,
            ui_color_enabled: true,
            last_opened_directory: None,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if !self.exchange_rate.is_finite() || self.exchange_rate <= 0.0 {
            return Err(DirectoryError::ConfigError(format!(
                "exchange_rate must be a positive number, got {}",
                self.exchange_rate
            )));
        }
        if self.page_size == 0 {
            return Err(DirectoryError::ConfigError(
                "page_size must be at least 1".into(),
            ));
        }
        if self.default_duration_months < 1 {
            return Err(DirectoryError::ConfigError(format!(
                "default_duration_months must be at least 1, got {}",
                self.default_duration_months
            )));
        }
        Ok(())
    }

    pub fn estimator(&self) -> CostEstimator {
        CostEstimator::new(self.exchange_rate)
    }
}

pub struct ConfigManager {
    path: PathBuf,
    backups_dir: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::from_base(PathResolver::resolve_base(None))
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        Self::from_base(base)
    }

    fn from_base(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        ensure_dir(&PathResolver::config_dir_in(&base))?;
        let backups_dir = PathResolver::config_backup_dir_in(&base);
        ensure_dir(&backups_dir)?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
            backups_dir,
        })
    }

    /// Reads the config file, falling back to defaults when it does not exist.
    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        let config: Config = read_json(&self.path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        config.validate()?;
        write_json_atomic(&self.path, config)?;
        info!(path = %self.path.display(), "config saved");
        Ok(())
    }

    pub fn backup(&self, config: &Config, note: Option<&str>) -> Result<String> {
        ensure_dir(&self.backups_dir)?;
        let name = unique_backup_name(&self.backups_dir, "config", note);
        write_json_atomic(&self.backups_dir.join(&name), config)?;
        Ok(name)
    }

    pub fn restore(&self, backup_name: &str) -> Result<Config> {
        let path = self.backups_dir.join(backup_name);
        if !path.exists() {
            return Err(DirectoryError::StorageError(format!(
                "configuration backup `{}` not found",
                backup_name
            )));
        }
        let config: Config = read_json(&path)?;
        config.validate()?;
        self.save(&config)?;
        Ok(config)
    }

    pub fn list_backups(&self) -> Result<Vec<String>> {
        list_backup_files(&self.backups_dir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Removes the active config file so the next load returns defaults.
    pub fn reset(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.estimator().exchange_rate(), 0.048);
    }

    #[test]
    fn rejects_non_positive_rate() {
        for rate in [0.0, -0.05, f64::NAN, f64::INFINITY] {
            let config = Config {
                exchange_rate: rate,
                ..Config::default()
            };
            assert!(matches!(config.validate(), Err(DirectoryError::ConfigError(_))));
        }
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let config: Config = serde_json::from_str(r#"{"exchange_rate": 0.05}"#).unwrap();
        assert_eq!(config.exchange_rate, 0.05);
        assert_eq!(config.page_size, 12);
        assert_eq!(config.default_lifestyle, LifestyleTier::Mid);
    }
}
