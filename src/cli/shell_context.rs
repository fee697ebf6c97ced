use std::path::PathBuf;

use tracing::{debug, info};

use crate::{
    catalog::{ComparisonSet, MAX_COMPARE},
    config::{Config, ConfigManager},
    directory::Directory,
    errors::CliError,
    estimator::CostEstimator,
    seed,
    storage::{JsonStorage, StorageBackend},
    utils::paths::app_data_dir,
};

use super::commands;
use super::output::{self, OutputPreferences};
use super::registry::{CommandEntry, CommandRegistry};

/// Name used when nothing has been opened before.
pub const DEFAULT_DIRECTORY: &str = "main";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub storage: JsonStorage,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub directory: Directory,
    pub directory_name: String,
    pub compare: ComparisonSet,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_base_dir(mode, app_data_dir())
    }

    /// Opens config and storage under `base`, then loads the last directory.
    /// A fresh data dir starts from the sample directory.
    pub fn with_base_dir(mode: CliMode, base: PathBuf) -> Result<Self, CliError> {
        let config_manager = ConfigManager::with_base_dir(base.clone())?;
        let config = config_manager.load()?;
        let storage = JsonStorage::new(Some(base), None)?;

        let directory_name = match config.last_opened_directory.clone() {
            Some(name) => name,
            None => storage
                .last_directory()?
                .unwrap_or_else(|| DEFAULT_DIRECTORY.to_string()),
        };
        let directory = if storage.exists(&directory_name) {
            storage.load(&directory_name)?
        } else {
            info!(name = %directory_name, "no saved directory, starting from sample data");
            seed::sample_directory()
        };
        debug!(schools = directory.schools.len(), "shell context ready");

        output::set_preferences(OutputPreferences {
            color_enabled: config.ui_color_enabled,
            plain_mode: mode == CliMode::Script,
        });

        Ok(Self {
            mode,
            registry: CommandRegistry::with_entries(commands::all_definitions()),
            storage,
            config_manager,
            config,
            directory,
            directory_name,
            compare: ComparisonSet::new(),
            running: true,
        })
    }

    pub fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn estimator(&self) -> CostEstimator {
        self.config.estimator()
    }

    pub fn prompt(&self) -> String {
        if self.compare.is_empty() {
            format!("ryugaku[{}]> ", self.directory_name)
        } else {
            format!(
                "ryugaku[{}] 对比{}/{}> ",
                self.directory_name,
                self.compare.len(),
                MAX_COMPARE
            )
        }
    }
}
