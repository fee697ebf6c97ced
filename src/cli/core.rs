//! Command dispatch, error reporting, and persistence for the shell.

use std::io;

use strsim::levenshtein;

use crate::domain::ParseCodeError;
use crate::errors::{CliError, DirectoryError};
use crate::services::CONTENT_KEYS;
use crate::storage::StorageBackend;

use super::io as cli_io;
use super::output::{self, OutputPreferences};
pub use super::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Core(#[from] DirectoryError),
    #[error("exit requested")]
    ExitRequested,
}

impl From<ParseCodeError> for CommandError {
    fn from(err: ParseCodeError) -> Self {
        CommandError::InvalidArguments(err.to_string())
    }
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Core(inner) => CliError::Core(inner),
            CommandError::Io(inner) => CliError::Io(inner),
            other => CliError::Command(other.to_string()),
        }
    }
}

impl ShellContext {
    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &needle), name))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", name));
            }
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(&message);
                cli_io::print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Core(DirectoryError::SchoolNotFound(slug)) => {
                cli_io::print_error(format!("School not found: {}", slug));
                cli_io::print_hint("Use `schools` or `search <text>` to find a slug.");
                Ok(())
            }
            CommandError::Core(DirectoryError::InvalidContentKey(key)) => {
                cli_io::print_error(format!("Unknown content key: {}", key));
                cli_io::print_hint(format!("Known keys: {}", CONTENT_KEYS.join(", ")));
                Ok(())
            }
            other => {
                cli_io::print_error(other.to_string());
                Ok(())
            }
        }
    }

    /// Writes the directory to disk and remembers it as the last one opened.
    pub(crate) fn persist(&mut self) -> CommandResult {
        self.storage.save(&self.directory, &self.directory_name)?;
        self.storage
            .record_last_directory(Some(&self.directory_name))?;
        Ok(())
    }

    pub(crate) fn persist_config(&mut self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        output::set_preferences(OutputPreferences {
            color_enabled: self.config.ui_color_enabled,
            plain_mode: self.mode == CliMode::Script,
        });
        Ok(())
    }

    /// Tokenizes and runs one input line. Quoting errors are argument errors.
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = shell_words::split(line)
            .map_err(|err| CommandError::InvalidArguments(err.to_string()))?;
        let Some((raw, rest)) = tokens.split_first() else {
            return Ok(LoopControl::Continue);
        };
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();

        let control = self.dispatch(&raw.to_lowercase(), raw, &args)?;
        if control == LoopControl::Exit {
            self.running = false;
        }
        Ok(control)
    }
}
