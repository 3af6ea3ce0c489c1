//! Core CLI dispatch, error reporting, and shell context helpers.

use std::{env, path::PathBuf};

use dialoguer::theme::ColorfulTheme;
use strsim::levenshtein;
use tracing::{debug, warn};

use tally_config::{Config, ConfigError, ConfigManager};
use tally_core::CalendarLabels;
use tally_storage_json::JsonKeyValueStore;

pub use crate::errors::CliError;
use crate::{
    app::{AppState, SystemClock},
    currency::CurrencyFormatter,
    errors::AppError,
};

use super::commands;
use super::io as cli_io;
use super::output::{self, OutputPreferences};
use super::registry::{CommandEntry, CommandRegistry};
pub use super::shell_context::{CliMode, ShellContext};

/// Overrides the directory holding configuration and stored documents.
pub const HOME_ENV: &str = "INCOME_CORE_HOME";
const APP_DIR_NAME: &str = "income_core";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Not signed in. Use `login` or `register` first.")]
    NotLoggedIn,
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    App(AppError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<AppError> for CommandError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::NotLoggedIn => CommandError::NotLoggedIn,
            other => CommandError::App(other),
        }
    }
}

impl From<tally_core::CoreError> for CommandError {
    fn from(err: tally_core::CoreError) -> Self {
        CommandError::App(AppError::Core(err))
    }
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

/// `$INCOME_CORE_HOME`, or the platform data directory.
pub fn resolve_base_dir() -> PathBuf {
    env::var_os(HOME_ENV)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| ConfigManager::default_base_dir(APP_DIR_NAME))
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_base_dir(mode, resolve_base_dir())
    }

    pub fn with_base_dir(mode: CliMode, base_dir: PathBuf) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config_manager = ConfigManager::with_base_dir(base_dir.clone())?;
        let config = match config_manager.load() {
            Ok(config) => config,
            Err(err) => {
                warn!(error = %err, "configuration unreadable; using defaults");
                cli_io::print_warning(format!("Configuration unreadable ({err}); using defaults."));
                Config::default()
            }
        };
        apply_output_preferences(&config, mode);

        let store = JsonKeyValueStore::new(config.resolve_data_dir(&base_dir))?;
        let state = AppState::load(Box::new(store), SystemClock)
            .with_labels(CalendarLabels::for_locale(&config.locale))
            .with_bcrypt_cost(config.effective_bcrypt_cost())
            .with_view_mode(config.default_view_mode);

        Ok(ShellContext {
            mode,
            registry,
            theme: ColorfulTheme::default(),
            base_dir,
            config_manager,
            formatter: CurrencyFormatter::from_config(&config),
            config,
            state,
            last_command: None,
            running: true,
        })
    }

    pub(crate) fn mode(&self) -> CliMode {
        self.mode
    }

    pub(crate) fn can_prompt(&self) -> bool {
        self.mode == CliMode::Interactive
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn prompt(&self) -> String {
        match self.state.current_user() {
            Some(profile) => format!("income_core [{}]> ", profile.first_name()),
            None => "income_core> ".into(),
        }
    }

    /// Saves the configuration and refreshes everything derived from it.
    pub(crate) fn persist_config(&mut self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        self.formatter = CurrencyFormatter::from_config(&self.config);
        self.state
            .set_labels(CalendarLabels::for_locale(&self.config.locale));
        apply_output_preferences(&self.config, self.mode);
        Ok(())
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(entry) = self.registry.get(command) else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        let handler = entry.handler;
        if entry.requires_login {
            self.state.require_user()?;
        }
        debug!(command, status = %self.status(), "dispatching command");
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                cli_io::print_warning(err.to_string());
                return Ok(LoopControl::Continue);
            }
        };

        if tokens.is_empty() {
            return Ok(LoopControl::Continue);
        }

        let raw = &tokens[0];
        let command = raw.to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.last_command = Some(line.trim().to_string());

        match self.dispatch(&command, raw, &args) {
            Ok(LoopControl::Exit) => {
                self.running = false;
                Ok(LoopControl::Exit)
            }
            other => other,
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
            .map(|key| (levenshtein(key, &needle), key))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", name));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if !self.can_prompt() {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, "Exit shell?", true).map_err(CliError::from)
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            CommandError::NotLoggedIn => {
                cli_io::print_error("Not signed in. Use `login` or `register` first.");
                output::hint("Try `register \"Your Name\" you@example.com <password>`.");
            }
            CommandError::App(err) if err.is_validation() => {
                cli_io::print_error(err);
            }
            other => {
                warn!(error = %other, "command failed");
                cli_io::print_error(other);
            }
        }
    }
}

fn apply_output_preferences(config: &Config, mode: CliMode) {
    output::set_preferences(OutputPreferences {
        color_enabled: config.ui_color_enabled && mode == CliMode::Interactive,
    });
}

#[cfg(test)]
pub(crate) fn process_script(
    base_dir: &std::path::Path,
    lines: &[&str],
) -> Result<ShellContext, CliError> {
    let mut app = ShellContext::with_base_dir(CliMode::Script, base_dir.to_path_buf())?;
    for line in lines {
        match app.process_line(line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => app.report_error(err),
        }
    }
    Ok(app)
}
