//! Shared runtime state for CLI interactions and command execution.

use std::path::PathBuf;

use dialoguer::theme::ColorfulTheme;

use tally_config::{Config, ConfigManager};

use crate::app::{AppState, SystemClock};
use crate::currency::CurrencyFormatter;

use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub base_dir: PathBuf,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub formatter: CurrencyFormatter,
    pub state: AppState<SystemClock>,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn status(&self) -> String {
        format!(
            "ShellContext {{ running: {}, last_command: {:?}, user: {:?} }}",
            self.running,
            self.last_command,
            self.state
                .current_user()
                .map(|profile| profile.username.as_str())
        )
    }
}
