use thiserror::Error;

use tally_config::ConfigError;
use tally_core::CoreError;

/// Errors surfaced by session operations on [`crate::app::AppState`].
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("Not signed in. Use `login` or `register` first.")]
    NotLoggedIn,
}

impl AppError {
    /// Input problems the user can fix; the session state is unchanged.
    pub fn is_validation(&self) -> bool {
        match self {
            AppError::Core(err) => err.is_validation(),
            AppError::NotLoggedIn => true,
        }
    }
}

/// Fatal shell errors; the binary exits when one reaches `main`.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    App(#[from] AppError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        CliError::App(AppError::Core(err))
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Command(err.to_string())
    }
}

impl From<rustyline::error::ReadlineError> for CliError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        CliError::Input(err.to_string())
    }
}
