use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use tally_domain::ViewMode;

use crate::ConfigError;

pub const DEFAULT_BCRYPT_COST: u32 = 12;
const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;
const MAX_CURRENCY_PRECISION: u8 = 6;

/// Stores user-configurable preferences for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_locale")]
    pub locale: String,
    #[serde(default = "Config::default_currency")]
    pub currency: String,
    #[serde(default)]
    pub currency_precision: Option<u8>,
    #[serde(default)]
    pub default_view_mode: ViewMode,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for stored documents. Defaults to `<base>/data`.
    pub data_dir: Option<PathBuf>,

    #[serde(default = "Config::default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Self::default_locale(),
            currency: Self::default_currency(),
            currency_precision: None,
            default_view_mode: ViewMode::default(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            data_dir: None,
            bcrypt_cost: Self::default_bcrypt_cost(),
        }
    }
}

impl Config {
    pub fn default_locale() -> String {
        "en-US".into()
    }

    pub fn default_currency() -> String {
        "USD".into()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn default_bcrypt_cost() -> u32 {
        DEFAULT_BCRYPT_COST
    }

    pub fn resolve_data_dir(&self, base: &Path) -> PathBuf {
        match &self.data_dir {
            Some(path) => path.clone(),
            None => base.join("data"),
        }
    }

    /// Cost clamped into the range bcrypt accepts.
    pub fn effective_bcrypt_cost(&self) -> u32 {
        self.bcrypt_cost.clamp(MIN_BCRYPT_COST, MAX_BCRYPT_COST)
    }

    /// Applies a `config set` style change.
    pub fn set(&mut self, key: ConfigKey, value: &str) -> Result<(), ConfigError> {
        let trimmed = value.trim();
        let invalid = |reason: &str| ConfigError::InvalidValue {
            key: key.to_string(),
            value: trimmed.to_string(),
            reason: reason.to_string(),
        };
        match key {
            ConfigKey::Locale => {
                if trimmed.is_empty() {
                    return Err(invalid("locale cannot be empty"));
                }
                self.locale = trimmed.to_string();
            }
            ConfigKey::Currency => {
                if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
                    return Err(invalid("expected a three-letter ISO code"));
                }
                self.currency = trimmed.to_ascii_uppercase();
            }
            ConfigKey::Precision => {
                if trimmed.eq_ignore_ascii_case("auto") {
                    self.currency_precision = None;
                    return Ok(());
                }
                let digits: u8 = trimmed
                    .parse()
                    .map_err(|_| invalid("expected a number or `auto`"))?;
                if digits > MAX_CURRENCY_PRECISION {
                    return Err(invalid("precision must be between 0 and 6"));
                }
                self.currency_precision = Some(digits);
            }
            ConfigKey::View => {
                self.default_view_mode = trimmed
                    .parse()
                    .map_err(|_| invalid("expected week, month or year"))?;
            }
            ConfigKey::Color => {
                self.ui_color_enabled =
                    parse_switch(trimmed).ok_or_else(|| invalid("expected on or off"))?;
            }
        }
        Ok(())
    }
}

fn parse_switch(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Some(true),
        "off" | "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Settings that can be changed from the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    Locale,
    Currency,
    Precision,
    View,
    Color,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 5] = [
        ConfigKey::Locale,
        ConfigKey::Currency,
        ConfigKey::Precision,
        ConfigKey::View,
        ConfigKey::Color,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConfigKey::Locale => "locale",
            ConfigKey::Currency => "currency",
            ConfigKey::Precision => "precision",
            ConfigKey::View => "view",
            ConfigKey::Color => "color",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        ConfigKey::ALL
            .into_iter()
            .find(|key| key.as_str() == normalized)
            .ok_or_else(|| ConfigError::UnknownKey(value.trim().to_string()))
    }
}
