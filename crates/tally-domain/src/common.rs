//! Shared traits and enums for income tracking primitives.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Supplies a common contract for retrieving numeric amounts.
pub trait Amounted {
    fn amount(&self) -> f64;
}

/// Sums the amounts of any collection of [`Amounted`] items.
pub fn sum_amounts<'a, T, I>(items: I) -> f64
where
    T: Amounted + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items.into_iter().map(|item| item.amount()).sum()
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
/// The active aggregation window of the dashboard.
pub enum ViewMode {
    Week,
    #[default]
    Month,
    Year,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Week, ViewMode::Month, ViewMode::Year];

    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Week => "week",
            ViewMode::Month => "month",
            ViewMode::Year => "year",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a [`ViewMode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseViewModeError(pub String);

impl fmt::Display for ParseViewModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown view mode `{}` (expected week, month or year)",
            self.0
        )
    }
}

impl std::error::Error for ParseViewModeError {}

impl FromStr for ViewMode {
    type Err = ParseViewModeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "week" | "weekly" | "w" => Ok(ViewMode::Week),
            "month" | "monthly" | "m" => Ok(ViewMode::Month),
            "year" | "yearly" | "y" => Ok(ViewMode::Year),
            _ => Err(ParseViewModeError(value.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_mode_parses_aliases_case_insensitively() {
        assert_eq!("Week".parse::<ViewMode>(), Ok(ViewMode::Week));
        assert_eq!(" monthly ".parse::<ViewMode>(), Ok(ViewMode::Month));
        assert_eq!("y".parse::<ViewMode>(), Ok(ViewMode::Year));
        assert!("decade".parse::<ViewMode>().is_err());
    }

    #[test]
    fn view_mode_serializes_lowercase() {
        let json = serde_json::to_string(&ViewMode::Year).unwrap();
        assert_eq!(json, "\"year\"");
    }
}
