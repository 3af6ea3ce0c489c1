//! Savings goal value object.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::common::Amounted;

/// An income target with a calendar deadline.
///
/// The deadline carries no time component and serializes as `YYYY-MM-DD`,
/// so reloading it never drifts across time zones.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Goal {
    pub amount: f64,
    pub deadline: NaiveDate,
}

impl Goal {
    pub fn new(amount: f64, deadline: NaiveDate) -> Self {
        Self { amount, deadline }
    }

    /// Whether the stored value still satisfies the `amount > 0` invariant.
    pub fn is_valid(&self) -> bool {
        self.amount.is_finite() && self.amount > 0.0
    }
}

impl Amounted for Goal {
    fn amount(&self) -> f64 {
        self.amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deadline_serializes_as_iso_date() {
        let goal = Goal::new(5000.0, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
        let json = serde_json::to_string(&goal).unwrap();
        assert_eq!(json, r#"{"amount":5000.0,"deadline":"2025-12-31"}"#);
    }

    #[test]
    fn non_positive_amount_is_invalid() {
        let deadline = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        assert!(!Goal::new(0.0, deadline).is_valid());
        assert!(!Goal::new(f64::NAN, deadline).is_valid());
        assert!(Goal::new(0.01, deadline).is_valid());
    }
}
