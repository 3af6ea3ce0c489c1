//! Domain model for recorded income.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::Amounted;

/// A single income record. Records are immutable once created; a remote
/// reconciliation replaces the whole value rather than editing it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub description: String,
    pub amount: f64,
    pub date: DateTime<Utc>,
}

impl Transaction {
    pub fn new(description: impl Into<String>, amount: f64, date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            amount,
            date,
        }
    }
}

impl Amounted for Transaction {
    fn amount(&self) -> f64 {
        self.amount
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::common::sum_amounts;

    #[test]
    fn new_transactions_receive_distinct_ids() {
        let date = Utc.with_ymd_and_hms(2025, 3, 4, 10, 0, 0).unwrap();
        let first = Transaction::new("Salary", 5000.0, date);
        let second = Transaction::new("Salary", 5000.0, date);

        assert_ne!(first.id, second.id);
    }

    #[test]
    fn transaction_round_trips_through_json_with_rfc3339_date() {
        let date = Utc.with_ymd_and_hms(2025, 3, 4, 10, 0, 0).unwrap();
        let txn = Transaction::new("Freelance", 750.0, date);

        let json = serde_json::to_string(&txn).unwrap();
        assert!(json.contains("2025-03-04T10:00:00Z"));
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, txn);
    }

    #[test]
    fn sum_amounts_adds_every_record() {
        let date = Utc.with_ymd_and_hms(2025, 3, 4, 10, 0, 0).unwrap();
        let txns = vec![
            Transaction::new("a", 10.5, date),
            Transaction::new("b", 4.5, date),
        ];
        assert_eq!(sum_amounts(&txns), 15.0);
    }
}
