//! Validated mutations over the in-memory transaction list.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use tally_domain::{sum_amounts, Transaction};

use crate::CoreError;

/// Provides validated mutations for [`Transaction`] records.
pub struct TransactionService;

impl TransactionService {
    /// Checks user input for a new record and returns the trimmed description.
    pub fn validate(description: &str, amount: f64) -> Result<String, CoreError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(CoreError::validation("description is required"));
        }
        if !amount.is_finite() || amount <= 0.0 {
            return Err(CoreError::validation(
                "amount must be a positive number",
            ));
        }
        Ok(description.to_string())
    }

    /// Appends a new record stamped with `recorded_at`. On a validation error
    /// the list is left untouched.
    pub fn add(
        transactions: &mut Vec<Transaction>,
        description: &str,
        amount: f64,
        recorded_at: DateTime<Utc>,
    ) -> Result<Transaction, CoreError> {
        let description = Self::validate(description, amount)?;
        let transaction = Transaction::new(description, amount, recorded_at);
        transactions.push(transaction.clone());
        Ok(transaction)
    }

    /// Removes the record with `id`, returning it when it existed.
    pub fn remove(transactions: &mut Vec<Transaction>, id: Uuid) -> Option<Transaction> {
        let index = transactions.iter().position(|txn| txn.id == id)?;
        Some(transactions.remove(index))
    }

    /// Swaps the record with `id` for `replacement`, keeping its position.
    pub fn replace(
        transactions: &mut [Transaction],
        id: Uuid,
        replacement: Transaction,
    ) -> bool {
        match transactions.iter_mut().find(|txn| txn.id == id) {
            Some(slot) => {
                *slot = replacement;
                true
            }
            None => false,
        }
    }

    /// Records sorted by date, newest first.
    pub fn newest_first(transactions: &[Transaction]) -> Vec<&Transaction> {
        let mut sorted: Vec<&Transaction> = transactions.iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted
    }

    pub fn total(transactions: &[Transaction]) -> f64 {
        sum_amounts(transactions)
    }
}
