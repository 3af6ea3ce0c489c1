//! Optional remote backend contract.
//!
//! Every call is a best-effort enhancement over local state: callers apply
//! changes locally first and only overwrite them with what the remote returns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use tally_domain::{Goal, Transaction};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RemoteError {
    #[error("remote backend unavailable: {0}")]
    Unavailable(String),
    #[error("remote backend rejected the request: {0}")]
    Rejected(String),
    #[error("remote backend has no matching record")]
    NotFound,
}

/// A user as the remote backend knows it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RemoteUser {
    pub id: Uuid,
    pub name: String,
    pub username: String,
}

/// Fields sent when asking the remote to record income.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionDraft {
    pub description: String,
    pub amount: f64,
    pub date: DateTime<Utc>,
}

impl From<&Transaction> for TransactionDraft {
    fn from(txn: &Transaction) -> Self {
        Self {
            description: txn.description.clone(),
            amount: txn.amount,
            date: txn.date,
        }
    }
}

/// Profile fields that may be changed remotely.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub username: Option<String>,
}

pub trait RemoteBackend: Send + Sync {
    fn get_user(&self, username: &str) -> Result<RemoteUser, RemoteError>;
    fn create_user(&self, name: &str, username: &str) -> Result<RemoteUser, RemoteError>;
    fn update_user(&self, id: Uuid, fields: &UserUpdate) -> Result<RemoteUser, RemoteError>;
    fn get_transactions(&self, user_id: Uuid) -> Result<Vec<Transaction>, RemoteError>;
    fn add_transaction(
        &self,
        user_id: Uuid,
        draft: &TransactionDraft,
    ) -> Result<Transaction, RemoteError>;
    fn delete_transaction(&self, id: Uuid) -> Result<bool, RemoteError>;
    fn get_goal(&self, user_id: Uuid) -> Result<Option<Goal>, RemoteError>;
    fn set_goal(&self, user_id: Uuid, goal: &Goal) -> Result<Goal, RemoteError>;
}
