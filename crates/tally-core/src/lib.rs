//! tally-core
//!
//! Business logic and services for the income tracker.
//! Depends on tally-domain. No CLI, no terminal I/O, no direct filesystem access.

pub mod aggregation_service;
pub mod error;
pub mod goal_service;
pub mod labels;
pub mod progress_service;
pub mod remote;
pub mod storage;
pub mod time;
pub mod transaction_service;
pub mod user_service;

pub use aggregation_service::*;
pub use error::CoreError;
pub use goal_service::*;
pub use labels::CalendarLabels;
pub use progress_service::*;
pub use remote::{RemoteBackend, RemoteError, RemoteUser, TransactionDraft};
pub use storage::{KeyValueStore, MemoryStore};
pub use time::{Clock, FixedClock};
pub use transaction_service::*;
pub use user_service::*;
