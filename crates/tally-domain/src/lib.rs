//! tally-domain
//!
//! Pure domain models (Transaction, Goal, User, ViewMode).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod common;
pub mod goal;
pub mod transaction;
pub mod user;

pub use common::*;
pub use goal::*;
pub use transaction::*;
pub use user::*;
