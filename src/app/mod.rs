//! Session state and the operations the shell invokes on it.

pub mod dashboard;
pub mod state;
pub mod system_clock;

pub use dashboard::{Dashboard, GoalSummary};
pub use state::AppState;
pub use system_clock::SystemClock;
