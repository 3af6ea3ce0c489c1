use chrono::TimeZone;

use tally_core::{Aggregate, GoalProgress, GoalStatus};
use tally_domain::Goal;

/// Goal paired with its progress at snapshot time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalSummary {
    pub goal: Goal,
    pub progress: GoalProgress,
}

impl GoalSummary {
    pub fn status(&self) -> GoalStatus {
        self.progress.status()
    }
}

/// Everything the presentation layer needs to draw one dashboard frame.
#[derive(Debug, Clone)]
pub struct Dashboard<Tz: TimeZone> {
    pub aggregate: Aggregate<Tz>,
    /// Sum of every recorded transaction, regardless of the active window.
    pub total_income: f64,
    pub goal: Option<GoalSummary>,
}
