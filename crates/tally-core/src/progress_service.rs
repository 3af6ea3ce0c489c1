use chrono::{DateTime, TimeZone};

use tally_domain::Goal;

/// How a goal should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalStatus {
    InProgress,
    Reached,
    Overdue,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalProgress {
    /// Percent complete in `[0, 100]`.
    pub percent: f64,
    pub remaining: f64,
    pub expired: bool,
}

impl GoalProgress {
    pub fn status(&self) -> GoalStatus {
        if self.percent >= 100.0 {
            GoalStatus::Reached
        } else if self.expired {
            GoalStatus::Overdue
        } else {
            GoalStatus::InProgress
        }
    }
}

pub struct ProgressService;

impl ProgressService {
    /// Progress of `total_income` toward `goal` as seen at `now`.
    ///
    /// The deadline day counts in full: a goal expires once the local date of
    /// `now` is past it.
    pub fn progress<Tz: TimeZone>(
        goal: &Goal,
        total_income: f64,
        now: &DateTime<Tz>,
    ) -> GoalProgress {
        let percent = if goal.amount > 0.0 {
            (total_income / goal.amount * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };
        let remaining = (goal.amount - total_income).max(0.0);
        let expired = now.date_naive() > goal.deadline;
        GoalProgress {
            percent,
            remaining,
            expired,
        }
    }
}
