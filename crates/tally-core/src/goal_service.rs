use chrono::NaiveDate;

use tally_domain::Goal;

use crate::CoreError;

pub struct GoalService;

impl GoalService {
    /// Parses a deadline in `YYYY-MM-DD` form.
    pub fn parse_deadline(input: &str) -> Result<NaiveDate, CoreError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(CoreError::validation("deadline is required"));
        }
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| {
            CoreError::validation(format!("invalid deadline `{trimmed}` (use YYYY-MM-DD)"))
        })
    }

    pub fn create(amount: f64, deadline: NaiveDate) -> Result<Goal, CoreError> {
        let goal = Goal::new(amount, deadline);
        if !goal.is_valid() {
            return Err(CoreError::validation("goal amount must be a positive number"));
        }
        Ok(goal)
    }

    /// New deadlines may be today or later. Stored or remote goals are not
    /// checked, so an existing goal can still become overdue.
    pub fn ensure_not_past(deadline: NaiveDate, today: NaiveDate) -> Result<(), CoreError> {
        if deadline < today {
            return Err(CoreError::validation(format!(
                "deadline {deadline} is in the past"
            )));
        }
        Ok(())
    }

    /// Validates raw form input and builds the goal.
    pub fn from_input(amount: f64, deadline: &str) -> Result<Goal, CoreError> {
        let deadline = Self::parse_deadline(deadline)?;
        Self::create(amount, deadline)
    }
}
