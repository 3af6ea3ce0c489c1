use chrono::{Datelike, NaiveDate};
use tally_core::Clock;

use crate::cli::commands::{dashboard::print_goal, parse_amount};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io as cli_io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "goal",
        "Show, set, or remove the income goal",
        "goal [show|set <amount> <YYYY-MM-DD>|remove]",
        cmd_goal,
    )
    .signed_in()]
}

fn cmd_goal(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first().map(|action| action.to_lowercase()).as_deref() {
        None | Some("show") => show_goal(context),
        Some("set") => set_goal(context, &args[1..]),
        Some("remove") | Some("clear") => remove_goal(context),
        Some(other) => Err(CommandError::InvalidArguments(format!(
            "unknown goal action `{}`; expected show, set, or remove",
            other
        ))),
    }
}

fn show_goal(context: &ShellContext) -> CommandResult {
    let dashboard = context.state.dashboard();
    match dashboard.goal {
        Some(summary) => {
            output::section("Goal");
            print_goal(&summary, &context.formatter);
        }
        None => {
            cli_io::print_info("No goal set.");
            output::hint("Use `goal set <amount> <YYYY-MM-DD>` to create one.");
        }
    }
    Ok(())
}

fn set_goal(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (amount, deadline) = match args {
        [amount, deadline] => (amount.to_string(), deadline.to_string()),
        [] if context.can_prompt() => {
            let amount = cli_io::prompt_text(&context.theme, "Target amount")?;
            let suggested = context
                .state
                .goal()
                .map(|goal| goal.deadline)
                .unwrap_or_else(|| year_end(context));
            let deadline = cli_io::prompt_text_with_default(
                &context.theme,
                "Deadline (YYYY-MM-DD)",
                &suggested.format("%Y-%m-%d").to_string(),
            )?;
            (amount, deadline)
        }
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: goal set <amount> <YYYY-MM-DD>".into(),
            ))
        }
    };

    let amount = parse_amount(&amount)?;
    let goal = context.state.set_goal_from_input(amount, deadline.trim())?;
    cli_io::print_success(format!(
        "Goal set: {} by {}.",
        context.formatter.format(goal.amount),
        context.formatter.format_date(goal.deadline)
    ));
    Ok(())
}

fn remove_goal(context: &mut ShellContext) -> CommandResult {
    match context.state.remove_goal() {
        Some(_) => cli_io::print_success("Goal removed."),
        None => cli_io::print_info("No goal set; nothing removed."),
    }
    Ok(())
}

fn year_end(context: &ShellContext) -> NaiveDate {
    let year = context.state.clock().now().year();
    NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(NaiveDate::MAX)
}
