use tally_core::GoalStatus;
use tally_domain::ViewMode;

use crate::app::GoalSummary;
use crate::cli::chart;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io as cli_io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::currency::CurrencyFormatter;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "dashboard",
            "Show totals, the chart, and goal progress",
            "dashboard",
            cmd_dashboard,
        )
        .signed_in(),
        CommandEntry::new(
            "view",
            "Switch the dashboard window",
            "view [week|month|year]",
            cmd_view,
        )
        .signed_in(),
    ]
}

fn cmd_dashboard(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    render(context);
    Ok(())
}

fn cmd_view(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            cli_io::print_info(format!(
                "Current view: {}. Options: week, month, year.",
                context.state.view_mode()
            ));
            Ok(())
        }
        [mode] => {
            let mode: ViewMode = mode
                .parse()
                .map_err(|err| CommandError::InvalidArguments(format!("{}", err)))?;
            context.state.set_view_mode(mode);
            render(context);
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments(
            "usage: view [week|month|year]".into(),
        )),
    }
}

fn render(context: &ShellContext) {
    let dashboard = context.state.dashboard();
    let formatter = &context.formatter;
    let first_name = context
        .state
        .current_user()
        .map(|profile| profile.first_name().to_string())
        .unwrap_or_default();

    output::section(format!("Hello, {}", first_name));
    output::plain(format!(
        "Total earned this {}: {}",
        dashboard.aggregate.view_mode,
        formatter.format(dashboard.aggregate.total)
    ));
    output::plain(format!(
        "All-time income: {}",
        formatter.format(dashboard.total_income)
    ));

    output::section(format!("Income by {}", bucket_noun(dashboard.aggregate.view_mode)));
    for line in chart::bucket_lines(&dashboard.aggregate.buckets, formatter) {
        output::plain(line);
    }

    match dashboard.goal {
        Some(summary) => {
            output::section("Goal");
            print_goal(&summary, formatter);
        }
        None => output::hint("No goal yet. Use `goal set <amount> <YYYY-MM-DD>`."),
    }
}

fn bucket_noun(mode: ViewMode) -> &'static str {
    match mode {
        ViewMode::Week => "day",
        ViewMode::Month => "day of month",
        ViewMode::Year => "month",
    }
}

/// Goal panel. The last line turns into a warning once the deadline passes
/// and a success line once the target is met.
pub(crate) fn print_goal(summary: &GoalSummary, formatter: &CurrencyFormatter) {
    let mut lines = chart::goal_lines(summary, formatter);
    let last = lines.pop();
    for line in lines {
        output::plain(line);
    }
    if let Some(last) = last {
        match summary.status() {
            GoalStatus::Reached => output::success(last),
            GoalStatus::Overdue => output::warning(last),
            GoalStatus::InProgress => output::plain(last),
        }
    }
}
