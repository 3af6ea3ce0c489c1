use chrono::Local;
use uuid::Uuid;

use crate::cli::commands::{parse_amount, short_id};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io as cli_io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "add",
            "Record income received now",
            "add <amount> <description>",
            cmd_add,
        )
        .signed_in(),
        CommandEntry::new(
            "list",
            "List recorded income, newest first",
            "list",
            cmd_list,
        )
        .signed_in(),
        CommandEntry::new(
            "delete",
            "Delete an income record by id or id prefix",
            "delete <id>",
            cmd_delete,
        )
        .signed_in(),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (amount, description) = match args {
        [amount, description @ ..] if !description.is_empty() => {
            (amount.to_string(), description.join(" "))
        }
        [] if context.can_prompt() => (
            cli_io::prompt_text(&context.theme, "Amount")?,
            cli_io::prompt_text(&context.theme, "Description")?,
        ),
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: add <amount> <description>".into(),
            ))
        }
    };

    let amount = parse_amount(&amount)?;
    let txn = context.state.add_transaction(&description, amount)?;
    cli_io::print_success(format!(
        "Recorded {} for \"{}\" ({}).",
        context.formatter.format(txn.amount),
        txn.description,
        short_id(txn.id)
    ));
    Ok(())
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let transactions = context.state.transactions_newest_first();
    if transactions.is_empty() {
        cli_io::print_info("No income recorded yet.");
        return Ok(());
    }

    let formatter = &context.formatter;
    output::section("Income");
    for txn in &transactions {
        let day = txn.date.with_timezone(&Local).date_naive();
        output::plain(format!(
            "  {}  {:<10}  {:<28} {:>14}",
            short_id(txn.id),
            formatter.format_date(day),
            txn.description,
            formatter.format(txn.amount)
        ));
    }
    output::plain(format!(
        "  {} record(s), total {}",
        transactions.len(),
        formatter.format(context.state.total_income())
    ));
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [reference] = args else {
        return Err(CommandError::InvalidArguments("usage: delete <id>".into()));
    };

    let Some(id) = resolve_transaction(context, reference)? else {
        cli_io::print_info(format!("No income record matches `{}`; nothing deleted.", reference));
        return Ok(());
    };

    if context.state.delete_transaction(id) {
        cli_io::print_success(format!("Deleted income record {}.", short_id(id)));
    } else {
        cli_io::print_info(format!("No income record matches `{}`; nothing deleted.", reference));
    }
    Ok(())
}

/// Matches a full id or a unique prefix of its hyphen-free form.
fn resolve_transaction(
    context: &ShellContext,
    reference: &str,
) -> Result<Option<Uuid>, CommandError> {
    if let Ok(id) = Uuid::parse_str(reference) {
        return Ok(Some(id));
    }
    let needle = reference.trim().replace('-', "").to_ascii_lowercase();
    if needle.is_empty() {
        return Ok(None);
    }
    let matches: Vec<Uuid> = context
        .state
        .transactions()
        .iter()
        .map(|txn| txn.id)
        .filter(|id| id.simple().to_string().starts_with(&needle))
        .collect();
    match matches.as_slice() {
        [] => Ok(None),
        [id] => Ok(Some(*id)),
        _ => Err(CommandError::InvalidArguments(format!(
            "`{}` matches {} records; type more of the id",
            reference,
            matches.len()
        ))),
    }
}
