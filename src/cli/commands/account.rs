use tally_core::ProfileUpdate;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io as cli_io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "register",
            "Create an account and sign in",
            "register <name> <username> <password>",
            cmd_register,
        ),
        CommandEntry::new(
            "login",
            "Sign in to an existing account",
            "login <username> <password>",
            cmd_login,
        ),
        CommandEntry::new("logout", "Sign out", "logout", cmd_logout),
        CommandEntry::new(
            "profile",
            "Show or edit the signed-in profile",
            "profile [show|edit <name> <username> [<new-password> <confirm>]]",
            cmd_profile,
        )
        .signed_in(),
    ]
}

fn cmd_register(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (name, username, password) = match args {
        [name_parts @ .., username, password] if !name_parts.is_empty() => {
            (name_parts.join(" "), username.to_string(), password.to_string())
        }
        [] if context.can_prompt() => (
            cli_io::prompt_text(&context.theme, "Name")?,
            cli_io::prompt_text(&context.theme, "Username (email)")?,
            cli_io::prompt_password(&context.theme, "Password")?,
        ),
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: register <name> <username> <password>".into(),
            ))
        }
    };

    let profile = context.state.register(&name, &username, &password)?;
    cli_io::print_success(format!(
        "Welcome, {}! Signed in as {}.",
        profile.first_name(),
        profile.username
    ));
    Ok(())
}

fn cmd_login(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (username, password) = match args {
        [username, password] => (username.to_string(), password.to_string()),
        [] if context.can_prompt() => (
            cli_io::prompt_text(&context.theme, "Username")?,
            cli_io::prompt_password(&context.theme, "Password")?,
        ),
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: login <username> <password>".into(),
            ))
        }
    };

    let profile = context.state.login(&username, &password)?;
    cli_io::print_success(format!("Signed in as {}.", profile.username));
    Ok(())
}

fn cmd_logout(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.state.current_user().is_none() {
        cli_io::print_info("No user is signed in.");
        return Ok(());
    }
    context.state.logout();
    cli_io::print_success("Signed out.");
    Ok(())
}

fn cmd_profile(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first().map(|action| action.to_lowercase()).as_deref() {
        None | Some("show") => show_profile(context),
        Some("edit") => edit_profile(context, &args[1..]),
        Some(other) => Err(CommandError::InvalidArguments(format!(
            "unknown profile subcommand `{}`",
            other
        ))),
    }
}

fn show_profile(context: &ShellContext) -> CommandResult {
    let profile = context.state.require_user()?;
    output::section("Profile");
    output::plain(format!("  Name:     {}", profile.name));
    output::plain(format!("  Username: {}", profile.username));
    Ok(())
}

fn edit_profile(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let update = match args {
        [name, username] => ProfileUpdate {
            name: name.to_string(),
            username: username.to_string(),
            ..ProfileUpdate::default()
        },
        [name, username, new_password, confirm_password] => ProfileUpdate {
            name: name.to_string(),
            username: username.to_string(),
            new_password: new_password.to_string(),
            confirm_password: confirm_password.to_string(),
        },
        [] if context.can_prompt() => prompt_profile_update(context)?,
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: profile edit <name> <username> [<new-password> <confirm>]".into(),
            ))
        }
    };

    let profile = context.state.update_profile(&update)?;
    cli_io::print_success(format!("Profile updated for {}.", profile.username));
    Ok(())
}

fn prompt_profile_update(context: &ShellContext) -> Result<ProfileUpdate, CommandError> {
    let current = context.state.require_user()?;
    Ok(ProfileUpdate {
        name: cli_io::prompt_text_with_default(&context.theme, "Name", &current.name)?,
        username: cli_io::prompt_text_with_default(
            &context.theme,
            "Username",
            &current.username,
        )?,
        new_password: cli_io::prompt_password(
            &context.theme,
            "New password (leave blank to keep)",
        )?,
        confirm_password: cli_io::prompt_password(&context.theme, "Confirm new password")?,
    })
}
