use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandRegistry};

pub fn print_overview(registry: &CommandRegistry) {
    output::section("Available commands");
    for entry in registry.list() {
        let marker = if entry.requires_login { "*" } else { " " };
        output::plain(format!("  {:<10}{} {}", entry.name, marker, entry.description));
    }
    output::hint("Commands marked * need a signed-in user. Use `help <command>` for details.");
}

pub fn print_command(entry: &CommandEntry) {
    output::section(format!("Help: {}", entry.name));
    output::plain(format!("  Description: {}", entry.description));
    output::plain(format!("  Usage: {}", entry.usage));
    if entry.requires_login {
        output::plain("  Requires: signed-in user");
    }
}
