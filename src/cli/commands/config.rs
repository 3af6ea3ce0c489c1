use tally_config::{ConfigError, ConfigKey};

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io as cli_io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change display preferences",
        "config [show|set <locale|currency|precision|view|color> <value>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => show_config(context),
        [action] if action.eq_ignore_ascii_case("show") => show_config(context),
        [action, key, value @ ..] if action.eq_ignore_ascii_case("set") && !value.is_empty() => {
            set_config_value(context, key, &value.join(" "))
        }
        _ => Err(CommandError::InvalidArguments(
            "usage: config [show|set <key> <value>]".into(),
        )),
    }
}

fn show_config(context: &ShellContext) -> CommandResult {
    let config = &context.config;
    let precision = config
        .currency_precision
        .map(|digits| digits.to_string())
        .unwrap_or_else(|| "auto".into());
    let color = if config.ui_color_enabled { "on" } else { "off" };

    output::section("Configuration");
    for (key, value) in [
        (ConfigKey::Locale, config.locale.clone()),
        (ConfigKey::Currency, config.currency.clone()),
        (ConfigKey::Precision, precision),
        (ConfigKey::View, config.default_view_mode.to_string()),
        (ConfigKey::Color, color.to_string()),
    ] {
        output::plain(format!("  {:<10} {}", key.as_str(), value));
    }
    output::plain(format!(
        "  {:<10} {}",
        "file",
        context.config_manager.config_path().display()
    ));
    Ok(())
}

fn set_config_value(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let key: ConfigKey = key.parse().map_err(invalid_setting)?;
    context.config.set(key, value).map_err(invalid_setting)?;
    if key == ConfigKey::View {
        context.state.set_view_mode(context.config.default_view_mode);
    }
    context.persist_config()?;
    cli_io::print_success(format!("Set {} = {}.", key, value.trim()));
    Ok(())
}

fn invalid_setting(err: ConfigError) -> CommandError {
    match err {
        ConfigError::UnknownKey(key) => CommandError::InvalidArguments(format!(
            "unknown setting `{}`; expected one of: {}",
            key,
            ConfigKey::ALL.map(ConfigKey::as_str).join(", ")
        )),
        ConfigError::InvalidValue { .. } => CommandError::InvalidArguments(err.to_string()),
        other => CommandError::Config(other),
    }
}
