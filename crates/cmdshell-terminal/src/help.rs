//! Brief and detailed help rendering.

use crate::registry::HELP_COMMAND;
use crate::usage::CommandInfo;

/// Description shown for the built-in `help` command.
pub const HELP_DESCRIPTION: &str = "show command help";

/// Usage shown for the built-in `help` command.
pub const HELP_USAGE: &str = "help [command]";

/// Metadata for the built-in `help` command, which has no handler.
pub fn help_command_info() -> CommandInfo {
    CommandInfo {
        name: HELP_COMMAND.to_string(),
        description: HELP_DESCRIPTION.to_string(),
        usage: HELP_USAGE.to_string(),
        options: Vec::new(),
    }
}

/// `<name> -- <description> -- usage: <usage>`
pub fn brief_line(info: &CommandInfo) -> String {
    format!(
        "{} -- {} -- usage: {}",
        info.name, info.description, info.usage
    )
}

/// One line per command, in the order given, then the `help` line.
pub fn render_brief(infos: &[CommandInfo]) -> String {
    let help = help_command_info();
    infos
        .iter()
        .chain(std::iter::once(&help))
        .map(brief_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Multi-line block for a single command.
pub fn render_detailed(info: &CommandInfo) -> String {
    let mut out = format!("{} -- {}\nUsage: {}", info.name, info.description, info.usage);
    if !info.options.is_empty() {
        out.push_str("\nOptions:\n");
        let lines: Vec<String> = info.options.iter().map(|o| format!("  {o}")).collect();
        out.push_str(&lines.join("\n"));
    }
    out
}
