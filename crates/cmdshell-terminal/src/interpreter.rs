//! Line evaluation: tokenize, route to `help` or a registered command, and
//! turn every outcome into a display string.

use crate::args::{CommandError, CommandOutcome};
use crate::help::{render_brief, render_detailed};
use crate::registry::{Environment, HELP_COMMAND};
use crate::usage::{ParseFailure, extract_info};

/// Hint appended to messages that leave the user stuck.
pub const HELP_HINT: &str = "type 'help' to list available commands";

/// Shown for a blank line.
pub const NO_COMMAND: &str = "no command given";

/// Shown when a handler's help text does not match the expected layout.
pub const PARSE_FAILURE: &str = "cannot parse help text";

/// Shown when a handler returns a help request to a normal invocation.
pub const UNEXPECTED_ERROR: &str = "ERROR: unexpected error";

/// Split a line on runs of whitespace, dropping empty tokens.
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

/// Evaluate one command line against `env`.
///
/// Never fails: unknown commands, argument errors, and command failures
/// all come back as display strings.
pub fn evaluate(line: &str, env: &Environment) -> String {
    let tokens = tokenize(line);
    match tokens.as_slice() {
        [] => format!("{NO_COMMAND} ({HELP_HINT})"),
        [HELP_COMMAND] | [HELP_COMMAND, HELP_COMMAND] => brief_help(env),
        [HELP_COMMAND, name] => detailed_help(env, name),
        [name, args @ ..] => dispatch(env, name, args),
    }
}

/// Map a handler outcome to the string shown to the user.
pub fn render_outcome(outcome: CommandOutcome) -> String {
    match outcome {
        Ok(output) => output,
        Err(CommandError::HelpRequested(_)) => UNEXPECTED_ERROR.to_string(),
        Err(
            e @ (CommandError::MalformedArgument { .. }
            | CommandError::MissingArgument(_)
            | CommandError::CommandFailed(_)),
        ) => format!("ERROR: {e}"),
    }
}

fn dispatch(env: &Environment, name: &str, args: &[&str]) -> String {
    let Some(handler) = env.get(name) else {
        log::debug!("Unknown command {name}");
        return format!("command not found ({name})\n{HELP_HINT}");
    };
    log::debug!("Dispatching {name} with {} argument(s)", args.len());
    let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
    render_outcome(handler.call(&args))
}

/// One line per registered command, sorted by name, then the `help` line.
///
/// The sort is a presentation choice; callers should not depend on the
/// order of this listing.
fn brief_help(env: &Environment) -> String {
    let mut infos = Vec::with_capacity(env.len());
    for handler in env.handlers() {
        match extract_info(handler) {
            Ok(info) => infos.push(info),
            Err(e) => return parse_failure(handler.name(), &e),
        }
    }
    infos.sort_by(|a, b| a.name.cmp(&b.name));
    render_brief(&infos)
}

fn detailed_help(env: &Environment, name: &str) -> String {
    let Some(handler) = env.get(name) else {
        return format!("command not found ({name})");
    };
    match extract_info(handler) {
        Ok(info) => render_detailed(&info),
        Err(e) => parse_failure(name, &e),
    }
}

fn parse_failure(name: &str, error: &ParseFailure) -> String {
    log::warn!("Help text of {name} is not parseable: {error}");
    PARSE_FAILURE.to_string()
}
