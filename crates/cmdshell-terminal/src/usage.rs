//! Recover structured command metadata from a handler's help text.
//!
//! The parser relies on the exact layout produced by
//! [`HelpDoc::render`](crate::args::HelpDoc::render). Any missing delimiter
//! fails the whole parse; a partial [`CommandInfo`] is never returned.

use crate::args::{CommandError, HELP_FLAG_USAGE, HELP_SENTINEL, HelpDoc};
use crate::registry::WrappedHandler;

const NAME_DELIMITER: &str = " -- ";
const USAGE_DELIMITER: &str = "Usage: ";
/// The options header only counts at the start of a line.
const OPTIONS_HEADER: &str = "\nOptions:";
const OPTIONS_DELIMITER: &str = "Options:\n";

/// Name, description, usage, and user-facing option lines of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInfo {
    pub name: String,
    pub description: String,
    pub usage: String,
    /// Option lines, excluding the universal help flag.
    pub options: Vec<String>,
}

impl From<&HelpDoc> for CommandInfo {
    fn from(doc: &HelpDoc) -> Self {
        Self {
            name: doc.name.clone(),
            description: doc.description.clone(),
            usage: doc.usage.clone(),
            options: doc
                .options
                .iter()
                .filter(|o| !o.builtin)
                .map(|o| o.line.clone())
                .collect(),
        }
    }
}

/// Why help text could not be turned into a [`CommandInfo`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseFailure {
    #[error("handler did not answer the help request")]
    NotHelp,

    #[error("help text has no {0:?} delimiter")]
    MissingDelimiter(&'static str),
}

/// Ask `handler` for its help text and parse it.
pub fn extract_info(handler: &WrappedHandler) -> Result<CommandInfo, ParseFailure> {
    match handler.call(&[HELP_SENTINEL.to_string()]) {
        Err(CommandError::HelpRequested(text)) => parse_help_text(&text),
        _ => Err(ParseFailure::NotHelp),
    }
}

/// Parse help text in the fixed layout.
pub fn parse_help_text(text: &str) -> Result<CommandInfo, ParseFailure> {
    let (name, rest) = text
        .split_once(NAME_DELIMITER)
        .ok_or(ParseFailure::MissingDelimiter(NAME_DELIMITER))?;
    let (description, rest) = rest
        .split_once(USAGE_DELIMITER)
        .ok_or(ParseFailure::MissingDelimiter(USAGE_DELIMITER))?;

    let (usage, options) = match rest.find(OPTIONS_HEADER) {
        Some(at) => {
            let block = rest[at + 1..]
                .strip_prefix(OPTIONS_DELIMITER)
                .ok_or(ParseFailure::MissingDelimiter(OPTIONS_DELIMITER))?;
            (&rest[..at], parse_option_lines(block))
        },
        None => (rest, Vec::new()),
    };

    Ok(CommandInfo {
        name: name.trim().to_string(),
        description: description.trim().to_string(),
        usage: usage.trim().to_string(),
        options,
    })
}

/// Trimmed, non-blank option lines, minus the universal help flag.
fn parse_option_lines(block: &str) -> Vec<String> {
    block
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(HELP_FLAG_USAGE))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use proptest::prelude::*;

    use super::*;
    use crate::args::{ArgKind, Params};
    use crate::registry::command_fn;

    fn handler(name: &str, description: &str, params: Params) -> WrappedHandler {
        WrappedHandler::wrap(
            name,
            description,
            Arc::new(command_fn(params, |_| Ok(String::new()))),
        )
    }

    #[test]
    fn extracts_command_without_options() {
        let h = handler("hello", "say hi", Params::new().positional("whom", ArgKind::Str));
        let info = extract_info(&h).unwrap();
        assert_eq!(
            info,
            CommandInfo {
                name: "hello".into(),
                description: "say hi".into(),
                usage: "hello <whom>".into(),
                options: vec![],
            }
        );
    }

    #[test]
    fn extracts_options_without_help_flag() {
        let params = Params::new()
            .positional("a", ArgKind::Str)
            .flag("reverse", "reverse the order")
            .option("times", "repeat count", ArgKind::Int, "1");
        let info = extract_info(&handler("concat", "join", params)).unwrap();
        assert_eq!(info.usage, "concat <a> [--reverse] [--times <int>]");
        assert_eq!(
            info.options,
            vec![
                "--reverse  reverse the order (bool, default: false)".to_string(),
                "--times  repeat count (int, default: 1)".to_string(),
            ]
        );
    }

    #[test]
    fn missing_name_delimiter_fails() {
        assert_eq!(
            parse_help_text("hello\nUsage: hello"),
            Err(ParseFailure::MissingDelimiter(" -- "))
        );
    }

    #[test]
    fn missing_usage_delimiter_fails() {
        assert_eq!(
            parse_help_text("hello -- say hi\nhello <whom>"),
            Err(ParseFailure::MissingDelimiter("Usage: "))
        );
    }

    #[test]
    fn options_header_without_newline_fails() {
        assert_eq!(
            parse_help_text("x -- y\nUsage: x\nOptions:"),
            Err(ParseFailure::MissingDelimiter("Options:\n"))
        );
        assert_eq!(
            parse_help_text("x -- y\nUsage: x\nOptions: --a"),
            Err(ParseFailure::MissingDelimiter("Options:\n"))
        );
    }

    #[test]
    fn options_text_inside_usage_is_not_a_header() {
        let h = handler("tag", "label", Params::new().positional("Options:", ArgKind::Str));
        let info = extract_info(&h).unwrap();
        assert_eq!(info.usage, "tag <Options:>");
        assert!(info.options.is_empty());
        assert_eq!(info, CommandInfo::from(&h.help_doc()));

        let h = handler(
            "tag",
            "label",
            Params::new()
                .positional("Options:", ArgKind::Str)
                .flag("loud", "shout"),
        );
        let info = extract_info(&h).unwrap();
        assert_eq!(info.usage, "tag <Options:> [--loud]");
        assert_eq!(info.options, vec!["--loud  shout (bool, default: false)"]);
    }

    #[test]
    fn dashes_inside_name_are_kept() {
        let h = handler("foo--bar", "do it", Params::new());
        let info = extract_info(&h).unwrap();
        assert_eq!(info.name, "foo--bar");
        assert_eq!(info.description, "do it");
        assert_eq!(info.usage, "foo--bar");
    }

    #[test]
    fn blank_option_lines_are_dropped() {
        let info = parse_help_text(
            "x -- y\nUsage: x\nOptions:\n\n   --a  thing (bool, default: false)   \n\n  -h, --help  show this help text\n",
        )
        .unwrap();
        assert_eq!(info.options, vec!["--a  thing (bool, default: false)"]);
    }

    #[test]
    fn failure_display() {
        assert_eq!(
            ParseFailure::NotHelp.to_string(),
            "handler did not answer the help request"
        );
        assert_eq!(
            ParseFailure::MissingDelimiter("Usage: ").to_string(),
            "help text has no \"Usage: \" delimiter"
        );
    }

    #[test]
    fn structured_and_parsed_agree() {
        let params = Params::new()
            .positional("a", ArgKind::Str)
            .positional("b", ArgKind::Str)
            .flag("reverse", "reverse the order");
        let h = handler("concat", "join two strings", params);
        assert_eq!(extract_info(&h).unwrap(), CommandInfo::from(&h.help_doc()));
    }

    proptest! {
        #[test]
        fn help_text_round_trips(
            name in "[a-z][a-z0-9_]{0,11}",
            description in "[a-z]([a-z ]{0,20}[a-z])?",
            positionals in proptest::collection::vec("[a-z]{1,8}", 0..4),
            flags in proptest::collection::vec(("[a-z]{2,8}", "[a-z]([a-z ]{0,12}[a-z])?"), 0..4),
        ) {
            prop_assume!(name != "help");
            let mut params = Params::new();
            for p in &positionals {
                params = params.positional(p, ArgKind::Str);
            }
            for (flag, desc) in &flags {
                params = params.flag(flag, desc);
            }
            let h = handler(&name, &description, params);
            let info = extract_info(&h).unwrap();
            prop_assert_eq!(&info, &CommandInfo::from(&h.help_doc()));
            prop_assert_eq!(info.options.len(), flags.len());
        }
    }
}
