//! Declarative argument contract shared by every command.
//!
//! A command declares its positional parameters and `--flag` options with
//! [`Params`]. The same declaration drives three things: parsing raw tokens
//! into typed [`Args`], the structured [`HelpDoc`] metadata, and the help
//! text rendered from that metadata.

use std::collections::HashMap;
use std::fmt;

/// The argument token that asks a command for its help text.
pub const HELP_SENTINEL: &str = "--help";

/// Short spelling of the help sentinel accepted by [`Params::parse`].
pub const HELP_SHORT: &str = "-h";

/// Leading text of the universal help option line.
pub const HELP_FLAG_USAGE: &str = "-h, --help";

const HELP_FLAG_DESCRIPTION: &str = "show this help text";

/// Every way a command invocation can fail.
///
/// Together with `Ok(String)` this forms the closed set of outcomes the
/// evaluator maps to display strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// The invocation asked for help; carries the rendered help text.
    #[error("help requested")]
    HelpRequested(String),

    #[error("{param} is malformed ({value})")]
    MalformedArgument { param: String, value: String },

    #[error("{0} is missing")]
    MissingArgument(String),

    /// The command body (or the argument layer) rejected the invocation.
    #[error("command failed ({0})")]
    CommandFailed(String),
}

impl CommandError {
    /// Shorthand for a [`CommandError::MalformedArgument`].
    pub fn malformed(param: &str, value: &str) -> Self {
        Self::MalformedArgument {
            param: param.to_string(),
            value: value.to_string(),
        }
    }

    /// Shorthand for a [`CommandError::CommandFailed`].
    pub fn failed(message: impl Into<String>) -> Self {
        Self::CommandFailed(message.into())
    }
}

/// Result of invoking a command handler.
pub type CommandOutcome = std::result::Result<String, CommandError>;

/// Value type of a declared parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    Str,
    Int,
    Bool,
}

impl ArgKind {
    /// Name shown in help text.
    pub fn label(self) -> &'static str {
        match self {
            ArgKind::Str => "string",
            ArgKind::Int => "int",
            ArgKind::Bool => "bool",
        }
    }

    fn parse(self, raw: &str) -> Option<Value> {
        match self {
            ArgKind::Str => Some(Value::Str(raw.to_string())),
            ArgKind::Int => raw.parse::<i64>().ok().map(Value::Int),
            ArgKind::Bool => match raw {
                "true" => Some(Value::Bool(true)),
                "false" => Some(Value::Bool(false)),
                _ => None,
            },
        }
    }
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Value {
    Str(String),
    Int(i64),
    Bool(bool),
}

#[derive(Debug, Clone)]
struct Positional {
    name: String,
    kind: ArgKind,
}

#[derive(Debug, Clone)]
struct OptionSpec {
    name: String,
    description: String,
    kind: ArgKind,
    default: String,
}

impl OptionSpec {
    fn help_line(&self) -> String {
        format!(
            "--{}  {} ({}, default: {})",
            self.name, self.description, self.kind, self.default
        )
    }

    fn usage_fragment(&self) -> String {
        match self.kind {
            ArgKind::Bool => format!("[--{}]", self.name),
            kind => format!("[--{} <{kind}>]", self.name),
        }
    }
}

/// Parameter declaration for one command.
#[derive(Debug, Clone, Default)]
pub struct Params {
    positionals: Vec<Positional>,
    options: Vec<OptionSpec>,
}

impl Params {
    /// A command that takes no arguments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a required positional parameter. Positionals are filled in
    /// declaration order.
    pub fn positional(mut self, name: &str, kind: ArgKind) -> Self {
        self.positionals.push(Positional {
            name: name.to_string(),
            kind,
        });
        self
    }

    /// Declare a boolean `--name` flag that defaults to `false`.
    pub fn flag(self, name: &str, description: &str) -> Self {
        self.option(name, description, ArgKind::Bool, "false")
    }

    /// Declare a typed `--name <value>` option with a default.
    ///
    /// Boolean options take no value token: their presence means `true`.
    pub fn option(
        mut self,
        name: &str,
        description: &str,
        kind: ArgKind,
        default: &str,
    ) -> Self {
        self.options.push(OptionSpec {
            name: name.to_string(),
            description: description.to_string(),
            kind,
            default: default.to_string(),
        });
        self
    }

    /// One-line usage, e.g. `concat <a> <b> [--reverse]`.
    pub fn usage(&self, command: &str) -> String {
        let mut out = command.to_string();
        for p in &self.positionals {
            out.push_str(&format!(" <{}>", p.name));
        }
        for o in &self.options {
            out.push(' ');
            out.push_str(&o.usage_fragment());
        }
        out
    }

    /// Structured help metadata for a command declared with these params.
    pub fn help_doc(&self, command: &str, description: &str) -> HelpDoc {
        let mut options: Vec<OptionDoc> = self
            .options
            .iter()
            .map(|o| OptionDoc {
                line: o.help_line(),
                builtin: false,
            })
            .collect();
        options.push(OptionDoc {
            line: format!("{HELP_FLAG_USAGE}  {HELP_FLAG_DESCRIPTION}"),
            builtin: true,
        });
        HelpDoc {
            name: command.to_string(),
            description: description.to_string(),
            usage: self.usage(command),
            options,
        }
    }

    /// Parse raw argument tokens.
    ///
    /// `--help` or `-h` anywhere short-circuits to
    /// [`CommandError::HelpRequested`] with the rendered help text.
    pub fn parse(
        &self,
        command: &str,
        description: &str,
        tokens: &[String],
    ) -> Result<Args, CommandError> {
        if tokens.iter().any(|t| t == HELP_SENTINEL || t == HELP_SHORT) {
            return Err(CommandError::HelpRequested(
                self.help_doc(command, description).render(),
            ));
        }

        let mut values = HashMap::new();
        for o in &self.options {
            let value = o
                .kind
                .parse(&o.default)
                .ok_or_else(|| CommandError::malformed(&o.name, &o.default))?;
            values.insert(o.name.clone(), value);
        }

        let mut free = Vec::new();
        let mut iter = tokens.iter();
        while let Some(token) = iter.next() {
            let Some(body) = token.strip_prefix("--") else {
                free.push(token);
                continue;
            };
            let (flag, inline) = match body.split_once('=') {
                Some((flag, value)) => (flag, Some(value)),
                None => (body, None),
            };
            let spec = self
                .options
                .iter()
                .find(|o| o.name == flag)
                .ok_or_else(|| CommandError::failed(format!("unknown option (--{flag})")))?;
            let raw = match (spec.kind, inline) {
                (_, Some(value)) => value.to_string(),
                (ArgKind::Bool, None) => "true".to_string(),
                (_, None) => iter
                    .next()
                    .cloned()
                    .ok_or_else(|| CommandError::MissingArgument(spec.name.clone()))?,
            };
            let value = spec
                .kind
                .parse(&raw)
                .ok_or_else(|| CommandError::malformed(&spec.name, &raw))?;
            values.insert(spec.name.clone(), value);
        }

        let mut free = free.into_iter();
        for p in &self.positionals {
            let raw = free
                .next()
                .ok_or_else(|| CommandError::MissingArgument(p.name.clone()))?;
            let value = p
                .kind
                .parse(raw)
                .ok_or_else(|| CommandError::malformed(&p.name, raw))?;
            values.insert(p.name.clone(), value);
        }
        if let Some(extra) = free.next() {
            return Err(CommandError::failed(format!("unexpected argument ({extra})")));
        }

        Ok(Args { values })
    }
}

/// Typed argument values produced by [`Params::parse`].
#[derive(Debug, Clone, Default)]
pub struct Args {
    values: HashMap<String, Value>,
}

impl Args {
    fn value(&self, name: &str) -> Result<&Value, CommandError> {
        self.values
            .get(name)
            .ok_or_else(|| CommandError::failed(format!("undeclared parameter ({name})")))
    }

    /// Value of a string parameter.
    pub fn string(&self, name: &str) -> Result<&str, CommandError> {
        match self.value(name)? {
            Value::Str(s) => Ok(s),
            _ => Err(CommandError::failed(format!("{name} is not a string"))),
        }
    }

    /// Value of an integer parameter.
    pub fn int(&self, name: &str) -> Result<i64, CommandError> {
        match self.value(name)? {
            Value::Int(n) => Ok(*n),
            _ => Err(CommandError::failed(format!("{name} is not an int"))),
        }
    }

    /// Value of a boolean parameter.
    pub fn flag(&self, name: &str) -> Result<bool, CommandError> {
        match self.value(name)? {
            Value::Bool(b) => Ok(*b),
            _ => Err(CommandError::failed(format!("{name} is not a bool"))),
        }
    }
}

/// Structured help metadata for a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpDoc {
    pub name: String,
    pub description: String,
    pub usage: String,
    /// Option lines, the universal help option last.
    pub options: Vec<OptionDoc>,
}

/// One rendered option line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionDoc {
    pub line: String,
    /// Set for options every command gets for free (the help flag).
    pub builtin: bool,
}

impl HelpDoc {
    /// Render the help text layout:
    ///
    /// ```text
    /// <name> -- <description>
    /// Usage: <usage>
    /// Options:
    ///   --<flag>  <description> (<type>, default: <default>)
    ///   -h, --help  show this help text
    /// ```
    ///
    /// The `Options:` block is omitted when only built-in options exist.
    pub fn render(&self) -> String {
        let mut out = format!(
            "{} -- {}\nUsage: {}",
            self.name, self.description, self.usage
        );
        if self.options.iter().any(|o| !o.builtin) {
            out.push_str("\nOptions:");
            for o in &self.options {
                out.push_str("\n  ");
                out.push_str(&o.line);
            }
        }
        out
    }
}
