//! Command shell core.
//!
//! Commands declare their parameters through [`Params`] and are registered
//! by name into an immutable [`Environment`]. [`evaluate`] splits a line,
//! routes it to the built-in `help` or to a registered command, and turns
//! every outcome into a display string. Help listings are built by asking
//! each command for its help text and parsing it back into [`CommandInfo`].

pub mod args;
pub mod demo_commands;
pub mod help;
mod interpreter;
mod registry;
pub mod usage;

/// Typed argument values handed to a command.
pub use args::Args;
/// Value type of a declared parameter.
pub use args::ArgKind;
/// Every way a command invocation can fail.
pub use args::CommandError;
/// Result of invoking a command handler.
pub use args::CommandOutcome;
/// Parameter declaration for one command.
pub use args::Params;
/// Register the `hello`, `plus`, and `concat` demo commands.
pub use demo_commands::register_demo_commands;
/// Evaluate one command line against an environment.
pub use interpreter::evaluate;
/// Map a handler outcome to its display string.
pub use interpreter::render_outcome;
/// Split a command line into tokens.
pub use interpreter::tokenize;
/// Fixed messages produced by the evaluator.
pub use interpreter::{HELP_HINT, NO_COMMAND, PARSE_FAILURE, UNEXPECTED_ERROR};
/// A single executable command trait.
pub use registry::Command;
/// Immutable registry of commands for one shell instance.
pub use registry::Environment;
/// Closure-backed [`Command`].
pub use registry::FnCommand;
/// A registered command able to answer help requests.
pub use registry::WrappedHandler;
/// Build a command from a closure.
pub use registry::command_fn;
/// Name of the built-in help command and the reserved-name set.
pub use registry::{HELP_COMMAND, RESERVED_NAMES};
/// Structured command metadata.
pub use usage::CommandInfo;
/// Ask a handler for its help text and parse it.
pub use usage::extract_info;
