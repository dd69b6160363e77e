//! Small demonstration commands.

use cmdshell_types::error::Result;

use crate::args::{ArgKind, Args, CommandError, CommandOutcome, Params};
use crate::registry::{Command, Environment};

/// Return `env` with `hello`, `plus`, and `concat` registered.
pub fn register_demo_commands(env: &Environment) -> Result<Environment> {
    env.register("hello", "say hi", HelloCmd)?
        .register("plus", "add two integers", PlusCmd)?
        .register("concat", "concatenate two strings", ConcatCmd)
}

// ---------------------------------------------------------------------------
// hello
// ---------------------------------------------------------------------------

pub(crate) struct HelloCmd;
impl Command for HelloCmd {
    fn params(&self) -> Params {
        Params::new().positional("whom", ArgKind::Str)
    }
    fn execute(&self, args: &Args) -> CommandOutcome {
        Ok(format!("Hello, {}!", args.string("whom")?))
    }
}

// ---------------------------------------------------------------------------
// plus
// ---------------------------------------------------------------------------

pub(crate) struct PlusCmd;
impl Command for PlusCmd {
    fn params(&self) -> Params {
        Params::new()
            .positional("a", ArgKind::Int)
            .positional("b", ArgKind::Int)
    }
    fn execute(&self, args: &Args) -> CommandOutcome {
        let sum = args
            .int("a")?
            .checked_add(args.int("b")?)
            .ok_or_else(|| CommandError::failed("integer overflow"))?;
        Ok(format!("a + b is {sum}"))
    }
}

// ---------------------------------------------------------------------------
// concat
// ---------------------------------------------------------------------------

pub(crate) struct ConcatCmd;
impl Command for ConcatCmd {
    fn params(&self) -> Params {
        Params::new()
            .positional("a", ArgKind::Str)
            .positional("b", ArgKind::Str)
            .flag("reverse", "concatenate in reverse order")
    }
    fn execute(&self, args: &Args) -> CommandOutcome {
        let (a, b) = (args.string("a")?, args.string("b")?);
        if args.flag("reverse")? {
            Ok(format!("{b}{a}"))
        } else {
            Ok(format!("{a}{b}"))
        }
    }
}
