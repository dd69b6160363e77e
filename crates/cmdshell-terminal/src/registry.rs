//! Command trait, wrapped handlers, and the persistent command registry.

use std::fmt;
use std::sync::Arc;

use cmdshell_types::error::{Result, ShellError};

use crate::args::{Args, CommandError, CommandOutcome, HELP_SENTINEL, HelpDoc, Params};

/// Name of the built-in help command.
pub const HELP_COMMAND: &str = "help";

/// Names no user command may register under.
pub const RESERVED_NAMES: &[&str] = &[HELP_COMMAND];

/// A single executable command.
///
/// The name and description are supplied at registration time; the command
/// itself only declares its parameters and runs on parsed arguments.
pub trait Command: Send + Sync {
    /// Declared positional and option parameters.
    fn params(&self) -> Params {
        Params::new()
    }

    /// Execute the command with already-validated arguments.
    fn execute(&self, args: &Args) -> CommandOutcome;
}

/// A [`Command`] built from a parameter declaration and a closure.
pub struct FnCommand<F> {
    params: Params,
    body: F,
}

impl<F> Command for FnCommand<F>
where
    F: Fn(&Args) -> CommandOutcome + Send + Sync,
{
    fn params(&self) -> Params {
        self.params.clone()
    }

    fn execute(&self, args: &Args) -> CommandOutcome {
        (self.body)(args)
    }
}

/// Build a command from a closure.
pub fn command_fn<F>(params: Params, body: F) -> FnCommand<F>
where
    F: Fn(&Args) -> CommandOutcome + Send + Sync,
{
    FnCommand { params, body }
}

/// A registered command: the user command plus its name and description,
/// able to answer both normal invocations and help requests.
#[derive(Clone)]
pub struct WrappedHandler {
    name: String,
    description: String,
    command: Arc<dyn Command>,
}

impl WrappedHandler {
    /// Wrap a command so it answers the help sentinel itself.
    pub fn wrap(name: &str, description: &str, command: Arc<dyn Command>) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            command,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Structured help metadata, without invoking the command body.
    pub fn help_doc(&self) -> HelpDoc {
        self.command
            .params()
            .help_doc(&self.name, &self.description)
    }

    /// Invoke with raw argument tokens.
    ///
    /// A lone `--help` token yields [`CommandError::HelpRequested`] with the
    /// rendered help text and never reaches the command body.
    pub fn call(&self, args: &[String]) -> CommandOutcome {
        if let [only] = args
            && only == HELP_SENTINEL
        {
            return Err(CommandError::HelpRequested(self.help_doc().render()));
        }
        let parsed = self
            .command
            .params()
            .parse(&self.name, &self.description, args)?;
        self.command.execute(&parsed)
    }
}

impl fmt::Debug for WrappedHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WrappedHandler")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// The command registry for one shell instance.
///
/// An `Environment` is a value: [`Environment::register`] returns a new
/// environment and leaves the receiver untouched. Clones share structure,
/// so handing each session its own copy is cheap.
#[derive(Clone, Debug)]
pub struct Environment {
    commands: im::HashMap<String, WrappedHandler>,
}

impl Environment {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self {
            commands: im::HashMap::new(),
        }
    }

    /// Return a new environment with `name` bound to `command`.
    ///
    /// Reserved names are rejected. Registering an existing name replaces
    /// the previous command (last registration wins).
    pub fn register<C>(&self, name: &str, description: &str, command: C) -> Result<Self>
    where
        C: Command + 'static,
    {
        if RESERVED_NAMES.contains(&name) {
            return Err(ShellError::ReservedName(name.to_string()));
        }
        if self.commands.contains_key(name) {
            log::debug!("Replacing command {name}");
        } else {
            log::debug!("Registered command {name}");
        }
        let handler = WrappedHandler::wrap(name, description, Arc::new(command));
        Ok(Self {
            commands: self.commands.update(name.to_string(), handler),
        })
    }

    /// Look up a command by exact name.
    pub fn get(&self, name: &str) -> Option<&WrappedHandler> {
        self.commands.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Registered handlers in map iteration order. The order is unspecified.
    pub fn handlers(&self) -> impl Iterator<Item = &WrappedHandler> {
        self.commands.values()
    }

    /// Sorted list of registered names.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Sorted names starting with `partial`.
    pub fn completions(&self, partial: &str) -> Vec<String> {
        self.names()
            .into_iter()
            .filter(|name| name.starts_with(partial))
            .map(str::to_string)
            .collect()
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::ArgKind;

    struct EchoCmd;
    impl Command for EchoCmd {
        fn params(&self) -> Params {
            Params::new().positional("text", ArgKind::Str)
        }
        fn execute(&self, args: &Args) -> CommandOutcome {
            Ok(args.string("text")?.to_string())
        }
    }

    fn tokens(input: &[&str]) -> Vec<String> {
        input.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn new_is_empty() {
        let env = Environment::new();
        assert!(env.is_empty());
        assert_eq!(env.len(), 0);
        assert!(Environment::default().is_empty());
    }

    #[test]
    fn register_and_get() {
        let env = Environment::new().register("echo", "print", EchoCmd).unwrap();
        let handler = env.get("echo").unwrap();
        assert_eq!(handler.name(), "echo");
        assert_eq!(handler.description(), "print");
        assert_eq!(handler.call(&tokens(&["hi"])), Ok("hi".to_string()));
    }

    #[test]
    fn register_does_not_mutate_original() {
        let empty = Environment::new();
        let env = empty.register("echo", "print", EchoCmd).unwrap();
        assert!(empty.is_empty());
        assert!(env.contains("echo"));
    }

    #[test]
    fn help_is_reserved() {
        let env = Environment::new().register("echo", "print", EchoCmd).unwrap();
        let err = env.register("help", "mine", EchoCmd).unwrap_err();
        assert!(matches!(err, ShellError::ReservedName(ref n) if n == "help"));
        assert_eq!(env.len(), 1);
        assert!(!env.contains("help"));
    }

    #[test]
    fn last_registration_wins() {
        let env = Environment::new()
            .register("x", "first", command_fn(Params::new(), |_| Ok("one".into())))
            .unwrap()
            .register("x", "second", command_fn(Params::new(), |_| Ok("two".into())))
            .unwrap();
        assert_eq!(env.len(), 1);
        let handler = env.get("x").unwrap();
        assert_eq!(handler.description(), "second");
        assert_eq!(handler.call(&[]), Ok("two".to_string()));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let env = Environment::new().register("echo", "print", EchoCmd).unwrap();
        assert!(env.get("ECHO").is_none());
    }

    #[test]
    fn help_sentinel_is_intercepted() {
        let env = Environment::new().register("echo", "print", EchoCmd).unwrap();
        let outcome = env.get("echo").unwrap().call(&tokens(&["--help"]));
        assert_eq!(
            outcome,
            Err(CommandError::HelpRequested(
                "echo -- print\nUsage: echo <text>".to_string()
            ))
        );
    }

    #[test]
    fn body_errors_pass_through() {
        let env = Environment::new()
            .register(
                "fail",
                "always fails",
                command_fn(Params::new(), |_| Err(CommandError::failed("nope"))),
            )
            .unwrap();
        assert_eq!(
            env.get("fail").unwrap().call(&[]),
            Err(CommandError::failed("nope"))
        );
    }

    #[test]
    fn names_sorted_and_completions() {
        let env = Environment::new()
            .register("plus", "", EchoCmd)
            .unwrap()
            .register("hello", "", EchoCmd)
            .unwrap()
            .register("help-me", "", EchoCmd)
            .unwrap();
        assert_eq!(env.names(), vec!["hello", "help-me", "plus"]);
        assert_eq!(env.completions("hel"), vec!["hello", "help-me"]);
        assert!(env.completions("zzz").is_empty());
    }

    #[test]
    fn handlers_visits_every_command() {
        let env = Environment::new()
            .register("a", "", EchoCmd)
            .unwrap()
            .register("b", "", EchoCmd)
            .unwrap();
        let mut seen: Vec<&str> = env.handlers().map(WrappedHandler::name).collect();
        seen.sort_unstable();
        assert_eq!(seen, vec!["a", "b"]);
    }

    #[test]
    fn environment_is_shareable_across_threads() {
        let env = Environment::new().register("echo", "print", EchoCmd).unwrap();
        let handle = {
            let env = env.clone();
            std::thread::spawn(move || env.get("echo").unwrap().call(&tokens(&["t"])))
        };
        assert_eq!(handle.join().unwrap(), Ok("t".to_string()));
        assert!(env.contains("echo"));
    }
}
