//! cmdshell -- line-oriented host for the command shell core.
//!
//! Reads command lines from stdin, evaluates each against the demo command
//! set, and prints the result. Ends at EOF.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use cmdshell_terminal::{Environment, evaluate, register_demo_commands};
use cmdshell_types::config::ShellConfig;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Resolve config from CLI arg, CMDSHELL_CONFIG env var, or defaults.
    let config = match std::env::args()
        .nth(1)
        .or_else(|| std::env::var("CMDSHELL_CONFIG").ok())
    {
        Some(path) => {
            let path = PathBuf::from(path);
            ShellConfig::load(&path)
                .with_context(|| format!("loading config {}", path.display()))?
        },
        None => ShellConfig::default(),
    };

    let env = register_demo_commands(&Environment::new())?;
    log::info!("Starting cmdshell with {} commands", env.len());

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    if !config.banner.is_empty() {
        writeln!(stdout, "{}", config.banner)?;
    }

    let mut lines = stdin.lock().lines();
    loop {
        write!(stdout, "{}", config.prompt)?;
        stdout.flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("reading command line")?;
        if config.echo_commands {
            writeln!(stdout, "{line}")?;
        }
        writeln!(stdout, "{}", evaluate(&line, &env))?;
    }
    writeln!(stdout)?;

    log::info!("cmdshell shut down cleanly");
    Ok(())
}
