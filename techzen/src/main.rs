//! techzen CLI - run TechZen scripts or drop into an interactive REPL.
//!
//! This is the main entry point for the techzen CLI application. It uses
//! clap for argument parsing and dispatches to the `run`/`repl` command
//! handlers based on user input.

mod commands;
mod config;
mod error;
mod io;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{run_repl, run_run, ReplArgs, RunArgs};
use config::Config;
use error::{Result, TechZenError};

/// techzen - run TechZen scripts from the command line
#[derive(Parser, Debug)]
#[command(name = "techzen")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Run TechZen scripts or start an interactive REPL", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, env = "TECHZEN_VERBOSE")]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "TECHZEN_CONFIG")]
    config: Option<PathBuf>,

    /// Disable color output
    #[arg(long, global = true, env = "TECHZEN_NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a script file
    Run(RunCommand),

    /// Start an interactive REPL
    Repl,
}

#[derive(Parser, Debug)]
struct RunCommand {
    /// Script file to execute
    path: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.no_color)?;

    let config = load_config(cli.config.as_deref())?;
    let verbose = cli.verbose || config.verbose;

    match cli.command {
        Commands::Run(args) => run_run(RunArgs { path: args.path, verbose }),
        Commands::Repl => run_repl(ReplArgs { verbose }),
    }
}

fn init_logging(verbose: bool, no_color: bool) -> Result<()> {
    let filter = if verbose { EnvFilter::new("debug") } else { EnvFilter::new("info") };

    let subscriber = fmt::layer().with_ansi(!no_color).with_target(false).with_thread_ids(false).with_thread_names(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()
        .map_err(|e| TechZenError::Config(format!("Failed to initialize logging: {e}")))?;

    Ok(())
}

fn load_config(config_path: Option<&std::path::Path>) -> Result<Config> {
    match config_path {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_run_subcommand() {
        let cli = Cli::parse_from(["techzen", "run", "script.tz"]);
        match cli.command {
            Commands::Run(args) => assert_eq!(args.path, PathBuf::from("script.tz")),
            Commands::Repl => panic!("expected Run"),
        }
    }

    #[test]
    fn cli_parses_repl_subcommand() {
        let cli = Cli::parse_from(["techzen", "repl"]);
        assert!(matches!(cli.command, Commands::Repl));
    }

    #[test]
    fn cli_parses_global_verbose() {
        let cli = Cli::parse_from(["techzen", "--verbose", "repl"]);
        assert!(cli.verbose);
    }

    #[test]
    fn cli_parses_global_config_path() {
        let cli = Cli::parse_from(["techzen", "--config", "/path/to/techzen.toml", "repl"]);
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/techzen.toml")));
    }
}
