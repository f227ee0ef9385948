//! Command-line front end for the contract kernel.
//!
//! # Responsibility
//! - Load contract documents and check JSON records against them.
//! - Keep a `ping` probe to validate core crate wiring.
//!
//! Exit codes: `0` ok, `1` contract violation, `2` I/O or parse failure.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::Outcome;
use shapeguard_core::{default_log_level, init_logging};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "shapeguard",
    version,
    about = "Check JSON records against declared interfaces"
)]
struct Cli {
    /// trace|debug|info|warn|error; only meaningful with `--log-dir`.
    #[arg(long, global = true, requires = "log_dir")]
    log_level: Option<String>,
    /// Absolute directory for rolling log files; logging is off without it.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print core linkage info.
    Ping,
    /// Validate one JSON record against an interface.
    Check {
        #[arg(long)]
        defs: PathBuf,
        #[arg(long)]
        interface: String,
        #[arg(long)]
        record: PathBuf,
        /// Accept the record without checking it, as the host runtime did.
        #[arg(long)]
        trust_seeds: bool,
    },
    /// List the interfaces and types declared in a document.
    Describe {
        #[arg(long)]
        defs: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(Outcome::Pass(message)) => {
            println!("{message}");
            ExitCode::SUCCESS
        }
        Ok(Outcome::Violation(err)) => {
            eprintln!("violation: {err}");
            ExitCode::from(1)
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<Outcome> {
    if let Some(dir) = &cli.log_dir {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        let dir = dir.to_string_lossy();
        init_logging(level, &dir).map_err(anyhow::Error::msg)?;
    }

    match cli.command {
        Command::Ping => Ok(Outcome::Pass(commands::ping())),
        Command::Check {
            defs,
            interface,
            record,
            trust_seeds,
        } => commands::check(&defs, &interface, &record, trust_seeds),
        Command::Describe { defs } => commands::describe(&defs).map(Outcome::Pass),
    }
}
