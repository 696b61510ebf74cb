//! txkv CLI
//!
//! Command-line driver for the txkv store.
//!
//! # Commands
//!
//! - `demo` - Run the demonstration sequence
//! - `run` - Execute a script of store commands
//! - `version` - Show version information

mod commands;
mod error;
mod script;

use clap::{Parser, Subcommand};
use error::CliResult;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Transactional in-memory key-value store driver.
#[derive(Parser)]
#[command(name = "txkv")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the demonstration sequence
    Demo {
        /// Print absent values as the integer sentinel
        #[arg(short, long)]
        compat: bool,
    },

    /// Execute a script of store commands
    Run {
        /// Script file (reads stdin if omitted)
        file: Option<PathBuf>,

        /// Print absent values as the integer sentinel
        #[arg(short, long)]
        compat: bool,

        /// Let open transactions read their own writes
        #[arg(long)]
        read_your_writes: bool,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show version information
    Version,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match execute(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn execute(command: Commands) -> CliResult<()> {
    match command {
        Commands::Demo { compat } => {
            commands::demo::run(compat)?;
        }
        Commands::Run {
            file,
            compat,
            read_your_writes,
            format,
        } => {
            let options = commands::run::RunOptions {
                compat,
                read_your_writes,
                format: format.parse()?,
            };
            commands::run::run(file.as_deref(), &options)?;
        }
        Commands::Version => {
            println!("txkv CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("txkv core v{}", txkv_core::VERSION);
        }
    }

    Ok(())
}
