//! sysconf - command-line front end for layered PHP-array configuration.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Read and edit one config directory through the `sysconf` library.
//! - Report failures on stderr with structured exit codes.
//!
//! Does NOT handle:
//! - File format, merging, or atomic writes (see `crates/config`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing to allow `.env` to provide clap defaults.
//! - Logs go to stderr; stdout carries only command output.

mod args;
mod commands;
mod dispatch;
mod dotenv;
mod error;

use args::Cli;
use clap::Parser;
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    // Load .env file BEFORE CLI parsing so clap env defaults can read .env values
    if let Err(e) = dotenv::load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let exit_code = match run_command(cli) {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("{:#}", e);
            if let Some(hint) = e.hint() {
                eprintln!("Hint: {hint}");
            }
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}
