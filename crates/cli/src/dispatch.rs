//! Command dispatch logic.
//!
//! Responsibilities:
//! - Load the config store for the resolved directory and file name.
//! - Route parsed CLI arguments to the matching command handler.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Exit code mapping (see `error` module).

use anyhow::Result;
use sysconf::ConfigStore;

use crate::args::{Cli, Commands};
use crate::commands;

pub(crate) fn run_command(cli: Cli) -> Result<()> {
    let directory = cli.resolve_config_dir()?;
    tracing::debug!(
        dir = %directory.display(),
        file = %cli.config_file,
        "Loading config"
    );
    let mut store = ConfigStore::load(directory, cli.config_file);

    match cli.command {
        Commands::List { json } => commands::list::run(&store, json),
        Commands::Get { key, default } => commands::get::run(&store, &key, default),
        Commands::Set {
            key,
            value,
            value_type,
        } => commands::set::run(&mut store, &key, &value, value_type),
        Commands::Delete { key } => commands::delete::run(&mut store, &key),
    }
}
