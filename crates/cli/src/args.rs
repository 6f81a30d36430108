//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Resolve the config directory from flags, environment, or platform default.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use sysconf::constants::DEFAULT_CONFIG_FILE_NAME;

#[derive(Parser)]
#[command(name = "sysconf")]
#[command(about = "Inspect and edit layered PHP-array configuration files", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  sysconf --config-dir /var/www/config list\n  sysconf get dbhost --default localhost\n  sysconf set maintenance true --type boolean\n  sysconf set trusted_domains '[\"example.com\"]' --type json\n  sysconf delete maintenance\n"
)]
pub struct Cli {
    /// Directory holding the primary config file and its fragments.
    ///
    /// Defaults to the platform config directory for `sysconf`.
    #[arg(long, global = true, env = "SYSCONF_CONFIG_DIR", value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Name of the primary config file inside the config directory
    #[arg(
        long,
        global = true,
        env = "SYSCONF_CONFIG_FILE",
        value_name = "NAME",
        default_value = DEFAULT_CONFIG_FILE_NAME
    )]
    pub config_file: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all configured keys
    List {
        /// Print the full merged configuration as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the value of a key as JSON
    Get {
        /// Config key
        key: String,

        /// Printed (as a string) when the key is not set
        #[arg(long, value_name = "VALUE")]
        default: Option<String>,
    },

    /// Set a key and write the primary config file
    Set {
        /// Config key
        key: String,

        /// New value, interpreted according to --type
        #[arg(allow_hyphen_values = true)]
        value: String,

        /// How to interpret the value
        #[arg(long = "type", value_enum, default_value_t = ValueType::String)]
        value_type: ValueType,
    },

    /// Remove a key from the primary config file
    Delete {
        /// Config key
        key: String,
    },
}

/// Interpretation of a `set` value given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ValueType {
    String,
    Integer,
    Float,
    Boolean,
    Json,
}

impl Cli {
    /// Config directory to operate on.
    ///
    /// Blank values (e.g. an empty `SYSCONF_CONFIG_DIR`) fall back to the
    /// platform default.
    pub fn resolve_config_dir(&self) -> Result<PathBuf> {
        match &self.config_dir {
            Some(dir) if !dir.to_string_lossy().trim().is_empty() => Ok(dir.clone()),
            _ => default_config_dir(),
        }
    }
}

fn default_config_dir() -> Result<PathBuf> {
    directories::ProjectDirs::from("", "", "sysconf")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .context("Could not determine a default config directory; pass --config-dir")
}
