pub mod commands;
pub mod context;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Inspect and edit PostgreSQL connection service files.
#[derive(Parser, Debug)]
#[command(name = "pgsvc", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Service file to use instead of PGSERVICEFILE / PGSYSCONFDIR / default
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,

    /// Path to the pgsvc config file
    #[arg(long, global = true, env = "PGSVC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode: only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show where the service file is, optionally creating it
    Path {
        /// Create an empty service file if none exists
        #[arg(long)]
        create: bool,
    },

    /// List services
    List {
        /// Sort names alphabetically instead of file order
        #[arg(long)]
        sort: bool,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the settings of a service
    Show {
        name: String,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a new service
    Create {
        name: String,
        /// Initial setting, repeatable: --set host=localhost
        #[arg(long = "set", value_name = "KEY=VALUE")]
        settings: Vec<String>,
        /// Seed host, port and dbname defaults
        #[arg(long)]
        template: bool,
    },

    /// Set one or more settings of a service
    Set {
        name: String,
        /// Settings to assign
        #[arg(required = true, value_name = "KEY=VALUE")]
        assignments: Vec<String>,
    },

    /// Remove one or more settings from a service
    Unset {
        name: String,
        /// Setting keys to remove
        #[arg(required = true)]
        keys: Vec<String>,
    },

    /// Copy a service's settings into a new or existing service
    Copy {
        /// Service to copy from
        source: String,
        /// Service to create or overwrite
        target: String,
    },

    /// Rename a service
    Rename { name: String, new_name: String },

    /// Delete a service
    Remove { name: String },

    /// Print a service as a standalone [name] block
    Export { name: String },

    /// List well-known settings with defaults and descriptions
    Settings {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Report settings with empty values
    Check { name: String },
}
