//! Command-line interface, parsed with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// User directory - JSON CRUD service over a `users` table
#[derive(Parser)]
#[command(name = "userdir")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of the default locations
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start the HTTP server (default)
    #[command(alias = "daemon")]
    Serve,

    /// Create the users table if it is missing, then exit
    Provision,

    /// Write a default config.toml to the working directory
    Init,
}

impl Cli {
    #[must_use]
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }
}
