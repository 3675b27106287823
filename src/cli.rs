//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// timereport - work-time reports and yearly statistics
#[derive(Parser, Debug)]
#[command(name = "timereport")]
#[command(version)]
#[command(about = "Record work-time reports and derive yearly statistics", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Manage Basic authentication accounts
    Account {
        #[command(subcommand)]
        action: AccountCommands,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Account management commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum AccountCommands {
    /// Create an account, or reset its password if it already exists
    Add {
        username: String,

        /// Password (visible in shell history; prefer the prompt or --stdin)
        #[arg(long, conflicts_with = "stdin")]
        password: Option<String>,

        /// Read the password from stdin (for scripting)
        #[arg(long)]
        stdin: bool,
    },

    /// List accounts
    List,

    /// Remove an account
    Remove { username: String },
}

/// Configuration management commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Generate a sample configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Overwrite without confirmation
        #[arg(long)]
        force: bool,
    },
}
