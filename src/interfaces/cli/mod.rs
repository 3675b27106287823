//! CLI interface module

pub mod commands;

use std::fmt;

use crate::cli::{AccountCommands, Commands, ConfigCommands};
use crate::services::AccountService;
use crate::storage::StorageFactory;

#[derive(Debug)]
pub enum CliError {
    StorageError(String),
    InputError(String),
    CommandError(String),
}

impl CliError {
    pub fn format_simple(&self) -> String {
        match self {
            CliError::StorageError(msg) => format!("Storage error: {}", msg),
            CliError::InputError(msg) => format!("Input error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::StorageError(msg) => {
                format!("{} {}", "Storage error:".red().bold(), msg.white())
            }
            CliError::InputError(msg) => {
                format!("{} {}", "Input error:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<crate::errors::TimeReportError> for CliError {
    fn from(err: crate::errors::TimeReportError) -> Self {
        match err {
            crate::errors::TimeReportError::Validation(msg) => CliError::InputError(msg),
            other => CliError::StorageError(other.to_string()),
        }
    }
}

/// Run a CLI command from clap-parsed input
pub async fn run_cli_command(cmd: Commands) -> Result<(), CliError> {
    match cmd {
        Commands::Config {
            action: ConfigCommands::Generate { output_path, force },
        } => commands::config_generate(output_path, force),

        Commands::Account { action } => {
            let storage = StorageFactory::create().await?;
            let accounts = AccountService::new(storage);

            match action {
                AccountCommands::Add {
                    username,
                    password,
                    stdin,
                } => commands::add_account(&accounts, &username, password, stdin).await,
                AccountCommands::List => commands::list_accounts(&accounts).await,
                AccountCommands::Remove { username } => {
                    commands::remove_account(&accounts, &username).await
                }
            }
        }

        Commands::Serve => Err(CliError::CommandError(
            "serve is handled by the server mode".to_string(),
        )),
    }
}
