//! Mode routing
//!
//! 没有子命令（或 `serve`）时启动 HTTP 服务，其余子命令交给 CLI。

pub mod server;

pub use server::run_server;

use crate::cli::Commands;

/// Mode detection result
#[derive(Debug, PartialEq, Eq)]
pub enum Mode {
    Server,
    Cli,
}

pub fn detect_mode(command: Option<&Commands>) -> Mode {
    match command {
        None | Some(Commands::Serve) => Mode::Server,
        Some(_) => Mode::Cli,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::AccountCommands;

    #[test]
    fn test_detect_mode() {
        assert_eq!(detect_mode(None), Mode::Server);
        assert_eq!(detect_mode(Some(&Commands::Serve)), Mode::Server);
        assert_eq!(
            detect_mode(Some(&Commands::Account {
                action: AccountCommands::List
            })),
            Mode::Cli
        );
    }
}
