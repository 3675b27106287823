//! 账户管理 CLI 命令

use std::io::{self, BufRead, IsTerminal, Write};

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::services::AccountService;

/// 从参数、stdin 或交互式输入获取密码
fn get_password(password: Option<String>, stdin: bool) -> Result<String, CliError> {
    if stdin {
        let mut line = String::new();
        io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| CliError::InputError(format!("Failed to read from stdin: {}", e)))?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    } else if let Some(pwd) = password {
        Ok(pwd)
    } else {
        prompt_password_with_confirm()
    }
}

/// 交互式输入密码（带确认）
fn prompt_password_with_confirm() -> Result<String, CliError> {
    if !io::stdin().is_terminal() {
        return Err(CliError::InputError(
            "No password provided. Use --password or --stdin, or run interactively.".to_string(),
        ));
    }

    let read = |prompt: &str| {
        print!("{}", prompt);
        io::stdout()
            .flush()
            .and_then(|_| rpassword::read_password())
            .map_err(|e| CliError::InputError(format!("Failed to read password: {}", e)))
    };

    let password = read("Enter password: ")?;
    let confirm = read("Confirm password: ")?;

    if password != confirm {
        return Err(CliError::InputError("Passwords do not match".to_string()));
    }
    Ok(password)
}

pub async fn add_account(
    accounts: &AccountService,
    username: &str,
    password: Option<String>,
    stdin: bool,
) -> Result<(), CliError> {
    let password = get_password(password, stdin)?;
    let account = accounts.set_password(username, &password).await?;

    println!(
        "{} Account {} saved",
        "✓".green().bold(),
        account.username.cyan()
    );
    Ok(())
}

pub async fn list_accounts(accounts: &AccountService) -> Result<(), CliError> {
    let list = accounts.list().await?;

    if list.is_empty() {
        println!("{}", "No accounts found".yellow());
        return Ok(());
    }

    println!("{}", "Accounts:".bold().green());
    for account in &list {
        println!(
            "  {} {}",
            account.username.cyan(),
            format!("(created {})", account.created_at.format("%Y-%m-%d %H:%M:%S UTC")).dimmed()
        );
    }
    println!();
    println!("{} {} account(s)", "ℹ".blue(), list.len());
    Ok(())
}

pub async fn remove_account(accounts: &AccountService, username: &str) -> Result<(), CliError> {
    accounts.remove(username).await?;
    println!("{} Account {} removed", "✓".green().bold(), username.cyan());
    Ok(())
}
