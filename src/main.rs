use clap::Parser;

use timereport::cli::Cli;
use timereport::config::{LoggingConfig, get_config, init_config};
use timereport::runtime::modes::{Mode, detect_mode};
use timereport::system::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_config(cli.config.as_deref());
    let config = get_config();

    match detect_mode(cli.command.as_ref()) {
        Mode::Server => {
            let _guard = init_logging(&config.logging)?;
            timereport::runtime::modes::run_server().await
        }
        #[cfg(feature = "cli")]
        Mode::Cli => {
            // CLI 只输出警告及以上日志，避免迁移等信息干扰命令输出
            let logging = LoggingConfig {
                level: "warn".to_string(),
                ..config.logging.clone()
            };
            let _guard = init_logging(&logging)?;

            let Some(command) = cli.command else {
                return Ok(());
            };
            if let Err(e) = timereport::interfaces::cli::run_cli_command(command).await {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
            Ok(())
        }
        #[cfg(not(feature = "cli"))]
        Mode::Cli => anyhow::bail!("this build does not include CLI commands"),
    }
}
