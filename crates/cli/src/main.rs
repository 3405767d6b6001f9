use anyhow::Result;
use clap::Parser;

use stride_cli::{commands, Cli, Command};
use stride_core::config::{AppConfig, LoadOptions};

fn init_logging(config: &AppConfig) {
    use stride_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt()
                .with_target(false)
                .with_max_level(log_level)
                .with_writer(std::io::stderr)
                .compact()
                .init();
        }
        Pretty => {
            tracing_subscriber::fmt()
                .with_target(false)
                .with_max_level(log_level)
                .with_writer(std::io::stderr)
                .pretty()
                .init();
        }
        Json => {
            tracing_subscriber::fmt()
                .with_target(false)
                .with_max_level(log_level)
                .with_writer(std::io::stderr)
                .json()
                .init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(LoadOptions {
        config_path: cli.config.clone(),
        ..LoadOptions::default()
    })?;
    init_logging(&config);

    match cli.command {
        Command::Chat { seed } => commands::chat::run(config, seed).await,
        Command::Config => {
            println!("{}", commands::config::run(&config));
            Ok(())
        }
        Command::Doctor { json } => {
            println!("{}", commands::doctor::run(&config, json));
            Ok(())
        }
    }
}
