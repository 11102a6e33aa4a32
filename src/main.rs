#![allow(non_snake_case)]

use std::env;
use std::process;

use clap::Parser;
use eduDiscord::cli::{self, Cli, Commands};
use eduDiscord::config::{AppConfig, Settings};
use eduDiscord::runtime;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eduDiscord=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();
    let args = Cli::parse();

    let config = match env::var("CONFIG_FILE") {
        Ok(path) => AppConfig::from_file(&path)?,
        Err(_) => AppConfig::default(),
    };

    let settings = match Settings::load(&config) {
        Ok(settings) => settings,
        Err(err) => {
            error!("Configuration error: {}", err);
            process::exit(1);
        }
    };

    let command = args.command.unwrap_or(match settings.run_mode.as_deref() {
        Some("cli") => Commands::Shell,
        _ => Commands::Bot,
    });

    match command {
        Commands::Bot => runtime::run_bot(&settings).await?,
        Commands::Run { text } => {
            cli::run_once(&runtime::build_handler(&settings), &text.join(" ")).await
        }
        Commands::Shell => cli::shell(&runtime::build_handler(&settings)).await,
    }
    Ok(())
}
