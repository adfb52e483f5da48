//! Main entry point for TranslateMC.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::{info, warn};
use translatemc_common::{init_logging, LoggingConfig, UserId};
use translatemc_config::{Config, ConfigCache, ConfigLoader, CONFIG_PATH_ENV};
use translatemc_host::{console, ConsoleSession, HostError, TranslateHost};

#[derive(Debug, Parser)]
#[command(name = "translatemc", version, about = "Remote translation catalog host")]
struct Cli {
    /// Configuration file (YAML or TOML)
    #[arg(short, long, env = CONFIG_PATH_ENV)]
    config: Option<PathBuf>,

    /// Log filter, e.g. "info" or "translatemc_i18n=debug"
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Also write logs to this file
    #[arg(long)]
    log_file: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the interactive console (default)
    Console {
        /// User id the console acts as; random when omitted
        #[arg(long)]
        user: Option<UserId>,
    },
    /// Fetch the catalog once and list its languages
    Languages,
    /// Fetch the catalog once and resolve a key
    Resolve {
        /// Translation key
        key: String,
        /// Language code; the configured default when omitted
        #[arg(short, long)]
        lang: Option<String>,
    },
    /// Fetch the catalog once and list its keys
    Keys,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(LoggingConfig {
        level: cli.log_level.clone(),
        json_format: cli.json_logs,
        file_path: cli.log_file.clone(),
        ..LoggingConfig::default()
    })
    .map_err(|e| HostError::Logging(e.to_string()))?;

    info!("Starting TranslateMC host");

    let config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    let cache = Arc::new(match &cli.config {
        Some(path) => ConfigCache::with_source(config, path),
        None => ConfigCache::new(config),
    });

    let host = TranslateHost::start(cache)
        .await
        .context("Failed to start translation service")?;

    let result = match cli.command.unwrap_or(Command::Console { user: None }) {
        Command::Console { user } => run_console(&host, user.unwrap_or_else(UserId::random)).await,
        Command::Languages => {
            for language in host.service().languages() {
                let marker = if language.is_default() { " (source)" } else { "" };
                println!("{}\t{}{}", language.code(), language.display_name(), marker);
            }
            Ok(())
        }
        Command::Resolve { key, lang } => {
            let lang = lang.unwrap_or_else(|| host.service().default_language_code().to_string());
            println!("{}", host.service().resolve(&key, &lang).await);
            Ok(())
        }
        Command::Keys => {
            for key in host.service().keys() {
                println!("{key}");
            }
            Ok(())
        }
    };

    host.shutdown().await;
    result
}

fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    let config = match path {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    if config.api.token().is_none() {
        warn!("No API token configured, requests are sent unauthenticated");
    }
    Ok(config)
}

async fn run_console(host: &TranslateHost, user: UserId) -> Result<()> {
    info!(%user, "Console ready");
    let mut session = ConsoleSession::new(host, user);
    let reader = BufReader::new(tokio::io::stdin());
    console::run(&mut session, reader, tokio::io::stdout())
        .await
        .context("Console failed")
}
