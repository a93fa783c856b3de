use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use vocab_config::Config;
use vocab_core::DictionaryService;
use vocab_http::HttpFetcher;
use vocab_store::JsonFileStore;
use vocab_telegram::TelegramClient;

pub mod controller;
pub mod events;
pub mod messages;
pub mod state;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::state::{AppState, dictionaries_from_config};

#[derive(Parser, Debug)]
#[command(name = "vocab-bot", about = "Dictionary lookups and training sets over Telegram")]
struct Cli {
    /// JSON config file; environment variables override its secrets
    #[arg(long)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::new(),
    };
    init_tracing(cli.log_json || config.log_json);

    if config.telegram.token.is_empty() {
        anyhow::bail!("TELEGRAM_API_TOKEN is not set");
    }

    let store = JsonFileStore::open(&config.store.path)
        .await
        .with_context(|| format!("Failed to open store at {}", config.store.path))?;
    tracing::info!(path = %store.path().display(), "Store opened");

    let fetcher = Arc::new(HttpFetcher::new(&config.http));
    let dictionary = DictionaryService::new(dictionaries_from_config(&config.providers), fetcher);
    tracing::info!(providers = ?dictionary.provider_names(), "Dictionaries ready");

    let telegram = Arc::new(TelegramClient::new(&config.telegram));
    let state = Arc::new(AppState::new(
        &config,
        dictionary,
        Arc::new(store),
        telegram.clone(),
    ));

    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks(telegram);

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::error!("Failed to listen for Ctrl+C: {e}");
            }
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::warn!("A task exited early"),
                Ok(Err(e)) => tracing::error!("A task failed: {e:#}"),
                Err(e) => tracing::error!("A task panicked: {e}"),
            }
        }
    }

    controller.shutdown();
    while let Some(result) = tasks.join_next().await {
        if let Ok(Err(e)) = result {
            tracing::error!("Task failed during shutdown: {e:#}");
        }
    }
    tracing::info!("Bye");

    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.with_ansi(atty::is(atty::Stream::Stdout)).try_init()
    };
    if let Err(e) = result {
        eprintln!("Failed to initialize logging: {e}");
    }
}
