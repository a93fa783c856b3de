use std::sync::Arc;

use kanal::AsyncReceiver;
use tokio_util::sync::CancellationToken;
use vocab_core::token::parse_save_token;
use vocab_types::{AppEvent, IncomingMessage};

use crate::state::AppState;

pub mod help;
pub mod history;
pub mod lookup;
pub mod save;

use help::handle_help;
use history::handle_history;
use lookup::handle_lookup;
use save::handle_save;

/// App's main loop. Updates are handled one at a time, in arrival order.
pub async fn event_loop(
    state: Arc<AppState>,
    updates_rx: AsyncReceiver<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    tracing::info!("Event loop started");
    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => break,
            event = updates_rx.recv() => event?,
        };

        match event {
            AppEvent::Message(message) => {
                let update_id = message.update_id;
                if let Err(e) = handle_message(state.clone(), message).await {
                    tracing::error!(update_id, "Failed handling update: {e:#}");
                }
            }
            AppEvent::PollerStopped => {
                tracing::info!("Poller stopped");
                break;
            }
        }
    }

    tracing::info!("Event loop stopping");
    Ok(())
}

/// Route a message to its handler
pub async fn handle_message(state: Arc<AppState>, message: IncomingMessage) -> anyhow::Result<()> {
    if let Some(token) = parse_save_token(&message.text) {
        let token = token.to_string();
        return handle_save(state, &message, &token).await;
    }

    let command = message.text.split_whitespace().next().unwrap_or_default();
    match command.split('@').next().unwrap_or_default() {
        "/history" => handle_history(state, &message).await,
        "/start" | "/help" => handle_help(state, &message).await,
        c if c.starts_with('/') => {
            tracing::debug!(command = c, "unknown command");
            handle_help(state, &message).await
        }
        _ => handle_lookup(state, &message).await,
    }
}
