use std::sync::Arc;
use std::time::Duration;

use kanal::AsyncSender;
use tokio_util::sync::CancellationToken;
use vocab_types::AppEvent;

use crate::client::TelegramClient;

/// Pause after a failed poll before trying again
const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Long poll Telegram and forward text messages to the event loop in order
pub async fn poll_updates(
    client: Arc<TelegramClient>,
    event_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut offset = 0;
    tracing::info!("Telegram poller started");

    loop {
        let updates = tokio::select! {
            _ = cancel.cancelled() => break,
            result = client.get_updates(offset) => result,
        };

        let updates = match updates {
            Ok(updates) => updates,
            Err(e) => {
                tracing::warn!("getUpdates failed: {e}");
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = tokio::time::sleep(RETRY_DELAY) => continue,
                }
            }
        };

        for update in updates {
            offset = offset.max(update.update_id + 1);
            let Some(message) = update.into_incoming() else {
                continue;
            };
            tracing::debug!(
                update_id = message.update_id,
                user_id = message.user_id,
                "update received"
            );
            if event_tx.send(AppEvent::Message(message)).await.is_err() {
                tracing::warn!("event channel closed, poller stopping");
                return Ok(());
            }
        }
    }

    tracing::info!("Telegram poller stopping");
    let _ = event_tx.try_send(AppEvent::PollerStopped);
    Ok(())
}
