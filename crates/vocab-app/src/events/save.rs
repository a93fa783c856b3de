use std::sync::Arc;

use vocab_types::IncomingMessage;

use crate::events::lookup::reply;
use crate::messages::{TOKEN_NOT_FOUND, stored};
use crate::state::AppState;

/// Redeem a save-token: confirm to the user, then persist the unit
pub async fn handle_save(
    state: Arc<AppState>,
    message: &IncomingMessage,
    token: &str,
) -> anyhow::Result<()> {
    let unit = match state.cache.resolve(message.user_id, token).await {
        Ok(unit) => unit,
        Err(e) => {
            tracing::info!(user_id = message.user_id, "{e}");
            return reply(&state, message, TOKEN_NOT_FOUND).await;
        }
    };

    reply(&state, message, &stored(&unit.item)).await?;

    let item = unit.item.clone();
    if let Err(e) = state.store.save_unit(message.user_id, unit).await {
        tracing::warn!(user_id = message.user_id, item = %item, "Failed saving unit: {e}");
    }

    Ok(())
}
