use std::fmt::Write;
use std::sync::Arc;

use vocab_core::markup::plain_text;
use vocab_types::{IncomingMessage, TrainingUnit};

use crate::events::lookup::reply;
use crate::messages::{FAILED, NO_TRAINING_DATA, TRAINING_SET_FILE};
use crate::state::AppState;

/// Send the user's saved units as a text file
pub async fn handle_history(state: Arc<AppState>, message: &IncomingMessage) -> anyhow::Result<()> {
    let user_id = message.user_id;

    let units = match state.store.count_saved_units(user_id).await {
        Ok(count) => state.store.list_saved_units(user_id, count).await,
        Err(e) => Err(e),
    };
    let units = match units {
        Ok(units) => units,
        Err(e) => {
            tracing::error!(user_id, "Failed reading training data: {e}");
            return reply(&state, message, FAILED).await;
        }
    };

    if units.is_empty() {
        return reply(&state, message, NO_TRAINING_DATA).await;
    }

    tracing::info!(user_id, units = units.len(), "sending training set");
    state
        .chat
        .send_document(
            message.chat_id,
            Some(message.message_id),
            TRAINING_SET_FILE,
            training_set(&units).into_bytes(),
        )
        .await?;
    Ok(())
}

/// One `[i] item: definition` line per unit
pub fn training_set(units: &[TrainingUnit]) -> String {
    let mut out = String::new();
    for (i, unit) in units.iter().enumerate() {
        let _ = writeln!(out, "[{i}] {}: {}", unit.item, plain_text(&unit.sense.definition));
    }
    out
}
