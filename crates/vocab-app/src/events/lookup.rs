use std::sync::Arc;

use anyhow::Context;
use vocab_core::LookupError;
use vocab_core::preprocess::Preprocessor;
use vocab_core::trainer::next_review_date;
use vocab_telegram::ParseMode;
use vocab_types::IncomingMessage;

use crate::messages::{FAILED, NOTHING_FOUND};
use crate::state::AppState;

/// Look a term up and reply with the rendered blocks, each replying to the
/// one before it. A block's save-tokens become redeemable once it is sent.
pub async fn handle_lookup(state: Arc<AppState>, message: &IncomingMessage) -> anyhow::Result<()> {
    let term = state.preprocessor.process(&message.text);
    if term.is_empty() {
        tracing::debug!(user_id = message.user_id, "ignoring empty lookup");
        return Ok(());
    }

    let review_date = next_review_date(chrono::Local::now().date_naive(), 1);
    if let Err(e) = state
        .store
        .append_lookup_history(message.user_id, &term, review_date)
        .await
    {
        tracing::warn!(user_id = message.user_id, term = %term, "Failed storing lookup: {e}");
    }

    let response = match state.dictionary.lookup(&term).await {
        Ok(response) => response,
        Err(LookupError::NotFound(_)) => {
            return reply(&state, message, NOTHING_FOUND).await;
        }
        Err(e) => {
            tracing::error!(user_id = message.user_id, term = %term, "Lookup failed: {e}");
            return reply(&state, message, FAILED).await;
        }
    };

    let fragments = state.renderer.render(&response);
    let blocks = state.output.build(fragments);
    tracing::info!(
        user_id = message.user_id,
        term = %term,
        blocks = blocks.len(),
        "sending lookup result"
    );

    let mut reply_to = message.message_id;
    for block in blocks {
        reply_to = state
            .chat
            .send_message(message.chat_id, Some(reply_to), &block.text, ParseMode::Html)
            .await
            .context("Failed sending lookup result")?;
        state.cache.put(message.user_id, block.bindings).await;
    }

    Ok(())
}

pub(crate) async fn reply(
    state: &AppState,
    message: &IncomingMessage,
    text: &str,
) -> anyhow::Result<()> {
    state
        .chat
        .send_message(message.chat_id, Some(message.message_id), text, ParseMode::Plain)
        .await?;
    Ok(())
}
