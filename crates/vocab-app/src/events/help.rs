use std::sync::Arc;

use vocab_telegram::ParseMode;
use vocab_types::IncomingMessage;

use crate::messages::HELP;
use crate::state::AppState;

pub async fn handle_help(state: Arc<AppState>, message: &IncomingMessage) -> anyhow::Result<()> {
    state
        .chat
        .send_message(message.chat_id, Some(message.message_id), HELP, ParseMode::Plain)
        .await?;
    Ok(())
}
