/// How the chat client should interpret message text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    Html,
    Plain,
}

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("Network error: {0}")]
    Network(reqwest::Error),

    #[error("Telegram API error {code}: {description}")]
    Api { code: i64, description: String },
}

// Bot API urls embed the bot token
impl From<reqwest::Error> for ChatError {
    fn from(e: reqwest::Error) -> Self {
        ChatError::Network(e.without_url())
    }
}

/// Outbound chat port
#[async_trait::async_trait]
pub trait ChatPort: Send + Sync {
    /// Send a text message, returning the id of the sent message
    async fn send_message(
        &self,
        chat_id: i64,
        reply_to: Option<i64>,
        text: &str,
        mode: ParseMode,
    ) -> Result<i64, ChatError>;

    /// Upload a file as a document, returning the id of the sent message
    async fn send_document(
        &self,
        chat_id: i64,
        reply_to: Option<i64>,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<i64, ChatError>;
}
