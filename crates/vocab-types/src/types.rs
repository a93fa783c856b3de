/// Events flowing from the chat poller into the app's event loop
#[derive(Debug, Clone)]
pub enum AppEvent {
    Message(IncomingMessage),
    /// Poller gave up, event loop should stop
    PollerStopped,
}

/// A text message received from a chat user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub update_id: i64,
    pub chat_id: i64,
    pub message_id: i64,
    pub user_id: i64,
    pub text: String,
}
