pub mod api;
pub mod client;
pub mod poller;
pub mod port;

pub use client::TelegramClient;
pub use poller::poll_updates;
pub use port::{ChatError, ChatPort, ParseMode};
