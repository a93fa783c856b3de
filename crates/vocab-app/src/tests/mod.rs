//! Fakes for the chat, fetch and store ports, driving handlers end to end.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use tokio::sync::Mutex;
use vocab_config::Config;
use vocab_config::providers::LinguaRobotConfig;
use vocab_core::{DictionaryService, FetchError, FetchRequest, Fetcher};
use vocab_lingua_robot::LinguaRobot;
use vocab_store::MemoryStore;
use vocab_telegram::{ChatError, ChatPort, ParseMode};
use vocab_types::IncomingMessage;

use crate::events::handle_message;
use crate::state::AppState;


pub const CHAT_ID: i64 = 100;
pub const USER_ID: i64 = 200;
pub const LR_BASE: &str = "http://lr.test";

pub const FOX: &str = r#"{
  "entries": [{
    "entry": "fox",
    "pronunciations": [{
      "transcriptions": [{"transcription": "/fɒks/", "notation": "IPA"}],
      "context": {"regions": ["United Kingdom"]}
    }],
    "lexemes": [{
      "lemma": "fox",
      "partOfSpeech": "noun",
      "senses": [
        {"definition": "A wild carnivorous mammal.", "usageExamples": ["The fox ran."]},
        {"definition": "A cunning person."}
      ]
    }]
  }]
}"#;

#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Message {
        chat_id: i64,
        reply_to: Option<i64>,
        text: String,
        mode: ParseMode,
        message_id: i64,
    },
    Document {
        chat_id: i64,
        reply_to: Option<i64>,
        file_name: String,
        body: String,
    },
}

impl Sent {
    pub fn text(&self) -> &str {
        match self {
            Sent::Message { text, .. } => text,
            Sent::Document { body, .. } => body,
        }
    }
}

/// Chat port that records what would have been sent
pub struct RecordingChat {
    pub sent: Mutex<Vec<Sent>>,
    next_id: AtomicI64,
}

impl RecordingChat {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1000),
        }
    }

    pub async fn take(&self) -> Vec<Sent> {
        std::mem::take(&mut *self.sent.lock().await)
    }
}

#[async_trait::async_trait]
impl ChatPort for RecordingChat {
    async fn send_message(
        &self,
        chat_id: i64,
        reply_to: Option<i64>,
        text: &str,
        mode: ParseMode,
    ) -> Result<i64, ChatError> {
        let message_id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.sent.lock().await.push(Sent::Message {
            chat_id,
            reply_to,
            text: text.to_string(),
            mode,
            message_id,
        });
        Ok(message_id)
    }

    async fn send_document(
        &self,
        chat_id: i64,
        reply_to: Option<i64>,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<i64, ChatError> {
        self.sent.lock().await.push(Sent::Document {
            chat_id,
            reply_to,
            file_name: file_name.to_string(),
            body: String::from_utf8_lossy(&bytes).into_owned(),
        });
        Ok(self.next_id.fetch_add(1, Ordering::SeqCst))
    }
}

/// Canned bodies by term; unknown terms fail with HTTP 500
#[derive(Default)]
pub struct CannedFetcher {
    bodies: HashMap<String, String>,
}

impl CannedFetcher {
    pub fn with(mut self, term: &str, body: impl Into<String>) -> Self {
        self.bodies.insert(
            format!("{LR_BASE}/language/v1/entries/en/{term}"),
            body.into(),
        );
        self
    }
}

#[async_trait::async_trait]
impl Fetcher for CannedFetcher {
    async fn fetch(&self, request: &FetchRequest) -> Result<Vec<u8>, FetchError> {
        self.bodies
            .get(&request.url)
            .map(|body| body.clone().into_bytes())
            .ok_or_else(|| FetchError::Http {
                status: 500,
                url: request.url.clone(),
            })
    }
}

pub struct Harness {
    pub state: Arc<AppState>,
    pub chat: Arc<RecordingChat>,
    pub store: Arc<MemoryStore>,
    next_message_id: AtomicI64,
}

impl Harness {
    pub fn new(fetcher: CannedFetcher) -> Self {
        Self::with_config(Config::default(), fetcher)
    }

    pub fn with_config(config: Config, fetcher: CannedFetcher) -> Self {
        let lingua_robot = LinguaRobot::new(&LinguaRobotConfig {
            api_key: "key".into(),
            base_url: LR_BASE.into(),
            ..Default::default()
        });
        let dictionary = DictionaryService::new(vec![Box::new(lingua_robot)], Arc::new(fetcher));
        let chat = Arc::new(RecordingChat::new());
        let store = Arc::new(MemoryStore::new());
        let state = Arc::new(AppState::new(
            &config,
            dictionary,
            store.clone(),
            chat.clone(),
        ));

        Self {
            state,
            chat,
            store,
            next_message_id: AtomicI64::new(1),
        }
    }

    pub fn message(&self, text: &str) -> IncomingMessage {
        let message_id = self.next_message_id.fetch_add(1, Ordering::SeqCst);
        IncomingMessage {
            update_id: message_id,
            chat_id: CHAT_ID,
            message_id,
            user_id: USER_ID,
            text: text.to_string(),
        }
    }

    /// Handle a user message and return what the bot sent back
    pub async fn send(&self, text: &str) -> Vec<Sent> {
        let message = self.message(text);
        handle_message(self.state.clone(), message)
            .await
            .expect("handler failed");
        self.chat.take().await
    }
}

/// Save-tokens shown in a reply, in order
pub fn tokens(text: &str) -> Vec<String> {
    text.split_whitespace()
        .filter(|word| word.starts_with("/save_"))
        .map(str::to_string)
        .collect()
}
