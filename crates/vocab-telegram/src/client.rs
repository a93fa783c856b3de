use std::time::Duration;

use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde::de::DeserializeOwned;
use vocab_config::telegram::TelegramConfig;

use crate::api::{ApiResponse, GetUpdates, Message, SendMessage, Update};
use crate::port::{ChatError, ChatPort, ParseMode};

/// Slack on top of the long poll timeout before reqwest gives up
const POLL_GRACE: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct TelegramClient {
    bot_url: String,
    poll_timeout: Duration,
    client: reqwest::Client,
}

impl TelegramClient {
    pub fn new(config: &TelegramConfig) -> Self {
        Self {
            bot_url: config.bot_url(),
            poll_timeout: Duration::from_secs(config.poll_timeout_secs),
            client: reqwest::Client::new(),
        }
    }

    /// Long poll for updates after `offset`
    pub async fn get_updates(&self, offset: i64) -> Result<Vec<Update>, ChatError> {
        let request = GetUpdates {
            offset,
            timeout: self.poll_timeout.as_secs(),
            allowed_updates: &["message"],
        };
        let response = self
            .client
            .post(self.method_url("getUpdates"))
            .timeout(self.poll_timeout + POLL_GRACE)
            .json(&request)
            .send()
            .await?;
        unwrap_response(response.json().await?)
    }

    async fn call<B, T>(&self, method: &str, body: &B) -> Result<T, ChatError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.method_url(method))
            .json(body)
            .send()
            .await?;
        unwrap_response(response.json().await?)
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{method}", self.bot_url)
    }
}

fn unwrap_response<T>(response: ApiResponse<T>) -> Result<T, ChatError> {
    match response {
        ApiResponse {
            ok: true,
            result: Some(result),
            ..
        } => Ok(result),
        ApiResponse {
            error_code,
            description,
            ..
        } => Err(ChatError::Api {
            code: error_code.unwrap_or_default(),
            description: description.unwrap_or_else(|| "missing result".to_string()),
        }),
    }
}

#[async_trait::async_trait]
impl ChatPort for TelegramClient {
    async fn send_message(
        &self,
        chat_id: i64,
        reply_to: Option<i64>,
        text: &str,
        mode: ParseMode,
    ) -> Result<i64, ChatError> {
        let request = SendMessage {
            chat_id,
            text,
            parse_mode: match mode {
                ParseMode::Html => Some("HTML"),
                ParseMode::Plain => None,
            },
            reply_to_message_id: reply_to,
            disable_web_page_preview: true,
        };
        let sent: Message = self.call("sendMessage", &request).await?;
        tracing::debug!(chat_id, message_id = sent.message_id, "message sent");
        Ok(sent.message_id)
    }

    async fn send_document(
        &self,
        chat_id: i64,
        reply_to: Option<i64>,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<i64, ChatError> {
        let document = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("text/plain")?;
        let mut form = Form::new()
            .text("chat_id", chat_id.to_string())
            .part("document", document);
        if let Some(reply_to) = reply_to {
            form = form.text("reply_to_message_id", reply_to.to_string());
        }

        let response = self
            .client
            .post(self.method_url("sendDocument"))
            .multipart(form)
            .send()
            .await?;
        let sent: Message = unwrap_response(response.json().await?)?;
        tracing::debug!(chat_id, message_id = sent.message_id, file_name, "document sent");
        Ok(sent.message_id)
    }
}
