//! Telegram Bot API client: digest delivery plus the command long-poll.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::errors::RelayError;
use crate::worker::deliver::Deliver;

#[derive(Debug, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<IncomingMessage>,
}

#[derive(Debug, Deserialize)]
pub struct IncomingMessage {
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
struct UpdatesResponse {
    ok: bool,
    #[serde(default)]
    result: Vec<Update>,
}

#[derive(Clone)]
pub struct BotClient {
    http: reqwest::Client,
    base_url: String,
}

impl BotClient {
    pub fn new(http: reqwest::Client, token: &str) -> Self {
        Self {
            http,
            base_url: format!("https://api.telegram.org/bot{}", token),
        }
    }

    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), RelayError> {
        let response = self
            .http
            .post(format!("{}/sendMessage", self.base_url))
            .json(&json!({
                "chat_id": chat_id,
                "text": text,
                "parse_mode": "Markdown",
            }))
            .send()
            .await
            .map_err(|e| RelayError::Delivery(format!("sendMessage failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());
            return Err(RelayError::Delivery(format!(
                "sendMessage returned {}: {}",
                status, body
            )));
        }

        Ok(())
    }

    /// Long-poll for updates past `offset`.
    pub async fn get_updates(
        &self,
        offset: i64,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, RelayError> {
        let response = self
            .http
            .get(format!("{}/getUpdates", self.base_url))
            .query(&[
                ("offset", offset.to_string()),
                ("timeout", timeout_secs.to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RelayError::Http(format!(
                "getUpdates returned {}",
                response.status()
            )));
        }

        let payload: UpdatesResponse = response
            .json()
            .await
            .map_err(|e| RelayError::Http(format!("malformed getUpdates response: {}", e)))?;

        if !payload.ok {
            return Err(RelayError::Http("getUpdates returned ok=false".to_string()));
        }

        debug!(count = payload.result.len(), "received updates");
        Ok(payload.result)
    }
}

#[async_trait]
impl Deliver for BotClient {
    async fn deliver(&self, recipient: i64, text: &str) -> Result<(), RelayError> {
        self.send_message(recipient, text).await
    }
}
