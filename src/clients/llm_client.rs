//! Completion-endpoint client that turns a raw chat message into a digest.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::clients::auth::TokenManager;
use crate::errors::RelayError;
use crate::prompt::build_summary_prompt;
use crate::worker::scheduler::Summarize;

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Debug, Deserialize)]
struct MessageContent {
    content: String,
}

pub struct SummaryClient {
    http: reqwest::Client,
    tokens: TokenManager,
    completion_url: String,
    model: String,
}

impl SummaryClient {
    pub fn new(
        http: reqwest::Client,
        tokens: TokenManager,
        completion_url: String,
        model: String,
    ) -> Self {
        Self {
            http,
            tokens,
            completion_url,
            model,
        }
    }

    /// Single completion call. No internal retries: a permanently failing
    /// message must not wedge the relay queue, so retry policy stays with
    /// the caller (which has none either).
    async fn complete(&self, token: &str, prompt: String) -> Result<String, RelayError> {
        let request = CompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt,
            }],
            temperature: 0.7,
        };

        let response = self
            .http
            .post(&self.completion_url)
            .header("Accept", "application/json")
            .bearer_auth(token)
            .json(&request)
            .send()
            .await
            .map_err(|e| RelayError::Llm(format!("completion request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());
            return Err(RelayError::Llm(format!(
                "completion endpoint returned {}: {}",
                status, body
            )));
        }

        let payload: CompletionResponse = response
            .json()
            .await
            .map_err(|e| RelayError::Llm(format!("malformed completion response: {}", e)))?;

        payload
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| RelayError::Llm("no choices in completion response".to_string()))
    }
}

#[async_trait]
impl Summarize for SummaryClient {
    async fn summarize(
        &mut self,
        sender: &str,
        chat_title: &str,
        text: &str,
    ) -> Result<String, RelayError> {
        let token = self.tokens.get_token().await?;
        let prompt = build_summary_prompt(sender, chat_title, text);
        info!(chat_title, sender, "requesting summary");
        self.complete(&token, prompt).await
    }
}
