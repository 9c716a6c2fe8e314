//! OpenAI-compatible adapter for summaries and chat.
//!
//! Supports OpenAI API, Azure OpenAI, and local Ollama instances.
//! Implements `GenerationPort`; maps transport and HTTP failures onto the
//! summarizer error taxonomy.

use crate::domain::DomainError;
use crate::ports::GenerationPort;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

/// OpenAI-compatible generation adapter.
///
/// Can be configured to work with:
/// - OpenAI API (api.openai.com)
/// - Azure OpenAI
/// - Ollama (localhost)
/// - Any OpenAI-compatible API
pub struct OpenAiAdapter {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
    /// Sentence count in the summary instruction, e.g. "3-5".
    summary_sentences: String,
}

impl OpenAiAdapter {
    /// Create a new OpenAI adapter.
    ///
    /// # Arguments
    /// * `api_url` - API endpoint (e.g., "https://api.openai.com/v1/chat/completions")
    /// * `api_key` - API key (can be empty for local Ollama)
    /// * `model` - Model name (e.g., "gpt-4o-mini", "llama3.2")
    /// * `summary_sentences` - sentence count for the summary instruction
    /// * `timeout` - per-request timeout
    pub fn new(
        api_url: String,
        api_key: String,
        model: String,
        summary_sentences: String,
        timeout: Duration,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "falling back to default HTTP client");
                reqwest::Client::new()
            });
        Self {
            client,
            api_url,
            api_key,
            model,
            summary_sentences,
        }
    }

    fn summarize_prompt(sentences: &str, transcript: &str) -> String {
        format!("Summarize this transcript in {sentences} sentences:\n\n{transcript}")
    }

    fn chat_system_prompt() -> &'static str {
        "You answer questions about a single video. Use only the transcript provided by the \
         user. If the transcript does not contain the answer, say so briefly. Keep answers short."
    }

    fn chat_user_prompt(transcript: &str, query: &str) -> String {
        format!("<TRANSCRIPT>\n{transcript}\n</TRANSCRIPT>\n\nQuestion: {query}")
    }

    /// Send one chat-completions request and return the first choice's text.
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String, DomainError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages,
            temperature: 0.3,
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DomainError::Timeout("generation service".to_string())
                } else {
                    DomainError::ServiceUnavailable(format!("HTTP request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %text, "AI API returned error");
            let detail = format!(
                "API error {}: {}",
                status,
                text.chars().take(200).collect::<String>()
            );
            return Err(if is_rejection(status) {
                DomainError::ServiceRejected(detail)
            } else {
                DomainError::ServiceUnavailable(detail)
            });
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| {
                DomainError::ResponseParse(format!("Failed to parse API response: {}", e))
            })?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .unwrap_or_default();

        if content.is_empty() {
            return Err(DomainError::EmptyResponse);
        }

        debug!(len = content.len(), "received AI response");
        Ok(content)
    }
}

/// Quota, auth and malformed-request statuses. Everything else is treated as unavailable.
fn is_rejection(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::BAD_REQUEST
            | StatusCode::UNAUTHORIZED
            | StatusCode::FORBIDDEN
            | StatusCode::NOT_FOUND
            | StatusCode::PAYLOAD_TOO_LARGE
            | StatusCode::UNPROCESSABLE_ENTITY
            | StatusCode::TOO_MANY_REQUESTS
    )
}

/// OpenAI API request structure.
#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

impl ChatMessage {
    fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// OpenAI API response structure.
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait::async_trait]
impl GenerationPort for OpenAiAdapter {
    async fn summarize(&self, transcript: &str) -> Result<String, DomainError> {
        info!(
            transcript_len = transcript.len(),
            model = %self.model,
            "sending transcript to AI for summarization"
        );

        let summary = self
            .complete(vec![ChatMessage::user(Self::summarize_prompt(
                &self.summary_sentences,
                transcript,
            ))])
            .await?;

        info!(summary_len = summary.len(), "summarization complete");
        Ok(summary)
    }

    async fn chat(&self, transcript: &str, query: &str) -> Result<String, DomainError> {
        info!(
            transcript_len = transcript.len(),
            query_len = query.len(),
            "sending question to AI"
        );

        let answer = self
            .complete(vec![
                ChatMessage::system(Self::chat_system_prompt()),
                ChatMessage::user(Self::chat_user_prompt(transcript, query)),
            ])
            .await?;

        info!(answer_len = answer.len(), "chat answer complete");
        Ok(answer)
    }
}
