//! Summarizer. Validates transcript text, applies the length policy, and makes
//! one bounded call to the generation service.

use crate::domain::{DomainError, SummaryResult};
use crate::ports::GenerationPort;
use crate::shared::config::DEFAULT_MAX_TRANSCRIPT_CHARS;
use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Input-size policy for generation calls.
///
/// Transcripts longer than `max_chars` characters are truncated, not chunked:
/// one request per summary keeps calls independent and idempotent.
#[derive(Debug, Clone)]
pub struct SummaryPolicy {
    pub max_chars: usize,
    pub timeout: Duration,
}

impl Default for SummaryPolicy {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_TRANSCRIPT_CHARS,
            timeout: Duration::from_secs(60),
        }
    }
}

/// Cut `text` to at most `max_chars` characters.
///
/// Prefers the last sentence terminator in the second half of the window, then
/// the last whitespace, then a hard cut. Returns the text unchanged when it fits.
pub fn truncate_transcript(text: &str, max_chars: usize) -> Cow<'_, str> {
    let Some((limit, _)) = text.char_indices().nth(max_chars) else {
        return Cow::Borrowed(text);
    };
    let window = &text[..limit];
    let half = window
        .char_indices()
        .nth(max_chars / 2)
        .map(|(i, _)| i)
        .unwrap_or(0);

    let sentence_end = window
        .rfind(['.', '!', '?'])
        .filter(|&i| i >= half)
        .map(|i| i + 1);
    let cut = sentence_end
        .or_else(|| window.rfind(char::is_whitespace).filter(|&i| i > 0))
        .unwrap_or(limit);

    Cow::Owned(window[..cut].trim_end().to_string())
}

/// Summary use case over a [`GenerationPort`].
pub struct SummarizerService {
    ai: Arc<dyn GenerationPort>,
    policy: SummaryPolicy,
}

impl SummarizerService {
    pub fn new(ai: Arc<dyn GenerationPort>, policy: SummaryPolicy) -> Self {
        Self { ai, policy }
    }

    /// Apply the length policy, logging when text is cut.
    pub fn prepare<'a>(&self, transcript: &'a str) -> Cow<'a, str> {
        let prepared = truncate_transcript(transcript.trim(), self.policy.max_chars);
        if let Cow::Owned(ref kept) = prepared {
            warn!(
                original_chars = transcript.chars().count(),
                kept_chars = kept.chars().count(),
                max_chars = self.policy.max_chars,
                "transcript truncated before generation"
            );
        }
        prepared
    }

    /// Summarize transcript text. Blank input fails without an outbound call.
    pub async fn summarize(&self, transcript: &str) -> SummaryResult {
        self.try_summarize(transcript).await.into()
    }

    async fn try_summarize(&self, transcript: &str) -> Result<String, DomainError> {
        if transcript.trim().is_empty() {
            return Err(DomainError::EmptyTranscript);
        }
        let text = self.prepare(transcript);

        let summary = tokio::time::timeout(self.policy.timeout, self.ai.summarize(&text))
            .await
            .map_err(|_| DomainError::Timeout("generation service".to_string()))??;

        let summary = summary.trim();
        if summary.is_empty() {
            return Err(DomainError::EmptyResponse);
        }
        info!(summary_len = summary.len(), "summary ready");
        Ok(summary.to_string())
    }

    /// Answer a question about a transcript with the same length policy and timeout.
    pub async fn chat(&self, transcript: &str, query: &str) -> Result<String, DomainError> {
        if query.trim().is_empty() {
            return Err(DomainError::Validation("query must not be empty".to_string()));
        }
        if transcript.trim().is_empty() {
            return Err(DomainError::EmptyTranscript);
        }
        let text = self.prepare(transcript);

        let answer = tokio::time::timeout(self.policy.timeout, self.ai.chat(&text, query.trim()))
            .await
            .map_err(|_| DomainError::Timeout("generation service".to_string()))??;

        let answer = answer.trim();
        if answer.is_empty() {
            return Err(DomainError::EmptyResponse);
        }
        Ok(answer.to_string())
    }
}
