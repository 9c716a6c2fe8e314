//! Mock generation adapter for running without API calls.
//!
//! Returns deterministic responses derived from the input, so identical input
//! always yields identical output.

use crate::domain::DomainError;
use crate::ports::GenerationPort;
use std::time::Duration;
use tracing::info;

/// Mock generation adapter.
///
/// Returns predetermined responses without making API calls.
/// Simulates network latency with configurable delay.
pub struct MockGenerationAdapter {
    /// Simulated network delay in milliseconds.
    delay_ms: u64,
}

impl MockGenerationAdapter {
    /// Create a new mock adapter with default delay (100ms).
    pub fn new() -> Self {
        Self { delay_ms: 100 }
    }

    /// Create a mock adapter with custom delay.
    pub fn with_delay(delay_ms: u64) -> Self {
        Self { delay_ms }
    }
}

impl Default for MockGenerationAdapter {
    fn default() -> Self {
        Self::new()
    }
}

fn sentence_count(text: &str) -> usize {
    text.split(['.', '!', '?'])
        .filter(|s| !s.trim().is_empty())
        .count()
}

#[async_trait::async_trait]
impl GenerationPort for MockGenerationAdapter {
    async fn summarize(&self, transcript: &str) -> Result<String, DomainError> {
        info!(
            transcript_len = transcript.len(),
            "[MOCK] Simulating AI summarization"
        );

        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;

        let words = transcript.split_whitespace().count();
        let opening: String = transcript
            .split_whitespace()
            .take(12)
            .collect::<Vec<_>>()
            .join(" ");
        Ok(format!(
            "[MOCK] The transcript has {} sentences and {} words. It opens with: \"{}\". \
             Configure VIDLEARN_AI_API_KEY for real summaries.",
            sentence_count(transcript),
            words,
            opening
        ))
    }

    async fn chat(&self, transcript: &str, query: &str) -> Result<String, DomainError> {
        info!(
            transcript_len = transcript.len(),
            query_len = query.len(),
            "[MOCK] Simulating AI chat"
        );

        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;

        Ok(format!(
            "[MOCK] You asked \"{}\" about a transcript of {} sentences.",
            query.trim(),
            sentence_count(transcript)
        ))
    }
}
