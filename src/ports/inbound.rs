//! Inbound port. The HTTP adapter calls into the application.

use crate::domain::{DomainError, SummaryResult, TranscriptResult};

/// Video-learning pipeline as seen by callers.
///
/// Transcript and summary are separate steps so a caller can keep the
/// transcript and re-summarize without paying for extraction again.
#[async_trait::async_trait]
pub trait VideoLearningPort: Send + Sync {
    /// Parse `url`, then fetch its transcript. A parse failure never reaches the fetcher.
    async fn get_transcript(&self, url: &str) -> TranscriptResult;

    /// Summarize transcript text.
    async fn get_summary(&self, transcript: &str) -> SummaryResult;

    /// Answer a question about a transcript.
    async fn chat(&self, transcript: &str, query: &str) -> Result<String, DomainError>;
}
