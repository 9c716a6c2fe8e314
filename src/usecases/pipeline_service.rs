//! Video-learning pipeline. Sequences reference parser -> transcript source, and
//! delegates summaries and chat to the summarizer.
//!
//! Each request walks `Idle -> Parsing -> Fetching -> Done`, or ends in `Failed`
//! after `Parsing` or `Fetching`. Nothing loops back; there are no retries.

use crate::domain::{DomainError, Outcome, SummaryResult, TranscriptResult, video_ref};
use crate::ports::{TranscriptSource, VideoLearningPort};
use crate::usecases::summarizer::SummarizerService;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Per-request pipeline state. Not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Idle,
    Parsing,
    Fetching,
    Done,
    Failed,
}

impl PipelineStage {
    fn can_advance_to(self, next: PipelineStage) -> bool {
        use PipelineStage::*;
        matches!(
            (self, next),
            (Idle, Parsing)
                | (Parsing, Fetching)
                | (Parsing, Failed)
                | (Fetching, Done)
                | (Fetching, Failed)
        )
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PipelineStage::Idle => "idle",
            PipelineStage::Parsing => "parsing",
            PipelineStage::Fetching => "fetching",
            PipelineStage::Done => "done",
            PipelineStage::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Stage trail of one transcript request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTrace {
    stages: Vec<PipelineStage>,
}

impl RequestTrace {
    fn new() -> Self {
        Self {
            stages: vec![PipelineStage::Idle],
        }
    }

    pub fn current(&self) -> PipelineStage {
        self.stages
            .last()
            .copied()
            .unwrap_or(PipelineStage::Idle)
    }

    pub fn stages(&self) -> &[PipelineStage] {
        &self.stages
    }

    fn advance(&mut self, next: PipelineStage) {
        let current = self.current();
        debug_assert!(
            current.can_advance_to(next),
            "illegal pipeline transition {current} -> {next}"
        );
        debug!(from = %current, to = %next, "pipeline stage");
        self.stages.push(next);
    }
}

/// Orchestrator. Stateless across calls; safe to share via Arc.
pub struct PipelineService {
    source: Arc<dyn TranscriptSource>,
    summarizer: Arc<SummarizerService>,
    fetch_timeout: Duration,
}

impl PipelineService {
    /// # Arguments
    /// * `source` - transcript source (subprocess worker in production)
    /// * `summarizer` - summary/chat use case
    /// * `fetch_timeout` - bounded wait on the transcript source
    pub fn new(
        source: Arc<dyn TranscriptSource>,
        summarizer: Arc<SummarizerService>,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            source,
            summarizer,
            fetch_timeout,
        }
    }

    /// Same as [`VideoLearningPort::get_transcript`], also returning the stage trail.
    pub async fn run_transcript(&self, url: &str) -> (TranscriptResult, RequestTrace) {
        let mut trace = RequestTrace::new();
        trace.advance(PipelineStage::Parsing);

        let video_id = match video_ref::parse(url) {
            Ok(id) => id,
            Err(e) => {
                info!(error = %e, "video reference rejected");
                trace.advance(PipelineStage::Failed);
                return (Outcome::failure(e), trace);
            }
        };

        trace.advance(PipelineStage::Fetching);
        let fetched = tokio::time::timeout(
            self.fetch_timeout,
            self.source.fetch_transcript(&video_id),
        )
        .await
        .unwrap_or_else(|_| Err(DomainError::Timeout("transcript worker".to_string())));

        match fetched {
            Ok(text) => {
                trace.advance(PipelineStage::Done);
                info!(video_id = %video_id, len = text.len(), "transcript ready");
                (Outcome::success(text), trace)
            }
            Err(e) => {
                trace.advance(PipelineStage::Failed);
                warn!(video_id = %video_id, error = %e, "transcript fetch failed");
                (Outcome::failure(e), trace)
            }
        }
    }
}

#[async_trait::async_trait]
impl VideoLearningPort for PipelineService {
    async fn get_transcript(&self, url: &str) -> TranscriptResult {
        self.run_transcript(url).await.0
    }

    async fn get_summary(&self, transcript: &str) -> SummaryResult {
        self.summarizer.summarize(transcript).await
    }

    async fn chat(&self, transcript: &str, query: &str) -> Result<String, DomainError> {
        self.summarizer.chat(transcript, query).await
    }
}
