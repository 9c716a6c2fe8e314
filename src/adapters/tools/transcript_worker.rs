//! External transcript worker. Implements TranscriptSource.
//!
//! Spawns `<program> [args..] <video_id>` as a short-lived subprocess and waits
//! for it to exit with stdout and stderr fully captured. The worker must print
//! one JSON object:
//!
//! ```json
//! {"success": true, "transcript": "..."}
//! {"error": "Transcripts disabled", "trace": "..."}
//! ```
//!
//! The child is killed if the calling future is dropped, so a timeout applied by
//! the caller also ends the process.

use crate::domain::{DomainError, VideoId};
use crate::ports::TranscriptSource;
use async_trait::async_trait;
use serde::Deserialize;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Stderr bytes kept in logs.
const STDERR_LOG_LIMIT: usize = 2000;

/// Worker payload. Fields are optional so both success and error shapes decode.
#[derive(Debug, Deserialize)]
struct WorkerPayload {
    #[serde(default)]
    transcript: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    trace: Option<String>,
}

/// Subprocess-backed transcript source.
pub struct SubprocessTranscriptSource {
    program: String,
    args: Vec<String>,
}

impl SubprocessTranscriptSource {
    /// # Arguments
    /// * `program` - executable, e.g. "python3"
    /// * `args` - leading arguments placed before the video id, e.g. ["get_transcript.py"]
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Map raw stdout to a transcript or a typed failure. Never returns partial text.
    fn interpret_output(video_id: &VideoId, stdout: &str) -> Result<String, DomainError> {
        let payload = Self::decode_payload(stdout)?;

        if let Some(error) = payload.error {
            warn!(
                video_id = %video_id,
                error = %error,
                trace = payload.trace.as_deref().unwrap_or(""),
                "worker reported failure"
            );
            return Err(DomainError::TranscriptUnavailable(error));
        }

        match payload.transcript {
            Some(text) if !text.trim().is_empty() => Ok(text.trim().to_string()),
            Some(_) => Err(DomainError::TranscriptUnavailable(
                "No captions available for this video".to_string(),
            )),
            None => Err(DomainError::OutputParseError(
                "payload has neither transcript nor error".to_string(),
            )),
        }
    }

    /// Decode the whole stdout; if that fails, the last non-empty line
    /// (some worker libraries print warnings before the payload).
    fn decode_payload(stdout: &str) -> Result<WorkerPayload, DomainError> {
        let trimmed = stdout.trim();
        if trimmed.is_empty() {
            return Err(DomainError::OutputParseError("empty output".to_string()));
        }

        match Self::decode_object(trimmed) {
            Ok(p) => Ok(p),
            Err(first) => {
                let last_line = trimmed
                    .lines()
                    .rev()
                    .map(str::trim)
                    .find(|l| !l.is_empty())
                    .unwrap_or("");
                if last_line.len() < trimmed.len() {
                    if let Ok(p) = Self::decode_object(last_line) {
                        return Ok(p);
                    }
                }
                Err(first)
            }
        }
    }

    /// Only a JSON object is a payload; derived structs would also accept arrays.
    fn decode_object(text: &str) -> Result<WorkerPayload, DomainError> {
        let value: serde_json::Value = serde_json::from_str(text)
            .map_err(|e| DomainError::OutputParseError(e.to_string()))?;
        if !value.is_object() {
            return Err(DomainError::OutputParseError(
                "payload is not a JSON object".to_string(),
            ));
        }
        serde_json::from_value(value).map_err(|e| DomainError::OutputParseError(e.to_string()))
    }
}

#[async_trait]
impl TranscriptSource for SubprocessTranscriptSource {
    async fn fetch_transcript(&self, video_id: &VideoId) -> Result<String, DomainError> {
        info!(video_id = %video_id, program = %self.program, "spawning transcript worker");

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(video_id.as_str())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                warn!(program = %self.program, error = %e, "failed to spawn transcript worker");
                DomainError::WorkerSpawnFailed(e.to_string())
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if !output.status.success() {
            warn!(
                video_id = %video_id,
                status = ?output.status.code(),
                stderr = %truncate_for_log(&stderr),
                "transcript worker exited with failure"
            );
            return Err(DomainError::WorkerNonZeroExit {
                code: output.status.code(),
            });
        }

        if !stderr.trim().is_empty() {
            debug!(video_id = %video_id, stderr = %truncate_for_log(&stderr), "worker stderr");
        }

        let result = Self::interpret_output(video_id, &stdout);
        match &result {
            Ok(text) => info!(video_id = %video_id, len = text.len(), "transcript fetched"),
            Err(DomainError::OutputParseError(e)) => warn!(
                video_id = %video_id,
                error = %e,
                stdout = %truncate_for_log(&stdout),
                "transcript worker output parse error"
            ),
            Err(_) => {}
        }
        result
    }
}

fn truncate_for_log(s: &str) -> String {
    s.trim().chars().take(STDERR_LOG_LIMIT).collect()
}
