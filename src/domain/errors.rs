//! Domain errors. Used by ports, use cases and the HTTP adapter.
//!
//! Adapters map infrastructure errors into these. Every variant belongs to an
//! [`ErrorClass`], which decides the HTTP status and how much of the message a
//! client is allowed to see.

use thiserror::Error;

/// Public text for any reference parser failure other than an empty input.
pub const INVALID_URL_MESSAGE: &str = "Invalid YouTube URL";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ── reference parser ─────────────────────────────────────────────────────
    #[error("No video URL provided")]
    EmptyInput,

    #[error("Malformed video URL: {0}")]
    MalformedUrl(String),

    #[error("Video identifier must be 11 characters, got {0}")]
    InvalidIdentifierLength(usize),

    // ── transcript worker ────────────────────────────────────────────────────
    #[error("Transcript worker could not be started: {0}")]
    WorkerSpawnFailed(String),

    #[error("Transcript worker exited with status {code:?}")]
    WorkerNonZeroExit { code: Option<i32> },

    #[error("Transcript worker output could not be parsed: {0}")]
    OutputParseError(String),

    #[error("{0}")]
    TranscriptUnavailable(String),

    // ── summarizer / generation service ──────────────────────────────────────
    #[error("Transcript is empty")]
    EmptyTranscript,

    #[error("Generation service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Generation service rejected the request: {0}")]
    ServiceRejected(String),

    #[error("Generation service returned an empty response")]
    EmptyResponse,

    #[error("Generation service response could not be parsed: {0}")]
    ResponseParse(String),

    /// Bounded wait on an external call expired. Payload names the stage.
    #[error("Timeout while waiting for {0}")]
    Timeout(String),

    // ── collaborators ────────────────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("An account with this email already exists")]
    DuplicateEmail,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Repository error: {0}")]
    Repo(String),
}

/// Error taxonomy shared by every stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Malformed or missing caller input. User-correctable.
    Input,
    /// Worker, generation service or storage failure. May be transient.
    Upstream,
    /// Unexpected response shape from an upstream (contract drift).
    Parse,
    Unauthorized,
    Conflict,
    NotFound,
}

impl ErrorClass {
    /// HTTP status code for this class.
    pub fn status(self) -> u16 {
        match self {
            ErrorClass::Input => 400,
            ErrorClass::Unauthorized => 401,
            ErrorClass::NotFound => 404,
            ErrorClass::Conflict => 409,
            ErrorClass::Upstream | ErrorClass::Parse => 500,
        }
    }
}

impl DomainError {
    pub fn class(&self) -> ErrorClass {
        match self {
            DomainError::EmptyInput
            | DomainError::MalformedUrl(_)
            | DomainError::InvalidIdentifierLength(_)
            | DomainError::EmptyTranscript
            | DomainError::Validation(_) => ErrorClass::Input,
            DomainError::WorkerSpawnFailed(_)
            | DomainError::WorkerNonZeroExit { .. }
            | DomainError::TranscriptUnavailable(_)
            | DomainError::ServiceUnavailable(_)
            | DomainError::ServiceRejected(_)
            | DomainError::Timeout(_)
            | DomainError::Repo(_) => ErrorClass::Upstream,
            DomainError::OutputParseError(_)
            | DomainError::EmptyResponse
            | DomainError::ResponseParse(_) => ErrorClass::Parse,
            DomainError::InvalidCredentials => ErrorClass::Unauthorized,
            DomainError::DuplicateEmail => ErrorClass::Conflict,
            DomainError::NotFound(_) => ErrorClass::NotFound,
        }
    }

    /// Short, non-internal text that may be returned to a client.
    ///
    /// Worker stderr, traces and upstream bodies never appear here; they are
    /// logged where the error is produced.
    pub fn public_message(&self) -> String {
        match self {
            DomainError::MalformedUrl(_) | DomainError::InvalidIdentifierLength(_) => {
                INVALID_URL_MESSAGE.to_string()
            }
            DomainError::EmptyInput
            | DomainError::EmptyTranscript
            | DomainError::Validation(_)
            | DomainError::DuplicateEmail
            | DomainError::InvalidCredentials
            | DomainError::NotFound(_) => self.to_string(),
            // Short reason reported by the worker itself ("Transcripts disabled").
            DomainError::TranscriptUnavailable(reason) => reason.clone(),
            DomainError::WorkerSpawnFailed(_) | DomainError::WorkerNonZeroExit { .. } => {
                "Transcript worker failed".to_string()
            }
            DomainError::OutputParseError(_) => "Transcript parse error".to_string(),
            DomainError::Timeout(_) => "Timeout".to_string(),
            DomainError::ServiceUnavailable(_)
            | DomainError::ServiceRejected(_)
            | DomainError::EmptyResponse
            | DomainError::ResponseParse(_) => "Generation service failed".to_string(),
            DomainError::Repo(_) => "Storage error".to_string(),
        }
    }
}
