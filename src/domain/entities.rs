//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP/SQL/process types here; adapters map to and from these.

use crate::domain::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical YouTube video identifier (11 characters, `[A-Za-z0-9_-]`).
///
/// Only constructed by the reference parser, so holding one means the value
/// already passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    /// Fixed identifier length used by the video host.
    pub const LEN: usize = 11;

    pub(crate) fn new_unchecked(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tagged outcome of a pipeline stage. Exactly one variant is populated.
///
/// Callers branch on the tag; expected failures never travel as panics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success { text: String },
    Failure { error: DomainError },
}

/// Outcome of transcript extraction.
pub type TranscriptResult = Outcome;

/// Outcome of summarization.
pub type SummaryResult = Outcome;

impl Outcome {
    pub fn success(text: impl Into<String>) -> Self {
        Outcome::Success { text: text.into() }
    }

    pub fn failure(error: DomainError) -> Self {
        Outcome::Failure { error }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Outcome::Success { text } => Some(text),
            Outcome::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&DomainError> {
        match self {
            Outcome::Success { .. } => None,
            Outcome::Failure { error } => Some(error),
        }
    }
}

impl From<Result<String, DomainError>> for Outcome {
    fn from(r: Result<String, DomainError>) -> Self {
        match r {
            Ok(text) => Outcome::Success { text },
            Err(error) => Outcome::Failure { error },
        }
    }
}

/// Opaque account identifier (UUID string).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub String);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stored account. `secret_hash` is hex SHA-256 over `salt || secret`.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub email: String,
    pub salt: String,
    pub secret_hash: String,
    pub created_at: i64,
}

/// A watched video. Appended on every submit; no deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub owner_id: String,
    pub video_url: String,
    pub video_id: String,
    /// Unix seconds.
    pub recorded_at: i64,
}

/// Personal note kept alongside videos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub owner_key: String,
    pub title: String,
    pub content: String,
    /// Unix seconds.
    pub created_at: i64,
}

impl Note {
    /// Case-insensitive match on title or content. Empty query matches everything.
    pub fn matches(&self, query: &str) -> bool {
        let q = query.trim().to_lowercase();
        q.is_empty()
            || self.title.to_lowercase().contains(&q)
            || self.content.to_lowercase().contains(&q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_from_result() {
        let ok: Outcome = Ok::<_, DomainError>("hello".to_string()).into();
        assert!(ok.is_success());
        assert_eq!(ok.text(), Some("hello"));
        assert!(ok.error().is_none());

        let err: Outcome = Err(DomainError::EmptyTranscript).into();
        assert!(!err.is_success());
        assert_eq!(err.text(), None);
        assert_eq!(err.error(), Some(&DomainError::EmptyTranscript));
    }

    #[test]
    fn test_note_matches() {
        let note = Note {
            id: "n1".into(),
            owner_key: "a".into(),
            title: "Rust Ownership".into(),
            content: "Borrowing rules".into(),
            created_at: 0,
        };
        assert!(note.matches(""));
        assert!(note.matches("ownership"));
        assert!(note.matches("BORROW"));
        assert!(!note.matches("lifetimes"));
    }
}
