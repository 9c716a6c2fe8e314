//! Request and response bodies of the HTTP surface (camelCase JSON).
//!
//! Request fields are optional so that missing fields reach validation and
//! produce the endpoint's own error body instead of a framework rejection.

use crate::domain::{HistoryEntry, Note};
use chrono::DateTime;
use serde::{Deserialize, Serialize};

/// Body of `POST /getSummary` on failure.
pub const SUMMARY_ERROR_PLACEHOLDER: &str = "Error generating summary";

/// Body of `POST /chat` on failure.
pub const CHAT_ERROR_PLACEHOLDER: &str = "Error with chatbot";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptRequest {
    #[serde(default)]
    pub video_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TranscriptResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub transcript: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SummaryRequest {
    #[serde(default)]
    pub transcript: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SummaryResponse {
    pub summary: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub transcript: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatResponse {
    pub answer: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Generic `{success, message}` acknowledgement, also used for every error body.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AckResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub account_id: Option<String>,
}

impl AckResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            account_id: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            account_id: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub video_url: String,
    pub video_id: String,
    /// RFC 3339.
    pub recorded_at: String,
}

impl From<HistoryEntry> for HistoryItem {
    fn from(e: HistoryEntry) -> Self {
        Self {
            video_url: e.video_url,
            video_id: e.video_id,
            recorded_at: rfc3339(e.recorded_at),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryListResponse {
    pub videos: Vec<HistoryItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRequest {
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NotesQuery {
    #[serde(default)]
    pub q: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteItem {
    pub id: String,
    pub title: String,
    pub content: String,
    /// RFC 3339.
    pub created_at: String,
}

impl From<Note> for NoteItem {
    fn from(n: Note) -> Self {
        Self {
            id: n.id,
            title: n.title,
            content: n.content,
            created_at: rfc3339(n.created_at),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NoteResponse {
    pub success: bool,
    pub note: NoteItem,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NotesListResponse {
    pub notes: Vec<NoteItem>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClearResponse {
    pub success: bool,
    pub removed: u64,
}

fn rfc3339(unix_secs: i64) -> String {
    DateTime::from_timestamp(unix_secs, 0)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_response_shape() {
        let ok = TranscriptResponse {
            success: true,
            transcript: Some("hello world.".into()),
            message: None,
        };
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            serde_json::json!({"success": true, "transcript": "hello world."})
        );
    }

    #[test]
    fn test_camel_case_requests() {
        let req: TranscriptRequest =
            serde_json::from_str(r#"{"videoUrl": "https://youtu.be/dQw4w9WgXcQ"}"#).unwrap();
        assert_eq!(req.video_url.as_deref(), Some("https://youtu.be/dQw4w9WgXcQ"));

        let req: HistoryRequest = serde_json::from_str(r#"{"userId": "u"}"#).unwrap();
        assert_eq!(req.user_id.as_deref(), Some("u"));
        assert!(req.video_url.is_none());
    }

    #[test]
    fn test_rfc3339() {
        assert_eq!(rfc3339(0), "1970-01-01T00:00:00+00:00");
    }
}
