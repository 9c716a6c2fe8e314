//! Axum handlers. Thin: extract, call a port or service, shape the response.
//!
//! Status mapping follows `ErrorClass::status`. Clients only ever see
//! `DomainError::public_message`; full diagnostics are logged here.

use super::dto::*;
use super::AppState;
use crate::domain::{DomainError, ErrorClass, Outcome};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{error, warn};

/// Unwrap a JSON body; a missing or malformed body becomes `T::default()` so
/// validation reports it in the endpoint's own error shape.
fn body<T: Default>(payload: Result<Json<T>, JsonRejection>) -> T {
    match payload {
        Ok(Json(v)) => v,
        Err(rejection) => {
            warn!(error = %rejection, "request body rejected");
            T::default()
        }
    }
}

fn status_of(err: &DomainError) -> StatusCode {
    StatusCode::from_u16(err.class().status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Log at a level matching the class: caller mistakes are warnings, upstream failures errors.
fn log_failure(route: &str, err: &DomainError) {
    match err.class() {
        ErrorClass::Upstream | ErrorClass::Parse => error!(route, error = %err, "request failed"),
        _ => warn!(route, error = %err, "request rejected"),
    }
}

/// `{success:false, message}` with the class status.
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            status_of(&self.0),
            Json(AckResponse::failed(self.0.public_message())),
        )
            .into_response()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Video pipeline
// ─────────────────────────────────────────────────────────────────────────────

pub async fn get_transcript(
    State(state): State<AppState>,
    payload: Result<Json<TranscriptRequest>, JsonRejection>,
) -> Response {
    let req = body(payload);
    let url = req.video_url.unwrap_or_default();

    match state.learning.get_transcript(&url).await {
        Outcome::Success { text } => Json(TranscriptResponse {
            success: true,
            transcript: Some(text),
            message: None,
        })
        .into_response(),
        Outcome::Failure { error } => {
            log_failure("/getTranscript", &error);
            (
                status_of(&error),
                Json(TranscriptResponse {
                    success: false,
                    transcript: None,
                    message: Some(error.public_message()),
                }),
            )
                .into_response()
        }
    }
}

pub async fn get_summary(
    State(state): State<AppState>,
    payload: Result<Json<SummaryRequest>, JsonRejection>,
) -> Response {
    let req = body(payload);
    let transcript = req.transcript.unwrap_or_default();

    match state.learning.get_summary(&transcript).await {
        Outcome::Success { text } => Json(SummaryResponse { summary: text }).into_response(),
        Outcome::Failure { error } => {
            log_failure("/getSummary", &error);
            (
                status_of(&error),
                Json(SummaryResponse {
                    summary: SUMMARY_ERROR_PLACEHOLDER.to_string(),
                }),
            )
                .into_response()
        }
    }
}

pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let req = body(payload);
    let query = req.query.unwrap_or_default();
    let transcript = req.transcript.unwrap_or_default();

    match state.learning.chat(&transcript, &query).await {
        Ok(answer) => Json(ChatResponse { answer }).into_response(),
        Err(error) => {
            log_failure("/chat", &error);
            (
                status_of(&error),
                Json(ChatResponse {
                    answer: CHAT_ERROR_PLACEHOLDER.to_string(),
                }),
            )
                .into_response()
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Accounts
// ─────────────────────────────────────────────────────────────────────────────

pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let req = body(payload);
    let email = req.email.unwrap_or_default();
    let password = req.password.unwrap_or_default();

    state
        .accounts
        .create_account(&email, &password)
        .await
        .inspect_err(|e| log_failure("/api/signup", e))?;

    Ok((
        StatusCode::CREATED,
        Json(AckResponse::ok("User created successfully")),
    )
        .into_response())
}

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<AckResponse>, ApiError> {
    let req = body(payload);
    let email = req.email.unwrap_or_default();
    let password = req.password.unwrap_or_default();

    let account_id = state
        .accounts
        .authenticate(&email, &password)
        .await
        .inspect_err(|e| log_failure("/api/login", e))?;

    Ok(Json(AckResponse {
        account_id: Some(account_id.0),
        ..AckResponse::ok("Login successful")
    }))
}

// ─────────────────────────────────────────────────────────────────────────────
// History
// ─────────────────────────────────────────────────────────────────────────────

pub async fn add_history(
    State(state): State<AppState>,
    payload: Result<Json<HistoryRequest>, JsonRejection>,
) -> Result<Json<AckResponse>, ApiError> {
    let req = body(payload);
    let user_id = req.user_id.unwrap_or_default();
    let video_url = req.video_url.unwrap_or_default();

    state
        .history
        .record(&user_id, &video_url)
        .await
        .inspect_err(|e| log_failure("/api/history", e))?;

    Ok(Json(AckResponse::ok("History saved")))
}

pub async fn list_history(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<HistoryListResponse>, ApiError> {
    let entries = state
        .history
        .list(&user_id)
        .await
        .inspect_err(|e| log_failure("/api/history/:user_id", e))?;

    Ok(Json(HistoryListResponse {
        videos: entries.into_iter().map(HistoryItem::from).collect(),
    }))
}

// ─────────────────────────────────────────────────────────────────────────────
// Notes
// ─────────────────────────────────────────────────────────────────────────────

pub async fn create_note(
    State(state): State<AppState>,
    payload: Result<Json<NoteRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let req = body(payload);
    let owner = req.owner_id.unwrap_or_default();

    let note = state
        .notes
        .create(
            &owner,
            req.title.as_deref().unwrap_or_default(),
            req.content.as_deref().unwrap_or_default(),
        )
        .await
        .inspect_err(|e| log_failure("/api/notes", e))?;

    Ok((
        StatusCode::CREATED,
        Json(NoteResponse {
            success: true,
            note: note.into(),
        }),
    )
        .into_response())
}

pub async fn list_notes(
    State(state): State<AppState>,
    Path(owner): Path<String>,
    Query(query): Query<NotesQuery>,
) -> Result<Json<NotesListResponse>, ApiError> {
    let notes = state
        .notes
        .list(&owner, query.q.as_deref())
        .await
        .inspect_err(|e| log_failure("/api/notes/:owner", e))?;

    Ok(Json(NotesListResponse {
        notes: notes.into_iter().map(NoteItem::from).collect(),
    }))
}

pub async fn update_note(
    State(state): State<AppState>,
    Path((owner, id)): Path<(String, String)>,
    payload: Result<Json<NoteRequest>, JsonRejection>,
) -> Result<Json<NoteResponse>, ApiError> {
    let req = body(payload);

    let note = state
        .notes
        .update(
            &owner,
            &id,
            req.title.as_deref().unwrap_or_default(),
            req.content.as_deref().unwrap_or_default(),
        )
        .await
        .inspect_err(|e| log_failure("/api/notes/:owner/:id", e))?;

    Ok(Json(NoteResponse {
        success: true,
        note: note.into(),
    }))
}

pub async fn delete_note(
    State(state): State<AppState>,
    Path((owner, id)): Path<(String, String)>,
) -> Result<Json<AckResponse>, ApiError> {
    state
        .notes
        .delete(&owner, &id)
        .await
        .inspect_err(|e| log_failure("/api/notes/:owner/:id", e))?;

    Ok(Json(AckResponse::ok("Note deleted")))
}

pub async fn clear_notes(
    State(state): State<AppState>,
    Path(owner): Path<String>,
) -> Result<Json<ClearResponse>, ApiError> {
    let removed = state
        .notes
        .clear(&owner)
        .await
        .inspect_err(|e| log_failure("/api/notes/:owner", e))?;

    Ok(Json(ClearResponse {
        success: true,
        removed,
    }))
}
