//! HTTP adapter. Drives the inbound port and the collaborator services over JSON.

pub mod dto;
pub mod routes;

use crate::ports::VideoLearningPort;
use crate::usecases::{AccountService, HistoryService, NotesService};
use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post, put};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Shared handler state. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub learning: Arc<dyn VideoLearningPort>,
    pub accounts: Arc<AccountService>,
    pub history: Arc<HistoryService>,
    pub notes: Arc<NotesService>,
}

/// Build the router. CORS is applied only when `cors_origins` is non-empty.
pub fn router(state: AppState, cors_origins: &[String]) -> Router {
    let app = Router::new()
        .route("/getTranscript", post(routes::get_transcript))
        .route("/getSummary", post(routes::get_summary))
        .route("/chat", post(routes::chat))
        .route("/api/signup", post(routes::signup))
        .route("/api/login", post(routes::login))
        .route("/api/history", post(routes::add_history))
        .route("/api/history/:user_id", get(routes::list_history))
        .route("/api/notes", post(routes::create_note))
        .route(
            "/api/notes/:owner",
            get(routes::list_notes).delete(routes::clear_notes),
        )
        .route(
            "/api/notes/:owner/:id",
            put(routes::update_note).delete(routes::delete_note),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    match cors_layer(cors_origins) {
        Some(cors) => app.layer(cors),
        None => app,
    }
}

fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(origin = %o, error = %e, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    if allowed.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
            .allow_credentials(true),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_layer_skips_invalid_origins() {
        assert!(cors_layer(&[]).is_none());
        assert!(cors_layer(&["bad\norigin".to_string()]).is_none());
        assert!(cors_layer(&["http://localhost:5173".to_string()]).is_some());
    }
}
