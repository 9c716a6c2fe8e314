//! Router-level tests. Drive the axum Router with `oneshot`; the transcript
//! worker and generation service are replaced by in-process fakes.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tower::ServiceExt;
use vidlearn::adapters::http::{AppState, router};
use vidlearn::adapters::persistence::SqliteRepo;
use vidlearn::domain::{DomainError, VideoId};
use vidlearn::ports::{GenerationPort, TranscriptSource};
use vidlearn::usecases::{
    AccountService, HistoryService, NotesService, PipelineService, SummarizerService,
    SummaryPolicy,
};

struct FakeSource {
    calls: AtomicUsize,
    reply: Result<String, DomainError>,
}

#[async_trait::async_trait]
impl TranscriptSource for FakeSource {
    async fn fetch_transcript(&self, _video_id: &VideoId) -> Result<String, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone()
    }
}

/// Deterministic generator, or always failing when `fail` is set.
struct FakeGenerator {
    fail: bool,
}

#[async_trait::async_trait]
impl GenerationPort for FakeGenerator {
    async fn summarize(&self, transcript: &str) -> Result<String, DomainError> {
        if self.fail {
            return Err(DomainError::ServiceUnavailable("503 from upstream".into()));
        }
        Ok(format!("Summary of {} chars.", transcript.len()))
    }

    async fn chat(&self, _transcript: &str, query: &str) -> Result<String, DomainError> {
        if self.fail {
            return Err(DomainError::ServiceUnavailable("503 from upstream".into()));
        }
        Ok(format!("Answer to: {query}"))
    }
}

struct Harness {
    _dir: tempfile::TempDir,
    app: Router,
    source: Arc<FakeSource>,
}

async fn harness(transcript: Result<String, DomainError>, generator_fails: bool) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let repo = Arc::new(SqliteRepo::connect(dir.path()).await.unwrap());
    let source = Arc::new(FakeSource {
        calls: AtomicUsize::new(0),
        reply: transcript,
    });
    let summarizer = Arc::new(SummarizerService::new(
        Arc::new(FakeGenerator {
            fail: generator_fails,
        }),
        SummaryPolicy::default(),
    ));
    let state = AppState {
        learning: Arc::new(PipelineService::new(
            source.clone(),
            summarizer,
            Duration::from_secs(5),
        )),
        accounts: Arc::new(AccountService::new(repo.clone())),
        history: Arc::new(HistoryService::new(repo.clone())),
        notes: Arc::new(NotesService::new(repo)),
    };
    Harness {
        _dir: dir,
        app: router(state, &[]),
        source,
    }
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    let request = match body {
        Some(v) => builder.body(Body::from(v.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn transcript_for_watch_url() {
    let h = harness(Ok("hello world.".into()), false).await;
    let (status, body) = send(
        &h.app,
        "POST",
        "/getTranscript",
        Some(json!({"videoUrl": "https://www.youtube.com/watch?v=dQw4w9WgXcQ"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "transcript": "hello world."}));
    assert_eq!(h.source.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn transcript_for_foreign_url_is_400() {
    let h = harness(Ok("unused".into()), false).await;
    let (status, body) = send(
        &h.app,
        "POST",
        "/getTranscript",
        Some(json!({"videoUrl": "https://example.com/not-youtube"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"success": false, "message": "Invalid YouTube URL"}));
    assert_eq!(h.source.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn transcript_without_url_is_400() {
    let h = harness(Ok("unused".into()), false).await;
    let (status, body) = send(&h.app, "POST", "/getTranscript", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "No video URL provided");

    let (status, body) = send(&h.app, "POST", "/getTranscript", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(h.source.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn transcript_worker_failure_is_500_without_internals() {
    let h = harness(
        Err(DomainError::OutputParseError("expected value at line 1".into())),
        false,
    )
    .await;
    let (status, body) = send(
        &h.app,
        "POST",
        "/getTranscript",
        Some(json!({"videoUrl": "https://youtu.be/dQw4w9WgXcQ"})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"success": false, "message": "Transcript parse error"}));
}

#[tokio::test]
async fn summary_success_and_idempotence() {
    let h = harness(Ok(String::new()), false).await;
    let req = json!({"transcript": "A. B. C."});
    let (status, first) = send(&h.app, "POST", "/getSummary", Some(req.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert!(first["summary"].as_str().is_some_and(|s| !s.is_empty()));
    let (_, second) = send(&h.app, "POST", "/getSummary", Some(req)).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn summary_generator_failure_keeps_shape() {
    let h = harness(Ok(String::new()), true).await;
    let (status, body) = send(
        &h.app,
        "POST",
        "/getSummary",
        Some(json!({"transcript": "A. B. C."})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"summary": "Error generating summary"}));
}

#[tokio::test]
async fn summary_of_empty_transcript_is_400() {
    let h = harness(Ok(String::new()), false).await;
    let (status, body) = send(&h.app, "POST", "/getSummary", Some(json!({"transcript": ""}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"summary": "Error generating summary"}));
}

#[tokio::test]
async fn chat_round_trip() {
    let h = harness(Ok(String::new()), false).await;
    let (status, body) = send(
        &h.app,
        "POST",
        "/chat",
        Some(json!({"query": "What is it about?", "transcript": "A. B."})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"answer": "Answer to: What is it about?"}));

    let (status, body) = send(&h.app, "POST", "/chat", Some(json!({"transcript": "A."}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"answer": "Error with chatbot"}));
}

#[tokio::test]
async fn signup_and_login() {
    let h = harness(Ok(String::new()), false).await;
    let creds = json!({"email": "ada@example.com", "password": "secret"});

    let (status, body) = send(&h.app, "POST", "/api/signup", Some(creds.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);

    let (status, _) = send(&h.app, "POST", "/api/signup", Some(creds.clone())).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(&h.app, "POST", "/api/login", Some(creds)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["accountId"].as_str().is_some());

    let (status, body) = send(
        &h.app,
        "POST",
        "/api/login",
        Some(json!({"email": "ada@example.com", "password": "nope"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body,
        json!({"success": false, "message": "Invalid email or password"})
    );
}

#[tokio::test]
async fn history_append_and_list() {
    let h = harness(Ok(String::new()), false).await;
    let (status, _) = send(
        &h.app,
        "POST",
        "/api/history",
        Some(json!({"userId": "ada", "videoUrl": "https://www.youtube.com/watch?v=dQw4w9WgXcQ"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &h.app,
        "POST",
        "/api/history",
        Some(json!({"userId": "ada", "videoUrl": "https://example.com/x"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&h.app, "GET", "/api/history/ada", None).await;
    assert_eq!(status, StatusCode::OK);
    let videos = body["videos"].as_array().unwrap();
    assert_eq!(videos.len(), 1);
    assert_eq!(videos[0]["videoId"], "dQw4w9WgXcQ");
}

#[tokio::test]
async fn notes_lifecycle() {
    let h = harness(Ok(String::new()), false).await;
    let (status, body) = send(
        &h.app,
        "POST",
        "/api/notes",
        Some(json!({"ownerId": "ada", "title": "Ownership", "content": "borrowing"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["note"]["id"].as_str().unwrap().to_string();

    let (_, body) = send(&h.app, "GET", "/api/notes/ada?q=borrow", None).await;
    assert_eq!(body["notes"].as_array().unwrap().len(), 1);

    let (status, body) = send(
        &h.app,
        "PUT",
        &format!("/api/notes/ada/{id}"),
        Some(json!({"title": "Moves", "content": "and copies"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["note"]["title"], "Moves");

    let (status, _) = send(&h.app, "DELETE", &format!("/api/notes/ada/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&h.app, "DELETE", &format!("/api/notes/ada/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    send(&h.app, "POST", "/api/notes", Some(json!({"ownerId": "ada"}))).await;
    let (status, body) = send(&h.app, "DELETE", "/api/notes/ada", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["removed"], 1);
}
