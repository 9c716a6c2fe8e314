//! Wiring & DI. Entry point: bootstrap adapters, inject into services, serve HTTP.
//! No business logic here.

use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vidlearn::adapters::ai::{MockGenerationAdapter, OpenAiAdapter};
use vidlearn::adapters::http::{router, AppState};
use vidlearn::adapters::persistence::SqliteRepo;
use vidlearn::adapters::tools::SubprocessTranscriptSource;
use vidlearn::ports::{
    AccountStore, GenerationPort, HistoryStore, NoteStore, TranscriptSource, VideoLearningPort,
};
use vidlearn::shared::config::AppConfig;
use vidlearn::usecases::{
    AccountService, HistoryService, NotesService, PipelineService, SummarizerService,
    SummaryPolicy,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    let cfg = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "config could not be loaded, using defaults");
        AppConfig::default()
    });

    // --- Storage: one libsql file for accounts, history and notes ---
    let data_dir = PathBuf::from(cfg.data_dir_or_default());
    let repo = Arc::new(
        SqliteRepo::connect(&data_dir)
            .await
            .map_err(|e| anyhow::anyhow!("SQLite connect failed: {}", e))?,
    );
    let accounts: Arc<dyn AccountStore> = Arc::clone(&repo) as Arc<dyn AccountStore>;
    let history: Arc<dyn HistoryStore> = Arc::clone(&repo) as Arc<dyn HistoryStore>;
    let notes: Arc<dyn NoteStore> = Arc::clone(&repo) as Arc<dyn NoteStore>;

    // --- Transcript worker ---
    let worker_program = cfg.worker_program_or_default();
    let worker_args = cfg.worker_args_or_default();
    info!(
        program = %worker_program,
        args = ?worker_args,
        timeout_secs = cfg.worker_timeout().as_secs(),
        "transcript worker configured"
    );
    let source: Arc<dyn TranscriptSource> =
        Arc::new(SubprocessTranscriptSource::new(worker_program, worker_args));

    // --- Generation service ---
    let ai: Arc<dyn GenerationPort> = if cfg.is_ai_configured() {
        info!(
            model = %cfg.ai_model_or_default(),
            url = %cfg.ai_api_url_or_default(),
            "generation enabled with OpenAI adapter"
        );
        Arc::new(OpenAiAdapter::new(
            cfg.ai_api_url_or_default(),
            cfg.ai_api_key().unwrap_or_default(),
            cfg.ai_model_or_default(),
            cfg.summary_sentences_or_default(),
            cfg.ai_timeout(),
        ))
    } else {
        warn!("VIDLEARN_AI_API_KEY not set, using mock generation adapter");
        Arc::new(MockGenerationAdapter::new())
    };

    // --- Services ---
    let summarizer = Arc::new(SummarizerService::new(
        ai,
        SummaryPolicy {
            max_chars: cfg.max_transcript_chars_or_default(),
            timeout: cfg.ai_timeout(),
        },
    ));
    let learning: Arc<dyn VideoLearningPort> = Arc::new(PipelineService::new(
        source,
        summarizer,
        cfg.worker_timeout(),
    ));

    let state = AppState {
        learning,
        accounts: Arc::new(AccountService::new(accounts)),
        history: Arc::new(HistoryService::new(history)),
        notes: Arc::new(NotesService::new(notes)),
    };
    let app = router(state, &cfg.cors_origins_or_default());

    // --- Serve until Ctrl-C ---
    let addr = cfg.bind_addr_or_default();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("bind {}: {}", addr, e))?;
    info!(addr = %addr, "server is running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
