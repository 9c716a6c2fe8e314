//! Application configuration. Server address, worker command, AI credentials, paths.

use serde::Deserialize;
use std::time::Duration;

/// Default cap on transcript characters sent to the generation service.
pub const DEFAULT_MAX_TRANSCRIPT_CHARS: usize = 100_000;

const DEFAULT_CORS_ORIGINS: &str = "http://localhost:8080,http://localhost:5173";

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Listen address. Read from VIDLEARN_BIND_ADDR.
    #[serde(default)]
    pub bind_addr: Option<String>,

    /// Listen port. Read from VIDLEARN_PORT, or plain PORT.
    #[serde(default)]
    pub port: Option<u16>,

    /// Directory holding vidlearn.db. Read from VIDLEARN_DATA_DIR.
    #[serde(default)]
    pub data_dir: Option<String>,

    /// Comma-separated allowed browser origins. Read from VIDLEARN_CORS_ORIGINS.
    #[serde(default)]
    pub cors_origins: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Transcript worker
    // ─────────────────────────────────────────────────────────────────────────
    /// Program to spawn. Read from VIDLEARN_WORKER_PROGRAM.
    #[serde(default)]
    pub worker_program: Option<String>,

    /// Script passed before the video id (set to empty to pass none).
    /// Read from VIDLEARN_WORKER_SCRIPT.
    #[serde(default)]
    pub worker_script: Option<String>,

    /// Bounded wait on the worker. Read from VIDLEARN_WORKER_TIMEOUT_SECS.
    #[serde(default)]
    pub worker_timeout_secs: Option<u64>,

    // ─────────────────────────────────────────────────────────────────────────
    // Generation service
    // ─────────────────────────────────────────────────────────────────────────
    /// API key. Read from VIDLEARN_AI_API_KEY.
    #[serde(default)]
    pub ai_api_key: Option<String>,

    /// Chat completions endpoint. Defaults to OpenAI. Read from VIDLEARN_AI_API_URL.
    #[serde(default)]
    pub ai_api_url: Option<String>,

    /// Model name. Defaults to "gpt-4o-mini". Read from VIDLEARN_AI_MODEL.
    #[serde(default)]
    pub ai_model: Option<String>,

    /// Bounded wait on each generation call. Read from VIDLEARN_AI_TIMEOUT_SECS.
    #[serde(default)]
    pub ai_timeout_secs: Option<u64>,

    /// Sentence count in the summary instruction, e.g. "3-5". Read from VIDLEARN_SUMMARY_SENTENCES.
    #[serde(default)]
    pub summary_sentences: Option<String>,

    /// Longer transcripts are truncated. Read from VIDLEARN_MAX_TRANSCRIPT_CHARS.
    #[serde(default)]
    pub max_transcript_chars: Option<usize>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("VIDLEARN"));
        if let Ok(path) = std::env::var("VIDLEARN_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        let mut cfg: Self = c.build()?.try_deserialize()?;
        // PORT is read directly (no prefix) so common hosting platforms work unchanged
        if cfg.port.is_none() {
            if let Ok(s) = std::env::var("PORT") {
                if let Ok(p) = s.parse::<u16>() {
                    cfg.port = Some(p);
                }
            }
        }
        Ok(cfg)
    }

    pub fn bind_addr_or_default(&self) -> String {
        let host = self.bind_addr.as_deref().unwrap_or("0.0.0.0");
        format!("{}:{}", host, self.port.unwrap_or(3000))
    }

    pub fn data_dir_or_default(&self) -> String {
        self.data_dir.clone().unwrap_or_else(|| "./data".to_string())
    }

    /// Allowed CORS origins. Blank entries are dropped.
    pub fn cors_origins_or_default(&self) -> Vec<String> {
        self.cors_origins
            .as_deref()
            .unwrap_or(DEFAULT_CORS_ORIGINS)
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Worker Helpers
    // ─────────────────────────────────────────────────────────────────────────

    pub fn worker_program_or_default(&self) -> String {
        self.worker_program
            .clone()
            .unwrap_or_else(|| "python3".to_string())
    }

    /// Leading worker arguments. Empty when the script is configured as "".
    pub fn worker_args_or_default(&self) -> Vec<String> {
        match self.worker_script.as_deref() {
            Some("") => Vec::new(),
            Some(s) => vec![s.to_string()],
            None => vec!["get_transcript.py".to_string()],
        }
    }

    /// Defaults to 60 seconds.
    pub fn worker_timeout(&self) -> Duration {
        Duration::from_secs(self.worker_timeout_secs.unwrap_or(60))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // AI Configuration Helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the AI API key if configured and non-blank.
    pub fn ai_api_key(&self) -> Option<String> {
        self.ai_api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
    }

    /// Returns the AI API URL. Defaults to OpenAI chat completions endpoint.
    pub fn ai_api_url_or_default(&self) -> String {
        self.ai_api_url
            .clone()
            .unwrap_or_else(|| "https://api.openai.com/v1/chat/completions".to_string())
    }

    pub fn ai_model_or_default(&self) -> String {
        self.ai_model
            .clone()
            .unwrap_or_else(|| "gpt-4o-mini".to_string())
    }

    /// Defaults to 60 seconds.
    pub fn ai_timeout(&self) -> Duration {
        Duration::from_secs(self.ai_timeout_secs.unwrap_or(60))
    }

    pub fn summary_sentences_or_default(&self) -> String {
        self.summary_sentences
            .clone()
            .unwrap_or_else(|| "3-5".to_string())
    }

    pub fn max_transcript_chars_or_default(&self) -> usize {
        self.max_transcript_chars
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_MAX_TRANSCRIPT_CHARS)
    }

    /// Returns true if a real generation service is configured (API key present).
    pub fn is_ai_configured(&self) -> bool {
        self.ai_api_key().is_some()
    }
}
