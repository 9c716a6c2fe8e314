//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{Account, DomainError, HistoryEntry, Note, VideoId};

/// Transcript extraction capability. Production spawns the external worker;
/// tests substitute a fake so no process is started.
#[async_trait::async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch plain transcript text for a video. Never retries.
    async fn fetch_transcript(&self, video_id: &VideoId) -> Result<String, DomainError>;
}

/// Text-generation service (summaries and chat answers). Opaque text in, text out.
#[async_trait::async_trait]
pub trait GenerationPort: Send + Sync {
    /// One outbound call with the fixed summary instruction plus `transcript`.
    async fn summarize(&self, transcript: &str) -> Result<String, DomainError>;

    /// Answer `query` using `transcript` as the only context.
    async fn chat(&self, transcript: &str, query: &str) -> Result<String, DomainError>;
}

/// Account store. Credential lookup only; hashing happens in the use case.
#[async_trait::async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert a new account. Returns `DuplicateEmail` if the email is taken.
    async fn insert_account(&self, account: &Account) -> Result<(), DomainError>;

    /// Look up an account by normalised email.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;
}

/// Watch-history store. Append/query only.
#[async_trait::async_trait]
pub trait HistoryStore: Send + Sync {
    async fn append(&self, entry: &HistoryEntry) -> Result<(), DomainError>;

    /// All entries for an owner, newest first.
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<HistoryEntry>, DomainError>;
}

/// Notes store. Plain records keyed by owner; no conflict resolution.
#[async_trait::async_trait]
pub trait NoteStore: Send + Sync {
    async fn append(&self, note: &Note) -> Result<(), DomainError>;

    /// All notes for an owner, newest first.
    async fn list(&self, owner_key: &str) -> Result<Vec<Note>, DomainError>;

    /// Replace title and content. Returns `NotFound` if `(owner_key, id)` does not exist.
    async fn update(
        &self,
        owner_key: &str,
        id: &str,
        title: &str,
        content: &str,
    ) -> Result<Note, DomainError>;

    /// Returns `NotFound` if `(owner_key, id)` does not exist.
    async fn delete(&self, owner_key: &str, id: &str) -> Result<(), DomainError>;

    /// Remove every note of an owner. Returns the number removed.
    async fn clear(&self, owner_key: &str) -> Result<u64, DomainError>;
}
