//! Watch history. Every submitted video is appended; listing is newest first.

use crate::domain::{DomainError, HistoryEntry, video_ref};
use crate::ports::HistoryStore;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub struct HistoryService {
    store: Arc<dyn HistoryStore>,
}

impl HistoryService {
    pub fn new(store: Arc<dyn HistoryStore>) -> Self {
        Self { store }
    }

    /// Record that `owner_id` watched `video_url`. The URL must pass the reference parser.
    pub async fn record(
        &self,
        owner_id: &str,
        video_url: &str,
    ) -> Result<HistoryEntry, DomainError> {
        let owner_id = owner_id.trim();
        if owner_id.is_empty() {
            return Err(DomainError::Validation("user id is required".to_string()));
        }
        let video_id = video_ref::parse(video_url)?;

        let entry = HistoryEntry {
            id: Uuid::new_v4().to_string(),
            owner_id: owner_id.to_string(),
            video_url: video_url.trim().to_string(),
            video_id: video_id.to_string(),
            recorded_at: chrono::Utc::now().timestamp(),
        };
        self.store.append(&entry).await?;
        info!(owner_id, video_id = %video_id, "history recorded");
        Ok(entry)
    }

    pub async fn list(&self, owner_id: &str) -> Result<Vec<HistoryEntry>, DomainError> {
        self.store.list_by_owner(owner_id.trim()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::persistence::SqliteRepo;

    async fn service() -> (tempfile::TempDir, HistoryService) {
        let dir = tempfile::tempdir().unwrap();
        let repo = SqliteRepo::connect(dir.path()).await.unwrap();
        (dir, HistoryService::new(Arc::new(repo)))
    }

    #[tokio::test]
    async fn test_record_and_list() {
        let (_dir, svc) = service().await;
        let entry = svc
            .record("ada@example.com", "https://www.youtube.com/watch?v=dQw4w9WgXcQ")
            .await
            .unwrap();
        assert_eq!(entry.video_id, "dQw4w9WgXcQ");
        svc.record("ada@example.com", "https://youtu.be/aaaaaaaaaaa")
            .await
            .unwrap();

        let listed = svc.list("ada@example.com").await.unwrap();
        assert_eq!(listed.len(), 2);
        assert!(svc.list("someone-else").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rejects_bad_input() {
        let (_dir, svc) = service().await;
        assert!(matches!(
            svc.record("", "https://youtu.be/dQw4w9WgXcQ").await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            svc.record("u", "https://example.com/video").await,
            Err(DomainError::MalformedUrl(_))
        ));
    }
}
