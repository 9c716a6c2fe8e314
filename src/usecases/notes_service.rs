//! Personal notes. Explicit store interface (append, list, update, delete, clear)
//! in place of browser-local state.

use crate::domain::{DomainError, Note};
use crate::ports::NoteStore;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

const DEFAULT_TITLE: &str = "New Note";

pub struct NotesService {
    store: Arc<dyn NoteStore>,
}

impl NotesService {
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self { store }
    }

    fn require_owner(owner_key: &str) -> Result<&str, DomainError> {
        let owner_key = owner_key.trim();
        if owner_key.is_empty() {
            return Err(DomainError::Validation("owner is required".to_string()));
        }
        Ok(owner_key)
    }

    /// Create a note. A blank title becomes "New Note".
    pub async fn create(
        &self,
        owner_key: &str,
        title: &str,
        content: &str,
    ) -> Result<Note, DomainError> {
        let owner_key = Self::require_owner(owner_key)?;
        let title = match title.trim() {
            "" => DEFAULT_TITLE,
            t => t,
        };
        let note = Note {
            id: format!("note-{}", Uuid::new_v4().simple()),
            owner_key: owner_key.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            created_at: chrono::Utc::now().timestamp(),
        };
        self.store.append(&note).await?;
        info!(owner_key, note_id = %note.id, "note created");
        Ok(note)
    }

    /// Notes of an owner, newest first, filtered by `query` when given.
    pub async fn list(
        &self,
        owner_key: &str,
        query: Option<&str>,
    ) -> Result<Vec<Note>, DomainError> {
        let owner_key = Self::require_owner(owner_key)?;
        let notes = self.store.list(owner_key).await?;
        Ok(match query {
            Some(q) => notes.into_iter().filter(|n| n.matches(q)).collect(),
            None => notes,
        })
    }

    pub async fn update(
        &self,
        owner_key: &str,
        id: &str,
        title: &str,
        content: &str,
    ) -> Result<Note, DomainError> {
        let owner_key = Self::require_owner(owner_key)?;
        let title = match title.trim() {
            "" => DEFAULT_TITLE,
            t => t,
        };
        self.store.update(owner_key, id, title, content).await
    }

    pub async fn delete(&self, owner_key: &str, id: &str) -> Result<(), DomainError> {
        let owner_key = Self::require_owner(owner_key)?;
        self.store.delete(owner_key, id).await?;
        info!(owner_key, note_id = id, "note deleted");
        Ok(())
    }

    pub async fn clear(&self, owner_key: &str) -> Result<u64, DomainError> {
        let owner_key = Self::require_owner(owner_key)?;
        let removed = self.store.clear(owner_key).await?;
        info!(owner_key, removed, "notes cleared");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::persistence::SqliteRepo;

    async fn service() -> (tempfile::TempDir, NotesService) {
        let dir = tempfile::tempdir().unwrap();
        let repo = SqliteRepo::connect(dir.path()).await.unwrap();
        (dir, NotesService::new(Arc::new(repo)))
    }

    #[tokio::test]
    async fn test_create_defaults_title() {
        let (_dir, svc) = service().await;
        let note = svc.create("me", "  ", "Start writing here...").await.unwrap();
        assert_eq!(note.title, "New Note");
        assert!(note.id.starts_with("note-"));
    }

    #[tokio::test]
    async fn test_list_with_query() {
        let (_dir, svc) = service().await;
        svc.create("me", "Ownership", "moves and borrows").await.unwrap();
        svc.create("me", "Async", "futures are lazy").await.unwrap();
        assert_eq!(svc.list("me", None).await.unwrap().len(), 2);
        let hits = svc.list("me", Some("BORROW")).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Ownership");
    }

    #[tokio::test]
    async fn test_update_delete_clear() {
        let (_dir, svc) = service().await;
        let note = svc.create("me", "T", "C").await.unwrap();
        let updated = svc.update("me", &note.id, "T2", "C2").await.unwrap();
        assert_eq!((updated.title.as_str(), updated.content.as_str()), ("T2", "C2"));

        svc.delete("me", &note.id).await.unwrap();
        assert!(matches!(
            svc.delete("me", &note.id).await,
            Err(DomainError::NotFound(_))
        ));

        svc.create("me", "a", "").await.unwrap();
        svc.create("me", "b", "").await.unwrap();
        assert_eq!(svc.clear("me").await.unwrap(), 2);
        assert!(svc.list("me", None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_owner_required() {
        let (_dir, svc) = service().await;
        assert!(matches!(
            svc.list(" ", None).await,
            Err(DomainError::Validation(_))
        ));
    }
}
