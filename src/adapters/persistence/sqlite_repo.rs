//! SQLite-backed stores via libsql. Implements AccountStore, HistoryStore and NoteStore.
//!
//! All records share one database file: data/vidlearn.db. Records are plain rows
//! keyed by owner; there is no conflict resolution beyond the unique email.

use crate::domain::{Account, AccountId, DomainError, HistoryEntry, Note};
use crate::ports::{AccountStore, HistoryStore, NoteStore};
use libsql::{params, Connection, Database, Row};
use std::path::Path;
use tracing::{debug, info};

const DB_FILE: &str = "vidlearn.db";

const ACCOUNTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS accounts (
    id TEXT PRIMARY KEY,
    email TEXT NOT NULL UNIQUE,
    salt TEXT NOT NULL,
    secret_hash TEXT NOT NULL,
    created_at INTEGER NOT NULL
)"#;

const HISTORY_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS history (
    id TEXT PRIMARY KEY,
    owner_id TEXT NOT NULL,
    video_url TEXT NOT NULL,
    video_id TEXT NOT NULL,
    recorded_at INTEGER NOT NULL
)"#;
const HISTORY_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_history_owner ON history (owner_id, recorded_at DESC)";

const NOTES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS notes (
    id TEXT NOT NULL,
    owner_key TEXT NOT NULL,
    title TEXT NOT NULL DEFAULT '',
    content TEXT NOT NULL DEFAULT '',
    created_at INTEGER NOT NULL,
    PRIMARY KEY (owner_key, id)
)"#;

fn repo_err(e: impl std::fmt::Display) -> DomainError {
    DomainError::Repo(e.to_string())
}

/// SQLite repository. One database file in the given base directory.
pub struct SqliteRepo {
    db: Database,
}

impl SqliteRepo {
    /// Connect to (or create) the SQLite database and ensure the schema exists.
    /// Call this once at startup; the returned repo is safe to share via Arc.
    pub async fn connect(base_dir: impl AsRef<Path>) -> Result<Self, DomainError> {
        let base = base_dir.as_ref();
        std::fs::create_dir_all(base).map_err(repo_err)?;
        let db_path = base.join(DB_FILE);
        let path_str = db_path.to_string_lossy();
        let db = libsql::Builder::new_local(path_str.as_ref())
            .build()
            .await
            .map_err(repo_err)?;
        let conn = db.connect().map_err(repo_err)?;

        // PRAGMA returns a row (new value); use query and consume rows
        // (execute fails when rows are returned).
        let mut wal_rows = conn
            .query("PRAGMA journal_mode=WAL", ())
            .await
            .map_err(|e| DomainError::Repo(format!("WAL pragma failed: {}", e)))?;
        while wal_rows.next().await.map_err(repo_err)?.is_some() {}

        for ddl in [ACCOUNTS_TABLE, HISTORY_TABLE, HISTORY_INDEX, NOTES_TABLE] {
            conn.execute(ddl, ()).await.map_err(repo_err)?;
        }

        info!(path = %db_path.display(), "SQLite connected with WAL mode");

        Ok(Self { db })
    }

    fn conn(&self) -> Result<Connection, DomainError> {
        self.db.connect().map_err(repo_err)
    }

    fn row_to_account(row: &Row) -> Result<Account, DomainError> {
        Ok(Account {
            id: AccountId(row.get::<String>(0).map_err(repo_err)?),
            email: row.get::<String>(1).map_err(repo_err)?,
            salt: row.get::<String>(2).map_err(repo_err)?,
            secret_hash: row.get::<String>(3).map_err(repo_err)?,
            created_at: row.get::<i64>(4).map_err(repo_err)?,
        })
    }

    fn row_to_history(row: &Row) -> Result<HistoryEntry, DomainError> {
        Ok(HistoryEntry {
            id: row.get::<String>(0).map_err(repo_err)?,
            owner_id: row.get::<String>(1).map_err(repo_err)?,
            video_url: row.get::<String>(2).map_err(repo_err)?,
            video_id: row.get::<String>(3).map_err(repo_err)?,
            recorded_at: row.get::<i64>(4).map_err(repo_err)?,
        })
    }

    fn row_to_note(row: &Row) -> Result<Note, DomainError> {
        Ok(Note {
            id: row.get::<String>(0).map_err(repo_err)?,
            owner_key: row.get::<String>(1).map_err(repo_err)?,
            title: row.get::<String>(2).map_err(repo_err)?,
            content: row.get::<String>(3).map_err(repo_err)?,
            created_at: row.get::<i64>(4).map_err(repo_err)?,
        })
    }

    async fn find_note(
        conn: &Connection,
        owner_key: &str,
        id: &str,
    ) -> Result<Option<Note>, DomainError> {
        let mut rows = conn
            .query(
                r#"
                SELECT id, owner_key, title, content, created_at
                FROM notes
                WHERE owner_key = ?1 AND id = ?2
                "#,
                params![owner_key, id],
            )
            .await
            .map_err(repo_err)?;
        match rows.next().await.map_err(repo_err)? {
            Some(row) => Ok(Some(Self::row_to_note(&row)?)),
            None => Ok(None),
        }
    }
}

#[async_trait::async_trait]
impl AccountStore for SqliteRepo {
    async fn insert_account(&self, account: &Account) -> Result<(), DomainError> {
        let conn = self.conn()?;
        let inserted = conn
            .execute(
                r#"
                INSERT INTO accounts (id, email, salt, secret_hash, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5)
                ON CONFLICT (email) DO NOTHING
                "#,
                params![
                    account.id.0.as_str(),
                    account.email.as_str(),
                    account.salt.as_str(),
                    account.secret_hash.as_str(),
                    account.created_at
                ],
            )
            .await
            .map_err(repo_err)?;
        if inserted == 0 {
            return Err(DomainError::DuplicateEmail);
        }
        debug!(account_id = %account.id, "account inserted");
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let conn = self.conn()?;
        let mut rows = conn
            .query(
                "SELECT id, email, salt, secret_hash, created_at FROM accounts WHERE email = ?1",
                params![email],
            )
            .await
            .map_err(repo_err)?;
        match rows.next().await.map_err(repo_err)? {
            Some(row) => Ok(Some(Self::row_to_account(&row)?)),
            None => Ok(None),
        }
    }
}

#[async_trait::async_trait]
impl HistoryStore for SqliteRepo {
    async fn append(&self, entry: &HistoryEntry) -> Result<(), DomainError> {
        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO history (id, owner_id, video_url, video_id, recorded_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                entry.id.as_str(),
                entry.owner_id.as_str(),
                entry.video_url.as_str(),
                entry.video_id.as_str(),
                entry.recorded_at
            ],
        )
        .await
        .map_err(repo_err)?;
        Ok(())
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<HistoryEntry>, DomainError> {
        let conn = self.conn()?;
        let mut rows = conn
            .query(
                r#"
                SELECT id, owner_id, video_url, video_id, recorded_at
                FROM history
                WHERE owner_id = ?1
                ORDER BY recorded_at DESC, rowid DESC
                "#,
                params![owner_id],
            )
            .await
            .map_err(repo_err)?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next().await.map_err(repo_err)? {
            entries.push(Self::row_to_history(&row)?);
        }
        Ok(entries)
    }
}

#[async_trait::async_trait]
impl NoteStore for SqliteRepo {
    async fn append(&self, note: &Note) -> Result<(), DomainError> {
        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO notes (id, owner_key, title, content, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                note.id.as_str(),
                note.owner_key.as_str(),
                note.title.as_str(),
                note.content.as_str(),
                note.created_at
            ],
        )
        .await
        .map_err(repo_err)?;
        Ok(())
    }

    async fn list(&self, owner_key: &str) -> Result<Vec<Note>, DomainError> {
        let conn = self.conn()?;
        let mut rows = conn
            .query(
                r#"
                SELECT id, owner_key, title, content, created_at
                FROM notes
                WHERE owner_key = ?1
                ORDER BY created_at DESC, rowid DESC
                "#,
                params![owner_key],
            )
            .await
            .map_err(repo_err)?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next().await.map_err(repo_err)? {
            notes.push(Self::row_to_note(&row)?);
        }
        Ok(notes)
    }

    async fn update(
        &self,
        owner_key: &str,
        id: &str,
        title: &str,
        content: &str,
    ) -> Result<Note, DomainError> {
        let conn = self.conn()?;
        let changed = conn
            .execute(
                "UPDATE notes SET title = ?1, content = ?2 WHERE owner_key = ?3 AND id = ?4",
                params![title, content, owner_key, id],
            )
            .await
            .map_err(repo_err)?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("note {id}")));
        }
        Self::find_note(&conn, owner_key, id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("note {id}")))
    }

    async fn delete(&self, owner_key: &str, id: &str) -> Result<(), DomainError> {
        let conn = self.conn()?;
        let removed = conn
            .execute(
                "DELETE FROM notes WHERE owner_key = ?1 AND id = ?2",
                params![owner_key, id],
            )
            .await
            .map_err(repo_err)?;
        if removed == 0 {
            return Err(DomainError::NotFound(format!("note {id}")));
        }
        Ok(())
    }

    async fn clear(&self, owner_key: &str) -> Result<u64, DomainError> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM notes WHERE owner_key = ?1", params![owner_key])
            .await
            .map_err(repo_err)
    }
}
