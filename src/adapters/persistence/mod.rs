//! Persistence adapters for the collaborator stores.

pub mod sqlite_repo;

pub use sqlite_repo::SqliteRepo;
