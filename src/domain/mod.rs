//! Core domain layer. No external I/O dependencies.
//!
//! Entities, the reference parser and the error taxonomy live here.
//! Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod video_ref;

pub use entities::{
    Account, AccountId, HistoryEntry, Note, Outcome, SummaryResult, TranscriptResult, VideoId,
};
pub use errors::{DomainError, ErrorClass};
