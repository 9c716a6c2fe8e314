//! Port traits. API boundaries for the hexagon.
//!
//! - Inbound: Called by the HTTP adapter into the application
//! - Outbound: Called by application into infrastructure

pub mod inbound;
pub mod outbound;

pub use inbound::VideoLearningPort;
pub use outbound::{AccountStore, GenerationPort, HistoryStore, NoteStore, TranscriptSource};
