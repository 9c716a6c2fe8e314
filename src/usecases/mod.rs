//! Application use cases. Orchestrate domain logic via ports.

pub mod account_service;
pub mod history_service;
pub mod notes_service;
pub mod pipeline_service;
pub mod summarizer;

pub use account_service::AccountService;
pub use history_service::HistoryService;
pub use notes_service::NotesService;
pub use pipeline_service::{PipelineService, PipelineStage, RequestTrace};
pub use summarizer::{SummarizerService, SummaryPolicy};
