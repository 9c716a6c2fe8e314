//! External tools invoked as subprocesses.

pub mod transcript_worker;

pub use transcript_worker::SubprocessTranscriptSource;
