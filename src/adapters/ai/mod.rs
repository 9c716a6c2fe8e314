//! Generation adapters. Implement GenerationPort for LLM integration.
//!
//! Provides OpenAI-compatible adapter and mock adapter for running without a key.

pub mod mock_adapter;
pub mod openai_adapter;

pub use mock_adapter::MockGenerationAdapter;
pub use openai_adapter::OpenAiAdapter;
