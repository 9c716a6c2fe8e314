//! Infrastructure adapters. Implement ports and drive the application.
//!
//! Transcript worker, generation service, SQLite, HTTP. Map errors to DomainError.

pub mod ai;
pub mod http;
pub mod persistence;
pub mod tools;
