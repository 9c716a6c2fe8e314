//! vidlearn: YouTube transcript, summary and chat backend with Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
