//! OpenAI provider implementation
//!
//! This module provides a client for the OpenAI chat-completions API (and any
//! endpoint compatible with it).

pub mod client;
pub mod mapper;
pub mod types;

// Re-export commonly used types
pub use client::{OpenAiClient, OpenAiModel, DEFAULT_BASE_URL};
