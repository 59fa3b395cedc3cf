//! LLM Abstraction Layer
//!
//! This module provides a provider-neutral request/response model for
//! one-shot chat completions, and an OpenAI implementation of it.

pub mod core;
pub mod openai;

// Re-export commonly used types
pub use core::{
    config::GenerationConfig,
    error::LlmError,
    provider::LlmProvider,
    types::{FinishReason, GenerateRequest, GenerateResponse, Message, MessageRole, UsageMetadata},
};

pub use openai::{OpenAiClient, OpenAiModel};
