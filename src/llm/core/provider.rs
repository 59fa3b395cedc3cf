//! Provider trait for LLM implementations

use async_trait::async_trait;

use super::{
    error::LlmError,
    types::{GenerateRequest, GenerateResponse},
};

/// Main interface that all LLM provider implementations must satisfy
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a complete reply from the LLM
    ///
    /// # Arguments
    /// * `request` - The generation request with system prompt, messages and config
    ///
    /// # Returns
    /// The generated text with finish metadata, or an error if the request fails
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, LlmError>;
}
