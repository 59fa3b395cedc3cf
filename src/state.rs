//! Shared, immutable application state injected into handlers

use std::sync::Arc;

use crate::config::AppConfig;
use crate::customer_db::{CustomerDb, CustomerDirectory};
use crate::llm::{GenerationConfig, LlmError, LlmProvider, OpenAiClient};
use crate::prompt::PromptBuilder;
use crate::screenshots::ScreenshotStore;

/// Collaborators every request needs
pub struct AppState {
    /// Customer lookups
    pub directory: Arc<dyn CustomerDirectory>,
    /// Completion provider
    pub llm: Arc<dyn LlmProvider>,
    /// Sampling settings for every completion
    pub generation: GenerationConfig,
    /// System prompt rendering
    pub prompt: PromptBuilder,
    /// Screenshot storage
    pub screenshots: ScreenshotStore,
    /// Largest accepted screenshot upload
    pub screenshot_max_bytes: u64,
}

impl AppState {
    pub fn new(
        directory: Arc<dyn CustomerDirectory>,
        llm: Arc<dyn LlmProvider>,
        prompt: PromptBuilder,
        screenshots: ScreenshotStore,
        screenshot_max_bytes: u64,
    ) -> Self {
        Self {
            directory,
            llm,
            generation: GenerationConfig::default(),
            prompt,
            screenshots,
            screenshot_max_bytes,
        }
    }

    /// Replace the sampling settings (builder pattern)
    pub fn with_generation(mut self, generation: GenerationConfig) -> Self {
        self.generation = generation;
        self
    }

    /// Wire the production collaborators from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self, LlmError> {
        let llm = OpenAiClient::new(
            config.openai_api_key.clone(),
            config.openai_model.clone(),
            config.openai_timeout,
        )?
        .with_base_url(config.openai_base_url.clone());

        Ok(Self::new(
            Arc::new(CustomerDb::new(config.database.clone())),
            Arc::new(llm),
            PromptBuilder::new(config.persona.clone()),
            ScreenshotStore::new(config.screenshot_dir.clone()),
            config.screenshot_max_bytes,
        )
        .with_generation(config.generation.clone()))
    }
}
