//! OpenAI client implementation

use async_trait::async_trait;
use reqwest::Client;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::llm::core::{
    error::LlmError,
    provider::LlmProvider,
    types::{GenerateRequest, GenerateResponse},
};

use super::mapper::{error_from_status, from_openai_response, to_openai_request};
use super::types::ChatCompletionResponse;

/// Public OpenAI API root
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI chat model identifiers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OpenAiModel {
    /// GPT-3.5 Turbo
    #[default]
    Gpt35Turbo,
    /// GPT-4o
    Gpt4o,
    /// GPT-4o mini
    Gpt4oMini,
    /// Any other model name, passed through verbatim
    Custom(String),
}

impl OpenAiModel {
    /// Get the model identifier string for the API
    pub fn as_str(&self) -> &str {
        match self {
            OpenAiModel::Gpt35Turbo => "gpt-3.5-turbo",
            OpenAiModel::Gpt4o => "gpt-4o",
            OpenAiModel::Gpt4oMini => "gpt-4o-mini",
            OpenAiModel::Custom(name) => name,
        }
    }
}

impl FromStr for OpenAiModel {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "gpt-3.5-turbo" => OpenAiModel::Gpt35Turbo,
            "gpt-4o" => OpenAiModel::Gpt4o,
            "gpt-4o-mini" => OpenAiModel::Gpt4oMini,
            other => OpenAiModel::Custom(other.to_string()),
        })
    }
}

impl fmt::Display for OpenAiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client for OpenAI chat completions
pub struct OpenAiClient {
    /// HTTP client for making requests
    http_client: Client,
    /// Bearer token
    api_key: String,
    /// API root, without trailing slash
    base_url: String,
    /// Model to use
    model: OpenAiModel,
}

impl OpenAiClient {
    /// Create a new OpenAI client
    ///
    /// # Arguments
    ///
    /// * `api_key` - OpenAI API key
    /// * `model` - Chat model to use
    /// * `timeout` - Whole-request timeout; `None` keeps the HTTP client's default
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty or the HTTP client cannot be built.
    pub fn new(
        api_key: impl Into<String>,
        model: OpenAiModel,
        timeout: Option<Duration>,
    ) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(LlmError::InvalidRequest("API key is empty".to_string()));
        }

        let mut builder = Client::builder().connect_timeout(Duration::from_secs(5));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().map_err(|e| LlmError::HttpError {
            status: 0,
            body: format!("Failed to create HTTP client: {}", e),
        })?;

        Ok(Self {
            http_client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model,
        })
    }

    /// Point the client at a different OpenAI-compatible API root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &OpenAiModel {
        &self.model
    }

    /// Build the endpoint URL
    fn build_endpoint_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Make a non-streaming completion request
    async fn make_request(&self, request: GenerateRequest) -> Result<GenerateResponse, LlmError> {
        let body = to_openai_request(request, self.model.as_str());

        let url = self.build_endpoint_url();
        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_secs);
            let body = response.text().await.unwrap_or_default();
            return Err(error_from_status(status.as_u16(), &body, retry_after));
        }

        let completion: ChatCompletionResponse = response.json().await?;
        tracing::debug!(
            completion_id = %completion.id,
            model = %completion.model,
            "received chat completion"
        );

        from_openai_response(completion)
    }
}

#[async_trait]
impl LlmProvider for OpenAiClient {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, LlmError> {
        self.make_request(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_model_as_str() {
        assert_eq!(OpenAiModel::Gpt35Turbo.as_str(), "gpt-3.5-turbo");
        assert_eq!(OpenAiModel::Gpt4o.as_str(), "gpt-4o");
        assert_eq!(OpenAiModel::Gpt4oMini.as_str(), "gpt-4o-mini");
        assert_eq!(OpenAiModel::default(), OpenAiModel::Gpt35Turbo);
    }

    #[test]
    fn test_openai_model_from_str() {
        assert_eq!("gpt-4o".parse::<OpenAiModel>().unwrap(), OpenAiModel::Gpt4o);
        assert_eq!(
            "ft:gpt-3.5-turbo:acme".parse::<OpenAiModel>().unwrap(),
            OpenAiModel::Custom("ft:gpt-3.5-turbo:acme".to_string())
        );
    }

    #[test]
    fn test_endpoint_url() {
        let client = OpenAiClient::new("sk-test", OpenAiModel::Gpt35Turbo, None).unwrap();
        assert_eq!(
            client.build_endpoint_url(),
            "https://api.openai.com/v1/chat/completions"
        );

        let client = client.with_base_url("http://localhost:8080/v1/");
        assert_eq!(
            client.build_endpoint_url(),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[test]
    fn test_empty_api_key_is_rejected() {
        assert!(matches!(
            OpenAiClient::new("  ", OpenAiModel::Gpt35Turbo, None),
            Err(LlmError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_an_http_error() {
        let client = OpenAiClient::new("sk-test", OpenAiModel::Gpt35Turbo, Some(Duration::from_secs(2)))
            .unwrap()
            .with_base_url("http://127.0.0.1:9");

        let result = client.generate(GenerateRequest::new("hello")).await;
        assert!(matches!(result, Err(LlmError::HttpError { status: 0, .. })));
    }
}
