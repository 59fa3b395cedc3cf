//! Mapping between abstraction types and OpenAI-specific types

use std::time::Duration;

use crate::llm::core::{
    error::LlmError,
    types::{FinishReason, GenerateRequest, GenerateResponse, MessageRole, UsageMetadata},
};

use super::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ErrorResponse};

/// Convert our abstraction request to OpenAI's request format
pub fn to_openai_request(request: GenerateRequest, model: &str) -> ChatCompletionRequest {
    let mut messages = Vec::with_capacity(request.messages.len() + 1);

    if let Some(system) = request.system {
        messages.push(ChatMessage {
            role: "system".to_string(),
            content: system,
        });
    }

    messages.extend(request.messages.into_iter().map(|message| ChatMessage {
        role: match message.role {
            MessageRole::User => "user".to_string(),
        },
        content: message.content,
    }));

    ChatCompletionRequest {
        model: model.to_string(),
        messages,
        max_tokens: request.config.max_tokens,
        temperature: request.config.temperature,
    }
}

/// Convert OpenAI's response to our abstraction, taking the first choice
pub fn from_openai_response(response: ChatCompletionResponse) -> Result<GenerateResponse, LlmError> {
    let usage = response
        .usage
        .map(|u| UsageMetadata {
            input_tokens: u.prompt_tokens,
            output_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

    let choice = response.choices.into_iter().next().ok_or_else(|| {
        LlmError::EmptyResponse(format!("completion {} has no choices", response.id))
    })?;

    let finish_reason = map_finish_reason(choice.finish_reason.as_deref());

    match choice.message.content {
        Some(text) => Ok(GenerateResponse {
            text,
            finish_reason,
            usage,
        }),
        None => match choice.message.refusal {
            Some(refusal) => Err(LlmError::ProviderError {
                code: "refusal".to_string(),
                message: refusal,
            }),
            None => Err(LlmError::EmptyResponse(format!(
                "completion {} choice {} has no content",
                response.id, choice.index
            ))),
        },
    }
}

/// Map OpenAI's finish_reason string
pub fn map_finish_reason(reason: Option<&str>) -> FinishReason {
    match reason {
        None | Some("stop") => FinishReason::Stop,
        Some("length") => FinishReason::MaxTokens,
        Some("content_filter") => FinishReason::Safety,
        Some(other) => FinishReason::Other(other.to_string()),
    }
}

/// Build the error for a non-2xx response
///
/// The body is decoded as OpenAI's error envelope when possible; otherwise the
/// raw body is kept.
pub fn error_from_status(status: u16, body: &str, retry_after: Option<Duration>) -> LlmError {
    let parsed = serde_json::from_str::<ErrorResponse>(body).ok();

    match status {
        401 | 403 => LlmError::AuthenticationError(
            parsed
                .map(|e| e.error.message)
                .unwrap_or_else(|| body.to_string()),
        ),
        429 => LlmError::RateLimitExceeded { retry_after },
        _ => match parsed {
            Some(ErrorResponse { error }) => LlmError::ProviderError {
                code: error
                    .code
                    .or(error.error_type)
                    .unwrap_or_else(|| status.to_string()),
                message: error.message,
            },
            None => LlmError::HttpError {
                status,
                body: body.to_string(),
            },
        },
    }
}
