// POST /whatsapp handler

use std::convert::Infallible;
use std::sync::Arc;

use crate::customer_db::normalize_phone;
use crate::llm::GenerateRequest;
use crate::models::InboundMessage;
use crate::state::AppState;
use crate::twiml::MessagingResponse;

/// Reply to senders with no matching customer
pub const NOT_REGISTERED_REPLY: &str = "Hi there! We noticed your number isn't registered with us yet. If you already have a DIDX account, you can update your contact information (including your WhatsApp Number as your Cell Number) in your profile for the best support experience.";

/// Reply when the completion call fails
pub const MODEL_ERROR_REPLY: &str = "Sorry, I'm having trouble processing your request.";

/// Reply when the customer lookup fails
pub const DATABASE_ERROR_REPLY: &str = "Sorry, I encountered a database error.";

/// Produce the reply text for an inbound message
///
/// Never fails: lookup and completion errors are logged and replaced by
/// fixed apologies.
pub async fn reply_text(state: &AppState, message: &InboundMessage) -> String {
    tracing::debug!(
        from = %message.from,
        body = %message.body,
        message_sid = ?message.message_sid,
        "received WhatsApp message"
    );

    let digits = normalize_phone(&message.from);
    tracing::debug!(normalized = %digits, "normalized sender number");

    if digits.is_empty() {
        tracing::debug!(from = %message.from, "sender address has no digits");
        return NOT_REGISTERED_REPLY.to_string();
    }

    let profile = match state.directory.find_by_phone(&digits).await {
        Ok(Some(profile)) => profile,
        Ok(None) => {
            tracing::debug!(normalized = %digits, "user not found");
            return NOT_REGISTERED_REPLY.to_string();
        }
        Err(e) => {
            tracing::error!(error = %e, normalized = %digits, "customer lookup failed");
            return DATABASE_ERROR_REPLY.to_string();
        }
    };

    let system = state.prompt.build(&profile);
    let request = GenerateRequest::new(message.body.clone())
        .with_system(system)
        .with_config(state.generation.clone());

    match state.llm.generate(request).await {
        Ok(response) => {
            tracing::debug!(
                reply = %response.text,
                finish_reason = ?response.finish_reason,
                usage = ?response.usage,
                "model response"
            );
            response.text
        }
        Err(e) => {
            tracing::error!(error = %e, "error generating response from model");
            MODEL_ERROR_REPLY.to_string()
        }
    }
}

pub async fn whatsapp_handler(
    state: Arc<AppState>,
    message: InboundMessage,
) -> Result<impl warp::Reply, Infallible> {
    let text = reply_text(&state, &message).await;
    Ok(MessagingResponse::with_message(text))
}
