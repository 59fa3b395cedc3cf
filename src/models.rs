// Request and response bodies

use serde::{Deserialize, Serialize};

/// Form fields of an inbound WhatsApp webhook
///
/// The provider posts many more fields; only these are used.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundMessage {
    /// Sender address, e.g. `whatsapp:+14155550100`
    #[serde(rename = "From")]
    pub from: String,
    /// Message text; empty for media-only messages
    #[serde(rename = "Body")]
    pub body: String,
    /// Provider message id, for log correlation
    #[serde(rename = "MessageSid", default)]
    pub message_sid: Option<String>,
}

/// Acknowledgement of a stored screenshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScreenshotSaved {
    pub message: String,
    pub path: String,
}

/// JSON error body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}
