//! Messaging-provider reply envelope
//!
//! A webhook answers an inbound WhatsApp message by returning TwiML; each
//! `<Message>` element becomes one outbound message to the sender.

/// Content type of a rendered [`MessagingResponse`]
pub const CONTENT_TYPE: &str = "application/xml";

/// A TwiML `<Response>` holding zero or more messages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessagingResponse {
    messages: Vec<String>,
}

impl MessagingResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// A response carrying a single message
    pub fn with_message(text: impl Into<String>) -> Self {
        let mut response = Self::new();
        response.message(text);
        response
    }

    /// Append a message
    pub fn message(&mut self, text: impl Into<String>) -> &mut Self {
        self.messages.push(text.into());
        self
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Render the XML document
    pub fn to_xml(&self) -> String {
        let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        if self.messages.is_empty() {
            xml.push_str("<Response/>");
            return xml;
        }

        xml.push_str("<Response>");
        for message in &self.messages {
            xml.push_str("<Message>");
            xml.push_str(&escape_xml(message));
            xml.push_str("</Message>");
        }
        xml.push_str("</Response>");
        xml
    }
}

impl warp::Reply for MessagingResponse {
    fn into_response(self) -> warp::reply::Response {
        warp::reply::with_header(self.to_xml(), "content-type", CONTENT_TYPE).into_response()
    }
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    escaped
}
