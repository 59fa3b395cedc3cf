//! System prompt assembly
//!
//! Flattens a customer profile into the instruction text sent ahead of the
//! customer's message. Every field of every row is included.

use serde_json::Value;

use crate::customer_db::{CustomerProfile, Record};

/// Opening line of every system prompt unless overridden
pub const DEFAULT_PERSONA: &str = "You are a DIDx Customer Whatsapp Bot.";

/// Builds the system prompt for a customer
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    persona: String,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_PERSONA)
    }
}

impl PromptBuilder {
    pub fn new(persona: impl Into<String>) -> Self {
        Self {
            persona: persona.into(),
        }
    }

    pub fn persona(&self) -> &str {
        &self.persona
    }

    /// Render the full system prompt for a profile
    pub fn build(&self, profile: &CustomerProfile) -> String {
        format!(
            "{} User details: {}. DIDs: {}. Transactions: {}",
            self.persona,
            format_record(&profile.customer),
            format_numbers(&profile.numbers),
            format_orders(&profile.orders),
        )
    }
}

/// `key: value` pairs joined by `, `, in column order
pub fn format_record(record: &Record) -> String {
    record
        .fields()
        .map(|(key, value)| format!("{}: {}", key, format_value(value)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// One formatted record per line
pub fn format_orders(orders: &[Record]) -> String {
    orders
        .iter()
        .map(format_record)
        .collect::<Vec<_>>()
        .join("\n")
}

/// `DID: <number>` entries joined by `, `
pub fn format_numbers(numbers: &[String]) -> String {
    numbers
        .iter()
        .map(|number| format!("DID: {}", number))
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "None".to_string(),
        other => other.to_string(),
    }
}
