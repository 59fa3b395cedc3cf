use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::customer_db::error::{Error, Result};

/// A database row as an ordered set of `column -> value` pairs
///
/// Column order follows the table definition, so anything rendered from a
/// record lists fields the way the schema declares them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Build a record from a JSON object (as produced by `row_to_json`)
    pub fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(Error::DecodeError(format!(
                "expected a JSON object for a row, got {}",
                other
            ))),
        }
    }

    /// Append a field (builder pattern)
    pub fn with_field(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(column.into(), value.into());
        self
    }

    /// Look up a column value
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }

    /// Render a key column as text for use as a query parameter
    ///
    /// Returns None when the column is missing, null, or not a scalar.
    pub fn key_text(&self, column: &str) -> Option<String> {
        match self.0.get(column)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Iterate over fields in column order
    pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Everything known about one customer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerProfile {
    /// The full customer row
    pub customer: Record,
    /// Outstanding orders, one record per row
    pub orders: Vec<Record>,
    /// Active provisioned numbers
    pub numbers: Vec<String>,
}

impl CustomerProfile {
    pub fn new(customer: Record) -> Self {
        Self {
            customer,
            orders: Vec::new(),
            numbers: Vec::new(),
        }
    }
}
