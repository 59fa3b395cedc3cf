//! Lookup seam between the webhook handler and the database

use async_trait::async_trait;

use super::{error::Result, types::CustomerProfile};

/// Finds customers by phone number
#[async_trait]
pub trait CustomerDirectory: Send + Sync {
    /// Look up the customer whose stored number contains `digits`
    ///
    /// `digits` is already normalized (see [`normalize_phone`](super::normalize_phone)).
    /// Returns `Ok(None)` when nobody matches.
    async fn find_by_phone(&self, digits: &str) -> Result<Option<CustomerProfile>>;
}
