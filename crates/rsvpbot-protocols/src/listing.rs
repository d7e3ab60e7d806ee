//! Listing source seam.

use async_trait::async_trait;

use crate::error::ListingError;
use crate::types::EventRecord;

/// Produces the ordered candidate event list.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Human-readable description used in logs.
    fn describe(&self) -> String;

    async fn fetch(&self) -> Result<Vec<EventRecord>, ListingError>;
}
