//! Local JSON listing file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rsvpbot_protocols::{EventRecord, ListingError, ListingSource};
use serde::{Deserialize, Serialize};
use tracing::info;

/// One event in a JSON listing file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingEntry {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
}

impl From<ListingEntry> for EventRecord {
    fn from(entry: ListingEntry) -> Self {
        EventRecord::new(
            entry.name,
            entry.url,
            entry.date.unwrap_or_else(|| "No date found :(".to_string()),
            entry.venue.unwrap_or_else(|| "TBD".to_string()),
        )
    }
}

/// Reads a JSON array of [`ListingEntry`] from disk.
pub struct JsonListingSource {
    path: PathBuf,
}

impl JsonListingSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse listing JSON.
    pub fn parse(content: &str) -> Result<Vec<EventRecord>, ListingError> {
        let entries: Vec<ListingEntry> =
            serde_json::from_str(content).map_err(|e| ListingError::Parse(e.to_string()))?;
        Ok(entries.into_iter().map(EventRecord::from).collect())
    }
}

#[async_trait]
impl ListingSource for JsonListingSource {
    fn describe(&self) -> String {
        format!("listing file {}", self.path.display())
    }

    async fn fetch(&self) -> Result<Vec<EventRecord>, ListingError> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let events = Self::parse(&content)?;
        info!("Loaded {} events from {}", events.len(), self.path.display());
        Ok(events)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
