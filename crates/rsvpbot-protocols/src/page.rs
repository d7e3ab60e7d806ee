//! Page action primitives.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::PageError;

/// Result of opening a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenStatus {
    Success,
    /// The browser reported the navigation as failed.
    Failed(String),
}

impl OpenStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, OpenStatus::Success)
    }
}

/// Low-level operations against the single page of a browser session.
///
/// Every method is a suspension point. Absence of an element is never an
/// error: `element_exists` reports it, and `set_field_value` / `click`
/// silently do nothing when nothing matches. Callers check existence
/// before acting.
#[async_trait]
pub trait PageActions: Send + Sync {
    /// Navigate to `url` and wait for the document to load.
    async fn open(&self, url: &str) -> Result<OpenStatus, PageError>;

    /// Current document title.
    async fn title(&self) -> Result<String, PageError>;

    /// Current document URL.
    async fn current_url(&self) -> Result<String, PageError>;

    /// Whether at least one element matches `selector`.
    async fn element_exists(&self, selector: &str) -> Result<bool, PageError>;

    /// Text content of the first match.
    async fn read_text(&self, selector: &str) -> Result<Option<String>, PageError>;

    /// Property (or attribute) `attr` of the first match.
    async fn read_attribute(&self, selector: &str, attr: &str)
    -> Result<Option<String>, PageError>;

    /// Set the value of the first matching field.
    async fn set_field_value(&self, selector: &str, value: &str) -> Result<(), PageError>;

    /// Click the first match.
    async fn click(&self, selector: &str) -> Result<(), PageError>;

    /// Suspend for at least `duration`.
    async fn wait(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    /// Render the page to an image file at `path`.
    async fn screenshot(&self, path: &Path) -> Result<(), PageError>;
}
