//! Diagnostic screenshot locations.

use std::path::PathBuf;

/// Builds screenshot paths under a root directory.
#[derive(Debug, Clone)]
pub struct ScreenshotPaths {
    root: PathBuf,
}

impl ScreenshotPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `<root>/<slug>-rsvp.jpeg`
    pub fn success(&self, event_name: &str) -> PathBuf {
        self.root.join(format!("{}-rsvp.jpeg", slug(event_name)))
    }

    /// `<root>/errors/error-<slug>-rsvp.jpeg`
    pub fn error(&self, event_name: &str) -> PathBuf {
        self.root
            .join("errors")
            .join(format!("error-{}-rsvp.jpeg", slug(event_name)))
    }
}

/// File-name-safe form of an event name.
pub fn slug(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return "event".to_string();
    }
    trimmed
        .chars()
        .map(|c| {
            if c.is_whitespace() || c == '/' || c == '\\' {
                '-'
            } else {
                c
            }
        })
        .collect()
}
