//! Event records produced by a listing source.

use serde::{Deserialize, Serialize};

/// Which adapter (if any) can process an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Eventbrite,
    Splashthat,
    Do512,
    Other,
}

impl Category {
    /// URL markers, tested in order. First match wins.
    const MARKERS: [(&'static str, Category); 3] = [
        ("eventbrite", Category::Eventbrite),
        ("splashthat", Category::Splashthat),
        ("do512", Category::Do512),
    ];

    /// Classify an event by substring match of its registration URL.
    pub fn from_url(url: &str) -> Self {
        let url = url.to_ascii_lowercase();
        Self::MARKERS
            .iter()
            .find(|(marker, _)| url.contains(marker))
            .map(|(_, category)| *category)
            .unwrap_or(Category::Other)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Eventbrite => "eventbrite",
            Category::Splashthat => "splashthat",
            Category::Do512 => "do512",
            Category::Other => "other",
        }
    }

    /// Whether events of this category are driven through a browser.
    pub fn is_automatable(&self) -> bool {
        matches!(self, Category::Eventbrite | Category::Splashthat)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One candidate event from the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub name: String,
    /// Registration link.
    pub url: String,
    pub date: String,
    pub venue: String,
    /// Derived from `url` when the record is built; never reclassified.
    pub category: Category,
}

impl EventRecord {
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        date: impl Into<String>,
        venue: impl Into<String>,
    ) -> Self {
        let url = url.into();
        let category = Category::from_url(&url);
        Self {
            name: name.into(),
            url,
            date: date.into(),
            venue: venue.into(),
            category,
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
