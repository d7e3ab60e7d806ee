//! Registration outcomes and report rows.

use serde::{Deserialize, Serialize};

use super::EventRecord;

/// Final state of one registration attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegistrationStatus {
    #[serde(rename = "registered")]
    Registered,
    #[serde(rename = "not registered")]
    NotRegistered,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Registered => "registered",
            RegistrationStatus::NotRegistered => "not registered",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "registered" => Some(RegistrationStatus::Registered),
            "not registered" => Some(RegistrationStatus::NotRegistered),
            _ => None,
        }
    }
}

impl std::fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one engine invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationOutcome {
    pub status: RegistrationStatus,
    /// Why the event was not registered. `None` on clean success.
    pub message: Option<String>,
}

impl RegistrationOutcome {
    pub fn registered() -> Self {
        Self {
            status: RegistrationStatus::Registered,
            message: None,
        }
    }

    pub fn not_registered(message: impl Into<String>) -> Self {
        Self {
            status: RegistrationStatus::NotRegistered,
            message: Some(message.into()),
        }
    }

    pub fn is_registered(&self) -> bool {
        self.status == RegistrationStatus::Registered
    }
}

/// One report row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResultRecord {
    pub name: String,
    pub date: String,
    pub venue: String,
    pub url: String,
    pub status: RegistrationStatus,
    pub message: Option<String>,
}

impl ResultRecord {
    pub fn from_outcome(event: &EventRecord, outcome: RegistrationOutcome) -> Self {
        Self {
            name: event.name.clone(),
            date: event.date.clone(),
            venue: event.venue.clone(),
            url: event.url.clone(),
            status: outcome.status,
            message: outcome.message,
        }
    }
}
