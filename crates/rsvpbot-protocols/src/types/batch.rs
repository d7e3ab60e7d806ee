//! Batch-level aggregates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Category, EventRecord, RegistrationStatus, ResultRecord};

/// Per-category counts, computed once before dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub eventbrite: usize,
    pub splashthat: usize,
    pub do512: usize,
    pub other: usize,
}

impl BatchSummary {
    pub fn from_events(events: &[EventRecord]) -> Self {
        let mut summary = BatchSummary {
            total: events.len(),
            ..Default::default()
        };
        for event in events {
            match event.category {
                Category::Eventbrite => summary.eventbrite += 1,
                Category::Splashthat => summary.splashthat += 1,
                Category::Do512 => summary.do512 += 1,
                Category::Other => summary.other += 1,
            }
        }
        summary
    }
}

impl std::fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Total events: {}", self.total)?;
        writeln!(f, "Eventbrite events: {}", self.eventbrite)?;
        writeln!(f, "Splashthat events: {}", self.splashthat)?;
        writeln!(f, "Do512 events: {}", self.do512)?;
        write!(f, "Other events: {}", self.other)
    }
}

/// Everything a finished batch produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub summary: BatchSummary,
    /// One record per input event, in completion-independent order.
    pub results: Vec<ResultRecord>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl BatchReport {
    pub fn registered(&self) -> usize {
        self.count(RegistrationStatus::Registered)
    }

    pub fn not_registered(&self) -> usize {
        self.count(RegistrationStatus::NotRegistered)
    }

    fn count(&self, status: RegistrationStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RegistrationOutcome;

    fn events() -> Vec<EventRecord> {
        vec![
            EventRecord::new("A", "https://eventbrite.com/e/1", "", ""),
            EventRecord::new("B", "https://eventbrite.com/e/2", "", ""),
            EventRecord::new("C", "https://do512.com/x", "", ""),
            EventRecord::new("D", "https://party.splashthat.com", "", ""),
            EventRecord::new("E", "https://example.com", "", ""),
        ]
    }

    #[test]
    fn test_summary_counts() {
        let summary = BatchSummary::from_events(&events());
        assert_eq!(summary.total, 5);
        assert_eq!(summary.eventbrite, 2);
        assert_eq!(summary.do512, 1);
        assert_eq!(summary.splashthat, 1);
        assert_eq!(summary.other, 1);
    }

    #[test]
    fn test_summary_empty() {
        assert_eq!(BatchSummary::from_events(&[]), BatchSummary::default());
    }

    #[test]
    fn test_summary_display() {
        let text = BatchSummary::from_events(&events()).to_string();
        assert!(text.contains("Total events: 5"));
        assert!(text.contains("Eventbrite events: 2"));
        assert!(text.contains("Do512 events: 1"));
    }

    #[test]
    fn test_report_tallies() {
        let events = events();
        let results = vec![
            ResultRecord::from_outcome(&events[0], RegistrationOutcome::registered()),
            ResultRecord::from_outcome(&events[2], RegistrationOutcome::not_registered("captcha")),
            ResultRecord::from_outcome(&events[4], RegistrationOutcome::not_registered("other")),
        ];
        let now = Utc::now();
        let report = BatchReport {
            summary: BatchSummary::from_events(&events),
            results,
            started_at: now,
            finished_at: now,
        };
        assert_eq!(report.registered(), 1);
        assert_eq!(report.not_registered(), 2);
    }
}
