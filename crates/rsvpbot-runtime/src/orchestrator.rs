//! Batch orchestrator: fans registrations out under a concurrency ceiling.

use std::sync::Arc;

use chrono::Utc;
use rsvpbot_config::MAX_CONCURRENCY;
use rsvpbot_protocols::{
    AutomationError, BatchReport, BatchSummary, Category, EventRecord, FailureKind, Identity,
    RegistrationOutcome, RegistrationRequest, RegistrationRunner, ReportWriter, ResultRecord,
};
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Outcome message for Do512 events.
pub const CAPTCHA_MESSAGE: &str = "Theres a captcha. Cant submit form";

/// Outcome message for events no adapter handles.
pub const UNSUPPORTED_MESSAGE: &str = "Unsupported site. Not an eventbrite or splashthat rsvp";

/// Prefix of the outcome message for fatal automation failures.
pub const FATAL_PREFIX: &str = "Automation failed:";

enum Dispatch {
    Done(ResultRecord),
    Running(EventRecord, JoinHandle<Result<RegistrationOutcome, AutomationError>>),
}

/// Runs a batch of registrations.
pub struct BatchOrchestrator {
    runner: Arc<dyn RegistrationRunner>,
    report_writer: Option<Arc<dyn ReportWriter>>,
    max_concurrency: usize,
}

impl BatchOrchestrator {
    /// `max_concurrency` is clamped to `1..=MAX_CONCURRENCY`.
    pub fn new(runner: Arc<dyn RegistrationRunner>, max_concurrency: usize) -> Self {
        Self {
            runner,
            report_writer: None,
            max_concurrency: max_concurrency.clamp(1, MAX_CONCURRENCY),
        }
    }

    pub fn with_report_writer(mut self, writer: Arc<dyn ReportWriter>) -> Self {
        self.report_writer = Some(writer);
        self
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Register `identity` for every event.
    ///
    /// Produces exactly one result per event. Individual failures become
    /// `not registered` results; nothing here aborts the batch.
    pub async fn run_batch(&self, events: Vec<EventRecord>, identity: &Identity) -> BatchReport {
        let started_at = Utc::now();
        let summary = BatchSummary::from_events(&events);
        info!("Starting batch\n{}", summary);

        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));
        let mut dispatched = Vec::with_capacity(events.len());

        for event in events {
            let request = RegistrationRequest::new(event, identity.clone());
            let category = request.event.category;
            let dispatch = if category.is_automatable() {
                self.spawn(request, &semaphore).await
            } else if category == Category::Do512 {
                skipped(&request.event, CAPTCHA_MESSAGE)
            } else {
                skipped(&request.event, UNSUPPORTED_MESSAGE)
            };
            dispatched.push(dispatch);
        }

        let mut results = Vec::with_capacity(dispatched.len());
        for dispatch in dispatched {
            results.push(match dispatch {
                Dispatch::Done(record) => record,
                Dispatch::Running(event, handle) => collect(event, handle).await,
            });
        }

        let report = BatchReport {
            summary,
            results,
            started_at,
            finished_at: Utc::now(),
        };
        info!(
            "Batch finished: {} registered, {} not registered\n{}",
            report.registered(),
            report.not_registered(),
            report.summary
        );

        if let Some(writer) = &self.report_writer {
            match writer.write(&report.results).await {
                Ok(receipt) => info!(
                    "Report written to {} ({} rows)",
                    receipt.path.display(),
                    receipt.rows
                ),
                Err(e) => error!("Failed to write report: {}", e),
            }
        }

        report
    }

    /// Waits for a permit, so dispatch starts in input order.
    async fn spawn(&self, request: RegistrationRequest, semaphore: &Arc<Semaphore>) -> Dispatch {
        let permit = match semaphore.clone().acquire_owned().await {
            Ok(permit) => permit,
            Err(e) => {
                let outcome = fatal_outcome(&e.to_string());
                return Dispatch::Done(ResultRecord::from_outcome(&request.event, outcome));
            }
        };

        let runner = self.runner.clone();
        let event = request.event.clone();
        let handle = tokio::spawn(async move {
            let _permit = permit;
            runner.run(&request).await
        });
        Dispatch::Running(event, handle)
    }
}

fn skipped(event: &EventRecord, message: &str) -> Dispatch {
    info!("Skipping '{}' ({}): {}", event.name, event.category, message);
    Dispatch::Done(ResultRecord::from_outcome(
        event,
        RegistrationOutcome::not_registered(message),
    ))
}

async fn collect(
    event: EventRecord,
    handle: JoinHandle<Result<RegistrationOutcome, AutomationError>>,
) -> ResultRecord {
    let outcome = match handle.await {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(e)) => match e.kind() {
            FailureKind::Recoverable => {
                warn!("Could not register for '{}': {}", event.name, e);
                RegistrationOutcome::not_registered(e.message())
            }
            FailureKind::Fatal => {
                error!(
                    "Automation for '{}' failed ({}): {}",
                    event.name,
                    e.kind().as_str(),
                    e
                );
                fatal_outcome(e.message())
            }
        },
        Err(e) => {
            error!("Automation task for '{}' aborted: {}", event.name, e);
            fatal_outcome(&e.to_string())
        }
    };
    ResultRecord::from_outcome(&event, outcome)
}

fn fatal_outcome(reason: &str) -> RegistrationOutcome {
    RegistrationOutcome::not_registered(format!("{} {}", FATAL_PREFIX, reason))
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
