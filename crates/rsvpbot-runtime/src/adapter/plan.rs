//! Declarative interaction plans.

use std::time::Duration;

use rsvpbot_config::{TimingConfig, WaitMode};
use rsvpbot_protocols::AttendeeField;

/// A page control addressed by selector, with the failure message used
/// when it is absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub selector: String,
    pub missing: String,
}

impl Control {
    pub fn new(selector: impl Into<String>, missing: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            missing: missing.into(),
        }
    }
}

/// A form field filled with one attendee value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub control: Control,
    pub value: AttendeeField,
}

impl Field {
    pub fn new(
        selector: impl Into<String>,
        value: AttendeeField,
        missing: impl Into<String>,
    ) -> Self {
        Self {
            control: Control::new(selector, missing),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Open the event URL, settle, follow a redirect notice if shown.
    Open,
    /// Guarded click.
    Click(Control),
    Settle(Duration),
    /// Guarded sets of every field, issued concurrently.
    FillAll(Vec<Field>),
    /// Guarded click of the final confirmation control.
    Submit(Control),
}

impl Step {
    /// Selector whose presence the step checks before acting.
    pub fn guard(&self) -> Option<&str> {
        match self {
            Step::Click(control) | Step::Submit(control) => Some(&control.selector),
            Step::FillAll(fields) => fields.first().map(|f| f.control.selector.as_str()),
            Step::Open | Step::Settle(_) => None,
        }
    }
}

/// Ordered guarded steps for one site family, plus how to wait between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionPlan {
    site: String,
    steps: Vec<Step>,
    page_load: Duration,
    submit_settle: Duration,
    wait_mode: WaitMode,
}

impl InteractionPlan {
    pub fn new(site: impl Into<String>, timing: &TimingConfig) -> Self {
        Self {
            site: site.into(),
            steps: Vec::new(),
            page_load: Duration::from_millis(timing.page_load_ms),
            submit_settle: Duration::from_millis(timing.submit_settle_ms),
            wait_mode: timing.wait_mode,
        }
    }

    pub fn open(mut self) -> Self {
        self.steps.push(Step::Open);
        self
    }

    pub fn click(mut self, selector: &str, missing: &str) -> Self {
        self.steps.push(Step::Click(Control::new(selector, missing)));
        self
    }

    pub fn settle(mut self, duration: Duration) -> Self {
        self.steps.push(Step::Settle(duration));
        self
    }

    pub fn fill_all(mut self, fields: Vec<Field>) -> Self {
        self.steps.push(Step::FillAll(fields));
        self
    }

    pub fn submit(mut self, selector: &str, missing: &str) -> Self {
        self.steps.push(Step::Submit(Control::new(selector, missing)));
        self
    }

    pub fn site(&self) -> &str {
        &self.site
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn page_load(&self) -> Duration {
        self.page_load
    }

    pub fn submit_settle(&self) -> Duration {
        self.submit_settle
    }

    pub fn wait_mode(&self) -> WaitMode {
        self.wait_mode
    }

    /// Guard of the first guarded step after index `index`.
    pub(crate) fn next_guard(&self, index: usize) -> Option<&str> {
        self.steps.iter().skip(index + 1).find_map(Step::guard)
    }
}
