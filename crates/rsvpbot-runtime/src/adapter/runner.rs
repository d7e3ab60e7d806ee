//! Executes an [`InteractionPlan`] against a page.

use std::time::Duration;

use futures::future::try_join_all;
use rsvpbot_config::WaitMode;
use rsvpbot_protocols::{AutomationError, OpenStatus, PageActions, RegistrationRequest};
use tracing::debug;

use super::plan::{Control, Field, InteractionPlan, Step};

/// Title of the interstitial page shown for tracked outbound links.
pub const REDIRECT_NOTICE: &str = "Redirect Notice";

const NO_REDIRECT_LINK: &str = "Doesnt have a new link to redirect to";

const POLL_START: Duration = Duration::from_millis(50);
const POLL_CAP: Duration = Duration::from_secs(1);

/// Runs one plan for one request on one page.
pub struct PlanRunner<'a> {
    plan: &'a InteractionPlan,
    page: &'a dyn PageActions,
    request: &'a RegistrationRequest,
}

impl<'a> PlanRunner<'a> {
    pub fn new(
        plan: &'a InteractionPlan,
        page: &'a dyn PageActions,
        request: &'a RegistrationRequest,
    ) -> Self {
        Self {
            plan,
            page,
            request,
        }
    }

    /// Run every step in order, then settle after submission.
    ///
    /// `Ok(())` means the confirmation control was clicked.
    pub async fn run(&self) -> Result<(), AutomationError> {
        for (index, step) in self.plan.steps().iter().enumerate() {
            let next_guard = self.plan.next_guard(index);
            match step {
                Step::Open => self.open_event(next_guard).await?,
                Step::Click(control) | Step::Submit(control) => self.guarded_click(control).await?,
                Step::Settle(duration) => self.settle(*duration, next_guard).await?,
                Step::FillAll(fields) => self.fill_all(fields).await?,
            }
        }

        self.page.wait(self.plan.submit_settle()).await;
        Ok(())
    }

    async fn open_event(&self, next_guard: Option<&str>) -> Result<(), AutomationError> {
        let url = &self.request.event.url;
        debug!("[{}] opening {}", self.plan.site(), url);

        if let OpenStatus::Failed(reason) = self.page.open(url).await? {
            debug!("[{}] open failed: {}", self.plan.site(), reason);
            return Err(AutomationError::fatal("something happened trying to open page"));
        }
        self.settle(self.plan.page_load(), next_guard).await?;

        if self.page.title().await? != REDIRECT_NOTICE {
            return Ok(());
        }

        let href = if self.page.element_exists("a").await? {
            self.page.read_attribute("a", "href").await?
        } else {
            None
        };
        // A blank href resolves to the notice page itself.
        let Some(href) = href.filter(|h| !h.trim().is_empty()) else {
            return Err(AutomationError::recoverable(NO_REDIRECT_LINK));
        };

        let base = self.page.current_url().await?;
        let target = resolve_link(&base, &href);
        debug!("[{}] following redirect to {}", self.plan.site(), target);

        if let OpenStatus::Failed(reason) = self.page.open(&target).await? {
            debug!("[{}] redirect open failed: {}", self.plan.site(), reason);
            return Err(AutomationError::fatal(
                "something happened trying to open redirect page",
            ));
        }
        self.settle(self.plan.page_load(), next_guard).await
    }

    async fn guarded_click(&self, control: &Control) -> Result<(), AutomationError> {
        if !self.page.element_exists(&control.selector).await? {
            return Err(AutomationError::recoverable(control.missing.clone()));
        }
        self.page.click(&control.selector).await?;
        Ok(())
    }

    async fn fill_all(&self, fields: &[Field]) -> Result<(), AutomationError> {
        let attendee = &self.request.attendee;
        try_join_all(fields.iter().map(|field| async move {
            let selector = &field.control.selector;
            if !self.page.element_exists(selector).await? {
                return Err(AutomationError::recoverable(field.control.missing.clone()));
            }
            self.page
                .set_field_value(selector, attendee.field(field.value))
                .await?;
            Ok::<(), AutomationError>(())
        }))
        .await?;
        Ok(())
    }

    async fn settle(&self, duration: Duration, until: Option<&str>) -> Result<(), AutomationError> {
        match (self.plan.wait_mode(), until) {
            (WaitMode::Poll, Some(selector)) => self.poll_for(selector, duration).await,
            _ => {
                self.page.wait(duration).await;
                Ok(())
            }
        }
    }

    /// Wait until `selector` matches, sleeping with exponential backoff.
    /// Total sleep never exceeds `budget`.
    async fn poll_for(&self, selector: &str, budget: Duration) -> Result<(), AutomationError> {
        let mut waited = Duration::ZERO;
        let mut delay = POLL_START;

        while !self.page.element_exists(selector).await? {
            if waited >= budget {
                break;
            }
            let step = delay.min(budget - waited);
            self.page.wait(step).await;
            waited += step;
            delay = (delay * 2).min(POLL_CAP);
        }
        Ok(())
    }
}

/// Resolve a possibly relative link against the page it was found on.
pub(crate) fn resolve_link(base: &str, href: &str) -> String {
    url::Url::parse(base)
        .and_then(|base| base.join(href))
        .map(|url| url.to_string())
        .unwrap_or_else(|_| href.to_string())
}
