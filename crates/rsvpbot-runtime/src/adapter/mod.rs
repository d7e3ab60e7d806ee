//! Site adapters.
//!
//! Each supported site family is an [`InteractionPlan`]: an ordered list of
//! guarded steps. A guarded step checks that its control exists before
//! acting on it and fails recoverably, with the control's message, when it
//! does not. Every plan runs through the same [`PlanRunner`].

mod eventbrite;
mod plan;
mod registry;
mod runner;
mod splashthat;

pub use eventbrite::EventbriteAdapter;
pub use plan::{Control, Field, InteractionPlan, Step};
pub use registry::{AdapterRegistry, RegistryError};
pub use runner::{PlanRunner, REDIRECT_NOTICE};
pub use splashthat::SplashthatAdapter;

use async_trait::async_trait;
use rsvpbot_protocols::{AutomationError, Category, PageActions, RegistrationRequest};

/// Registration flow for one site family.
#[async_trait]
pub trait SiteAdapter: Send + Sync {
    /// Short site name used in logs.
    fn site(&self) -> &str;

    /// Category of events this adapter handles.
    fn category(&self) -> Category;

    fn plan(&self) -> &InteractionPlan;

    /// Drive `page` through the plan for `request`.
    async fn register(
        &self,
        page: &dyn PageActions,
        request: &RegistrationRequest,
    ) -> Result<(), AutomationError> {
        PlanRunner::new(self.plan(), page, request).run().await
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod runner_tests;
