//! Registration runner seam between the orchestrator and the engine.

use async_trait::async_trait;

use crate::error::AutomationError;
use crate::types::{RegistrationOutcome, RegistrationRequest};

/// Runs one registration automation.
///
/// Recoverable failures come back as a `not registered` outcome; only
/// [`AutomationError::Fatal`] is returned as an error.
#[async_trait]
pub trait RegistrationRunner: Send + Sync {
    async fn run(
        &self,
        request: &RegistrationRequest,
    ) -> Result<RegistrationOutcome, AutomationError>;
}
