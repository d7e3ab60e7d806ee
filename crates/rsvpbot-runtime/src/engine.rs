//! Automation engine: one registration attempt in one isolated session.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::FutureExt;
use rsvpbot_config::Config;
use rsvpbot_protocols::{
    AutomationError, PageActions, RegistrationOutcome, RegistrationRequest, RegistrationRunner,
    SessionFactory,
};
use tracing::{debug, info, warn};

use crate::adapter::{AdapterRegistry, SiteAdapter};
use crate::artifacts::ScreenshotPaths;

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Upper bound on one adapter run, session acquisition excluded.
    pub automation_timeout: Duration,
    pub screenshot_dir: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            automation_timeout: Duration::from_secs(180),
            screenshot_dir: PathBuf::from("screenshots"),
        }
    }
}

impl From<&Config> for EngineConfig {
    fn from(config: &Config) -> Self {
        Self {
            automation_timeout: Duration::from_secs(config.batch.automation_timeout_secs),
            screenshot_dir: config.artifacts.screenshot_dir.clone(),
        }
    }
}

/// Runs a site adapter inside a fresh browser session.
///
/// Every run opens its own session and releases it on every exit path once
/// it has opened. A diagnostic screenshot is attempted before release;
/// screenshot failures are logged and never change the outcome.
pub struct AutomationEngine {
    sessions: Arc<dyn SessionFactory>,
    adapters: Arc<AdapterRegistry>,
    screenshots: ScreenshotPaths,
    timeout: Duration,
}

impl AutomationEngine {
    pub fn new(
        sessions: Arc<dyn SessionFactory>,
        adapters: Arc<AdapterRegistry>,
        config: EngineConfig,
    ) -> Self {
        Self {
            sessions,
            adapters,
            screenshots: ScreenshotPaths::new(config.screenshot_dir),
            timeout: config.automation_timeout,
        }
    }

    /// Engine with the built-in adapters, timed from `config`.
    pub fn from_config(sessions: Arc<dyn SessionFactory>, config: &Config) -> Self {
        Self::new(
            sessions,
            Arc::new(AdapterRegistry::with_defaults(&config.timing)),
            EngineConfig::from(config),
        )
    }

    pub async fn run(
        &self,
        request: &RegistrationRequest,
    ) -> Result<RegistrationOutcome, AutomationError> {
        let event = &request.event;
        let adapter = self.adapters.get(event.category).ok_or_else(|| {
            AutomationError::fatal(format!("No site adapter for {} events", event.category))
        })?;

        let mut session = self.sessions.open_session().await?;
        debug!("Session {} opened for '{}'", session.id(), event.name);

        let result = self
            .drive(adapter.as_ref(), session.page(), request)
            .await;

        let screenshot = match result {
            Ok(()) => self.screenshots.success(&event.name),
            Err(_) => self.screenshots.error(&event.name),
        };
        if let Err(e) = session.page().screenshot(&screenshot).await {
            warn!("Screenshot for '{}' failed: {}", event.name, e);
        }

        if let Err(e) = session.release().await {
            warn!("Releasing session {} failed: {}", session.id(), e);
        }

        match result {
            Ok(()) => {
                info!("Registered for '{}'", event.name);
                Ok(RegistrationOutcome::registered())
            }
            Err(AutomationError::Recoverable(message)) => {
                warn!("Could not register for '{}': {}", event.name, message);
                Ok(RegistrationOutcome::not_registered(message))
            }
            Err(fatal) => Err(fatal),
        }
    }

    async fn drive(
        &self,
        adapter: &dyn SiteAdapter,
        page: &dyn PageActions,
        request: &RegistrationRequest,
    ) -> Result<(), AutomationError> {
        let guarded = AssertUnwindSafe(adapter.register(page, request)).catch_unwind();

        match tokio::time::timeout(self.timeout, guarded).await {
            Ok(Ok(result)) => result,
            Ok(Err(panic)) => Err(AutomationError::fatal(format!(
                "{} automation panicked: {}",
                adapter.site(),
                panic_message(panic.as_ref())
            ))),
            Err(_) => Err(AutomationError::fatal(format!(
                "{} automation timed out after {}s",
                adapter.site(),
                self.timeout.as_secs()
            ))),
        }
    }
}

#[async_trait]
impl RegistrationRunner for AutomationEngine {
    async fn run(
        &self,
        request: &RegistrationRequest,
    ) -> Result<RegistrationOutcome, AutomationError> {
        AutomationEngine::run(self, request).await
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
