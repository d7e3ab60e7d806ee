//! # rsvpbot Runtime
//!
//! Registration automation for the event batch:
//!
//! - [`adapter`] - per-site interaction plans and the shared plan runner
//! - [`AutomationEngine`] - one registration in one isolated browser session
//! - [`BatchOrchestrator`] - concurrent fan-out, failure isolation, reporting

pub mod adapter;
pub mod artifacts;
pub mod engine;
pub mod orchestrator;

#[cfg(test)]
pub(crate) mod testing;

pub use adapter::{
    AdapterRegistry, EventbriteAdapter, InteractionPlan, PlanRunner, SiteAdapter,
    SplashthatAdapter,
};
pub use artifacts::ScreenshotPaths;
pub use engine::{AutomationEngine, EngineConfig};
pub use orchestrator::{BatchOrchestrator, CAPTCHA_MESSAGE, FATAL_PREFIX, UNSUPPORTED_MESSAGE};
