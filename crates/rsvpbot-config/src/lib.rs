//! # rsvpbot Config
//!
//! TOML configuration for the registration bot: browser launch, batch
//! limits, step timing, artifacts, listing source and report output.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
