//! # rsvpbot Protocols
//!
//! Domain types and trait seams shared by every rsvpbot crate.
//! Contains only data types and interface definitions - no browser,
//! network or filesystem code.
//!
//! ## Core Traits
//!
//! - [`PageActions`] - Primitive operations against one loaded page
//! - [`BrowserSession`] / [`SessionFactory`] - Isolated per-event browser sessions
//! - [`ListingSource`] - Produces the candidate event list
//! - [`ReportWriter`] - Persists the batch results
//! - [`RegistrationRunner`] - Runs one registration automation

pub mod error;
pub mod listing;
pub mod page;
pub mod report;
pub mod runner;
pub mod session;
pub mod types;

pub use error::{
    AutomationError, FailureKind, ListingError, PageError, ReportError, SessionError,
    ValidationError,
};
pub use listing::ListingSource;
pub use page::{OpenStatus, PageActions};
pub use report::{ReportReceipt, ReportWriter};
pub use runner::RegistrationRunner;
pub use session::{BrowserSession, SessionFactory};
pub use types::*;
