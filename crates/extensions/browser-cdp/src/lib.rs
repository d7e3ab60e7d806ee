//! # rsvpbot Browser Extension
//!
//! Isolated Chrome sessions driven over the Chrome DevTools Protocol.
//!
//! Each [`ChromeSessionFactory::open_session`] call launches its own Chrome
//! process with a throwaway profile directory, connects over CDP and opens a
//! single page. Releasing the session kills the process and removes the
//! profile.
//!
//! ## Usage
//!
//! ```ignore
//! use rsvpbot_browser_cdp::{ChromeSessionFactory, LaunchConfig};
//!
//! let factory = ChromeSessionFactory::new(LaunchConfig::default(), 60);
//! let mut session = factory.open_session().await?;
//! session.page().open("https://example.com").await?;
//! session.release().await?;
//! ```

pub mod cdp;
mod chrome;
pub mod launcher;

pub use chrome::{ChromePage, ChromeSession, ChromeSessionFactory};
pub use launcher::{ChromeLauncher, LaunchConfig, LaunchError};
