//! Browser session lifecycle.

use async_trait::async_trait;

use crate::error::SessionError;
use crate::page::PageActions;

/// One isolated browser-driving context owning exactly one page.
///
/// Sessions are never shared across registrations. The owner must call
/// [`BrowserSession::release`] on every exit path.
#[async_trait]
pub trait BrowserSession: Send + Sync {
    /// Identifier used in logs.
    fn id(&self) -> &str;

    /// The session's page.
    fn page(&self) -> &dyn PageActions;

    /// Tear down the session and its browser process. Idempotent.
    async fn release(&mut self) -> Result<(), SessionError>;
}

/// Opens fresh browser sessions.
#[async_trait]
pub trait SessionFactory: Send + Sync {
    async fn open_session(&self) -> Result<Box<dyn BrowserSession>, SessionError>;
}
