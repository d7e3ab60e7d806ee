//! Chrome-backed implementations of the session traits.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rsvpbot_protocols::{
    BrowserSession, OpenStatus, PageActions, PageError, SessionError, SessionFactory,
};
use tokio::process::Child;
use tracing::{debug, info, warn};

use crate::cdp::{CdpClient, CdpError, PageSession, ScreenshotFormat};
use crate::launcher::{ChromeLauncher, LaunchConfig};

/// The single page of a [`ChromeSession`].
pub struct ChromePage {
    session: PageSession,
    jpeg_quality: u8,
}

impl ChromePage {
    pub fn new(session: PageSession, jpeg_quality: u8) -> Self {
        Self {
            session,
            jpeg_quality,
        }
    }
}

#[async_trait]
impl PageActions for ChromePage {
    async fn open(&self, url: &str) -> Result<OpenStatus, PageError> {
        match self.session.navigate(url).await {
            Ok(_) => Ok(OpenStatus::Success),
            Err(CdpError::NavigationFailed(reason)) => Ok(OpenStatus::Failed(reason)),
            Err(e) => Err(e.into()),
        }
    }

    async fn title(&self) -> Result<String, PageError> {
        Ok(self.session.get_title().await?)
    }

    async fn current_url(&self) -> Result<String, PageError> {
        Ok(self.session.get_url().await?)
    }

    async fn element_exists(&self, selector: &str) -> Result<bool, PageError> {
        Ok(self.session.count_matches(selector).await? > 0)
    }

    async fn read_text(&self, selector: &str) -> Result<Option<String>, PageError> {
        Ok(self.session.text_of(selector).await?)
    }

    async fn read_attribute(
        &self,
        selector: &str,
        attr: &str,
    ) -> Result<Option<String>, PageError> {
        Ok(self.session.property_of(selector, attr).await?)
    }

    async fn set_field_value(&self, selector: &str, value: &str) -> Result<(), PageError> {
        if !self.session.set_value(selector, value).await? {
            debug!("set_field_value: no match for {}", selector);
        }
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<(), PageError> {
        if !self.session.click_first(selector).await? {
            debug!("click: no match for {}", selector);
        }
        Ok(())
    }

    async fn screenshot(&self, path: &Path) -> Result<(), PageError> {
        let data = self
            .session
            .screenshot(ScreenshotFormat::Jpeg, Some(self.jpeg_quality))
            .await
            .map_err(|e| PageError::Screenshot(e.to_string()))?;

        let bytes = STANDARD
            .decode(data)
            .map_err(|e| PageError::Screenshot(format!("Invalid image data: {}", e)))?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, bytes).await?;

        debug!("Screenshot saved to {}", path.display());
        Ok(())
    }
}

/// One Chrome process, its profile directory and its single page.
pub struct ChromeSession {
    id: String,
    page: ChromePage,
    client: Option<CdpClient>,
    child: Option<Child>,
    profile_dir: PathBuf,
}

#[async_trait]
impl BrowserSession for ChromeSession {
    fn id(&self) -> &str {
        &self.id
    }

    fn page(&self) -> &dyn PageActions {
        &self.page
    }

    async fn release(&mut self) -> Result<(), SessionError> {
        if let Some(client) = self.client.take() {
            if let Err(e) = client.close_page(self.page.session.target_id()).await {
                debug!("Session {}: close page failed: {}", self.id, e);
            }
        }

        let mut failure = None;
        if let Some(mut child) = self.child.take() {
            if let Err(e) = child.kill().await {
                failure = Some(format!("kill browser process: {}", e));
            }
        } else {
            return Ok(());
        }

        if let Err(e) = tokio::fs::remove_dir_all(&self.profile_dir).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(
                    "Session {}: failed to remove profile {}: {}",
                    self.id,
                    self.profile_dir.display(),
                    e
                );
            }
        }

        info!("Session {} released", self.id);
        match failure {
            Some(msg) => Err(SessionError::ReleaseFailed(msg)),
            None => Ok(()),
        }
    }
}

/// Opens a fresh Chrome process per session.
pub struct ChromeSessionFactory {
    launcher: ChromeLauncher,
    jpeg_quality: u8,
}

impl ChromeSessionFactory {
    pub fn new(config: LaunchConfig, jpeg_quality: u8) -> Self {
        Self {
            launcher: ChromeLauncher::new(config),
            jpeg_quality,
        }
    }
}

#[async_trait]
impl SessionFactory for ChromeSessionFactory {
    async fn open_session(&self) -> Result<Box<dyn BrowserSession>, SessionError> {
        let id = uuid::Uuid::new_v4().to_string();
        let profile_dir = self
            .launcher
            .config()
            .profile_root
            .join(format!("rsvpbot-{}", id));

        let launched = match self.launcher.launch(&profile_dir).await {
            Ok(launched) => launched,
            Err(e) => {
                let _ = tokio::fs::remove_dir_all(&profile_dir).await;
                return Err(e.into());
            }
        };

        let mut child = launched.child;
        let connected = async {
            let client = CdpClient::connect(&launched.endpoint).await?;
            let page = client.new_page().await?;
            Ok::<_, CdpError>((client, page))
        }
        .await;

        let (client, page) = match connected {
            Ok(pair) => pair,
            Err(e) => {
                let _ = child.kill().await;
                let _ = tokio::fs::remove_dir_all(&profile_dir).await;
                return Err(SessionError::ConnectionFailed(e.to_string()));
            }
        };

        debug!("Session {} opened at {}", id, launched.endpoint);

        Ok(Box::new(ChromeSession {
            id,
            page: ChromePage::new(page, self.jpeg_quality),
            client: Some(client),
            child: Some(child),
            profile_dir: launched.profile_dir,
        }))
    }
}
