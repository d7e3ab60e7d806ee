//! Launcher type definitions and configuration.

use std::path::PathBuf;
use std::time::Duration;

use rsvpbot_protocols::SessionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Chrome not found. Please install Google Chrome or set browser.chrome_path")]
    ChromeNotFound,

    #[error("Failed to launch Chrome: {0}")]
    SpawnFailed(String),

    #[error("Chrome exited during startup: {0}")]
    ExitedEarly(String),

    #[error("Chrome did not expose a debugging port within {0:?}")]
    StartupTimeout(Duration),

    #[error("Failed to prepare profile directory: {0}")]
    Profile(#[from] std::io::Error),
}

impl From<LaunchError> for SessionError {
    fn from(e: LaunchError) -> Self {
        match e {
            LaunchError::ChromeNotFound => SessionError::BrowserNotFound(e.to_string()),
            other => SessionError::LaunchFailed(other.to_string()),
        }
    }
}

/// Browser launch configuration.
#[derive(Debug, Clone)]
pub struct LaunchConfig {
    /// Explicit executable. Well-known install locations are searched when unset.
    pub chrome_path: Option<PathBuf>,
    pub headless: bool,
    /// Parent directory for per-session profiles.
    pub profile_root: PathBuf,
    pub startup_timeout: Duration,
    pub window_width: u32,
    pub window_height: u32,
    pub extra_args: Vec<String>,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            chrome_path: None,
            headless: true,
            profile_root: std::env::temp_dir().join("rsvpbot-profiles"),
            startup_timeout: Duration::from_secs(10),
            window_width: 1280,
            window_height: 1024,
            extra_args: Vec::new(),
        }
    }
}
