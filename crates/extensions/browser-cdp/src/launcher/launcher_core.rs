//! ChromeLauncher: executable discovery, process launch, endpoint discovery.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Instant;

use tokio::process::{Child, Command};
use tracing::{debug, info};

use super::{LaunchConfig, LaunchError};

/// File Chrome writes into its profile directory once the debugging
/// server is listening.
const ACTIVE_PORT_FILE: &str = "DevToolsActivePort";

/// A running Chrome process owned by one session.
pub struct LaunchedBrowser {
    pub child: Child,
    /// HTTP debugging endpoint, e.g. `http://127.0.0.1:40123`.
    pub endpoint: String,
    pub profile_dir: PathBuf,
}

/// Launches isolated Chrome processes.
#[derive(Debug, Clone)]
pub struct ChromeLauncher {
    config: LaunchConfig,
}

impl ChromeLauncher {
    pub fn new(config: LaunchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LaunchConfig {
        &self.config
    }

    /// Find Chrome executable path.
    pub fn find_chrome() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        let paths: &[&str] = &[
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
            "/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
        ];

        #[cfg(target_os = "linux")]
        let paths: &[&str] = &[
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "/snap/bin/chromium",
        ];

        #[cfg(target_os = "windows")]
        let paths: &[&str] = &[
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
        ];

        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        let paths: &[&str] = &[];

        paths.iter().map(PathBuf::from).find(|p| p.exists())
    }

    fn chrome_path(&self) -> Result<PathBuf, LaunchError> {
        match self.config.chrome_path {
            Some(ref path) => Ok(path.clone()),
            None => Self::find_chrome().ok_or(LaunchError::ChromeNotFound),
        }
    }

    /// Command-line switches for a session rooted at `profile_dir`.
    pub fn args(&self, profile_dir: &Path) -> Vec<String> {
        let mut args = vec![
            "--remote-debugging-port=0".to_string(),
            format!("--user-data-dir={}", profile_dir.display()),
            format!(
                "--window-size={},{}",
                self.config.window_width, self.config.window_height
            ),
            "--no-first-run".to_string(),
            "--no-default-browser-check".to_string(),
            "--disable-background-networking".to_string(),
            "--disable-sync".to_string(),
            "--disable-translate".to_string(),
            "--metrics-recording-only".to_string(),
        ];

        if self.config.headless {
            args.push("--headless=new".to_string());
        }

        args.extend(self.config.extra_args.iter().cloned());
        args.push("about:blank".to_string());
        args
    }

    /// Launch Chrome with a fresh profile at `profile_dir` and wait for its
    /// debugging endpoint.
    pub async fn launch(&self, profile_dir: &Path) -> Result<LaunchedBrowser, LaunchError> {
        let chrome_path = self.chrome_path()?;
        tokio::fs::create_dir_all(profile_dir).await?;

        debug!("Launching Chrome with profile at: {}", profile_dir.display());

        let mut child = Command::new(&chrome_path)
            .args(self.args(profile_dir))
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| LaunchError::SpawnFailed(e.to_string()))?;

        info!("Chrome launched with PID: {:?}", child.id());

        let port = match self.wait_for_port(&mut child, profile_dir).await {
            Ok(port) => port,
            Err(e) => {
                let _ = child.kill().await;
                return Err(e);
            }
        };

        Ok(LaunchedBrowser {
            child,
            endpoint: format!("http://127.0.0.1:{}", port),
            profile_dir: profile_dir.to_path_buf(),
        })
    }

    async fn wait_for_port(&self, child: &mut Child, profile_dir: &Path) -> Result<u16, LaunchError> {
        let start = Instant::now();
        let port_file = profile_dir.join(ACTIVE_PORT_FILE);

        loop {
            if let Ok(content) = tokio::fs::read_to_string(&port_file).await {
                if let Some(port) = parse_active_port(&content) {
                    return Ok(port);
                }
            }

            if let Ok(Some(status)) = child.try_wait() {
                return Err(LaunchError::ExitedEarly(status.to_string()));
            }

            if start.elapsed() > self.config.startup_timeout {
                return Err(LaunchError::StartupTimeout(self.config.startup_timeout));
            }

            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        }
    }
}

/// Port on the first line of a `DevToolsActivePort` file.
pub(crate) fn parse_active_port(content: &str) -> Option<u16> {
    content
        .lines()
        .next()
        .and_then(|line| line.trim().parse::<u16>().ok())
        .filter(|port| *port != 0)
}
