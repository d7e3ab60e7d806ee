//! Configuration schema definitions.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Published spreadsheet the original event list lives in.
pub const DEFAULT_SHEET_URL: &str =
    "https://docs.google.com/spreadsheets/u/1/d/1aTidsOZp9vZnNUHPKaetrsbNJiJKoV80LgRKXLF9zIE/pubhtml";

/// Hard ceiling on simultaneous browser sessions.
pub const MAX_CONCURRENCY: usize = 10;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub batch: BatchConfig,

    #[serde(default)]
    pub timing: TimingConfig,

    #[serde(default)]
    pub artifacts: ArtifactsConfig,

    #[serde(default)]
    pub listing: ListingConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

/// Browser launch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Chrome/Chromium executable. Searched in well-known locations when unset.
    #[serde(default)]
    pub chrome_path: Option<PathBuf>,

    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Parent directory for per-session profiles. Defaults to the system temp dir.
    #[serde(default)]
    pub profile_root: Option<PathBuf>,

    /// How long to wait for a launched browser to expose its debugging endpoint.
    #[serde(default = "default_launch_timeout")]
    pub launch_timeout_ms: u64,

    #[serde(default = "default_window_width")]
    pub window_width: u32,

    #[serde(default = "default_window_height")]
    pub window_height: u32,

    /// Extra command-line switches passed to every browser process.
    #[serde(default)]
    pub extra_args: Vec<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            chrome_path: None,
            headless: default_headless(),
            profile_root: None,
            launch_timeout_ms: default_launch_timeout(),
            window_width: default_window_width(),
            window_height: default_window_height(),
            extra_args: Vec::new(),
        }
    }
}

fn default_headless() -> bool {
    true
}

fn default_launch_timeout() -> u64 {
    10_000
}

fn default_window_width() -> u32 {
    1280
}

fn default_window_height() -> u32 {
    1024
}

/// Batch dispatch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Simultaneous automations in flight. At most [`MAX_CONCURRENCY`].
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Upper bound on one event's automation, session acquisition excluded.
    #[serde(default = "default_automation_timeout")]
    pub automation_timeout_secs: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_concurrency: default_max_concurrency(),
            automation_timeout_secs: default_automation_timeout(),
        }
    }
}

fn default_max_concurrency() -> usize {
    MAX_CONCURRENCY
}

fn default_automation_timeout() -> u64 {
    180
}

/// How settle steps wait for the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaitMode {
    /// Sleep the full settle duration.
    #[default]
    Fixed,
    /// Poll for the next step's control, bounded by the settle duration.
    Poll,
}

/// Settle durations between interaction steps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    /// After opening the event page or a redirect target.
    #[serde(default = "default_page_load")]
    pub page_load_ms: u64,

    /// After clicking the registration entry control.
    #[serde(default = "default_after_entry")]
    pub after_entry_ms: u64,

    /// After clicking checkout.
    #[serde(default = "default_after_checkout")]
    pub after_checkout_ms: u64,

    /// After submitting, before the success screenshot.
    #[serde(default = "default_submit_settle")]
    pub submit_settle_ms: u64,

    #[serde(default)]
    pub wait_mode: WaitMode,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            page_load_ms: default_page_load(),
            after_entry_ms: default_after_entry(),
            after_checkout_ms: default_after_checkout(),
            submit_settle_ms: default_submit_settle(),
            wait_mode: WaitMode::default(),
        }
    }
}

impl TimingConfig {
    /// Longest time the Eventbrite flow spends settling, redirect included.
    pub fn worst_case_ms(&self) -> u64 {
        2 * self.page_load_ms + self.after_entry_ms + self.after_checkout_ms + self.submit_settle_ms
    }
}

fn default_page_load() -> u64 {
    3500
}

fn default_after_entry() -> u64 {
    500
}

fn default_after_checkout() -> u64 {
    4500
}

fn default_submit_settle() -> u64 {
    3500
}

/// Screenshot output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactsConfig {
    #[serde(default = "default_screenshot_dir")]
    pub screenshot_dir: PathBuf,

    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            screenshot_dir: default_screenshot_dir(),
            jpeg_quality: default_jpeg_quality(),
        }
    }
}

fn default_screenshot_dir() -> PathBuf {
    PathBuf::from("screenshots")
}

fn default_jpeg_quality() -> u8 {
    60
}

/// Where the event list comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingKind {
    /// Published spreadsheet HTML page.
    #[default]
    Sheet,
    /// Local JSON file.
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    #[serde(default)]
    pub source: ListingKind,

    #[serde(default = "default_sheet_url")]
    pub url: String,

    #[serde(default)]
    pub path: Option<PathBuf>,

    #[serde(default)]
    pub selectors: SheetSelectorsConfig,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            source: ListingKind::default(),
            url: default_sheet_url(),
            path: None,
            selectors: SheetSelectorsConfig::default(),
        }
    }
}

/// CSS selector overrides for the published sheet. Unset entries keep the
/// built-in selectors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SheetSelectorsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub master: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_column: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_column: Option<String>,
}

impl SheetSelectorsConfig {
    /// Set entries with their config paths.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("listing.selectors.master", &self.master),
            ("listing.selectors.rows", &self.rows),
            ("listing.selectors.link_column", &self.link_column),
            ("listing.selectors.data_column", &self.data_column),
        ]
        .into_iter()
        .filter_map(|(path, value)| value.as_deref().map(|v| (path, v)))
    }
}

fn default_sheet_url() -> String {
    DEFAULT_SHEET_URL.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_report_path")]
    pub path: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            path: default_report_path(),
        }
    }
}

fn default_report_path() -> PathBuf {
    PathBuf::from("results.csv")
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
