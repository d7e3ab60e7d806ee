//! CLI definitions for rsvpbot.

use std::path::PathBuf;

use clap::Parser;
use rsvpbot_config::{Config, ListingKind};

/// rsvpbot CLI.
#[derive(Debug, Parser)]
#[command(name = "rsvpbot")]
#[command(about = "Register for every event on a listing through a headless browser")]
#[command(version)]
pub(crate) struct Cli {
    /// Attendee email address
    #[arg(short, long, env = "RSVPBOT_EMAIL")]
    pub email: String,

    /// Attendee first name
    #[arg(short, long = "first-name", visible_alias = "firstName", env = "RSVPBOT_FIRST_NAME")]
    pub first_name: String,

    /// Attendee last name
    #[arg(short, long = "last-name", visible_alias = "lastName", env = "RSVPBOT_LAST_NAME")]
    pub last_name: String,

    /// Configuration file path
    #[arg(short, long, default_value = "rsvpbot.toml")]
    pub config: PathBuf,

    /// Read events from a local JSON file instead of the published sheet
    #[arg(long)]
    pub listing_file: Option<PathBuf>,

    /// Published sheet URL
    #[arg(long, conflicts_with = "listing_file")]
    pub sheet_url: Option<String>,

    /// Report output path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Screenshot directory
    #[arg(long)]
    pub screenshot_dir: Option<PathBuf>,

    /// Simultaneous registrations (at most 10)
    #[arg(long)]
    pub max_concurrency: Option<usize>,

    /// Show the browser windows
    #[arg(long)]
    pub headful: bool,
}

impl Cli {
    /// Apply command-line overrides on top of file configuration.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(ref path) = self.listing_file {
            config.listing.source = ListingKind::Json;
            config.listing.path = Some(path.clone());
        }
        if let Some(ref url) = self.sheet_url {
            config.listing.source = ListingKind::Sheet;
            config.listing.url = url.clone();
        }
        if let Some(ref path) = self.output {
            config.report.path = path.clone();
        }
        if let Some(ref dir) = self.screenshot_dir {
            config.artifacts.screenshot_dir = dir.clone();
        }
        if let Some(n) = self.max_concurrency {
            config.batch.max_concurrency = n;
        }
        if self.headful {
            config.browser.headless = false;
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
