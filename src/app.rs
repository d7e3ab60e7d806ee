//! Wires configuration, listing, browser and report into one batch run.

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use rsvpbot_browser_cdp::{ChromeSessionFactory, LaunchConfig};
use rsvpbot_config::{
    Config, ConfigError, ConfigLoader, ConfigValidator, ListingKind, SheetSelectorsConfig,
};
use rsvpbot_listing_sheets::{JsonListingSource, PublishedSheetSource, SheetSelectors};
use rsvpbot_protocols::{BatchReport, Identity, ListingSource};
use rsvpbot_report_csv::CsvReportWriter;
use rsvpbot_runtime::{AutomationEngine, BatchOrchestrator};
use tracing::{info, warn};

use crate::cli::Cli;

/// Run one batch for the identity on the command line.
pub(crate) async fn run(cli: Cli) -> Result<BatchReport, Box<dyn Error>> {
    let identity = Identity::new(&cli.email, &cli.first_name, &cli.last_name)?;

    let config = load_config(&cli)?;

    let listing = listing_source(&config)?;
    info!("Fetching events from {}", listing.describe());
    let events = listing.fetch().await?;

    let sessions = Arc::new(ChromeSessionFactory::new(
        launch_config(&config),
        config.artifacts.jpeg_quality,
    ));
    let engine = AutomationEngine::from_config(sessions, &config);
    let orchestrator = BatchOrchestrator::new(Arc::new(engine), config.batch.max_concurrency)
        .with_report_writer(Arc::new(CsvReportWriter::new(&config.report.path)));

    Ok(orchestrator.run_batch(events, &identity).await)
}

/// Load the config file (defaults when absent), apply CLI overrides and
/// validate the result.
pub(crate) fn load_config(cli: &Cli) -> Result<Config, ConfigError> {
    let mut config = ConfigLoader::load_or_default(&cli.config)?;
    cli.apply_overrides(&mut config);

    let result = ConfigValidator::validate(&config);
    for warning in &result.warnings {
        warn!("Config {}: {}", warning.path, warning.message);
    }
    match result.into_error() {
        Some(err) => Err(err),
        None => Ok(config),
    }
}

pub(crate) fn listing_source(config: &Config) -> Result<Box<dyn ListingSource>, Box<dyn Error>> {
    match config.listing.source {
        ListingKind::Sheet => Ok(Box::new(
            PublishedSheetSource::new(&config.listing.url)?
                .with_selectors(sheet_selectors(&config.listing.selectors)),
        )),
        ListingKind::Json => {
            let path = config.listing.path.clone().ok_or_else(|| ConfigError::InvalidValue {
                field: "listing.path".to_string(),
                message: "required when listing.source is json".to_string(),
            })?;
            Ok(Box::new(JsonListingSource::new(path)))
        }
    }
}

/// Built-in sheet selectors with any configured overrides applied.
pub(crate) fn sheet_selectors(overrides: &SheetSelectorsConfig) -> SheetSelectors {
    let defaults = SheetSelectors::default();
    SheetSelectors {
        master: overrides.master.clone().unwrap_or(defaults.master),
        rows: overrides.rows.clone().unwrap_or(defaults.rows),
        link_column: overrides.link_column.clone().unwrap_or(defaults.link_column),
        data_column: overrides.data_column.clone().unwrap_or(defaults.data_column),
    }
}

pub(crate) fn launch_config(config: &Config) -> LaunchConfig {
    let browser = &config.browser;
    let defaults = LaunchConfig::default();
    LaunchConfig {
        chrome_path: browser.chrome_path.clone(),
        headless: browser.headless,
        profile_root: browser.profile_root.clone().unwrap_or(defaults.profile_root),
        startup_timeout: Duration::from_millis(browser.launch_timeout_ms),
        window_width: browser.window_width,
        window_height: browser.window_height,
        extra_args: browser.extra_args.clone(),
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
