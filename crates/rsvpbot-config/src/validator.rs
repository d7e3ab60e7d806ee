//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::{Config, ListingKind, MAX_CONCURRENCY};

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// First error as a [`ConfigError`], if any.
    pub fn into_error(self) -> Option<ConfigError> {
        self.errors.into_iter().next().map(|e| ConfigError::InvalidValue {
            field: e.path,
            message: e.message,
        })
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_browser(config, &mut result);
        Self::validate_batch(config, &mut result);
        Self::validate_artifacts(config, &mut result);
        Self::validate_listing(config, &mut result);

        result
    }

    fn validate_browser(config: &Config, result: &mut ValidationResult) {
        if let Some(ref path) = config.browser.chrome_path {
            if !path.exists() {
                result.add_warning(ValidationWarning::new(
                    "browser.chrome_path",
                    format!("Browser executable does not exist: {:?}", path),
                ));
            }
        }

        if config.browser.launch_timeout_ms == 0 {
            result.add_error(ValidationError::new(
                "browser.launch_timeout_ms",
                "launch_timeout_ms must be greater than 0",
            ));
        }
    }

    fn validate_batch(config: &Config, result: &mut ValidationResult) {
        let batch = &config.batch;

        if batch.max_concurrency == 0 {
            result.add_error(ValidationError::new(
                "batch.max_concurrency",
                "max_concurrency must be greater than 0",
            ));
        }

        if batch.max_concurrency > MAX_CONCURRENCY {
            result.add_error(ValidationError::new(
                "batch.max_concurrency",
                format!("max_concurrency must be at most {}", MAX_CONCURRENCY),
            ));
        }

        if batch.automation_timeout_secs == 0 {
            result.add_error(ValidationError::new(
                "batch.automation_timeout_secs",
                "automation_timeout_secs must be greater than 0",
            ));
        } else if batch.automation_timeout_secs * 1000 <= config.timing.worst_case_ms() {
            result.add_warning(ValidationWarning::new(
                "batch.automation_timeout_secs",
                format!(
                    "automation_timeout_secs ({}s) does not cover the configured settle time ({}ms)",
                    batch.automation_timeout_secs,
                    config.timing.worst_case_ms()
                ),
            ));
        }
    }

    fn validate_artifacts(config: &Config, result: &mut ValidationResult) {
        let quality = config.artifacts.jpeg_quality;
        if quality == 0 || quality > 100 {
            result.add_error(ValidationError::new(
                "artifacts.jpeg_quality",
                "jpeg_quality must be between 1 and 100",
            ));
        }
    }

    fn validate_listing(config: &Config, result: &mut ValidationResult) {
        for (path, selector) in config.listing.selectors.entries() {
            if selector.trim().is_empty() {
                result.add_error(ValidationError::new(path, "selector must not be empty"));
            }
        }

        match config.listing.source {
            ListingKind::Sheet => {
                let url = &config.listing.url;
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    result.add_error(ValidationError::new(
                        "listing.url",
                        "url must start with http:// or https://",
                    ));
                }
            }
            ListingKind::Json => match config.listing.path {
                None => result.add_error(ValidationError::new(
                    "listing.path",
                    "path is required for the json listing source",
                )),
                Some(ref path) if !path.exists() => result.add_warning(ValidationWarning::new(
                    "listing.path",
                    format!("Listing file does not exist: {:?}", path),
                )),
                Some(_) => {}
            },
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
