//! Listing source and report writer errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ListingError {
    #[error("Failed to fetch listing: {0}")]
    Fetch(String),

    #[error("Invalid listing: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Invalid report: {0}")]
    Format(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
