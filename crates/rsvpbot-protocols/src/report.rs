//! Report writer seam.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::ReportError;
use crate::types::ResultRecord;

/// Confirmation that a report was persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportReceipt {
    pub path: PathBuf,
    pub rows: usize,
}

/// Persists batch results.
#[async_trait]
pub trait ReportWriter: Send + Sync {
    async fn write(&self, results: &[ResultRecord]) -> Result<ReportReceipt, ReportError>;
}
