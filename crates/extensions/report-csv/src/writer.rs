//! File-backed report writer.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rsvpbot_protocols::{ReportError, ReportReceipt, ReportWriter, ResultRecord};
use tracing::debug;

use crate::codec::{encode_report, parse_report};

/// Writes results to a CSV file, replacing any previous report.
pub struct CsvReportWriter {
    path: PathBuf,
}

impl CsvReportWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ReportWriter for CsvReportWriter {
    async fn write(&self, results: &[ResultRecord]) -> Result<ReportReceipt, ReportError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        tokio::fs::write(&self.path, encode_report(results)).await?;
        debug!("Wrote {} rows to {}", results.len(), self.path.display());

        Ok(ReportReceipt {
            path: self.path.clone(),
            rows: results.len(),
        })
    }
}

/// Read a report written by [`CsvReportWriter`].
pub async fn read_report(path: &Path) -> Result<Vec<ResultRecord>, ReportError> {
    let content = tokio::fs::read_to_string(path).await?;
    parse_report(&content)
}

#[cfg(test)]
#[path = "writer_tests.rs"]
mod tests;
