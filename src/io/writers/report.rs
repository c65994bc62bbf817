use std::path::Path;

use tracing::info;

use crate::api::BatchReport;
use crate::error::Result;

/// Write a batch report as pretty-printed JSON.
pub fn write_batch_report(report: &BatchReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)?;
    info!("Batch report written to {:?}", path);
    Ok(())
}
