use crate::core::calculator::gaps::GapReport;
use crate::errors::{AppError, AppResult};
use crate::export::notify_export_success;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Export the gap report as pretty-printed JSON.
pub fn export_report(report: &GapReport, path: &Path) -> AppResult<()> {
    let json_data = serde_json::to_string_pretty(report)
        .map_err(|e| AppError::Export(format!("JSON serialization error: {e}")))?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;
    file.write_all(b"\n")?;

    notify_export_success("Gap report", path);
    Ok(())
}
