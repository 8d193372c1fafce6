// src/export/mod.rs

pub mod csv;
pub(crate) mod fs_utils;
pub mod json;

pub use self::csv::{CsvSink, Output, write_bars};
pub use fs_utils::ensure_writable;

use crate::ui::messages::success;
use std::path::Path;

/// Helper comune per messaggi di completamento export.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} written: {}", path.display()));
}
