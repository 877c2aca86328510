use chrono::{DateTime, Local};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::error::{ReportError, Result};

pub const PROJECTS_PREFIX: &str = "projects";
pub const CITIES_PREFIX: &str = "cities";

/// Timestamp embedded in report file names.
pub fn timestamp(now: DateTime<Local>) -> String {
    now.format("%Y-%m-%d_%H-%M-%S").to_string()
}

/// `{dir}/{prefix}-{stamp}.json`
pub fn report_path(dir: &Path, prefix: &str, stamp: &str) -> PathBuf {
    dir.join(format!("{}-{}.json", prefix, stamp))
}

/// Write `data` as 2-space indented JSON.
///
/// The contents land in a temp file next to `path` first and are renamed
/// into place, so a failed write never leaves a truncated report behind.
/// On unix the report is created with mode 0600.
pub fn write_report<T: Serialize + ?Sized>(path: &Path, data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data).map_err(|source| ReportError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| ReportError::io(dir, e))?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| ReportError::io(path, e))?;
    tmp.write_all(json.as_bytes())
        .map_err(|e| ReportError::io(path, e))?;
    tmp.flush().map_err(|e| ReportError::io(path, e))?;
    tmp.persist(path).map_err(|e| ReportError::io(path, e.error))?;

    Ok(())
}
