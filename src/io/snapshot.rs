//! Snapshot CSV persistence.
//!
//! Each collection run writes the same rows twice:
//! - `defi_yields_YYYYMMDD_HHMM.csv`, never touched again
//! - `defi_yields_latest.csv`, overwritten every run

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::domain::{CollectionTime, PoolRecord};
use crate::error::AppError;

pub const SNAPSHOT_PREFIX: &str = "defi_yields_";
pub const LATEST_FILE_NAME: &str = "defi_yields_latest.csv";

pub fn snapshot_file_name(at: &CollectionTime) -> String {
    format!("{SNAPSHOT_PREFIX}{}.csv", at.file_stamp())
}

/// Write the timestamped and "latest" snapshot files into `raw_dir`.
///
/// Returns the timestamped path, or `None` (nothing written) for an empty set.
pub fn save_snapshot(
    raw_dir: &Path,
    records: &[PoolRecord],
    at: &CollectionTime,
) -> Result<Option<PathBuf>, AppError> {
    if records.is_empty() {
        warn!("no records to save");
        return Ok(None);
    }

    fs::create_dir_all(raw_dir).map_err(|e| {
        AppError::io(format!("Failed to create directory '{}': {e}", raw_dir.display()))
    })?;

    let snapshot_path = raw_dir.join(snapshot_file_name(at));
    write_records_csv(&snapshot_path, records)?;
    info!(path = %snapshot_path.display(), rows = records.len(), "saved snapshot");

    let latest_path = raw_dir.join(LATEST_FILE_NAME);
    write_records_csv(&latest_path, records)?;
    info!(path = %latest_path.display(), "saved latest snapshot");

    Ok(Some(snapshot_path))
}

/// Write pool records to a CSV file with a header row.
pub fn write_records_csv(path: &Path, records: &[PoolRecord]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::io(format!("Failed to create CSV '{}': {e}", path.display())))?;

    for record in records {
        writer
            .serialize(record)
            .map_err(|e| {
                AppError::io(format!(
                    "Failed to write CSV row to '{}': {e}",
                    path.display()
                ))
            })?;
    }

    writer
        .flush()
        .map_err(|e| AppError::io(format!("Failed to flush CSV '{}': {e}", path.display())))?;
    Ok(())
}
