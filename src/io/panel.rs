//! Panel dataset assembly from historical snapshots.
//!
//! Snapshots are read as untyped string tables so that files written under an
//! older (or newer) column layout still concatenate: the panel header is the
//! union of all snapshot headers in order of first appearance, and cells a
//! snapshot lacks are left empty.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::AppError;
use crate::io::snapshot::SNAPSHOT_PREFIX;

pub const PANEL_FILE_NAME: &str = "yield_panel.csv";

const POOL_COLUMN: &str = "pool";
const DATE_COLUMN: &str = "date";

/// A concatenation of snapshot rows under a unified header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// What a panel build produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelSummary {
    pub output: PathBuf,
    pub files_read: usize,
    pub observations: usize,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
    pub unique_pools: usize,
}

/// Timestamped snapshot files in `raw_dir`, sorted by file name.
///
/// The rolling "latest" file is excluded. A missing directory has no snapshots.
pub fn list_snapshot_files(raw_dir: &Path) -> Result<Vec<PathBuf>, AppError> {
    if !raw_dir.is_dir() {
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(raw_dir)
        .map_err(|e| AppError::io(format!("Failed to list '{}': {e}", raw_dir.display())))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            AppError::io(format!("Failed to list '{}': {e}", raw_dir.display()))
        })?;
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if is_snapshot_file_name(name) && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn is_snapshot_file_name(name: &str) -> bool {
    name.starts_with(SNAPSHOT_PREFIX) && name.ends_with(".csv") && !name.contains("latest")
}

impl PanelTable {
    /// Append one snapshot CSV, widening the header as needed.
    pub fn append_csv(&mut self, path: &Path) -> Result<(), AppError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path)
            .map_err(|e| {
                AppError::io(format!(
                    "Failed to open snapshot '{}': {e}",
                    path.display()
                ))
            })?;

        let headers = reader
            .headers()
            .map_err(|e| {
                AppError::data(format!(
                    "Failed to read headers of '{}': {e}",
                    path.display()
                ))
            })?
            .clone();

        let mut index: HashMap<String, usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i))
            .collect();

        // Target column for each source column of this file.
        let mut targets = Vec::with_capacity(headers.len());
        for name in headers.iter() {
            let name = name.trim_start_matches('\u{feff}').to_string();
            let idx = match index.get(&name) {
                Some(&i) => i,
                None => {
                    let i = self.columns.len();
                    self.columns.push(name.clone());
                    index.insert(name, i);
                    for row in &mut self.rows {
                        row.push(String::new());
                    }
                    i
                }
            };
            targets.push(idx);
        }

        for (line, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::data(format!(
                    "Malformed row {} in '{}': {e}",
                    line + 2,
                    path.display()
                ))
            })?;
            let mut row = vec![String::new(); self.columns.len()];
            for (field, &target) in record.iter().zip(&targets) {
                row[target] = field.to_string();
            }
            self.rows.push(row);
        }

        Ok(())
    }

    fn column(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Stable sort by `(pool, date)` ascending; empty keys sort last.
    pub fn sort_by_pool_date(&mut self) {
        let pool = self.column(POOL_COLUMN);
        let date = self.column(DATE_COLUMN);
        self.rows.sort_by(|a, b| {
            cmp_cell(a, b, pool).then_with(|| cmp_cell(a, b, date))
        });
    }

    pub fn unique_pools(&self) -> usize {
        let Some(pool) = self.column(POOL_COLUMN) else {
            return 0;
        };
        self.rows
            .iter()
            .map(|r| r[pool].as_str())
            .filter(|p| !p.is_empty())
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn date_span(&self) -> Option<(String, String)> {
        let date = self.column(DATE_COLUMN)?;
        let mut dates = self.rows.iter().map(|r| r[date].as_str()).filter(|d| !d.is_empty());
        let first = dates.next()?;
        let (min, max) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
        Some((min.to_string(), max.to_string()))
    }

    pub fn write_csv(&self, path: &Path) -> Result<(), AppError> {
        let mut writer = csv::Writer::from_path(path)
            .map_err(|e| {
                AppError::io(format!(
                    "Failed to create panel CSV '{}': {e}",
                    path.display()
                ))
            })?;
        writer
            .write_record(&self.columns)
            .map_err(|e| AppError::io(format!("Failed to write panel CSV header: {e}")))?;
        for row in &self.rows {
            writer
                .write_record(row)
                .map_err(|e| AppError::io(format!("Failed to write panel CSV row: {e}")))?;
        }
        writer
            .flush()
            .map_err(|e| {
                AppError::io(format!(
                    "Failed to flush panel CSV '{}': {e}",
                    path.display()
                ))
            })?;
        Ok(())
    }
}

fn cmp_cell(a: &[String], b: &[String], col: Option<usize>) -> Ordering {
    let Some(col) = col else {
        return Ordering::Equal;
    };
    match (a[col].is_empty(), b[col].is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a[col].cmp(&b[col]),
    }
}

/// Concatenate every snapshot in `raw_dir` into `output`.
///
/// Returns `None` without writing anything when there are no snapshots yet.
pub fn build_panel(raw_dir: &Path, output: &Path) -> Result<Option<PanelSummary>, AppError> {
    let files = list_snapshot_files(raw_dir)?;
    if files.is_empty() {
        warn!(dir = %raw_dir.display(), "no historical snapshots yet; run the collector first");
        return Ok(None);
    }

    let mut panel = PanelTable::default();
    for file in &files {
        panel.append_csv(file)?;
    }
    panel.sort_by_pool_date();

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| {
                AppError::io(format!(
                    "Failed to create directory '{}': {e}",
                    parent.display()
                ))
            })?;
    }
    panel.write_csv(output)?;

    let span = panel.date_span();
    let summary = PanelSummary {
        output: output.to_path_buf(),
        files_read: files.len(),
        observations: panel.rows.len(),
        first_date: span.as_ref().map(|(lo, _)| lo.clone()),
        last_date: span.map(|(_, hi)| hi),
        unique_pools: panel.unique_pools(),
    };
    info!(
        files = summary.files_read,
        rows = summary.observations,
        path = %output.display(),
        "built panel"
    );
    Ok(Some(summary))
}
