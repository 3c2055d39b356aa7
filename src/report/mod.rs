//! Flat-file reporting
//!
//! `report.csv` is append-only with a header written when the file is first
//! created. `summary.json` is rewritten on every run.

mod row;
mod summary;

pub use row::{ReportRow, RowContext, COLUMNS, REASON_SEPARATOR, TIMESTAMP_FORMAT};
pub use summary::{write_summary, SingleSummary, Summary, SweepSummary};

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use log::debug;

use crate::config::ensure_dir;
use crate::error::{Result, SvError};

/// Append one row to the report at `path`
///
/// Parent directories are created on demand. Returns the report path.
pub fn write_report_row(path: &Path, row: &ReportRow) -> Result<PathBuf> {
    write_report_rows(path, std::slice::from_ref(row))
}

/// Append several rows with a single open of the report file
pub fn write_report_rows(path: &Path, rows: &[ReportRow]) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_dir(parent)?;
        }
    }

    let write_header = !path.exists();

    let mut content = String::new();
    if write_header {
        content.push_str(&ReportRow::csv_header());
        content.push('\n');
    }
    for row in rows {
        content.push_str(&row.to_csv_row());
        content.push('\n');
    }

    let write_err = |e| SvError::FileWriteError {
        path: path.to_path_buf(),
        source: e,
    };
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(write_err)?;
    file.write_all(content.as_bytes()).map_err(write_err)?;

    debug!(
        "Appended {} row(s) to {}{}",
        rows.len(),
        path.display(),
        if write_header { " (new file)" } else { "" }
    );

    Ok(path.to_path_buf())
}

/// Read every row of a report back
///
/// The header must match the fixed column layout exactly.
pub fn read_report(path: &Path) -> Result<Vec<ReportRow>> {
    let text = fs::read_to_string(path).map_err(|e| SvError::FileReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut records = row::parse_records(&text)?.into_iter();

    let (_, header) = records.next().ok_or_else(|| SvError::ReportSchema {
        reason: format!("{} is empty", path.display()),
    })?;
    if header != COLUMNS {
        return Err(SvError::ReportSchema {
            reason: format!("unexpected header: {}", header.join(",")),
        });
    }

    records
        .map(|(line, fields)| ReportRow::from_fields(&fields, line))
        .collect()
}
