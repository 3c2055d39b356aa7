//! Run summary file
//!
//! Non-finite floats (an infinite SNR) are written as JSON `null`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::ensure_dir;
use crate::error::{Result, SvError};
use crate::rules::Status;

/// Summary of a single-run invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleSummary {
    pub last_run: String,
    pub status: Status,
    pub snr_db: f64,
    pub fft_peak_hz: f64,
    pub reasons: Vec<String>,
}

/// Summary of a noise sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepSummary {
    pub last_run: String,
    /// Always `"sweep"`
    pub mode: String,
    pub points: usize,
    pub best_snr_db: f64,
    pub worst_snr_db: f64,
    pub sweep_plot: PathBuf,
}

impl SweepSummary {
    /// Build a sweep summary from the per-point SNR values
    pub fn from_snrs(last_run: String, snrs: &[f64], sweep_plot: PathBuf) -> Self {
        Self {
            last_run,
            mode: "sweep".to_string(),
            points: snrs.len(),
            best_snr_db: snrs.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            worst_snr_db: snrs.iter().copied().fold(f64::INFINITY, f64::min),
            sweep_plot,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Summary {
    Sweep(SweepSummary),
    Single(SingleSummary),
}

/// Overwrite the summary file at `path`
pub fn write_summary(path: &Path, summary: &Summary) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_dir(parent)?;
        }
    }

    let content = serde_json::to_string_pretty(summary)?;
    fs::write(path, content).map_err(|e| SvError::FileWriteError {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tempfile::tempdir;

    #[test]
    fn test_single_summary_shape() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("summary.json");
        let summary = Summary::Single(SingleSummary {
            last_run: "2026-10-16T12:00:00".to_string(),
            status: Status::Fail,
            snr_db: 4.5,
            fft_peak_hz: 50.0,
            reasons: vec!["SNR too low: 4.50 dB (< 10 dB)".to_string()],
        });

        write_summary(&path, &summary).unwrap();
        let json: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

        assert_eq!(json["last_run"], "2026-10-16T12:00:00");
        assert_eq!(json["status"], "FAIL");
        assert_eq!(json["snr_db"], 4.5);
        assert_eq!(json["reasons"][0], "SNR too low: 4.50 dB (< 10 dB)");
        assert_eq!(json.as_object().unwrap().len(), 5);
    }

    #[test]
    fn test_infinite_snr_serializes_as_null() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("summary.json");
        let summary = Summary::Single(SingleSummary {
            last_run: "2026-10-16T12:00:00".to_string(),
            status: Status::Pass,
            snr_db: f64::INFINITY,
            fft_peak_hz: 50.0,
            reasons: Vec::new(),
        });

        write_summary(&path, &summary).unwrap();
        let json: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert!(json["snr_db"].is_null());
        assert_eq!(json["status"], "PASS");
    }

    #[test]
    fn test_sweep_summary_overwrites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("summary.json");
        fs::write(&path, "stale").unwrap();

        let summary = SweepSummary::from_snrs(
            "2026-10-16T12:00:00".to_string(),
            &[30.0, 12.5, -3.0],
            PathBuf::from("plots/snr_vs_noise.png"),
        );
        write_summary(&path, &Summary::Sweep(summary)).unwrap();

        let json: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["mode"], "sweep");
        assert_eq!(json["points"], 3);
        assert_eq!(json["best_snr_db"], 30.0);
        assert_eq!(json["worst_snr_db"], -3.0);
        assert_eq!(json["sweep_plot"], "plots/snr_vs_noise.png");
    }
}
