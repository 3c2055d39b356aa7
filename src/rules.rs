//! Pass/fail rules
//!
//! Three fixed checks run in order (SNR, frequency, DC offset); each failing
//! check contributes one reason, in that order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::metrics::MetricSet;

// ============================================================================
// Thresholds
// ============================================================================

/// Minimum acceptable SNR in dB
pub const MIN_SNR_DB: f64 = 10.0;

/// Default tolerance on the spectral peak frequency in Hz
pub const DEFAULT_FREQ_TOL_HZ: f64 = 2.0;

/// Maximum acceptable absolute mean
pub const MAX_DC_OFFSET: f64 = 0.2;

// ============================================================================
// Verdict
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Pass,
    Fail,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pass => "PASS",
            Status::Fail => "FAIL",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PASS" => Ok(Status::Pass),
            "FAIL" => Ok(Status::Fail),
            other => Err(format!("unknown status '{}'", other)),
        }
    }
}

/// Outcome of evaluating one metric set
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub status: Status,
    /// Failing checks, in check order
    pub reasons: Vec<String>,
}

impl Verdict {
    pub fn passed(&self) -> bool {
        self.status == Status::Pass
    }
}

// ============================================================================
// Evaluation
// ============================================================================

/// Evaluate metrics with the default frequency tolerance
pub fn evaluate(metrics: &MetricSet, expected_freq: f64) -> Verdict {
    evaluate_with_tolerance(metrics, expected_freq, DEFAULT_FREQ_TOL_HZ)
}

/// Evaluate metrics against the fixed thresholds
///
/// # Arguments
/// * `metrics` - Measurements of the noisy signal
/// * `expected_freq` - Frequency the spectral peak should sit at, in Hz
/// * `freq_tol_hz` - Allowed absolute deviation of the peak, in Hz
pub fn evaluate_with_tolerance(metrics: &MetricSet, expected_freq: f64, freq_tol_hz: f64) -> Verdict {
    let mut reasons = Vec::new();

    if metrics.snr_db < MIN_SNR_DB {
        reasons.push(format!(
            "SNR too low: {:.2} dB (< {} dB)",
            metrics.snr_db, MIN_SNR_DB
        ));
    }

    if (metrics.fft_peak_hz - expected_freq).abs() > freq_tol_hz {
        reasons.push(format!(
            "FFT peak frequency off: {:.2} Hz (expected {:?}±{:?})",
            metrics.fft_peak_hz, expected_freq, freq_tol_hz
        ));
    }

    if metrics.mean.abs() > MAX_DC_OFFSET {
        reasons.push(format!(
            "DC offset too large: mean={:.3} (> {})",
            metrics.mean, MAX_DC_OFFSET
        ));
    }

    let status = if reasons.is_empty() {
        Status::Pass
    } else {
        Status::Fail
    };

    Verdict { status, reasons }
}
