//! Reference waveform generator

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SvError};

/// Shape of the clean reference waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalMode {
    Sine,
    Square,
}

impl SignalMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalMode::Sine => "sine",
            SignalMode::Square => "square",
        }
    }
}

impl fmt::Display for SignalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignalMode {
    type Err = SvError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sine" => Ok(SignalMode::Sine),
            "square" => Ok(SignalMode::Square),
            other => Err(SvError::UnsupportedMode {
                mode: other.to_string(),
            }),
        }
    }
}

/// Sampled waveform with its time axis
///
/// `time` and `samples` always have the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    /// Sample instants in seconds, starting at 0
    pub time: Vec<f64>,
    /// Amplitude at each instant
    pub samples: Vec<f64>,
    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl Waveform {
    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample rate as a float, for frequency arithmetic
    pub fn sample_rate_hz(&self) -> f64 {
        self.sample_rate as f64
    }
}

/// Generate a clean waveform
///
/// Produces `floor(sample_rate * duration_s)` samples on an evenly spaced
/// time grid over `[0, duration_s)`.
///
/// A square wave is `sign(sin(2π·f·t))` with `sign(0) == 0`, so the sample at
/// `t = 0` is exactly zero.
///
/// # Arguments
/// * `mode` - Waveform shape
/// * `freq_hz` - Fundamental frequency, must be positive
/// * `duration_s` - Length in seconds, must be positive
/// * `sample_rate` - Samples per second, must be non-zero
pub fn generate(mode: SignalMode, freq_hz: f64, duration_s: f64, sample_rate: u32) -> Result<Waveform> {
    require_positive("freq", freq_hz)?;
    require_positive("duration", duration_s)?;
    if sample_rate == 0 {
        return Err(SvError::InvalidParameter {
            name: "fs",
            reason: "sample rate must be at least 1 Hz".to_string(),
        });
    }

    let num_samples = (sample_rate as f64 * duration_s).floor() as usize;
    let step = if num_samples > 0 {
        duration_s / num_samples as f64
    } else {
        0.0
    };

    let time: Vec<f64> = (0..num_samples).map(|i| i as f64 * step).collect();
    let phase = |t: f64| (2.0 * PI * freq_hz * t).sin();

    let samples: Vec<f64> = match mode {
        SignalMode::Sine => time.iter().map(|&t| phase(t)).collect(),
        SignalMode::Square => time.iter().map(|&t| sign(phase(t))).collect(),
    };

    Ok(Waveform {
        time,
        samples,
        sample_rate,
    })
}

/// Sign with an explicit zero at zero
#[inline]
fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

fn require_positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SvError::InvalidParameter {
            name,
            reason: format!("must be a positive finite number, got {}", value),
        })
    }
}
