//! Signal quality measurements
//!
//! All measurements are objective and computed from the clean reference and
//! the noisy observation only.
//!
//! # Measurements
//! - Mean, population standard deviation, min, max, RMS
//! - SNR in dB against the clean reference
//! - Dominant non-DC spectral component (FFT)

mod snr;
mod spectrum;
mod stats;

pub use snr::snr_db;
pub use spectrum::{fft_peak, magnitude_spectrum, SpectralPeak};
pub use stats::{basic_stats, calculate_rms, BasicStats};

use crate::error::Result;
use crate::signal::NoisyWaveform;

/// Complete measurement results for one noisy waveform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricSet {
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub rms: f64,
    pub snr_db: f64,
    pub fft_peak_hz: f64,
    pub fft_peak_mag: f64,
}

impl MetricSet {
    /// Measure a noisy waveform against its clean reference
    pub fn compute(wave: &NoisyWaveform) -> Result<Self> {
        let stats = basic_stats(&wave.noisy)?;
        let snr = snr_db(&wave.clean.samples, &wave.noisy)?;
        let peak = fft_peak(&wave.noisy, wave.clean.sample_rate_hz())?;
        Ok(Self::from_parts(stats, snr, peak))
    }

    /// Assemble a metric set from individually computed parts
    pub fn from_parts(stats: BasicStats, snr_db: f64, peak: SpectralPeak) -> Self {
        Self {
            mean: stats.mean,
            std: stats.std,
            min: stats.min,
            max: stats.max,
            rms: stats.rms,
            snr_db,
            fft_peak_hz: peak.frequency_hz,
            fft_peak_mag: peak.magnitude,
        }
    }

    /// Generate a summary string for display
    pub fn summary(&self) -> String {
        format!(
            "SNR: {:.2} dB | Peak: {:.2} Hz (mag {:.1}) | Mean: {:.4} | Std: {:.4} | RMS: {:.4} | Range: [{:.3}, {:.3}]",
            self.snr_db,
            self.fft_peak_hz,
            self.fft_peak_mag,
            self.mean,
            self.std,
            self.rms,
            self.min,
            self.max
        )
    }
}
