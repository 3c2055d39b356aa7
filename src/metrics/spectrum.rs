//! Spectral peak search
//!
//! The real-input spectrum is taken with a full complex FFT and truncated to
//! the non-negative frequency bins `0..=N/2`, matching a real FFT layout.

use rustfft::{num_complex::Complex, FftPlanner};

use crate::error::{Result, SvError};

/// Dominant non-DC component of a spectrum
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectralPeak {
    /// Bin centre frequency in Hz
    pub frequency_hz: f64,
    /// Unnormalised magnitude `|X[k]|`
    pub magnitude: f64,
    /// Bin index, never 0
    pub bin: usize,
}

/// Magnitudes of the non-negative frequency half-spectrum (`N/2 + 1` bins)
pub fn magnitude_spectrum(samples: &[f64]) -> Vec<f64> {
    let n = samples.len();
    if n == 0 {
        return Vec::new();
    }

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(n);

    let mut buffer: Vec<Complex<f64>> = samples.iter().map(|&s| Complex::new(s, 0.0)).collect();
    fft.process(&mut buffer);

    buffer.iter().take(n / 2 + 1).map(|c| c.norm()).collect()
}

/// Find the strongest spectral bin, ignoring DC
///
/// Frequency resolution is `sample_rate / N`. On equal magnitudes the lowest
/// bin wins.
pub fn fft_peak(samples: &[f64], sample_rate: f64) -> Result<SpectralPeak> {
    let n = samples.len();
    if n < 2 {
        return Err(SvError::InsufficientSamples { len: n, required: 2 });
    }

    let mags = magnitude_spectrum(samples);
    let bin = argmax_excluding_dc(&mags).ok_or(SvError::InsufficientSamples { len: n, required: 2 })?;

    Ok(SpectralPeak {
        frequency_hz: bin as f64 * sample_rate / n as f64,
        magnitude: mags[bin],
        bin,
    })
}

/// First index of the maximum over `mags[1..]`
fn argmax_excluding_dc(mags: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &m) in mags.iter().enumerate().skip(1) {
        match best {
            Some((_, best_mag)) if m <= best_mag => {}
            _ => best = Some((i, m)),
        }
    }
    best.map(|(i, _)| i)
}
