//! Signal-to-noise ratio

use crate::error::{Result, SvError};
use crate::metrics::stats::mean_power;

/// SNR in dB of `noisy` against its `clean` reference
///
/// The noise is taken as `noisy - clean`. Returns `f64::INFINITY` when the
/// noise power is exactly zero.
pub fn snr_db(clean: &[f64], noisy: &[f64]) -> Result<f64> {
    if clean.len() != noisy.len() {
        return Err(SvError::LengthMismatch {
            clean: clean.len(),
            noisy: noisy.len(),
        });
    }
    if clean.is_empty() {
        return Err(SvError::InsufficientSamples { len: 0, required: 1 });
    }

    let noise: Vec<f64> = noisy.iter().zip(clean.iter()).map(|(n, c)| n - c).collect();
    let signal_power = mean_power(clean);
    let noise_power = mean_power(&noise);

    if noise_power == 0.0 {
        return Ok(f64::INFINITY);
    }
    Ok(10.0 * (signal_power / noise_power).log10())
}
