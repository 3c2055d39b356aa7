//! Additive white Gaussian noise
//!
//! Every call owns its generator. A seeded call builds a `StdRng` from the
//! seed, an unseeded call draws one from OS entropy; nothing is shared
//! between calls.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use crate::error::{Result, SvError};
use crate::signal::Waveform;

/// Clean waveform together with the noise that was added to it
#[derive(Debug, Clone, PartialEq)]
pub struct NoisyWaveform {
    /// The reference waveform
    pub clean: Waveform,
    /// Noise sequence, one draw per sample
    pub noise: Vec<f64>,
    /// `clean.samples + noise`
    pub noisy: Vec<f64>,
}

impl NoisyWaveform {
    pub fn len(&self) -> usize {
        self.noisy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.noisy.is_empty()
    }
}

/// Add zero-mean Gaussian noise to a clean sequence
///
/// Returns `(noisy, noise)`. With `noise_std == 0` the noise is all zeros and
/// `noisy` equals `clean`. With a seed, identical `(len, noise_std, seed)`
/// inputs always yield identical noise.
pub fn add_noise(clean: &[f64], noise_std: f64, seed: Option<u64>) -> Result<(Vec<f64>, Vec<f64>)> {
    if !noise_std.is_finite() || noise_std < 0.0 {
        return Err(SvError::InvalidParameter {
            name: "noise",
            reason: format!("standard deviation must be >= 0, got {}", noise_std),
        });
    }

    let noise: Vec<f64> = if noise_std == 0.0 {
        vec![0.0; clean.len()]
    } else {
        let dist = Normal::new(0.0, noise_std).map_err(|e| SvError::InvalidParameter {
            name: "noise",
            reason: e.to_string(),
        })?;
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        (0..clean.len()).map(|_| dist.sample(&mut rng)).collect()
    };

    let noisy = clean.iter().zip(noise.iter()).map(|(c, n)| c + n).collect();
    Ok((noisy, noise))
}

/// Add noise to a waveform, keeping the clean reference alongside
pub fn inject(clean: &Waveform, noise_std: f64, seed: Option<u64>) -> Result<NoisyWaveform> {
    let (noisy, noise) = add_noise(&clean.samples, noise_std, seed)?;
    Ok(NoisyWaveform {
        clean: clean.clone(),
        noise,
        noisy,
    })
}
