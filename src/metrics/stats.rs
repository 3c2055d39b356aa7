//! Elementary sample statistics

use crate::error::{Result, SvError};

/// Summary statistics of a sample sequence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BasicStats {
    pub mean: f64,
    /// Population standard deviation
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub rms: f64,
}

/// Calculate mean, population std, min, max and RMS
pub fn basic_stats(samples: &[f64]) -> Result<BasicStats> {
    if samples.is_empty() {
        return Err(SvError::InsufficientSamples { len: 0, required: 1 });
    }

    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Ok(BasicStats {
        mean,
        std: variance.sqrt(),
        min,
        max,
        rms: calculate_rms(samples),
    })
}

/// Root mean square, `sqrt(mean(x²))`
pub fn calculate_rms(samples: &[f64]) -> f64 {
    mean_power(samples).sqrt()
}

/// Mean of squared samples; 0 for an empty slice
pub(crate) fn mean_power(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().map(|s| s * s).sum::<f64>() / samples.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_known_sequence() {
        let stats = basic_stats(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_relative_eq!(stats.mean, 2.5);
        assert_relative_eq!(stats.std, 1.25_f64.sqrt());
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 4.0);
        assert_relative_eq!(stats.rms, 7.5_f64.sqrt());
    }

    #[test]
    fn test_rms_of_full_sine_period() {
        let n = 1000;
        let samples: Vec<f64> = (0..n)
            .map(|i| (2.0 * std::f64::consts::PI * i as f64 / n as f64).sin())
            .collect();
        assert_relative_eq!(calculate_rms(&samples), 0.5_f64.sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn test_constant_has_zero_std() {
        let stats = basic_stats(&[0.3; 16]).unwrap();
        assert_relative_eq!(stats.mean, 0.3, epsilon = 1e-12);
        assert!(stats.std < 1e-12);
        assert_relative_eq!(stats.rms, 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_is_error() {
        assert!(matches!(
            basic_stats(&[]),
            Err(SvError::InsufficientSamples { len: 0, .. })
        ));
    }
}
