//! Run configuration
//!
//! Parameters of one invocation, the noise sweep range and the on-disk output
//! layout.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SvError};

/// Default output directory, relative to the working directory
pub const DEFAULT_OUTPUT_DIR: &str = "outputs";

/// Parameters shared by single and sweep runs
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Waveform shape selector, parsed when the pipeline runs
    pub mode: String,
    /// Tone frequency in Hz; also the expected spectral peak
    pub freq_hz: f64,
    /// Noise standard deviation for single runs
    pub noise_std: f64,
    pub seed: Option<u64>,
    pub duration_s: f64,
    /// Requested sample rate; truncated to whole Hz
    pub sample_rate_hz: f64,
    pub output_dir: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            mode: "sine".to_string(),
            freq_hz: 50.0,
            noise_std: 0.1,
            seed: None,
            duration_s: 1.0,
            sample_rate_hz: 10_000.0,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl RunConfig {
    /// Integer sample rate used for generation
    pub fn sample_rate(&self) -> u32 {
        // Saturating float-to-int cast; NaN and negatives become 0
        self.sample_rate_hz as u32
    }

    /// Check every numeric parameter of a single run
    ///
    /// The mode string is not checked here; callers parse it first so an
    /// unknown mode is reported as `UnsupportedMode`.
    pub fn validate(&self) -> Result<()> {
        self.validate_signal()?;
        if !(self.noise_std.is_finite() && self.noise_std >= 0.0) {
            return Err(invalid("noise", format!("must be >= 0, got {}", self.noise_std)));
        }
        Ok(())
    }

    /// Check the waveform parameters only
    ///
    /// A sweep takes its noise levels from the sweep range, so `noise_std`
    /// is ignored.
    pub fn validate_signal(&self) -> Result<()> {
        if !(self.freq_hz.is_finite() && self.freq_hz > 0.0) {
            return Err(invalid("freq", format!("must be > 0, got {}", self.freq_hz)));
        }
        if !(self.duration_s.is_finite() && self.duration_s > 0.0) {
            return Err(invalid("duration", format!("must be > 0, got {}", self.duration_s)));
        }
        if self.sample_rate() == 0 {
            return Err(invalid("fs", format!("must be >= 1 Hz, got {}", self.sample_rate_hz)));
        }
        Ok(())
    }

    pub fn layout(&self) -> OutputLayout {
        OutputLayout::new(&self.output_dir)
    }
}

/// Inclusive linear range of noise levels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepRange {
    pub start: f64,
    pub end: f64,
    pub steps: usize,
}

impl SweepRange {
    /// Build a range from the raw `START END STEPS` triple
    ///
    /// `steps` is truncated toward zero and must end up at least 1.
    pub fn from_triple(start: f64, end: f64, steps: f64) -> Result<Self> {
        let range = Self {
            start,
            end,
            steps: if steps.is_finite() && steps > 0.0 {
                steps as usize
            } else {
                0
            },
        };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> Result<()> {
        if self.steps == 0 {
            return Err(invalid("sweep-noise", "STEPS must be at least 1".to_string()));
        }
        for (name, value) in [("START", self.start), ("END", self.end)] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(
                    "sweep-noise",
                    format!("{} must be a finite noise std >= 0, got {}", name, value),
                ));
            }
        }
        Ok(())
    }

    /// Evenly spaced values from `start` to `end`, both included
    ///
    /// A single step yields just `start`. The last value is exactly `end`.
    pub fn noise_levels(&self) -> Vec<f64> {
        match self.steps {
            0 => Vec::new(),
            1 => vec![self.start],
            steps => {
                let step = (self.end - self.start) / (steps - 1) as f64;
                (0..steps)
                    .map(|i| {
                        if i == steps - 1 {
                            self.end
                        } else {
                            self.start + i as f64 * step
                        }
                    })
                    .collect()
            }
        }
    }
}

/// Fixed file locations under the output directory
#[derive(Debug, Clone, PartialEq)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn report_path(&self) -> PathBuf {
        self.root.join("report.csv")
    }

    pub fn summary_path(&self) -> PathBuf {
        self.root.join("summary.json")
    }

    pub fn plots_dir(&self) -> PathBuf {
        self.root.join("plots")
    }

    pub fn waveform_plot_path(&self) -> PathBuf {
        self.plots_dir().join("waveform_example.png")
    }

    pub fn sweep_plot_path(&self) -> PathBuf {
        self.plots_dir().join("snr_vs_noise.png")
    }
}

/// Create a directory and its parents if missing
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.is_dir() {
        fs::create_dir_all(path).map_err(|e| SvError::DirectoryCreateError {
            path: path.to_path_buf(),
            source: e,
        })?;
    }
    Ok(())
}

fn invalid(name: &'static str, reason: String) -> SvError {
    SvError::InvalidParameter { name, reason }
}
