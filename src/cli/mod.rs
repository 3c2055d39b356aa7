//! CLI Module
//!
//! Command-line interface for the signal verification tool.

pub mod commands;

use clap::Parser;
use std::path::PathBuf;

use crate::config::{RunConfig, SweepRange, DEFAULT_OUTPUT_DIR};
use crate::error::Result;

/// Signal Verification Tool - synthesize, add noise, measure and judge a test tone
#[derive(Parser, Debug)]
#[command(name = "svtool")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Signal mode (sine/square)
    #[arg(long, default_value = "sine")]
    pub mode: String,

    /// Signal frequency (Hz)
    #[arg(long, default_value_t = 50.0)]
    pub freq: f64,

    /// Noise standard deviation
    #[arg(long, default_value_t = 0.1)]
    pub noise: f64,

    /// Random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Duration (s)
    #[arg(long, default_value_t = 1.0)]
    pub duration: f64,

    /// Sample rate (Hz)
    #[arg(long, default_value_t = 10_000.0)]
    pub fs: f64,

    /// Sweep noise std from START to END with STEPS points
    #[arg(
        long = "sweep-noise",
        num_args = 3,
        value_names = ["START", "END", "STEPS"],
        allow_negative_numbers = true
    )]
    pub sweep_noise: Option<Vec<f64>>,

    /// Directory for report.csv, summary.json and plots/
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Run parameters described by the flags
    pub fn run_config(&self) -> RunConfig {
        RunConfig {
            mode: self.mode.clone(),
            freq_hz: self.freq,
            noise_std: self.noise,
            seed: self.seed,
            duration_s: self.duration,
            sample_rate_hz: self.fs,
            output_dir: self.output_dir.clone(),
        }
    }

    /// Sweep range, when `--sweep-noise` was given
    pub fn sweep_range(&self) -> Result<Option<SweepRange>> {
        match self.sweep_noise.as_deref() {
            Some(&[start, end, steps]) => SweepRange::from_triple(start, end, steps).map(Some),
            // clap enforces exactly three values
            Some(_) | None => Ok(None),
        }
    }
}
