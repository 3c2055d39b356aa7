//! svtool - Signal Verification Tool
//!
//! Synthesizes a test tone, adds Gaussian noise, measures it and judges the
//! result against fixed thresholds.
//!
//! # Architecture
//!
//! A linear pipeline, run once per noise level:
//! - `signal`: clean waveform generation and noise injection
//! - `metrics`: statistics, SNR and spectral peak
//! - `rules`: pass/fail verdict with ordered reasons
//! - `report` / `plot`: flat-file records and PNG charts
//!
//! `pipeline` wires the stages together for single runs and noise sweeps.

pub mod cli;
pub mod config;
pub mod error;
pub mod metrics;
pub mod pipeline;
pub mod plot;
pub mod report;
pub mod rules;
pub mod signal;

pub use error::{Result, SvError};
