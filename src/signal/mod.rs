//! Test signal synthesis
//!
//! Clean reference waveforms and additive Gaussian noise.

mod generator;
mod noise;

pub use generator::{generate, SignalMode, Waveform};
pub use noise::{add_noise, inject, NoisyWaveform};
