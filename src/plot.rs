//! PNG plot rendering
//!
//! Two fixed charts: a time-domain overlay of the clean and noisy waveform,
//! and SNR against noise level for a sweep.
//!
//! Text is rendered with an embedded DejaVu Sans face, registered as
//! `sans-serif` before the first chart is drawn.

use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use log::debug;
use plotters::prelude::*;
use plotters::style::register_font;

use crate::config::ensure_dir;
use crate::error::{Result, SvError};

const WAVEFORM_SIZE: (u32, u32) = (1000, 400);
const SWEEP_SIZE: (u32, u32) = (800, 400);

const FONT_FAMILY: &str = "sans-serif";
static FONT_DATA: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");
static FONT_REGISTERED: OnceLock<std::result::Result<(), String>> = OnceLock::new();

/// Overlay the clean and noisy signal over time
///
/// `time`, `clean` and `noisy` must have equal length.
pub fn plot_waveform(path: &Path, time: &[f64], clean: &[f64], noisy: &[f64]) -> Result<PathBuf> {
    if time.len() != clean.len() || time.len() != noisy.len() {
        return Err(SvError::LengthMismatch {
            clean: clean.len(),
            noisy: noisy.len(),
        });
    }
    prepare_parent(path)?;
    register_font_once(path)?;

    let x_range = padded_range(time.iter().copied(), 0.0);
    let y_range = padded_range(clean.iter().chain(noisy.iter()).copied(), 0.05);

    let root = BitMapBackend::new(path, WAVEFORM_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error(path))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Signal Verification - Time Domain", (FONT_FAMILY, 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_range, y_range)
        .map_err(plot_error(path))?;

    chart
        .configure_mesh()
        .x_desc("Time (s)")
        .y_desc("Amplitude")
        .draw()
        .map_err(plot_error(path))?;

    chart
        .draw_series(LineSeries::new(
            time.iter().copied().zip(clean.iter().copied()),
            &BLUE,
        ))
        .map_err(plot_error(path))?
        .label("Clean Signal")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));

    let noisy_style = RED.mix(0.7);
    chart
        .draw_series(LineSeries::new(
            time.iter().copied().zip(noisy.iter().copied()),
            &noisy_style,
        ))
        .map_err(plot_error(path))?
        .label("Noisy Signal")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &noisy_style));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(plot_error(path))?;

    root.present().map_err(plot_error(path))?;
    debug!("Waveform plot written to {}", path.display());

    Ok(path.to_path_buf())
}

/// Plot SNR against noise standard deviation
///
/// `points` are `(noise_std, snr_db)` pairs in sweep order. Points with a
/// non-finite SNR cannot be placed on the axis and are left out.
pub fn plot_snr_sweep(path: &Path, points: &[(f64, f64)]) -> Result<PathBuf> {
    prepare_parent(path)?;
    register_font_once(path)?;

    let finite: Vec<(f64, f64)> = points
        .iter()
        .copied()
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect();

    let x_range = padded_range(points.iter().map(|(x, _)| *x), 0.05);
    let y_range = padded_range(finite.iter().map(|(_, y)| *y), 0.1);

    let root = BitMapBackend::new(path, SWEEP_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error(path))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("SNR vs Noise Sweep", (FONT_FAMILY, 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_range, y_range)
        .map_err(plot_error(path))?;

    chart
        .configure_mesh()
        .x_desc("Noise STD")
        .y_desc("SNR (dB)")
        .draw()
        .map_err(plot_error(path))?;

    chart
        .draw_series(LineSeries::new(finite.iter().copied(), &BLUE))
        .map_err(plot_error(path))?;
    chart
        .draw_series(finite.iter().map(|&(x, y)| Circle::new((x, y), 4, BLUE.filled())))
        .map_err(plot_error(path))?;

    root.present().map_err(plot_error(path))?;
    debug!(
        "Sweep plot written to {} ({} of {} points drawn)",
        path.display(),
        finite.len(),
        points.len()
    );

    Ok(path.to_path_buf())
}

fn prepare_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_dir(parent),
        _ => Ok(()),
    }
}

/// Make the embedded face available to plotters, once per process
fn register_font_once(path: &Path) -> Result<()> {
    FONT_REGISTERED
        .get_or_init(|| {
            register_font(FONT_FAMILY, FontStyle::Normal, FONT_DATA)
                .map_err(|_| "embedded font data could not be parsed".to_string())
        })
        .clone()
        .map_err(|reason| SvError::Plot {
            path: path.to_path_buf(),
            reason,
        })
}

fn plot_error<E: Display>(path: &Path) -> impl Fn(E) -> SvError + '_ {
    move |e| SvError::Plot {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}

/// Axis range covering all finite values, widened by `pad` of its span
///
/// Degenerate inputs (empty, or a single value) get a unit-wide range so the
/// chart can still be built.
fn padded_range(values: impl Iterator<Item = f64>, pad: f64) -> std::ops::Range<f64> {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));

    if !min.is_finite() {
        return -1.0..1.0;
    }
    if max - min <= f64::EPSILON {
        return (min - 0.5)..(max + 0.5);
    }
    let margin = (max - min) * pad;
    (min - margin)..(max + margin)
}
