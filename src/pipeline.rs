//! Run orchestration
//!
//! A single run evaluates one noise level and records it with a waveform
//! plot. A sweep evaluates each noise level of a range in order, records one
//! row per level under a shared run id, then plots SNR against noise.

use std::path::PathBuf;

use chrono::{Local, NaiveDateTime, SubsecRound};
use log::{debug, info};

use crate::config::{RunConfig, SweepRange};
use crate::error::Result;
use crate::metrics::MetricSet;
use crate::plot::{plot_snr_sweep, plot_waveform};
use crate::report::{
    write_report_row, write_report_rows, write_summary, ReportRow, RowContext, SingleSummary,
    Summary, SweepSummary, TIMESTAMP_FORMAT,
};
use crate::rules::{evaluate, Status, Verdict};
use crate::signal::{generate, inject, NoisyWaveform, SignalMode};

/// Kind of invocation, recorded as the run id suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunKind {
    Single,
    Sweep,
}

impl RunKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunKind::Single => "single",
            RunKind::Sweep => "sweep",
        }
    }
}

/// Run identifier, `<YYYY-MM-DD_HHMMSS>_<kind>`
pub fn run_id(started: NaiveDateTime, kind: RunKind) -> String {
    format!("{}_{}", started.format("%Y-%m-%d_%H%M%S"), kind.as_str())
}

/// Local wall-clock time at one-second resolution
fn now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}

/// Generated, measured and judged signal at one noise level
#[derive(Debug, Clone)]
pub struct PointResult {
    pub noise_std: f64,
    pub wave: NoisyWaveform,
    pub metrics: MetricSet,
    pub verdict: Verdict,
}

/// Generate, add noise, measure and judge at one noise level
///
/// The expected frequency for the verdict is the configured tone frequency.
pub fn evaluate_point(mode: SignalMode, config: &RunConfig, noise_std: f64) -> Result<PointResult> {
    let clean = generate(mode, config.freq_hz, config.duration_s, config.sample_rate())?;
    let wave = inject(&clean, noise_std, config.seed)?;
    let metrics = MetricSet::compute(&wave)?;
    let verdict = evaluate(&metrics, config.freq_hz);

    debug!(
        "noise_std={} -> {} [{}]",
        noise_std,
        metrics.summary(),
        verdict.status
    );

    Ok(PointResult {
        noise_std,
        wave,
        metrics,
        verdict,
    })
}

/// Everything a single run produced
#[derive(Debug, Clone)]
pub struct SingleRunOutcome {
    pub run_id: String,
    pub point: PointResult,
    pub row: ReportRow,
    pub plot_path: PathBuf,
    pub report_path: PathBuf,
    pub summary_path: PathBuf,
}

/// Evaluate the configured noise level and record it
pub fn run_single(config: &RunConfig) -> Result<SingleRunOutcome> {
    let mode: SignalMode = config.mode.parse()?;
    config.validate()?;
    let layout = config.layout();

    let started = now();
    let run_id = run_id(started, RunKind::Single);
    info!(
        "Run {}: {} {} Hz, noise_std={}, fs={} Hz, duration={} s",
        run_id,
        mode,
        config.freq_hz,
        config.noise_std,
        config.sample_rate(),
        config.duration_s
    );

    let point = evaluate_point(mode, config, config.noise_std)?;

    let plot_path = plot_waveform(
        &layout.waveform_plot_path(),
        &point.wave.clean.time,
        &point.wave.clean.samples,
        &point.wave.noisy,
    )?;

    let row = ReportRow::new(
        RowContext {
            run_id: &run_id,
            timestamp: now(),
            mode,
            freq_hz: config.freq_hz,
            noise_std: config.noise_std,
            seed: config.seed,
        },
        &point.metrics,
        &point.verdict,
        Some(plot_path.clone()),
    );
    let report_path = write_report_row(&layout.report_path(), &row)?;

    let summary = Summary::Single(SingleSummary {
        last_run: row.timestamp.format(TIMESTAMP_FORMAT).to_string(),
        status: point.verdict.status,
        snr_db: point.metrics.snr_db,
        fft_peak_hz: point.metrics.fft_peak_hz,
        reasons: point.verdict.reasons.clone(),
    });
    let summary_path = write_summary(&layout.summary_path(), &summary)?;

    info!("Run {} finished: {}", run_id, point.verdict.status);

    Ok(SingleRunOutcome {
        run_id,
        point,
        row,
        plot_path,
        report_path,
        summary_path,
    })
}

/// Everything a sweep produced
#[derive(Debug, Clone)]
pub struct SweepOutcome {
    pub run_id: String,
    pub rows: Vec<ReportRow>,
    pub summary: SweepSummary,
    pub plot_path: PathBuf,
    pub report_path: PathBuf,
    pub summary_path: PathBuf,
}

/// Evaluate every noise level of `range` in order and record the sweep
///
/// All rows are appended in one write after the plot is rendered; a failure
/// while evaluating or plotting leaves the report and summary untouched.
///
/// Each point re-seeds from the configured seed, so with a seed the noise
/// shape is the same at every level and only its scale changes.
pub fn run_sweep(config: &RunConfig, range: &SweepRange) -> Result<SweepOutcome> {
    let mode: SignalMode = config.mode.parse()?;
    config.validate_signal()?;
    range.validate()?;
    let layout = config.layout();

    let started = now();
    let run_id = run_id(started, RunKind::Sweep);
    let levels = range.noise_levels();
    info!(
        "Run {}: sweeping noise_std {}..={} over {} points ({} {} Hz)",
        run_id,
        range.start,
        range.end,
        levels.len(),
        mode,
        config.freq_hz
    );

    let mut rows = Vec::with_capacity(levels.len());
    for noise_std in levels {
        let point = evaluate_point(mode, config, noise_std)?;
        let row = ReportRow::new(
            RowContext {
                run_id: &run_id,
                timestamp: now(),
                mode,
                freq_hz: config.freq_hz,
                noise_std,
                seed: config.seed,
            },
            &point.metrics,
            &point.verdict,
            None,
        );
        rows.push(row);
    }

    // Plot before the report is touched
    let points: Vec<(f64, f64)> = rows.iter().map(|r| (r.noise_std, r.snr_db)).collect();
    let plot_path = plot_snr_sweep(&layout.sweep_plot_path(), &points)?;
    let report_path = write_report_rows(&layout.report_path(), &rows)?;

    let snrs: Vec<f64> = rows.iter().map(|r| r.snr_db).collect();
    let summary = SweepSummary::from_snrs(
        now().format(TIMESTAMP_FORMAT).to_string(),
        &snrs,
        plot_path.clone(),
    );
    let summary_path = write_summary(&layout.summary_path(), &Summary::Sweep(summary.clone()))?;

    let failed = rows.iter().filter(|r| r.status == Status::Fail).count();
    info!(
        "Run {} finished: {} points, {} failed",
        run_id,
        rows.len(),
        failed
    );

    Ok(SweepOutcome {
        run_id,
        rows,
        summary,
        plot_path,
        report_path,
        summary_path,
    })
}
