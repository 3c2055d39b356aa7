//! Integration Tests
//!
//! End-to-end tests for the signal verification pipeline.

use std::fs;
use std::path::Path;

use approx::assert_relative_eq;
use serde_json::Value;
use tempfile::tempdir;

use svtool::config::{RunConfig, SweepRange};
use svtool::metrics::MetricSet;
use svtool::pipeline::{evaluate_point, run_single, run_sweep};
use svtool::report::{read_report, COLUMNS};
use svtool::rules::{evaluate, Status};
use svtool::signal::{add_noise, generate, inject, SignalMode};
use svtool::SvError;

/// Helper to build a config writing into `dir`
fn config_in(dir: &Path, noise_std: f64) -> RunConfig {
    RunConfig {
        mode: "sine".to_string(),
        freq_hz: 50.0,
        noise_std,
        seed: Some(42),
        duration_s: 1.0,
        sample_rate_hz: 10_000.0,
        output_dir: dir.to_path_buf(),
    }
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

// === Stage Composition Tests ===

#[test]
fn test_stages_compose_without_pipeline() {
    let clean = generate(SignalMode::Sine, 50.0, 1.0, 10_000).unwrap();
    let wave = inject(&clean, 0.0, Some(42)).unwrap();
    let metrics = MetricSet::compute(&wave).unwrap();
    let verdict = evaluate(&metrics, 50.0);

    assert_eq!(wave.noisy, clean.samples);
    assert!(metrics.snr_db.is_infinite() && metrics.snr_db > 0.0);
    assert_relative_eq!(metrics.fft_peak_hz, 50.0, epsilon = 1.0);
    assert_eq!(verdict.status, Status::Pass);
    assert!(verdict.reasons.is_empty());
}

#[test]
fn test_seeded_runs_are_identical() {
    let clean = generate(SignalMode::Square, 25.0, 0.5, 8_000).unwrap();
    let (a, _) = add_noise(&clean.samples, 0.4, Some(7)).unwrap();
    let (b, _) = add_noise(&clean.samples, 0.4, Some(7)).unwrap();
    assert_eq!(a, b);
}

// === Single Run Tests ===

#[test]
fn test_clean_sine_passes() {
    let dir = tempdir().unwrap();
    let outcome = run_single(&config_in(dir.path(), 0.0)).unwrap();

    let metrics = &outcome.point.metrics;
    assert_relative_eq!(metrics.fft_peak_hz, 50.0, epsilon = 1.0);
    assert!(metrics.snr_db.is_infinite() && metrics.snr_db > 0.0);
    assert_eq!(outcome.point.verdict.status, Status::Pass);
    assert!(outcome.point.verdict.reasons.is_empty());

    assert!(outcome.plot_path.exists());
    assert!(outcome.report_path.exists());

    let summary = read_json(&outcome.summary_path);
    assert_eq!(summary["status"], "PASS");
    assert!(summary["snr_db"].is_null());
    assert_eq!(summary["fft_peak_hz"], 50.0);
    assert_eq!(summary["reasons"].as_array().unwrap().len(), 0);
}

#[test]
fn test_heavy_noise_fails_on_snr() {
    let dir = tempdir().unwrap();
    let outcome = run_single(&config_in(dir.path(), 5.0)).unwrap();

    let metrics = &outcome.point.metrics;
    assert!(metrics.snr_db < 10.0, "snr = {}", metrics.snr_db);

    let verdict = &outcome.point.verdict;
    assert_eq!(verdict.status, Status::Fail);
    assert!(verdict.reasons[0].starts_with("SNR too low"));

    let summary = read_json(&outcome.summary_path);
    assert_eq!(summary["status"], "FAIL");
    assert_eq!(summary["reasons"][0], verdict.reasons[0].as_str());
}

#[test]
fn test_single_run_row_round_trip() {
    let dir = tempdir().unwrap();
    let outcome = run_single(&config_in(dir.path(), 0.3)).unwrap();

    let rows = read_report(&outcome.report_path).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0], outcome.row);
    assert_eq!(rows[0].run_id, outcome.run_id);
    assert!(rows[0].run_id.ends_with("_single"));
    assert_eq!(rows[0].plot.as_deref(), Some(outcome.plot_path.as_path()));
    assert_eq!(rows[0].seed, Some(42));
}

#[test]
fn test_report_header_written_once_across_runs() {
    let dir = tempdir().unwrap();
    let config = config_in(dir.path(), 0.1);
    run_single(&config).unwrap();
    let outcome = run_single(&config).unwrap();

    let text = fs::read_to_string(&outcome.report_path).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next().unwrap(), COLUMNS.join(","));
    assert_eq!(lines.count(), 2);
    assert_eq!(read_report(&outcome.report_path).unwrap().len(), 2);
}

#[test]
fn test_unseeded_row_has_empty_seed() {
    let dir = tempdir().unwrap();
    let config = RunConfig {
        seed: None,
        ..config_in(dir.path(), 0.1)
    };
    let outcome = run_single(&config).unwrap();

    let text = fs::read_to_string(&outcome.report_path).unwrap();
    let data_line = text.lines().nth(1).unwrap();
    assert!(data_line.contains(",0.1,,"), "{}", data_line);
    assert_eq!(read_report(&outcome.report_path).unwrap()[0].seed, None);
}

#[test]
fn test_unsupported_mode_writes_nothing() {
    let dir = tempdir().unwrap();
    let config = RunConfig {
        mode: "triangle".to_string(),
        ..config_in(dir.path(), 0.1)
    };

    let err = run_single(&config).unwrap_err();
    assert!(matches!(err, SvError::UnsupportedMode { ref mode } if mode == "triangle"));
    assert!(!dir.path().join("report.csv").exists());
    assert!(!dir.path().join("summary.json").exists());
}

#[test]
fn test_unsupported_mode_reported_before_bad_parameters() {
    let dir = tempdir().unwrap();
    let config = RunConfig {
        mode: "triangle".to_string(),
        freq_hz: 0.0,
        ..config_in(dir.path(), 0.1)
    };

    let err = run_single(&config).unwrap_err();
    assert!(matches!(err, SvError::UnsupportedMode { .. }));
    let err = run_sweep(&config, &SweepRange::from_triple(0.0, 1.0, 5.0).unwrap()).unwrap_err();
    assert!(matches!(err, SvError::UnsupportedMode { .. }));
}

#[test]
fn test_square_wave_peak_at_fundamental() {
    let dir = tempdir().unwrap();
    let config = RunConfig {
        mode: "square".to_string(),
        ..config_in(dir.path(), 0.0)
    };
    let outcome = run_single(&config).unwrap();
    assert_relative_eq!(outcome.point.metrics.fft_peak_hz, 50.0, epsilon = 1.0);
    assert_eq!(outcome.point.wave.clean.samples[0], 0.0);
}

// === Sweep Tests ===

#[test]
fn test_sweep_five_points_share_run_id() {
    let dir = tempdir().unwrap();
    let config = config_in(dir.path(), 0.1);
    let range = SweepRange::from_triple(0.0, 1.0, 5.0).unwrap();

    let outcome = run_sweep(&config, &range).unwrap();

    let noise: Vec<f64> = outcome.rows.iter().map(|r| r.noise_std).collect();
    assert_eq!(noise, vec![0.0, 0.25, 0.5, 0.75, 1.0]);

    let rows = read_report(&outcome.report_path).unwrap();
    assert_eq!(rows.len(), 5);
    assert!(rows.iter().all(|r| r.run_id == outcome.run_id));
    assert!(outcome.run_id.ends_with("_sweep"));
    assert!(rows.iter().all(|r| r.plot.is_none()));

    // SNR falls as noise grows
    assert!(rows[0].snr_db.is_infinite());
    assert!(rows.windows(2).skip(1).all(|w| w[1].snr_db < w[0].snr_db));

    assert!(outcome.plot_path.exists());
    let summary = read_json(&outcome.summary_path);
    assert_eq!(summary["mode"], "sweep");
    assert_eq!(summary["points"], 5);
    assert!(summary["best_snr_db"].is_null());
    assert_relative_eq!(
        summary["worst_snr_db"].as_f64().unwrap(),
        rows[4].snr_db,
        epsilon = 1e-12
    );
    assert_eq!(
        summary["sweep_plot"],
        outcome.plot_path.display().to_string().as_str()
    );
}

#[test]
fn test_sweep_points_match_single_evaluation() {
    let dir = tempdir().unwrap();
    let config = config_in(dir.path(), 0.0);
    let range = SweepRange::from_triple(0.2, 0.6, 3.0).unwrap();

    let outcome = run_sweep(&config, &range).unwrap();
    for row in &outcome.rows {
        let point = evaluate_point(SignalMode::Sine, &config, row.noise_std).unwrap();
        assert_eq!(point.metrics.snr_db, row.snr_db);
        assert_eq!(point.verdict.status, row.status);
    }
}

#[test]
fn test_sweep_appends_after_single_run() {
    let dir = tempdir().unwrap();
    let config = config_in(dir.path(), 0.1);
    let single = run_single(&config).unwrap();
    let sweep = run_sweep(&config, &SweepRange::from_triple(0.0, 0.5, 2.0).unwrap()).unwrap();

    let rows = read_report(&sweep.report_path).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].run_id, single.run_id);
    assert_eq!(rows[1].run_id, sweep.run_id);

    // Summary now describes the sweep
    let summary = read_json(&sweep.summary_path);
    assert_eq!(summary["mode"], "sweep");
    assert!(summary.get("status").is_none());
}

#[test]
fn test_sweep_ignores_single_run_noise() {
    let dir = tempdir().unwrap();
    let config = config_in(dir.path(), -1.0);
    assert!(run_single(&config).is_err());

    let outcome = run_sweep(&config, &SweepRange::from_triple(0.0, 1.0, 5.0).unwrap()).unwrap();
    assert_eq!(outcome.rows.len(), 5);
}

#[test]
fn test_sweep_plot_failure_leaves_outputs_untouched() {
    let dir = tempdir().unwrap();
    let config = config_in(dir.path(), 0.1);
    let single = run_single(&config).unwrap();
    let report_before = fs::read_to_string(&single.report_path).unwrap();
    let summary_before = fs::read_to_string(&single.summary_path).unwrap();

    // A regular file where the plots directory should be
    let plots = dir.path().join("plots");
    fs::remove_dir_all(&plots).unwrap();
    fs::write(&plots, "not a directory").unwrap();

    let err = run_sweep(&config, &SweepRange::from_triple(0.0, 1.0, 5.0).unwrap()).unwrap_err();
    assert!(matches!(err, SvError::DirectoryCreateError { ref path, .. } if path == &plots));

    assert_eq!(fs::read_to_string(&single.report_path).unwrap(), report_before);
    assert_eq!(fs::read_to_string(&single.summary_path).unwrap(), summary_before);
}
