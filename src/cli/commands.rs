//! CLI Command Implementations
//!
//! Runs the pipeline for the parsed flags and prints the outcome.

use log::info;

use crate::cli::Cli;
use crate::error::Result;
use crate::pipeline::{run_single, run_sweep, SingleRunOutcome, SweepOutcome};

/// Dispatch to a sweep when `--sweep-noise` is present, otherwise a single run.
pub fn run(cli: &Cli) -> Result<()> {
    let config = cli.run_config();

    match cli.sweep_range()? {
        Some(range) => {
            info!("Output directory: {}", config.output_dir.display());
            let outcome = run_sweep(&config, &range)?;
            print_sweep(&outcome);
        }
        None => {
            println!("Running Signal Verification Tool...");
            let outcome = run_single(&config)?;
            print_single(&outcome);
        }
    }

    Ok(())
}

fn print_single(outcome: &SingleRunOutcome) {
    let verdict = &outcome.point.verdict;

    println!("Status: {}", verdict.status);
    if !verdict.reasons.is_empty() {
        println!("Reasons:");
        for reason in &verdict.reasons {
            println!("  - {}", reason);
        }
    }

    println!("Saved plot: {}", outcome.plot_path.display());
    println!("Updated report: {}", outcome.report_path.display());
    println!("Updated summary: {}", outcome.summary_path.display());
    println!("Done.");
}

fn print_sweep(outcome: &SweepOutcome) {
    println!("{:-<60}", "");
    println!("{:>10}  {:>10}  {:>6}", "noise_std", "snr_db", "status");
    for row in &outcome.rows {
        println!("{:>10.4}  {:>10.2}  {:>6}", row.noise_std, row.snr_db, row.status.as_str());
    }
    println!("{:-<60}", "");
    println!(
        "Best SNR: {:.2} dB | Worst SNR: {:.2} dB",
        outcome.summary.best_snr_db, outcome.summary.worst_snr_db
    );
    println!("Sweep complete. Plot saved to: {}", outcome.plot_path.display());
}
