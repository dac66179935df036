//! CLI entry point for actuator-sweep.
//!
//! Loads a YAML suite, runs every test case at a fixed control rate and exits
//! non-zero if any test case failed or its recording or plots could not be
//! written.
//!
//! # Usage
//!
//! ```bash
//! actuator-sweep --config leg_tests.yaml --record-dir data --plot-dir plots
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use actuator_sweep::{
    create_motor_plots, load_config, ErrorPolicy, RunnerConfig, Seconds, SimulatedActuators, StdDelay, TestCase,
    TestRecording, TestRunner,
};
use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "actuator-sweep")]
#[command(about = "Run waveform and piecewise actuator tests from a YAML suite", long_about = None)]
struct Cli {
    /// Path to the test suite YAML file
    #[arg(long)]
    config: PathBuf,

    /// Control period in milliseconds
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    period_ms: u32,

    /// Stop the suite at the first failed test case
    #[arg(long)]
    abort_on_error: bool,

    /// Write one JSON recording per completed test into this directory
    #[arg(long)]
    record_dir: Option<PathBuf>,

    /// Write one PNG response plot per motor and completed test into this directory
    #[arg(long)]
    plot_dir: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .init();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Returns whether every test case completed.
fn run(cli: &Cli) -> Result<bool> {
    let suite = load_config(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;

    info!(
        config = %cli.config.display(),
        groups = suite.motor_groups.len(),
        tests = suite.tests.len(),
        "loaded suite"
    );

    let runner_config = RunnerConfig {
        period: Seconds::from_millis(cli.period_ms),
        error_policy: if cli.abort_on_error {
            ErrorPolicy::AbortSuite
        } else {
            ErrorPolicy::ContinueOnError
        },
        ..RunnerConfig::default()
    };

    let mut runner = TestRunner::new(
        SimulatedActuators::without_call_log(),
        StdDelay,
        runner_config,
    );

    let record_dir = cli.record_dir.as_deref();
    let plot_dir = cli.plot_dir.as_deref();
    let mut output_failures = 0usize;
    let report = runner.run_suite_with(
        &suite,
        |case| TestRecording::new(case.send_velocity()),
        |case, recording, result| {
            if result.is_err() {
                return;
            }
            if let Err(e) = write_outputs(record_dir, plot_dir, case, &recording) {
                error!(test = case.name(), error = %e, "could not write test output");
                output_failures += 1;
            }
        },
    );

    for failure in report.failures() {
        warn!(test = failure.name.as_str(), "not completed");
    }
    info!(
        completed = report.completed(),
        failed = report.failures().count(),
        skipped = report.skipped(),
        output_failures,
        "suite finished"
    );

    Ok(report.all_passed() && output_failures == 0)
}

/// Save the JSON recording and plots of one completed test case.
fn write_outputs(
    record_dir: Option<&Path>,
    plot_dir: Option<&Path>,
    case: &TestCase,
    recording: &TestRecording,
) -> actuator_sweep::Result<()> {
    let stem = format!("{}_vel_{}", case.name(), case.send_velocity());

    if let Some(dir) = record_dir {
        for problem in recording.validate() {
            warn!(test = case.name(), "{}", problem);
        }
        recording.save(dir.join(format!("{}.json", stem)))?;
    }
    if let Some(dir) = plot_dir {
        create_motor_plots(recording, &stem, dir)?;
    }
    Ok(())
}
