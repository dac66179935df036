//! Example: Dry run of a YAML suite against the simulated backend.
//!
//! This example demonstrates how to:
//! - Parse a suite of motor groups and test cases from YAML
//! - Resolve the active motors and gains of every test case
//! - Run the suite without sleeping and record each test in memory
//!
//! Run with: `cargo run --example dry_run`

use actuator_sweep::{
    parse_config, resolve, Result, RunnerConfig, SimulatedActuators, TestRecording, TestRunner,
};

/// Delay that returns immediately, so the whole suite runs in milliseconds.
struct NoDelay;

impl embedded_hal::delay::DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

fn main() -> Result<()> {
    println!("=== Dry Run Example ===\n");

    let suite = parse_config(include_str!("leg_suite.yaml"))?;

    println!("Motor Groups:");
    for (name, group) in &suite.motor_groups {
        let p = group.default_params;
        println!(
            "  - {}: {:?} (kp {}, kd {}, max torque {})",
            name,
            group.motor_ids.as_slice(),
            p.kp,
            p.kd,
            p.max_torque
        );
    }
    println!();

    println!("Resolved Test Cases:");
    for case in &suite.tests {
        let resolved = resolve(&suite.motor_groups, case)?;
        println!(
            "  {} ({}, {:.1}s, velocity: {})",
            case.name(),
            case.kind_str(),
            case.duration().0,
            case.send_velocity()
        );
        for motor in &resolved {
            println!(
                "    {:>3} {:<10} kp={:<5} kd={:<5} max_torque={}",
                motor.motor_id,
                motor.label(),
                motor.params.kp,
                motor.params.kd,
                motor.params.max_torque
            );
        }
    }
    println!();

    let mut runner = TestRunner::new(SimulatedActuators::new(), NoDelay, RunnerConfig::default());

    let mut recordings = Vec::new();
    let report = runner.run_suite_with(
        &suite,
        |case| TestRecording::new(case.send_velocity()),
        |case, recording, _| recordings.push((case.name().to_owned(), recording)),
    );

    println!("Results:");
    for test in report.reports() {
        match &test.result {
            Ok(outcome) => println!(
                "  {}: {} motors, {} ticks",
                test.name, outcome.motors, outcome.ticks
            ),
            Err(e) => println!("  {}: FAILED ({})", test.name, e),
        }
    }
    println!();

    for (name, recording) in &recordings {
        let problems = recording.validate();
        println!(
            "  {}: {} time points, {} motors, {}",
            name,
            recording.time_points.len(),
            recording.motors.len(),
            if problems.is_empty() { "consistent" } else { "INCONSISTENT" }
        );
    }

    println!(
        "\nBackend received {} calls; torque still enabled on {} motors",
        runner.actuators().calls().len(),
        runner.actuators().enabled_motors().len()
    );

    println!("\n=== Example Complete ===");

    Ok(())
}
