//! # actuator-sweep
//!
//! Configuration-driven test harness for robotic actuators: waveform and
//! piecewise-position trajectories streamed through an external control
//! interface.
//!
//! ## Features
//!
//! - **Configuration-driven**: Define motor groups and test suites in YAML
//! - **Layered gains**: Per-test overrides merge field by field over group defaults
//! - **Deterministic resolution**: Active motors resolved and sorted before any dispatch
//! - **Waveforms**: Triangle, sine, square and piecewise-linear trajectories
//! - **embedded-hal 1.0**: Control loop paced by any `DelayNs` provider
//! - **no_std compatible**: Core library works without standard library
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use actuator_sweep::{load_config, RunnerConfig, SimulatedActuators, StdDelay, TestRunner};
//!
//! // Load motor groups and test cases from YAML
//! let suite = load_config("leg_tests.yaml")?;
//!
//! // Drive any ActuatorInterface backend at 100 Hz
//! let mut runner = TestRunner::new(SimulatedActuators::new(), StdDelay, RunnerConfig::default());
//! let report = runner.run_suite(&suite);
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables YAML loading, the simulated backend, recording, plotting and the CLI
//! - `defmt`: Enables defmt formatting for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

// Core modules
pub mod actuator;
pub mod config;
pub mod error;
pub mod motion;
pub mod record;
pub mod resolve;
pub mod runner;

// Re-exports for ergonomic API
pub use actuator::{ActuatorCommand, ActuatorInterface, ActuatorState};
pub use config::{
    validate_config, MotorGroup, MotorId, MotorParams, ParamOverride, PiecewiseTest,
    SuiteConfig, TestCase, WaveformKind, WaveformTest,
};
pub use error::{Error, Result};
pub use motion::{MotionExecutor, TrajectorySample};
pub use record::Recorder;
pub use resolve::{resolve, ResolvedMotor, ResolvedMotorConfig};
pub use runner::{ErrorPolicy, RunnerConfig, SuiteReport, TestOutcome, TestRunner};

// Host-only pieces (std only)
#[cfg(feature = "std")]
pub use actuator::SimulatedActuators;
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};
#[cfg(feature = "std")]
pub use record::{create_motor_plots, TestRecording};
#[cfg(feature = "std")]
pub use runner::StdDelay;

// Unit types
pub use config::units::{Degrees, DegreesPerSec, Hertz, Seconds};
