//! Motion module for actuator-sweep.
//!
//! Provides trajectory evaluation for every test kind and fixed-rate tick
//! scheduling.

mod executor;
mod piecewise;
mod waveform;

pub use executor::{MotionExecutor, DEFAULT_PERIOD};
pub use waveform::{sample, TrajectorySample};
