//! Per-tick recording hooks.
//!
//! The runner reports every time point, command and measured state to a
//! [`Recorder`]. `()` discards everything; with `std`, [`TestRecording`]
//! keeps it in memory, exports JSON and draws per-motor PNG plots.

#[cfg(feature = "std")]
mod plot;
#[cfg(feature = "std")]
mod recording;

#[cfg(feature = "std")]
pub use plot::create_motor_plots;
#[cfg(feature = "std")]
pub use recording::{MotorRecording, TestRecording};

use crate::actuator::ActuatorState;
use crate::config::units::Seconds;
use crate::config::MotorId;
use crate::motion::TrajectorySample;
use crate::resolve::ResolvedMotorConfig;

/// Observer of one test case's command stream.
pub trait Recorder {
    /// Called once before the first tick.
    fn begin(&mut self, resolved: &ResolvedMotorConfig, send_velocity: bool) {
        let _ = (resolved, send_velocity);
    }

    /// Called at the start of every tick.
    fn time_point(&mut self, t: Seconds) {
        let _ = t;
    }

    /// Called for every motor commanded in the current tick.
    fn command(&mut self, motor_id: MotorId, target: &TrajectorySample) {
        let _ = (motor_id, target);
    }

    /// Called for every state reported by the backend in the current tick.
    fn state(&mut self, state: &ActuatorState) {
        let _ = state;
    }
}

impl Recorder for () {}

impl<R: Recorder + ?Sized> Recorder for &mut R {
    fn begin(&mut self, resolved: &ResolvedMotorConfig, send_velocity: bool) {
        R::begin(self, resolved, send_velocity)
    }

    fn time_point(&mut self, t: Seconds) {
        R::time_point(self, t)
    }

    fn command(&mut self, motor_id: MotorId, target: &TrajectorySample) {
        R::command(self, motor_id, target)
    }

    fn state(&mut self, state: &ActuatorState) {
        R::state(self, state)
    }
}
