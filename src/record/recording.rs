//! In-memory test recording with JSON export (std only).

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::actuator::ActuatorState;
use crate::config::units::Seconds;
use crate::config::MotorId;
use crate::error::{message, ConfigError, Error, Result};
use crate::motion::TrajectorySample;
use crate::resolve::ResolvedMotorConfig;

use super::Recorder;

/// Commanded and measured series for one motor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MotorRecording {
    /// Motor ID.
    pub motor_id: MotorId,
    /// `<group>_<index>` label, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Commanded positions, one per tick.
    pub commanded_positions: Vec<f32>,
    /// Measured positions, one per tick.
    pub actual_positions: Vec<f32>,
    /// Commanded velocities; `None` when the test sends none.
    pub commanded_velocities: Option<Vec<f32>>,
    /// Measured velocities, one per tick.
    pub actual_velocities: Vec<f32>,
}

/// Everything observed during one test case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestRecording {
    /// Elapsed time of every tick.
    pub time_points: Vec<f32>,
    /// Whether commands carried a velocity.
    pub send_velocity: bool,
    /// Per-motor series keyed by motor ID.
    pub motors: BTreeMap<MotorId, MotorRecording>,
}

impl TestRecording {
    /// Create an empty recording.
    pub fn new(send_velocity: bool) -> Self {
        Self {
            send_velocity,
            ..Self::default()
        }
    }

    /// Append a tick time.
    pub fn add_time_point(&mut self, t: f32) {
        self.time_points.push(t);
    }

    fn motor_mut(&mut self, motor_id: MotorId) -> &mut MotorRecording {
        let send_velocity = self.send_velocity;
        self.motors.entry(motor_id).or_insert_with(|| MotorRecording {
            motor_id,
            commanded_velocities: send_velocity.then(Vec::new),
            ..MotorRecording::default()
        })
    }

    /// Append a commanded target.
    pub fn log_command(&mut self, motor_id: MotorId, position: f32, velocity: Option<f32>) {
        let motor = self.motor_mut(motor_id);
        motor.commanded_positions.push(position);
        if let (Some(v), Some(series)) = (velocity, motor.commanded_velocities.as_mut()) {
            series.push(v);
        }
    }

    /// Append a measured state.
    pub fn log_state(&mut self, motor_id: MotorId, position: f32, velocity: f32) {
        let motor = self.motor_mut(motor_id);
        motor.actual_positions.push(position);
        motor.actual_velocities.push(velocity);
    }

    /// Describe every series whose length differs from the number of ticks.
    pub fn validate(&self) -> Vec<String> {
        let expected = self.time_points.len();
        let mut errors = Vec::new();

        for (motor_id, motor) in &self.motors {
            let mut check = |what: &str, len: usize| {
                if len != expected {
                    errors.push(format!(
                        "Motor {}: {} length mismatch ({} != {})",
                        motor_id, what, len, expected
                    ));
                }
            };
            check("commanded positions", motor.commanded_positions.len());
            check("actual positions", motor.actual_positions.len());
            if let Some(ref v) = motor.commanded_velocities {
                check("commanded velocities", v.len());
            }
            check("actual velocities", motor.actual_velocities.len());
        }

        errors
    }

    /// Write the recording as pretty JSON, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::IoError` on any filesystem or encoding failure.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| io_error(path, &e))?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| io_error(path, &e))?;
        fs::write(path, json).map_err(|e| io_error(path, &e))?;
        tracing::info!(path = %path.display(), ticks = self.time_points.len(), "saved recording");
        Ok(())
    }

    /// Read a recording written by [`save`](Self::save).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::IoError` if the file is missing, and
    /// `ConfigError::ParseError` if it is not a recording.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| io_error(path, &e))?;
        serde_json::from_str(&content)
            .map_err(|e| Error::Config(ConfigError::ParseError(message(&e.to_string()))))
    }
}

pub(super) fn io_error(path: &Path, e: &dyn std::fmt::Display) -> Error {
    let msg = format!("{}: {}", path.display(), e);
    Error::Config(ConfigError::IoError(message(&msg)))
}

impl Recorder for TestRecording {
    fn begin(&mut self, resolved: &ResolvedMotorConfig, send_velocity: bool) {
        self.send_velocity = send_velocity;
        for motor in resolved {
            let label = motor.label();
            self.motor_mut(motor.motor_id).label = Some(label.as_str().to_owned());
        }
    }

    fn time_point(&mut self, t: Seconds) {
        self.add_time_point(t.0);
    }

    fn command(&mut self, motor_id: MotorId, target: &TrajectorySample) {
        self.log_command(motor_id, target.position.0, target.velocity.map(|v| v.0));
    }

    fn state(&mut self, state: &ActuatorState) {
        self.log_state(state.motor_id, state.position.0, state.velocity.0);
    }
}
