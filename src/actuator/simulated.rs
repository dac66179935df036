//! In-process actuator backend for dry runs and tests (std only).

use std::collections::BTreeMap;
use std::fmt;

use crate::config::units::{Degrees, DegreesPerSec};
use crate::config::{MotorId, MotorParams};
use crate::error::Operation;

use super::{ActuatorCommand, ActuatorInterface, ActuatorState};

/// Simulated motor state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimMotor {
    /// Torque currently enabled.
    pub torque_enabled: bool,
    /// Last applied gains.
    pub params: Option<MotorParams>,
    /// Last commanded position, reported back as the measured position.
    pub position: Degrees,
    /// Last commanded velocity (zero when none was sent).
    pub velocity: DegreesPerSec,
}

/// One call received by the simulator.
#[derive(Debug, Clone, PartialEq)]
pub enum SimCall {
    /// `set_torque_enabled`
    SetTorque {
        /// Motor
        motor_id: MotorId,
        /// Requested state
        enabled: bool,
    },
    /// `set_motor_params`
    SetParams {
        /// Motor
        motor_id: MotorId,
        /// Applied gains
        params: MotorParams,
    },
    /// `send_commands`
    Commands(Vec<ActuatorCommand>),
}

/// Injected simulator failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimError {
    /// Operation that failed.
    pub operation: Operation,
    /// Motor the failure was injected for.
    pub motor_id: MotorId,
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "simulated {} failure on motor {}", self.operation, self.motor_id)
    }
}

impl std::error::Error for SimError {}

/// Actuator backend that echoes commanded positions as measured state.
///
/// Unknown motors are created on first use. Every call is kept in a log so
/// tests can assert on the exact dispatch sequence.
#[derive(Debug, Default)]
pub struct SimulatedActuators {
    motors: BTreeMap<MotorId, SimMotor>,
    calls: Vec<SimCall>,
    failure: Option<SimError>,
    record_calls: bool,
}

impl SimulatedActuators {
    /// Create a simulator that logs every call.
    pub fn new() -> Self {
        Self {
            record_calls: true,
            ..Self::default()
        }
    }

    /// Create a simulator that keeps motor state but no call log.
    ///
    /// Long CLI runs stream thousands of command batches.
    pub fn without_call_log() -> Self {
        Self::default()
    }

    /// Make every `operation` call touching `motor_id` fail.
    pub fn fail_on(mut self, operation: Operation, motor_id: MotorId) -> Self {
        self.failure = Some(SimError {
            operation,
            motor_id,
        });
        self
    }

    /// Current state of a motor, if it has been touched.
    pub fn motor(&self, motor_id: MotorId) -> Option<&SimMotor> {
        self.motors.get(&motor_id)
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> &[SimCall] {
        &self.calls
    }

    /// IDs of motors with torque currently enabled.
    pub fn enabled_motors(&self) -> Vec<MotorId> {
        self.motors
            .iter()
            .filter(|(_, m)| m.torque_enabled)
            .map(|(&id, _)| id)
            .collect()
    }

    fn check(&self, operation: Operation, motor_id: MotorId) -> Result<(), SimError> {
        match self.failure {
            Some(f) if f.operation == operation && f.motor_id == motor_id => Err(f),
            _ => Ok(()),
        }
    }

    fn log(&mut self, call: SimCall) {
        if self.record_calls {
            self.calls.push(call);
        }
    }
}

impl ActuatorInterface for SimulatedActuators {
    type Error = SimError;

    fn set_torque_enabled(&mut self, motor_id: MotorId, enabled: bool) -> Result<(), Self::Error> {
        self.check(Operation::SetTorque, motor_id)?;
        tracing::trace!(motor_id, enabled, "sim: set torque");
        self.motors.entry(motor_id).or_default().torque_enabled = enabled;
        self.log(SimCall::SetTorque { motor_id, enabled });
        Ok(())
    }

    fn set_motor_params(&mut self, motor_id: MotorId, params: &MotorParams) -> Result<(), Self::Error> {
        self.check(Operation::SetParams, motor_id)?;
        tracing::trace!(
            motor_id,
            kp = params.kp,
            kd = params.kd,
            max_torque = params.max_torque,
            "sim: configure"
        );
        let motor = self.motors.entry(motor_id).or_default();
        motor.params = Some(*params);
        motor.torque_enabled = true;
        self.log(SimCall::SetParams {
            motor_id,
            params: *params,
        });
        Ok(())
    }

    fn send_commands(&mut self, commands: &[ActuatorCommand]) -> Result<(), Self::Error> {
        for command in commands {
            self.check(Operation::SendCommands, command.motor_id)?;
        }
        for command in commands {
            let motor = self.motors.entry(command.motor_id).or_default();
            motor.position = command.position;
            motor.velocity = command.velocity.unwrap_or_default();
        }
        self.log(SimCall::Commands(commands.to_vec()));
        Ok(())
    }

    fn read_states(
        &mut self,
        motor_ids: &[MotorId],
        sink: &mut dyn FnMut(ActuatorState),
    ) -> Result<(), Self::Error> {
        for &motor_id in motor_ids {
            self.check(Operation::ReadStates, motor_id)?;
            let motor = self.motors.get(&motor_id).copied().unwrap_or_default();
            sink(ActuatorState {
                motor_id,
                position: motor.position,
                velocity: motor.velocity,
            });
        }
        Ok(())
    }
}
