//! Actuator command interface.
//!
//! The robot control SDK sits behind [`ActuatorInterface`]; the harness only
//! ever configures gains, toggles torque, streams position targets and reads
//! back telemetry through it.

#[cfg(feature = "std")]
mod simulated;

#[cfg(feature = "std")]
pub use simulated::{SimCall, SimError, SimMotor, SimulatedActuators};

use core::fmt::Debug;

use crate::config::units::{Degrees, DegreesPerSec};
use crate::config::{MotorId, MotorParams};

/// Position target for one motor.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActuatorCommand {
    /// Target motor.
    pub motor_id: MotorId,
    /// Target position.
    pub position: Degrees,
    /// Optional feed-forward velocity.
    pub velocity: Option<DegreesPerSec>,
}

/// Measured state of one motor.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActuatorState {
    /// Reporting motor.
    pub motor_id: MotorId,
    /// Measured position.
    pub position: Degrees,
    /// Measured velocity.
    pub velocity: DegreesPerSec,
}

/// Sink for actuator commands.
///
/// Implementations wrap whatever transport reaches the motors. Calls block
/// until the backend accepts them; retries, if any, belong to the backend.
pub trait ActuatorInterface {
    /// Backend error type.
    type Error: Debug;

    /// Enable or disable torque on one motor.
    fn set_torque_enabled(&mut self, motor_id: MotorId, enabled: bool) -> Result<(), Self::Error>;

    /// Apply gains and torque limit to one motor and enable torque.
    fn set_motor_params(&mut self, motor_id: MotorId, params: &MotorParams) -> Result<(), Self::Error>;

    /// Send one batch of position targets.
    fn send_commands(&mut self, commands: &[ActuatorCommand]) -> Result<(), Self::Error>;

    /// Report the current state of `motor_ids` through `sink`.
    ///
    /// Backends without telemetry report nothing.
    fn read_states(
        &mut self,
        motor_ids: &[MotorId],
        sink: &mut dyn FnMut(ActuatorState),
    ) -> Result<(), Self::Error> {
        let _ = (motor_ids, sink);
        Ok(())
    }
}

impl<T: ActuatorInterface + ?Sized> ActuatorInterface for &mut T {
    type Error = T::Error;

    #[inline]
    fn set_torque_enabled(&mut self, motor_id: MotorId, enabled: bool) -> Result<(), Self::Error> {
        T::set_torque_enabled(self, motor_id, enabled)
    }

    #[inline]
    fn set_motor_params(&mut self, motor_id: MotorId, params: &MotorParams) -> Result<(), Self::Error> {
        T::set_motor_params(self, motor_id, params)
    }

    #[inline]
    fn send_commands(&mut self, commands: &[ActuatorCommand]) -> Result<(), Self::Error> {
        T::send_commands(self, commands)
    }

    #[inline]
    fn read_states(
        &mut self,
        motor_ids: &[MotorId],
        sink: &mut dyn FnMut(ActuatorState),
    ) -> Result<(), Self::Error> {
        T::read_states(self, motor_ids, sink)
    }
}
