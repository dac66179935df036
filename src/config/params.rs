//! Control gains and their per-test overrides.

use serde::{Deserialize, Serialize};

/// Control parameters applied to a single motor.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(deny_unknown_fields)]
pub struct MotorParams {
    /// Proportional gain.
    pub kp: f32,
    /// Derivative gain.
    pub kd: f32,
    /// Torque limit.
    pub max_torque: f32,
}

impl MotorParams {
    /// Create a parameter set.
    pub const fn new(kp: f32, kd: f32, max_torque: f32) -> Self {
        Self { kp, kd, max_torque }
    }

    /// Return a copy with every field present in `overrides` replaced.
    ///
    /// Absent fields keep their current value.
    pub fn with_overrides(self, overrides: &ParamOverride) -> Self {
        Self {
            kp: overrides.kp.unwrap_or(self.kp),
            kd: overrides.kd.unwrap_or(self.kd),
            max_torque: overrides.max_torque.unwrap_or(self.max_torque),
        }
    }
}

/// Partial parameter set from a test's `motor_groups` entry.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(deny_unknown_fields)]
pub struct ParamOverride {
    /// Proportional gain override.
    #[serde(default)]
    pub kp: Option<f32>,
    /// Derivative gain override.
    #[serde(default)]
    pub kd: Option<f32>,
    /// Torque limit override.
    #[serde(default)]
    pub max_torque: Option<f32>,
}

impl ParamOverride {
    /// Override nothing.
    pub const fn none() -> Self {
        Self {
            kp: None,
            kd: None,
            max_torque: None,
        }
    }

    /// Set the proportional gain.
    pub const fn kp(mut self, kp: f32) -> Self {
        self.kp = Some(kp);
        self
    }

    /// Set the derivative gain.
    pub const fn kd(mut self, kd: f32) -> Self {
        self.kd = Some(kd);
        self
    }

    /// Set the torque limit.
    pub const fn max_torque(mut self, max_torque: f32) -> Self {
        self.max_torque = Some(max_torque);
        self
    }

    /// True when no field is overridden.
    pub fn is_empty(&self) -> bool {
        self.kp.is_none() && self.kd.is_none() && self.max_torque.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let defaults = MotorParams::new(200.0, 30.0, 80.0);
        let merged = defaults.with_overrides(&ParamOverride::none().kp(300.0).kd(6.0));

        assert_eq!(merged, MotorParams::new(300.0, 6.0, 80.0));
    }

    #[test]
    fn test_empty_override_is_identity() {
        let defaults = MotorParams::new(40.0, 5.0, 17.0);
        let none = ParamOverride::none();

        assert!(none.is_empty());
        assert_eq!(defaults.with_overrides(&none), defaults);
    }

    #[test]
    fn test_explicit_zero_replaces_default() {
        let defaults = MotorParams::new(150.0, 5.0, 60.0);
        let merged = defaults.with_overrides(&ParamOverride::none().kd(0.0));

        assert_eq!(merged.kd, 0.0);
        assert_eq!(merged.kp, 150.0);
    }
}
