//! Global motor group definitions.

use heapless::Vec;
use serde::Deserialize;

use super::params::MotorParams;
use super::MotorId;

/// Maximum motor IDs in one group.
pub const MAX_GROUP_MOTORS: usize = 32;

/// A named set of motors sharing default control gains.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MotorGroup {
    /// Member motor IDs, in configuration order.
    pub motor_ids: Vec<MotorId, MAX_GROUP_MOTORS>,

    /// Gains applied to every member unless a test overrides them.
    pub default_params: MotorParams,
}

impl MotorGroup {
    /// Build a group from a slice of IDs.
    ///
    /// Returns `None` if `motor_ids` exceeds the group capacity.
    pub fn new(motor_ids: &[MotorId], default_params: MotorParams) -> Option<Self> {
        Some(Self {
            motor_ids: Vec::from_slice(motor_ids).ok()?,
            default_params,
        })
    }

    /// Whether `motor_id` is a member of this group.
    #[inline]
    pub fn contains(&self, motor_id: MotorId) -> bool {
        self.motor_ids.contains(&motor_id)
    }

    /// Position of `motor_id` within the group, as listed in configuration.
    pub fn index_of(&self, motor_id: MotorId) -> Option<usize> {
        self.motor_ids.iter().position(|&id| id == motor_id)
    }

    /// First motor ID that appears more than once, if any.
    pub fn first_duplicate(&self) -> Option<MotorId> {
        self.motor_ids
            .iter()
            .enumerate()
            .find(|(i, id)| self.motor_ids[..*i].contains(id))
            .map(|(_, &id)| id)
    }
}
