//! Resolution output.

use core::fmt::Write;

use heapless::{String, Vec};

use crate::config::{MotorId, MotorParams, MAX_RESOLVED_MOTORS};

/// Effective configuration of one motor for one test case.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedMotor {
    /// Motor ID.
    pub motor_id: MotorId,
    /// Gains after applying the test's overrides.
    pub params: MotorParams,
    /// Owning global group.
    pub group: String<32>,
    /// Position of the motor within its group's `motor_ids`.
    pub index_in_group: usize,
}

impl ResolvedMotor {
    /// Label `<group>_<index>`, used to name recorded channels.
    pub fn label(&self) -> String<48> {
        let mut label = String::new();
        let _ = write!(label, "{}_{}", self.group, self.index_in_group);
        label
    }
}

/// Effective per-motor parameters for one test case, sorted by motor ID.
///
/// Built by [`resolve`](super::resolve) right before a test runs and dropped
/// when it finishes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedMotorConfig {
    motors: Vec<ResolvedMotor, MAX_RESOLVED_MOTORS>,
}

impl ResolvedMotorConfig {
    /// Wrap entries that are already sorted by motor ID without repeats.
    pub(crate) fn from_sorted(motors: Vec<ResolvedMotor, MAX_RESOLVED_MOTORS>) -> Self {
        debug_assert!(motors.windows(2).all(|w| w[0].motor_id < w[1].motor_id));
        Self { motors }
    }

    /// Number of active motors.
    #[inline]
    pub fn len(&self) -> usize {
        self.motors.len()
    }

    /// True when no motor is active.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.motors.is_empty()
    }

    /// Effective parameters of `motor_id`, if active.
    pub fn get(&self, motor_id: MotorId) -> Option<&MotorParams> {
        self.entry(motor_id).map(|m| &m.params)
    }

    /// Full entry for `motor_id`, if active.
    pub fn entry(&self, motor_id: MotorId) -> Option<&ResolvedMotor> {
        self.motors
            .binary_search_by_key(&motor_id, |m| m.motor_id)
            .ok()
            .map(|i| &self.motors[i])
    }

    /// Whether `motor_id` is active.
    #[inline]
    pub fn contains(&self, motor_id: MotorId) -> bool {
        self.entry(motor_id).is_some()
    }

    /// Active motor IDs in ascending order.
    pub fn motor_ids(&self) -> impl Iterator<Item = MotorId> + '_ {
        self.motors.iter().map(|m| m.motor_id)
    }

    /// Active motor IDs as an owned list, ascending.
    pub fn motor_id_list(&self) -> Vec<MotorId, MAX_RESOLVED_MOTORS> {
        self.motor_ids().collect()
    }

    /// Entries in ascending motor ID order.
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedMotor> {
        self.motors.iter()
    }

    /// Channel label of `motor_id`, if active.
    pub fn motor_label(&self, motor_id: MotorId) -> Option<String<48>> {
        self.entry(motor_id).map(ResolvedMotor::label)
    }
}

impl<'a> IntoIterator for &'a ResolvedMotorConfig {
    type Item = &'a ResolvedMotor;
    type IntoIter = core::slice::Iter<'a, ResolvedMotor>;

    fn into_iter(self) -> Self::IntoIter {
        self.motors.iter()
    }
}
