//! Resolution algorithm.

use heapless::{String, Vec};

use crate::config::{
    GroupOverrides, MotorGroup, MotorGroups, MotorId, TestCase, MAX_RESOLVED_MOTORS,
};
use crate::error::{Error, ResolutionError, Result};

use super::{ResolvedMotor, ResolvedMotorConfig};

/// Resolve the motors and gains for one test case.
///
/// 1. Candidates are the members of every group the test overrides, or of
///    every global group when it overrides none.
/// 2. Active motors are the test's `active_motors` (each must be a
///    candidate), or all candidates.
/// 3. Each active motor takes its single owning group's defaults, with the
///    test's override for that group applied field by field.
///
/// The output is sorted ascending by motor ID. The function is pure: the same
/// inputs always give the same output.
///
/// # Errors
///
/// - `UnknownGroup` if the test overrides a group that is not defined
/// - `MotorNotReachable` if an active motor is not a candidate
/// - `UnownedMotor` / `AmbiguousOwnership` if an active motor does not
///   belong to exactly one global group
/// - `TooManyMotors` if the active set exceeds capacity
pub fn resolve(groups: &MotorGroups, test: &TestCase) -> Result<ResolvedMotorConfig> {
    let overrides = test.motor_groups();

    // Fail on unknown names before looking at any motor.
    for group_name in overrides.keys() {
        if !groups.contains_key(group_name) {
            return Err(Error::Resolution(ResolutionError::UnknownGroup(
                group_name.clone(),
            )));
        }
    }

    let active = active_set(groups, overrides, test.active_motors())?;

    let mut motors: Vec<ResolvedMotor, MAX_RESOLVED_MOTORS> = Vec::new();
    for motor_id in active {
        let (group_name, group) = owner(groups, motor_id)?;
        let params = match overrides.get(group_name) {
            Some(o) => group.default_params.with_overrides(o),
            None => group.default_params,
        };
        let entry = ResolvedMotor {
            motor_id,
            params,
            group: group_name.clone(),
            index_in_group: group.index_of(motor_id).unwrap_or_default(),
        };
        // Same capacity as `active`, cannot overflow
        let _ = motors.push(entry);
    }

    Ok(ResolvedMotorConfig::from_sorted(motors))
}

/// Whether `motor_id` is reachable through the groups the test references.
fn is_candidate(groups: &MotorGroups, overrides: &GroupOverrides, motor_id: MotorId) -> bool {
    if overrides.is_empty() {
        groups.values().any(|g| g.contains(motor_id))
    } else {
        overrides
            .keys()
            .filter_map(|name| groups.get(name))
            .any(|g| g.contains(motor_id))
    }
}

/// Distinct active motor IDs, ascending.
fn active_set(
    groups: &MotorGroups,
    overrides: &GroupOverrides,
    requested: Option<&[MotorId]>,
) -> Result<Vec<MotorId, MAX_RESOLVED_MOTORS>> {
    let mut active: Vec<MotorId, MAX_RESOLVED_MOTORS> = Vec::new();

    match requested {
        Some(ids) => {
            for &motor_id in ids {
                if !is_candidate(groups, overrides, motor_id) {
                    return Err(Error::Resolution(ResolutionError::MotorNotReachable(
                        motor_id,
                    )));
                }
                insert_distinct(&mut active, motor_id)?;
            }
        }
        None => {
            let sources = groups
                .iter()
                .filter(|(name, _)| overrides.is_empty() || overrides.contains_key(*name));
            for (_, group) in sources {
                for &motor_id in group.motor_ids.iter() {
                    insert_distinct(&mut active, motor_id)?;
                }
            }
        }
    }

    active.sort_unstable();
    Ok(active)
}

fn insert_distinct(set: &mut Vec<MotorId, MAX_RESOLVED_MOTORS>, motor_id: MotorId) -> Result<()> {
    if set.contains(&motor_id) {
        return Ok(());
    }
    set.push(motor_id).map_err(|_| {
        Error::Resolution(ResolutionError::TooManyMotors(MAX_RESOLVED_MOTORS))
    })
}

/// The single global group containing `motor_id`.
fn owner(groups: &MotorGroups, motor_id: MotorId) -> Result<(&String<32>, &MotorGroup)> {
    let mut owners = groups.iter().filter(|(_, g)| g.contains(motor_id));

    let first = owners
        .next()
        .ok_or(Error::Resolution(ResolutionError::UnownedMotor(motor_id)))?;

    if let Some((second, _)) = owners.next() {
        return Err(Error::Resolution(ResolutionError::AmbiguousOwnership {
            motor_id,
            first: first.0.clone(),
            second: second.clone(),
        }));
    }

    Ok(first)
}
