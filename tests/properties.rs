//! Property tests for motor resolution.

use actuator_sweep::config::{GroupOverrides, MotorGroups, WaveformKind, WaveformTest};
use actuator_sweep::error::{Error, ResolutionError};
use actuator_sweep::{resolve, MotorGroup, MotorParams, ParamOverride, TestCase};
use heapless::String;
use proptest::prelude::*;

fn group_name(index: usize) -> String<32> {
    let mut name = String::new();
    name.push_str("group").unwrap();
    name.push(char::from(b'a' + index as u8)).unwrap();
    name
}

fn gain() -> impl Strategy<Value = f32> {
    (0u16..1000).prop_map(|v| v as f32 / 4.0)
}

fn params() -> impl Strategy<Value = MotorParams> {
    (gain(), gain(), gain()).prop_map(|(kp, kd, max_torque)| MotorParams::new(kp, kd, max_torque))
}

fn param_override() -> impl Strategy<Value = ParamOverride> {
    (
        proptest::option::of(gain()),
        proptest::option::of(gain()),
        proptest::option::of(gain()),
    )
        .prop_map(|(kp, kd, max_torque)| ParamOverride { kp, kd, max_torque })
}

/// Groups with disjoint members: group `g` owns IDs `10 g + 1 ..`.
fn disjoint_groups() -> impl Strategy<Value = Vec<(Vec<u32>, MotorParams)>> {
    proptest::collection::vec((1usize..6, params()), 1..5).prop_map(|groups| {
        groups
            .into_iter()
            .enumerate()
            .map(|(g, (size, params))| {
                let ids = (1..=size as u32).map(|i| g as u32 * 10 + i).collect();
                (ids, params)
            })
            .collect()
    })
}

fn build_groups(layout: &[(Vec<u32>, MotorParams)]) -> MotorGroups {
    let mut groups = MotorGroups::new();
    for (g, (ids, params)) in layout.iter().enumerate() {
        let group = MotorGroup::new(ids, *params).unwrap();
        groups.insert(group_name(g), group).unwrap();
    }
    groups
}

fn build_test(overrides: &[(usize, ParamOverride)], active: Option<&[u32]>) -> TestCase {
    let mut wave = WaveformTest::new(WaveformKind::Sine);
    let mut map = GroupOverrides::new();
    for (g, o) in overrides {
        map.insert(group_name(*g), *o).unwrap();
    }
    wave.motor_groups = map;
    wave.active_motors = active.map(|ids| heapless::Vec::from_slice(ids).unwrap());
    wave.into()
}

/// Groups plus overrides for a random subset of them.
fn scenario() -> impl Strategy<Value = (Vec<(Vec<u32>, MotorParams)>, Vec<(usize, ParamOverride)>)> {
    disjoint_groups().prop_flat_map(|groups| {
        let n = groups.len();
        let overrides = proptest::collection::vec((0..n, param_override()), 0..=n).prop_map(
            |mut list| {
                list.sort_by_key(|(g, _)| *g);
                list.dedup_by_key(|(g, _)| *g);
                list
            },
        );
        (Just(groups), overrides)
    })
}

proptest! {
    /// Without an explicit list, the active set is the union of the
    /// overridden groups (every group when none is overridden), ascending.
    #[test]
    fn prop_active_set_is_group_union((layout, overrides) in scenario()) {
        let groups = build_groups(&layout);
        let test = build_test(&overrides, None);

        let resolved = resolve(&groups, &test).unwrap();

        let mut expected: Vec<u32> = layout
            .iter()
            .enumerate()
            .filter(|(g, _)| overrides.is_empty() || overrides.iter().any(|(o, _)| o == g))
            .flat_map(|(_, (ids, _))| ids.iter().copied())
            .collect();
        expected.sort_unstable();

        prop_assert_eq!(resolved.motor_ids().collect::<Vec<_>>(), expected);
    }

    /// Each field is the override when present and the group default otherwise.
    #[test]
    fn prop_override_merge_is_field_local((layout, overrides) in scenario()) {
        let groups = build_groups(&layout);
        let test = build_test(&overrides, None);

        let resolved = resolve(&groups, &test).unwrap();

        for motor in &resolved {
            let g = (motor.motor_id / 10) as usize;
            let defaults = layout[g].1;
            let o = overrides
                .iter()
                .find(|(og, _)| *og == g)
                .map(|(_, o)| *o)
                .unwrap_or_default();

            prop_assert_eq!(motor.params.kp, o.kp.unwrap_or(defaults.kp));
            prop_assert_eq!(motor.params.kd, o.kd.unwrap_or(defaults.kd));
            prop_assert_eq!(motor.params.max_torque, o.max_torque.unwrap_or(defaults.max_torque));
        }
    }

    /// An explicit list is honoured exactly, deduplicated and sorted.
    #[test]
    fn prop_explicit_list_sorted(layout in disjoint_groups(), picks in proptest::collection::vec(any::<prop::sample::Index>(), 1..10)) {
        let groups = build_groups(&layout);
        let all: Vec<u32> = layout.iter().flat_map(|(ids, _)| ids.iter().copied()).collect();
        let active: Vec<u32> = picks.iter().map(|i| all[i.index(all.len())]).collect();
        let test = build_test(&[], Some(active.as_slice()));

        let resolved = resolve(&groups, &test).unwrap();

        let mut expected = active.clone();
        expected.sort_unstable();
        expected.dedup();
        prop_assert_eq!(resolved.motor_ids().collect::<Vec<_>>(), expected);
    }

    /// Resolution is a pure function of its inputs.
    #[test]
    fn prop_resolution_is_deterministic((layout, overrides) in scenario()) {
        let groups = build_groups(&layout);
        let test = build_test(&overrides, None);

        prop_assert_eq!(resolve(&groups, &test), resolve(&groups, &test));
    }

    /// A motor listed in two groups cannot be commanded.
    #[test]
    fn prop_shared_motor_rejected(layout in disjoint_groups().prop_filter("two groups", |s| s.len() >= 2)) {
        let mut layout = layout;
        let shared = layout[0].0[0];
        layout[1].0.push(shared);
        let groups = build_groups(&layout);
        let test = build_test(&[], Some(&[shared][..]));

        match resolve(&groups, &test) {
            Err(Error::Resolution(ResolutionError::AmbiguousOwnership { motor_id, first, second })) => {
                prop_assert_eq!(motor_id, shared);
                prop_assert_eq!(first.as_str(), "groupa");
                prop_assert_eq!(second.as_str(), "groupb");
            }
            other => prop_assert!(false, "expected ambiguous ownership, got {:?}", other),
        }
    }
}
