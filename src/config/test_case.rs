//! Test case definitions from YAML.

use heapless::{FnvIndexMap, String, Vec};
use serde::Deserialize;

use super::params::ParamOverride;
use super::units::{Degrees, Hertz, Seconds};
use super::{MotorId, MAX_GROUPS, MAX_RESOLVED_MOTORS};

/// Maximum number of piecewise waypoints.
pub const MAX_POSITIONS: usize = 32;

/// Per-test group overrides, keyed by global group name.
pub type GroupOverrides = FnvIndexMap<String<32>, ParamOverride, MAX_GROUPS>;

/// Explicit active-motor list.
pub type ActiveMotors = Vec<MotorId, MAX_RESOLVED_MOTORS>;

/// Periodic waveform shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum WaveformKind {
    /// Linear ramps 0 -> +A -> 0 -> -A -> 0 over one period.
    Triangle,
    /// `A sin(2 pi f t)`.
    Sine,
    /// `+A` for the first half period, `-A` for the second.
    Square,
}

impl WaveformKind {
    /// Lowercase name, as written in YAML.
    pub const fn as_str(self) -> &'static str {
        match self {
            WaveformKind::Triangle => "triangle",
            WaveformKind::Sine => "sine",
            WaveformKind::Square => "square",
        }
    }
}

/// Periodic waveform test.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WaveformTest {
    /// Display name. Filled in as `<type>_<index>` when absent.
    #[serde(default)]
    pub name: Option<String<32>>,

    /// Waveform shape.
    #[serde(rename = "type")]
    pub kind: WaveformKind,

    /// Peak deflection from zero.
    #[serde(default = "default_amplitude")]
    pub amplitude: Degrees,

    /// Cycles per second.
    #[serde(default = "default_frequency")]
    pub frequency: Hertz,

    /// Test length.
    #[serde(default = "default_waveform_duration")]
    pub duration: Seconds,

    /// Send a feed-forward velocity with every command.
    #[serde(default)]
    pub send_velocity: bool,

    /// Motors to command. `None` means every candidate motor.
    #[serde(default)]
    pub active_motors: Option<ActiveMotors>,

    /// Group overrides; also selects the candidate motors.
    #[serde(default)]
    pub motor_groups: GroupOverrides,
}

/// Waypoint sequence test.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PiecewiseTest {
    /// Display name. Filled in as `piecewise_<index>` when absent.
    #[serde(default)]
    pub name: Option<String<32>>,

    /// Waypoints, visited at equal time spacing.
    #[serde(default = "default_positions")]
    pub positions: Vec<Degrees, MAX_POSITIONS>,

    /// Time to traverse all waypoints.
    #[serde(default = "default_piecewise_duration")]
    pub duration: Seconds,

    /// Send the segment slope as feed-forward velocity.
    #[serde(default)]
    pub send_velocity: bool,

    /// Motors to command. `None` means every candidate motor.
    #[serde(default)]
    pub active_motors: Option<ActiveMotors>,

    /// Group overrides; also selects the candidate motors.
    #[serde(default)]
    pub motor_groups: GroupOverrides,
}

fn default_amplitude() -> Degrees {
    Degrees(20.0)
}

fn default_frequency() -> Hertz {
    Hertz(0.5)
}

fn default_waveform_duration() -> Seconds {
    Seconds(10.0)
}

fn default_piecewise_duration() -> Seconds {
    Seconds(5.0)
}

fn default_positions() -> Vec<Degrees, MAX_POSITIONS> {
    [0.0, 10.0, 0.0, -10.0, 0.0].into_iter().map(Degrees).collect()
}

impl WaveformTest {
    /// A waveform test with default amplitude, frequency and duration that
    /// commands every configured motor.
    pub fn new(kind: WaveformKind) -> Self {
        Self {
            name: None,
            kind,
            amplitude: default_amplitude(),
            frequency: default_frequency(),
            duration: default_waveform_duration(),
            send_velocity: false,
            active_motors: None,
            motor_groups: GroupOverrides::new(),
        }
    }
}

impl PiecewiseTest {
    /// A piecewise test over the default waypoints that commands every
    /// configured motor.
    pub fn new() -> Self {
        Self {
            name: None,
            positions: default_positions(),
            duration: default_piecewise_duration(),
            send_velocity: false,
            active_motors: None,
            motor_groups: GroupOverrides::new(),
        }
    }
}

impl Default for PiecewiseTest {
    fn default() -> Self {
        Self::new()
    }
}

/// One runnable test case.
#[derive(Debug, Clone)]
pub enum TestCase {
    /// Periodic waveform.
    Waveform(WaveformTest),
    /// Waypoint sequence.
    Piecewise(PiecewiseTest),
}

impl TestCase {
    /// Display name (empty until the suite assigns defaults).
    pub fn name(&self) -> &str {
        let name = match self {
            TestCase::Waveform(t) => &t.name,
            TestCase::Piecewise(t) => &t.name,
        };
        name.as_ref().map(|n| n.as_str()).unwrap_or("")
    }

    /// Short kind label: the waveform type or `piecewise`.
    pub fn kind_str(&self) -> &'static str {
        match self {
            TestCase::Waveform(t) => t.kind.as_str(),
            TestCase::Piecewise(_) => "piecewise",
        }
    }

    /// Test length.
    pub fn duration(&self) -> Seconds {
        match self {
            TestCase::Waveform(t) => t.duration,
            TestCase::Piecewise(t) => t.duration,
        }
    }

    /// Whether commands carry a velocity.
    pub fn send_velocity(&self) -> bool {
        match self {
            TestCase::Waveform(t) => t.send_velocity,
            TestCase::Piecewise(t) => t.send_velocity,
        }
    }

    /// Explicit active-motor list, if any.
    pub fn active_motors(&self) -> Option<&[MotorId]> {
        match self {
            TestCase::Waveform(t) => t.active_motors.as_deref(),
            TestCase::Piecewise(t) => t.active_motors.as_deref(),
        }
    }

    /// Group overrides.
    pub fn motor_groups(&self) -> &GroupOverrides {
        match self {
            TestCase::Waveform(t) => &t.motor_groups,
            TestCase::Piecewise(t) => &t.motor_groups,
        }
    }

    pub(crate) fn name_slot(&mut self) -> &mut Option<String<32>> {
        match self {
            TestCase::Waveform(t) => &mut t.name,
            TestCase::Piecewise(t) => &mut t.name,
        }
    }
}

impl From<WaveformTest> for TestCase {
    fn from(t: WaveformTest) -> Self {
        TestCase::Waveform(t)
    }
}

impl From<PiecewiseTest> for TestCase {
    fn from(t: PiecewiseTest) -> Self {
        TestCase::Piecewise(t)
    }
}
