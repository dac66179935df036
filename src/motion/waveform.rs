//! Closed-form trajectory evaluation.
//!
//! Every test kind maps elapsed time to a target position, and optionally a
//! feed-forward velocity, without keeping any state between calls.

use core::f32::consts::PI;

use libm::{cosf, fmodf, sinf};

use crate::config::units::{Degrees, DegreesPerSec, Seconds};
use crate::config::{TestCase, WaveformKind, WaveformTest};

/// Target for one control tick.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TrajectorySample {
    /// Target position.
    pub position: Degrees,
    /// Feed-forward velocity, present only when the test sends velocity.
    pub velocity: Option<DegreesPerSec>,
}

impl TrajectorySample {
    pub(crate) fn new(position: f32, velocity: f32, send_velocity: bool) -> Self {
        Self {
            position: Degrees(position),
            velocity: send_velocity.then_some(DegreesPerSec(velocity)),
        }
    }

    /// Stationary target.
    pub(crate) fn hold(position: f32, send_velocity: bool) -> Self {
        Self::new(position, 0.0, send_velocity)
    }
}

/// Evaluate any test case at elapsed time `t`.
pub fn sample(test: &TestCase, t: Seconds) -> TrajectorySample {
    match test {
        TestCase::Waveform(wave) => wave.sample(t),
        TestCase::Piecewise(piecewise) => piecewise.sample(t),
    }
}

/// Fraction of the current period elapsed at `t`, in `[0, 1)`.
#[inline]
fn cycle_position(t: f32, period: f32) -> f32 {
    let phase = fmodf(t, period) / period;
    if phase < 0.0 {
        phase + 1.0
    } else {
        phase
    }
}

impl WaveformTest {
    /// Target position (and velocity) at elapsed time `t`.
    pub fn sample(&self, t: Seconds) -> TrajectorySample {
        let amplitude = self.amplitude.0;
        let frequency = self.frequency.0;
        let t = t.0;

        let (position, velocity) = match self.kind {
            WaveformKind::Triangle => {
                let c = cycle_position(t, self.frequency.period().0);
                let slope = 4.0 * amplitude * frequency;
                if c < 0.25 {
                    (c * 4.0 * amplitude, slope)
                } else if c < 0.5 {
                    ((0.5 - c) * 4.0 * amplitude, -slope)
                } else if c < 0.75 {
                    ((c - 0.5) * 4.0 * -amplitude, -slope)
                } else {
                    ((c - 1.0) * 4.0 * amplitude, slope)
                }
            }
            WaveformKind::Sine => {
                let omega = 2.0 * PI * frequency;
                (amplitude * sinf(omega * t), amplitude * omega * cosf(omega * t))
            }
            WaveformKind::Square => {
                let c = cycle_position(t, self.frequency.period().0);
                let position = if c < 0.5 { amplitude } else { -amplitude };
                (position, 0.0)
            }
        };

        TrajectorySample::new(position, velocity, self.send_velocity)
    }
}
