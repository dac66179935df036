//! Unit types for physical quantities.
//!
//! Provides type-safe representations of angles, angular velocities,
//! frequencies and durations so waveform parameters cannot be swapped
//! by accident.

use libm::roundf;
use serde::{Deserialize, Serialize};

/// Angular position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct Degrees(pub f32);

/// Angular velocity in degrees per second.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct DegreesPerSec(pub f32);

/// Frequency in hertz.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct Hertz(pub f32);

impl Hertz {
    /// Period of one cycle.
    ///
    /// Only meaningful for positive frequencies; validation rejects the rest.
    #[inline]
    pub fn period(self) -> Seconds {
        Seconds(1.0 / self.0)
    }
}

/// Duration in seconds.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize, Serialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct Seconds(pub f32);

impl Seconds {
    /// Build from milliseconds.
    #[inline]
    pub fn from_millis(ms: u32) -> Self {
        Self(ms as f32 / 1000.0)
    }

    /// Convert to the nearest whole microsecond, saturating at `0` and
    /// `u32::MAX`. NaN converts to `0`.
    #[inline]
    pub fn as_micros_u32(self) -> u32 {
        let us = roundf(self.0 * 1_000_000.0);
        if us.is_nan() || us <= 0.0 {
            0
        } else if us >= u32::MAX as f32 {
            u32::MAX
        } else {
            us as u32
        }
    }
}
