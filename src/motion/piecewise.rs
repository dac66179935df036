//! Linear interpolation through piecewise waypoints.

use libm::floorf;

use crate::config::units::Seconds;
use crate::config::PiecewiseTest;

use super::waveform::TrajectorySample;

impl PiecewiseTest {
    /// Seconds spent between two consecutive waypoints.
    pub fn segment_duration(&self) -> Seconds {
        let segments = self.positions.len().saturating_sub(1).max(1);
        Seconds(self.duration.0 / segments as f32)
    }

    /// Target position (and segment slope) at elapsed time `t`.
    ///
    /// Times past the end hold the last waypoint; the slope stays that of the
    /// final segment.
    pub fn sample(&self, t: Seconds) -> TrajectorySample {
        let positions = &self.positions;
        match positions.len() {
            0 => return TrajectorySample::hold(0.0, self.send_velocity),
            1 => return TrajectorySample::hold(positions[0].0, self.send_velocity),
            _ => {}
        }

        let segment_time = self.segment_duration().0;
        let t = t.0.max(0.0);
        let last_segment = positions.len() - 2;
        let segment = (floorf(t / segment_time) as usize).min(last_segment);

        let progress = ((t - segment as f32 * segment_time) / segment_time).min(1.0);
        let start = positions[segment].0;
        let end = positions[segment + 1].0;

        TrajectorySample::new(
            start + (end - start) * progress,
            (end - start) / segment_time,
            self.send_velocity,
        )
    }
}
