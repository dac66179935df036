//! Fixed-rate tick scheduling for a test case.

use libm::{ceilf, fabsf, roundf};

use crate::config::units::Seconds;

/// Default control period: 100 Hz.
pub const DEFAULT_PERIOD: Seconds = Seconds(0.01);

/// Steps elapsed time through a test in fixed ticks.
///
/// Tick `i` happens at `t = i * period`, for every `t < duration`. Time is
/// derived from the tick index, never from a clock.
#[derive(Debug, Clone)]
pub struct MotionExecutor {
    /// Time between ticks.
    period: Seconds,

    /// Number of ticks in the whole test.
    total_ticks: u32,

    /// Index of the next tick to hand out.
    current_tick: u32,
}

impl MotionExecutor {
    /// Create an executor covering `duration` at one tick per `period`.
    ///
    /// A non-positive duration or period yields zero ticks.
    pub fn new(duration: Seconds, period: Seconds) -> Self {
        Self {
            period,
            total_ticks: tick_count(duration, period),
            current_tick: 0,
        }
    }

    /// Check if every tick has been handed out.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.current_tick >= self.total_ticks
    }

    /// Number of ticks already handed out.
    #[inline]
    pub fn current_tick(&self) -> u32 {
        self.current_tick
    }

    /// Get the total number of ticks.
    #[inline]
    pub fn total_ticks(&self) -> u32 {
        self.total_ticks
    }

    /// Get ticks remaining.
    #[inline]
    pub fn ticks_remaining(&self) -> u32 {
        self.total_ticks.saturating_sub(self.current_tick)
    }

    /// Time between ticks.
    #[inline]
    pub fn period(&self) -> Seconds {
        self.period
    }

    /// Hand out the time of the next tick, or `None` when complete.
    pub fn advance(&mut self) -> Option<Seconds> {
        if self.is_complete() {
            return None;
        }
        let t = Seconds(self.current_tick as f32 * self.period.0);
        self.current_tick += 1;
        Some(t)
    }

    /// Reset the executor to the beginning.
    pub fn reset(&mut self) {
        self.current_tick = 0;
    }

    /// Get progress as a fraction (0.0 to 1.0).
    #[inline]
    pub fn progress(&self) -> f32 {
        if self.total_ticks == 0 {
            1.0
        } else {
            self.current_tick as f32 / self.total_ticks as f32
        }
    }
}

impl Iterator for MotionExecutor {
    type Item = Seconds;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.ticks_remaining() as usize;
        (n, Some(n))
    }
}

/// `ceil(duration / period)`, treating ratios within float noise of an
/// integer as that integer (10 s at 0.01 s is 1000 ticks, not 1001).
fn tick_count(duration: Seconds, period: Seconds) -> u32 {
    if !(duration.0 > 0.0 && period.0 > 0.0) {
        return 0;
    }
    let ratio = duration.0 / period.0;
    let nearest = roundf(ratio);
    let ticks = if fabsf(ratio - nearest) < 1e-3 {
        nearest
    } else {
        ceilf(ratio)
    };
    if ticks >= u32::MAX as f32 {
        u32::MAX
    } else {
        ticks as u32
    }
}
