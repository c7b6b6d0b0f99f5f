//! Fixed-step accumulator.

use std::time::Duration;

use raycraft_core::constants::TICK;
use tracing::warn;

/// Turns variable frame times into a whole number of fixed ticks.
///
/// Frame time is accumulated and drained in steps of `step`; leftover time
/// carries into the next frame. If a frame asks for more than
/// `max_ticks_per_frame` ticks the surplus is discarded so a long stall does
/// not freeze the following frames.
#[derive(Clone, Debug)]
pub struct FixedTimestep {
    step: Duration,
    accumulator: Duration,
    max_ticks_per_frame: u32,
    dropped_ticks: u64,
}

impl FixedTimestep {
    pub const DEFAULT_MAX_TICKS: u32 = 25;

    pub const fn new(step: Duration) -> Self {
        Self {
            step,
            accumulator: Duration::ZERO,
            max_ticks_per_frame: Self::DEFAULT_MAX_TICKS,
            dropped_ticks: 0,
        }
    }

    pub const fn with_max_ticks(mut self, max_ticks_per_frame: u32) -> Self {
        self.max_ticks_per_frame = max_ticks_per_frame;
        self
    }

    #[inline]
    pub const fn step(&self) -> Duration {
        self.step
    }

    /// Ticks discarded so far by the catch-up limit.
    #[inline]
    pub const fn dropped_ticks(&self) -> u64 {
        self.dropped_ticks
    }

    /// Fraction of a step left in the accumulator.
    pub fn alpha(&self) -> f32 {
        self.accumulator.as_secs_f32() / self.step.as_secs_f32()
    }

    /// Add a frame's elapsed time and return how many ticks to run.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if self.step.is_zero() {
            return 0;
        }
        self.accumulator += dt;

        let step_nanos = self.step.as_nanos();
        let whole = self.accumulator.as_nanos() / step_nanos;
        let remainder = self.accumulator.as_nanos() % step_nanos;
        self.accumulator = Duration::from_nanos(remainder as u64);
        let mut ticks = u64::try_from(whole).unwrap_or(u64::MAX);

        let max = u64::from(self.max_ticks_per_frame);
        if ticks > max {
            let dropped = ticks - max;
            self.dropped_ticks += dropped;
            warn!(dropped, "Simulation fell behind, skipping ticks");
            ticks = max;
        }
        ticks as u32
    }

    /// Forget accumulated time, e.g. after a pause.
    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
    }
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(TICK)
    }
}
