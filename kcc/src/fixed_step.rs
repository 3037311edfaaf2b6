//! Fixed-timestep accumulator.
//!
//! Frame deltas are variable; simulation steps are not. Each frame adds its (clamped) delta,
//! then whole steps are drained while enough time has accumulated. The leftover fraction of a
//! step is the interpolation factor for rendering.

use crate::collision::settings::{DEFAULT_FIXED_TIME_STEP, DEFAULT_MAX_FRAME_DELTA};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedStepClock {
    step: f32,
    max_frame_delta: f32,
    accumulator: f32,
}

impl Default for FixedStepClock {
    fn default() -> Self {
        Self::new(DEFAULT_FIXED_TIME_STEP, DEFAULT_MAX_FRAME_DELTA)
    }
}

impl FixedStepClock {
    /// `step` and `max_frame_delta` must be positive (see `ControllerSettings::validate`).
    pub fn new(step: f32, max_frame_delta: f32) -> Self {
        Self {
            step,
            max_frame_delta,
            accumulator: 0.0,
        }
    }

    #[inline]
    pub fn step(&self) -> f32 {
        self.step
    }

    #[inline]
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Add one frame's delta, clamped to `[0, max_frame_delta]`.
    ///
    /// Returns the delta actually accepted. NaN counts as zero.
    pub fn accumulate(&mut self, frame_delta: f32) -> f32 {
        let accepted = if frame_delta.is_nan() {
            0.0
        } else {
            frame_delta.clamp(0.0, self.max_frame_delta)
        };
        self.accumulator += accepted;
        accepted
    }

    /// Take one fixed step out of the accumulator if a whole one is available.
    #[inline]
    pub fn consume_step(&mut self) -> bool {
        if self.accumulator >= self.step {
            self.accumulator -= self.step;
            true
        } else {
            false
        }
    }

    /// Fraction of a step left in the accumulator, in `[0, 1)` once all steps are drained.
    #[inline]
    pub fn alpha(&self) -> f32 {
        (self.accumulator / self.step).clamp(0.0, 1.0)
    }
}
