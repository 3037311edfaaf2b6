/*!
Kinematic character controller (KCC) settings and tolerances.

These constants centralize the parameters used by the collide-and-slide solver,
the ground prober and the fixed-step clock. Keeping them together makes tuning
easier and helps ensure deterministic behavior across platforms.

Notes
- Distances are in meters, time in seconds, angles in degrees.
- Favor practical world-space tolerances over machine epsilon for robust behavior.
- [`ControllerSettings`] carries these as defaults; override per actor from game data.
*/

use crate::error::ControllerError;

/// Steepest surface (angle between its normal and world up) still considered walkable.
pub const DEFAULT_MAX_STABLE_SLOPE_DEGREES: f32 = 60.0;

/// Maximum number of sweep/deflect iterations per fixed step.
/// Higher values help with tight corners at the cost of more queries.
pub const DEFAULT_MAX_ITERATIONS: u32 = 5;

/// Separation kept from surfaces after a hit (meters).
/// Prevents re-penetrating the same surface on the next iteration due to float error.
pub const DEFAULT_COLLISION_OFFSET: f32 = 0.01;

/// Ground probe length while airborne (meters).
pub const DEFAULT_MIN_GROUND_PROBE_DISTANCE: f32 = 0.005;

/// How far above the actor the ground probe starts (meters).
/// Keeps the probe origin out of the surface the actor stands on.
pub const DEFAULT_GROUND_PROBE_BACKSTEP: f32 = 0.1;

/// Simulation step (seconds).
pub const DEFAULT_FIXED_TIME_STEP: f32 = 1.0 / 60.0;

/// Longest frame delta accepted by one `update` call (seconds).
/// A single slow frame must not trigger a runaway catch-up.
pub const DEFAULT_MAX_FRAME_DELTA: f32 = 0.1;

/// Squared length under which a vector is treated as zero.
pub const MIN_MOVE_SQ: f32 = 1.0e-8;

/// Per-controller tuning. `Default` uses the constants above.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControllerSettings {
    pub max_stable_slope_degrees: f32,
    pub max_iterations: u32,
    pub collision_offset: f32,
    pub min_ground_probe_distance: f32,
    pub ground_probe_backstep: f32,
    pub fixed_time_step: f32,
    pub max_frame_delta: f32,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            max_stable_slope_degrees: DEFAULT_MAX_STABLE_SLOPE_DEGREES,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            collision_offset: DEFAULT_COLLISION_OFFSET,
            min_ground_probe_distance: DEFAULT_MIN_GROUND_PROBE_DISTANCE,
            ground_probe_backstep: DEFAULT_GROUND_PROBE_BACKSTEP,
            fixed_time_step: DEFAULT_FIXED_TIME_STEP,
            max_frame_delta: DEFAULT_MAX_FRAME_DELTA,
        }
    }
}

impl ControllerSettings {
    /// Reject values the solver cannot run with.
    pub fn validate(&self) -> Result<(), ControllerError> {
        let slope = self.max_stable_slope_degrees;
        if !slope.is_finite() || slope <= 0.0 || slope > 90.0 {
            return Err(ControllerError::InvalidSettings {
                field: "max_stable_slope_degrees",
                reason: "must be in (0, 90]",
            });
        }
        if self.max_iterations == 0 {
            return Err(ControllerError::InvalidSettings {
                field: "max_iterations",
                reason: "must be at least 1",
            });
        }

        let positive = [
            ("collision_offset", self.collision_offset),
            ("min_ground_probe_distance", self.min_ground_probe_distance),
            ("ground_probe_backstep", self.ground_probe_backstep),
            ("fixed_time_step", self.fixed_time_step),
            ("max_frame_delta", self.max_frame_delta),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ControllerError::InvalidSettings {
                    field,
                    reason: "must be finite and positive",
                });
            }
        }

        Ok(())
    }
}
