use super::{
    settings::ControllerSettings,
    surface,
    sweep::ShapeSweeper,
    types::{CapsuleShape, Dir, Vec3, up},
};

/// What the ground probe found for one fixed step.
///
/// Replaced wholesale every step; never patched field by field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroundingReport {
    /// Standing on a walkable surface.
    pub is_stable_on_ground: bool,
    /// Anything at all was under the actor, walkable or not.
    pub found_any_ground: bool,
    /// Normal of the surface found; zero when nothing was found.
    pub ground_normal: Vec3,
}

impl GroundingReport {
    /// Ungrounded, no normal.
    pub fn airborne() -> Self {
        Self {
            is_stable_on_ground: false,
            found_any_ground: false,
            ground_normal: Vec3::zeros(),
        }
    }
}

impl Default for GroundingReport {
    fn default() -> Self {
        Self::airborne()
    }
}

/// Result of one downward probe.
#[derive(Clone, Copy, Debug)]
pub struct GroundProbe {
    pub report: GroundingReport,
    /// Actor position after snapping (unchanged unless stable ground was found below).
    pub position: Vec3,
}

/// Length of the downward probe.
///
/// A minimal probe is enough while airborne; once the actor was grounded last step, or the slide
/// loop already touched walkable ground this step, the probe reaches at least one capsule radius
/// so convex slope transitions don't drop contact.
#[inline]
pub fn probe_distance(
    settings: &ControllerSettings,
    capsule: &CapsuleShape,
    was_grounded: bool,
    touched_ground: bool,
) -> f32 {
    let min = settings.min_ground_probe_distance;
    if was_grounded || touched_ground {
        min.max(capsule.radius())
    } else {
        min
    }
}

/// Probe for ground under `position` and snap onto it when it is walkable.
///
/// The sweep starts `ground_probe_backstep` above the actor so its origin is never embedded in the
/// surface being stood on, and travels `distance + backstep` downward. On a stable hit the actor
/// is moved down by the remaining gap (hit distance minus backstep) when that gap is positive.
pub fn probe_ground<S: ShapeSweeper + ?Sized>(
    sweeper: &S,
    capsule: &CapsuleShape,
    position: Vec3,
    distance: f32,
    settings: &ControllerSettings,
) -> GroundProbe {
    let backstep = settings.ground_probe_backstep;
    let origin = position + up() * backstep;
    let down = -Dir::new_unchecked(up());

    let Some(hit) = sweeper.sweep(capsule, origin, down, distance + backstep) else {
        return GroundProbe {
            report: GroundingReport::airborne(),
            position,
        };
    };

    let mut report = GroundingReport {
        is_stable_on_ground: false,
        found_any_ground: true,
        ground_normal: hit.normal,
    };
    let mut snapped = position;

    if surface::is_stable(&hit.normal, settings.max_stable_slope_degrees) {
        report.is_stable_on_ground = true;
        let gap = hit.distance - backstep;
        if gap > 0.0 {
            snapped.y -= gap;
        }
    }

    GroundProbe {
        report,
        position: snapped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{PlaneSweeper, slope_normal};

    fn capsule() -> CapsuleShape {
        CapsuleShape::new(0.4, 1.5).unwrap()
    }

    #[test]
    fn probe_widens_after_grounding() {
        let settings = ControllerSettings::default();
        let c = capsule();
        assert_eq!(probe_distance(&settings, &c, false, false), 0.005);
        assert_eq!(probe_distance(&settings, &c, true, false), 0.4);
        assert_eq!(probe_distance(&settings, &c, false, true), 0.4);
    }

    #[test]
    fn resting_actor_is_not_displaced() {
        let settings = ControllerSettings::default();
        let world = PlaneSweeper::floor(0.0);
        let start = Vec3::new(1.0, 0.4, -2.0);

        let probe = probe_ground(&world, &capsule(), start, 0.4, &settings);
        assert!(probe.report.is_stable_on_ground);
        assert!(probe.report.found_any_ground);
        assert!((probe.position - start).norm() < settings.collision_offset);
    }

    #[test]
    fn hovering_actor_snaps_down() {
        let settings = ControllerSettings::default();
        let world = PlaneSweeper::floor(0.0);

        let probe = probe_ground(&world, &capsule(), Vec3::new(0.0, 0.7, 0.0), 0.4, &settings);
        assert!(probe.report.is_stable_on_ground);
        assert!((probe.position.y - 0.4).abs() < 1.0e-5);
        assert!((probe.report.ground_normal - Vec3::y()).norm() < 1.0e-6);
    }

    #[test]
    fn minimal_probe_misses_ground_a_little_below() {
        let settings = ControllerSettings::default();
        let world = PlaneSweeper::floor(0.0);

        let probe = probe_ground(&world, &capsule(), Vec3::new(0.0, 0.45, 0.0), 0.005, &settings);
        assert_eq!(probe.report, GroundingReport::airborne());
        assert_eq!(probe.position, Vec3::new(0.0, 0.45, 0.0));
    }

    #[test]
    fn steep_ground_is_found_but_not_stood_on() {
        let settings = ControllerSettings::default();
        let world = PlaneSweeper::new(vec![(slope_normal(70.0), 0.0)]);
        let start = Vec3::new(0.0, 3.0, 0.0);

        let probe = probe_ground(&world, &capsule(), start, 5.0, &settings);
        assert!(probe.report.found_any_ground);
        assert!(!probe.report.is_stable_on_ground);
        assert_eq!(probe.position, start);
    }
}
