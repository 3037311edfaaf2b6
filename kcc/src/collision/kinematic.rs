use super::{
    ground::GroundingReport,
    settings::{ControllerSettings, MIN_MOVE_SQ},
    surface::is_stable,
    sweep::ShapeSweeper,
    types::{CapsuleShape, Dir, Vec3},
    velocity::project_velocity,
};

/// Parameters for one collide-and-slide pass.
#[derive(Clone, Copy, Debug)]
pub struct SlideRequest {
    /// Starting actor position (foot sphere centre).
    pub start_pos: Vec3,
    /// Desired world-space velocity for this step (m/s).
    pub velocity: Vec3,
    /// Step duration (seconds).
    pub dt: f32,
}

/// Result of one collide-and-slide pass.
#[derive(Clone, Copy, Debug)]
pub struct SlideResult {
    /// Final actor position.
    pub end_pos: Vec3,
    /// Velocity after the last deflection (equals the input when nothing was hit).
    pub velocity: Vec3,
    /// The loop struck a walkable surface somewhere along the way.
    pub found_ground: bool,
    /// Number of sweeps issued.
    pub iterations: u32,
    /// Travel distance left over when the iteration cap was reached (dropped, never carried).
    pub discarded_distance: f32,
}

/// Sweep → advance → deflect, up to `settings.max_iterations` times.
///
/// Algorithm:
/// - Sweep the capsule along the current velocity for the distance it covers in the time left.
/// - No hit: move the whole way and stop.
/// - Hit: advance to the contact minus `collision_offset`, charge the travelled fraction against
///   the time left, and deflect the velocity with [`project_velocity`] using `ground` (the report
///   from before the loop). The deflected velocity then runs for the remaining time only.
/// - Whatever distance is left when the cap is reached is discarded.
pub fn collide_and_slide<S: ShapeSweeper + ?Sized>(
    sweeper: &S,
    capsule: &CapsuleShape,
    ground: &GroundingReport,
    settings: &ControllerSettings,
    req: SlideRequest,
) -> SlideResult {
    let mut pos = req.start_pos;
    let mut velocity = req.velocity;
    let mut found_ground = false;
    let mut iterations = 0;

    let mut remaining_time = req.dt.max(0.0);
    let mut remaining_distance = velocity.norm() * remaining_time;
    // Falls back to the last usable heading when a deflection cancels the velocity.
    let mut direction = Dir::try_new(velocity, MIN_MOVE_SQ.sqrt());

    while iterations < settings.max_iterations {
        if remaining_distance <= 0.0 {
            break;
        }
        let Some(dir) = direction else {
            break;
        };

        iterations += 1;
        let Some(hit) = sweeper.sweep(capsule, pos, dir, remaining_distance) else {
            // Nothing in the way: consume the rest of the step.
            pos += dir.into_inner() * remaining_distance;
            remaining_distance = 0.0;
            break;
        };

        let advance = (hit.distance - settings.collision_offset).max(0.0);
        pos += dir.into_inner() * advance;

        let travelled = hit.distance.min(remaining_distance);
        remaining_time *= 1.0 - travelled / remaining_distance;

        if is_stable(&hit.normal, settings.max_stable_slope_degrees) {
            found_ground = true;
        }

        velocity = project_velocity(
            velocity,
            &hit.normal,
            ground,
            settings.max_stable_slope_degrees,
        );
        remaining_distance = velocity.norm() * remaining_time;
        if let Some(deflected) = Dir::try_new(velocity, MIN_MOVE_SQ.sqrt()) {
            direction = Some(deflected);
        }
    }

    if remaining_distance > 0.0 && iterations >= settings.max_iterations {
        log::trace!(
            "slide iteration cap ({}) reached, dropping {:.4}m",
            settings.max_iterations,
            remaining_distance
        );
    }

    SlideResult {
        end_pos: pos,
        velocity,
        found_ground,
        iterations,
        discarded_distance: remaining_distance.max(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{PlaneSweeper, slope_normal};

    const DT: f32 = 1.0 / 60.0;

    fn capsule() -> CapsuleShape {
        CapsuleShape::new(0.4, 1.5).unwrap()
    }

    /// Vertical wall whose face is at x = `face_x`, facing -X.
    fn wall_at(face_x: f32) -> (Vec3, f32) {
        (-Vec3::x(), -face_x)
    }

    #[test]
    fn zero_velocity_issues_no_sweeps() {
        let world = PlaneSweeper::floor(0.0);
        let start = Vec3::new(1.0, 2.0, 3.0);
        let out = collide_and_slide(
            &world,
            &capsule(),
            &GroundingReport::airborne(),
            &ControllerSettings::default(),
            SlideRequest {
                start_pos: start,
                velocity: Vec3::zeros(),
                dt: DT,
            },
        );
        assert_eq!(out.end_pos, start);
        assert_eq!(out.iterations, 0);
        assert_eq!(world.calls(), 0);
    }

    #[test]
    fn free_motion_consumes_the_whole_step() {
        let world = PlaneSweeper::empty();
        let out = collide_and_slide(
            &world,
            &capsule(),
            &GroundingReport::airborne(),
            &ControllerSettings::default(),
            SlideRequest {
                start_pos: Vec3::zeros(),
                velocity: Vec3::new(6.0, 0.0, 0.0),
                dt: DT,
            },
        );
        assert!((out.end_pos.x - 0.1).abs() < 1.0e-6);
        assert_eq!(out.iterations, 1);
        assert!(!out.found_ground);
    }

    #[test]
    fn wall_stop_keeps_collision_offset() {
        let settings = ControllerSettings::default();
        let world = PlaneSweeper::new(vec![wall_at(2.0)]);

        for speed in [120.0_f32, 200.0, 600.0] {
            let out = collide_and_slide(
                &world,
                &capsule(),
                &GroundingReport::airborne(),
                &settings,
                SlideRequest {
                    start_pos: Vec3::zeros(),
                    velocity: Vec3::new(speed, 0.0, 0.0),
                    dt: DT,
                },
            );
            // Hit distance is 2.0 - radius.
            let expected = 1.6 - settings.collision_offset;
            assert!(
                (out.end_pos.x - expected).abs() < 1.0e-5,
                "{speed}: {:?}",
                out.end_pos
            );
            assert!(out.end_pos.x + capsule().radius() <= 2.0);
            assert!(out.velocity.norm() < 1.0e-4);
        }
    }

    #[test]
    fn oblique_wall_hit_slides_for_remaining_time() {
        let settings = ControllerSettings::default();
        let world = PlaneSweeper::new(vec![wall_at(1.0)]);
        // 60 m/s along +X and +Z for one step covers 1.0m in each axis; the wall is 0.6m away.
        let out = collide_and_slide(
            &world,
            &capsule(),
            &GroundingReport::airborne(),
            &settings,
            SlideRequest {
                start_pos: Vec3::zeros(),
                velocity: Vec3::new(60.0, 0.0, 60.0),
                dt: DT,
            },
        );

        let expected_x = 0.6 - settings.collision_offset * 0.5_f32.sqrt();
        assert!((out.end_pos.x - expected_x).abs() < 1.0e-4);
        // 60% of the step spent reaching the wall, the remaining 40% sliding along Z.
        assert!((out.end_pos.z - 1.0).abs() < 0.02, "{:?}", out.end_pos);
        assert!(out.velocity.x.abs() < 1.0e-4);
        assert!((out.velocity.z - 60.0).abs() < 1.0e-3);
        assert_eq!(out.iterations, 2);
    }

    #[test]
    fn grounded_uphill_walk_keeps_speed_along_slope() {
        let settings = ControllerSettings::default();
        let n = slope_normal(30.0);
        let world = PlaneSweeper::new(vec![(Vec3::y(), 0.0), (n, 0.0)]);
        let ground = GroundingReport {
            is_stable_on_ground: true,
            found_any_ground: true,
            ground_normal: Vec3::y(),
        };

        // Standing on flat ground a little before the foot of the ramp (which starts at x = 0).
        let out = collide_and_slide(
            &world,
            &capsule(),
            &ground,
            &settings,
            SlideRequest {
                start_pos: Vec3::new(-0.6, 0.4, 0.0),
                velocity: Vec3::new(30.0, 0.0, 0.0),
                dt: DT,
            },
        );

        assert!(out.found_ground);
        assert!((out.velocity.norm() - 30.0).abs() < 1.0e-3);
        assert!(out.velocity.y > 0.0);
        assert!(out.end_pos.y > 0.4);
    }

    #[test]
    fn landing_in_flight_drops_vertical_velocity() {
        let settings = ControllerSettings::default();
        let world = PlaneSweeper::floor(0.0);
        let out = collide_and_slide(
            &world,
            &capsule(),
            &GroundingReport::airborne(),
            &settings,
            SlideRequest {
                start_pos: Vec3::new(0.0, 0.6, 0.0),
                velocity: Vec3::new(0.0, -50.0, 0.0),
                dt: DT,
            },
        );
        assert!(out.found_ground);
        assert_eq!(out.velocity.y, 0.0);
        assert!((out.end_pos.y - (0.4 + settings.collision_offset)).abs() < 1.0e-5);
    }

    #[test]
    fn iteration_cap_drops_leftover_distance() {
        let settings = ControllerSettings {
            max_iterations: 1,
            ..ControllerSettings::default()
        };
        let world = PlaneSweeper::new(vec![wall_at(1.0)]);
        let out = collide_and_slide(
            &world,
            &capsule(),
            &GroundingReport::airborne(),
            &settings,
            SlideRequest {
                start_pos: Vec3::zeros(),
                velocity: Vec3::new(60.0, 0.0, 60.0),
                dt: DT,
            },
        );
        assert_eq!(out.iterations, 1);
        assert!(out.discarded_distance > 0.0);
        // Only the first leg happened.
        assert!(out.end_pos.z < 0.7);
    }
}
