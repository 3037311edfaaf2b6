use super::{
    ground::GroundingReport,
    settings::MIN_MOVE_SQ,
    surface::{is_stable, tangent_along},
    types::{Vec3, up},
};

/// Which of the four collision responses applies to a hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitResponse {
    /// Grounded, hit surface walkable.
    SlopeWalk,
    /// Grounded, hit surface too steep.
    GroundedWall,
    /// Airborne, hit surface walkable.
    Landing,
    /// Airborne, hit surface too steep.
    AirborneWall,
}

impl HitResponse {
    #[inline]
    pub fn classify(grounded: bool, hit_stable: bool) -> Self {
        match (grounded, hit_stable) {
            (true, true) => Self::SlopeWalk,
            (true, false) => Self::GroundedWall,
            (false, true) => Self::Landing,
            (false, false) => Self::AirborneWall,
        }
    }
}

/// Deflect `velocity` after hitting a surface with unit normal `hit_normal`.
///
/// `ground` is the grounding report taken before the slide loop started; it is not updated
/// while the loop runs.
pub fn project_velocity(
    velocity: Vec3,
    hit_normal: &Vec3,
    ground: &GroundingReport,
    max_slope_degrees: f32,
) -> Vec3 {
    let hit_stable = is_stable(hit_normal, max_slope_degrees);
    match HitResponse::classify(ground.is_stable_on_ground, hit_stable) {
        HitResponse::SlopeWalk => tangent_along(&velocity, hit_normal) * velocity.norm(),
        HitResponse::GroundedWall => {
            slide_along_obstruction(velocity, &ground.ground_normal, hit_normal)
        }
        HitResponse::Landing => land(velocity, hit_normal),
        HitResponse::AirborneWall => velocity - hit_normal * velocity.dot(hit_normal),
    }
}

/// Drop the vertical part of `velocity` and lay the horizontal part onto the landed surface.
///
/// Horizontal speed is preserved.
pub fn land(velocity: Vec3, ground_normal: &Vec3) -> Vec3 {
    let horizontal = velocity - up() * velocity.dot(&up());
    let speed = horizontal.norm();
    if speed * speed <= MIN_MOVE_SQ {
        return Vec3::zeros();
    }
    tangent_along(&horizontal, ground_normal) * speed
}

/// Grounded actor against an unwalkable surface.
///
/// A plain tangent projection onto the wall would turn part of the motion upward and launch the
/// actor when the ground it stands on is sloped. Instead the obstruction is flattened onto the
/// ground plane: `ground × wall` is the crease line, and `crease × ground` is the obstruction
/// normal lying in the ground plane. Motion stays tangent to the ground and loses only the part
/// that drives into the obstruction.
fn slide_along_obstruction(velocity: Vec3, ground_normal: &Vec3, wall_normal: &Vec3) -> Vec3 {
    let crease = ground_normal.cross(wall_normal);
    let Some(obstruction) = crease.cross(ground_normal).try_normalize(MIN_MOVE_SQ.sqrt()) else {
        // Wall parallel to the ground plane (e.g. a ceiling straight overhead).
        return velocity - wall_normal * velocity.dot(wall_normal);
    };

    let mut projected = tangent_along(&velocity, ground_normal) * velocity.norm();
    let into_obstruction = projected.dot(&obstruction);
    if into_obstruction < 0.0 {
        projected -= obstruction * into_obstruction;
    }
    let into_wall = projected.dot(wall_normal);
    if into_wall < 0.0 {
        projected -= wall_normal * into_wall;
    }
    projected
}
