//! Pure surface helpers: walkability and tangent re-expression.

use super::{
    settings::MIN_MOVE_SQ,
    types::{Vec3, up},
};

/// Below this `|direction × up|` the movement is treated as vertical.
const VERTICAL_EPS: f32 = 1.0e-4;

/// Is a surface with unit normal `normal` walkable?
///
/// The angle between world up and `normal` must not exceed `max_slope_degrees`.
/// `normal` must be unit length.
#[inline]
pub fn is_stable(normal: &Vec3, max_slope_degrees: f32) -> bool {
    let cos = up().dot(normal).clamp(-1.0, 1.0);
    cos.acos().to_degrees() <= max_slope_degrees
}

/// Unit vector tangent to the surface with `normal`, keeping the horizontal heading of `direction`.
///
/// `right = direction × up` gives the axis the heading turns around; `normal × right` is then the
/// in-surface direction that climbs/descends along that heading. When `direction` is (nearly)
/// vertical that construction is singular, so the normal component is removed instead.
/// Returns zero when no tangent exists (e.g. moving straight into a surface).
pub fn tangent_along(direction: &Vec3, normal: &Vec3) -> Vec3 {
    let right = direction.cross(&up());
    if right.norm() < VERTICAL_EPS {
        let planar = direction - normal * direction.dot(normal);
        return planar.try_normalize(MIN_MOVE_SQ.sqrt()).unwrap_or_else(Vec3::zeros);
    }
    normal
        .cross(&right)
        .try_normalize(MIN_MOVE_SQ.sqrt())
        .unwrap_or_else(Vec3::zeros)
}
