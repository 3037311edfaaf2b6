use std::sync::Arc;

use super::types::{CapsuleShape, Dir, SweepHit, Vec3};

/// The one collision primitive the controller consumes: sweep a capsule and report the first hit.
///
/// Contract
/// - `origin` is the actor anchor (foot sphere centre, see [`CapsuleShape::center`]).
/// - `direction` is unit length; the returned `distance` lies in `[0, max_distance]`.
/// - The reported normal is unit length and points from the obstacle toward the capsule.
/// - Surfaces the capsule is not moving into (`normal · direction >= 0`) are ignored, so an actor
///   resting on or sliding along a surface never gets a zero-distance hit from it.
/// - The actor's own collider and trigger volumes never collide.
/// - When several surfaces are hit at the same distance, which one is reported is unspecified.
///
/// Queries are read-only against a static world.
pub trait ShapeSweeper {
    fn sweep(
        &self,
        capsule: &CapsuleShape,
        origin: Vec3,
        direction: Dir,
        max_distance: f32,
    ) -> Option<SweepHit>;
}

impl<S: ShapeSweeper + ?Sized> ShapeSweeper for &S {
    #[inline]
    fn sweep(
        &self,
        capsule: &CapsuleShape,
        origin: Vec3,
        direction: Dir,
        max_distance: f32,
    ) -> Option<SweepHit> {
        (**self).sweep(capsule, origin, direction, max_distance)
    }
}

impl<S: ShapeSweeper + ?Sized> ShapeSweeper for Box<S> {
    #[inline]
    fn sweep(
        &self,
        capsule: &CapsuleShape,
        origin: Vec3,
        direction: Dir,
        max_distance: f32,
    ) -> Option<SweepHit> {
        (**self).sweep(capsule, origin, direction, max_distance)
    }
}

impl<S: ShapeSweeper + ?Sized> ShapeSweeper for Arc<S> {
    #[inline]
    fn sweep(
        &self,
        capsule: &CapsuleShape,
        origin: Vec3,
        direction: Dir,
        max_distance: f32,
    ) -> Option<SweepHit> {
        (**self).sweep(capsule, origin, direction, max_distance)
    }
}

/// Tolerance on `normal · direction` below which a surface counts as "being moved into".
pub(crate) const APPROACH_EPS: f32 = 1.0e-4;

/// Shared post-processing for backend hits: keep only surfaces the sweep moves into.
#[inline]
pub(crate) fn approaching(normal: &Vec3, direction: &Dir) -> bool {
    normal.dot(&direction.into_inner()) < -APPROACH_EPS
}
