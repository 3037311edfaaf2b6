use nalgebra as na;
use rapier3d::parry::{
    query::{self, ShapeCastOptions},
    shape as pshape,
};

use super::types::{Iso, StaticShape, Vec3};

/// Raw narrow-phase contact: travel distance and the surface normal (pointing toward the capsule).
#[derive(Clone, Copy, Debug)]
pub struct CastHit {
    pub distance: f32,
    pub normal: Vec3,
}

/// Cast a moving Y-aligned capsule against a single static shape and return the earliest hit (if any).
///
/// - `capsule_iso`: the capsule's starting isometry in world space (geometric centre).
/// - `capsule`: the capsule shape (Y-aligned) being swept.
/// - `dir`: unit world-space direction of travel.
/// - `max_distance`: how far along `dir` to look (meters).
/// - `shape`: the static shape to test against.
///
/// Because `dir` is unit length, parry's time of impact is directly a travel distance.
pub fn cast_capsule_against_static(
    capsule_iso: Iso,
    capsule: &pshape::Capsule,
    dir: Vec3,
    max_distance: f32,
    shape: &StaticShape,
) -> Option<CastHit> {
    match *shape {
        StaticShape::Plane { normal, dist } => {
            // Plane: represent as a parry HalfSpace with world normal, positioned at normal * dist.
            // Plane equation in world space: normal ⋅ x = dist
            let unit_n = na::Unit::new_normalize(normal);
            let plane = pshape::HalfSpace { normal: unit_n };
            let origin = unit_n.into_inner() * dist;
            let plane_iso = Iso::translation(origin.x, origin.y, origin.z);
            cast_against(capsule_iso, capsule, dir, max_distance, plane_iso, &plane)
        }
        StaticShape::Cuboid {
            half_extents,
            transform,
        } => {
            let cuboid = pshape::Cuboid::new(half_extents);
            cast_against(capsule_iso, capsule, dir, max_distance, transform.iso(), &cuboid)
        }
        StaticShape::Sphere { radius, transform } => {
            // Treat as a Ball; rotation is irrelevant.
            let ball = pshape::Ball::new(radius);
            let ball_iso = Iso::translation(
                transform.translation.x,
                transform.translation.y,
                transform.translation.z,
            );
            cast_against(capsule_iso, capsule, dir, max_distance, ball_iso, &ball)
        }
        StaticShape::Capsule {
            radius,
            half_height,
            transform,
        } => {
            // Static capsule vs moving capsule.
            let static_capsule = pshape::Capsule::new_y(half_height, radius);
            cast_against(
                capsule_iso,
                capsule,
                dir,
                max_distance,
                transform.iso(),
                &static_capsule,
            )
        }
    }
}

/// One parry shape cast of the capsule against a static (zero velocity) shape.
fn cast_against(
    capsule_iso: Iso,
    capsule: &pshape::Capsule,
    dir: Vec3,
    max_distance: f32,
    other_iso: Iso,
    other: &dyn pshape::Shape,
) -> Option<CastHit> {
    // Initial overlaps the capsule is moving out of (or along) are not hits; this is what lets
    // a snapped actor slide along the ground it rests on.
    let mut opts = ShapeCastOptions::with_max_time_of_impact(max_distance);
    opts.stop_at_penetration = false;

    let hit = query::cast_shapes(
        &capsule_iso,
        &dir,
        capsule as &dyn pshape::Shape,
        &other_iso,
        &na::Vector3::zeros(),
        other,
        opts,
    )
    .ok()??;

    // normal1 is the outward normal of the moving capsule (capsule rotation is identity);
    // the surface normal faces the other way.
    let normal = -hit.normal1.into_inner();
    Some(CastHit {
        distance: hit.time_of_impact,
        normal,
    })
}

/// Iterate over a list of static shapes and return the earliest capsule hit (if any).
///
/// Hits the capsule is not moving into are skipped before the minimum is taken.
pub fn earliest_hit_capsule_vs_statics<'a>(
    capsule_iso: Iso,
    capsule: &pshape::Capsule,
    dir: Vec3,
    max_distance: f32,
    statics: impl IntoIterator<Item = &'a StaticShape>,
) -> Option<CastHit> {
    let mut best: Option<CastHit> = None;
    for s in statics {
        let Some(hit) = cast_capsule_against_static(capsule_iso, capsule, dir, max_distance, s)
        else {
            continue;
        };
        if hit.normal.dot(&dir) >= -super::sweep::APPROACH_EPS {
            continue;
        }
        if best.as_ref().is_none_or(|b| hit.distance < b.distance) {
            best = Some(hit);
        }
    }
    best
}
