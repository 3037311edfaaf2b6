use rapier3d::parry::{
    bounding_volume::{Aabb, BoundingVolume},
    partitioning::{Bvh, BvhBuildStrategy},
    shape as pshape,
};

use super::types::{CapsuleShape, StaticShape, Transform, Vec3};

/// Slack added around a swept capsule's AABB before querying the BVH (meters).
///
/// Keeps statics that the sweep ends flush against among the candidates; the narrow
/// phase decides whether they are actually hit.
pub const BROAD_PHASE_MARGIN: f32 = 0.01;

/// Acceleration structure for broad-phase queries over immutable world statics.
///
/// Notes:
/// - Finite shapes (Cuboid, Sphere, Capsule) are stored as world-space AABBs in a BVH.
///   Planes are handled separately because they are infinite.
/// - `non_plane_indices` maps each BVH leaf back to its index in the input `statics` slice.
/// - `plane_indices` stores indices of planes in the input `statics` slice.
pub struct WorldAccel {
    /// BVH over finite static shapes (AABBs).
    pub bvh: Bvh,
    /// Indices into the input `statics` slice for the AABBs above.
    pub non_plane_indices: Vec<usize>,
    /// Indices into the input `statics` slice for planes.
    pub plane_indices: Vec<usize>,
}

impl WorldAccel {
    /// Return true if this accelerator has no non-plane entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.non_plane_indices.is_empty()
    }

    /// Number of non-plane entries (AABBs) in this accelerator.
    #[inline]
    pub fn len(&self) -> usize {
        self.non_plane_indices.len()
    }
}

/// Build a broad-phase accelerator over immutable world statics.
///
/// - Finite shapes (Cuboid, Sphere, Capsule) get a world-space AABB and are indexed.
/// - Infinite shapes (Plane) are kept in `plane_indices` and must be tested on every query.
pub fn build_world_accel(statics: &[StaticShape]) -> WorldAccel {
    let mut aabbs: Vec<Aabb> = Vec::new();
    let mut non_plane_indices: Vec<usize> = Vec::new();
    let mut plane_indices: Vec<usize> = Vec::new();

    for (i, s) in statics.iter().enumerate() {
        let aabb = match *s {
            StaticShape::Plane { .. } => {
                plane_indices.push(i);
                continue;
            }
            StaticShape::Cuboid {
                half_extents,
                transform,
            } => pshape::Cuboid::new(half_extents).aabb(&transform.iso()),
            StaticShape::Sphere { radius, transform } => {
                // Rotation is irrelevant for a ball.
                let iso = Transform::from_translation(transform.translation).iso();
                pshape::Ball::new(radius).aabb(&iso)
            }
            StaticShape::Capsule {
                radius,
                half_height,
                transform,
            } => pshape::Capsule::new_y(half_height, radius).aabb(&transform.iso()),
        };
        aabbs.push(aabb);
        non_plane_indices.push(i);
    }

    WorldAccel {
        bvh: Bvh::from_leaves(BvhBuildStrategy::Binned, &aabbs),
        non_plane_indices,
        plane_indices,
    }
}

/// Compute a swept AABB for a capsule anchored at `anchor` moving by `translation`.
///
/// The resulting AABB is inflated by `margin` to conservatively include near misses.
pub fn swept_capsule_aabb(
    capsule: &CapsuleShape,
    anchor: Vec3,
    translation: Vec3,
    margin: f32,
) -> Aabb {
    let shape = capsule.to_parry();

    let aabb_start = shape.aabb(&capsule.iso(anchor));
    let aabb_end = shape.aabb(&capsule.iso(anchor + translation));

    let swept = aabb_start.merged(&aabb_end);
    if margin > 0.0 {
        swept.loosened(margin)
    } else {
        swept
    }
}

/// Query candidate static indices whose AABB intersects `swept`.
///
/// Returns indices referencing the input `statics` slice (not the local AABB array).
pub fn query_candidates(accel: &WorldAccel, swept: &Aabb) -> Vec<usize> {
    accel
        .bvh
        .intersect_aabb(swept)
        .map(|leaf_idx| accel.non_plane_indices[leaf_idx as usize])
        .collect()
}
