/*!
Collision root module.

Everything the character controller needs to move a capsule through a static
world. The only primitive consumed by the motion code is [`ShapeSweeper`];
the rest is split for clarity:

- types:        shared data types (Transform, StaticShape, CapsuleShape, SweepHit)
- settings:     controller tuning and tolerance constants
- sweep:        the sweep capability and its blanket impls
- broad:        broad-phase helpers (swept AABBs, candidate queries)
- narrow_phase: thin wrappers over parry3d shape casts
- world:        `StaticWorld`, a parry-only sweep backend
- surface:      walkability test and tangent projection
- ground:       downward probe, snap and grounding report
- velocity:     the four collision responses
- kinematic:    collide-and-slide loop
*/

pub mod broad;
pub mod ground;
pub mod kinematic;
pub mod narrow_phase;
pub mod settings;
pub mod surface;
pub mod sweep;
pub mod types;
pub mod velocity;
pub mod world;

// Re-export commonly used types and functions.
pub use ground::{GroundProbe, GroundingReport, probe_distance, probe_ground};
pub use kinematic::{SlideRequest, SlideResult, collide_and_slide};
pub use settings::ControllerSettings;
pub use surface::{is_stable, tangent_along};
pub use sweep::ShapeSweeper;
pub use types::{CapsuleShape, Dir, Quat, StaticShape, SweepHit, Transform, Vec3};
pub use velocity::{HitResponse, project_velocity};
pub use world::StaticWorld;

/// Convenience: build a `StaticShape::Plane` from a world-space plane pose:
/// - normal = rotation * +Y
/// - dist = dot(normal, translation) + optional offset
#[inline]
pub fn plane_from_pose(rotation: Quat, translation: Vec3, offset_along_normal: f32) -> StaticShape {
    let normal = rotation * Vec3::y();
    let dist = normal.dot(&translation) + offset_along_normal;
    StaticShape::Plane { normal, dist }
}

/// Convenience: build a `StaticShape::Cuboid` with given half extents and pose.
#[inline]
pub fn cuboid_from_pose(half_extents: Vec3, translation: Vec3, rotation: Quat) -> StaticShape {
    StaticShape::Cuboid {
        half_extents,
        transform: Transform::new(translation, rotation),
    }
}
