/*!
Core collision types and math aliases shared by the collision submodules.

This module intentionally contains no algorithms beyond tiny shape helpers. It
defines the data types exchanged between:
- the sweep capability (`ShapeSweeper`) and its backends
- broad_phase (static world acceleration structures and candidate queries)
- narrow_phase (parry3d time-of-impact queries)
- the ground prober and the collide-and-slide solver

Conventions
- World up is +Y.
- An actor position is the centre of the capsule's lower hemisphere ("foot sphere").
  The capsule's geometric centre sits `half_segment()` above it. A capsule resting on
  the plane `y = 0` therefore has its position at `y = radius`.
*/

use nalgebra as na;
use rapier3d::parry::shape as pshape;

use crate::error::ControllerError;

/// Common math aliases for clarity and consistency.
pub type Vec3 = na::Vector3<f32>;
pub type Quat = na::UnitQuaternion<f32>;
pub type Iso = na::Isometry3<f32>;
/// Unit-length direction.
pub type Dir = na::UnitVector3<f32>;

/// World up axis.
#[inline]
pub fn up() -> Vec3 {
    Vec3::y()
}

/// A rigid transform (isometry) in world space.
#[derive(Clone, Copy, Debug)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Transform {
    #[inline]
    pub fn new(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    #[inline]
    pub fn from_translation(translation: Vec3) -> Self {
        Self::new(translation, Quat::identity())
    }

    /// Convert to nalgebra `Isometry3` for use with parry3d narrow-phase queries.
    #[inline]
    pub fn iso(&self) -> Iso {
        Iso::from_parts(
            na::Translation3::new(self.translation.x, self.translation.y, self.translation.z),
            self.rotation,
        )
    }
}

/// Static collision shapes supported by [`super::StaticWorld`].
///
/// - Plane: infinite plane in world-space represented by its normal and offset (dist)
///          satisfying: normal ⋅ x = dist. Solid below, walkable side along `normal`.
/// - Cuboid: oriented box with half-extents in local space, placed by `transform`.
#[derive(Clone, Copy, Debug)]
pub enum StaticShape {
    Plane {
        /// World-space unit normal of the plane.
        normal: Vec3,
        /// Plane offset along the normal, i.e., normal ⋅ x = dist.
        dist: f32,
    },
    Cuboid {
        /// Local-space half-extents (hx, hy, hz).
        half_extents: Vec3,
        /// World-space pose of the cuboid.
        transform: Transform,
    },
    Sphere {
        /// Radius of the sphere in meters.
        radius: f32,
        /// World-space pose (translation used; rotation ignored).
        transform: Transform,
    },
    Capsule {
        /// Radius of the spherical caps and cylinder.
        radius: f32,
        /// Half of the cylinder length along the local +Y axis.
        half_height: f32,
        /// World-space pose of the capsule.
        transform: Transform,
    },
}

/// Y-aligned capsule owned by a controller for its whole lifetime.
///
/// `height` is the full tip-to-tip height, so the cylinder section is
/// `height - 2 * radius` long.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CapsuleShape {
    radius: f32,
    height: f32,
}

impl CapsuleShape {
    pub fn new(radius: f32, height: f32) -> Result<Self, ControllerError> {
        let valid =
            radius.is_finite() && height.is_finite() && radius > 0.0 && height >= 2.0 * radius;
        if !valid {
            return Err(ControllerError::InvalidCapsule { radius, height });
        }
        Ok(Self { radius, height })
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Half-length of the cylinder section between the two cap centres.
    #[inline]
    pub fn half_segment(&self) -> f32 {
        self.height * 0.5 - self.radius
    }

    /// Geometric centre of the capsule whose foot sphere is centred at `anchor`.
    #[inline]
    pub fn center(&self, anchor: Vec3) -> Vec3 {
        anchor + up() * self.half_segment()
    }

    /// Pose handed to parry/rapier shape casts.
    #[inline]
    pub fn iso(&self, anchor: Vec3) -> Iso {
        let c = self.center(anchor);
        Iso::translation(c.x, c.y, c.z)
    }

    /// Farthest point of the capsule along `dir` (unit), for a capsule anchored at `anchor`.
    pub fn support_point(&self, anchor: Vec3, dir: &Vec3) -> Vec3 {
        let cap_center = if dir.y >= 0.0 {
            anchor + up() * (2.0 * self.half_segment())
        } else {
            anchor
        };
        cap_center + dir * self.radius
    }

    #[inline]
    pub(crate) fn to_parry(self) -> pshape::Capsule {
        pshape::Capsule::new_y(self.half_segment(), self.radius)
    }
}

/// First contact reported by a shape sweep.
///
/// Produced per query and never stored beyond the call that consumes it.
#[derive(Clone, Copy, Debug)]
pub struct SweepHit {
    /// Travel distance along the sweep direction before contact (meters).
    pub distance: f32,
    /// Unit surface normal, pointing from the obstacle toward the capsule.
    pub normal: Vec3,
    /// World-space contact point on the capsule surface.
    pub point: Vec3,
}
