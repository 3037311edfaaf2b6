use rapier3d::{
    na::{Translation3, UnitQuaternion},
    prelude::*,
};

/// Canonical, schema-agnostic definition of an immutable world collider.
///
/// Game data (level files, editor output, tests) maps to this type, then
/// [`crate::rapier_world::RapierQueryWorld::build`] turns a list of them into a query world.
///
/// Conventions
/// - Units are meters.
/// - Rotation is a unit quaternion.
/// - For planes, we use a pose-derived normal: `normal = rotation * +Y`,
///   and compute `dist = dot(normal, translation) + offset_along_normal`.
#[derive(Clone, Debug)]
pub struct WorldStaticDef {
    /// Stable unique identifier used to ensure deterministic insertion order.
    pub id: u32,
    /// World-space translation.
    pub translation: Vector<f32>,
    /// World-space rotation (unit quaternion).
    pub rotation: UnitQuaternion<f32>,
    /// Collider shape parameters.
    pub shape: ColliderShapeDef,
    /// Trigger volume: present in the scene, never reported by sweeps.
    pub sensor: bool,
}

impl WorldStaticDef {
    /// Solid collider at `translation` with identity rotation.
    pub fn new(id: u32, translation: Vector<f32>, shape: ColliderShapeDef) -> Self {
        Self {
            id,
            translation,
            rotation: UnitQuaternion::identity(),
            shape,
            sensor: false,
        }
    }

    pub fn with_rotation(mut self, rotation: UnitQuaternion<f32>) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn as_sensor(mut self) -> Self {
        self.sensor = true;
        self
    }
}

/// Supported static collider shapes.
///
/// Keep this intentionally small and deterministic. Extend as needed.
#[derive(Clone, Debug)]
pub enum ColliderShapeDef {
    /// Infinite plane (half-space).
    ///
    /// This is represented by an offset along the plane normal.
    /// The plane normal is derived from the pose as `rotation * +Y`.
    ///
    /// Notes on "plane size" and rotation
    /// - In Rapier, a plane/half-space is infinite. Any "X/Z size" you see in a renderer is purely a
    ///   rendering/mesh concern, not collision.
    /// - Rotation is fully supported: the half-space normal is derived from the pose.
    Plane {
        /// Offset along the plane normal (meters).
        offset_along_normal: f32,
    },

    /// Oriented cuboid with given half-extents (meters).
    Cuboid { half_extents: Vector<f32> },

    /// Sphere/ball (meters).
    Sphere { radius: f32 },

    /// Y-aligned capsule (meters).
    CapsuleY { radius: f32, half_height: f32 },

    /// Y-aligned cylinder (meters).
    CylinderY { radius: f32, half_height: f32 },

    /// Rounded cuboid (meters).
    ///
    /// `border_radius` rounds all edges/corners.
    RoundCuboid {
        half_extents: Vector<f32>,
        border_radius: f32,
    },
}

/// Pose of the fixed rigid body a collider built by [`collider_from_def`] is attached to.
///
/// Planes are already expressed in world space, so their parent stays at the origin.
/// Every other shape takes the def's full pose from its parent.
pub fn parent_pose(def: &WorldStaticDef) -> Isometry<f32> {
    match def.shape {
        ColliderShapeDef::Plane { .. } => Isometry::identity(),
        _ => Isometry::from_parts(Translation3::from(def.translation), def.rotation),
    }
}

/// Build a Rapier collider from a `WorldStaticDef`.
///
/// The collider is local to the rigid body posed by [`parent_pose`], so finite shapes are
/// created with an identity local transform.
pub fn collider_from_def(def: &WorldStaticDef) -> Collider {
    let builder = match &def.shape {
        ColliderShapeDef::Plane {
            offset_along_normal,
        } => {
            // Derive world-space plane normal from pose rotation: n = R * +Y.
            // Then compute plane dist: n ⋅ x = dist, where x is any point on the plane.
            // With pose translation `t`, dist = n ⋅ t + offset.
            let n = def.rotation * Vector::y();
            let dist = n.dot(&def.translation) + *offset_along_normal;
            let unit_n = UnitVector::new_normalize(n);

            // Represent the plane `unit_n ⋅ x = dist` by placing the half-space at `unit_n * dist`.
            // The normal is already in world space and the parent sits at the origin.
            ColliderBuilder::new(SharedShape::new(HalfSpace::new(unit_n)))
                .translation(unit_n.into_inner() * dist)
        }

        ColliderShapeDef::Cuboid { half_extents } => {
            ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
        }

        ColliderShapeDef::Sphere { radius } => ColliderBuilder::ball(*radius),

        ColliderShapeDef::CapsuleY {
            radius,
            half_height,
        } => ColliderBuilder::capsule_y(*half_height, *radius),

        ColliderShapeDef::CylinderY {
            radius,
            half_height,
        } => ColliderBuilder::cylinder(*half_height, *radius),

        ColliderShapeDef::RoundCuboid {
            half_extents,
            border_radius,
        } => ColliderBuilder::round_cuboid(
            half_extents.x,
            half_extents.y,
            half_extents.z,
            *border_radius,
        ),
    };

    builder.sensor(def.sensor).build()
}
