//! Rapier-based query world for immutable/static world geometry.
//!
//! Builds an in-memory Rapier scene from a set of static collider definitions and exposes
//! it to the controller as a [`ShapeSweeper`].
//!
//! Design goals
//! - Deterministic: given the same inputs (sorted by `id`), build identical in-memory sets.
//! - Query-focused: every static hangs off a fixed rigid body; the world is stepped once at
//!   build time so the broad phase is populated, and never simulated afterwards.
//! - Immutable world: this builder assumes statics do not move after construction.

use rapier3d::{
    parry::query::ShapeCastOptions,
    prelude::{
        BroadPhaseBvh, ColliderHandle, ColliderSet, CollisionPipeline, Isometry, NarrowPhase,
        QueryFilter, QueryPipeline, RigidBodyBuilder, RigidBodySet,
    },
};

use crate::{
    collision::{CapsuleShape, Dir, ShapeSweeper, SweepHit, Vec3, sweep},
    rapier::{WorldStaticDef, collider_from_def, parent_pose},
};

/// In-memory Rapier structures needed for scene queries against a static world.
///
/// This stores:
/// - `RigidBodySet`/`ColliderSet` containing the static world geometry, one fixed body per
///   collider so that `QueryFilter::only_fixed()` admits all of it.
/// - `NarrowPhase` and `BroadPhaseBvh` used to create a borrowed `QueryPipeline`.
///
/// For immutable statics, these can be built once at startup and reused.
pub struct RapierQueryWorld {
    bodies: RigidBodySet,
    colliders: ColliderSet,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
    /// Collider owned by the actor itself, if it lives in the same scene.
    excluded: Option<ColliderHandle>,
}

impl RapierQueryWorld {
    /// Build a query world from a list of static collider definitions.
    ///
    /// Determinism
    /// - The input is sorted by `id` before insertion.
    /// - Any NaN/invalid values should be filtered/validated by the caller.
    pub fn build(mut defs: Vec<WorldStaticDef>) -> Self {
        // Ensure deterministic insertion order.
        defs.sort_by_key(|d| d.id);

        let mut bodies = RigidBodySet::new();
        let mut colliders = ColliderSet::new();
        for def in &defs {
            let body = RigidBodyBuilder::fixed().pose(parent_pose(def)).build();
            let body_handle = bodies.insert(body);
            colliders.insert_with_parent(collider_from_def(def), body_handle, &mut bodies);
        }

        // One collision step with no time advance populates the broad phase and the collider
        // world poses from their parent bodies.
        let mut broad_phase = BroadPhaseBvh::new();
        let mut narrow_phase = NarrowPhase::new();
        let mut collision_pipeline = CollisionPipeline::new();
        let hooks = ();
        let events = ();
        collision_pipeline.step(
            0.0,
            &mut broad_phase,
            &mut narrow_phase,
            &mut bodies,
            &mut colliders,
            &hooks,
            &events,
        );

        log::debug!("built rapier query world with {} statics", colliders.len());

        Self {
            bodies,
            colliders,
            broad_phase,
            narrow_phase,
            excluded: None,
        }
    }

    /// Never report hits against `handle` (the actor's own collider).
    pub fn with_excluded_collider(mut self, handle: ColliderHandle) -> Self {
        self.excluded = Some(handle);
        self
    }

    #[inline]
    pub fn colliders(&self) -> &ColliderSet {
        &self.colliders
    }

    /// Create a borrowed `QueryPipeline` view suitable for scene queries.
    ///
    /// The returned pipeline borrows `self`, so it should be used within the scope
    /// of the borrow.
    pub fn query_pipeline<'a>(&'a self, filter: QueryFilter<'a>) -> QueryPipeline<'a> {
        self.broad_phase.as_query_pipeline(
            self.narrow_phase.query_dispatcher(),
            &self.bodies,
            &self.colliders,
            filter,
        )
    }

    /// Statics only, no trigger volumes, never the actor's own collider.
    fn sweep_filter(&self) -> QueryFilter<'static> {
        let filter = QueryFilter::only_fixed().exclude_sensors();
        match self.excluded {
            Some(handle) => filter.exclude_collider(handle),
            None => filter,
        }
    }
}

impl ShapeSweeper for RapierQueryWorld {
    fn sweep(
        &self,
        capsule: &CapsuleShape,
        origin: Vec3,
        direction: Dir,
        max_distance: f32,
    ) -> Option<SweepHit> {
        if max_distance <= 0.0 {
            return None;
        }

        let shape = capsule.to_parry();
        let center = capsule.center(origin);
        let shape_pos = Isometry::translation(center.x, center.y, center.z);
        let dir = direction.into_inner();

        // `dir` is unit length, so time of impact is a travel distance.
        let options = ShapeCastOptions {
            max_time_of_impact: max_distance,
            target_distance: 0.0,
            stop_at_penetration: false,
            compute_impact_geometry_on_penetration: true,
        };

        let pipeline = self.query_pipeline(self.sweep_filter());
        let (_, hit) = pipeline.cast_shape(&shape_pos, &dir, &shape, options)?;

        // normal1 is the capsule's outward normal at the contact (identity rotation, so world axes).
        let normal = -hit.normal1.into_inner();
        if !sweep::approaching(&normal, &direction) {
            return None;
        }

        let at_impact = origin + dir * hit.time_of_impact;
        Some(SweepHit {
            distance: hit.time_of_impact,
            normal,
            point: capsule.support_point(at_impact, &-normal),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rapier::ColliderShapeDef;

    fn floor_wall_and_trigger() -> Vec<WorldStaticDef> {
        vec![
            // Listed out of order on purpose; build sorts by id.
            WorldStaticDef::new(
                2,
                Vec3::new(2.5, 2.0, 0.0),
                ColliderShapeDef::Cuboid {
                    half_extents: Vec3::new(0.5, 2.0, 5.0),
                },
            ),
            WorldStaticDef::new(
                1,
                Vec3::zeros(),
                ColliderShapeDef::Plane {
                    offset_along_normal: 0.0,
                },
            ),
            WorldStaticDef::new(
                3,
                Vec3::new(-2.0, 1.0, 0.0),
                ColliderShapeDef::Cuboid {
                    half_extents: Vec3::new(0.5, 1.0, 0.5),
                },
            )
            .as_sensor(),
        ]
    }

    #[test]
    fn sweeps_hit_floor_and_wall() {
        let world = RapierQueryWorld::build(floor_wall_and_trigger());
        let capsule = CapsuleShape::new(0.4, 1.5).unwrap();

        let down = world
            .sweep(&capsule, Vec3::new(0.0, 3.0, 0.0), -Vec3::y_axis(), 10.0)
            .expect("floor hit");
        assert!((down.distance - 2.6).abs() < 1.0e-3);
        assert!((down.normal - Vec3::y()).norm() < 1.0e-3);

        let side = world
            .sweep(&capsule, Vec3::new(0.0, 0.5, 0.0), Vec3::x_axis(), 5.0)
            .expect("wall hit");
        assert!((side.distance - 1.6).abs() < 1.0e-3);
        assert!((side.normal + Vec3::x()).norm() < 1.0e-3);
    }

    #[test]
    fn trigger_volumes_are_ignored() {
        let mut defs = floor_wall_and_trigger();
        // Solid twin of the trigger, further along the same line.
        defs.push(WorldStaticDef::new(
            4,
            Vec3::new(-4.0, 1.0, 0.0),
            ColliderShapeDef::Cuboid {
                half_extents: Vec3::new(0.5, 1.0, 0.5),
            },
        ));
        let world = RapierQueryWorld::build(defs);
        let capsule = CapsuleShape::new(0.4, 1.5).unwrap();

        // Passes through the sensor box at x = -2 and stops on the solid one at x = -4.
        let hit = world
            .sweep(&capsule, Vec3::new(0.0, 0.5, 0.0), -Vec3::x_axis(), 5.0)
            .expect("solid box hit");
        assert!((hit.distance - 3.1).abs() < 1.0e-3);
        assert!((hit.normal - Vec3::x()).norm() < 1.0e-3);

        // Stopping short of the solid box leaves nothing to report.
        let short = world.sweep(&capsule, Vec3::new(0.0, 0.5, 0.0), -Vec3::x_axis(), 3.0);
        assert!(short.is_none());
    }

    #[test]
    fn excluded_collider_is_ignored() {
        let defs = floor_wall_and_trigger();
        let capsule = CapsuleShape::new(0.4, 1.5).unwrap();
        let origin = Vec3::new(0.0, 0.5, 0.0);

        let world = RapierQueryWorld::build(defs.clone());
        let (wall, _) = world
            .query_pipeline(QueryFilter::only_fixed())
            .cast_shape(
                &Isometry::translation(0.0, capsule.center(origin).y, 0.0),
                &Vec3::x(),
                &capsule.to_parry(),
                ShapeCastOptions::with_max_time_of_impact(5.0),
            )
            .expect("wall collider");
        assert!(world.sweep(&capsule, origin, Vec3::x_axis(), 5.0).is_some());

        // Same world, same handle: the wall is now the actor's own collider.
        let world = RapierQueryWorld::build(defs).with_excluded_collider(wall);
        let hit = world.sweep(&capsule, origin, Vec3::x_axis(), 5.0);
        assert!(hit.is_none());

        // Exclusion is per collider; the floor still answers.
        let down = world.sweep(&capsule, Vec3::new(0.0, 3.0, 0.0), -Vec3::y_axis(), 10.0);
        assert!(down.is_some());
    }

    #[test]
    fn rotated_and_offset_statics_keep_their_pose() {
        let quarter_turn = rapier3d::na::UnitQuaternion::from_axis_angle(
            &Vec3::y_axis(),
            std::f32::consts::FRAC_PI_2,
        );
        let defs = vec![
            WorldStaticDef::new(
                0,
                Vec3::new(0.0, -1.0, 0.0),
                ColliderShapeDef::Plane {
                    offset_along_normal: 0.5,
                },
            ),
            // Long axis along x after the quarter turn, thin along z.
            WorldStaticDef::new(
                1,
                Vec3::new(0.0, 1.0, 3.0),
                ColliderShapeDef::Cuboid {
                    half_extents: Vec3::new(0.25, 1.0, 4.0),
                },
            )
            .with_rotation(quarter_turn),
        ];
        let world = RapierQueryWorld::build(defs);
        let capsule = CapsuleShape::new(0.4, 1.5).unwrap();

        // Plane sits at y = -0.5.
        let down = world
            .sweep(&capsule, Vec3::new(0.0, 3.0, 0.0), -Vec3::y_axis(), 10.0)
            .expect("floor hit");
        assert!((down.distance - 3.1).abs() < 1.0e-3);

        // Rotated slab spans z in [2.75, 3.25].
        let forward = world
            .sweep(&capsule, Vec3::new(0.0, 0.5, 0.0), Vec3::z_axis(), 5.0)
            .expect("slab hit");
        assert!((forward.distance - 2.35).abs() < 1.0e-3);
        assert!((forward.normal + Vec3::z()).norm() < 1.0e-3);
    }
}
