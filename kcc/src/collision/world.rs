use super::{
    broad::{self, WorldAccel},
    narrow_phase,
    sweep::ShapeSweeper,
    types::{CapsuleShape, Dir, StaticShape, SweepHit, Vec3},
};

/// Immutable set of static shapes plus its broad-phase accelerator.
///
/// This is the lightweight sweep backend: parry3d shape casts over a plain list of
/// statics, pruned by a BVH. Use it when the world is authored in code or loaded from
/// data and no Rapier scene exists.
pub struct StaticWorld {
    statics: Vec<StaticShape>,
    accel: WorldAccel,
}

impl StaticWorld {
    pub fn new(statics: Vec<StaticShape>) -> Self {
        let accel = broad::build_world_accel(&statics);
        Self { statics, accel }
    }

    #[inline]
    pub fn statics(&self) -> &[StaticShape] {
        &self.statics
    }

    #[inline]
    pub fn accel(&self) -> &WorldAccel {
        &self.accel
    }
}

impl ShapeSweeper for StaticWorld {
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

        let dir = direction.into_inner();
        let swept = broad::swept_capsule_aabb(
            capsule,
            origin,
            dir * max_distance,
            broad::BROAD_PHASE_MARGIN,
        );

        // Planes first (infinite; always included, not in the accel), then finite candidates.
        let candidates = broad::query_candidates(&self.accel, &swept);
        let shapes = self
            .accel
            .plane_indices
            .iter()
            .chain(candidates.iter())
            .map(|&idx| &self.statics[idx]);

        let hit = narrow_phase::earliest_hit_capsule_vs_statics(
            capsule.iso(origin),
            &capsule.to_parry(),
            dir,
            max_distance,
            shapes,
        )?;

        let at_impact = origin + dir * hit.distance;
        Some(SweepHit {
            distance: hit.distance,
            normal: hit.normal,
            point: capsule.support_point(at_impact, &-hit.normal),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::{cuboid_from_pose, types::Quat};

    fn floor_and_wall() -> StaticWorld {
        StaticWorld::new(vec![
            StaticShape::Plane {
                normal: Vec3::y(),
                dist: 0.0,
            },
            // Wall face at x = 2.
            cuboid_from_pose(
                Vec3::new(0.5, 2.0, 5.0),
                Vec3::new(2.5, 2.0, 0.0),
                Quat::identity(),
            ),
        ])
    }

    #[test]
    fn downward_sweep_hits_floor_at_radius() {
        let world = floor_and_wall();
        let capsule = CapsuleShape::new(0.4, 1.5).unwrap();
        let hit = world
            .sweep(&capsule, Vec3::new(0.0, 3.0, 0.0), -Vec3::y_axis(), 10.0)
            .expect("floor hit");

        assert!((hit.distance - 2.6).abs() < 1.0e-3);
        assert!((hit.normal - Vec3::y()).norm() < 1.0e-3);
        assert!(hit.point.y.abs() < 1.0e-3);
    }

    #[test]
    fn sideways_sweep_hits_wall_face() {
        let world = floor_and_wall();
        let capsule = CapsuleShape::new(0.4, 1.5).unwrap();
        let hit = world
            .sweep(&capsule, Vec3::new(0.0, 0.5, 0.0), Vec3::x_axis(), 5.0)
            .expect("wall hit");

        assert!((hit.distance - 1.6).abs() < 1.0e-3);
        assert!((hit.normal + Vec3::x()).norm() < 1.0e-3);
    }

    #[test]
    fn sliding_along_resting_floor_is_not_a_hit() {
        let world = floor_and_wall();
        let capsule = CapsuleShape::new(0.4, 1.5).unwrap();
        // Resting exactly on the floor, moving away from the wall.
        let hit = world.sweep(&capsule, Vec3::new(0.0, 0.4, 0.0), -Vec3::x_axis(), 3.0);
        assert!(hit.is_none());
    }

    #[test]
    fn short_sweep_misses() {
        let world = floor_and_wall();
        let capsule = CapsuleShape::new(0.4, 1.5).unwrap();
        let hit = world.sweep(&capsule, Vec3::new(0.0, 3.0, 0.0), -Vec3::y_axis(), 1.0);
        assert!(hit.is_none());
    }
}
