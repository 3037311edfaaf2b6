//! Exact capsule-vs-plane sweeps for deterministic unit tests.

use std::cell::Cell;

use crate::collision::{CapsuleShape, Dir, ShapeSweeper, SweepHit, Vec3};

/// Unit normal of a slope rising toward +X at `degrees`.
pub fn slope_normal(degrees: f32) -> Vec3 {
    let r = degrees.to_radians();
    Vec3::new(-r.sin(), r.cos(), 0.0)
}

/// Infinite planes `normal · x = dist`, solid on the side opposite `normal`.
pub struct PlaneSweeper {
    planes: Vec<(Vec3, f32)>,
    calls: Cell<usize>,
}

impl PlaneSweeper {
    pub fn new(planes: Vec<(Vec3, f32)>) -> Self {
        Self {
            planes,
            calls: Cell::new(0),
        }
    }

    pub fn floor(height: f32) -> Self {
        Self::new(vec![(Vec3::y(), height)])
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl ShapeSweeper for PlaneSweeper {
    fn sweep(
        &self,
        capsule: &CapsuleShape,
        origin: Vec3,
        direction: Dir,
        max_distance: f32,
    ) -> Option<SweepHit> {
        self.calls.set(self.calls.get() + 1);

        let center = capsule.center(origin);
        let dir = direction.into_inner();
        let mut best: Option<SweepHit> = None;

        for &(normal, dist) in &self.planes {
            let approach = -normal.dot(&dir);
            if approach <= 1.0e-4 {
                continue;
            }
            let gap = normal.dot(&center)
                - dist
                - capsule.radius()
                - capsule.half_segment() * normal.y.abs();
            let distance = (gap / approach).max(0.0);
            if distance > max_distance {
                continue;
            }
            if best.is_none_or(|b| distance < b.distance) {
                let at_impact = origin + dir * distance;
                best = Some(SweepHit {
                    distance,
                    normal,
                    point: capsule.support_point(at_impact, &-normal),
                });
            }
        }

        best
    }
}
