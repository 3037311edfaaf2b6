pub mod collision;
pub mod controller;
pub mod error;
pub mod fixed_step;
pub mod rapier;
pub mod rapier_world;

#[cfg(test)]
mod test_support;

pub use collision::{
    CapsuleShape, ControllerSettings, Dir, GroundingReport, Quat, ShapeSweeper, StaticShape,
    StaticWorld, SweepHit, Transform, Vec3, cuboid_from_pose, plane_from_pose,
};
pub use controller::{CharacterController, CharacterControllerBuilder};
pub use error::ControllerError;
pub use fixed_step::FixedStepClock;
pub use rapier::{ColliderShapeDef, WorldStaticDef, collider_from_def};
pub use rapier_world::RapierQueryWorld;
