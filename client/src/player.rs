//! The locally controlled capsule.
//!
//! Input becomes a desired velocity, the controller resolves it against the collision world,
//! and the rendered mesh follows the interpolated position.

use std::sync::Arc;

use bevy::prelude::*;
use kcc::{CapsuleShape, CharacterController, CharacterControllerBuilder, RapierQueryWorld};
use leafwing_input_manager::prelude::ActionState;

use crate::{
    input::InputAction,
    world::{CollisionWorld, from_kcc, to_kcc},
};

const CAPSULE_RADIUS: f32 = 0.4;
const CAPSULE_HEIGHT: f32 = 1.5;
const SPAWN_POSITION: Vec3 = Vec3::new(0.0, 5.0, 0.0);

const WALK_SPEED_MPS: f32 = 6.0;
const GRAVITY_MPS2: f32 = 20.0;
const TERMINAL_FALL_SPEED_MPS: f32 = 50.0;
/// Below this height the player is considered lost and respawned.
const KILL_PLANE_Y: f32 = -30.0;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_player);
    app.add_systems(Update, (respawn, drive_controller).chain());
}

#[derive(Component)]
pub struct LocalPlayer;

#[derive(Component)]
pub struct PlayerController(pub CharacterController<Arc<RapierQueryWorld>>);

/// Vertical speed integrated by the game, not by the controller.
#[derive(Component, Default)]
struct FallSpeed(f32);

fn spawn_player(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    world: Res<CollisionWorld>,
) {
    let controller = CapsuleShape::new(CAPSULE_RADIUS, CAPSULE_HEIGHT).and_then(|capsule| {
        CharacterControllerBuilder::new(capsule)
            .sweeper(Arc::clone(&world.0))
            .position(to_kcc(SPAWN_POSITION))
            .build()
    });
    let controller = match controller {
        Ok(controller) => controller,
        Err(err) => {
            log::error!("could not create player controller: {err}");
            return;
        }
    };

    let visual = mesh_translation(&controller);
    commands.spawn((
        LocalPlayer,
        PlayerController(controller),
        FallSpeed::default(),
        Mesh3d(meshes.add(Capsule3d::new(
            CAPSULE_RADIUS,
            CAPSULE_HEIGHT - 2.0 * CAPSULE_RADIUS,
        ))),
        MeshMaterial3d(materials.add(Color::srgb(0.9, 0.75, 0.3))),
        Transform::from_translation(visual),
    ));
}

/// Capsule meshes are centred; the controller tracks the foot sphere.
fn mesh_translation(controller: &CharacterController<Arc<RapierQueryWorld>>) -> Vec3 {
    let capsule = controller.capsule();
    from_kcc(capsule.center(controller.interpolated_position()))
}

fn respawn(
    actions: Res<ActionState<InputAction>>,
    player: Single<(&mut PlayerController, &mut FallSpeed), With<LocalPlayer>>,
) {
    let (mut controller, mut fall) = player.into_inner();
    let lost = controller.0.position().y < KILL_PLANE_Y;
    if lost || actions.just_pressed(&InputAction::Respawn) {
        controller.0.set_position(to_kcc(SPAWN_POSITION));
        fall.0 = 0.0;
    }
}

fn drive_controller(
    time: Res<Time>,
    actions: Res<ActionState<InputAction>>,
    player: Single<(&mut PlayerController, &mut FallSpeed, &mut Transform), With<LocalPlayer>>,
) {
    let (mut player_controller, mut fall, mut transform) = player.into_inner();
    let controller = &mut player_controller.0;
    let dt = time.delta_secs();

    // Camera looks toward +Z, so screen right is -X.
    let axis = actions.clamped_axis_pair(&InputAction::Move);
    let walk = Vec3::new(-axis.x, 0.0, axis.y) * WALK_SPEED_MPS;

    if controller.is_grounded() {
        fall.0 = 0.0;
    } else {
        fall.0 = (fall.0 + GRAVITY_MPS2 * dt).min(TERMINAL_FALL_SPEED_MPS);
    }

    let desired = walk - Vec3::Y * fall.0;
    controller.update(to_kcc(desired), dt);

    // Landed or got deflected mid-step: carry on from what was actually left of the fall.
    if controller.velocity().y > -fall.0 {
        fall.0 = (-controller.velocity().y).max(0.0);
    }

    transform.translation = mesh_translation(controller);
}
