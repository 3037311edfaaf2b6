use bevy::{camera::Exposure, prelude::*};

use crate::{
    player::{LocalPlayer, PlayerController},
    world::from_kcc,
};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, add_camera);
    app.add_systems(PostUpdate, follow_player);
}

const CAMERA_OFFSET_GLOBAL: Vec3 = Vec3::new(0.0, 12.0, -14.0);
const CAMERA_DECAY_RATE: f32 = 8.0;

fn add_camera(mut commands: Commands) {
    commands.spawn((
        Exposure { ev100: 9.0 },
        bevy::core_pipeline::tonemapping::Tonemapping::AcesFitted,
        Camera3d::default(),
        Transform::from_translation(CAMERA_OFFSET_GLOBAL).looking_at(Vec3::ZERO, Vec3::Y),
        DistanceFog {
            color: Color::srgba(0.35, 0.48, 0.66, 1.0),
            falloff: FogFalloff::Linear {
                start: 40.0,
                end: 120.0,
            },
            ..default()
        },
    ));
}

/// Tracks the simulated position rather than the interpolated mesh, so the camera's own
/// smoothing is the only filter applied to its motion.
fn follow_player(
    mut camera: Single<&mut Transform, With<Camera3d>>,
    player: Single<&PlayerController, With<LocalPlayer>>,
    time: Res<Time>,
) {
    let target = from_kcc(player.0.position()) + CAMERA_OFFSET_GLOBAL;
    camera
        .translation
        .smooth_nudge(&target, CAMERA_DECAY_RATE, time.delta_secs());
}
