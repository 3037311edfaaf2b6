//! Debug tooling for native dev builds.
//!
//! This plugin is compiled/used only when the caller gates it behind `dev_native`
//! (`#[cfg(feature = "dev_native")] mod debug_tools;` in `main.rs`).

use bevy::{
    color::palettes::css::{LIME, ORANGE_RED},
    diagnostic::{EntityCountDiagnosticsPlugin, FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin},
    prelude::*,
};

use crate::{
    player::{LocalPlayer, PlayerController},
    world::from_kcc,
};

const NORMAL_GIZMO_LENGTH: f32 = 1.0;

pub(super) fn plugin(app: &mut App) {
    app.add_plugins((
        FrameTimeDiagnosticsPlugin::default(),
        EntityCountDiagnosticsPlugin::default(),
        LogDiagnosticsPlugin::default(),
    ));

    app.add_systems(Update, draw_ground_normal);
}

/// Arrow along the last probed ground normal: green when walkable, red when only touching.
fn draw_ground_normal(mut gizmos: Gizmos, player: Single<&PlayerController, With<LocalPlayer>>) {
    let controller = &player.0;
    let report = controller.grounding();
    if !report.found_any_ground {
        return;
    }

    let foot = from_kcc(controller.interpolated_position());
    let normal = from_kcc(report.ground_normal);
    let color = if report.is_stable_on_ground {
        LIME
    } else {
        ORANGE_RED
    };
    gizmos.arrow(foot, foot + normal * NORMAL_GIZMO_LENGTH, color);
}
