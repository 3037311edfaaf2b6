//! Static playground geometry: render meshes and the matching collision world.

use std::sync::Arc;

use bevy::prelude::*;
use kcc::{ColliderShapeDef, RapierQueryWorld, WorldStaticDef};

pub(super) fn plugin(app: &mut App) {
    app.insert_resource(CollisionWorld::from_blocks(&BLOCKS));
    app.add_systems(Startup, setup);
}

/// Collision scene shared by every controller in the app.
#[derive(Resource, Clone)]
pub struct CollisionWorld(pub Arc<RapierQueryWorld>);

impl CollisionWorld {
    fn from_blocks(blocks: &[Block]) -> Self {
        let mut defs = vec![WorldStaticDef::new(
            0,
            kcc::Vec3::zeros(),
            ColliderShapeDef::Plane {
                offset_along_normal: 0.0,
            },
        )];
        defs.extend(blocks.iter().map(Block::collider_def));
        Self(Arc::new(RapierQueryWorld::build(defs)))
    }
}

/// One box of level geometry, rendered and collided identically.
struct Block {
    id: u32,
    center: Vec3,
    /// Rotation about +Z in degrees; ramps rise toward +X.
    tilt_degrees: f32,
    half_extents: Vec3,
    color: Color,
}

const BLOCKS: [Block; 4] = [
    // Walkable ramp.
    Block {
        id: 1,
        center: Vec3::new(8.0, 1.0, 0.0),
        tilt_degrees: 25.0,
        half_extents: Vec3::new(3.0, 0.25, 2.0),
        color: Color::srgb(0.55, 0.6, 0.45),
    },
    // Too steep to stand on.
    Block {
        id: 2,
        center: Vec3::new(-8.0, 2.0, 0.0),
        tilt_degrees: -70.0,
        half_extents: Vec3::new(3.0, 0.25, 2.0),
        color: Color::srgb(0.7, 0.4, 0.35),
    },
    // Wall.
    Block {
        id: 3,
        center: Vec3::new(0.0, 1.5, 10.0),
        tilt_degrees: 0.0,
        half_extents: Vec3::new(6.0, 1.5, 0.5),
        color: Color::srgb(0.45, 0.5, 0.7),
    },
    // Ledge to walk off.
    Block {
        id: 4,
        center: Vec3::new(0.0, 0.5, -8.0),
        tilt_degrees: 0.0,
        half_extents: Vec3::new(3.0, 0.5, 3.0),
        color: Color::srgb_u8(124, 144, 255),
    },
];

impl Block {
    fn rotation(&self) -> Quat {
        Quat::from_rotation_z(self.tilt_degrees.to_radians())
    }

    fn collider_def(&self) -> WorldStaticDef {
        WorldStaticDef::new(
            self.id,
            to_kcc(self.center),
            ColliderShapeDef::Cuboid {
                half_extents: to_kcc(self.half_extents),
            },
        )
        .with_rotation(kcc::Quat::from_axis_angle(
            &nalgebra::Vector3::z_axis(),
            self.tilt_degrees.to_radians(),
        ))
    }
}

#[inline]
pub fn to_kcc(v: Vec3) -> kcc::Vec3 {
    kcc::Vec3::new(v.x, v.y, v.z)
}

#[inline]
pub fn from_kcc(v: kcc::Vec3) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    log::info!("spawning playground with {} blocks", BLOCKS.len());

    commands.spawn((
        Transform::from_xyz(0., 0., 0.),
        Mesh3d(meshes.add(Plane3d::default().mesh().size(50., 50.).build())),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::linear_rgb(0.2, 0.3, 0.25),
            perceptual_roughness: 1.0,
            metallic: 0.0,
            ..default()
        })),
    ));

    for block in &BLOCKS {
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::from_size(block.half_extents * 2.0))),
            MeshMaterial3d(materials.add(block.color)),
            Transform::from_translation(block.center).with_rotation(block.rotation()),
        ));
    }

    commands.spawn((
        PointLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, 4.0),
    ));
}
