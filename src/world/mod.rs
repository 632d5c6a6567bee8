//! World domain: the active level and its static collision geometry.

use avian3d::prelude::*;
use bevy::prelude::*;

/// Physics layers for collision filtering.
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Static level geometry (floor slab, blocks, ramps)
    Ground,
    /// Player character
    Player,
}

/// Marker for static level colliders.
#[derive(Component, Debug)]
pub struct Ground;

/// Per-level simulation parameters. Absent until a level has been spawned,
/// which is how "no active level" is modelled: systems take
/// `Option<Res<ActiveLevel>>` and degrade gracefully.
#[derive(Resource, Debug, Clone)]
pub struct ActiveLevel {
    /// Downward acceleration magnitude in units/s^2.
    pub gravity: f32,
}

impl Default for ActiveLevel {
    fn default() -> Self {
        Self { gravity: 9.8 }
    }
}

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_arena);
    }
}

/// Spawn the test arena: a floor slab whose top face sits at y = 0 (the
/// motor's ground plane), plus a few blocks to walk into.
fn spawn_arena(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let level = ActiveLevel::default();
    info!("Arena spawned, gravity {}", level.gravity);
    commands.insert_resource(level);

    let floor_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.35, 0.4, 0.35),
        ..default()
    });
    let block_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.55, 0.45, 0.35),
        ..default()
    });

    commands.spawn((
        Ground,
        Mesh3d(meshes.add(Cuboid::new(80.0, 1.0, 80.0))),
        MeshMaterial3d(floor_material),
        Transform::from_xyz(0.0, -0.5, 0.0),
        RigidBody::Static,
        Collider::cuboid(80.0, 1.0, 80.0),
        CollisionLayers::new(GameLayer::Ground, LayerMask::ALL),
    ));

    for (size, position) in [
        (Vec3::new(3.0, 2.0, 3.0), Vec3::new(-6.0, 1.0, -4.0)),
        (Vec3::new(2.0, 1.0, 6.0), Vec3::new(5.0, 0.5, -2.0)),
        (Vec3::new(10.0, 3.0, 1.5), Vec3::new(0.0, 1.5, -12.0)),
    ] {
        commands.spawn((
            Ground,
            Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
            MeshMaterial3d(block_material.clone()),
            Transform::from_translation(position),
            RigidBody::Static,
            Collider::cuboid(size.x, size.y, size.z),
            CollisionLayers::new(GameLayer::Ground, LayerMask::ALL),
        ));
    }
}
