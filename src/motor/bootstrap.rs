//! Motor domain: player bootstrap from motor config data.

use bevy::prelude::*;

use crate::motor::config::{CapsuleShape, ControllerSetup};
use crate::motor::{Motor, MotorConfig, MotorController, Player};

const PLAYER_MOTOR_CONFIG: &str = "assets/config/player_motor.ron";
const PLAYER_SPAWN: Vec3 = Vec3::new(0.0, 0.0, 6.0);

pub(crate) fn spawn_player(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let config = MotorConfig::load_or_default(PLAYER_MOTOR_CONFIG);
    let controller = MotorController::from_setup(&config.controller);

    let capsule = match config.controller {
        ControllerSetup::PhysicsCapsule(shape) => shape,
        _ => CapsuleShape::default(),
    };

    // Seed the persisted target with the spawn point so the first
    // falling-edge ground check compares against a real height.
    let motor = Motor {
        target_position: PLAYER_SPAWN,
        ..default()
    };

    info!(
        "Spawning player: speed={}, jump_height={}, controller={:?}",
        config.move_speed,
        config.jump_height,
        controller.kind()
    );

    commands
        .spawn((
            Player,
            motor,
            controller,
            config,
            Transform::from_translation(PLAYER_SPAWN),
            Visibility::default(),
        ))
        .with_child((
            Mesh3d(meshes.add(Capsule3d::new(capsule.radius, capsule.half_height * 2.0))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgb(0.9, 0.9, 0.95),
                ..default()
            })),
            // The entity origin is the capsule's foot point.
            Transform::from_xyz(0.0, capsule.half_height + capsule.radius, 0.0),
        ));
}
