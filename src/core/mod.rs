//! Core domain: app plumbing shared by every other domain.

use bevy::prelude::*;

/// Whether the app is currently driven by an editor rather than the game
/// loop. Motors skip their tick while this is set unless the individual
/// motor opts in via `Motor::tick_in_editor`.
#[derive(Resource, Debug, Default)]
pub struct SimulationMode {
    pub editor_active: bool,
}

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationMode>()
            .add_systems(Startup, setup_camera);
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 7.0, 16.0).looking_at(Vec3::new(0.0, 1.0, 0.0), Vec3::Y),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(6.0, 14.0, 8.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}
