//! Debug domain: dev-only motor overlay and editor-mode toggle.
//!
//! F1 toggles the overlay (jump state, speed ratio, target position);
//! F8 toggles editor mode, which stops motors from ticking unless they
//! opt in via `Motor::tick_in_editor`.

use bevy::prelude::*;

use crate::core::SimulationMode;
use crate::motor::{Motor, Player};

#[derive(Resource, Debug, Default)]
pub struct DebugState {
    pub overlay_visible: bool,
}

/// Marker for the overlay text node.
#[derive(Component, Debug)]
pub struct MotorOverlay;

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>()
            .add_systems(Update, (handle_debug_hotkeys, update_motor_overlay).chain());
    }
}

fn handle_debug_hotkeys(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
    mut mode: ResMut<SimulationMode>,
    existing_overlay: Query<Entity, With<MotorOverlay>>,
) {
    if keyboard.just_pressed(KeyCode::F1) {
        debug_state.overlay_visible = !debug_state.overlay_visible;

        if debug_state.overlay_visible {
            spawn_motor_overlay(&mut commands);
        } else {
            for entity in &existing_overlay {
                commands.entity(entity).despawn();
            }
        }
    }

    if keyboard.just_pressed(KeyCode::F8) {
        mode.editor_active = !mode.editor_active;
        info!(
            "[DEBUG] Editor mode {}",
            if mode.editor_active { "ON" } else { "OFF" }
        );
    }
}

fn update_motor_overlay(
    debug_state: Res<DebugState>,
    motor_query: Query<&Motor, With<Player>>,
    mut overlay_query: Query<&mut Text, With<MotorOverlay>>,
) {
    if !debug_state.overlay_visible {
        return;
    }

    if let (Ok(motor), Ok(mut text)) = (motor_query.single(), overlay_query.single_mut()) {
        let pos = motor.target_position;
        **text = format!(
            "Jump: {:?}\nVertical: {:.2}\nRatio: {:.1}\nTarget: ({:.1}, {:.1}, {:.1})",
            motor.jump_state, motor.vertical_speed, motor.move_speed_ratio, pos.x, pos.y, pos.z,
        );
    }
}

fn spawn_motor_overlay(commands: &mut Commands) {
    commands.spawn((
        MotorOverlay,
        Text::new("..."),
        TextFont {
            font_size: 12.0,
            ..default()
        },
        TextColor(Color::srgb(0.8, 0.9, 0.8)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(20.0),
            bottom: Val::Px(20.0),
            padding: UiRect::all(Val::Px(8.0)),
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
        ZIndex(500),
    ));
}
