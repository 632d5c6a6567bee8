//! Motor domain: command sampling from raw input devices.

use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;

use crate::motor::CommandState;

/// Radians of yaw per pixel of horizontal mouse travel.
const MOUSE_YAW_SENSITIVITY: f32 = 0.003;

pub(crate) fn read_commands(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<AccumulatedMouseMotion>,
    mut command_state: ResMut<CommandState>,
) {
    command_state.bits = command_bits(&keyboard);
    command_state.cursor_yaw_delta = -mouse.delta.x * MOUSE_YAW_SENSITIVITY;
}

pub(crate) fn command_bits(keyboard: &ButtonInput<KeyCode>) -> u32 {
    let mut bits = 0;

    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        bits |= CommandState::FORWARD;
    }
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        bits |= CommandState::BACKWARD;
    }
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        bits |= CommandState::LEFT;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        bits |= CommandState::RIGHT;
    }
    if keyboard.pressed(KeyCode::ShiftLeft) {
        bits |= CommandState::SPRINT;
    }
    if keyboard.pressed(KeyCode::Space) {
        bits |= CommandState::JUMP;
    }

    bits
}
