//! Motor domain: turns input commands into per-frame locomotion.
//!
//! Each controllable entity carries a [`MotorConfig`], a [`Motor`] (the
//! jump state machine plus per-tick motion state) and a
//! [`MotorController`] (an optional collision backend). Every frame
//! `tick_motors` runs the sequence: sample commands, update vertical
//! state, resolve the horizontal direction, integrate the displacement,
//! dispatch through the controller, commit the target position to the
//! transform.

mod bootstrap;
mod components;
mod config;
mod controller;
mod resources;
mod systems;

#[cfg(test)]
mod tests;

use bevy::prelude::*;

pub use components::{JumpState, Motor, MotorError, Player, SPRINT_SPEED_RATIO, TickInputs};
pub use config::{CapsuleShape, ControllerKind, ControllerSetup, MotorConfig};
pub use controller::{CharacterController, KinematicCapsuleController, MotorController, MoveContext};
pub use resources::CommandState;

pub struct MotorPlugin;

impl Plugin for MotorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CommandState>()
            .add_systems(Startup, bootstrap::spawn_player)
            .add_systems(
                Update,
                (systems::read_commands, systems::tick_motors).chain(),
            );
    }
}
