//! Motor domain: jump state machine and per-tick motion state.

use bevy::prelude::*;
use thiserror::Error;

use crate::motor::config::MotorConfig;
use crate::motor::controller::{MotorController, MoveContext};
use crate::motor::resources::CommandState;

/// Marker for the player-controlled entity.
#[derive(Component, Debug)]
pub struct Player;

/// Speed multiplier while the sprint command is held.
pub const SPRINT_SPEED_RATIO: f32 = 2.0;

/// Vertical motion phase. `Rising` and `Falling` only return to `Idle`
/// through the ground snap in [`Motor::apply_displacement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JumpState {
    #[default]
    Idle,
    Rising,
    Falling,
}

/// Collaborator readings gathered at the start of a tick.
#[derive(Debug, Clone, Copy)]
pub struct TickInputs {
    pub commands: CommandState,
    /// Facing rotation of the entity.
    pub rotation: Quat,
    /// Current world position of the entity.
    pub position: Vec3,
    /// `None` while no level is active; the jump-physics update is then
    /// skipped for the tick.
    pub gravity: Option<f32>,
    /// Elapsed time in seconds.
    pub delta: f32,
}

#[derive(Debug, Error)]
pub enum MotorError {
    #[error("motor entity {entity} is missing required component {component}")]
    MissingDependency {
        entity: Entity,
        component: &'static str,
    },
}

/// Per-entity motion state driven by [`Motor::tick`]. Only `jump_state`,
/// `vertical_speed` and `target_position` carry over between frames;
/// everything else is recomputed each tick.
#[derive(Component, Debug, Clone)]
pub struct Motor {
    pub jump_state: JumpState,
    /// 1.0 walking, [`SPRINT_SPEED_RATIO`] while sprint is held.
    pub move_speed_ratio: f32,
    /// Ratio latched when a jump launches; air movement uses this instead
    /// of the live ratio, so toggling sprint mid-air changes nothing.
    pub jump_horizontal_speed_ratio: f32,
    pub vertical_speed: f32,
    /// Unit horizontal direction, or zero without input. Frozen while
    /// airborne.
    pub horizontal_move_direction: Vec3,
    pub desired_displacement: Vec3,
    /// Last committed position; the falling-edge ground check reads the
    /// height from here.
    pub target_position: Vec3,
    /// Lets this motor keep ticking while editor mode is active.
    pub tick_in_editor: bool,
}

impl Default for Motor {
    fn default() -> Self {
        Self {
            jump_state: JumpState::Idle,
            move_speed_ratio: 1.0,
            jump_horizontal_speed_ratio: 1.0,
            vertical_speed: 0.0,
            horizontal_move_direction: Vec3::ZERO,
            desired_displacement: Vec3::ZERO,
            target_position: Vec3::ZERO,
            tick_in_editor: false,
        }
    }
}

impl Motor {
    pub fn should_tick(&self, editor_active: bool) -> bool {
        !editor_active || self.tick_in_editor
    }

    /// Run one full motor tick: vertical state, direction, displacement,
    /// dispatch. Returns the committed target position, or `None` when the
    /// command set is out of range and the whole frame is skipped.
    pub fn tick(
        &mut self,
        config: &MotorConfig,
        controller: &mut MotorController,
        inputs: &TickInputs,
        cx: &MoveContext<'_>,
    ) -> Option<Vec3> {
        if !inputs.commands.recognized() {
            return None;
        }

        self.update_vertical_state(&inputs.commands, config, inputs.gravity, inputs.delta);
        self.resolve_move_direction(&inputs.commands, inputs.rotation);
        self.integrate_displacement(config.move_speed, inputs.delta);
        Some(self.apply_displacement(controller, cx, inputs.position))
    }

    /// Sprint ratio plus the vertical state machine. Without gravity (no
    /// active level) only the ratio is updated; state and vertical speed
    /// are left untouched.
    pub fn update_vertical_state(
        &mut self,
        commands: &CommandState,
        config: &MotorConfig,
        gravity: Option<f32>,
        delta: f32,
    ) {
        self.move_speed_ratio = if commands.wants_sprint() {
            SPRINT_SPEED_RATIO
        } else {
            1.0
        };

        let Some(gravity) = gravity else {
            return;
        };

        match self.jump_state {
            JumpState::Idle => {
                if commands.wants_jump() {
                    self.jump_state = JumpState::Rising;
                    self.vertical_speed = config.launch_speed(gravity);
                    self.jump_horizontal_speed_ratio = self.move_speed_ratio;
                    debug!("Jump launched at {} u/s", self.vertical_speed);
                } else {
                    self.vertical_speed = 0.0;
                }
            }
            JumpState::Rising | JumpState::Falling => {
                self.vertical_speed -= gravity * delta;
                if self.vertical_speed <= 0.0 {
                    self.jump_state = JumpState::Falling;
                }
            }
        }
    }

    /// Recompute the horizontal direction from the command bits and the
    /// facing rotation. Opposed bits cancel; no input yields the zero
    /// vector. Airborne direction stays frozen at its launch value.
    pub fn resolve_move_direction(&mut self, commands: &CommandState, rotation: Quat) {
        if self.jump_state != JumpState::Idle {
            return;
        }

        let forward = rotation * Vec3::NEG_Z;
        let left = rotation * Vec3::NEG_X;

        let mut direction = Vec3::ZERO;
        if commands.wants_forward() {
            direction += forward;
        }
        if commands.wants_backward() {
            direction -= forward;
        }
        if commands.wants_left() {
            direction += left;
        }
        if commands.wants_right() {
            direction -= left;
        }

        self.horizontal_move_direction = direction.normalize_or_zero();
    }

    /// Euler step producing this tick's desired displacement. Airborne
    /// motion uses the ratio latched at launch.
    pub fn integrate_displacement(&mut self, move_speed: f32, delta: f32) {
        let ratio = match self.jump_state {
            JumpState::Idle => self.move_speed_ratio,
            JumpState::Rising | JumpState::Falling => self.jump_horizontal_speed_ratio,
        };

        self.desired_displacement = self.horizontal_move_direction * move_speed * ratio * delta
            + Vec3::Y * self.vertical_speed * delta;
    }

    /// Dispatch through the controller, then apply the floor-plane snap: a
    /// falling motor whose previously committed height was already at or
    /// below the plane lands exactly on it and returns to `Idle`. The snap
    /// keys off the previous tick's height, so a fast fall can dip under
    /// the plane for one tick before landing.
    pub fn apply_displacement(
        &mut self,
        controller: &mut MotorController,
        cx: &MoveContext<'_>,
        current: Vec3,
    ) -> Vec3 {
        let mut resolved = controller.resolve(cx, current, self.desired_displacement);

        if self.jump_state == JumpState::Falling && self.target_position.y <= 0.0 {
            resolved.y = 0.0;
            self.jump_state = JumpState::Idle;
            debug!("Landed at {resolved}");
        }

        self.target_position = resolved;
        resolved
    }
}
