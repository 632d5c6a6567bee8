//! Motor domain: unit tests for the jump state machine, direction
//! resolution, displacement integration and controller dispatch.

use std::f32::consts::FRAC_PI_2;

use avian3d::prelude::*;
use bevy::prelude::*;

use super::components::{JumpState, Motor, SPRINT_SPEED_RATIO, TickInputs};
use super::config::{CapsuleShape, ControllerKind, ControllerSetup, MotorConfig};
use super::controller::{
    CharacterController, KinematicCapsuleController, MotorController, MoveContext,
};
use super::resources::CommandState;
use super::systems::input::command_bits;

fn config(move_speed: f32, jump_height: f32) -> MotorConfig {
    MotorConfig {
        move_speed,
        jump_height,
        controller: ControllerSetup::None,
    }
}

fn commands(bits: u32) -> CommandState {
    CommandState::from_bits(bits)
}

fn inputs(bits: u32, gravity: Option<f32>, delta: f32) -> TickInputs {
    TickInputs {
        commands: commands(bits),
        rotation: Quat::IDENTITY,
        position: Vec3::ZERO,
        gravity,
        delta,
    }
}

/// Run a full tick against an empty collision world.
fn run_tick(
    motor: &mut Motor,
    config: &MotorConfig,
    controller: &mut MotorController,
    tick_inputs: &TickInputs,
) -> Option<Vec3> {
    let spatial = SpatialQueryPipeline::default();
    let filter = SpatialQueryFilter::default();
    let cx = MoveContext {
        spatial: &spatial,
        filter: &filter,
    };
    motor.tick(config, controller, tick_inputs, &cx)
}

fn dispatch(motor: &mut Motor, controller: &mut MotorController, current: Vec3) -> Vec3 {
    let spatial = SpatialQueryPipeline::default();
    let filter = SpatialQueryFilter::default();
    let cx = MoveContext {
        spatial: &spatial,
        filter: &filter,
    };
    motor.apply_displacement(controller, &cx, current)
}

#[test]
fn test_launch_speed_matches_apex_height() {
    for (jump_height, gravity) in [(0.0, 10.0), (1.2, 9.8), (2.0, 10.0), (5.0, 3.7)] {
        let mut motor = Motor::default();
        motor.update_vertical_state(
            &commands(CommandState::JUMP),
            &config(6.0, jump_height),
            Some(gravity),
            1.0 / 60.0,
        );

        assert_eq!(motor.jump_state, JumpState::Rising);
        assert_eq!(motor.vertical_speed, (2.0 * jump_height * gravity).sqrt());
    }
}

#[test]
fn test_idle_without_jump_zeroes_vertical_speed() {
    let mut motor = Motor {
        vertical_speed: 3.0,
        ..default()
    };
    motor.update_vertical_state(&commands(0), &config(6.0, 1.2), Some(9.8), 1.0 / 60.0);

    assert_eq!(motor.jump_state, JumpState::Idle);
    assert_eq!(motor.vertical_speed, 0.0);
}

#[test]
fn test_opposed_commands_cancel() {
    let mut motor = Motor::default();
    motor.resolve_move_direction(
        &commands(
            CommandState::FORWARD | CommandState::BACKWARD | CommandState::LEFT
                | CommandState::RIGHT,
        ),
        Quat::IDENTITY,
    );

    assert_eq!(motor.horizontal_move_direction, Vec3::ZERO);
}

#[test]
fn test_diagonal_direction_is_normalized() {
    let mut motor = Motor::default();
    motor.resolve_move_direction(
        &commands(CommandState::FORWARD | CommandState::LEFT),
        Quat::IDENTITY,
    );

    let expected = Vec3::new(-1.0, 0.0, -1.0).normalize();
    assert!((motor.horizontal_move_direction - expected).length() < 1.0e-6);
}

#[test]
fn test_direction_follows_facing_rotation() {
    let mut motor = Motor::default();
    // Facing rotated 90 degrees about +Y: forward (-Z) becomes -X.
    motor.resolve_move_direction(
        &commands(CommandState::FORWARD),
        Quat::from_rotation_y(FRAC_PI_2),
    );

    assert!((motor.horizontal_move_direction - Vec3::NEG_X).length() < 1.0e-6);
}

#[test]
fn test_airborne_ratio_and_direction_are_latched() {
    let cfg = config(5.0, 2.0);
    let mut motor = Motor::default();

    // Sprint forward on the ground, then launch.
    let ground_bits = CommandState::FORWARD | CommandState::SPRINT;
    motor.update_vertical_state(&commands(ground_bits), &cfg, Some(10.0), 1.0 / 60.0);
    motor.resolve_move_direction(&commands(ground_bits), Quat::IDENTITY);
    motor.update_vertical_state(
        &commands(ground_bits | CommandState::JUMP),
        &cfg,
        Some(10.0),
        1.0 / 60.0,
    );

    assert_eq!(motor.jump_state, JumpState::Rising);
    assert_eq!(motor.jump_horizontal_speed_ratio, SPRINT_SPEED_RATIO);

    // Mid-air: release sprint, push right. Neither may take effect.
    motor.update_vertical_state(&commands(CommandState::RIGHT), &cfg, Some(10.0), 1.0 / 60.0);
    motor.resolve_move_direction(&commands(CommandState::RIGHT), Quat::IDENTITY);

    assert_eq!(motor.jump_horizontal_speed_ratio, SPRINT_SPEED_RATIO);
    assert!((motor.horizontal_move_direction - Vec3::NEG_Z).length() < 1.0e-6);

    // The integrated horizontal term uses the latched ratio, not the live 1.0.
    motor.integrate_displacement(cfg.move_speed, 1.0);
    assert!(motor.desired_displacement.x.abs() < 1.0e-6);
    assert!((motor.desired_displacement.z + 10.0).abs() < 1.0e-4);
}

#[test]
fn test_uncontrolled_dispatch_adds_displacement() {
    let mut controller = MotorController::from_setup(&ControllerSetup::None);
    let mut motor = Motor {
        desired_displacement: Vec3::new(1.5, -0.25, 3.0),
        target_position: Vec3::new(0.0, 5.0, 0.0),
        ..default()
    };

    let current = Vec3::new(2.0, 5.0, 1.0);
    let resolved = dispatch(&mut motor, &mut controller, current);

    assert_eq!(resolved, current + Vec3::new(1.5, -0.25, 3.0));
    assert_eq!(motor.target_position, resolved);
}

#[test]
fn test_forward_walk_scenario() {
    let cfg = config(5.0, 1.2);
    let mut motor = Motor::default();
    let mut controller = MotorController::from_setup(&ControllerSetup::None);

    let target = run_tick(
        &mut motor,
        &cfg,
        &mut controller,
        &inputs(CommandState::FORWARD, Some(10.0), 1.0),
    );

    // Forward is -Z at the identity rotation.
    assert_eq!(target, Some(Vec3::new(0.0, 0.0, -5.0)));
    assert_eq!(motor.jump_state, JumpState::Idle);
}

#[test]
fn test_jump_then_gravity_scenario() {
    let cfg = config(5.0, 2.0);
    let mut motor = Motor::default();

    motor.update_vertical_state(&commands(CommandState::JUMP), &cfg, Some(10.0), 1.0 / 60.0);
    assert!((motor.vertical_speed - 40.0_f32.sqrt()).abs() < 1.0e-4);

    motor.update_vertical_state(&commands(0), &cfg, Some(10.0), 1.0);
    assert!((motor.vertical_speed + 3.6754446).abs() < 1.0e-4);
    assert_eq!(motor.jump_state, JumpState::Falling);
}

#[test]
fn test_falling_returns_to_idle_via_snap() {
    let cfg = config(5.0, 1.2);
    let mut controller = MotorController::from_setup(&ControllerSetup::None);
    let mut motor = Motor {
        jump_state: JumpState::Falling,
        vertical_speed: -5.0,
        target_position: Vec3::ZERO,
        ..default()
    };

    motor.integrate_displacement(cfg.move_speed, 0.1);
    let resolved = dispatch(&mut motor, &mut controller, Vec3::ZERO);

    assert_eq!(resolved.y, 0.0);
    assert_eq!(motor.jump_state, JumpState::Idle);

    // Next tick without a jump command starts from zero vertical speed.
    motor.update_vertical_state(&commands(0), &cfg, Some(10.0), 1.0 / 60.0);
    assert_eq!(motor.vertical_speed, 0.0);
    assert_eq!(motor.jump_state, JumpState::Idle);
}

#[test]
fn test_falling_snap_lags_one_frame() {
    // The snap compares the PREVIOUS tick's committed height against the
    // plane, so a fall from above dips below y = 0 for exactly one tick.
    let cfg = config(5.0, 1.2);
    let mut controller = MotorController::from_setup(&ControllerSetup::None);
    let mut motor = Motor {
        jump_state: JumpState::Falling,
        vertical_speed: -5.0,
        target_position: Vec3::new(0.0, 0.4, 0.0),
        ..default()
    };

    motor.integrate_displacement(cfg.move_speed, 0.2);
    let first = dispatch(&mut motor, &mut controller, Vec3::new(0.0, 0.4, 0.0));
    assert!(first.y < 0.0);
    assert_eq!(motor.jump_state, JumpState::Falling);

    motor.update_vertical_state(&commands(0), &cfg, Some(10.0), 0.2);
    motor.integrate_displacement(cfg.move_speed, 0.2);
    let second = dispatch(&mut motor, &mut controller, first);
    assert_eq!(second.y, 0.0);
    assert_eq!(motor.jump_state, JumpState::Idle);
}

#[test]
fn test_rising_is_never_snapped() {
    let cfg = config(5.0, 1.2);
    let mut controller = MotorController::from_setup(&ControllerSetup::None);
    let mut motor = Motor {
        jump_state: JumpState::Rising,
        vertical_speed: 5.0,
        target_position: Vec3::ZERO,
        ..default()
    };

    motor.integrate_displacement(cfg.move_speed, 0.1);
    let resolved = dispatch(&mut motor, &mut controller, Vec3::ZERO);

    assert!(resolved.y > 0.0);
    assert_eq!(motor.jump_state, JumpState::Rising);
}

#[test]
fn test_invalid_setup_builds_no_backend() {
    let mut controller = MotorController::from_setup(&ControllerSetup::Scripted);

    assert_eq!(controller.kind(), ControllerKind::Invalid);
    assert!(!controller.has_backend());

    // Dispatch is indistinguishable from the `None` controller.
    let mut motor = Motor {
        desired_displacement: Vec3::new(0.5, 0.0, -2.0),
        target_position: Vec3::new(0.0, 1.0, 0.0),
        ..default()
    };
    let current = Vec3::new(1.0, 1.0, 1.0);
    let resolved = dispatch(&mut motor, &mut controller, current);
    assert_eq!(resolved, current + Vec3::new(0.5, 0.0, -2.0));
}

#[test]
fn test_physics_setup_builds_capsule_backend() {
    let controller =
        MotorController::from_setup(&ControllerSetup::PhysicsCapsule(CapsuleShape::default()));

    assert_eq!(controller.kind(), ControllerKind::PhysicsCapsule);
    assert!(controller.has_backend());
}

#[test]
fn test_dispatch_delegates_to_backend() {
    struct Offset(Vec3);
    impl CharacterController for Offset {
        fn resolve_move(
            &mut self,
            _cx: &MoveContext<'_>,
            position: Vec3,
            displacement: Vec3,
        ) -> Vec3 {
            position + displacement + self.0
        }
    }

    let mut controller = MotorController::with_backend(Box::new(Offset(Vec3::X)));
    let mut motor = Motor {
        desired_displacement: Vec3::new(0.0, 0.0, -1.0),
        target_position: Vec3::new(0.0, 2.0, 0.0),
        ..default()
    };

    let resolved = dispatch(&mut motor, &mut controller, Vec3::ZERO);
    assert_eq!(resolved, Vec3::new(1.0, 0.0, -1.0));
}

#[test]
fn test_capsule_sweep_without_obstacles_passes_through() {
    let spatial = SpatialQueryPipeline::default();
    let filter = SpatialQueryFilter::default();
    let cx = MoveContext {
        spatial: &spatial,
        filter: &filter,
    };

    let mut backend = KinematicCapsuleController::new(CapsuleShape::default());
    let current = Vec3::new(1.0, 2.0, 3.0);
    let displacement = Vec3::new(0.5, 0.0, -1.0);

    let resolved = backend.resolve_move(&cx, current, displacement);
    assert!((resolved - (current + displacement)).length() < 1.0e-6);
}

#[test]
fn test_unrecognized_command_skips_tick() {
    let cfg = config(5.0, 1.2);
    let mut controller = MotorController::from_setup(&ControllerSetup::None);
    let mut motor = Motor {
        jump_state: JumpState::Rising,
        vertical_speed: 2.5,
        target_position: Vec3::new(0.0, 1.0, 0.0),
        ..default()
    };

    for bits in [
        CommandState::INVALID,
        CommandState::INVALID | CommandState::FORWARD,
        CommandState::INVALID << 3,
    ] {
        let target = run_tick(
            &mut motor,
            &cfg,
            &mut controller,
            &inputs(bits, Some(10.0), 1.0 / 60.0),
        );

        assert_eq!(target, None);
        assert_eq!(motor.jump_state, JumpState::Rising);
        assert_eq!(motor.vertical_speed, 2.5);
        assert_eq!(motor.target_position, Vec3::new(0.0, 1.0, 0.0));
    }
}

#[test]
fn test_missing_level_skips_gravity_but_applies_sprint() {
    let cfg = config(5.0, 1.2);
    let mut motor = Motor {
        jump_state: JumpState::Rising,
        vertical_speed: 3.0,
        ..default()
    };

    motor.update_vertical_state(&commands(CommandState::SPRINT), &cfg, None, 1.0);

    assert_eq!(motor.move_speed_ratio, SPRINT_SPEED_RATIO);
    assert_eq!(motor.vertical_speed, 3.0);
    assert_eq!(motor.jump_state, JumpState::Rising);
}

#[test]
fn test_editor_mode_gates_tick() {
    let motor = Motor::default();
    assert!(motor.should_tick(false));
    assert!(!motor.should_tick(true));

    let opted_in = Motor {
        tick_in_editor: true,
        ..default()
    };
    assert!(opted_in.should_tick(true));
}

#[test]
fn test_config_parses_from_ron() {
    let raw = r#"(
        move_speed: 7.5,
        jump_height: 1.0,
        controller: PhysicsCapsule((radius: 0.3, half_height: 0.6)),
    )"#;

    let cfg: MotorConfig = ron::from_str(raw).unwrap();
    assert_eq!(cfg.move_speed, 7.5);
    assert_eq!(cfg.jump_height, 1.0);
    assert_eq!(
        cfg.controller,
        ControllerSetup::PhysicsCapsule(CapsuleShape {
            radius: 0.3,
            half_height: 0.6,
        })
    );
}

#[test]
fn test_keyboard_mapping() {
    let mut keyboard = ButtonInput::<KeyCode>::default();
    keyboard.press(KeyCode::KeyW);
    keyboard.press(KeyCode::ShiftLeft);
    keyboard.press(KeyCode::Space);

    let bits = command_bits(&keyboard);
    assert_eq!(
        bits,
        CommandState::FORWARD | CommandState::SPRINT | CommandState::JUMP
    );
    assert!(CommandState::from_bits(bits).recognized());
}
