//! Motor domain: the per-frame motor tick.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::core::SimulationMode;
use crate::motor::{
    CommandState, Motor, MotorConfig, MotorController, MotorError, MoveContext, TickInputs,
};
use crate::world::{ActiveLevel, GameLayer};

/// Drive every motor through one tick: gather the collaborator readings,
/// run the state machine, commit the target position to the transform.
///
/// A motor without a `Transform` is a precondition violation and fails the
/// system with [`MotorError::MissingDependency`]; a missing level is soft
/// and only skips the jump-physics update.
pub(crate) fn tick_motors(
    time: Res<Time>,
    mode: Res<SimulationMode>,
    command_state: Res<CommandState>,
    level: Option<Res<ActiveLevel>>,
    spatial: Res<SpatialQueryPipeline>,
    mut query: Query<(
        Entity,
        &MotorConfig,
        &mut Motor,
        &mut MotorController,
        Option<&mut Transform>,
    )>,
) -> Result {
    let delta = time.delta_secs();
    let gravity = level.as_deref().map(|level| level.gravity);
    let filter = SpatialQueryFilter::from_mask(GameLayer::Ground);

    // Read but not consumed here; camera-follow owns the yaw.
    let _turn_yaw = command_state.cursor_yaw_delta;

    for (entity, config, mut motor, mut controller, transform) in &mut query {
        if !motor.should_tick(mode.editor_active) {
            continue;
        }

        let Some(mut transform) = transform else {
            return Err(MotorError::MissingDependency {
                entity,
                component: "Transform",
            }
            .into());
        };

        let inputs = TickInputs {
            commands: *command_state,
            rotation: transform.rotation,
            position: transform.translation,
            gravity,
            delta,
        };
        let cx = MoveContext {
            spatial: &spatial,
            filter: &filter,
        };

        if let Some(target) = motor.tick(config, &mut controller, &inputs, &cx) {
            transform.translation = target;
        }
    }

    Ok(())
}
