//! Motor domain: the controller seam between desired and resolved movement.
//!
//! The motor decides where the entity wants to go; a controller backend
//! decides where it actually ends up. Backends are swappable behind the
//! [`CharacterController`] trait; the provided one sweeps a capsule
//! through the avian spatial query pipeline.

use std::fmt;

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::motor::config::{CapsuleShape, ControllerKind, ControllerSetup};

/// Read-only world access a controller may use while resolving a move.
pub struct MoveContext<'a> {
    pub spatial: &'a SpatialQueryPipeline,
    pub filter: &'a SpatialQueryFilter,
}

/// Collision-aware movement backend. One capability: given where the
/// entity is and where it wants to go, return where it ends up.
pub trait CharacterController: Send + Sync {
    fn resolve_move(
        &mut self,
        cx: &MoveContext<'_>,
        position: Vec3,
        displacement: Vec3,
    ) -> Vec3;
}

/// The motor's exclusively-owned controller slot: the resolved kind plus
/// the backend instance, present only for `PhysicsCapsule`. Built once at
/// spawn, never rebound, dropped with the entity.
#[derive(Component)]
pub struct MotorController {
    kind: ControllerKind,
    backend: Option<Box<dyn CharacterController>>,
}

impl fmt::Debug for MotorController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MotorController")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl MotorController {
    /// Resolve a controller setup into a controller. A recognized setup
    /// with no backend degrades to `Invalid`: the entity stays tickable
    /// but moves without collision.
    pub fn from_setup(setup: &ControllerSetup) -> Self {
        match setup {
            ControllerSetup::None => Self {
                kind: ControllerKind::None,
                backend: None,
            },
            ControllerSetup::PhysicsCapsule(shape) => Self {
                kind: ControllerKind::PhysicsCapsule,
                backend: Some(Box::new(KinematicCapsuleController::new(*shape))),
            },
            other => {
                error!("Controller setup {other:?} has no backend, motor will move uncontrolled");
                Self {
                    kind: ControllerKind::Invalid,
                    backend: None,
                }
            }
        }
    }

    /// Wrap a custom backend (tests, alternative physics integrations).
    pub fn with_backend(backend: Box<dyn CharacterController>) -> Self {
        Self {
            kind: ControllerKind::PhysicsCapsule,
            backend: Some(backend),
        }
    }

    pub fn kind(&self) -> ControllerKind {
        self.kind
    }

    pub fn has_backend(&self) -> bool {
        self.backend.is_some()
    }

    /// Resolve the desired displacement into a final position. Without a
    /// backend (`None` and `Invalid` alike) the displacement is applied
    /// unchecked.
    pub fn resolve(&mut self, cx: &MoveContext<'_>, position: Vec3, displacement: Vec3) -> Vec3 {
        match self.backend.as_mut() {
            Some(backend) => backend.resolve_move(cx, position, displacement),
            None => position + displacement,
        }
    }
}

/// Iteration cap for the sweep-and-slide loop.
const MAX_SLIDE_ITERATIONS: u32 = 4;
/// Gap kept between the capsule surface and whatever it hits.
const SKIN_WIDTH: f32 = 0.01;
/// Remaining displacement below this length is not worth another sweep.
const MIN_SWEEP_DISTANCE: f32 = 1.0e-4;

/// Kinematic capsule backend: sweeps the capsule along the displacement
/// and slides the remainder along hit surfaces.
///
/// The entity position is treated as the capsule's foot point (it sits on
/// the motor's y = 0 ground plane); sweeps run in capsule-center space.
pub struct KinematicCapsuleController {
    shape: CapsuleShape,
    collider: Collider,
}

impl KinematicCapsuleController {
    pub fn new(shape: CapsuleShape) -> Self {
        Self {
            shape,
            collider: Collider::capsule(shape.radius, shape.half_height * 2.0),
        }
    }

    pub fn shape(&self) -> CapsuleShape {
        self.shape
    }

    fn center_offset(&self) -> Vec3 {
        Vec3::Y * (self.shape.half_height + self.shape.radius)
    }
}

impl CharacterController for KinematicCapsuleController {
    fn resolve_move(
        &mut self,
        cx: &MoveContext<'_>,
        position: Vec3,
        displacement: Vec3,
    ) -> Vec3 {
        let offset = self.center_offset();
        let mut center = position + offset;
        let mut remaining = displacement;

        for _ in 0..MAX_SLIDE_ITERATIONS {
            let distance = remaining.length();
            if distance < MIN_SWEEP_DISTANCE {
                break;
            }
            let Ok(direction) = Dir3::new(remaining / distance) else {
                break;
            };

            let config = ShapeCastConfig::from_max_distance(distance + SKIN_WIDTH);
            match cx.spatial.cast_shape(
                &self.collider,
                center,
                Quat::IDENTITY,
                direction,
                &config,
                cx.filter,
            ) {
                None => {
                    center += remaining;
                    break;
                }
                Some(hit) => {
                    let travel = (hit.distance - SKIN_WIDTH).max(0.0);
                    center += direction * travel;
                    let leftover = remaining - direction * travel;
                    // Slide: drop the component pointing into the surface.
                    remaining = leftover - hit.normal1 * leftover.dot(hit.normal1);
                }
            }
        }

        center - offset
    }
}
