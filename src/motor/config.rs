//! Motor domain: per-entity motor configuration.

use std::fs;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Capsule dimensions for the physics-backed controller. `half_height` is
/// half the length of the cylindrical segment, along local +Y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapsuleShape {
    pub radius: f32,
    pub half_height: f32,
}

impl Default for CapsuleShape {
    fn default() -> Self {
        Self {
            radius: 0.4,
            half_height: 0.55,
        }
    }
}

/// Controller choice as it appears in config data. Resolved once at spawn
/// into a [`ControllerKind`]; never inspected again at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum ControllerSetup {
    /// Displacement is applied directly, no collision response.
    #[default]
    None,
    /// Collision-aware kinematic capsule.
    PhysicsCapsule(CapsuleShape),
    /// Recognized in data but no backend exists for it yet.
    Scripted,
}

/// Resolved controller variant. `Invalid` means the setup named something
/// no backend could be built for; dispatch then behaves like `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerKind {
    None,
    PhysicsCapsule,
    Invalid,
}

/// Immutable per-entity motor setup.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct MotorConfig {
    /// Base horizontal speed in units/s.
    pub move_speed: f32,
    /// Apex height of a jump in world units.
    pub jump_height: f32,
    pub controller: ControllerSetup,
}

impl Default for MotorConfig {
    fn default() -> Self {
        Self {
            move_speed: 6.0,
            jump_height: 1.2,
            controller: ControllerSetup::PhysicsCapsule(CapsuleShape::default()),
        }
    }
}

impl MotorConfig {
    /// Vertical launch speed whose arc peaks at `jump_height` under the
    /// given gravity: v = sqrt(2 h g).
    pub fn launch_speed(&self, gravity: f32) -> f32 {
        (2.0 * self.jump_height * gravity).sqrt()
    }

    /// Load a motor config from a RON file, falling back to defaults with
    /// a logged warning when the file is absent or malformed.
    pub fn load_or_default(path: &str) -> Self {
        match fs::read_to_string(path) {
            Ok(raw) => match ron::from_str(&raw) {
                Ok(config) => {
                    info!("Loaded motor config from {path}");
                    config
                }
                Err(err) => {
                    warn!("Malformed motor config {path}: {err}; using defaults");
                    Self::default()
                }
            },
            Err(err) => {
                warn!("Could not read motor config {path}: {err}; using defaults");
                Self::default()
            }
        }
    }
}
