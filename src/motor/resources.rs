//! Motor domain: the frame's active command set.

use bevy::prelude::*;

/// Commands active this frame, as a bit set, plus the cursor's horizontal
/// travel. Filled once per frame by `read_commands`; every motor ticked
/// afterwards sees the same snapshot.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct CommandState {
    pub bits: u32,
    /// Yaw travel in radians this frame. Read by the motor tick but
    /// consumed by camera-follow, which lives outside the motor.
    pub cursor_yaw_delta: f32,
}

impl CommandState {
    pub const FORWARD: u32 = 1 << 0;
    pub const BACKWARD: u32 = 1 << 1;
    pub const LEFT: u32 = 1 << 2;
    pub const RIGHT: u32 = 1 << 3;
    pub const SPRINT: u32 = 1 << 4;
    pub const JUMP: u32 = 1 << 5;
    /// First value outside the recognized command range. A set containing
    /// a bit at or beyond this is "no recognized command this frame".
    pub const INVALID: u32 = 1 << 6;

    pub fn from_bits(bits: u32) -> Self {
        Self {
            bits,
            cursor_yaw_delta: 0.0,
        }
    }

    pub fn recognized(&self) -> bool {
        self.bits < Self::INVALID
    }

    pub fn wants_forward(&self) -> bool {
        self.bits & Self::FORWARD != 0
    }

    pub fn wants_backward(&self) -> bool {
        self.bits & Self::BACKWARD != 0
    }

    pub fn wants_left(&self) -> bool {
        self.bits & Self::LEFT != 0
    }

    pub fn wants_right(&self) -> bool {
        self.bits & Self::RIGHT != 0
    }

    pub fn wants_sprint(&self) -> bool {
        self.bits & Self::SPRINT != 0
    }

    pub fn wants_jump(&self) -> bool {
        self.bits & Self::JUMP != 0
    }
}
