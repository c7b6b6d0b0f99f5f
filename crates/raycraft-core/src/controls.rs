//! Controller state handed from input polling to the simulation.

use serde::{Deserialize, Serialize};

/// Movement intent for one physics tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerInput {
    /// Forward axis in `[-1, 1]`; positive moves along the view direction
    pub forward: f32,
    /// Strafe axis in `[-1, 1]`; positive moves to the right
    pub right: f32,
    /// Jump requested this tick
    pub jump: bool,
}

impl PlayerInput {
    /// Input with nothing pressed.
    pub const IDLE: Self = Self {
        forward: 0.0,
        right: 0.0,
        jump: false,
    };

    /// Create input, clamping both axes into `[-1, 1]`.
    pub fn new(forward: f32, right: f32, jump: bool) -> Self {
        Self {
            forward: forward.clamp(-1.0, 1.0),
            right: right.clamp(-1.0, 1.0),
            jump,
        }
    }
}

/// Change of view orientation, in radians.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LookDelta {
    pub yaw: f32,
    pub pitch: f32,
}

impl LookDelta {
    pub const ZERO: Self = Self {
        yaw: 0.0,
        pitch: 0.0,
    };

    pub const fn new(yaw: f32, pitch: f32) -> Self {
        Self { yaw, pitch }
    }

    pub fn is_zero(&self) -> bool {
        self.yaw == 0.0 && self.pitch == 0.0
    }
}
