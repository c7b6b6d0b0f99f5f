//! Core types, math, and deterministic random sources for Raycraft.
//!
//! This crate provides the foundational pieces shared by every other crate:
//! - The closed set of block codes ([`BlockId`])
//! - Ray/box math and the six grid faces
//! - A bit-exact 48-bit linear congruential generator ([`Random`])
//! - Layered value noise used for the terrain height field ([`ValueNoise`])
//! - The controller types passed from input polling to the simulation

pub mod controls;
pub mod error;
pub mod math;
pub mod noise;
pub mod random;
pub mod types;

pub use controls::{LookDelta, PlayerInput};
pub use error::{Error, Result};
pub use math::{Aabb, Axis, Face, Ray};
pub use noise::ValueNoise;
pub use random::Random;
pub use types::BlockId;

/// Engine-wide constants
pub mod constants {
    use std::time::Duration;

    /// Horizontal world size of the full world
    pub const WORLD_SIZE: u32 = 512;
    /// Horizontal world size of the reduced (classic) world
    pub const REDUCED_WORLD_SIZE: u32 = 64;
    /// Vertical world size, shared by both world sizes
    pub const WORLD_HEIGHT: u32 = 64;

    /// Edge length of one block texture in texels
    pub const TEXTURE_RES: u32 = 16;

    /// Maximum distance at which blocks can be picked
    pub const PLAYER_REACH: f32 = 5.0;
    /// Height of the eye above the feet
    pub const EYE_HEIGHT: f32 = 1.45;

    /// Fixed physics step
    pub const TICK: Duration = Duration::from_millis(10);

    /// Ray travel limit of the renderer in the full world
    pub const RENDER_DISTANCE: f32 = 80.0;
    /// Ray travel limit of the renderer in the reduced world
    pub const REDUCED_RENDER_DISTANCE: f32 = 20.0;

    /// Whether this build uses the reduced world and classic recipes.
    pub const CLASSIC: bool = cfg!(feature = "classic");

    /// Ray travel limit for this build.
    pub const fn default_render_distance() -> f32 {
        if CLASSIC {
            REDUCED_RENDER_DISTANCE
        } else {
            RENDER_DISTANCE
        }
    }
}
