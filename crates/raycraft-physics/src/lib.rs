//! Player movement, voxel collision and block interaction for Raycraft.
//!
//! The player is simulated in fixed 10 ms ticks ([`FixedTimestep`]). Each
//! tick damps and accelerates the velocity, resolves the move one axis at a
//! time against a 12-point body approximation ([`collision`]), and then
//! clears every block the body overlaps.

pub mod collision;
pub mod interaction;
pub mod player;
pub mod timestep;

pub use collision::{collider_points, collides, excavate, COLLIDER_POINTS};
pub use interaction::{break_block, place_block, BlockTarget, Hotbar};
pub use player::{MovementConfig, Player, TickReport};
pub use timestep::FixedTimestep;
