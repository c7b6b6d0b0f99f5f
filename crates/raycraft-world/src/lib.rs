//! Deterministic world generation for Raycraft.
//!
//! A world is a pure function of its seed and grid dimensions: terrain comes
//! from a fixed value-noise height field, and every random decision (tree
//! placement, trunk height, leaf carving, classic rock layers) is drawn from
//! a single [`raycraft_core::Random`] in a fixed order.

pub mod generation;
pub mod trees;

pub use generation::{
    generate_world, generate_world_with_seed, GenerationMode, TerrainConfig, TerrainGenerator,
    WorldSummary,
};
pub use trees::TreePlan;

/// World seed for procedural generation.
pub type WorldSeed = i64;
