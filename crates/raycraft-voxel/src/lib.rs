//! Dense voxel storage and grid ray traversal for Raycraft.
//!
//! The world is one fixed-size [`VoxelGrid`]; rays walk it cell by cell with
//! [`GridTraversal`], and [`raycast`] returns the first solid cell a ray
//! meets.

pub mod grid;
pub mod raycast;

pub use grid::{GridDims, VoxelGrid};
pub use raycast::{raycast, GridTraversal, RayHit, RaycastResult, TraversalStep};
