//! Point-sampled body collision.
//!
//! The body is approximated by 12 points: the four corners of a 0.6 x 0.6
//! square around the feet position, repeated at the feet, at 0.8 and at 1.6
//! above them. A position is blocked when any point lies in a blocking cell.
//!
//! Cells outside the grid follow one fixed policy: above the top of the world
//! is open sky, beyond the horizontal edges is open space, and below the
//! bottom layer is solid floor.

use glam::{IVec3, Vec3};
use raycraft_core::BlockId;
use raycraft_voxel::VoxelGrid;

/// Number of body sample points.
pub const COLLIDER_POINTS: usize = 12;

const HALF_WIDTH: f32 = 0.3;
const LEVEL_SPACING: f32 = 0.8;

/// Body sample points for a player whose feet are at `feet`.
pub fn collider_points(feet: Vec3) -> [Vec3; COLLIDER_POINTS] {
    std::array::from_fn(|i| {
        Vec3::new(
            feet.x + (i & 1) as f32 * 2.0 * HALF_WIDTH - HALF_WIDTH,
            feet.y + (i >> 2) as f32 * LEVEL_SPACING,
            feet.z + ((i >> 1) & 1) as f32 * 2.0 * HALF_WIDTH - HALF_WIDTH,
        )
    })
}

/// Whether a cell stops the body.
pub fn is_blocking(grid: &VoxelGrid, cell: IVec3) -> bool {
    if cell.y < 0 {
        return true;
    }
    grid.get_checked(cell).is_some_and(|block| block.is_solid())
}

/// Whether a body with feet at `feet` overlaps a blocking cell.
pub fn collides(grid: &VoxelGrid, feet: Vec3) -> bool {
    collider_points(feet)
        .iter()
        .any(|p| is_blocking(grid, p.floor().as_ivec3()))
}

/// Clear every in-grid cell the body overlaps. Returns how many blocks were
/// removed.
pub fn excavate(grid: &mut VoxelGrid, feet: Vec3) -> usize {
    let mut removed = 0;
    for point in collider_points(feet) {
        let cell = point.floor().as_ivec3();
        if grid.get_checked(cell).is_some_and(|block| block.is_solid()) {
            grid.set(cell, BlockId::AIR);
            removed += 1;
        }
    }
    removed
}
