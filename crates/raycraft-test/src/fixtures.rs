//! Hand-built worlds for tests.

use glam::{IVec3, UVec2, Vec3};
use raycraft_core::BlockId;
use raycraft_render::Camera;
use raycraft_voxel::{GridDims, VoxelGrid};
use raycraft_world::{generate_world_with_seed, WorldSeed};

use crate::Result;

/// A world whose bottom layer is `block` and everything else air.
pub fn flat_floor(dims: GridDims, block: BlockId) -> Result<VoxelGrid> {
    let mut grid = VoxelGrid::new(dims)?;
    let size = dims.as_ivec3();
    grid.fill_box(block, IVec3::ZERO, IVec3::new(size.x, 1, size.z), true);
    Ok(grid)
}

/// A one-cell-wide column of `block` at `(x, z)`, from the floor up to
/// `height` cells.
fn column(grid: &mut VoxelGrid, x: i32, z: i32, height: i32, block: BlockId) {
    grid.fill_box(
        block,
        IVec3::new(x, 0, z),
        IVec3::new(x + 1, height, z + 1),
        true,
    );
}

/// A stone floor with a 3-high mirror pillar in the middle and a brick
/// wall along the +Z edge.
pub fn pillar_room(size: u32) -> Result<VoxelGrid> {
    let mut grid = flat_floor(GridDims::new(size, size / 2, size), BlockId::STONE)?;
    let n = size as i32;
    let mid = n / 2;
    column(&mut grid, mid, mid, 3, BlockId::MIRROR);
    grid.fill_box(BlockId::BRICKS, IVec3::new(0, 1, n - 1), IVec3::new(n, 4, n), true);
    Ok(grid)
}

/// A generated world of the given size.
pub fn generated_world(dims: GridDims, seed: WorldSeed) -> Result<VoxelGrid> {
    let mut grid = VoxelGrid::new(dims)?;
    generate_world_with_seed(&mut grid, seed);
    Ok(grid)
}

/// A camera above the centre of `dims`, looking straight down from a
/// quarter of the world's width above the floor.
pub fn overhead_camera(dims: GridDims, resolution: UVec2) -> Camera {
    let height = 1.0 + dims.x.min(dims.z) as f32 / 4.0;
    Camera::new(
        Vec3::new(dims.x as f32 / 2.0, height, dims.z as f32 / 2.0),
        0.0,
        -std::f32::consts::FRAC_PI_2,
        Camera::DEFAULT_FOV,
        resolution,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_has_one_layer() {
        let dims = GridDims::cube(8);
        let grid = flat_floor(dims, BlockId::DIRT).unwrap();
        assert_eq!(grid.count(BlockId::DIRT), 64);
        assert_eq!(grid.top_solid(3, 3), Some(0));
    }

    #[test]
    fn pillar_room_layout() {
        let grid = pillar_room(16).unwrap();
        assert_eq!(grid.get(IVec3::new(8, 2, 8)), BlockId::MIRROR);
        assert_eq!(grid.get(IVec3::new(8, 3, 8)), BlockId::AIR);
        assert_eq!(grid.get(IVec3::new(5, 3, 15)), BlockId::BRICKS);
        assert_eq!(grid.count(BlockId::MIRROR), 3);
    }

    #[test]
    fn invalid_dims_are_reported() {
        assert!(flat_floor(GridDims::new(0, 4, 4), BlockId::STONE).is_err());
    }
}
