//! Tracer-side copy of the world.

use glam::IVec3;
use raycraft_core::Aabb;
use raycraft_voxel::{GridDims, VoxelGrid};
use tracing::trace;

/// Snapshot of a [`VoxelGrid`] laid out as one byte per cell.
///
/// The snapshot is refreshed with [`sync`](Self::sync), which copies the grid
/// only when its revision has moved since the last upload.
#[derive(Clone, Debug)]
pub struct WorldVolume {
    dims: GridDims,
    bounds: Aabb,
    codes: Vec<u8>,
    revision: Option<u64>,
}

impl WorldVolume {
    /// Empty volume; call [`sync`](Self::sync) before tracing.
    pub fn new(dims: GridDims) -> Self {
        Self {
            dims,
            bounds: dims.bounds(),
            codes: vec![0; dims.volume()],
            revision: None,
        }
    }

    /// Volume already holding a copy of `grid`.
    pub fn from_grid(grid: &VoxelGrid) -> Self {
        let mut volume = Self::new(grid.dims());
        volume.sync(grid);
        volume
    }

    /// Copy the grid if it changed. Returns whether a copy happened.
    pub fn sync(&mut self, grid: &VoxelGrid) -> bool {
        if self.revision == Some(grid.revision()) && self.dims == grid.dims() {
            return false;
        }
        if self.dims != grid.dims() {
            self.dims = grid.dims();
            self.bounds = self.dims.bounds();
        }
        self.codes.clear();
        self.codes.extend_from_slice(grid.as_bytes());
        self.revision = Some(grid.revision());
        trace!(revision = grid.revision(), bytes = self.codes.len(), "World volume uploaded");
        true
    }

    #[inline]
    pub const fn dims(&self) -> GridDims {
        self.dims
    }

    #[inline]
    pub const fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// Revision of the grid last copied, if any.
    #[inline]
    pub const fn revision(&self) -> Option<u64> {
        self.revision
    }

    /// Block code at `cell`, or `None` outside the volume.
    #[inline]
    pub fn code(&self, cell: IVec3) -> Option<u8> {
        self.dims
            .contains(cell)
            .then(|| self.codes[self.dims.index(cell)])
    }

    /// Whether `cell` holds a non-air block.
    #[inline]
    pub fn is_solid(&self, cell: IVec3) -> bool {
        self.code(cell).is_some_and(|code| code != 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raycraft_core::BlockId;

    #[test]
    fn sync_copies_only_on_change() {
        let mut grid = VoxelGrid::new(GridDims::cube(4)).unwrap();
        let mut volume = WorldVolume::new(grid.dims());
        assert!(volume.sync(&grid));
        assert!(!volume.sync(&grid));

        grid.set(IVec3::new(1, 2, 3), BlockId::BRICKS);
        assert!(!volume.is_solid(IVec3::new(1, 2, 3)));
        assert!(volume.sync(&grid));
        assert_eq!(volume.code(IVec3::new(1, 2, 3)), Some(BlockId::BRICKS.code()));
        assert_eq!(volume.revision(), Some(grid.revision()));
    }

    #[test]
    fn outside_cells_are_none() {
        let grid = VoxelGrid::new(GridDims::new(2, 3, 4)).unwrap();
        let volume = WorldVolume::from_grid(&grid);
        assert_eq!(volume.code(IVec3::new(0, 0, 0)), Some(0));
        assert_eq!(volume.code(IVec3::new(2, 0, 0)), None);
        assert_eq!(volume.code(IVec3::new(0, -1, 0)), None);
        assert!(!volume.is_solid(IVec3::new(0, 3, 0)));
    }

    #[test]
    fn resizes_to_new_grid() {
        let small = VoxelGrid::new(GridDims::cube(2)).unwrap();
        let mut big = VoxelGrid::new(GridDims::cube(5)).unwrap();
        big.set(IVec3::splat(4), BlockId::STONE);
        let mut volume = WorldVolume::from_grid(&small);
        assert!(volume.sync(&big));
        assert_eq!(volume.dims(), GridDims::cube(5));
        assert!(volume.is_solid(IVec3::splat(4)));
    }
}
