//! Fixed-size dense voxel grid.
//!
//! Cells are stored in one flat buffer with X varying fastest, then Y, then
//! Z. This is also the layout handed to the renderer as a single-channel
//! volume, so the buffer can be uploaded as-is.

use glam::{IVec3, UVec3, Vec3};
use raycraft_core::constants::{REDUCED_WORLD_SIZE, WORLD_HEIGHT, WORLD_SIZE};
use raycraft_core::{Aabb, BlockId, Error, Result};
use serde::{Deserialize, Serialize};

/// Grid extent in cells along each axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridDims {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl GridDims {
    /// Full world: 512 x 64 x 512
    pub const NORMAL: Self = Self::new(WORLD_SIZE, WORLD_HEIGHT, WORLD_SIZE);
    /// Reduced world: 64 x 64 x 64
    pub const REDUCED: Self = Self::new(REDUCED_WORLD_SIZE, WORLD_HEIGHT, REDUCED_WORLD_SIZE);

    pub const fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }

    /// Cube of edge `n`.
    pub const fn cube(n: u32) -> Self {
        Self::new(n, n, n)
    }

    /// The world size selected by the `classic` build feature.
    pub const fn default_for_build() -> Self {
        if raycraft_core::constants::CLASSIC {
            Self::REDUCED
        } else {
            Self::NORMAL
        }
    }

    /// Total number of cells
    #[inline]
    pub const fn volume(self) -> usize {
        self.x as usize * self.y as usize * self.z as usize
    }

    #[inline]
    pub const fn as_uvec3(self) -> UVec3 {
        UVec3::new(self.x, self.y, self.z)
    }

    #[inline]
    pub fn as_ivec3(self) -> IVec3 {
        self.as_uvec3().as_ivec3()
    }

    /// World-space bounds of the grid.
    pub fn bounds(self) -> Aabb {
        Aabb::new(Vec3::ZERO, self.as_uvec3().as_vec3())
    }

    /// True iff `pos` addresses a cell inside the grid.
    #[inline]
    pub const fn contains(self, pos: IVec3) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && pos.z >= 0
            && (pos.x as u32) < self.x
            && (pos.y as u32) < self.y
            && (pos.z as u32) < self.z
    }

    /// Flat buffer index of a cell. The only place the layout is spelled out.
    #[inline]
    pub const fn index(self, pos: IVec3) -> usize {
        let (sx, sy) = (self.x as usize, self.y as usize);
        pos.x as usize + pos.y as usize * sx + pos.z as usize * sx * sy
    }

    /// Inverse of [`GridDims::index`].
    #[inline]
    pub const fn position(self, index: usize) -> IVec3 {
        let (sx, sy) = (self.x as usize, self.y as usize);
        IVec3::new(
            (index % sx) as i32,
            ((index / sx) % sy) as i32,
            (index / (sx * sy)) as i32,
        )
    }

    fn validate(self) -> Result<Self> {
        if self.x == 0 || self.y == 0 || self.z == 0 {
            return Err(Error::InvalidDimensions(format!(
                "{}x{}x{} has an empty axis",
                self.x, self.y, self.z
            )));
        }
        if [self.x, self.y, self.z].iter().any(|&n| n > i32::MAX as u32) {
            return Err(Error::InvalidDimensions(format!(
                "{}x{}x{} exceeds the addressable range",
                self.x, self.y, self.z
            )));
        }
        Ok(self)
    }
}

impl Default for GridDims {
    fn default() -> Self {
        Self::default_for_build()
    }
}

/// The block world.
///
/// Out-of-range reads and writes through [`VoxelGrid::get`] and
/// [`VoxelGrid::set`] are caller bugs; they are caught by debug assertions
/// and otherwise either panic or alias another cell. Use
/// [`VoxelGrid::contains`] or [`VoxelGrid::get_checked`] when a position may
/// be outside.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoxelGrid {
    dims: GridDims,
    cells: Vec<BlockId>,
    revision: u64,
}

impl VoxelGrid {
    /// Create a grid filled with air.
    pub fn new(dims: GridDims) -> Result<Self> {
        let dims = dims.validate()?;
        Ok(Self {
            dims,
            cells: vec![BlockId::AIR; dims.volume()],
            revision: 0,
        })
    }

    /// Create a grid from raw block codes in buffer order.
    pub fn from_bytes(dims: GridDims, bytes: &[u8]) -> Result<Self> {
        let dims = dims.validate()?;
        if bytes.len() != dims.volume() {
            return Err(Error::SizeMismatch {
                expected: dims.volume(),
                actual: bytes.len(),
            });
        }
        let cells = bytes
            .iter()
            .map(|&code| BlockId::try_from(code))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            dims,
            cells,
            revision: 0,
        })
    }

    #[inline]
    pub const fn dims(&self) -> GridDims {
        self.dims
    }

    /// Counter bumped by every mutation.
    #[inline]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// True iff `pos` addresses a cell inside the grid.
    #[inline]
    pub const fn contains(&self, pos: IVec3) -> bool {
        self.dims.contains(pos)
    }

    /// True iff the cell containing the point `pos` is inside the grid.
    #[inline]
    pub fn is_within_world(&self, pos: Vec3) -> bool {
        pos.is_finite() && self.contains(pos.floor().as_ivec3())
    }

    /// Block at `pos`. The position must be inside the grid.
    #[inline]
    pub fn get(&self, pos: IVec3) -> BlockId {
        debug_assert!(self.contains(pos), "read outside grid at {pos}");
        self.cells[self.dims.index(pos)]
    }

    /// Block at `pos`, or `None` outside the grid.
    #[inline]
    pub fn get_checked(&self, pos: IVec3) -> Option<BlockId> {
        self.contains(pos).then(|| self.get(pos))
    }

    /// Overwrite the block at `pos`. The position must be inside the grid.
    #[inline]
    pub fn set(&mut self, pos: IVec3, block: BlockId) {
        debug_assert!(self.contains(pos), "write outside grid at {pos}");
        let index = self.dims.index(pos);
        self.cells[index] = block;
        self.revision = self.revision.wrapping_add(1);
    }

    /// Fill the half-open box `[min, max)`, clipped to the grid.
    ///
    /// With `replace == false` only air cells are written, so earlier
    /// structures show through the new fill.
    pub fn fill_box(&mut self, block: BlockId, min: IVec3, max: IVec3, replace: bool) {
        let lo = min.max(IVec3::ZERO);
        let hi = max.min(self.dims.as_ivec3());
        if lo.cmpge(hi).any() {
            return;
        }

        for z in lo.z..hi.z {
            for y in lo.y..hi.y {
                for x in lo.x..hi.x {
                    let index = self.dims.index(IVec3::new(x, y, z));
                    if replace || self.cells[index].is_air() {
                        self.cells[index] = block;
                    }
                }
            }
        }
        self.revision = self.revision.wrapping_add(1);
    }

    /// Reset every cell to air.
    pub fn clear(&mut self) {
        self.cells.fill(BlockId::AIR);
        self.revision = self.revision.wrapping_add(1);
    }

    /// Number of cells holding `block`.
    pub fn count(&self, block: BlockId) -> usize {
        self.cells.iter().filter(|&&b| b == block).count()
    }

    /// Highest solid cell of the column at `(x, z)`.
    pub fn top_solid(&self, x: i32, z: i32) -> Option<i32> {
        (0..self.dims.y as i32)
            .rev()
            .find(|&y| self.get_checked(IVec3::new(x, y, z)).is_some_and(BlockId::is_solid))
    }

    /// Cells in buffer order.
    #[inline]
    pub fn cells(&self) -> &[BlockId] {
        &self.cells
    }

    /// Raw block codes in buffer order, for bulk upload.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> VoxelGrid {
        VoxelGrid::new(GridDims::new(4, 3, 5)).unwrap()
    }

    #[test]
    fn canonical_dims() {
        assert_eq!(GridDims::NORMAL, GridDims::new(512, 64, 512));
        assert_eq!(GridDims::REDUCED, GridDims::cube(64));
        assert_eq!(GridDims::NORMAL.volume(), 512 * 64 * 512);
    }

    #[test]
    fn empty_axis_rejected() {
        assert!(matches!(
            VoxelGrid::new(GridDims::new(4, 0, 4)),
            Err(Error::InvalidDimensions(_))
        ));
    }

    #[test]
    fn index_is_x_fastest_then_y_then_z() {
        let dims = GridDims::new(4, 3, 5);
        assert_eq!(dims.index(IVec3::new(1, 0, 0)), 1);
        assert_eq!(dims.index(IVec3::new(0, 1, 0)), 4);
        assert_eq!(dims.index(IVec3::new(0, 0, 1)), 12);
        assert_eq!(dims.index(IVec3::new(3, 2, 4)), dims.volume() - 1);
        for i in 0..dims.volume() {
            assert_eq!(dims.index(dims.position(i)), i);
        }
    }

    #[test]
    fn bounds_every_cell_inside() {
        let grid = small();
        for z in 0..5 {
            for y in 0..3 {
                for x in 0..4 {
                    let p = IVec3::new(x, y, z);
                    assert!(grid.contains(p));
                    assert!(grid.is_within_world(p.as_vec3() + Vec3::splat(0.5)));
                }
            }
        }
    }

    #[test]
    fn bounds_outside_each_axis() {
        let grid = small();
        for p in [
            IVec3::new(-1, 0, 0),
            IVec3::new(0, -1, 0),
            IVec3::new(0, 0, -1),
            IVec3::new(4, 0, 0),
            IVec3::new(0, 3, 0),
            IVec3::new(0, 0, 5),
        ] {
            assert!(!grid.contains(p), "{p} should be outside");
            assert!(grid.get_checked(p).is_none());
        }
        assert!(!grid.is_within_world(Vec3::new(-0.5, 1.0, 1.0)));
        assert!(!grid.is_within_world(Vec3::new(1.0, 3.0, 1.0)));
        assert!(!grid.is_within_world(Vec3::NAN));
        assert!(grid.is_within_world(Vec3::new(3.99, 2.99, 4.99)));
    }

    #[test]
    fn set_then_get() {
        let mut grid = small();
        let p = IVec3::new(2, 1, 3);
        grid.set(p, BlockId::BRICKS);
        assert_eq!(grid.get(p), BlockId::BRICKS);
        assert_eq!(grid.count(BlockId::BRICKS), 1);
        assert_eq!(grid.as_bytes()[grid.dims().index(p)], BlockId::BRICKS.code());
    }

    #[test]
    fn fill_box_without_replace_keeps_existing() {
        let mut grid = small();
        grid.set(IVec3::new(1, 1, 1), BlockId::WOOD);
        grid.set(IVec3::new(2, 0, 2), BlockId::STONE);
        let before = grid.clone();

        grid.fill_box(BlockId::LEAVES, IVec3::ZERO, IVec3::new(3, 2, 3), false);

        for z in 0..3 {
            for y in 0..2 {
                for x in 0..3 {
                    let p = IVec3::new(x, y, z);
                    let old = before.get(p);
                    if old.is_air() {
                        assert_eq!(grid.get(p), BlockId::LEAVES);
                    } else {
                        assert_eq!(grid.get(p), old);
                    }
                }
            }
        }
        // Outside the half-open box nothing changed.
        assert_eq!(grid.get(IVec3::new(3, 0, 0)), BlockId::AIR);
        assert_eq!(grid.get(IVec3::new(0, 2, 0)), BlockId::AIR);
        assert_eq!(grid.get(IVec3::new(0, 0, 3)), BlockId::AIR);
    }

    #[test]
    fn fill_box_with_replace_overwrites() {
        let mut grid = small();
        grid.set(IVec3::new(1, 1, 1), BlockId::WOOD);
        grid.fill_box(BlockId::STONE, IVec3::ZERO, IVec3::new(2, 2, 2), true);
        assert_eq!(grid.get(IVec3::new(1, 1, 1)), BlockId::STONE);
        assert_eq!(grid.count(BlockId::STONE), 8);
    }

    #[test]
    fn fill_box_is_clipped() {
        let mut grid = small();
        grid.fill_box(BlockId::DIRT, IVec3::splat(-10), IVec3::splat(10), true);
        assert_eq!(grid.count(BlockId::DIRT), grid.dims().volume());

        let mut grid = small();
        grid.fill_box(BlockId::DIRT, IVec3::new(2, 0, 0), IVec3::new(1, 3, 5), true);
        assert_eq!(grid.count(BlockId::DIRT), 0);
    }

    #[test]
    fn from_bytes_validates() {
        let dims = GridDims::cube(2);
        let mut bytes = vec![0u8; 8];
        bytes[3] = BlockId::MIRROR.code();
        let grid = VoxelGrid::from_bytes(dims, &bytes).unwrap();
        assert_eq!(grid.get(dims.position(3)), BlockId::MIRROR);

        bytes[5] = 6;
        assert_eq!(
            VoxelGrid::from_bytes(dims, &bytes),
            Err(Error::InvalidBlock(6))
        );
        assert_eq!(
            VoxelGrid::from_bytes(dims, &bytes[..4]),
            Err(Error::SizeMismatch {
                expected: 8,
                actual: 4
            })
        );
    }

    #[test]
    fn mutations_bump_revision() {
        let mut grid = small();
        let r0 = grid.revision();
        grid.set(IVec3::ZERO, BlockId::DIRT);
        let r1 = grid.revision();
        grid.fill_box(BlockId::DIRT, IVec3::ZERO, IVec3::ONE, false);
        let r2 = grid.revision();
        grid.clear();
        assert!(r0 < r1 && r1 < r2 && r2 < grid.revision());
    }

    #[test]
    fn top_solid_finds_highest() {
        let mut grid = small();
        assert_eq!(grid.top_solid(1, 1), None);
        grid.set(IVec3::new(1, 0, 1), BlockId::STONE);
        grid.set(IVec3::new(1, 1, 1), BlockId::GRASS);
        assert_eq!(grid.top_solid(1, 1), Some(1));
        assert_eq!(grid.top_solid(-1, 1), None);
    }
}
