//! Tree placement.

use glam::IVec3;
use raycraft_core::{BlockId, Random};
use raycraft_voxel::VoxelGrid;

/// Horizontal offsets of the four lower-canopy corners, in carve order.
const FOLIAGE_CORNERS: [(i32, i32); 4] = [(-2, -2), (-2, 2), (2, 2), (2, -2)];
/// Horizontal offsets of the four crown corners, in carve order.
const CROWN_CORNERS: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, 1), (1, -1)];

/// A tree whose random choices have all been drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TreePlan {
    /// Trunk column
    pub x: i32,
    pub z: i32,
    /// Trunk height above its base block
    pub height: i32,
    /// Lower canopy carve per corner: 0 top, 1 bottom, 2 both, else none
    pub foliage_cuts: [i32; 4],
    /// Crown carve per corner: 0 both layers, else the top layer
    pub crown_cuts: [i32; 4],
}

impl TreePlan {
    /// Decide whether a tree grows at an anchor and, if so, draw its shape.
    ///
    /// Consumes one draw for a missing tree and twelve for a placed one.
    pub fn draw(rng: &mut Random, anchor_x: i32, anchor_z: i32) -> Option<Self> {
        if rng.next_int_bounded(4) != 0 {
            return None;
        }

        let x = anchor_x + rng.next_int_bounded(4) - 2;
        let z = anchor_z + rng.next_int_bounded(4) - 2;
        let height = 4 + rng.next_int_bounded(2);

        let mut foliage_cuts = [0; 4];
        let mut crown_cuts = [0; 4];
        for i in 0..4 {
            foliage_cuts[i] = rng.next_int_bounded(10);
            crown_cuts[i] = rng.next_int_bounded(10);
        }

        Some(Self {
            x,
            z,
            height,
            foliage_cuts,
            crown_cuts,
        })
    }

    /// Write the tree into `grid` with its trunk base at depth `base`.
    ///
    /// Cells outside the grid are skipped.
    pub fn place(&self, grid: &mut VoxelGrid, base: i32) {
        let mut canvas = DepthCanvas { grid };
        let crown_top = base - self.height;

        for depth in crown_top..=base {
            canvas.set(self.x, depth, self.z, BlockId::WOOD);
        }

        canvas.fill(
            BlockId::LEAVES,
            (self.x - 2, crown_top + 1, self.z - 2),
            (self.x + 3, crown_top + 3, self.z + 3),
        );
        canvas.fill(
            BlockId::LEAVES,
            (self.x - 1, crown_top - 1, self.z - 1),
            (self.x + 2, crown_top + 1, self.z + 2),
        );

        for i in 0..4 {
            let (fx, fz) = FOLIAGE_CORNERS[i];
            let (fx, fz) = (self.x + fx, self.z + fz);
            match self.foliage_cuts[i] {
                0 => canvas.set(fx, crown_top + 1, fz, BlockId::AIR),
                1 => canvas.set(fx, crown_top + 2, fz, BlockId::AIR),
                2 => {
                    canvas.set(fx, crown_top + 1, fz, BlockId::AIR);
                    canvas.set(fx, crown_top + 2, fz, BlockId::AIR);
                }
                _ => {}
            }

            let (cx, cz) = CROWN_CORNERS[i];
            let (cx, cz) = (self.x + cx, self.z + cz);
            canvas.set(cx, crown_top - 1, cz, BlockId::AIR);
            if self.crown_cuts[i] == 0 {
                canvas.set(cx, crown_top, cz, BlockId::AIR);
            }
        }
    }
}

/// Grid writes addressed by depth below the top layer, clipped to the grid.
struct DepthCanvas<'a> {
    grid: &'a mut VoxelGrid,
}

impl DepthCanvas<'_> {
    fn cell(&self, x: i32, depth: i32, z: i32) -> IVec3 {
        IVec3::new(x, self.grid.dims().y as i32 - 1 - depth, z)
    }

    fn set(&mut self, x: i32, depth: i32, z: i32, block: BlockId) {
        let cell = self.cell(x, depth, z);
        if self.grid.contains(cell) {
            self.grid.set(cell, block);
        }
    }

    /// Non-replacing fill of the half-open depth box `[min, max)`.
    fn fill(&mut self, block: BlockId, min: (i32, i32, i32), max: (i32, i32, i32)) {
        let size_y = self.grid.dims().y as i32;
        let lo = IVec3::new(min.0, size_y - max.1, min.2);
        let hi = IVec3::new(max.0, size_y - min.1, max.2);
        self.grid.fill_box(block, lo, hi, false);
    }
}
