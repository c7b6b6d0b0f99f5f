//! Procedural terrain generation.
//!
//! The generator works in *depth*, the distance below the top layer of the
//! grid (`depth = size_y - 1 - y`). Surfaces, trunks and leaf boxes are all
//! laid out in depth and converted to y-up grid coordinates on write.

use std::time::Instant;

use glam::IVec3;
use rayon::prelude::*;
use raycraft_core::{BlockId, Random, ValueNoise};
use raycraft_voxel::VoxelGrid;
use tracing::{debug, info, info_span};

use crate::trees::TreePlan;
use crate::WorldSeed;

/// Terrain recipe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GenerationMode {
    /// Noise height field with grass, dirt, stone layers and trees
    #[default]
    Modern,
    /// Random rock layers below a jittered half-height line
    Classic,
}

impl GenerationMode {
    /// The recipe selected by the `classic` build feature.
    pub const fn for_build() -> Self {
        if raycraft_core::constants::CLASSIC {
            Self::Classic
        } else {
            Self::Modern
        }
    }
}

/// Block codes a classic world draws from, indexed by `draw - 1`.
///
/// Draws 3 and 6 have no block of their own and become dirt.
const CLASSIC_PALETTE: [BlockId; 8] = [
    BlockId::GRASS,
    BlockId::DIRT,
    BlockId::DIRT,
    BlockId::STONE,
    BlockId::BRICKS,
    BlockId::DIRT,
    BlockId::WOOD,
    BlockId::LEAVES,
];

/// Terrain generator configuration.
#[derive(Debug, Clone)]
pub struct TerrainConfig {
    /// Which recipe to run.
    pub mode: GenerationMode,
    /// Horizontal scale of terrain features, in cells per noise unit.
    pub terrain_scale: f32,
    /// Surface displacement at full noise.
    pub terrain_amplitude: f32,
    /// Thickness of the dirt layer under the grass.
    pub dirt_depth: i32,
    /// Distance between tree anchors.
    pub tree_stride: i32,
    /// Anchor-free margin at the world edge.
    pub tree_border: i32,
    /// Whether the tree pass runs.
    pub trees: bool,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            mode: GenerationMode::for_build(),
            terrain_scale: 32.0,
            terrain_amplitude: 10.0,
            dirt_depth: 5,
            tree_stride: 8,
            tree_border: 4,
            trees: true,
        }
    }
}

impl TerrainConfig {
    pub const fn with_mode(mut self, mode: GenerationMode) -> Self {
        self.mode = mode;
        self
    }

    pub const fn with_trees(mut self, trees: bool) -> Self {
        self.trees = trees;
        self
    }
}

/// What a generation pass produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorldSummary {
    pub seed: WorldSeed,
    pub mode: GenerationMode,
    pub trees: usize,
    pub solid_cells: usize,
}

/// Procedural terrain generator.
pub struct TerrainGenerator {
    config: TerrainConfig,
    noise: ValueNoise,
}

impl TerrainGenerator {
    /// Create a new terrain generator with the given configuration.
    pub fn new(config: TerrainConfig) -> Self {
        Self {
            config,
            noise: ValueNoise::new(),
        }
    }

    /// Get the terrain configuration.
    pub const fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// Depth of the grass layer of the column at `(x, z)` in a grid of the
    /// given height.
    pub fn surface_depth(&self, x: i32, z: i32, size_y: u32) -> i32 {
        let half = size_y as f32 / 2.0;
        let n = self.noise.sample(
            x as f32 / self.config.terrain_scale,
            z as f32 / self.config.terrain_scale,
        );
        (half + n * self.config.terrain_amplitude).round() as i32
    }

    /// Block at `depth` in a column whose grass sits at `surface`.
    pub const fn block_at_depth(&self, depth: i32, surface: i32) -> BlockId {
        if depth > surface + self.config.dirt_depth {
            BlockId::STONE
        } else if depth > surface {
            BlockId::DIRT
        } else if depth == surface {
            BlockId::GRASS
        } else {
            BlockId::AIR
        }
    }

    /// Overwrite `grid` with the world for `seed`.
    pub fn generate(&self, grid: &mut VoxelGrid, seed: WorldSeed) -> WorldSummary {
        let _span = info_span!("generate_world", seed, mode = ?self.config.mode).entered();
        let start = Instant::now();
        let dims = grid.dims();
        info!("Generating {}x{}x{} world", dims.x, dims.y, dims.z);

        let mut rng = Random::new(seed);
        grid.clear();

        let trees = match self.config.mode {
            GenerationMode::Modern => {
                self.generate_terrain(grid);
                if self.config.trees {
                    self.populate_trees(grid, &mut rng)
                } else {
                    0
                }
            }
            GenerationMode::Classic => {
                Self::generate_classic(grid, &mut rng);
                0
            }
        };

        let summary = WorldSummary {
            seed,
            mode: self.config.mode,
            trees,
            solid_cells: grid.cells().iter().filter(|b| b.is_solid()).count(),
        };
        info!(
            trees = summary.trees,
            solid = summary.solid_cells,
            "World generated in {:.1}ms",
            start.elapsed().as_secs_f64() * 1000.0
        );
        summary
    }

    /// Surface depth of every column, x fastest.
    fn height_map(&self, size_x: u32, size_y: u32, size_z: u32) -> Vec<i32> {
        (0..size_x as usize * size_z as usize)
            .into_par_iter()
            .map(|i| {
                let x = (i % size_x as usize) as i32;
                let z = (i / size_x as usize) as i32;
                self.surface_depth(x, z, size_y)
            })
            .collect()
    }

    fn generate_terrain(&self, grid: &mut VoxelGrid) {
        let dims = grid.dims();
        let heights = self.height_map(dims.x, dims.y, dims.z);
        let size_y = dims.y as i32;

        for z in 0..dims.z as i32 {
            for x in 0..dims.x as i32 {
                let surface = heights[x as usize + z as usize * dims.x as usize];
                for depth in 0..size_y {
                    let block = self.block_at_depth(depth, surface);
                    if block.is_solid() {
                        grid.set(IVec3::new(x, size_y - 1 - depth, z), block);
                    }
                }
            }
        }
        debug!("Terrain pass done");
    }

    fn populate_trees(&self, grid: &mut VoxelGrid, rng: &mut Random) -> usize {
        let dims = grid.dims();
        let stride = self.config.tree_stride.max(1) as usize;
        let border = self.config.tree_border;
        let mut planted = 0;

        for x in (border..dims.x as i32 - border).step_by(stride) {
            for z in (border..dims.z as i32 - border).step_by(stride) {
                if let Some(tree) = TreePlan::draw(rng, x, z) {
                    let top = self.surface_depth(tree.x, tree.z, dims.y) - 1;
                    tree.place(grid, top);
                    planted += 1;
                }
            }
        }
        debug!(planted, "Tree pass done");
        planted
    }

    fn generate_classic(grid: &mut VoxelGrid, rng: &mut Random) {
        let dims = grid.dims();
        let size_y = dims.y as i32;
        let threshold = size_y / 2;

        // The extra x == size_x column only consumes draws.
        for x in (0..=dims.x as i32).rev() {
            for depth in 0..size_y {
                for z in 0..dims.z as i32 {
                    let block = if depth > threshold + rng.next_int_bounded(8) {
                        CLASSIC_PALETTE[rng.next_int_bounded(8) as usize]
                    } else {
                        BlockId::AIR
                    };
                    if x < dims.x as i32 && block.is_solid() {
                        grid.set(IVec3::new(x, size_y - 1 - depth, z), block);
                    }
                }
            }
        }
    }
}

impl Default for TerrainGenerator {
    fn default() -> Self {
        Self::new(TerrainConfig::default())
    }
}

/// Generate a world with a fresh random seed and return that seed.
pub fn generate_world(grid: &mut VoxelGrid) -> WorldSeed {
    let seed = Random::from_entropy().next_long();
    generate_world_with_seed(grid, seed);
    seed
}

/// Generate the world for `seed` with the default configuration.
pub fn generate_world_with_seed(grid: &mut VoxelGrid, seed: WorldSeed) -> WorldSummary {
    TerrainGenerator::default().generate(grid, seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use raycraft_voxel::GridDims;

    fn world(config: TerrainConfig, dims: GridDims, seed: WorldSeed) -> VoxelGrid {
        let mut grid = VoxelGrid::new(dims).unwrap();
        TerrainGenerator::new(config).generate(&mut grid, seed);
        grid
    }

    fn modern() -> TerrainConfig {
        TerrainConfig::default().with_mode(GenerationMode::Modern)
    }

    #[test]
    fn same_seed_same_world() {
        let a = world(modern(), GridDims::REDUCED, 12345);
        let b = world(modern(), GridDims::REDUCED, 12345);
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn regeneration_ignores_previous_contents() {
        let generator = TerrainGenerator::new(modern());
        let mut grid = VoxelGrid::new(GridDims::REDUCED).unwrap();
        generator.generate(&mut grid, 99);
        let first = grid.as_bytes().to_vec();
        grid.fill_box(BlockId::MIRROR, IVec3::ZERO, IVec3::splat(64), true);
        generator.generate(&mut grid, 99);
        assert_eq!(grid.as_bytes(), first.as_slice());
    }

    #[test]
    fn different_seeds_place_different_trees() {
        let a = world(modern(), GridDims::REDUCED, 1);
        let b = world(modern(), GridDims::REDUCED, 2);
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn seed_zero_and_negative_are_valid() {
        for seed in [0, -1, i64::MIN, i64::MAX] {
            let a = world(modern(), GridDims::new(24, 64, 24), seed);
            let b = world(modern(), GridDims::new(24, 64, 24), seed);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn columns_are_layered() {
        let generator = TerrainGenerator::new(modern().with_trees(false));
        let dims = GridDims::new(32, 64, 32);
        let mut grid = VoxelGrid::new(dims).unwrap();
        generator.generate(&mut grid, 7);

        for z in 0..32 {
            for x in 0..32 {
                let surface = generator.surface_depth(x, z, dims.y);
                let grass_y = 63 - surface;
                assert_eq!(grid.get(IVec3::new(x, grass_y, z)), BlockId::GRASS);
                assert_eq!(grid.top_solid(x, z), Some(grass_y));
                for y in grass_y - 5..grass_y {
                    assert_eq!(grid.get(IVec3::new(x, y, z)), BlockId::DIRT);
                }
                for y in 0..grass_y - 5 {
                    assert_eq!(grid.get(IVec3::new(x, y, z)), BlockId::STONE);
                }
            }
        }
    }

    #[test]
    fn surface_stays_near_half_height() {
        let generator = TerrainGenerator::new(modern());
        for z in (0..512).step_by(17) {
            for x in (0..512).step_by(13) {
                let s = generator.surface_depth(x, z, 64);
                assert!((32..=42).contains(&s), "surface {s} at ({x}, {z})");
            }
        }
    }

    #[test]
    fn block_at_depth_layers() {
        let generator = TerrainGenerator::new(modern());
        assert_eq!(generator.block_at_depth(30, 33), BlockId::AIR);
        assert_eq!(generator.block_at_depth(33, 33), BlockId::GRASS);
        assert_eq!(generator.block_at_depth(34, 33), BlockId::DIRT);
        assert_eq!(generator.block_at_depth(38, 33), BlockId::DIRT);
        assert_eq!(generator.block_at_depth(39, 33), BlockId::STONE);
    }

    #[test]
    fn trees_are_rooted_on_grass() {
        let generator = TerrainGenerator::new(modern());
        let mut grid = VoxelGrid::new(GridDims::REDUCED).unwrap();
        let summary = generator.generate(&mut grid, 2024);

        let wood = grid.count(BlockId::WOOD);
        assert!(wood >= summary.trees * 5);
        for (i, block) in grid.cells().iter().enumerate() {
            if *block == BlockId::WOOD {
                let below = grid.dims().position(i) - IVec3::Y;
                let under = grid.get(below);
                assert!(
                    under == BlockId::WOOD || under == BlockId::GRASS,
                    "trunk over {under} at {below}"
                );
            }
        }
    }

    #[test]
    fn classic_is_deterministic_and_closed() {
        let classic = TerrainConfig::default().with_mode(GenerationMode::Classic);
        let a = world(classic.clone(), GridDims::REDUCED, 5);
        let b = world(classic, GridDims::REDUCED, 5);
        assert_eq!(a.as_bytes(), b.as_bytes());
        for &code in a.as_bytes() {
            assert!(BlockId::try_from(code).is_ok());
        }
    }

    #[test]
    fn classic_upper_half_is_air() {
        let classic = TerrainConfig::default().with_mode(GenerationMode::Classic);
        let grid = world(classic, GridDims::REDUCED, 5);
        for z in 0..64 {
            for y in 31..64 {
                for x in 0..64 {
                    assert!(grid.get(IVec3::new(x, y, z)).is_air());
                }
            }
        }
        assert!(grid.count(BlockId::AIR) < grid.dims().volume());
    }

    #[test]
    fn seeded_entry_point_is_reproducible() {
        let mut a = VoxelGrid::new(GridDims::new(40, 64, 40)).unwrap();
        let mut b = VoxelGrid::new(GridDims::new(40, 64, 40)).unwrap();
        let seed = generate_world(&mut a);
        generate_world_with_seed(&mut b, seed);
        assert_eq!(a, b);
    }
}
