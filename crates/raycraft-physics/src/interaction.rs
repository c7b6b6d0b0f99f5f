//! Block picking, breaking and placing.

use glam::IVec3;
use raycraft_core::constants::PLAYER_REACH;
use raycraft_core::BlockId;
use raycraft_voxel::{raycast, RayHit, VoxelGrid};
use tracing::debug;

use crate::collision::collider_points;
use crate::player::Player;

/// The block under the crosshair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockTarget {
    pub hit: RayHit,
}

impl BlockTarget {
    /// Cast from the player's eye along the view direction, up to reach.
    pub fn pick(grid: &VoxelGrid, player: &Player) -> Option<Self> {
        Self::pick_within(grid, player, PLAYER_REACH)
    }

    pub fn pick_within(grid: &VoxelGrid, player: &Player, reach: f32) -> Option<Self> {
        let hit: Option<RayHit> =
            raycast(grid, player.eye_position(), player.look_direction(), reach).into();
        hit.map(|hit| Self { hit })
    }

    /// Cell that would be removed.
    #[inline]
    pub const fn cell(&self) -> IVec3 {
        self.hit.cell
    }

    /// Cell in front of the targeted face, where a block would be placed.
    #[inline]
    pub fn place_cell(&self) -> IVec3 {
        self.hit.adjacent_cell()
    }
}

/// Remove the targeted block. Returns what was there.
pub fn break_block(grid: &mut VoxelGrid, target: &BlockTarget) -> Option<BlockId> {
    let cell = target.cell();
    let previous = grid.get_checked(cell).filter(|b| b.is_solid())?;
    grid.set(cell, BlockId::AIR);
    debug!(?cell, block = %previous, "Block broken");
    Some(previous)
}

/// Place `block` against the targeted face.
///
/// Nothing happens if the cell is outside the grid, already occupied, or
/// inside the player's body. Returns whether the block was placed.
pub fn place_block(
    grid: &mut VoxelGrid,
    target: &BlockTarget,
    block: BlockId,
    player: &Player,
) -> bool {
    let cell = target.place_cell();
    if block.is_air() || !grid.get_checked(cell).is_some_and(BlockId::is_air) {
        return false;
    }
    let overlaps_body = collider_points(player.position)
        .iter()
        .any(|p| p.floor().as_ivec3() == cell);
    if overlaps_body {
        return false;
    }
    grid.set(cell, block);
    debug!(?cell, %block, "Block placed");
    true
}

/// Selectable building blocks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hotbar {
    slots: Vec<BlockId>,
    selected: usize,
}

impl Hotbar {
    /// Blocks offered by default.
    pub const DEFAULT_SLOTS: [BlockId; 7] = [
        BlockId::GRASS,
        BlockId::DIRT,
        BlockId::STONE,
        BlockId::BRICKS,
        BlockId::WOOD,
        BlockId::LEAVES,
        BlockId::MIRROR,
    ];

    /// Create a hotbar from solid blocks. Air entries are dropped; an empty
    /// list falls back to the default slots.
    pub fn new(slots: impl IntoIterator<Item = BlockId>) -> Self {
        let mut slots: Vec<BlockId> = slots.into_iter().filter(|b| b.is_solid()).collect();
        if slots.is_empty() {
            slots = Self::DEFAULT_SLOTS.to_vec();
        }
        Self { slots, selected: 0 }
    }

    #[inline]
    pub fn selected(&self) -> BlockId {
        self.slots[self.selected]
    }

    #[inline]
    pub const fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn slots(&self) -> &[BlockId] {
        &self.slots
    }

    pub fn select_next(&mut self) -> BlockId {
        self.selected = (self.selected + 1) % self.slots.len();
        self.selected()
    }

    pub fn select_previous(&mut self) -> BlockId {
        self.selected = (self.selected + self.slots.len() - 1) % self.slots.len();
        self.selected()
    }

    /// Move the selection by a scroll amount; positive scrolls forward.
    pub fn scroll(&mut self, steps: i32) -> BlockId {
        let len = self.slots.len() as i32;
        self.selected = (self.selected as i32 + steps).rem_euclid(len) as usize;
        self.selected()
    }
}

impl Default for Hotbar {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SLOTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use raycraft_core::Face;
    use raycraft_voxel::GridDims;

    fn setup() -> (VoxelGrid, Player) {
        let mut grid = VoxelGrid::new(GridDims::cube(16)).unwrap();
        grid.fill_box(BlockId::STONE, IVec3::ZERO, IVec3::new(16, 4, 16), true);
        let mut player = Player::new(Vec3::new(8.5, 4.0, 8.5));
        player.set_orientation(0.0, -std::f32::consts::FRAC_PI_2);
        (grid, player)
    }

    #[test]
    fn pick_looks_down_at_floor() {
        let (grid, player) = setup();
        let target = BlockTarget::pick(&grid, &player).unwrap();
        assert_eq!(target.cell(), IVec3::new(8, 3, 8));
        assert_eq!(target.hit.face, Face::PosY);
        assert_eq!(target.place_cell(), IVec3::new(8, 4, 8));
    }

    #[test]
    fn pick_respects_reach() {
        let (grid, mut player) = setup();
        player.position.y = 9.0;
        assert!(BlockTarget::pick(&grid, &player).is_none());
        assert!(BlockTarget::pick_within(&grid, &player, 10.0).is_some());
    }

    #[test]
    fn break_then_pick_deeper() {
        let (mut grid, player) = setup();
        let target = BlockTarget::pick(&grid, &player).unwrap();
        assert_eq!(break_block(&mut grid, &target), Some(BlockId::STONE));
        assert!(grid.get(IVec3::new(8, 3, 8)).is_air());

        let next = BlockTarget::pick(&grid, &player).unwrap();
        assert_eq!(next.cell(), IVec3::new(8, 2, 8));
        assert_eq!(break_block(&mut grid, &target), None);
    }

    #[test]
    fn place_refuses_body_cell() {
        let (mut grid, player) = setup();
        let target = BlockTarget::pick(&grid, &player).unwrap();
        // The place cell is where the feet stand.
        assert!(!place_block(&mut grid, &target, BlockId::BRICKS, &player));
        assert!(grid.get(IVec3::new(8, 4, 8)).is_air());
    }

    #[test]
    fn place_against_wall() {
        let (mut grid, mut player) = setup();
        grid.set(IVec3::new(8, 5, 11), BlockId::WOOD);
        player.set_orientation(0.0, 0.0);
        player.position.y = 4.0;

        let target = BlockTarget::pick(&grid, &player).unwrap();
        assert_eq!(target.cell(), IVec3::new(8, 5, 11));
        assert_eq!(target.hit.face, Face::NegZ);
        assert!(place_block(&mut grid, &target, BlockId::MIRROR, &player));
        assert_eq!(grid.get(IVec3::new(8, 5, 10)), BlockId::MIRROR);
        assert!(!place_block(&mut grid, &target, BlockId::MIRROR, &player));
        assert!(!place_block(&mut grid, &target, BlockId::AIR, &player));
    }

    #[test]
    fn hotbar_cycles() {
        let mut bar = Hotbar::default();
        assert_eq!(bar.selected(), BlockId::GRASS);
        assert_eq!(bar.select_previous(), BlockId::MIRROR);
        assert_eq!(bar.select_next(), BlockId::GRASS);
        assert_eq!(bar.scroll(3), BlockId::BRICKS);
        assert_eq!(bar.scroll(-12), BlockId::LEAVES);
    }

    #[test]
    fn hotbar_drops_air() {
        let bar = Hotbar::new([BlockId::AIR, BlockId::WOOD]);
        assert_eq!(bar.slots(), &[BlockId::WOOD]);
        assert_eq!(Hotbar::new([BlockId::AIR]).slots().len(), 7);
    }
}
