//! Block codes.

use std::fmt;

use bytemuck::NoUninit;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Material occupying one grid cell.
///
/// The set of codes is closed: values are only obtainable through the
/// associated constants or the validating [`TryFrom<u8>`] conversion, so a
/// grid can never hold an unknown code. Code 0 is air.
///
/// Blocks can be viewed as bytes but bytes cannot be reinterpreted as
/// blocks:
///
/// ```compile_fail
/// let forged: raycraft_core::BlockId = bytemuck::cast(6u8);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, NoUninit, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(transparent)]
pub struct BlockId(u8);

impl BlockId {
    /// Air block (empty space)
    pub const AIR: Self = Self(0);
    /// Grass-topped dirt
    pub const GRASS: Self = Self(1);
    /// Dirt block
    pub const DIRT: Self = Self(2);
    /// Stone block
    pub const STONE: Self = Self(4);
    /// Brick block
    pub const BRICKS: Self = Self(5);
    /// Tree trunk block
    pub const WOOD: Self = Self(7);
    /// Tree leaves block
    pub const LEAVES: Self = Self(8);
    /// Reflective block
    pub const MIRROR: Self = Self(9);

    /// Every valid block, in code order.
    pub const ALL: [Self; 8] = [
        Self::AIR,
        Self::GRASS,
        Self::DIRT,
        Self::STONE,
        Self::BRICKS,
        Self::WOOD,
        Self::LEAVES,
        Self::MIRROR,
    ];

    /// Number of texture slots; codes index into `0..TEXTURE_SLOTS`.
    pub const TEXTURE_SLOTS: usize = 16;

    /// Raw code as stored in the grid and uploaded to the renderer
    #[inline]
    pub const fn code(self) -> u8 {
        self.0
    }

    /// Returns true if this block is air (empty)
    #[inline]
    pub const fn is_air(self) -> bool {
        self.0 == 0
    }

    /// Returns true if this block is solid (not air)
    #[inline]
    pub const fn is_solid(self) -> bool {
        self.0 != 0
    }

    /// Returns true if rays bounce off this block
    #[inline]
    pub const fn is_reflective(self) -> bool {
        self.0 == Self::MIRROR.0
    }

    /// Human readable block name
    pub const fn name(self) -> &'static str {
        match self.0 {
            0 => "air",
            1 => "grass",
            2 => "dirt",
            4 => "stone",
            5 => "bricks",
            7 => "wood",
            8 => "leaves",
            9 => "mirror",
            _ => "unknown",
        }
    }
}

impl TryFrom<u8> for BlockId {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 | 1 | 2 | 4 | 5 | 7 | 8 | 9 => Ok(Self(code)),
            _ => Err(Error::InvalidBlock(code)),
        }
    }
}

impl From<BlockId> for u8 {
    fn from(block: BlockId) -> Self {
        block.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
