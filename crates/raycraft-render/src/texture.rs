//! Procedural block textures.
//!
//! Every block code owns a 16 x 48 texel strip: rows `0..16` are the top face,
//! `16..32` the sides and `32..48` the bottom. Texels are packed `0xAARRGGBB`;
//! an alpha of zero marks a see-through texel.
//!
//! The atlas is drawn from a fixed-seed [`Random`] in a fixed order, so the
//! same textures come out on every run.

use std::f32::consts::PI;

use raycraft_core::constants::{CLASSIC, TEXTURE_RES};
use raycraft_core::{BlockId, Face, Random, ValueNoise};
use tracing::info;

const ATLAS_SEED: i64 = 151_910_774_187_927;

const RES: i32 = TEXTURE_RES as i32;
/// Texel rows per block strip
pub const STRIP_ROWS: u32 = TEXTURE_RES * 3;
const STRIP_LEN: usize = (TEXTURE_RES * STRIP_ROWS) as usize;
const SLOTS: usize = BlockId::TEXTURE_SLOTS;

const DEFAULT_TINT: u32 = 0x96_6C4A;

/// Which texture recipe set to draw.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextureStyle {
    #[default]
    Modern,
    Classic,
}

impl TextureStyle {
    /// Style selected by the `classic` feature.
    pub const fn for_build() -> Self {
        if CLASSIC {
            Self::Classic
        } else {
            Self::Modern
        }
    }
}

/// Texels for every block code.
#[derive(Clone)]
pub struct TextureAtlas {
    style: TextureStyle,
    texels: Vec<u32>,
}

impl TextureAtlas {
    pub fn generate(style: TextureStyle) -> Self {
        let mut rng = Random::new(ATLAS_SEED);
        let noise = ValueNoise::new();
        let mut texels = vec![0; STRIP_LEN * SLOTS];

        for code in 1..SLOTS {
            let strip = &mut texels[code * STRIP_LEN..(code + 1) * STRIP_LEN];
            match style {
                TextureStyle::Modern => draw_modern(strip, code as u8, &mut rng),
                TextureStyle::Classic => draw_classic(strip, code as u8, &mut rng, &noise),
            }
        }

        info!(?style, slots = SLOTS, "Texture atlas generated");
        Self { style, texels }
    }

    #[inline]
    pub const fn style(&self) -> TextureStyle {
        self.style
    }

    /// Texel at `(column, row)` of a block code's strip.
    ///
    /// Coordinates wrap, so any integer texel position is valid.
    #[inline]
    pub fn texel(&self, code: u8, column: u32, row: u32) -> u32 {
        let slot = usize::from(code) % SLOTS;
        let column = column % TEXTURE_RES;
        let row = row % STRIP_ROWS;
        self.texels[slot * STRIP_LEN + (row * TEXTURE_RES + column) as usize]
    }

    /// Texel seen where a face is struck at texture coordinates `uv` in `[0, 1)`.
    pub fn sample(&self, code: u8, face: Face, u: f32, v: f32) -> u32 {
        let base = match face {
            Face::PosY => 0,
            Face::NegY => 2 * TEXTURE_RES,
            _ => TEXTURE_RES,
        };
        let column = (u * TEXTURE_RES as f32) as u32;
        let row = ((v * TEXTURE_RES as f32) as u32).min(TEXTURE_RES - 1);
        self.texel(code, column, base + row)
    }

    /// Raw strip storage, one `0xAARRGGBB` per texel.
    pub fn texels(&self) -> &[u32] {
        &self.texels
    }
}

impl Default for TextureAtlas {
    fn default() -> Self {
        Self::generate(TextureStyle::for_build())
    }
}

impl std::fmt::Debug for TextureAtlas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextureAtlas")
            .field("style", &self.style)
            .field("texels", &self.texels.len())
            .finish()
    }
}

/// Whether a texel lets rays through.
#[inline]
pub const fn is_transparent(texel: u32) -> bool {
    texel >> 24 == 0
}

/// Split a texel into linear `[0, 1]` channels.
#[inline]
pub fn texel_rgb(texel: u32) -> glam::Vec3 {
    glam::Vec3::new(
        ((texel >> 16) & 0xFF) as f32,
        ((texel >> 8) & 0xFF) as f32,
        (texel & 0xFF) as f32,
    ) / 255.0
}

fn shade(tint: u32, brightness: i32) -> u32 {
    let alpha = if tint & 0xFF_FFFF == 0 { 0 } else { 0xFF };
    let brightness = brightness.max(0) as u32;
    let channel = |shift: u32| (((tint >> shift) & 0xFF) * brightness / 255).min(0xFF);
    (alpha << 24) | (channel(16) << 16) | (channel(8) << 8) | channel(0)
}

const fn is(code: u8, block: BlockId) -> bool {
    code == block.code()
}

fn draw_modern(strip: &mut [u32], code: u8, rng: &mut Random) {
    let mut brightness = 0xFF - rng.next_int_bounded(0x60);

    for y in 0..RES * 3 {
        for x in 0..RES {
            if !is(code, BlockId::STONE) || rng.next_int_bounded(3) == 0 {
                brightness = 0xFF - rng.next_int_bounded(0x60);
            }
            let mut tint = DEFAULT_TINT;

            if is(code, BlockId::STONE) {
                tint = 0x7F_7F7F;
            } else if is(code, BlockId::GRASS) {
                let fringe = ((x * x * 3 + x * 81) >> 2) & 3;
                if y < fringe + RES + 2 {
                    tint = 0x6A_AA40;
                } else if y < fringe + RES + 3 {
                    brightness = brightness * 2 / 3;
                }
            } else if is(code, BlockId::WOOD) {
                tint = 0x67_5231;
                let on_side = (RES..RES * 2).contains(&y);
                let in_rim = (y > 0 && y < RES - 1) || (y > RES * 2 && y < RES * 3 - 1);
                if !on_side && x > 0 && x < RES - 1 && in_rim {
                    tint = 0xBC_9862;
                    let ring = ring_distance(x, y);
                    brightness = 196 - rng.next_int_bounded(32) + ring % 3 * 32;
                } else if rng.next_int_bounded(2) == 0 {
                    brightness = brightness * (150 - (x & 1) * 100) / 100;
                }
            } else if is(code, BlockId::BRICKS) {
                tint = 0xB5_3A15;
                if (x + y / 4 * 4) % 8 == 0 || y % 4 == 0 {
                    tint = 0xBC_AFA5;
                }
            }

            let mut level = brightness;
            if y >= RES * 2 {
                level /= 2;
            }

            if is(code, BlockId::LEAVES) {
                tint = 0x50_D937;
                if rng.next_int_bounded(2) == 0 {
                    tint = 0;
                    level = 0xFF;
                }
            }

            strip[(y * RES + x) as usize] = shade(tint, level);
        }
    }
}

fn draw_classic(strip: &mut [u32], code: u8, rng: &mut Random, noise: &ValueNoise) {
    // Unused, but later strips depend on the draw.
    rng.next_int_bounded(0x60);

    for y in 0..RES * 3 {
        for x in 0..RES {
            let (xf, yf) = (x as f32, y as f32);
            let grain = noise.sample(xf, yf);
            let mut brightness = ((1.0 - grain * 0.5) * 255.0) as i32;
            let mut tint = DEFAULT_TINT;

            if is(code, BlockId::STONE) {
                tint = 0x7F_7F7F;
                let band = noise.sample(xf * 0.5, yf * 2.0).abs().round();
                brightness = ((0.75 + band * 0.125) * 255.0) as i32;
            } else if is(code, BlockId::GRASS) {
                let fringe = ((x * x * 3 + x * 81) / 2) % 4;
                if y < fringe + RES + 2 {
                    tint = 0x7A_FF40;
                } else if y < fringe + RES + 3 {
                    brightness /= 3;
                }
            } else if is(code, BlockId::WOOD) {
                tint = 0x77_6644;
                let (dx, dy) = ring_offsets(x, y);
                let ring = dx.max(dy);
                let spread = ((dx * dx + dy * dy) as f32).sqrt() * 0.25 + ring as f32 * 0.75;
                let grain_scale = 255.0 * (180.0 - (xf * PI).sin() * 50.0) / 100.0;
                if y < RES || y > RES * 2 {
                    if spread < 8.0 {
                        tint = 0xCC_AA77;
                        brightness = 196 - rng.next_int_bounded(32) + ring % 3 * 32;
                    } else if dx > dy {
                        brightness = (noise.sample(yf, xf * 0.25) * grain_scale) as i32;
                    } else {
                        brightness = (noise.sample(xf, yf * 0.25) * grain_scale) as i32;
                    }
                } else {
                    brightness = (noise.sample(xf, yf * 0.25) * grain_scale) as i32;
                }
            } else if is(code, BlockId::BRICKS) {
                tint = 0x44_4444;
                let mut brick_dx = (x % 8 - 4).abs();
                let brick_dy = (y % 4 - 2).abs() * 2;
                if (y / 4) % 2 == 1 {
                    brick_dx = ((x + 4) % 8 - 4).abs();
                }
                let (bx, by) = (brick_dx as f32, brick_dy as f32);
                let mortar = bx.hypot(by) * 0.5 + bx.max(by) * 0.5;
                if mortar > 4.0 {
                    tint = 0xAA_AAAA;
                }
            }

            if is(code, BlockId::LEAVES) {
                tint = 0;
                let mut dx = ((x % 4 - 2).abs() * 2) as f32;
                let dy = (y % 8 - 4) as f32;
                if (y / 8) % 2 == 1 {
                    dx = ((x + 2) % 4 - 2).abs() as f32 * 2.0;
                }
                dx += grain;
                let petal = if dy < 0.0 { dx.hypot(dy) } else { dx + dy.abs() };
                if petal < 3.5 {
                    tint = 0xFF_CCDD;
                } else if petal < 4.0 {
                    tint = 0xCC_AABB;
                }
            }

            strip[(y * RES + x) as usize] = shade(tint, brightness);
        }
    }
}

/// Distance from the trunk centre folded onto one quadrant, per axis.
fn ring_offsets(x: i32, y: i32) -> (i32, i32) {
    const CENTER: i32 = RES / 2 - 1;
    let fold = |d: i32| if d < 0 { 1 - d } else { d };
    (fold(x - CENTER), fold(y % RES - CENTER))
}

fn ring_distance(x: i32, y: i32) -> i32 {
    let (dx, dy) = ring_offsets(x, y);
    dx.max(dy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_is_deterministic() {
        let a = TextureAtlas::generate(TextureStyle::Modern);
        let b = TextureAtlas::generate(TextureStyle::Modern);
        assert_eq!(a.texels(), b.texels());
        let c = TextureAtlas::generate(TextureStyle::Classic);
        assert_ne!(a.texels(), c.texels());
    }

    #[test]
    fn air_slot_is_empty() {
        let atlas = TextureAtlas::generate(TextureStyle::Modern);
        assert!(atlas.texels()[..STRIP_LEN].iter().all(|&t| t == 0));
    }

    #[test]
    fn opaque_blocks_have_no_holes() {
        let atlas = TextureAtlas::generate(TextureStyle::Modern);
        for block in [BlockId::GRASS, BlockId::DIRT, BlockId::STONE, BlockId::BRICKS, BlockId::WOOD] {
            for row in 0..STRIP_ROWS {
                for column in 0..TEXTURE_RES {
                    let texel = atlas.texel(block.code(), column, row);
                    assert!(!is_transparent(texel), "{block} has a hole at {column},{row}");
                }
            }
        }
    }

    #[test]
    fn leaves_are_partly_transparent() {
        let atlas = TextureAtlas::generate(TextureStyle::Modern);
        let code = BlockId::LEAVES.code();
        let holes = (0..STRIP_ROWS)
            .flat_map(|row| (0..TEXTURE_RES).map(move |column| (column, row)))
            .filter(|&(column, row)| is_transparent(atlas.texel(code, column, row)))
            .count();
        let total = (TEXTURE_RES * STRIP_ROWS) as usize;
        assert!(holes > total / 4 && holes < total * 3 / 4, "holes = {holes}");
    }

    #[test]
    fn grass_top_is_green_and_bottom_is_dirt() {
        let atlas = TextureAtlas::generate(TextureStyle::Modern);
        let top = atlas.sample(BlockId::GRASS.code(), Face::PosY, 0.5, 0.5);
        let green = texel_rgb(top);
        assert!(green.y > green.x && green.y > green.z);

        let bottom = atlas.sample(BlockId::GRASS.code(), Face::NegY, 0.5, 0.5);
        let brown = texel_rgb(bottom);
        assert!(brown.x > brown.z);
    }

    #[test]
    fn bottom_rows_are_darker() {
        let atlas = TextureAtlas::generate(TextureStyle::Modern);
        let code = BlockId::DIRT.code();
        let mean = |rows: std::ops::Range<u32>| {
            let mut sum = 0.0;
            let mut n = 0.0;
            for row in rows {
                for column in 0..TEXTURE_RES {
                    sum += texel_rgb(atlas.texel(code, column, row)).x;
                    n += 1.0;
                }
            }
            sum / n
        };
        assert!(mean(32..48) < mean(0..16) * 0.75);
    }

    #[test]
    fn brick_mortar_lines() {
        let atlas = TextureAtlas::generate(TextureStyle::Modern);
        let mortar = atlas.texel(BlockId::BRICKS.code(), 3, 0);
        let mortar_rgb = texel_rgb(mortar);
        // Mortar rows are grey, bricks are red.
        assert!((mortar_rgb.x - mortar_rgb.y).abs() < 0.1);
        let brick = texel_rgb(atlas.texel(BlockId::BRICKS.code(), 3, 1));
        assert!(brick.x > brick.y * 2.0);
    }

    #[test]
    fn classic_strip_draws_once_per_plain_block() {
        let noise = ValueNoise::new();
        let mut strip = vec![0; STRIP_LEN];
        let mut rng = Random::new(ATLAS_SEED);
        draw_classic(&mut strip, BlockId::DIRT.code(), &mut rng, &noise);

        let mut expected = Random::new(ATLAS_SEED);
        expected.next_int_bounded(0x60);
        assert_eq!(rng, expected);
        assert!(strip.iter().all(|&t| !is_transparent(t)));
    }

    #[test]
    fn texel_coordinates_wrap() {
        let atlas = TextureAtlas::generate(TextureStyle::Modern);
        let code = BlockId::STONE.code();
        assert_eq!(atlas.texel(code, 17, 2), atlas.texel(code, 1, 2));
        assert_eq!(atlas.texel(code, 1, 50), atlas.texel(code, 1, 2));
    }

    #[test]
    fn shade_scales_channels() {
        assert_eq!(shade(0xFF_FFFF, 255), 0xFFFF_FFFF);
        assert_eq!(shade(0xFF_0000, 0), 0xFF00_0000);
        assert_eq!(shade(0, 255) >> 24, 0);
        assert_eq!(shade(0x80_8080, 510), 0xFFFF_FFFF);
    }
}
