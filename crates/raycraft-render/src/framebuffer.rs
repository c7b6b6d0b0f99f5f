//! CPU render target.

use glam::{UVec2, Vec3};

/// Packed `0x00RRGGBB` pixels, row-major with row 0 at the top.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl Framebuffer {
    /// Black framebuffer of the given size; zero extents are raised to 1.
    pub fn new(size: UVec2) -> Self {
        let width = size.x.max(1);
        let height = size.y.max(1);
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize],
        }
    }

    /// Change the size, clearing the contents if it changed.
    pub fn resize(&mut self, size: UVec2) {
        let size = size.max(UVec2::ONE);
        if size != self.size() {
            *self = Self::new(size);
        }
    }

    #[inline]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub const fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub const fn size(&self) -> UVec2 {
        UVec2::new(self.width, self.height)
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> u32 {
        self.pixels[(y * self.width + x) as usize]
    }

    pub fn fill(&mut self, color: u32) {
        self.pixels.fill(color);
    }

    /// Invert a small plus sign at the centre.
    pub fn draw_crosshair(&mut self, arm: u32) {
        let cx = self.width / 2;
        let cy = self.height / 2;
        let width = self.width;
        let mut invert = |x: u32, y: u32| {
            let i = (y * width + x) as usize;
            self.pixels[i] ^= 0x00FF_FFFF;
        };
        for x in cx.saturating_sub(arm)..=(cx + arm).min(self.width - 1) {
            invert(x, cy);
        }
        for y in cy.saturating_sub(arm)..=(cy + arm).min(self.height - 1) {
            if y != cy {
                invert(cx, y);
            }
        }
    }

    /// Nearest-neighbour scale into a `dst_width` x `dst_height` buffer.
    pub fn blit_scaled(&self, dst: &mut [u32], dst_width: u32, dst_height: u32) {
        if dst_width == 0 || dst_height == 0 {
            return;
        }
        let columns: Vec<usize> = (0..dst_width)
            .map(|x| (u64::from(x) * u64::from(self.width) / u64::from(dst_width)) as usize)
            .collect();
        for (y, row) in dst
            .chunks_exact_mut(dst_width as usize)
            .take(dst_height as usize)
            .enumerate()
        {
            let src_y = (y as u64 * u64::from(self.height) / u64::from(dst_height)) as usize;
            let src_row = &self.pixels[src_y * self.width as usize..][..self.width as usize];
            for (dst_px, &src_x) in row.iter_mut().zip(&columns) {
                *dst_px = src_row[src_x];
            }
        }
    }

    /// Pixels as tightly packed RGBA bytes.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|&p| [(p >> 16) as u8, (p >> 8) as u8, p as u8, 0xFF])
            .collect()
    }
}

/// Pack a linear colour into `0x00RRGGBB`, clamping each channel.
#[inline]
pub fn pack_rgb(color: Vec3) -> u32 {
    let c = (color.clamp(Vec3::ZERO, Vec3::ONE) * 255.0).round();
    ((c.x as u32) << 16) | ((c.y as u32) << 8) | c.z as u32
}
