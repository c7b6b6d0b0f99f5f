//! Headless rendering and visual regression testing.
//!
//! Frames are traced on the CPU exactly as the viewer traces them, so the
//! harness needs no window or display.

use std::path::Path;

use glam::UVec2;
use image::{ImageBuffer, Rgba};
use raycraft_render::{
    pack_rgb, Camera, Framebuffer, Lighting, RenderConfig, Raytracer, TextureAtlas, TextureStyle,
    WorldVolume,
};
use raycraft_voxel::VoxelGrid;

use crate::{Result, TestError, VisualTestConfig};

pub type RgbaImage = ImageBuffer<Rgba<u8>, Vec<u8>>;

/// Off-screen renderer with fixed lighting.
pub struct HeadlessRenderer {
    raytracer: Raytracer,
    atlas: TextureAtlas,
    lighting: Lighting,
    width: u32,
    height: u32,
}

impl HeadlessRenderer {
    /// Create a renderer producing `width` x `height` images at noon.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            raytracer: Raytracer::default(),
            atlas: TextureAtlas::generate(TextureStyle::Modern),
            lighting: Lighting::noon(),
            width: width.max(1),
            height: height.max(1),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.raytracer = Raytracer::new(config);
        self
    }

    #[must_use]
    pub fn with_lighting(mut self, lighting: Lighting) -> Self {
        self.lighting = lighting;
        self
    }

    #[must_use]
    pub fn with_texture_style(mut self, style: TextureStyle) -> Self {
        self.atlas = TextureAtlas::generate(style);
        self
    }

    pub const fn lighting(&self) -> &Lighting {
        &self.lighting
    }

    /// Trace `grid` from `camera`. The camera's resolution is replaced by
    /// the renderer's.
    pub fn render_framebuffer(&self, grid: &VoxelGrid, camera: &Camera) -> Framebuffer {
        let mut camera = camera.clone();
        camera.set_resolution(UVec2::new(self.width, self.height));
        let volume = WorldVolume::from_grid(grid);
        let mut framebuffer = Framebuffer::new(camera.resolution);
        self.raytracer.render(
            &volume,
            &self.atlas,
            &camera,
            &self.lighting,
            None,
            &mut framebuffer,
        );
        framebuffer
    }

    /// Trace `grid` and return the frame as an RGBA image.
    pub fn render(&self, grid: &VoxelGrid, camera: &Camera) -> Result<RgbaImage> {
        let framebuffer = self.render_framebuffer(grid, camera);
        ImageBuffer::from_raw(self.width, self.height, framebuffer.to_rgba8())
            .ok_or_else(|| TestError::InvalidImage("pixel data does not fill the image".to_string()))
    }

    /// Fraction of pixels showing plain sky.
    pub fn sky_fraction(&self, framebuffer: &Framebuffer) -> f32 {
        let sky = pack_rgb(self.lighting.sky_color);
        let pixels = framebuffer.pixels();
        let count = pixels.iter().filter(|&&p| p == sky).count();
        count as f32 / pixels.len() as f32
    }

    /// Get the output dimensions.
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Visual regression test runner.
///
/// Compares rendered images against baseline images and reports differences.
/// A missing baseline is created from the current output.
pub struct VisualRegressionTest {
    config: VisualTestConfig,
    renderer: HeadlessRenderer,
}

impl VisualRegressionTest {
    pub fn new(config: VisualTestConfig) -> Self {
        Self::with_dimensions(config, 214, 120)
    }

    pub fn with_dimensions(config: VisualTestConfig, width: u32, height: u32) -> Self {
        Self {
            config,
            renderer: HeadlessRenderer::new(width, height),
        }
    }

    pub const fn renderer(&self) -> &HeadlessRenderer {
        &self.renderer
    }

    /// Render `grid` and compare it with the baseline called `name`.
    pub fn run_test(&self, name: &str, grid: &VoxelGrid, camera: &Camera) -> Result<()> {
        let image = self.renderer.render(grid, camera)?;
        self.compare_and_save(name, &image)
    }

    fn compare_and_save(&self, name: &str, image: &RgbaImage) -> Result<()> {
        std::fs::create_dir_all(&self.config.baseline_dir)?;
        std::fs::create_dir_all(&self.config.output_dir)?;

        let baseline_path = format!("{}/{}.png", self.config.baseline_dir, name);
        let output_path = format!("{}/{}.png", self.config.output_dir, name);

        image.save(&output_path)?;

        if Path::new(&baseline_path).exists() {
            let baseline = image::open(&baseline_path)?.to_rgba8();

            let diff = compare_images(&baseline, image)?;
            if diff > self.config.threshold {
                let diff_path = format!("{}/{}_diff.png", self.config.output_dir, name);
                create_diff_image(&baseline, image).save(&diff_path)?;

                return Err(TestError::ImageComparison(format!(
                    "Image difference {:.4} exceeds threshold {:.4} (see {})",
                    diff, self.config.threshold, diff_path
                )));
            }
        } else {
            image.save(&baseline_path)?;
            tracing::info!("Created new baseline: {}", baseline_path);
        }

        Ok(())
    }
}

/// Normalized difference between two images (0.0-1.0).
pub fn compare_images(a: &RgbaImage, b: &RgbaImage) -> Result<f64> {
    if a.dimensions() != b.dimensions() {
        return Err(TestError::ImageComparison(format!(
            "Image dimensions don't match: {:?} vs {:?}",
            a.dimensions(),
            b.dimensions()
        )));
    }

    let total_diff: u64 = a
        .pixels()
        .zip(b.pixels())
        .map(|(pa, pb)| {
            (0..3)
                .map(|c| u64::from(pa[c].abs_diff(pb[c])))
                .sum::<u64>()
        })
        .sum();

    let max_diff = (u64::from(a.width()) * u64::from(a.height()) * 3 * 255) as f64;
    Ok(total_diff as f64 / max_diff)
}

/// Differences in red over a dimmed copy of `a`.
fn create_diff_image(a: &RgbaImage, b: &RgbaImage) -> RgbaImage {
    let (width, height) = a.dimensions();
    let mut diff = ImageBuffer::new(width, height);

    for (x, y, pixel) in diff.enumerate_pixels_mut() {
        let pa = a.get_pixel(x, y);
        let pb = b.get_pixel(x, y);

        let max_diff = (0..3).map(|c| pa[c].abs_diff(pb[c])).max().unwrap_or(0);
        *pixel = if max_diff > 10 {
            Rgba([255, 0, 0, 255])
        } else {
            Rgba([pa[0] / 2, pa[1] / 2, pa[2] / 2, 255])
        };
    }

    diff
}
