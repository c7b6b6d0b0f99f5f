//! Voxel ray tracing for Raycraft.
//!
//! This crate provides:
//! - The per-pixel ray tracing pass over a snapshot of the world volume
//! - Procedural texture atlas generation
//! - Day/night lighting
//! - Camera and render-resolution management
//! - Screenshot capture utilities

pub mod camera;
pub mod debug;
pub mod detail;
pub mod framebuffer;
pub mod lighting;
pub mod raytrace;
pub mod screenshot;
pub mod texture;
pub mod volume;

pub use camera::{Camera, CameraUniforms};
pub use debug::DebugMode;
pub use detail::ScreenDetail;
pub use framebuffer::{pack_rgb, Framebuffer};
pub use lighting::Lighting;
pub use raytrace::{RenderConfig, Raytracer, Scene};
pub use screenshot::{
    parse_frame_indices, save_framebuffer, save_screenshot, ScreenshotConfig, ScreenshotError,
};
pub use texture::{TextureAtlas, TextureStyle};
pub use volume::WorldVolume;
