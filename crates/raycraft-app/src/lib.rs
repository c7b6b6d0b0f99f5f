//! Application framework for Raycraft.
//!
//! This crate provides a trait-based application framework that handles
//! common boilerplate like:
//! - Window creation and management
//! - Presenting a CPU framebuffer to the window
//! - Frame pacing and timing statistics
//! - Event loop handling
//!
//! # Example
//!
//! ```no_run
//! use raycraft_app::{run_app, AppConfig, AppContext, FrameContext, VoxelApp};
//!
//! struct MyApp;
//!
//! impl VoxelApp for MyApp {
//!     fn init(_ctx: &mut AppContext) -> anyhow::Result<Self> {
//!         Ok(MyApp)
//!     }
//!
//!     fn update(&mut self, _ctx: &AppContext, _dt: f32) {}
//!
//!     fn render(&mut self, _ctx: &AppContext, frame: &mut FrameContext<'_>) -> anyhow::Result<()> {
//!         frame.target.fill(0x0066_99CC);
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> anyhow::Result<()> {
//!     run_app::<MyApp>(AppConfig::default())
//! }
//! ```

mod app;
mod context;
mod frame;
mod runner;

pub use app::VoxelApp;
pub use context::AppContext;
pub use frame::FrameContext;
pub use runner::{init_logging, run_app, AppConfig, FrameStats};

pub use raycraft_render::Framebuffer;
pub use winit::event::{DeviceEvent, DeviceId, WindowEvent};
