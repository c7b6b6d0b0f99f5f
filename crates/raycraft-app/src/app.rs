//! `VoxelApp` trait definition.

use crate::context::AppContext;
use crate::frame::FrameContext;
use winit::event::{DeviceEvent, DeviceId, WindowEvent};

/// Trait for Raycraft applications.
///
/// The framework creates the window, drives the event loop and presents
/// whatever the application draws into the frame's target.
pub trait VoxelApp: Sized {
    /// Initialize the application.
    ///
    /// Called once after the window and its presentation surface exist.
    fn init(ctx: &mut AppContext) -> anyhow::Result<Self>;

    /// Update application state.
    ///
    /// Called every frame before rendering with the time in seconds since
    /// the previous frame.
    fn update(&mut self, ctx: &AppContext, dt: f32);

    /// Draw a frame into `frame.target`.
    ///
    /// The target may be any size; it is scaled to the window when presented.
    fn render(&mut self, ctx: &AppContext, frame: &mut FrameContext<'_>) -> anyhow::Result<()>;

    /// Handle window resize.
    ///
    /// Default implementation does nothing.
    #[allow(unused_variables)]
    fn on_resize(&mut self, ctx: &mut AppContext, width: u32, height: u32) -> anyhow::Result<()> {
        Ok(())
    }

    /// Handle window events.
    ///
    /// Return `true` if the event was handled and should not be processed
    /// further.
    #[allow(unused_variables)]
    fn on_event(&mut self, event: &WindowEvent) -> bool {
        false
    }

    /// Handle device events (raw mouse motion while the cursor is locked).
    #[allow(unused_variables)]
    fn on_device_event(&mut self, device_id: DeviceId, event: &DeviceEvent) {}

    /// Whether the application wants the event loop to stop.
    ///
    /// Checked after every presented frame.
    fn should_exit(&self) -> bool {
        false
    }

    /// Called once before shutdown.
    #[allow(unused_variables)]
    fn cleanup(&mut self, ctx: &mut AppContext) {}
}
