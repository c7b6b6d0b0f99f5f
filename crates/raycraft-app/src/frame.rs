//! Per-frame context for rendering.

use raycraft_render::Framebuffer;

/// Context for the frame being rendered.
pub struct FrameContext<'a> {
    /// Image presented once `render` returns.
    pub target: &'a mut Framebuffer,
    /// Delta time since last frame in seconds.
    pub dt: f32,
    /// Current frame number, starting at 0.
    pub frame_number: u64,
}

impl<'a> FrameContext<'a> {
    pub(crate) fn new(target: &'a mut Framebuffer, dt: f32, frame_number: u64) -> Self {
        Self {
            target,
            dt,
            frame_number,
        }
    }
}
