//! Application context.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::anyhow;
use raycraft_input::CursorMode;
use raycraft_render::Framebuffer;
use softbuffer::{Context, Surface};
use tracing::warn;
use winit::window::{CursorGrabMode, Window};

/// Application context shared across all app methods.
///
/// Owns the window and the software surface frames are presented to.
pub struct AppContext {
    /// The window handle.
    pub window: Arc<Window>,
    surface: Surface<Arc<Window>, Arc<Window>>,
    /// Total frames rendered.
    pub frame_count: u64,
    /// Time of last frame (for delta time calculation).
    pub(crate) last_frame_time: Instant,
    started: Instant,
}

impl AppContext {
    pub(crate) fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        let context = Context::new(window.clone())
            .map_err(|e| anyhow!("Failed to create presentation context: {e}"))?;
        let surface = Surface::new(&context, window.clone())
            .map_err(|e| anyhow!("Failed to create presentation surface: {e}"))?;

        let size = window.inner_size();
        tracing::info!("Surface created: {}x{}", size.width, size.height);

        let now = Instant::now();
        Ok(Self {
            window,
            surface,
            frame_count: 0,
            last_frame_time: now,
            started: now,
        })
    }

    /// Window width in physical pixels.
    pub fn width(&self) -> u32 {
        self.window.inner_size().width
    }

    /// Window height in physical pixels.
    pub fn height(&self) -> u32 {
        self.window.inner_size().height
    }

    /// Time since the application started.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn set_title(&self, title: &str) {
        self.window.set_title(title);
    }

    /// Grab or release the cursor.
    ///
    /// Locking falls back to confining the cursor on platforms without
    /// pointer lock. Failures are logged, never fatal.
    pub fn apply_cursor_mode(&self, mode: CursorMode) {
        let (grab_mode, visible) = match mode {
            CursorMode::Normal => (CursorGrabMode::None, true),
            CursorMode::Locked => (CursorGrabMode::Locked, false),
        };

        if let Err(e) = self.window.set_cursor_grab(grab_mode) {
            if grab_mode == CursorGrabMode::Locked {
                if let Err(e2) = self.window.set_cursor_grab(CursorGrabMode::Confined) {
                    warn!("Failed to confine cursor: {e2}");
                }
            } else {
                warn!("Failed to set cursor grab mode: {e}");
            }
        }

        self.window.set_cursor_visible(visible);
    }

    /// Scale `frame` onto the whole window and show it.
    ///
    /// Does nothing while the window has a zero-sized client area.
    pub(crate) fn present(&mut self, frame: &Framebuffer) -> anyhow::Result<()> {
        let size = self.window.inner_size();
        let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return Ok(());
        };

        self.surface
            .resize(width, height)
            .map_err(|e| anyhow!("Failed to resize surface: {e}"))?;
        let mut buffer = self
            .surface
            .buffer_mut()
            .map_err(|e| anyhow!("Failed to map surface buffer: {e}"))?;
        frame.blit_scaled(&mut buffer, width.get(), height.get());
        buffer
            .present()
            .map_err(|e| anyhow!("Failed to present frame: {e}"))?;
        Ok(())
    }
}
