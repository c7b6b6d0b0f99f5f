//! Screenshot capture utilities.
//!
//! Selects frames to capture from command-line flags and writes rendered
//! frames to image files.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use image::{ImageBuffer, Rgba};
use thiserror::Error;
use tracing::info;

use crate::framebuffer::Framebuffer;

/// Screenshot capture configuration.
///
/// Defines which frames to capture and where to save them.
#[derive(Clone, Debug, Default)]
pub struct ScreenshotConfig {
    /// Whether screenshot capture is enabled.
    pub enabled: bool,
    /// Output path pattern (use `{}` for frame number placeholder).
    pub output_pattern: String,
    /// Frame indices to capture.
    pub frames: HashSet<u64>,
    /// Exit after capturing all specified frames.
    pub exit_after_capture: bool,
}

impl ScreenshotConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable screenshot capture with the given output pattern.
    #[must_use]
    pub fn with_output(mut self, pattern: impl Into<String>) -> Self {
        self.enabled = true;
        self.output_pattern = pattern.into();
        self
    }

    #[must_use]
    pub fn with_frames(mut self, frames: impl IntoIterator<Item = u64>) -> Self {
        self.enabled = true;
        self.frames.extend(frames);
        self
    }

    #[must_use]
    pub const fn with_exit_after(mut self, exit: bool) -> Self {
        self.exit_after_capture = exit;
        self
    }

    /// Get the output path for a specific frame.
    pub fn output_path(&self, frame: u64) -> PathBuf {
        PathBuf::from(self.output_pattern.replace("{}", &frame.to_string()))
    }

    pub fn should_capture(&self, frame: u64) -> bool {
        self.enabled && self.frames.contains(&frame)
    }

    /// Check if every requested frame is behind `current_frame`.
    pub fn all_captured(&self, current_frame: u64) -> bool {
        if !self.enabled {
            return false;
        }
        self.frames
            .iter()
            .max()
            .is_some_and(|&last| current_frame > last)
    }

    /// Parse from a slice of arguments; the first entry is the program name.
    ///
    /// Recognizes the following flags:
    /// - `-S` or `--screenshot`: Enable screenshot capture
    /// - `-o` or `--output <PATTERN>`: Output path pattern (use `{}` for frame number)
    /// - `-f` or `--frames <FRAMES>`: Frame indices to capture (e.g., "0,5,10-15")
    /// - `--exit-after`: Exit after capturing all specified frames
    ///
    /// Other arguments are ignored.
    pub fn parse_args(args: &[String]) -> Self {
        let mut config = Self::default();

        let mut rest = args.iter().skip(1);
        while let Some(arg) = rest.next() {
            match arg.as_str() {
                "-S" | "--screenshot" => config.enabled = true,
                "-o" | "--output" => {
                    if let Some(pattern) = rest.next() {
                        config.output_pattern.clone_from(pattern);
                    }
                }
                "-f" | "--frames" => {
                    if let Some(frames) = rest.next() {
                        config.frames = parse_frame_indices(frames);
                    }
                }
                "--exit-after" => config.exit_after_capture = true,
                _ => {}
            }
        }

        if config.enabled {
            if config.output_pattern.is_empty() {
                config.output_pattern = "screenshot_{}.png".to_string();
            }
            if config.frames.is_empty() {
                config.frames.insert(0);
            }
        }

        config
    }
}

/// Parse frame indices from a string like "0,5,10-15,20".
///
/// Ranges are inclusive. Malformed parts are skipped.
pub fn parse_frame_indices(s: &str) -> HashSet<u64> {
    let mut frames = HashSet::new();

    for part in s.split(',').map(str::trim) {
        if let Some((start, end)) = part.split_once('-') {
            if let (Ok(start), Ok(end)) = (start.parse::<u64>(), end.parse::<u64>()) {
                frames.extend(start..=end);
            }
        } else if let Ok(frame) = part.parse::<u64>() {
            frames.insert(frame);
        }
    }

    frames
}

/// Save RGBA pixel data to an image file; the format follows the extension.
pub fn save_screenshot(
    data: Vec<u8>,
    width: u32,
    height: u32,
    path: impl AsRef<Path>,
) -> Result<(), ScreenshotError> {
    let path = path.as_ref();

    let image = ImageBuffer::<Rgba<u8>, _>::from_raw(width, height, data)
        .ok_or(ScreenshotError::InvalidImageData { width, height })?;

    image.save(path)?;

    info!("Screenshot saved: {}", path.display());
    Ok(())
}

/// Save a rendered frame.
pub fn save_framebuffer(framebuffer: &Framebuffer, path: impl AsRef<Path>) -> Result<(), ScreenshotError> {
    save_screenshot(
        framebuffer.to_rgba8(),
        framebuffer.width(),
        framebuffer.height(),
        path,
    )
}

/// Errors that can occur during screenshot capture.
#[derive(Debug, Error)]
pub enum ScreenshotError {
    #[error("Pixel data does not fill a {width}x{height} image")]
    InvalidImageData { width: u32, height: u32 },
    #[error("Failed to save screenshot: {0}")]
    SaveFailed(#[from] image::ImageError),
}
