//! Debug visualization modes.
//!
//! Replace the shaded image with a view of what the tracer is doing:
//! traversal cost, hit distance, or surface normals.

/// Debug visualization mode for rendering.
///
/// Press F3 to cycle through modes in the viewer.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DebugMode {
    /// Normal rendering (default).
    #[default]
    None = 0,
    /// Heatmap of cells visited per pixel.
    TraversalSteps = 1,
    /// Heatmap of distance from the camera.
    Distance = 2,
    /// Surface normals as RGB.
    Normals = 3,
}

impl DebugMode {
    /// Cycle to the next debug mode.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::None => Self::TraversalSteps,
            Self::TraversalSteps => Self::Distance,
            Self::Distance => Self::Normals,
            Self::Normals => Self::None,
        }
    }

    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self as u32
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "shaded",
            Self::TraversalSteps => "traversal steps",
            Self::Distance => "distance",
            Self::Normals => "normals",
        }
    }
}
