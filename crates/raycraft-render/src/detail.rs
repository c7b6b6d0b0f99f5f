//! Render resolution levels.

use glam::UVec2;

/// Render resolution as a power-of-two multiple of 107 x 60.
///
/// Level `d` renders at `107 * 2^d` by `60 * 2^d` pixels and is clamped to
/// `-4..=6`. The render target is scaled to the window when presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScreenDetail(i32);

impl ScreenDetail {
    pub const MIN: i32 = -4;
    pub const MAX: i32 = 6;
    /// Base resolution at level 0
    pub const BASE: UVec2 = UVec2::new(107, 60);

    /// Create a detail level, clamping into range.
    pub const fn new(level: i32) -> Self {
        if level < Self::MIN {
            Self(Self::MIN)
        } else if level > Self::MAX {
            Self(Self::MAX)
        } else {
            Self(level)
        }
    }

    #[inline]
    pub const fn level(self) -> i32 {
        self.0
    }

    /// Render target size, at least 1 x 1.
    pub fn resolution(self) -> UVec2 {
        let scale = 2f32.powi(self.0);
        UVec2::new(
            ((Self::BASE.x as f32 * scale) as u32).max(1),
            ((Self::BASE.y as f32 * scale) as u32).max(1),
        )
    }

    #[must_use]
    pub const fn increased(self) -> Self {
        Self::new(self.0 + 1)
    }

    #[must_use]
    pub const fn decreased(self) -> Self {
        Self::new(self.0 - 1)
    }

    /// Flavour text for the window title.
    pub const fn title_suffix(self) -> Option<&'static str> {
        match self.0 {
            -4 => Some("on battery-saving mode"),
            -3 => Some("on a potato"),
            -2 => Some("on an undocked switch"),
            -1 => Some("on a TI-84"),
            0 => Some("on an Atari 2600"),
            2 => Some("at SD"),
            3 => Some("at HD"),
            4 => Some("at Full HD"),
            5 => Some("at 4K"),
            6 => Some("on a NASA supercomputer"),
            _ => None,
        }
    }

    /// Window title for this level.
    pub fn title(self, base: &str) -> String {
        match self.title_suffix() {
            Some(suffix) => format!("{base} {suffix}"),
            None => base.to_string(),
        }
    }
}

impl Default for ScreenDetail {
    fn default() -> Self {
        Self(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_sd() {
        let detail = ScreenDetail::default();
        assert_eq!(detail.resolution(), UVec2::new(428, 240));
        assert_eq!(detail.title("Raycraft"), "Raycraft at SD");
    }

    #[test]
    fn clamped_to_range() {
        assert_eq!(ScreenDetail::new(-10).level(), -4);
        assert_eq!(ScreenDetail::new(10).level(), 6);
        assert_eq!(ScreenDetail::new(6).increased().level(), 6);
        assert_eq!(ScreenDetail::new(-4).decreased().level(), -4);
    }

    #[test]
    fn resolution_scales_by_two() {
        assert_eq!(ScreenDetail::new(0).resolution(), UVec2::new(107, 60));
        assert_eq!(ScreenDetail::new(1).resolution(), UVec2::new(214, 120));
        assert_eq!(ScreenDetail::new(6).resolution(), UVec2::new(6848, 3840));
        assert_eq!(ScreenDetail::new(-4).resolution(), UVec2::new(6, 3));
    }

    #[test]
    fn level_one_has_plain_title() {
        assert_eq!(ScreenDetail::new(1).title("Raycraft"), "Raycraft");
        assert_eq!(ScreenDetail::new(-3).title("Raycraft"), "Raycraft on a potato");
    }
}
