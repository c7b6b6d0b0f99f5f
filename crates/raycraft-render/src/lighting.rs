//! Day/night cycle.
//!
//! The sun circles the world once every `20000 * PI` milliseconds (a bit over
//! a minute). Sun, ambient and sky colours blend from twilight toward day
//! while the sun is above the horizon and toward night while it is below.

use glam::Vec3;

/// Milliseconds per radian of sun travel
const CYCLE_SCALE: f64 = 10_000.0;

const DAY_SUN: Vec3 = Vec3::new(1.0, 1.0, 1.0);
const DAY_AMBIENT: Vec3 = Vec3::new(0.5, 0.5, 0.5);
const DAY_SKY: Vec3 = Vec3::new(0.317, 0.729, 0.969);

const TWILIGHT_SUN: Vec3 = Vec3::new(1.0, 0.5, 0.01);
const TWILIGHT_AMBIENT: Vec3 = Vec3::new(0.6, 0.5, 0.5);
const TWILIGHT_SKY: Vec3 = Vec3::new(0.27, 0.24, 0.33);

const NIGHT_SUN: Vec3 = Vec3::new(0.3, 0.3, 0.5);
const NIGHT_AMBIENT: Vec3 = Vec3::new(0.3, 0.3, 0.5);
const NIGHT_SKY: Vec3 = Vec3::new(0.004, 0.004, 0.008);

/// Light state for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lighting {
    /// Unit vector pointing toward the sun
    pub sun_direction: Vec3,
    pub sun_color: Vec3,
    pub ambient_color: Vec3,
    pub sky_color: Vec3,
}

impl Lighting {
    /// Lighting at `time_ms` milliseconds since start.
    pub fn at(time_ms: f64) -> Self {
        let angle = time_ms / CYCLE_SCALE;
        let height = angle.sin() as f32;
        let sun_direction = Vec3::new(0.5 * height, height, angle.cos() as f32).normalize();
        Self::from_sun(sun_direction)
    }

    /// Lighting for a given sun direction.
    pub fn from_sun(sun_direction: Vec3) -> Self {
        let sun_direction = sun_direction.normalize_or(Vec3::Y);
        let elevation = sun_direction.y;
        let (sun, ambient, sky) = if elevation > 0.0 {
            (DAY_SUN, DAY_AMBIENT, DAY_SKY)
        } else {
            (NIGHT_SUN, NIGHT_AMBIENT, NIGHT_SKY)
        };
        let t = elevation.abs();
        Self {
            sun_direction,
            sun_color: TWILIGHT_SUN.lerp(sun, t),
            ambient_color: TWILIGHT_AMBIENT.lerp(ambient, t),
            sky_color: TWILIGHT_SKY.lerp(sky, t),
        }
    }

    /// Sun straight overhead.
    pub fn noon() -> Self {
        Self::from_sun(Vec3::Y)
    }

    #[inline]
    pub fn is_day(&self) -> bool {
        self.sun_direction.y > 0.0
    }
}

impl Default for Lighting {
    fn default() -> Self {
        Self::noon()
    }
}
