//! Math utilities and helpers.

use glam::{IVec3, Vec3};

/// Ray for raycasting operations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    /// Ray origin
    pub origin: Vec3,
    /// Ray direction (normalized)
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray, normalizing the direction.
    ///
    /// Returns `None` for a zero or non-finite direction.
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        direction.try_normalize().map(|direction| Self { origin, direction })
    }

    /// Get a point along the ray at distance t
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Axis-Aligned Bounding Box.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max corners
    #[inline]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Ray-AABB slab test, returns (t_near, t_far) or None if no intersection.
    ///
    /// Axes along which the ray does not move only constrain the origin.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<(f32, f32)> {
        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = f32::INFINITY;

        for axis in Axis::ALL {
            let i = axis.index();
            let origin = ray.origin[i];
            let dir = ray.direction[i];
            if dir == 0.0 {
                if origin < self.min[i] || origin > self.max[i] {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / dir;
            let t1 = (self.min[i] - origin) * inv;
            let t2 = (self.max[i] - origin) * inv;
            t_near = t_near.max(t1.min(t2));
            t_far = t_far.min(t1.max(t2));
        }

        if t_near <= t_far && t_far >= 0.0 {
            Some((t_near.max(0.0), t_far))
        } else {
            None
        }
    }
}

/// One of the three grid axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X = 0,
    Y = 1,
    Z = 2,
}

impl Axis {
    /// All axes in index order
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    /// Component index (0, 1, 2)
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Face of a grid cell, named by the direction its outward normal points.
///
/// The index layout is shared with the renderer: `0..3` are the positive
/// faces (hit by a ray travelling toward the negative side), `3..6` are the
/// negative faces, i.e. the axis index plus three.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Face {
    PosX = 0,
    PosY = 1,
    PosZ = 2,
    NegX = 3,
    NegY = 4,
    NegZ = 5,
}

impl Face {
    /// All faces in index order
    pub const ALL: [Self; 6] = [
        Self::PosX,
        Self::PosY,
        Self::PosZ,
        Self::NegX,
        Self::NegY,
        Self::NegZ,
    ];

    /// The face a ray enters through when it steps along `axis` with the
    /// given sign of travel.
    #[inline]
    pub const fn entered(axis: Axis, step: i32) -> Self {
        match (axis, step < 0) {
            (Axis::X, true) => Self::PosX,
            (Axis::Y, true) => Self::PosY,
            (Axis::Z, true) => Self::PosZ,
            (Axis::X, false) => Self::NegX,
            (Axis::Y, false) => Self::NegY,
            (Axis::Z, false) => Self::NegZ,
        }
    }

    /// Face index (0..6)
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Axis the face is perpendicular to
    #[inline]
    pub const fn axis(self) -> Axis {
        match self {
            Self::PosX | Self::NegX => Axis::X,
            Self::PosY | Self::NegY => Axis::Y,
            Self::PosZ | Self::NegZ => Axis::Z,
        }
    }

    /// Sign of the outward normal: +1 for faces approached from the
    /// positive side, -1 otherwise.
    #[inline]
    pub const fn approach_sign(self) -> i32 {
        if (self as usize) < 3 {
            1
        } else {
            -1
        }
    }

    /// Outward unit normal
    #[inline]
    pub const fn normal(self) -> IVec3 {
        match self {
            Self::PosX => IVec3::X,
            Self::PosY => IVec3::Y,
            Self::PosZ => IVec3::Z,
            Self::NegX => IVec3::NEG_X,
            Self::NegY => IVec3::NEG_Y,
            Self::NegZ => IVec3::NEG_Z,
        }
    }
}
