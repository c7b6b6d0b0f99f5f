//! Camera and view management.

use glam::{IVec3, UVec2, Vec2, Vec3};
use raycraft_physics::Player;

/// Resolution at which one field-of-view unit maps one-to-one onto the frustum.
const REFERENCE_RESOLUTION: Vec2 = Vec2::new(214.0, 120.0);

/// First-person camera.
///
/// Yaw 0 looks along +Z and positive yaw turns toward +X. Positive pitch
/// looks up.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub fov: f32,
    pub resolution: UVec2,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            fov: Self::DEFAULT_FOV,
            resolution: UVec2::new(428, 240),
        }
    }
}

impl Camera {
    pub const DEFAULT_FOV: f32 = 90.0;

    pub const fn new(position: Vec3, yaw: f32, pitch: f32, fov: f32, resolution: UVec2) -> Self {
        Self {
            position,
            yaw,
            pitch,
            fov,
            resolution,
        }
    }

    /// Camera at the player's eye, looking where the player looks.
    pub fn from_player(player: &Player, fov: f32, resolution: UVec2) -> Self {
        Self::new(player.eye_position(), player.yaw(), player.pitch(), fov, resolution)
    }

    /// Set the render target size.
    pub fn set_resolution(&mut self, resolution: UVec2) {
        self.resolution = resolution;
    }

    /// Forward, right and up vectors.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        basis_from(self.yaw.sin_cos(), self.pitch.sin_cos())
    }

    /// Pixels per unit of screen-plane offset along each axis.
    pub fn frustum_div(&self) -> Vec2 {
        self.resolution.as_vec2() * self.fov / REFERENCE_RESOLUTION
    }

    /// Unnormalized view ray through the centre of pixel `(x, y)`; row 0 is
    /// the top of the image.
    pub fn ray_direction(&self, x: u32, y: u32) -> Vec3 {
        CameraUniforms::from(self).ray_direction(x, y)
    }

    /// Get camera uniforms for the tracer.
    pub fn uniforms(&self, hovered: Option<IVec3>) -> CameraUniforms {
        let mut uniforms = CameraUniforms::from(self);
        uniforms.hovered = match hovered {
            Some(cell) => [cell.x, cell.y, cell.z, 1],
            None => [0, 0, 0, 0],
        };
        uniforms
    }
}

fn basis_from((sin_yaw, cos_yaw): (f32, f32), (sin_pitch, cos_pitch): (f32, f32)) -> (Vec3, Vec3, Vec3) {
    let forward = Vec3::new(sin_yaw * cos_pitch, sin_pitch, cos_yaw * cos_pitch);
    let right = Vec3::new(cos_yaw, 0.0, -sin_yaw);
    let up = forward.cross(right);
    (forward, right, up)
}

/// Per-frame camera state handed to the tracer.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniforms {
    /// Eye position, w unused
    pub position: [f32; 4],
    /// sin yaw, cos yaw, sin pitch, cos pitch
    pub orientation: [f32; 4],
    /// Frustum divisor xy, resolution zw
    pub frustum: [f32; 4],
    /// Hovered cell xyz, w = 1 when a cell is hovered
    pub hovered: [i32; 4],
}

impl CameraUniforms {
    #[inline]
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.position[0], self.position[1], self.position[2])
    }

    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let [sin_yaw, cos_yaw, sin_pitch, cos_pitch] = self.orientation;
        basis_from((sin_yaw, cos_yaw), (sin_pitch, cos_pitch))
    }

    pub fn hovered(&self) -> Option<IVec3> {
        (self.hovered[3] != 0).then(|| IVec3::new(self.hovered[0], self.hovered[1], self.hovered[2]))
    }

    /// See [`Camera::ray_direction`].
    pub fn ray_direction(&self, x: u32, y: u32) -> Vec3 {
        let (forward, right, up) = self.basis();
        self.ray_direction_with(forward, right, up, x, y)
    }

    /// Ray direction for a pixel given a precomputed basis.
    #[inline]
    pub fn ray_direction_with(&self, forward: Vec3, right: Vec3, up: Vec3, x: u32, y: u32) -> Vec3 {
        let [div_x, div_y, width, height] = self.frustum;
        let u = (x as f32 + 0.5 - width * 0.5) / div_x;
        let v = (height * 0.5 - y as f32 - 0.5) / div_y;
        forward + right * u + up * v
    }
}

impl From<&Camera> for CameraUniforms {
    fn from(camera: &Camera) -> Self {
        let (sin_yaw, cos_yaw) = camera.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = camera.pitch.sin_cos();
        let div = camera.frustum_div();
        Self {
            position: [camera.position.x, camera.position.y, camera.position.z, 0.0],
            orientation: [sin_yaw, cos_yaw, sin_pitch, cos_pitch],
            frustum: [
                div.x,
                div.y,
                camera.resolution.x as f32,
                camera.resolution.y as f32,
            ],
            hovered: [0; 4],
        }
    }
}
