//! Per-pixel voxel ray tracing.
//!
//! Every pixel casts one primary ray through the world volume. The first
//! opaque texel it meets is shaded with the sun and ambient light, darkened
//! when a shadow ray toward the sun is blocked, and blended into the sky
//! colour with distance. Mirror blocks reflect the ray instead of shading it.
//! Rows are traced in parallel with rayon.

use glam::{IVec3, Vec3};
use raycraft_core::constants::default_render_distance;
use raycraft_core::{BlockId, Face, Ray};
use raycraft_voxel::GridTraversal;
use rayon::prelude::*;
use tracing::debug_span;

use crate::camera::{Camera, CameraUniforms};
use crate::debug::DebugMode;
use crate::framebuffer::{pack_rgb, Framebuffer};
use crate::lighting::Lighting;
use crate::texture::{is_transparent, texel_rgb, TextureAtlas};
use crate::volume::WorldVolume;

/// Offset used to step a ray off the surface it starts on.
const NUDGE: f32 = 1e-3;
/// Cosine of the sun disc's angular radius
const SUN_DISC_COS: f32 = 0.9995;
/// Fraction of light a mirror passes on
const MIRROR_TINT: Vec3 = Vec3::new(0.8, 0.85, 0.9);
/// Outline width in texture space
const OUTLINE: f32 = 1.0 / 16.0;
const OUTLINE_MIX: f32 = 0.6;
/// Traversal steps that saturate the step heatmap
const STEP_HEAT_MAX: f32 = 96.0;

/// Renderer settings.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Field of view in frustum units; 90 maps the reference resolution one to one
    pub fov: f32,
    /// Ray travel limit; surfaces fade into the sky toward it
    pub render_distance: f32,
    pub shadows: bool,
    /// Ray travel limit toward the sun
    pub shadow_distance: f32,
    /// Reflections followed before a mirror is shaded like any other block
    pub mirror_bounces: u32,
    pub debug_mode: DebugMode,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fov: Camera::DEFAULT_FOV,
            render_distance: default_render_distance(),
            shadows: true,
            shadow_distance: 32.0,
            mirror_bounces: 4,
            debug_mode: DebugMode::None,
        }
    }
}

impl RenderConfig {
    #[must_use]
    pub const fn with_fov(mut self, fov: f32) -> Self {
        self.fov = fov;
        self
    }

    #[must_use]
    pub const fn with_render_distance(mut self, distance: f32) -> Self {
        self.render_distance = distance;
        self
    }

    #[must_use]
    pub const fn with_shadows(mut self, shadows: bool) -> Self {
        self.shadows = shadows;
        self
    }

    #[must_use]
    pub const fn with_mirror_bounces(mut self, bounces: u32) -> Self {
        self.mirror_bounces = bounces;
        self
    }

    #[must_use]
    pub const fn with_debug_mode(mut self, mode: DebugMode) -> Self {
        self.debug_mode = mode;
        self
    }
}

/// Everything a frame is traced against.
#[derive(Clone, Copy, Debug)]
pub struct Scene<'a> {
    pub volume: &'a WorldVolume,
    pub atlas: &'a TextureAtlas,
    pub lighting: &'a Lighting,
    pub camera: CameraUniforms,
}

/// Opaque texel struck by a ray.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Surface {
    cell: IVec3,
    code: u8,
    face: Face,
    distance: f32,
    position: Vec3,
    texel: u32,
    uv: (f32, f32),
}

/// CPU voxel ray tracer.
#[derive(Clone, Debug, Default)]
pub struct Raytracer {
    config: RenderConfig,
}

impl Raytracer {
    pub const fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub const fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut RenderConfig {
        &mut self.config
    }

    /// Trace one frame into `framebuffer`, resizing it to the camera's
    /// resolution.
    pub fn render(
        &self,
        volume: &WorldVolume,
        atlas: &TextureAtlas,
        camera: &Camera,
        lighting: &Lighting,
        hovered: Option<IVec3>,
        framebuffer: &mut Framebuffer,
    ) {
        framebuffer.resize(camera.resolution);
        let scene = Scene {
            volume,
            atlas,
            lighting,
            camera: camera.uniforms(hovered),
        };
        self.render_scene(&scene, framebuffer);
    }

    /// Trace one frame at the framebuffer's current size.
    pub fn render_scene(&self, scene: &Scene<'_>, framebuffer: &mut Framebuffer) {
        let width = framebuffer.width();
        let height = framebuffer.height();
        let _span = debug_span!("trace_frame", width, height).entered();

        let origin = scene.camera.position();
        let (forward, right, up) = scene.camera.basis();

        framebuffer
            .pixels_mut()
            .par_chunks_mut(width as usize)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, pixel) in row.iter_mut().enumerate() {
                    let direction = scene
                        .camera
                        .ray_direction_with(forward, right, up, x as u32, y as u32);
                    *pixel = pack_rgb(self.trace(scene, origin, direction));
                }
            });
    }

    /// Colour seen along one ray.
    pub fn trace(&self, scene: &Scene<'_>, origin: Vec3, direction: Vec3) -> Vec3 {
        let Some(mut ray) = Ray::new(origin, direction) else {
            return scene.lighting.sky_color;
        };
        let mut throughput = Vec3::ONE;
        let mut travelled = 0.0;
        let mut bounces = 0;

        loop {
            let remaining = self.config.render_distance - travelled;
            let (surface, steps) = march(scene, &ray, remaining);

            if bounces == 0 && self.config.debug_mode != DebugMode::None {
                return self.debug_color(surface.as_ref(), steps);
            }

            let Some(surface) = surface else {
                return throughput * sky(scene.lighting, ray.direction);
            };
            let distance = travelled + surface.distance;

            if surface.code == BlockId::MIRROR.code() && bounces < self.config.mirror_bounces {
                let normal = surface.face.normal().as_vec3();
                let reflected = ray.direction - 2.0 * ray.direction.dot(normal) * normal;
                let Some(next) = Ray::new(surface.position + normal * NUDGE, reflected) else {
                    return throughput * scene.lighting.sky_color;
                };
                ray = next;
                throughput *= MIRROR_TINT;
                travelled = distance;
                bounces += 1;
                continue;
            }

            return throughput * self.shade(scene, &surface, distance);
        }
    }

    fn shade(&self, scene: &Scene<'_>, surface: &Surface, distance: f32) -> Vec3 {
        let light = scene.lighting;
        let normal = surface.face.normal().as_vec3();

        let mut diffuse = normal.dot(light.sun_direction).max(0.0);
        if diffuse > 0.0 && self.config.shadows {
            let shadow_ray = Ray::new(surface.position + normal * NUDGE, light.sun_direction);
            let blocked = shadow_ray
                .is_some_and(|ray| march(scene, &ray, self.config.shadow_distance).0.is_some());
            if blocked {
                diffuse = 0.0;
            }
        }

        let mut color = texel_rgb(surface.texel) * (light.ambient_color + light.sun_color * diffuse);

        if scene.camera.hovered() == Some(surface.cell) && on_outline(surface.uv) {
            color = color.lerp(Vec3::ONE, OUTLINE_MIX);
        }

        let fog = (distance / self.config.render_distance).clamp(0.0, 1.0);
        color.lerp(light.sky_color, fog * fog)
    }

    fn debug_color(&self, surface: Option<&Surface>, steps: u32) -> Vec3 {
        match (self.config.debug_mode, surface) {
            (DebugMode::TraversalSteps, _) => {
                let heat = (steps as f32 / STEP_HEAT_MAX).min(1.0);
                Vec3::new(heat, 0.0, 1.0 - heat)
            }
            (DebugMode::Distance, Some(surface)) => {
                Vec3::splat(1.0 - (surface.distance / self.config.render_distance).min(1.0))
            }
            (DebugMode::Normals, Some(surface)) => surface.face.normal().as_vec3() * 0.5 + 0.5,
            _ => Vec3::ZERO,
        }
    }
}

fn sky(light: &Lighting, direction: Vec3) -> Vec3 {
    if direction.dot(light.sun_direction) > SUN_DISC_COS {
        light.sun_color
    } else {
        light.sky_color
    }
}

/// Walk `ray` through the volume and return the first opaque texel within
/// `max_distance`, plus the number of cells visited.
///
/// A ray starting outside the world is clipped to its bounds first. The cell
/// containing a ray's origin is never reported.
fn march(scene: &Scene<'_>, ray: &Ray, max_distance: f32) -> (Option<Surface>, u32) {
    let volume = scene.volume;
    let Some((t_enter, t_exit)) = volume.bounds().intersect_ray(ray) else {
        return (None, 0);
    };
    let limit = max_distance.min(t_exit);
    if t_enter > limit {
        return (None, 0);
    }

    // Start just outside the world so the first cell reports its entry face.
    let t_start = if t_enter > 0.0 { (t_enter - NUDGE).max(0.0) } else { 0.0 };
    let mut steps = 0;

    for step in GridTraversal::new(ray.at(t_start), ray.direction) {
        let distance = t_start + step.distance;
        if distance > limit {
            break;
        }
        steps += 1;

        let Some(face) = step.face else { continue };
        let Some(code) = volume.code(step.cell) else { continue };
        if code == 0 {
            continue;
        }

        let position = ray.at(distance);
        let uv = face_uv(face, position);
        let texel = scene.atlas.sample(code, face, uv.0, uv.1);
        if is_transparent(texel) {
            continue;
        }

        return (
            Some(Surface {
                cell: step.cell,
                code,
                face,
                distance,
                position,
                texel,
                uv,
            }),
            steps,
        );
    }

    (None, steps)
}

/// Texture coordinates of a point on a face. Side faces have `v = 0` at the
/// top of the block.
fn face_uv(face: Face, position: Vec3) -> (f32, f32) {
    let frac = position - position.floor();
    match face {
        Face::PosY | Face::NegY => (frac.x, frac.z),
        Face::PosX | Face::NegX => (frac.z, 1.0 - frac.y),
        Face::PosZ | Face::NegZ => (frac.x, 1.0 - frac.y),
    }
}

fn on_outline((u, v): (f32, f32)) -> bool {
    u < OUTLINE || v < OUTLINE || u > 1.0 - OUTLINE || v > 1.0 - OUTLINE
}
