//! First-person player body.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::Vec3;
use raycraft_core::constants::EYE_HEIGHT;
use raycraft_core::{Axis, LookDelta, PlayerInput};
use raycraft_voxel::{GridDims, VoxelGrid};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::collision::{collides, excavate};

/// Movement tuning, in cells and ticks.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MovementConfig {
    /// Horizontal velocity kept per tick
    pub horizontal_damping: f32,
    /// Vertical velocity kept per tick
    pub vertical_damping: f32,
    /// Velocity added per tick at full input
    pub acceleration: f32,
    /// Downward velocity added per tick
    pub gravity: f32,
    /// Upward velocity set by a jump
    pub jump_velocity: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            horizontal_damping: 0.5,
            vertical_damping: 0.99,
            acceleration: 0.02,
            gravity: 0.003,
            jump_velocity: 0.1,
        }
    }
}

/// What happened during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Axes whose move was rejected, indexed by [`Axis::index`]
    pub blocked: [bool; 3],
    /// A jump impulse was applied
    pub jumped: bool,
    /// Blocks cleared by the body after the move
    pub excavated: usize,
}

impl TickReport {
    /// The vertical move was stopped from below or above.
    pub const fn blocked_vertically(&self) -> bool {
        self.blocked[1]
    }
}

/// The player: feet position, velocity and view orientation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Feet position in world space
    pub position: Vec3,
    /// Velocity in cells per tick
    pub velocity: Vec3,
    yaw: f32,
    pitch: f32,
}

impl Player {
    /// Create a player standing at `position` with no velocity.
    pub const fn new(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    /// Create a player above the centre of a world.
    pub fn spawn(dims: GridDims) -> Self {
        Self::new(Vec3::new(
            dims.x as f32 / 2.0 + 0.5,
            dims.y as f32 - 3.0,
            dims.z as f32 / 2.0 + 0.5,
        ))
    }

    #[inline]
    pub const fn yaw(&self) -> f32 {
        self.yaw
    }

    #[inline]
    pub const fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Set the view orientation, wrapping yaw into `[-PI, PI)` and clamping
    /// pitch to straight up or down.
    pub fn set_orientation(&mut self, yaw: f32, pitch: f32) {
        self.yaw = (yaw + PI).rem_euclid(TAU) - PI;
        self.pitch = pitch.clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    /// Turn the view.
    pub fn apply_look(&mut self, delta: LookDelta) {
        self.set_orientation(self.yaw + delta.yaw, self.pitch + delta.pitch);
    }

    /// Camera origin.
    #[inline]
    pub fn eye_position(&self) -> Vec3 {
        self.position + Vec3::Y * EYE_HEIGHT
    }

    /// Unit view direction. Yaw 0 looks along +Z; positive yaw turns toward
    /// +X, positive pitch looks up.
    pub fn look_direction(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(sin_yaw * cos_pitch, sin_pitch, cos_yaw * cos_pitch)
    }

    /// Advance one fixed tick.
    ///
    /// The move is resolved along X, then Y, then Z, each from the position
    /// the previous axis left behind. A blocked vertical move either turns
    /// into a jump (falling with jump held) or stops vertical motion.
    /// Afterwards every block the body overlaps is removed.
    pub fn tick(
        &mut self,
        grid: &mut VoxelGrid,
        input: PlayerInput,
        config: &MovementConfig,
    ) -> TickReport {
        let mut report = TickReport::default();
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let forward = input.forward * config.acceleration;
        let right = input.right * config.acceleration;

        let v = &mut self.velocity;
        v.x *= config.horizontal_damping;
        v.y *= config.vertical_damping;
        v.z *= config.horizontal_damping;
        v.x += sin_yaw * forward + cos_yaw * right;
        v.z += cos_yaw * forward - sin_yaw * right;
        v.y -= config.gravity;

        for axis in Axis::ALL {
            let i = axis.index();
            let mut candidate = self.position;
            candidate[i] += self.velocity[i];

            if !collides(grid, candidate) {
                self.position = candidate;
                continue;
            }

            report.blocked[i] = true;
            if axis == Axis::Y {
                if input.jump && self.velocity.y < 0.0 {
                    self.velocity.y = config.jump_velocity;
                    report.jumped = true;
                } else {
                    self.velocity.y = 0.0;
                }
            }
        }

        report.excavated = excavate(grid, self.position);
        if report.excavated > 0 {
            debug!(
                count = report.excavated,
                position = ?self.position,
                "Player excavated blocks"
            );
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::collider_points;
    use approx::assert_relative_eq;
    use glam::IVec3;
    use raycraft_core::BlockId;

    fn floor_world(size: u32) -> VoxelGrid {
        let mut grid = VoxelGrid::new(GridDims::cube(size)).unwrap();
        let n = size as i32;
        grid.fill_box(BlockId::STONE, IVec3::ZERO, IVec3::new(n, 1, n), true);
        grid
    }

    fn settle(player: &mut Player, grid: &mut VoxelGrid, ticks: usize) {
        let config = MovementConfig::default();
        for _ in 0..ticks {
            player.tick(grid, PlayerInput::IDLE, &config);
        }
    }

    #[test]
    fn settles_on_floor() {
        let mut grid = floor_world(16);
        let mut player = Player::new(Vec3::new(8.0, 2.0, 8.0));

        settle(&mut player, &mut grid, 200);

        assert_eq!(player.position.y.floor(), 1.0);
        assert_eq!(player.velocity.y, 0.0);
        assert_eq!(player.position.x, 8.0);
        assert_eq!(player.position.z, 8.0);
        assert_eq!(grid.count(BlockId::STONE), 16 * 16);
        for p in collider_points(player.position).iter().take(4) {
            assert_eq!(p.y.floor(), 1.0);
        }
    }

    #[test]
    fn resting_velocity_stays_zero() {
        let mut grid = floor_world(16);
        let mut player = Player::new(Vec3::new(8.0, 2.0, 8.0));
        settle(&mut player, &mut grid, 200);
        let rest = player.position;

        let report = player.tick(&mut grid, PlayerInput::IDLE, &MovementConfig::default());
        assert!(report.blocked_vertically());
        assert_eq!(player.velocity.y, 0.0);
        assert_eq!(player.position, rest);
    }

    #[test]
    fn fast_fall_does_not_tunnel() {
        let mut grid = floor_world(16);
        let mut player = Player::new(Vec3::new(8.5, 1.05, 8.5));
        player.velocity.y = -0.6;

        let report = player.tick(&mut grid, PlayerInput::IDLE, &MovementConfig::default());

        assert!(report.blocked_vertically());
        assert_eq!(player.velocity.y, 0.0);
        assert!(player.position.y >= 1.0);
        assert!(!collides(&grid, player.position));
        assert_eq!(report.excavated, 0);
        assert_eq!(grid.count(BlockId::STONE), 16 * 16);
    }

    #[test]
    fn jump_from_ground() {
        let mut grid = floor_world(16);
        let mut player = Player::new(Vec3::new(8.0, 2.0, 8.0));
        settle(&mut player, &mut grid, 200);

        let config = MovementConfig::default();
        let report = player.tick(&mut grid, PlayerInput::new(0.0, 0.0, true), &config);
        assert!(report.jumped);
        assert_eq!(player.velocity.y, config.jump_velocity);

        let before = player.position.y;
        player.tick(&mut grid, PlayerInput::IDLE, &config);
        assert!(player.position.y > before);
    }

    #[test]
    fn jump_needs_ground() {
        let mut grid = floor_world(16);
        let mut player = Player::new(Vec3::new(8.0, 8.0, 8.0));
        let report = player.tick(&mut grid, PlayerInput::new(0.0, 0.0, true), &MovementConfig::default());
        assert!(!report.jumped);
        assert!(player.velocity.y < 0.0);
    }

    #[test]
    fn ceiling_bonk_stops_rise() {
        let mut grid = floor_world(16);
        grid.set(IVec3::new(8, 4, 8), BlockId::BRICKS);
        // Head sample at 1.6 above feet sits just under the brick.
        let mut player = Player::new(Vec3::new(8.5, 2.35, 8.5));
        player.velocity.y = 0.1;

        let report = player.tick(&mut grid, PlayerInput::new(0.0, 0.0, true), &MovementConfig::default());
        assert!(report.blocked_vertically());
        assert!(!report.jumped);
        assert_eq!(player.velocity.y, 0.0);
        assert_eq!(grid.get(IVec3::new(8, 4, 8)), BlockId::BRICKS);
    }

    #[test]
    fn excavates_spawn_pocket() {
        let mut grid = VoxelGrid::new(GridDims::cube(16)).unwrap();
        grid.fill_box(BlockId::DIRT, IVec3::ZERO, IVec3::new(16, 6, 16), true);
        let mut player = Player::new(Vec3::new(8.5, 3.2, 8.5));

        let report = player.tick(&mut grid, PlayerInput::IDLE, &MovementConfig::default());

        assert!(report.excavated > 0);
        for p in collider_points(player.position) {
            let cell = p.floor().as_ivec3();
            if grid.contains(cell) {
                assert!(grid.get(cell).is_air(), "{cell} still solid");
            }
        }
    }

    #[test]
    fn walks_forward_along_yaw() {
        let mut grid = floor_world(32);
        let mut player = Player::new(Vec3::new(16.5, 1.0, 16.5));
        let config = MovementConfig::default();

        player.tick(&mut grid, PlayerInput::new(1.0, 0.0, false), &config);
        assert_relative_eq!(player.velocity.z, 0.02);
        assert_relative_eq!(player.velocity.x, 0.0);

        player.set_orientation(FRAC_PI_2, 0.0);
        player.velocity = Vec3::ZERO;
        player.tick(&mut grid, PlayerInput::new(0.0, 1.0, false), &config);
        assert_relative_eq!(player.velocity.z, -0.02, epsilon = 1e-6);
        assert!(player.velocity.x.abs() < 1e-6);
    }

    #[test]
    fn walls_block_horizontally_and_slide() {
        let mut grid = floor_world(16);
        grid.fill_box(BlockId::STONE, IVec3::new(0, 1, 10), IVec3::new(16, 4, 11), true);
        let mut player = Player::new(Vec3::new(8.5, 1.0, 9.6));
        player.velocity = Vec3::new(0.05, 0.0, 0.2);

        let report = player.tick(&mut grid, PlayerInput::IDLE, &MovementConfig::default());
        assert!(report.blocked[2]);
        assert!(!report.blocked[0]);
        assert!(player.position.x > 8.5);
        assert_relative_eq!(player.position.z, 9.6);
    }

    #[test]
    fn walking_off_the_edge() {
        let mut grid = floor_world(8);
        let mut player = Player::new(Vec3::new(7.5, 1.0, 4.5));
        player.velocity.x = 0.4;
        player.tick(&mut grid, PlayerInput::IDLE, &MovementConfig::default());
        assert!(player.position.x > 7.5);
    }

    #[test]
    fn bedrock_below_grid() {
        let mut grid = VoxelGrid::new(GridDims::cube(8)).unwrap();
        let mut player = Player::new(Vec3::new(4.5, 0.5, 4.5));
        settle(&mut player, &mut grid, 100);
        assert!(player.position.y >= 0.0);
        assert_eq!(player.velocity.y, 0.0);
    }

    #[test]
    fn orientation_limits() {
        let mut player = Player::new(Vec3::ZERO);
        player.apply_look(LookDelta::new(0.0, 5.0));
        assert_relative_eq!(player.pitch(), FRAC_PI_2);
        player.apply_look(LookDelta::new(0.0, -10.0));
        assert_relative_eq!(player.pitch(), -FRAC_PI_2);

        player.set_orientation(PI + 0.25, 0.0);
        assert_relative_eq!(player.yaw(), -PI + 0.25, epsilon = 1e-5);
        player.set_orientation(-PI - 0.25, 0.0);
        assert_relative_eq!(player.yaw(), PI - 0.25, epsilon = 1e-5);
    }

    #[test]
    fn spawn_is_centred_near_top() {
        let player = Player::spawn(GridDims::NORMAL);
        assert_eq!(player.position, Vec3::new(256.5, 61.0, 256.5));
        assert_relative_eq!(player.eye_position().y, 62.45, epsilon = 1e-4);
        assert_relative_eq!(player.look_direction().length(), 1.0, epsilon = 1e-6);
    }
}
