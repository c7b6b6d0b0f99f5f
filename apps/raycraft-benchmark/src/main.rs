//! Raycraft Benchmarks
//!
//! Times world generation, block picking, player physics and frame
//! rendering without opening a window. Criterion micro-benchmarks live in
//! the crates (`cargo bench -p raycraft-voxel`, `cargo bench -p raycraft-world`).
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release -p raycraft-benchmark -- [--seed N] [--iterations N] [--detail N]
//! ```

use std::f32::consts::TAU;
use std::time::{Duration, Instant};

use glam::Vec3;
use raycraft_core::constants::PLAYER_REACH;
use raycraft_core::PlayerInput;
use raycraft_physics::{BlockTarget, MovementConfig, Player};
use raycraft_render::{
    Camera, Framebuffer, Lighting, Raytracer, ScreenDetail, TextureAtlas, TextureStyle,
    WorldVolume,
};
use raycraft_voxel::{raycast, GridDims, VoxelGrid};
use raycraft_world::{generate_world_with_seed, WorldSeed};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Benchmark settings from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
struct BenchOptions {
    seed: WorldSeed,
    iterations: u32,
    detail: ScreenDetail,
}

impl Default for BenchOptions {
    fn default() -> Self {
        Self {
            seed: 42,
            iterations: 20,
            detail: ScreenDetail::default(),
        }
    }
}

impl BenchOptions {
    fn parse(args: &[String]) -> Self {
        let mut options = Self::default();
        let mut rest = args.iter().skip(1);
        while let Some(arg) = rest.next() {
            let value = match arg.as_str() {
                "--seed" | "--iterations" | "--detail" => rest.next(),
                _ => continue,
            };
            let Some(value) = value else { break };
            match arg.as_str() {
                "--seed" => options.seed = value.parse().unwrap_or(options.seed),
                "--iterations" => {
                    options.iterations = value.parse().unwrap_or(options.iterations).max(1);
                }
                _ => {
                    if let Ok(level) = value.parse() {
                        options.detail = ScreenDetail::new(level);
                    }
                }
            }
        }
        options
    }
}

/// Wall-clock samples of one measured section.
#[derive(Debug, Default)]
struct Timing {
    samples: Vec<Duration>,
}

impl Timing {
    fn measure<T>(&mut self, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let value = f();
        self.samples.push(start.elapsed());
        value
    }

    fn mean(&self) -> Duration {
        if self.samples.is_empty() {
            return Duration::ZERO;
        }
        self.samples.iter().sum::<Duration>() / self.samples.len() as u32
    }

    fn min(&self) -> Duration {
        self.samples.iter().min().copied().unwrap_or_default()
    }

    fn max(&self) -> Duration {
        self.samples.iter().max().copied().unwrap_or_default()
    }

    fn report(&self, name: &str) {
        info!(
            "{name:<12} mean {:>10.3?}  min {:>10.3?}  max {:>10.3?}  ({} samples)",
            self.mean(),
            self.min(),
            self.max(),
            self.samples.len()
        );
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().collect();
    let options = BenchOptions::parse(&args);
    info!("Raycraft Benchmarks: {options:?}");

    let dims = GridDims::default_for_build();
    let mut grid = VoxelGrid::new(dims)?;

    let mut generation = Timing::default();
    for _ in 0..options.iterations.min(5) {
        grid.clear();
        let summary = generation.measure(|| generate_world_with_seed(&mut grid, options.seed));
        info!("Generated {} solid cells, {} trees", summary.solid_cells, summary.trees);
    }
    generation.report("generation");

    let picking = bench_picking(&grid, options.iterations);
    picking.report("picking");

    let physics = bench_physics(&grid, options.iterations);
    physics.report("physics");

    let rendering = bench_rendering(&grid, &options);
    rendering.report("render");
    let resolution = options.detail.resolution();
    let mean = rendering.mean().as_secs_f64();
    if mean > 0.0 {
        info!(
            "Render: {}x{} at {:.1} fps, {:.2} Mrays/s",
            resolution.x,
            resolution.y,
            1.0 / mean,
            f64::from(resolution.x * resolution.y) / mean / 1e6
        );
    }

    Ok(())
}

/// Player reach casts in a fan of directions around the spawn point.
fn bench_picking(grid: &VoxelGrid, iterations: u32) -> Timing {
    let origin = Player::spawn(grid.dims()).eye_position();
    let mut timing = Timing::default();
    for _ in 0..iterations {
        let hits = timing.measure(|| {
            let mut hits = 0;
            for i in 0..1024 {
                let angle = i as f32 / 1024.0 * TAU;
                let direction = Vec3::new(angle.sin(), -0.6, angle.cos());
                hits += usize::from(raycast(grid, origin, direction, PLAYER_REACH * 8.0).is_hit());
            }
            hits
        });
        std::hint::black_box(hits);
    }
    timing
}

/// A player walking forward and turning, 1000 ticks per sample.
fn bench_physics(grid: &VoxelGrid, iterations: u32) -> Timing {
    let config = MovementConfig::default();
    let input = PlayerInput::new(1.0, 0.3, true);
    let mut timing = Timing::default();
    for _ in 0..iterations {
        let mut world = grid.clone();
        let mut player = Player::spawn(world.dims());
        timing.measure(|| {
            for tick in 0..1000 {
                player.set_orientation(tick as f32 * 0.01, -0.2);
                player.tick(&mut world, input, &config);
                std::hint::black_box(BlockTarget::pick(&world, &player));
            }
        });
    }
    timing
}

/// Full frames from a camera circling above the spawn point.
fn bench_rendering(grid: &VoxelGrid, options: &BenchOptions) -> Timing {
    let volume = WorldVolume::from_grid(grid);
    let atlas = TextureAtlas::generate(TextureStyle::for_build());
    let raytracer = Raytracer::default();
    let lighting = Lighting::at(2500.0);
    let eye = Player::spawn(grid.dims()).eye_position();
    let mut framebuffer = Framebuffer::new(options.detail.resolution());

    let mut timing = Timing::default();
    for frame in 0..options.iterations {
        let yaw = frame as f32 / options.iterations as f32 * TAU;
        let camera = Camera::new(eye, yaw, -0.35, raytracer.config().fov, options.detail.resolution());
        timing.measure(|| {
            raytracer.render(&volume, &atlas, &camera, &lighting, None, &mut framebuffer);
        });
    }
    timing
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(list: &[&str]) -> BenchOptions {
        let args: Vec<String> = std::iter::once("raycraft-benchmark")
            .chain(list.iter().copied())
            .map(String::from)
            .collect();
        BenchOptions::parse(&args)
    }

    #[test]
    fn options() {
        assert_eq!(parse(&[]), BenchOptions::default());
        let options = parse(&["--seed", "7", "--iterations", "0", "--detail", "-2"]);
        assert_eq!(options.seed, 7);
        assert_eq!(options.iterations, 1);
        assert_eq!(options.detail.level(), -2);
    }

    #[test]
    fn timing_stats() {
        let mut timing = Timing::default();
        assert_eq!(timing.mean(), Duration::ZERO);
        timing.samples = vec![Duration::from_millis(2), Duration::from_millis(4)];
        assert_eq!(timing.mean(), Duration::from_millis(3));
        assert_eq!(timing.min(), Duration::from_millis(2));
        assert_eq!(timing.max(), Duration::from_millis(4));
        assert_eq!(timing.measure(|| 5), 5);
        assert_eq!(timing.samples.len(), 3);
    }

    #[test]
    fn sections_run_on_a_small_world() {
        let grid = raycraft_test::generated_world(GridDims::cube(16), 1).unwrap();
        assert_eq!(bench_picking(&grid, 2).samples.len(), 2);
        assert_eq!(bench_physics(&grid, 1).samples.len(), 1);
        let options = BenchOptions {
            iterations: 2,
            detail: ScreenDetail::new(-4),
            ..BenchOptions::default()
        };
        assert_eq!(bench_rendering(&grid, &options).samples.len(), 2);
    }
}
