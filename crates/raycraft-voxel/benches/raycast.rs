use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::{IVec3, Vec3};
use raycraft_core::BlockId;
use raycraft_voxel::{raycast, GridDims, GridTraversal, VoxelGrid};

fn hilly_grid() -> VoxelGrid {
    let dims = GridDims::REDUCED;
    let mut grid = VoxelGrid::new(dims).expect("valid dims");
    for z in 0..dims.z as i32 {
        for x in 0..dims.x as i32 {
            let h = 20 + ((x / 4 + z / 6) % 7);
            grid.fill_box(BlockId::STONE, IVec3::new(x, 0, z), IVec3::new(x + 1, h, z + 1), true);
            grid.set(IVec3::new(x, h, z), BlockId::GRASS);
        }
    }
    grid
}

fn bench_raycast(c: &mut Criterion) {
    let grid = hilly_grid();
    let origin = Vec3::new(32.5, 40.0, 32.5);
    let directions: Vec<Vec3> = (0..64)
        .map(|i| {
            let a = i as f32 * 0.098;
            Vec3::new(a.cos(), -0.35, a.sin()).normalize()
        })
        .collect();

    c.bench_function("raycast_reach", |b| {
        b.iter(|| {
            for &dir in &directions {
                black_box(raycast(&grid, black_box(origin), dir, 5.0));
            }
        });
    });

    c.bench_function("raycast_far", |b| {
        b.iter(|| {
            for &dir in &directions {
                black_box(raycast(&grid, black_box(origin), dir, 80.0));
            }
        });
    });

    c.bench_function("traversal_100_steps", |b| {
        let dir = Vec3::new(0.6, 0.1, 0.79).normalize();
        b.iter(|| GridTraversal::new(black_box(origin), dir).take(100).count());
    });
}

criterion_group!(benches, bench_raycast);
criterion_main!(benches);
