mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use farm_scatter::building::presets::skyscraper;
use farm_scatter::building::{resolve_rooms, FloorParticleDistributor};
use farm_scatter::settings::{BuildingParticleSettings, WallSettings};

const TOWER_FLOORS: [usize; 3] = [2, 10, 40];

fn room_resolution_benches(c: &mut Criterion) {
    let wall = WallSettings::default();
    let mut group = c.benchmark_group("building/resolve_rooms");

    for &floors in &TOWER_FLOORS {
        let Ok(outline) = skyscraper(floors, 15, 9) else {
            continue;
        };
        let expected = resolve_rooms(&outline, &wall).len();
        group.throughput(common::particles_throughput(expected));

        group.bench_with_input(BenchmarkId::from_parameter(floors), &floors, |b, _| {
            b.iter(|| {
                let layout = resolve_rooms(&outline, &wall);
                black_box(layout.len());
            });
        });
    }

    group.finish();
}

fn floor_particle_benches(c: &mut Criterion) {
    let wall = WallSettings::default();
    let Ok(outline) = skyscraper(10, 15, 9) else {
        return;
    };
    let mut group = c.benchmark_group("building/floor_particles");

    for &scale in &common::SCALES {
        let particles = BuildingParticleSettings::default().with_scale(scale);
        let Ok(dist) = FloorParticleDistributor::new(&outline, 3, &wall, &particles) else {
            continue;
        };
        group.throughput(common::particles_throughput(dist.grid().cell_count()));

        group.bench_with_input(BenchmarkId::from_parameter(scale), &scale, |b, _| {
            b.iter(|| {
                let out = dist.generate();
                black_box(out.len());
            });
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = room_resolution_benches, floor_particle_benches
}
criterion_main!(benches);
