use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use fogcast::game::{FogOfWar, Scene};
use fogcast::world::{compute_visibility, Cell};
use fogcast::FogConfig;

fn bench_open_field(c: &mut Criterion) {
    c.bench_function("shadowcast open r=24", |b| {
        b.iter(|| compute_visibility(black_box(Cell::new(40, 30)), |_| false, black_box(24)))
    });
}

fn bench_pillars(c: &mut Criterion) {
    let pillar = |cell: Cell| cell.x % 5 == 0 && cell.y % 4 == 0;
    c.bench_function("shadowcast pillars r=24", |b| {
        b.iter(|| compute_visibility(black_box(Cell::new(41, 31)), pillar, black_box(24)))
    });
}

fn bench_tick(c: &mut Criterion) {
    let viewport = (640, 480);
    let mut rng = StdRng::seed_from_u64(1);
    let mut scene = Scene::generate(&mut rng, viewport, 36, 16);
    let config = FogConfig {
        seed: Some(1),
        ..FogConfig::default()
    };
    let mut fog = FogOfWar::new(config, viewport).expect("default config is valid");

    c.bench_function("fog tick 640x480", |b| {
        b.iter(|| {
            scene.step(&mut rng);
            fog.tick(scene.observer, &scene.obstacles, &mut scene.ghosts)
        })
    });
}

criterion_group!(benches, bench_open_field, bench_pillars, bench_tick);
criterion_main!(benches);
