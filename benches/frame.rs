//! Frame benchmarks.
//!
//! Measures the simulation step on its own and together with software
//! rasterisation.
//!
//! Run with: `cargo bench --bench frame`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use silkflow::prelude::*;

fn warmed_up(config: &Config) -> Simulation {
    let mut sim = Simulation::new(1280, 720).with_seed(1);
    for _ in 0..120 {
        sim.advance(1.0, None, config);
    }
    sim
}

fn bench_advance(c: &mut Criterion) {
    let mut group = c.benchmark_group("advance");

    for count in [1u32, 5, 15] {
        let config = Config {
            stream_count: count,
            ..Default::default()
        };
        let mut sim = warmed_up(&config);
        group.bench_function(format!("{count}_streams"), |b| {
            b.iter(|| black_box(sim.advance(1.0, Some(Vec2::new(640.0, 360.0)), &config)))
        });
    }

    group.finish();
}

fn bench_draw(c: &mut Criterion) {
    let config = Config {
        sun_enabled: true,
        effect_mode: EffectMode::Particles,
        ..Default::default()
    };
    let mut sim = warmed_up(&config);
    let mut canvas = Canvas::new(1280, 720);

    c.bench_function("advance_and_draw_720p", |b| {
        b.iter(|| {
            let frame = sim.advance(1.0, None, &config);
            canvas.draw(black_box(&frame));
        })
    });
}

criterion_group!(benches, bench_advance, bench_draw);
criterion_main!(benches);
