use criterion::{criterion_group, criterion_main, Criterion};

use mandelview_core::{Complex, EngineConfig, View};
use mandelview_render::{colorize, Engine};

fn engine(width: u32, height: u32, max_iterations: u32) -> Engine {
    let config = EngineConfig {
        max_iterations,
        ..EngineConfig::with_size(width, height)
    };
    Engine::new(config).expect("valid bench config")
}

fn bench_full_detail_frame(c: &mut Criterion) {
    let mut engine = engine(640, 480, 512);
    let max = engine.scheduler().max_level();

    c.bench_function("full_detail_640x480", |b| {
        b.iter(|| engine.render_frame(View::default(), max).unwrap());
    });
}

fn bench_coarse_frame(c: &mut Criterion) {
    let mut engine = engine(640, 480, 512);

    c.bench_function("coarse_640x480", |b| {
        b.iter(|| engine.render_frame(View::default(), 0).unwrap());
    });
}

fn bench_deep_zoom(c: &mut Criterion) {
    let mut engine = engine(256, 256, 1000);
    let view = View::new(Complex::new(-0.743_643_9, 0.131_825_9), 2000.0).unwrap();
    let max = engine.scheduler().max_level();

    c.bench_function("deep_zoom_256x256_1000iter", |b| {
        b.iter(|| engine.render_frame(view, max).unwrap());
    });
}

fn bench_colorize(c: &mut Criterion) {
    c.bench_function("colorize_512", |b| {
        b.iter(|| (0..=512).map(|n| colorize(n, 512).r as u32).sum::<u32>());
    });
}

criterion_group!(
    benches,
    bench_full_detail_frame,
    bench_coarse_frame,
    bench_deep_zoom,
    bench_colorize
);
criterion_main!(benches);
