use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tracery::HeadlessRenderer;
use tracery::{DocumentSnapshot, EngineConfig, Registry};

const HOME: &str = include_str!("../../../fixtures/snapshots/home.json");

fn bench_render_pass(c: &mut Criterion) {
    let snapshot = DocumentSnapshot::from_json_str(HOME).unwrap();
    let registry = Registry::builtin();
    let config = EngineConfig::default();

    let mut group = c.benchmark_group("render_pass");
    group.bench_function("layout", |b| {
        b.iter(|| tracery::render::render_overlay(black_box(&snapshot), &registry, &config))
    });
    group.bench_function("svg", |b| {
        let renderer = HeadlessRenderer::new();
        b.iter(|| renderer.render_svg(black_box(&snapshot)))
    });
    group.bench_function("snapshot_json_to_svg", |b| {
        let renderer = HeadlessRenderer::new();
        b.iter(|| renderer.render_svg_snapshot_json(black_box(HOME)).unwrap())
    });
    group.finish();
}

criterion_group!(benches, bench_render_pass);
criterion_main!(benches);
