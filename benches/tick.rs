//! Benchmarks for the per-frame CPU work.
//!
//! Run with: `cargo bench`

use backdrop::{instances, FieldConfig, ParticleField};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    // All-pairs gravity, so cost grows with the square of the count.
    for count in [12, 20, 100, 256] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut field =
                ParticleField::seeded(FieldConfig::default().with_count(count), 42).unwrap();
            let mut scroll = 0.0;
            b.iter(|| {
                scroll += 1.0;
                black_box(field.tick(black_box(scroll)))
            })
        });
    }

    group.finish();
}

fn bench_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("instances");

    for count in [20, 256] {
        let mut field = ParticleField::seeded(FieldConfig::default().with_count(count), 42).unwrap();
        field.tick(0.0);
        group.bench_with_input(BenchmarkId::from_parameter(count), &field, |b, field| {
            b.iter(|| black_box(instances(field)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tick, bench_projection);
criterion_main!(benches);
