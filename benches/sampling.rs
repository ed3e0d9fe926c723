use criterion::{criterion_group, criterion_main, Criterion, black_box};

use heightfield::fractal::{FractalParams, FractalSource};
use heightfield::noise::coherent_noise;
use heightfield::sampling::{sample_patch, sample_sphere};
use heightfield::source::HeightSource;

use glam::Vec3;

fn bench_coherent_noise_single(c: &mut Criterion) {
    c.bench_function("coherent_noise_single", |b| {
        b.iter(|| {
            coherent_noise(
                black_box(1.37),
                black_box(-0.42),
                black_box(2.71),
                black_box(42),
                black_box(2.12),
            )
        });
    });
}

fn bench_height_at_1_octave(c: &mut Criterion) {
    let source = FractalSource::new(FractalParams {
        octaves: 1,
        ..Default::default()
    })
    .unwrap();

    c.bench_function("height_at_1_octave", |b| {
        b.iter(|| source.height_at(black_box(Vec3::new(1.37, -0.42, 2.71))));
    });
}

fn bench_height_at_12_octaves(c: &mut Criterion) {
    let source = FractalSource::from_seed(42);

    c.bench_function("height_at_12_octaves", |b| {
        b.iter(|| source.height_at(black_box(Vec3::new(1.37, -0.42, 2.71))));
    });
}

fn bench_sample_patch_64(c: &mut Criterion) {
    let source = FractalSource::from_seed(42);

    c.bench_function("sample_patch_64", |b| {
        b.iter(|| {
            sample_patch(
                black_box(&source),
                Vec3::ZERO,
                Vec3::X,
                Vec3::Z,
                black_box(32.0),
                64,
            )
        });
    });
}

fn bench_sample_sphere_64(c: &mut Criterion) {
    let source = FractalSource::from_seed(42);

    c.bench_function("sample_sphere_64", |b| {
        b.iter(|| sample_sphere(black_box(&source), black_box(1000.0), 64));
    });
}

criterion_group!(
    benches,
    bench_coherent_noise_single,
    bench_height_at_1_octave,
    bench_height_at_12_octaves,
    bench_sample_patch_64,
    bench_sample_sphere_64,
);
criterion_main!(benches);
