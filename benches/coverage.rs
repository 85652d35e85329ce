use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use arborgrid::{volume_fractions, BoundingBox, CoverageConfig, CoverageMethod, Ellipsoid, SamplingGrid};

fn benchmark_volume_fractions(c: &mut Criterion) {
    let ellipsoid = Ellipsoid::from_volume(428.0, 2.25, 1.2).unwrap();
    let [a, b, z] = ellipsoid.radii();
    let bounds = BoundingBox::new([-a, -b, -z], [a, b, z]);
    let grid = SamplingGrid::rectangular(bounds, [40, 40, 10]).unwrap();

    let mut group = c.benchmark_group("volume_fractions");
    for samples in [4, 8, 16] {
        for (name, method) in [("summing", CoverageMethod::Summing), ("quadrature", CoverageMethod::Quadrature)] {
            let config = CoverageConfig::default().with_method(method).with_samples_per_axis(samples);
            group.bench_with_input(BenchmarkId::new(name, samples), &config, |bench, config| {
                bench.iter(|| black_box(volume_fractions(&grid, &ellipsoid, config).unwrap()))
            });
        }
    }
    group.finish();
}

criterion_group!(benches, benchmark_volume_fractions);
criterion_main!(benches);
