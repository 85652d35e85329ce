use criterion::{black_box, criterion_group, criterion_main, Criterion};
use arborgrid::{count_points_in_cells, BoundaryPolicy, BoundingBox, SamplingGrid};
use rand::prelude::*;
use rand::rngs::StdRng;

fn benchmark_count_points(c: &mut Criterion) {
    let bounds = BoundingBox::new([0.0, 0.0, 0.0], [100.0, 100.0, 100.0]);
    let grid = SamplingGrid::rectangular(bounds, [20, 20, 20]).unwrap();

    let mut rng = StdRng::seed_from_u64(123456789);
    let points: Vec<[f64; 3]> = (0..10000)
        .map(|_| [rng.r#gen::<f64>() * 100.0, rng.r#gen::<f64>() * 100.0, rng.r#gen::<f64>() * 100.0])
        .collect();

    c.bench_function("count_points_8000_cells_10000_points", |b| {
        b.iter(|| black_box(count_points_in_cells(&grid, &points, BoundaryPolicy::HalfOpen)))
    });
}

criterion_group!(benches, benchmark_count_points);
criterion_main!(benches);
