//! Benchmarks for plane cuts and Voronoi fracture.
//!
//! Run with: cargo bench --bench cut_benchmark

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use meshcut::{
    FractureOptions, Mesh,
    cut::cut_with_plane,
    fracture::{DEFAULT_BOUNDS_MARGIN, fracture_bounds, voronoi_fracture_with},
    plane::Plane,
};
use nalgebra::{Point3, Vector3};

fn benchmark_single_cut(c: &mut Criterion) {
    let plane = Plane::new(Point3::new(0.1, 0.0, -0.2), Vector3::new(0.3, 1.0, -0.4)).unwrap();

    let mut group = c.benchmark_group("single_cut");
    for segments in [16, 64, 128] {
        let sphere = Mesh::uv_sphere(1.0, segments, segments / 2);
        group.throughput(Throughput::Elements(sphere.triangle_count() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(segments), &sphere, |b, sphere| {
            b.iter(|| black_box(cut_with_plane(&plane, black_box(sphere))))
        });
    }
    group.finish();
}

fn benchmark_fracture(c: &mut Criterion) {
    let sphere = Mesh::uv_sphere(1.0, 32, 16);
    let bounds = fracture_bounds(&sphere, DEFAULT_BOUNDS_MARGIN);
    let options = FractureOptions::default();

    let mut group = c.benchmark_group("voronoi_fracture");
    group.sample_size(10);
    for cells in [4, 16, 64] {
        group.bench_with_input(BenchmarkId::from_parameter(cells), &cells, |b, &cells| {
            b.iter(|| black_box(voronoi_fracture_with(&sphere, &bounds, cells, &options)))
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_single_cut, benchmark_fracture);
criterion_main!(benches);
