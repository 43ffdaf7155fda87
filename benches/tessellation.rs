use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gl_window_host::math::Transform3D;
use gl_window_host::tessellator::tessellate_sphere;
use glam::{Quat, Vec3};

/// Benchmark: Sphere tessellation at the precisions lessons typically use
fn bench_tessellate_sphere(c: &mut Criterion) {
    let mut group = c.benchmark_group("tessellate_sphere");

    for precision in [8u32, 32, 64, 128].iter() {
        group.bench_with_input(
            BenchmarkId::new("precision", precision),
            precision,
            |b, &precision| b.iter(|| black_box(tessellate_sphere(black_box(precision)))),
        );
    }

    group.finish();
}

/// Benchmark: Uploadable byte views of a finished mesh
fn bench_mesh_bytes(c: &mut Criterion) {
    let mesh = tessellate_sphere(64).expect("precision above minimum");

    c.bench_function("mesh_bytes_64", |b| {
        b.iter(|| {
            let mesh = black_box(&mesh);
            black_box(mesh.vertex_bytes().len() + mesh.index_bytes().len())
        })
    });
}

/// Benchmark: Building model matrices for a batch of objects
fn bench_transform_to_mat4(c: &mut Criterion) {
    let transforms: Vec<Transform3D> = (0..1000)
        .map(|i| {
            let angle = i as f32 * 0.01;
            Transform3D::new(
                Vec3::splat(1.0 + angle),
                Quat::from_rotation_y(angle),
                Vec3::new(angle, -angle, 2.0 * angle),
            )
        })
        .collect();

    c.bench_function("transform_to_mat4_1000", |b| {
        b.iter(|| {
            for transform in black_box(&transforms) {
                black_box(transform.to_mat4());
            }
        })
    });
}

criterion_group!(
    benches,
    bench_tessellate_sphere,
    bench_mesh_bytes,
    bench_transform_to_mat4,
);

criterion_main!(benches);
