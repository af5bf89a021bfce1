use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

// ---------------------------------------------------------------------------
// Helpers: matching inputs for both libraries
// ---------------------------------------------------------------------------

fn entry(i: usize, j: usize) -> f64 {
    ((i * 4 + j + 1) as f64).sin() + if i == j { 4.0 } else { 0.0 }
}

fn smallmat_mat4() -> smallmat::Matrix4<f64> {
    smallmat::Matrix4::new(core::array::from_fn(|i| core::array::from_fn(|j| entry(i, j))))
}

fn nalgebra_mat4() -> nalgebra::Matrix4<f64> {
    nalgebra::Matrix4::from_fn(entry)
}

fn smallmat_mat3_f32() -> smallmat::Matrix3<f32> {
    smallmat::Matrix3::new(core::array::from_fn(|i| core::array::from_fn(|j| entry(i, j) as f32)))
}

fn nalgebra_mat3_f32() -> nalgebra::Matrix3<f32> {
    nalgebra::Matrix3::from_fn(|i, j| entry(i, j) as f32)
}

// ---------------------------------------------------------------------------
// Vectors
// ---------------------------------------------------------------------------

fn vec3_dot(c: &mut Criterion) {
    let mut g = c.benchmark_group("vec3_dot_f32");

    g.bench_function("smallmat", |b| {
        let u = smallmat::Vector3::new(1.0_f32, 2.0, 3.0);
        let v = smallmat::Vector3::new(-0.5_f32, 4.0, 0.25);
        b.iter(|| black_box(&u).dot(black_box(&v)))
    });

    g.bench_function("nalgebra", |b| {
        let u = nalgebra::Vector3::new(1.0_f32, 2.0, 3.0);
        let v = nalgebra::Vector3::new(-0.5_f32, 4.0, 0.25);
        b.iter(|| black_box(&u).dot(black_box(&v)))
    });

    g.finish();
}

fn vec3_cross(c: &mut Criterion) {
    let mut g = c.benchmark_group("vec3_cross_f32");

    g.bench_function("smallmat", |b| {
        let u = smallmat::Vector3::new(1.0_f32, 2.0, 3.0);
        let v = smallmat::Vector3::new(-0.5_f32, 4.0, 0.25);
        b.iter(|| black_box(&u).cross(black_box(&v)))
    });

    g.bench_function("nalgebra", |b| {
        let u = nalgebra::Vector3::new(1.0_f32, 2.0, 3.0);
        let v = nalgebra::Vector3::new(-0.5_f32, 4.0, 0.25);
        b.iter(|| black_box(&u).cross(black_box(&v)))
    });

    g.finish();
}

fn vec4_normalize(c: &mut Criterion) {
    let mut g = c.benchmark_group("vec4_normalize_f64");

    g.bench_function("smallmat", |b| {
        let v = smallmat::Vector4::new(1.0_f64, -2.0, 3.0, 0.5);
        b.iter(|| black_box(&v).normalize())
    });

    g.bench_function("nalgebra", |b| {
        let v = nalgebra::Vector4::new(1.0_f64, -2.0, 3.0, 0.5);
        b.iter(|| black_box(&v).normalize())
    });

    g.finish();
}

// ---------------------------------------------------------------------------
// Matrix products
// ---------------------------------------------------------------------------

fn matmul_4x4(c: &mut Criterion) {
    let mut g = c.benchmark_group("matmul_4x4_f64");

    g.bench_function("smallmat", |b| {
        let a = smallmat_mat4();
        let m = a.transpose();
        b.iter(|| black_box(&a) * black_box(&m))
    });

    g.bench_function("nalgebra", |b| {
        let a = nalgebra_mat4();
        let m = a.transpose();
        b.iter(|| black_box(&a) * black_box(&m))
    });

    g.finish();
}

fn matmul_3x3(c: &mut Criterion) {
    let mut g = c.benchmark_group("matmul_3x3_f32");

    g.bench_function("smallmat", |b| {
        let a = smallmat_mat3_f32();
        let m = a.transpose();
        b.iter(|| black_box(&a) * black_box(&m))
    });

    g.bench_function("nalgebra", |b| {
        let a = nalgebra_mat3_f32();
        let m = a.transpose();
        b.iter(|| black_box(&a) * black_box(&m))
    });

    g.finish();
}

fn matvec_4x4(c: &mut Criterion) {
    let mut g = c.benchmark_group("matvec_4x4_f64");

    g.bench_function("smallmat", |b| {
        let a = smallmat_mat4();
        let v = smallmat::Vector4::new(1.0, 2.0, 3.0, 4.0);
        b.iter(|| black_box(&a) * black_box(&v))
    });

    g.bench_function("nalgebra", |b| {
        let a = nalgebra_mat4();
        let v = nalgebra::Vector4::new(1.0, 2.0, 3.0, 4.0);
        b.iter(|| black_box(&a) * black_box(&v))
    });

    g.finish();
}

// ---------------------------------------------------------------------------
// Determinant and inverse
// ---------------------------------------------------------------------------

fn determinant_4x4(c: &mut Criterion) {
    let mut g = c.benchmark_group("determinant_4x4_f64");

    g.bench_function("smallmat", |b| {
        let a = smallmat_mat4();
        b.iter(|| black_box(&a).determinant())
    });

    g.bench_function("nalgebra", |b| {
        let a = nalgebra_mat4();
        b.iter(|| black_box(&a).determinant())
    });

    g.finish();
}

fn inverse_4x4(c: &mut Criterion) {
    let mut g = c.benchmark_group("inverse_4x4_f64");

    g.bench_function("smallmat", |b| {
        let a = smallmat_mat4();
        b.iter(|| black_box(&a).inverse())
    });

    g.bench_function("nalgebra", |b| {
        let a = nalgebra_mat4();
        b.iter(|| black_box(&a).try_inverse())
    });

    g.finish();
}

fn elementwise_3x3(c: &mut Criterion) {
    let mut g = c.benchmark_group("add_3x3_f32");

    g.bench_function("smallmat", |b| {
        let a = smallmat_mat3_f32();
        b.iter(|| black_box(&a) + black_box(&a))
    });

    g.bench_function("nalgebra", |b| {
        let a = nalgebra_mat3_f32();
        b.iter(|| black_box(&a) + black_box(&a))
    });

    g.finish();
}

criterion_group!(
    benches,
    vec3_dot,
    vec3_cross,
    vec4_normalize,
    matmul_4x4,
    matmul_3x3,
    matvec_4x4,
    determinant_4x4,
    inverse_4x4,
    elementwise_3x3,
);
criterion_main!(benches);
