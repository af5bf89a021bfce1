use smallmat::{
    cross, dot, inverse, lerp, norm, normalize, transpose, Backend, Matrix2, Matrix3, Matrix4,
    Vector2, Vector3, Vector4, EPS,
};

// Small deterministic generator so the identities run over many inputs.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        ((self.0 >> 11) as f64 / (1u64 << 53) as f64) * 4.0 - 2.0
    }

    fn vec3(&mut self) -> Vector3<f64> {
        Vector3::new(self.next(), self.next(), self.next())
    }

    fn vec4(&mut self) -> Vector4<f64> {
        Vector4::new(self.next(), self.next(), self.next(), self.next())
    }

    fn mat3(&mut self) -> Matrix3<f64> {
        Matrix3::from_columns([self.vec3(), self.vec3(), self.vec3()])
    }

    fn mat4(&mut self) -> Matrix4<f64> {
        Matrix4::from_columns([self.vec4(), self.vec4(), self.vec4(), self.vec4()])
    }
}

// ── Vector identities ────────────────────────────────────────────────

#[test]
fn addition_commutes_and_associates() {
    let mut rng = Lcg(1);
    for _ in 0..100 {
        let (u, v, w) = (rng.vec4(), rng.vec4(), rng.vec4());
        assert_eq!(u + v, v + u);
        assert_eq!((u + v) + w, u + (v + w));
        assert_eq!(u - u, Vector4::zeros());
    }
}

#[test]
fn dot_commutes_and_cross_anticommutes() {
    let mut rng = Lcg(2);
    for _ in 0..100 {
        let (u, v) = (rng.vec3(), rng.vec3());
        assert_eq!(dot(&u, &v), dot(&v, &u));
        assert_eq!(cross(&u, &v), -cross(&v, &u));
        let n = cross(&u, &v);
        assert!(dot(&n, &u).abs() < 1e-12);
        assert!(dot(&n, &v).abs() < 1e-12);
    }
}

#[test]
fn cross_of_basis_vectors() {
    let i = Vector3::new(1.0_f32, 0.0, 0.0);
    let j = Vector3::new(0.0, 1.0, 0.0);
    let k = Vector3::new(0.0, 0.0, 1.0);
    assert_eq!(cross(&i, &j), k);
    assert_eq!(cross(&j, &k), i);
    assert_eq!(cross(&k, &i), j);
}

#[test]
fn normalization_is_idempotent() {
    let mut rng = Lcg(3);
    for _ in 0..100 {
        let v = rng.vec3();
        let n = normalize(&v);
        assert!((norm(&n) - 1.0).abs() < 1e-12, "norm {}", norm(&n));
        assert_eq!(normalize(&n), n);
    }
    let v = Vector2::new(3.0_f32, -4.0);
    assert_eq!(v.normalize(), Vector2::new(0.6, -0.8));
}

#[test]
fn lerp_boundaries() {
    let a = Vector2::new(1.0_f64, -2.0);
    let b = Vector2::new(3.0, 6.0);
    assert_eq!(lerp(&a, &b, 0.0), a);
    assert_eq!(lerp(&a, &b, 1.0), b);
    assert_eq!(lerp(&a, &b, -0.5), Vector2::new(0.0, -6.0));
    assert_eq!(lerp(&a, &b, 1.5), Vector2::new(4.0, 10.0));

    let c = Vector4::new(0.0_f32, 1.0, 2.0, 3.0);
    let d = Vector4::splat(1.0);
    assert_eq!(lerp(&c, &d, 0.25), Vector4::new(0.25, 1.0, 1.75, 2.5));
}

#[test]
fn equality_uses_eps() {
    let a = Vector3::new(1.0_f64, 2.0, 3.0);
    let near = Vector3::new(1.0 + EPS / 2.0, 2.0, 3.0);
    let far = Vector3::new(1.0, 2.0, 3.0 + EPS * 2.0);
    assert_eq!(a, near);
    assert_ne!(a, far);
}

// ── Matrix identities ────────────────────────────────────────────────

#[test]
fn transpose_and_identity() {
    let mut rng = Lcg(4);
    for _ in 0..50 {
        let m = rng.mat4();
        assert_eq!(transpose(&transpose(&m)), m);
        assert_eq!(m * Matrix4::identity(), m);
        assert_eq!(Matrix4::identity() * m, m);
        let sum = m[(0, 0)] + m[(1, 1)] + m[(2, 2)] + m[(3, 3)];
        assert!((m.trace() - sum).abs() < 1e-12);
    }
}

#[test]
fn inverse_times_matrix_is_identity() {
    let mut rng = Lcg(5);
    let mut checked = 0;
    while checked < 50 {
        let m3 = rng.mat3();
        let m4 = rng.mat4();
        // Skip draws that are close to singular.
        if m3.determinant().abs() < 0.1 || m4.determinant().abs() < 0.1 {
            continue;
        }
        assert_eq!(inverse(&m3) * m3, Matrix3::identity());
        assert_eq!(inverse(&m4) * m4, Matrix4::identity());
        checked += 1;
    }
}

#[test]
fn product_transpose_reverses_order() {
    let mut rng = Lcg(6);
    let (a, b) = (rng.mat3(), rng.mat3());
    assert_eq!((a * b).transpose(), b.transpose() * a.transpose());
    assert!(((a * b).determinant() - a.determinant() * b.determinant()).abs() < 1e-9);
}

#[test]
fn matrix2_identities() {
    let m = Matrix2::new([[0.5_f32, -1.5], [2.0, 3.0]]);
    assert_eq!(m.transpose().transpose(), m);
    assert_eq!(m * m.inverse(), Matrix2::identity());
    assert_eq!(m.trace(), 3.5);
    assert_eq!(m.determinant(), 4.5);
}

// ── Padding lane ─────────────────────────────────────────────────────

#[test]
fn padding_garbage_never_reaches_results() {
    let mut u = Vector3::new(1.0_f64, 2.0, 3.0);
    let mut v = Vector3::new(-1.0, 0.5, 2.0);
    u.elements_mut()[3] = f64::NAN;
    v.elements_mut()[3] = 1e300;

    assert_eq!(u.dot(&v), 6.0);
    assert_eq!(u.square_norm(), 14.0);
    assert_eq!(u + v, Vector3::new(0.0, 2.5, 5.0));
    assert_eq!(u.cross(&v), Vector3::new(2.5, -5.0, 2.5));
    assert!(u.normalize().as_slice().iter().all(|x| x.is_finite()));

    let mut m = Matrix3::identity();
    for col in m.elements_mut() {
        col[3] = f64::INFINITY;
    }
    assert_eq!(m * u, Vector3::new(1.0, 2.0, 3.0));
    assert_eq!(m.determinant(), 1.0);
    assert_eq!(m, Matrix3::identity());
}

#[test]
fn kernels_do_not_write_padding() {
    let mut v = Vector3::new(3.0_f32, 0.0, 4.0);
    v.elements_mut()[3] = 42.0;
    v.normalize_in_place();
    assert_eq!(v.elements()[3], 42.0);

    let mut w = v;
    w += Vector3::splat(1.0);
    w *= 2.0;
    assert_eq!(w.elements()[3], 42.0);
}

#[test]
fn backend_is_consistent_with_build() {
    let tier = Backend::of::<f64>();
    assert_eq!(Backend::of::<f32>(), tier);
    assert_eq!(Backend::of::<u8>(), Backend::Scalar);
    assert_eq!(tier == Backend::Avx, smallmat::CPU_HAS_AVX);
}
