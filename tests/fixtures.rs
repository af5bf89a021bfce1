use smallmat::{Matrix2, Matrix3, Matrix4, Vector3, Vector4};

const TOL: f64 = 1e-9;

fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
    assert!((a - b).abs() < tol, "{}: {} vs {}", msg, a, b);
}

fn fixture_3x3() -> Matrix3<f64> {
    Matrix3::new([[2.0, 5.0, 2.0], [-2.0, -1.0, 0.0], [-3.0, 5.0, 1.0]])
}

fn fixture_4x4() -> Matrix4<f64> {
    Matrix4::new([
        [4.0, -3.0, 2.0, 3.0],
        [4.0, 1.0, -4.0, -2.0],
        [6.0, -3.0, -5.0, 4.0],
        [5.0, -3.0, -2.0, -6.0],
    ])
}

// ── Determinants ─────────────────────────────────────────────────────

#[test]
fn determinant_3x3() {
    assert_near(fixture_3x3().determinant(), -18.0, TOL, "det");
    let f32_det = Matrix3::new([[2.0_f32, 5.0, 2.0], [-2.0, -1.0, 0.0], [-3.0, 5.0, 1.0]]).determinant();
    assert!((f32_det + 18.0).abs() < 1e-4);
}

#[test]
fn determinant_4x4() {
    assert_near(fixture_4x4().determinant(), 885.0, TOL, "det");
    assert_near(fixture_4x4().transpose().determinant(), 885.0, TOL, "det of transpose");
}

#[test]
fn determinant_non_integer() {
    let m2 = Matrix2::new([[0.27958992_f64, -2.56058477], [-0.40810265, -1.03088155]]);
    assert_near(m2.determinant(), -1.3332055202806168, 1e-12, "det2");

    let m4 = Matrix4::new([
        [0.91464976_f64, 0.55413345, 0.19333044, -0.60001319],
        [0.73620611, -0.35718703, -0.69387382, 0.50825215],
        [-1.83009442, 0.04651359, -2.44449474, -0.3210386],
        [0.61120402, -0.93451763, 0.51492608, -0.43250595],
    ]);
    assert_near(m4.determinant(), -4.0799311229422175, 1e-12, "det4");
}

// ── Inverses ─────────────────────────────────────────────────────────

#[test]
fn inverse_3x3_exact() {
    let expected = Matrix3::new([
        [1.0 / 18.0, -5.0 / 18.0, -1.0 / 9.0],
        [-1.0 / 9.0, -4.0 / 9.0, 2.0 / 9.0],
        [13.0 / 18.0, 25.0 / 18.0, -4.0 / 9.0],
    ]);
    let inv = fixture_3x3().inverse();
    assert_eq!(inv, expected);
    for col in inv.elements() {
        assert_eq!(col[3], 0.0);
    }
}

#[test]
fn inverse_4x4_exact() {
    let expected = Matrix4::new([
        [176.0 / 885.0, 67.0 / 295.0, -26.0 / 295.0, -31.0 / 885.0],
        [98.0 / 885.0, 101.0 / 295.0, -48.0 / 295.0, -148.0 / 885.0],
        [182.0 / 885.0, 19.0 / 295.0, -47.0 / 295.0, -22.0 / 885.0],
        [37.0 / 885.0, -1.0 / 295.0, 18.0 / 295.0, -92.0 / 885.0],
    ]);
    assert_eq!(fixture_4x4().inverse(), expected);
    assert_eq!(fixture_4x4().try_inverse(), Ok(expected));
}

// ── Products ─────────────────────────────────────────────────────────

#[test]
fn matmul_3x3_fixture() {
    let a = Matrix3::new([[-10.0_f32, -10.0, -2.0], [-8.0, -8.0, 1.0], [5.0, -7.0, -3.0]]);
    let b = Matrix3::new([[-1.0, -1.0, 8.0], [6.0, 6.0, 0.0], [-8.0, 2.0, -9.0]]);
    let c = Matrix3::new([[-34.0, -54.0, -62.0], [-48.0, -38.0, -73.0], [-23.0, -53.0, 67.0]]);
    assert_eq!(a * b, c);
    assert_eq!(&a * &b, c);
}

fn matmul_4x4_operands() -> ([[f64; 4]; 4], [[f64; 4]; 4], [[f64; 4]; 4]) {
    let a = [
        [-10.0, -6.0, -6.0, 2.0],
        [-8.0, -6.0, -6.0, -5.0],
        [7.0, -10.0, 5.0, 7.0],
        [-2.0, -9.0, -8.0, 6.0],
    ];
    let b = [
        [7.0, 7.0, -6.0, 3.0],
        [-7.0, 1.0, 8.0, 5.0],
        [7.0, -2.0, 0.0, -4.0],
        [-9.0, 2.0, 5.0, -3.0],
    ];
    let c = [
        [-88.0, -60.0, 22.0, -42.0],
        [-11.0, -60.0, -25.0, -15.0],
        [91.0, 43.0, -87.0, -70.0],
        [-61.0, 5.0, -30.0, -37.0],
    ];
    (a, b, c)
}

#[test]
fn matmul_4x4_fixture_f64() {
    let (a, b, c) = matmul_4x4_operands();
    let (a, b, c) = (Matrix4::new(a), Matrix4::new(b), Matrix4::new(c));
    assert_eq!(a * b, c);
    assert_eq!(&a * &b, c);
    let mut d = a;
    d *= b;
    assert_eq!(d, c);
}

#[test]
fn matmul_4x4_fixture_f32() {
    let (a, b, c) = matmul_4x4_operands();
    let narrow = |m: [[f64; 4]; 4]| Matrix4::new(m.map(|row| row.map(|x| x as f32)));
    let (a, b, c) = (narrow(a), narrow(b), narrow(c));
    assert_eq!(a * b, c);
    assert_eq!(&a * &b, c);
}

#[test]
fn matmul_vec_fixtures() {
    let v = Vector3::new(1.0, 2.0, 3.0);
    assert_eq!(fixture_3x3() * v, Vector3::new(18.0, -4.0, 10.0));

    let w = Vector4::new(1.0, -1.0, 2.0, 0.5);
    assert_eq!(fixture_4x4() * w, Vector4::new(12.5, -6.0, 1.0, 1.0));
}

#[test]
fn trace_sums_diagonal() {
    assert_eq!(fixture_3x3().trace(), 2.0);
    assert_eq!(fixture_4x4().trace(), -6.0);
}
