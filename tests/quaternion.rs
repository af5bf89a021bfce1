use core::f64::consts::FRAC_PI_2;

use smallmat::{Matrix3, Matrix4, Quaternion, Vector3, Vector4};

fn basis() -> (Vector3<f64>, Vector3<f64>, Vector3<f64>) {
    (
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0),
        Vector3::new(0.0, 0.0, 1.0),
    )
}

#[test]
fn quarter_turns_cycle_the_basis() {
    let (i, j, k) = basis();
    assert_eq!(Quaternion::rotation_z(FRAC_PI_2) * i, j);
    assert_eq!(Quaternion::rotation_x(FRAC_PI_2) * j, k);
    assert_eq!(Quaternion::rotation_y(FRAC_PI_2) * k, i);
}

#[test]
fn quarter_turns_f32() {
    let i = Vector3::new(1.0_f32, 0.0, 0.0);
    let q = Quaternion::rotation_z(core::f32::consts::FRAC_PI_2);
    assert_eq!(q.rotate(&i), Vector3::new(0.0, 1.0, 0.0));
}

#[test]
fn rotation_matrices_agree() {
    let (i, j, k) = basis();
    let angle = 0.9;
    let cases = [
        (Quaternion::rotation_x(angle), Matrix3::rotation_x(angle)),
        (Quaternion::rotation_y(angle), Matrix3::rotation_y(angle)),
        (Quaternion::rotation_z(angle), Matrix3::rotation_z(angle)),
    ];
    for (q, m) in cases {
        assert_eq!(q.to_rotation_matrix(), m);
        assert_eq!(Matrix3::from_quaternion(&q), m);
        for v in [i, j, k, Vector3::new(1.0, -2.0, 3.0)] {
            assert_eq!(q * v, m * v);
        }
    }
}

#[test]
fn composition_applies_right_to_left() {
    let (i, _, _) = basis();
    let qx = Quaternion::rotation_x(FRAC_PI_2);
    let qz = Quaternion::rotation_z(FRAC_PI_2);
    let v = (qx * qz) * i;
    assert_eq!(v, qx * (qz * i));
    assert_eq!(v, Vector3::new(0.0, 0.0, 1.0));
}

#[test]
fn homogeneous_transform_from_quaternion() {
    let q = Quaternion::from_axis_angle(Vector3::new(0.0, 0.0, 2.0), FRAC_PI_2);
    let mut m = Matrix4::from_quaternion(&q);
    m.set_position(Vector3::new(5.0, 0.0, 0.0));
    assert_eq!(m * Vector4::new(1.0, 0.0, 0.0, 1.0), Vector4::new(5.0, 1.0, 0.0, 1.0));

    let back = Quaternion::from_rotation_matrix4(&m);
    assert!(back == q || back == -q);
}

#[test]
fn inverse_undoes_rotation() {
    let q = Quaternion::from_axis_angle(Vector3::new(1.0_f64, 2.0, -1.0), 1.1);
    let v = Vector3::new(0.3_f64, -0.7, 2.0);
    assert_eq!(q.inverse() * (q * v), v);
    assert_eq!(q.conjugate() * (q * v), v);
    // Rotation preserves length.
    assert!(((q * v).norm() - v.norm()).abs() < 1e-12);
}
