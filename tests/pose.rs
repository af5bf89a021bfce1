use smallmat::{Matrix4, Pose3d, Quaternion, Vector3, Vector4};

fn poses() -> Vec<Pose3d<f64>> {
    vec![
        Pose3d::new(Vector3::new(0.0, 5.0, 0.0), Quaternion::rotation_x(0.7)),
        Pose3d::new(Vector3::new(-3.0, 1.5, 2.0), Quaternion::from_axis_angle(Vector3::new(1.0, 2.0, -1.0), 1.1)),
        Pose3d::new(Vector3::new(4.0, -2.0, 0.5), Quaternion::new(0.3, -0.6, 0.2, 0.9)),
    ]
}

fn homogeneous(v: Vector3<f64>) -> Vector4<f64> {
    Vector4::from_vec3(v, 1.0)
}

#[test]
fn to_matrix_is_from_quaternion_plus_set_position() {
    for p in poses() {
        let mut expected = Matrix4::from_quaternion(&p.orientation);
        expected.set_position(p.position);
        assert_eq!(p.to_matrix(), expected);
    }
}

#[test]
fn matrix_round_trip() {
    for p in poses() {
        let back = Pose3d::from_matrix4(&p.to_matrix());
        assert_eq!(back.position, p.position);
        // q and -q encode the same rotation
        assert!(back.orientation == p.orientation || back.orientation == -p.orientation);
        assert_eq!(back.to_matrix(), p.to_matrix());
    }
}

#[test]
fn matrix_and_pose_transform_points_alike() {
    let v = Vector3::new(0.3, -0.7, 2.0);
    for p in poses() {
        assert_eq!(p.to_matrix() * homogeneous(v), homogeneous(p * v));
    }
}

#[test]
fn composition_matches_matrix_product() {
    let ps = poses();
    for a in &ps {
        for b in &ps {
            assert_eq!((a * b).to_matrix(), a.to_matrix() * b.to_matrix());
        }
    }
}

#[test]
fn inverse_matches_matrix_inverse() {
    let v = Vector3::new(1.0, 2.0, 3.0);
    for p in poses() {
        assert_eq!(p.inverse().to_matrix(), p.to_matrix().inverse());
        assert_eq!(p.inverse() * (p * v), v);
    }
}

#[test]
fn pose_f32() {
    let p = Pose3d::new(Vector3::new(-3.0_f32, 0.0, 0.0), Quaternion::rotation_z(core::f32::consts::FRAC_PI_2));
    assert_eq!(p * Vector3::new(1.0, 1.0, 1.0), Vector3::new(-4.0, 1.0, 1.0));
    let id = p.inverse() * p;
    assert_eq!(id.orientation, Quaternion::identity());
    assert!(id.position.as_slice().iter().all(|x| x.abs() < 1e-5));
}
