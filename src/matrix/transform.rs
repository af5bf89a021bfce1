//! Rotation, scale and projection factories.
//!
//! Every factory is a pure data fill: no kernel runs here. Angles are in
//! radians except for [`Matrix4::perspective`], which takes its field of
//! view in degrees.

use super::{Matrix2, Matrix3, Matrix4};
use crate::quaternion::Quaternion;
use crate::traits::FloatScalar;
use crate::vector::{Vector2, Vector3};

impl<T: FloatScalar> Matrix2<T> {
    /// Counter-clockwise rotation by `angle`.
    pub fn rotation(angle: T) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new([[c, -s], [s, c]])
    }

    pub fn scale(sx: T, sy: T) -> Self {
        Self::from_diagonal(Vector2::new(sx, sy))
    }

    pub fn scale_vec(v: Vector2<T>) -> Self {
        Self::from_diagonal(v)
    }
}

impl<T: FloatScalar> Matrix3<T> {
    pub fn rotation_x(angle: T) -> Self {
        let (s, c) = angle.sin_cos();
        let (o, l) = (T::zero(), T::one());
        Self::new([[l, o, o], [o, c, -s], [o, s, c]])
    }

    pub fn rotation_y(angle: T) -> Self {
        let (s, c) = angle.sin_cos();
        let (o, l) = (T::zero(), T::one());
        Self::new([[c, o, s], [o, l, o], [-s, o, c]])
    }

    pub fn rotation_z(angle: T) -> Self {
        let (s, c) = angle.sin_cos();
        let (o, l) = (T::zero(), T::one());
        Self::new([[c, -s, o], [s, c, o], [o, o, l]])
    }

    pub fn scale(sx: T, sy: T, sz: T) -> Self {
        Self::from_diagonal(Vector3::new(sx, sy, sz))
    }

    pub fn scale_vec(v: Vector3<T>) -> Self {
        Self::from_diagonal(v)
    }

    /// Rotation matrix of `q`. A normalized copy of `q` is used, so any
    /// non-zero quaternion is accepted.
    ///
    /// ```
    /// use smallmat::{Matrix3, Quaternion, Vector3};
    ///
    /// let q = Quaternion::rotation_z(std::f64::consts::FRAC_PI_2);
    /// let m = Matrix3::from_quaternion(&q);
    /// assert_eq!(m * Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0));
    /// ```
    pub fn from_quaternion(q: &Quaternion<T>) -> Self {
        let q = q.normalize();
        let (w, x, y, z) = (q.w(), q.x(), q.y(), q.z());
        let one = T::one();
        let two = T::lit(2.0);

        let (xx, yy, zz) = (x * x, y * y, z * z);
        let (xy, xz, yz) = (x * y, x * z, y * z);
        let (wx, wy, wz) = (w * x, w * y, w * z);

        Self::new([
            [one - two * (yy + zz), two * (xy - wz), two * (xz + wy)],
            [two * (xy + wz), one - two * (xx + zz), two * (yz - wx)],
            [two * (xz - wy), two * (yz + wx), one - two * (xx + yy)],
        ])
    }
}

impl<T: FloatScalar> Matrix4<T> {
    pub fn rotation_x(angle: T) -> Self {
        Self::homogeneous(&Matrix3::rotation_x(angle))
    }

    pub fn rotation_y(angle: T) -> Self {
        Self::homogeneous(&Matrix3::rotation_y(angle))
    }

    pub fn rotation_z(angle: T) -> Self {
        Self::homogeneous(&Matrix3::rotation_z(angle))
    }

    /// `diag(sx, sy, sz, 1)`.
    pub fn scale(sx: T, sy: T, sz: T) -> Self {
        Self::scale_vec(Vector3::new(sx, sy, sz))
    }

    pub fn scale_vec(v: Vector3<T>) -> Self {
        Self::homogeneous(&Matrix3::from_diagonal(v))
    }

    /// Identity with `v` in the upper three rows of column 3.
    pub fn translation(v: Vector3<T>) -> Self {
        let mut m = Self::identity();
        m.set_position(v);
        m
    }

    /// Right-handed perspective projection mapping depth to `[-1, 1]`.
    ///
    /// `fov` is the vertical field of view in degrees.
    pub fn perspective(fov: T, aspect: T, near: T, far: T) -> Self {
        let o = T::zero();
        let half = T::lit(0.5);
        let t0 = T::one() / (fov * half).to_radians().tan();
        let t1 = t0 / aspect;
        let t2 = near - far;
        let t3 = (far + near) / t2;
        let t4 = T::lit(2.0) * far * near / t2;

        Self::new([
            [t1, o, o, o],
            [o, t0, o, o],
            [o, o, t3, t4],
            [o, o, -T::one(), o],
        ])
    }

    /// Off-centre perspective projection for the given clip planes.
    pub fn frustum(left: T, right: T, top: T, bottom: T, near: T, far: T) -> Self {
        let o = T::zero();
        let two = T::lit(2.0);
        let x = two * near / (right - left);
        let y = two * near / (top - bottom);
        let a = (right + left) / (right - left);
        let b = (top + bottom) / (top - bottom);
        let c = -(far + near) / (far - near);
        let d = -(two * far * near) / (far - near);

        Self::new([
            [x, o, a, o],
            [o, y, b, o],
            [o, o, c, d],
            [o, o, -T::one(), o],
        ])
    }

    /// Orthographic projection of a `width` × `height` box centred on the view axis.
    pub fn ortho(width: T, height: T, near: T, far: T) -> Self {
        let o = T::zero();
        let two = T::lit(2.0);
        let depth = near - far;

        Self::new([
            [two / width, o, o, o],
            [o, two / height, o, o],
            [o, o, two / depth, (far + near) / depth],
            [o, o, o, T::one()],
        ])
    }

    /// Homogeneous rotation of `q`, normalized first.
    pub fn from_quaternion(q: &Quaternion<T>) -> Self {
        Self::homogeneous(&Matrix3::from_quaternion(q))
    }

    /// Overwrite the translation column and set the corner entry to one.
    pub fn set_position(&mut self, v: Vector3<T>) {
        let col = &mut self.data[3];
        col[..3].copy_from_slice(v.as_slice());
        col[3] = T::one();
    }

    /// Overwrite the upper-left 3×3 block. Row 3 and column 3 are untouched.
    pub fn set_rotation(&mut self, rot: &Matrix3<T>) {
        for (dst, src) in self.data.iter_mut().zip(rot.data.iter()) {
            dst[..3].copy_from_slice(&src[..3]);
        }
    }

    pub fn set_rotation_quat(&mut self, q: &Quaternion<T>) {
        self.set_rotation(&Matrix3::from_quaternion(q));
    }

    // Embed a 3×3 block into the identity.
    fn homogeneous(block: &Matrix3<T>) -> Self {
        let mut m = Self::identity();
        m.set_rotation(block);
        m
    }
}
