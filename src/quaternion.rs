use core::fmt;
use core::ops::{Add, Mul, Neg, Sub};

use crate::matrix::{Matrix3, Matrix4};
use crate::simd::{self, scalar, Vec4Buf};
use crate::traits::FloatScalar;
use crate::vector::Vector3;

/// Rotation quaternion.
///
/// Scalar-first convention: storage is `[w, x, y, z]` where `w` is the
/// scalar part and `(x, y, z)` is the vector part. The buffer has the
/// layout of a [`Vector4`](crate::Vector4), so norms, sums and `==` run on
/// the Vector4 kernels.
///
/// ```
/// use smallmat::{Quaternion, Vector3};
/// use std::f64::consts::FRAC_PI_2;
///
/// let q = Quaternion::rotation_z(FRAC_PI_2);
/// assert_eq!(q * Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0));
/// ```
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct Quaternion<T> {
    data: Vec4Buf<T>,
}

// ── Constructors ─────────────────────────────────────────────────────

impl<T: FloatScalar> Quaternion<T> {
    #[inline]
    pub fn new(w: T, x: T, y: T, z: T) -> Self {
        Self { data: [w, x, y, z] }
    }

    /// Identity quaternion (no rotation).
    #[inline]
    pub fn identity() -> Self {
        Self::new(T::one(), T::zero(), T::zero(), T::zero())
    }

    /// Scalar part `w` and vector part `v`.
    #[inline]
    pub fn from_parts(w: T, v: Vector3<T>) -> Self {
        Self::new(w, v.x(), v.y(), v.z())
    }

    pub fn rotation_x(angle: T) -> Self {
        let (s, c) = (angle * T::lit(0.5)).sin_cos();
        Self::new(c, s, T::zero(), T::zero())
    }

    pub fn rotation_y(angle: T) -> Self {
        let (s, c) = (angle * T::lit(0.5)).sin_cos();
        Self::new(c, T::zero(), s, T::zero())
    }

    pub fn rotation_z(angle: T) -> Self {
        let (s, c) = (angle * T::lit(0.5)).sin_cos();
        Self::new(c, T::zero(), T::zero(), s)
    }

    /// Rotation by `angle` radians about `axis`. The axis need not be unit length.
    pub fn from_axis_angle(axis: Vector3<T>, angle: T) -> Self {
        let (s, c) = (angle * T::lit(0.5)).sin_cos();
        Self::from_parts(c, axis.normalize() * s)
    }

    /// Quaternion of a 3×3 rotation matrix.
    ///
    /// Uses the trace when it is positive and otherwise the largest
    /// diagonal entry, so the square root argument stays away from zero.
    pub fn from_rotation_matrix(m: &Matrix3<T>) -> Self {
        Self::from_rotation_entries(|r, c| m[(r, c)])
    }

    /// Quaternion of the upper-left 3×3 block of a homogeneous transform.
    pub fn from_rotation_matrix4(m: &Matrix4<T>) -> Self {
        Self::from_rotation_entries(|r, c| m[(r, c)])
    }

    fn from_rotation_entries(m: impl Fn(usize, usize) -> T) -> Self {
        let one = T::one();
        let two = T::lit(2.0);
        let quarter = T::lit(0.25);
        let trace = m(0, 0) + m(1, 1) + m(2, 2);

        if trace > T::zero() {
            let s = T::lit(0.5) / (trace + one).sqrt();
            Self::new(
                quarter / s,
                (m(2, 1) - m(1, 2)) * s,
                (m(0, 2) - m(2, 0)) * s,
                (m(1, 0) - m(0, 1)) * s,
            )
        } else if m(0, 0) > m(1, 1) && m(0, 0) > m(2, 2) {
            let s = two * (one + m(0, 0) - m(1, 1) - m(2, 2)).sqrt();
            Self::new(
                (m(2, 1) - m(1, 2)) / s,
                quarter * s,
                (m(0, 1) + m(1, 0)) / s,
                (m(0, 2) + m(2, 0)) / s,
            )
        } else if m(1, 1) > m(2, 2) {
            let s = two * (one + m(1, 1) - m(0, 0) - m(2, 2)).sqrt();
            Self::new(
                (m(0, 2) - m(2, 0)) / s,
                (m(0, 1) + m(1, 0)) / s,
                quarter * s,
                (m(1, 2) + m(2, 1)) / s,
            )
        } else {
            let s = two * (one + m(2, 2) - m(0, 0) - m(1, 1)).sqrt();
            Self::new(
                (m(1, 0) - m(0, 1)) / s,
                (m(0, 2) + m(2, 0)) / s,
                (m(1, 2) + m(2, 1)) / s,
                quarter * s,
            )
        }
    }
}

// ── Accessors ────────────────────────────────────────────────────────

impl<T: FloatScalar> Quaternion<T> {
    #[inline]
    pub fn w(&self) -> T {
        self.data[0]
    }

    #[inline]
    pub fn x(&self) -> T {
        self.data[1]
    }

    #[inline]
    pub fn y(&self) -> T {
        self.data[2]
    }

    #[inline]
    pub fn z(&self) -> T {
        self.data[3]
    }

    /// Vector part `(x, y, z)`.
    #[inline]
    pub fn vector(&self) -> Vector3<T> {
        Vector3::new(self.x(), self.y(), self.z())
    }

    /// `[w, x, y, z]`.
    #[inline]
    pub fn to_array(&self) -> [T; 4] {
        self.data
    }
}

// ── Core operations ──────────────────────────────────────────────────

impl<T: FloatScalar> Quaternion<T> {
    /// Conjugate: `(w, -x, -y, -z)`.
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self::new(self.w(), -self.x(), -self.y(), -self.z())
    }

    #[inline]
    pub fn square_norm(&self) -> T {
        simd::length_square_vec4(&self.data)
    }

    #[inline]
    pub fn norm(&self) -> T {
        simd::length_vec4(&self.data)
    }

    #[inline]
    pub fn dot(&self, rhs: &Self) -> T {
        simd::dot_vec4(&self.data, &rhs.data)
    }

    #[inline]
    pub fn normalize(&self) -> Self {
        let mut out = *self;
        out.normalize_in_place();
        out
    }

    #[inline]
    pub fn normalize_in_place(&mut self) {
        simd::normalize_in_place_vec4(&mut self.data);
    }

    /// Inverse: `conjugate / norm²`. Equals the conjugate for unit quaternions.
    #[inline]
    pub fn inverse(&self) -> Self {
        self.conjugate() * (T::one() / self.square_norm())
    }

    /// Rotate `v` by `q v q⁻¹`. Non-unit quaternions rotate without scaling.
    pub fn rotate(&self, v: &Vector3<T>) -> Vector3<T> {
        let p = Self::from_parts(T::zero(), *v);
        (*self * p * self.inverse()).vector()
    }

    /// 3×3 rotation matrix of the normalized quaternion.
    #[inline]
    pub fn to_rotation_matrix(&self) -> Matrix3<T> {
        Matrix3::from_quaternion(self)
    }
}

// ── Operators ────────────────────────────────────────────────────────

impl<T: FloatScalar> Add for Quaternion<T> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        let mut out = self;
        simd::add_vec4(&mut out.data, &self.data, &rhs.data);
        out
    }
}

impl<T: FloatScalar> Sub for Quaternion<T> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        let mut out = self;
        simd::sub_vec4(&mut out.data, &self.data, &rhs.data);
        out
    }
}

impl<T: FloatScalar> Mul<T> for Quaternion<T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: T) -> Self {
        let mut out = self;
        simd::scale_vec4(&mut out.data, rhs, &self.data);
        out
    }
}

// Hamilton product: q1 * q2
impl<T: FloatScalar> Mul for Quaternion<T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let [w1, x1, y1, z1] = self.data;
        let [w2, x2, y2, z2] = rhs.data;
        Self::new(
            w1 * w2 - x1 * x2 - y1 * y2 - z1 * z2,
            w1 * x2 + x1 * w2 + y1 * z2 - z1 * y2,
            w1 * y2 - x1 * z2 + y1 * w2 + z1 * x2,
            w1 * z2 + x1 * y2 - y1 * x2 + z1 * w2,
        )
    }
}

impl<T: FloatScalar> Mul<&Quaternion<T>> for &Quaternion<T> {
    type Output = Quaternion<T>;

    #[inline]
    fn mul(self, rhs: &Quaternion<T>) -> Quaternion<T> {
        *self * *rhs
    }
}

impl<T: FloatScalar> Mul<Vector3<T>> for Quaternion<T> {
    type Output = Vector3<T>;

    #[inline]
    fn mul(self, v: Vector3<T>) -> Vector3<T> {
        self.rotate(&v)
    }
}

impl<T: FloatScalar> Mul<&Vector3<T>> for &Quaternion<T> {
    type Output = Vector3<T>;

    #[inline]
    fn mul(self, v: &Vector3<T>) -> Vector3<T> {
        self.rotate(v)
    }
}

impl<T: FloatScalar> Neg for Quaternion<T> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        self * -T::one()
    }
}

/// Approximate: every component within [`EPS`](crate::EPS).
impl<T: FloatScalar> PartialEq for Quaternion<T> {
    #[inline]
    fn eq(&self, rhs: &Self) -> bool {
        scalar::compare_eq_vec4(&self.data, &rhs.data)
    }
}

// ── Display ──────────────────────────────────────────────────────────

impl<T: fmt::Display> fmt::Display for Quaternion<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [w, x, y, z] = &self.data;
        write!(f, "({} + {}i + {}j + {}k)", w, x, y, z)
    }
}

impl<T: fmt::Debug> fmt::Debug for Quaternion<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [w, x, y, z] = &self.data;
        f.debug_struct("Quaternion")
            .field("w", w)
            .field("x", x)
            .field("y", y)
            .field("z", z)
            .finish()
    }
}
