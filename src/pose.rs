use core::fmt;
use core::ops::Mul;

use crate::matrix::{Matrix3, Matrix4};
use crate::quaternion::Quaternion;
use crate::traits::FloatScalar;
use crate::vector::Vector3;

/// Rigid transform in 3D: a rotation followed by a translation.
///
/// A point `p` maps to `position + orientation.rotate(p)`. Constructors
/// normalize the orientation, so it is a unit quaternion as long as the
/// fields are not assigned directly.
///
/// ```
/// use smallmat::{Pose3d, Quaternion, Vector3};
/// use std::f64::consts::FRAC_PI_2;
///
/// let pose = Pose3d::new(Vector3::new(-3.0, 0.0, 0.0), Quaternion::rotation_z(FRAC_PI_2));
/// assert_eq!(pose * Vector3::new(1.0, 1.0, 1.0), Vector3::new(-4.0, 1.0, 1.0));
/// assert_eq!(pose.inverse() * (pose * Vector3::new(2.0, 5.0, -1.0)), Vector3::new(2.0, 5.0, -1.0));
/// ```
#[derive(Clone, Copy)]
pub struct Pose3d<T> {
    pub position: Vector3<T>,
    pub orientation: Quaternion<T>,
}

impl<T: FloatScalar> Pose3d<T> {
    /// Pose from a translation and a rotation. `orientation` is normalized.
    #[inline]
    pub fn new(position: Vector3<T>, orientation: Quaternion<T>) -> Self {
        Self { position, orientation: orientation.normalize() }
    }

    #[inline]
    pub fn identity() -> Self {
        Self { position: Vector3::zeros(), orientation: Quaternion::identity() }
    }

    /// Pose from a translation and a 3×3 rotation matrix.
    pub fn from_matrix3(position: Vector3<T>, rotation: &Matrix3<T>) -> Self {
        Self::new(position, Quaternion::from_rotation_matrix(rotation))
    }

    /// Pose from a homogeneous transform: translation from column 3, rotation
    /// from the upper-left 3×3 block.
    pub fn from_matrix4(transform: &Matrix4<T>) -> Self {
        Self::new(Vector3::from(transform.col(3)), Quaternion::from_rotation_matrix4(transform))
    }

    /// Map a point from this pose's frame into the parent frame.
    #[inline]
    pub fn apply(&self, v: &Vector3<T>) -> Vector3<T> {
        self.position + self.orientation.rotate(v)
    }

    /// The transform that undoes this one: rotation `q⁻¹`, translation `-(q⁻¹ p)`.
    pub fn inverse(&self) -> Self {
        let orientation = self.orientation.inverse();
        Self { position: -orientation.rotate(&self.position), orientation }
    }

    /// Equivalent homogeneous transform.
    pub fn to_matrix(&self) -> Matrix4<T> {
        let mut m = Matrix4::from_quaternion(&self.orientation);
        m.set_position(self.position);
        m
    }
}

impl<T: FloatScalar> Default for Pose3d<T> {
    fn default() -> Self {
        Self::identity()
    }
}

// ── Operators ────────────────────────────────────────────────────────

// a * b applies b first, then a.
impl<T: FloatScalar> Mul for Pose3d<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(self.apply(&rhs.position), self.orientation * rhs.orientation)
    }
}

impl<T: FloatScalar> Mul<&Pose3d<T>> for &Pose3d<T> {
    type Output = Pose3d<T>;

    #[inline]
    fn mul(self, rhs: &Pose3d<T>) -> Pose3d<T> {
        *self * *rhs
    }
}

impl<T: FloatScalar> Mul<Vector3<T>> for Pose3d<T> {
    type Output = Vector3<T>;

    #[inline]
    fn mul(self, v: Vector3<T>) -> Vector3<T> {
        self.apply(&v)
    }
}

impl<T: FloatScalar> Mul<&Vector3<T>> for &Pose3d<T> {
    type Output = Vector3<T>;

    #[inline]
    fn mul(self, v: &Vector3<T>) -> Vector3<T> {
        self.apply(v)
    }
}

/// Approximate, component-wise on position and orientation. `q` and `-q`
/// compare unequal even though they are the same rotation.
impl<T: FloatScalar> PartialEq for Pose3d<T> {
    #[inline]
    fn eq(&self, rhs: &Self) -> bool {
        self.position == rhs.position && self.orientation == rhs.orientation
    }
}

impl<T: fmt::Display> fmt::Display for Pose3d<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pose3d(pos={}, rot={})", self.position, self.orientation)
    }
}

impl<T: fmt::Debug> fmt::Debug for Pose3d<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pose3d")
            .field("position", &self.position)
            .field("orientation", &self.orientation)
            .finish()
    }
}
