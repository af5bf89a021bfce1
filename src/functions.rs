//! Free-function forms of the vector and matrix operations.
//!
//! Each function is generic over the operation traits, so the same call
//! works for every size:
//!
//! ```
//! use smallmat::{dot, normalize, transpose, Matrix2, Vector2, Vector4};
//!
//! assert_eq!(dot(&Vector2::new(1.0_f32, 2.0), &Vector2::new(3.0, 4.0)), 11.0);
//! assert_eq!(normalize(&Vector4::new(0.0_f64, 0.0, 3.0, 4.0)), Vector4::new(0.0, 0.0, 0.6, 0.8));
//! let m = Matrix2::new([[1.0_f64, 2.0], [3.0, 4.0]]);
//! assert_eq!(transpose(&m)[(0, 1)], 3.0);
//! ```

use crate::traits::{Elementwise, FloatScalar, InnerSpace, SquareMatrix};
use crate::vector::Vector3;

#[inline]
pub fn add<T, E: Elementwise<T>>(lhs: &E, rhs: &E) -> E {
    lhs.add(rhs)
}

#[inline]
pub fn sub<T, E: Elementwise<T>>(lhs: &E, rhs: &E) -> E {
    lhs.sub(rhs)
}

/// `scale * x`.
#[inline]
pub fn scale<T, E: Elementwise<T>>(scale: T, x: &E) -> E {
    x.scale(scale)
}

/// Element-wise product.
#[inline]
pub fn hadamard<T, E: Elementwise<T>>(lhs: &E, rhs: &E) -> E {
    lhs.hadamard(rhs)
}

#[inline]
pub fn dot<T, V: InnerSpace<T>>(lhs: &V, rhs: &V) -> T {
    lhs.dot(rhs)
}

/// Right-handed cross product.
#[inline]
pub fn cross<T: FloatScalar>(lhs: &Vector3<T>, rhs: &Vector3<T>) -> Vector3<T> {
    lhs.cross(rhs)
}

#[inline]
pub fn norm<T, V: InnerSpace<T>>(v: &V) -> T {
    v.norm()
}

#[inline]
pub fn square_norm<T, V: InnerSpace<T>>(v: &V) -> T {
    v.square_norm()
}

/// Unit vector in the direction of `v`. A zero vector yields NaN lanes.
#[inline]
pub fn normalize<T, V: InnerSpace<T>>(v: &V) -> V {
    v.normalize()
}

#[inline]
pub fn normalize_in_place<T, V: InnerSpace<T>>(v: &mut V) {
    v.normalize_in_place()
}

/// `(1 - alpha) * a + alpha * b`.
#[inline]
pub fn lerp<T, V: InnerSpace<T>>(a: &V, b: &V, alpha: T) -> V {
    a.lerp(b, alpha)
}

#[inline]
pub fn transpose<T, M: SquareMatrix<T>>(m: &M) -> M {
    m.transpose()
}

#[inline]
pub fn transpose_in_place<T, M: SquareMatrix<T>>(m: &mut M) {
    m.transpose_in_place()
}

#[inline]
pub fn trace<T, M: SquareMatrix<T>>(m: &M) -> T {
    m.trace()
}

#[inline]
pub fn determinant<T, M: SquareMatrix<T>>(m: &M) -> T {
    m.determinant()
}

/// Closed-form inverse. A singular matrix yields non-finite entries.
#[inline]
pub fn inverse<T, M: SquareMatrix<T>>(m: &M) -> M {
    m.inverse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{Matrix3, Matrix4};
    use crate::vector::{Vector2, Vector4};

    #[test]
    fn elementwise_functions_match_operators() {
        let a = Vector4::new(1.0_f64, 2.0, 3.0, 4.0);
        let b = Vector4::new(-1.0, 0.5, 2.0, 0.0);
        assert_eq!(add(&a, &b), a + b);
        assert_eq!(sub(&a, &b), a - b);
        assert_eq!(scale(2.0, &a), a * 2.0);
        assert_eq!(hadamard(&a, &b), a * b);

        let m = Matrix3::new([[1.0_f32, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 10.0]]);
        assert_eq!(add(&m, &m), m * 2.0);
        assert_eq!(scale(-1.0, &m), -m);
    }

    #[test]
    fn vector_functions() {
        let v = Vector2::new(3.0_f32, 4.0);
        assert_eq!(norm(&v), 5.0);
        assert_eq!(square_norm(&v), 25.0);
        let mut u = v;
        normalize_in_place(&mut u);
        assert_eq!(u, normalize(&v));
        assert_eq!(lerp(&v, &Vector2::zeros(), 1.0), Vector2::zeros());

        let i = Vector3::new(1.0_f64, 0.0, 0.0);
        let j = Vector3::new(0.0, 1.0, 0.0);
        assert_eq!(cross(&i, &j), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(dot(&i, &j), 0.0);
    }

    #[test]
    fn matrix_functions() {
        let m = Matrix4::new([
            [4.0_f64, 7.0, 2.0, 3.0],
            [0.0, 5.0, 0.0, 1.0],
            [1.0, 0.0, 6.0, 2.0],
            [3.0, 1.0, 1.0, 8.0],
        ]);
        assert_eq!(transpose(&transpose(&m)), m);
        assert_eq!(trace(&m), 23.0);
        assert_eq!(inverse(&m) * m, Matrix4::identity());
        assert!((determinant(&m) - m.determinant()).abs() < 1e-12);

        let mut t = m;
        transpose_in_place(&mut t);
        assert_eq!(t, m.transpose());
    }
}
