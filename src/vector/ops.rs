use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use super::{Vector2, Vector3, Vector4};
use crate::simd::{self, scalar};
use crate::traits::{Elementwise, FloatScalar, InnerSpace};

// ── Arithmetic through the dispatch layer ───────────────────────────

macro_rules! vector_ops {
    ($V:ident;
     $add:ident, $sub:ident, $scale:ident, $hadamard:ident, $dot:ident,
     $length_square:ident, $length:ident, $normalize:ident, $lerp:ident, $eq:ident) => {
        impl<T: FloatScalar> $V<T> {
            #[inline]
            pub fn dot(&self, rhs: &Self) -> T {
                simd::$dot(&self.data, &rhs.data)
            }

            /// Squared Euclidean length.
            #[inline]
            pub fn square_norm(&self) -> T {
                simd::$length_square(&self.data)
            }

            /// Euclidean length.
            #[inline]
            pub fn norm(&self) -> T {
                simd::$length(&self.data)
            }

            /// Unit vector in the same direction. A zero vector yields NaN lanes.
            #[inline]
            pub fn normalize(&self) -> Self {
                let mut out = *self;
                out.normalize_in_place();
                out
            }

            #[inline]
            pub fn normalize_in_place(&mut self) {
                simd::$normalize(&mut self.data);
            }

            /// Element-wise product.
            #[inline]
            pub fn hadamard(&self, rhs: &Self) -> Self {
                let mut out = Self::zeros();
                simd::$hadamard(&mut out.data, &self.data, &rhs.data);
                out
            }

            /// `(1 - alpha) * self + alpha * rhs`. `alpha` outside `[0, 1]` extrapolates.
            #[inline]
            pub fn lerp(&self, rhs: &Self, alpha: T) -> Self {
                let mut out = Self::zeros();
                scalar::$lerp(&mut out.data, &self.data, &rhs.data, alpha);
                out
            }
        }

        impl<T: FloatScalar> Elementwise<T> for $V<T> {
            #[inline]
            fn add(&self, rhs: &Self) -> Self {
                let mut out = Self::zeros();
                simd::$add(&mut out.data, &self.data, &rhs.data);
                out
            }

            #[inline]
            fn sub(&self, rhs: &Self) -> Self {
                let mut out = Self::zeros();
                simd::$sub(&mut out.data, &self.data, &rhs.data);
                out
            }

            #[inline]
            fn scale(&self, scale: T) -> Self {
                let mut out = Self::zeros();
                simd::$scale(&mut out.data, scale, &self.data);
                out
            }

            #[inline]
            fn hadamard(&self, rhs: &Self) -> Self {
                $V::hadamard(self, rhs)
            }
        }

        impl<T: FloatScalar> InnerSpace<T> for $V<T> {
            #[inline]
            fn dot(&self, rhs: &Self) -> T {
                $V::dot(self, rhs)
            }

            #[inline]
            fn square_norm(&self) -> T {
                $V::square_norm(self)
            }

            #[inline]
            fn norm(&self) -> T {
                $V::norm(self)
            }

            #[inline]
            fn normalize_in_place(&mut self) {
                $V::normalize_in_place(self)
            }

            #[inline]
            fn lerp(&self, rhs: &Self, alpha: T) -> Self {
                $V::lerp(self, rhs, alpha)
            }
        }

        /// Approximate: every logical lane within [`EPS`](crate::EPS).
        impl<T: FloatScalar> PartialEq for $V<T> {
            #[inline]
            fn eq(&self, rhs: &Self) -> bool {
                scalar::$eq(&self.data, &rhs.data)
            }
        }

        // ── Operators ───────────────────────────────────────────────

        impl<T: FloatScalar> Add for $V<T> {
            type Output = Self;

            #[inline]
            fn add(self, rhs: Self) -> Self {
                Elementwise::add(&self, &rhs)
            }
        }

        impl<T: FloatScalar> Sub for $V<T> {
            type Output = Self;

            #[inline]
            fn sub(self, rhs: Self) -> Self {
                Elementwise::sub(&self, &rhs)
            }
        }

        /// Hadamard product.
        impl<T: FloatScalar> Mul for $V<T> {
            type Output = Self;

            #[inline]
            fn mul(self, rhs: Self) -> Self {
                $V::hadamard(&self, &rhs)
            }
        }

        impl<T: FloatScalar> Mul<T> for $V<T> {
            type Output = Self;

            #[inline]
            fn mul(self, rhs: T) -> Self {
                Elementwise::scale(&self, rhs)
            }
        }

        impl<T: FloatScalar> Mul<T> for &$V<T> {
            type Output = $V<T>;

            #[inline]
            fn mul(self, rhs: T) -> $V<T> {
                Elementwise::scale(self, rhs)
            }
        }

        impl<T: FloatScalar> Neg for $V<T> {
            type Output = Self;

            #[inline]
            fn neg(self) -> Self {
                Elementwise::scale(&self, -T::one())
            }
        }

        impl<T: FloatScalar> Neg for &$V<T> {
            type Output = $V<T>;

            #[inline]
            fn neg(self) -> $V<T> {
                Elementwise::scale(self, -T::one())
            }
        }

        impl<T: FloatScalar> AddAssign for $V<T> {
            #[inline]
            fn add_assign(&mut self, rhs: Self) {
                let lhs = *self;
                simd::$add(&mut self.data, &lhs.data, &rhs.data);
            }
        }

        impl<T: FloatScalar> SubAssign for $V<T> {
            #[inline]
            fn sub_assign(&mut self, rhs: Self) {
                let lhs = *self;
                simd::$sub(&mut self.data, &lhs.data, &rhs.data);
            }
        }

        impl<T: FloatScalar> MulAssign<T> for $V<T> {
            #[inline]
            fn mul_assign(&mut self, rhs: T) {
                let lhs = *self;
                simd::$scale(&mut self.data, rhs, &lhs.data);
            }
        }

        impl<T: FloatScalar> AddAssign<&$V<T>> for $V<T> {
            #[inline]
            fn add_assign(&mut self, rhs: &$V<T>) {
                self.add_assign(*rhs);
            }
        }

        impl<T: FloatScalar> SubAssign<&$V<T>> for $V<T> {
            #[inline]
            fn sub_assign(&mut self, rhs: &$V<T>) {
                self.sub_assign(*rhs);
            }
        }

        forward_ref_binop!($V, Add, add);
        forward_ref_binop!($V, Sub, sub);
        forward_ref_binop!($V, Mul, mul);
        impl_scalar_mul!($V; f32, f64);
    };
}

// Vectors are Copy, so &Vector ops just deref and delegate.
macro_rules! forward_ref_binop {
    ($V:ident, $Op:ident, $method:ident) => {
        impl<T: FloatScalar> $Op<$V<T>> for &$V<T> {
            type Output = $V<T>;

            #[inline]
            fn $method(self, rhs: $V<T>) -> $V<T> {
                (*self).$method(rhs)
            }
        }

        impl<T: FloatScalar> $Op<&$V<T>> for $V<T> {
            type Output = $V<T>;

            #[inline]
            fn $method(self, rhs: &$V<T>) -> $V<T> {
                self.$method(*rhs)
            }
        }

        impl<T: FloatScalar> $Op<&$V<T>> for &$V<T> {
            type Output = $V<T>;

            #[inline]
            fn $method(self, rhs: &$V<T>) -> $V<T> {
                (*self).$method(*rhs)
            }
        }
    };
}

// scalar * vector (concrete impls to avoid orphan rules)
macro_rules! impl_scalar_mul {
    ($V:ident; $($t:ty),*) => {$(
        impl Mul<$V<$t>> for $t {
            type Output = $V<$t>;

            #[inline]
            fn mul(self, rhs: $V<$t>) -> $V<$t> {
                rhs * self
            }
        }

        impl Mul<&$V<$t>> for $t {
            type Output = $V<$t>;

            #[inline]
            fn mul(self, rhs: &$V<$t>) -> $V<$t> {
                *rhs * self
            }
        }
    )*};
}

vector_ops!(Vector2;
    add_vec2, sub_vec2, scale_vec2, hadamard_vec2, dot_vec2,
    length_square_vec2, length_vec2, normalize_in_place_vec2, lerp_vec2, compare_eq_vec2);
vector_ops!(Vector3;
    add_vec3, sub_vec3, scale_vec3, hadamard_vec3, dot_vec3,
    length_square_vec3, length_vec3, normalize_in_place_vec3, lerp_vec3, compare_eq_vec3);
vector_ops!(Vector4;
    add_vec4, sub_vec4, scale_vec4, hadamard_vec4, dot_vec4,
    length_square_vec4, length_vec4, normalize_in_place_vec4, lerp_vec4, compare_eq_vec4);

impl<T: FloatScalar> Vector3<T> {
    /// Right-handed cross product.
    ///
    /// ```
    /// use smallmat::Vector3;
    ///
    /// let j = Vector3::new(0.0_f32, 1.0, 0.0);
    /// let k = Vector3::new(0.0, 0.0, 1.0);
    /// assert_eq!(j.cross(&k), Vector3::new(1.0, 0.0, 0.0));
    /// ```
    #[inline]
    pub fn cross(&self, rhs: &Self) -> Self {
        let mut out = Self::zeros();
        simd::cross_vec3(&mut out.data, &self.data, &rhs.data);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operators() {
        let a = Vector3::new(1.0_f64, 2.0, 3.0);
        let b = Vector3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vector3::new(5.0, 7.0, 9.0));
        assert_eq!(&a - &b, Vector3::new(-3.0, -3.0, -3.0));
        assert_eq!(a * b, Vector3::new(4.0, 10.0, 18.0));
        assert_eq!(2.0 * a, a * 2.0);
        assert_eq!(-a, Vector3::new(-1.0, -2.0, -3.0));

        let mut c = a;
        c += b;
        c -= &a;
        c *= 0.5;
        assert_eq!(c, Vector3::new(2.0, 2.5, 3.0));
        assert_eq!(c.elements()[3], 0.0);
    }

    #[test]
    fn equality_is_approximate() {
        let a = Vector2::new(1.0_f32, 2.0);
        assert_eq!(a, Vector2::new(1.0 + 5e-7, 2.0));
        assert_ne!(a, Vector2::new(1.0 + 1e-5, 2.0));
    }

    #[test]
    fn norms() {
        let v = Vector4::new(1.0_f64, 1.0, 1.0, 1.0);
        assert_eq!(v.square_norm(), 4.0);
        assert_eq!(v.norm(), 2.0);
        let n = v.normalize();
        assert!((n.norm() - 1.0).abs() < 1e-12, "norm {}", n.norm());
        assert_eq!(n, Vector4::new(0.5, 0.5, 0.5, 0.5));
    }

    #[test]
    fn normalize_zero_is_nan() {
        let z = Vector2::<f64>::zeros().normalize();
        assert!(z.x().is_nan() && z.y().is_nan());
    }

    #[test]
    fn lerp_extrapolates() {
        let a = Vector3::new(0.0_f64, 0.0, 0.0);
        let b = Vector3::new(2.0, 4.0, 6.0);
        assert_eq!(a.lerp(&b, 0.5), Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(a.lerp(&b, -0.5), Vector3::new(-1.0, -2.0, -3.0));
        assert_eq!(a.lerp(&b, 1.5), Vector3::new(3.0, 6.0, 9.0));
    }

    #[test]
    fn cross_anticommutes() {
        let u = Vector3::new(1.0_f32, -2.0, 0.5);
        let v = Vector3::new(3.0, 0.25, -1.0);
        assert_eq!(u.cross(&v), -v.cross(&u));
        assert!(u.dot(&u.cross(&v)).abs() < 1e-5);
    }
}
