use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use super::{Matrix2, Matrix3, Matrix4};
use crate::simd::{self, scalar};
use crate::traits::{Elementwise, FloatScalar};
use crate::vector::{Vector2, Vector3, Vector4};

macro_rules! matrix_ops {
    ($M:ident, $Vec:ident;
     $add:ident, $sub:ident, $scale:ident, $hadamard:ident,
     $matmul:ident, $matmul_vec:ident, $eq:ident) => {
        impl<T: FloatScalar> $M<T> {
            /// Element-wise product.
            #[inline]
            pub fn hadamard(&self, rhs: &Self) -> Self {
                let mut out = Self::zeros();
                simd::$hadamard(&mut out.data, &self.data, &rhs.data);
                out
            }
        }

        impl<T: FloatScalar> Elementwise<T> for $M<T> {
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
                $M::hadamard(self, rhs)
            }
        }

        /// Approximate: every entry within [`EPS`](crate::EPS).
        impl<T: FloatScalar> PartialEq for $M<T> {
            #[inline]
            fn eq(&self, rhs: &Self) -> bool {
                scalar::$eq(&self.data, &rhs.data)
            }
        }

        // ── Element-wise operators ──────────────────────────────────

        impl<T: FloatScalar> Add for $M<T> {
            type Output = Self;

            #[inline]
            fn add(self, rhs: Self) -> Self {
                Elementwise::add(&self, &rhs)
            }
        }

        impl<T: FloatScalar> Sub for $M<T> {
            type Output = Self;

            #[inline]
            fn sub(self, rhs: Self) -> Self {
                Elementwise::sub(&self, &rhs)
            }
        }

        impl<T: FloatScalar> Neg for $M<T> {
            type Output = Self;

            #[inline]
            fn neg(self) -> Self {
                Elementwise::scale(&self, -T::one())
            }
        }

        impl<T: FloatScalar> Neg for &$M<T> {
            type Output = $M<T>;

            #[inline]
            fn neg(self) -> $M<T> {
                Elementwise::scale(self, -T::one())
            }
        }

        impl<T: FloatScalar> AddAssign for $M<T> {
            #[inline]
            fn add_assign(&mut self, rhs: Self) {
                let lhs = *self;
                simd::$add(&mut self.data, &lhs.data, &rhs.data);
            }
        }

        impl<T: FloatScalar> SubAssign for $M<T> {
            #[inline]
            fn sub_assign(&mut self, rhs: Self) {
                let lhs = *self;
                simd::$sub(&mut self.data, &lhs.data, &rhs.data);
            }
        }

        impl<T: FloatScalar> AddAssign<&$M<T>> for $M<T> {
            #[inline]
            fn add_assign(&mut self, rhs: &$M<T>) {
                self.add_assign(*rhs);
            }
        }

        impl<T: FloatScalar> SubAssign<&$M<T>> for $M<T> {
            #[inline]
            fn sub_assign(&mut self, rhs: &$M<T>) {
                self.sub_assign(*rhs);
            }
        }

        // ── Scalar multiplication ───────────────────────────────────

        impl<T: FloatScalar> Mul<T> for $M<T> {
            type Output = Self;

            #[inline]
            fn mul(self, rhs: T) -> Self {
                Elementwise::scale(&self, rhs)
            }
        }

        impl<T: FloatScalar> Mul<T> for &$M<T> {
            type Output = $M<T>;

            #[inline]
            fn mul(self, rhs: T) -> $M<T> {
                Elementwise::scale(self, rhs)
            }
        }

        impl<T: FloatScalar> MulAssign<T> for $M<T> {
            #[inline]
            fn mul_assign(&mut self, rhs: T) {
                let lhs = *self;
                simd::$scale(&mut self.data, rhs, &lhs.data);
            }
        }

        // ── Matrix and matrix-vector products ───────────────────────

        impl<T: FloatScalar> Mul for $M<T> {
            type Output = Self;

            #[inline]
            fn mul(self, rhs: Self) -> Self {
                let mut out = Self::zeros();
                simd::$matmul(&mut out.data, &self.data, &rhs.data);
                out
            }
        }

        impl<T: FloatScalar> MulAssign for $M<T> {
            #[inline]
            fn mul_assign(&mut self, rhs: Self) {
                *self = *self * rhs;
            }
        }

        impl<T: FloatScalar> MulAssign<&$M<T>> for $M<T> {
            #[inline]
            fn mul_assign(&mut self, rhs: &$M<T>) {
                *self = *self * *rhs;
            }
        }

        impl<T: FloatScalar> Mul<$Vec<T>> for $M<T> {
            type Output = $Vec<T>;

            #[inline]
            fn mul(self, rhs: $Vec<T>) -> $Vec<T> {
                let mut out = $Vec::zeros();
                simd::$matmul_vec(&mut out.data, &self.data, &rhs.data);
                out
            }
        }

        impl<T: FloatScalar> Mul<&$Vec<T>> for &$M<T> {
            type Output = $Vec<T>;

            #[inline]
            fn mul(self, rhs: &$Vec<T>) -> $Vec<T> {
                *self * *rhs
            }
        }

        forward_ref_binop!($M, Add, add);
        forward_ref_binop!($M, Sub, sub);
        forward_ref_binop!($M, Mul, mul);
        impl_scalar_mul!($M; f32, f64);
    };
}

// Matrices are Copy, so &Matrix ops just deref and delegate.
macro_rules! forward_ref_binop {
    ($M:ident, $Op:ident, $method:ident) => {
        impl<T: FloatScalar> $Op<$M<T>> for &$M<T> {
            type Output = $M<T>;

            #[inline]
            fn $method(self, rhs: $M<T>) -> $M<T> {
                (*self).$method(rhs)
            }
        }

        impl<T: FloatScalar> $Op<&$M<T>> for $M<T> {
            type Output = $M<T>;

            #[inline]
            fn $method(self, rhs: &$M<T>) -> $M<T> {
                self.$method(*rhs)
            }
        }

        impl<T: FloatScalar> $Op<&$M<T>> for &$M<T> {
            type Output = $M<T>;

            #[inline]
            fn $method(self, rhs: &$M<T>) -> $M<T> {
                (*self).$method(*rhs)
            }
        }
    };
}

// scalar * matrix (concrete impls to avoid orphan rules)
macro_rules! impl_scalar_mul {
    ($M:ident; $($t:ty),*) => {$(
        impl Mul<$M<$t>> for $t {
            type Output = $M<$t>;

            #[inline]
            fn mul(self, rhs: $M<$t>) -> $M<$t> {
                rhs * self
            }
        }

        impl Mul<&$M<$t>> for $t {
            type Output = $M<$t>;

            #[inline]
            fn mul(self, rhs: &$M<$t>) -> $M<$t> {
                *rhs * self
            }
        }
    )*};
}

matrix_ops!(Matrix2, Vector2;
    add_mat2, sub_mat2, scale_mat2, hadamard_mat2, matmul_mat2, matmul_vec_mat2, compare_eq_mat2);
matrix_ops!(Matrix3, Vector3;
    add_mat3, sub_mat3, scale_mat3, hadamard_mat3, matmul_mat3, matmul_vec_mat3, compare_eq_mat3);
matrix_ops!(Matrix4, Vector4;
    add_mat4, sub_mat4, scale_mat4, hadamard_mat4, matmul_mat4, matmul_vec_mat4, compare_eq_mat4);
