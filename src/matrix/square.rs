use super::{Matrix2, Matrix3, Matrix4};
use crate::error::MathError;
use crate::simd::scalar;
use crate::traits::{FloatScalar, SquareMatrix};
use crate::vector::{Vector2, Vector3, Vector4};

macro_rules! square_ops {
    ($M:ident, $Vec:ident; $transpose:ident, $trace:ident, $det:ident, $inverse:ident) => {
        impl<T: FloatScalar> $M<T> {
            #[inline]
            pub fn transpose(&self) -> Self {
                let mut out = *self;
                out.transpose_in_place();
                out
            }

            #[inline]
            pub fn transpose_in_place(&mut self) {
                scalar::$transpose(&mut self.data);
            }

            /// Sum of diagonal elements.
            #[inline]
            pub fn trace(&self) -> T {
                scalar::$trace(&self.data)
            }

            /// Closed-form cofactor determinant.
            #[inline]
            pub fn determinant(&self) -> T {
                scalar::$det(&self.data)
            }

            /// Closed-form adjugate inverse, no pivoting.
            ///
            /// A singular matrix yields non-finite entries; see
            /// [`try_inverse`](Self::try_inverse) for a checked variant.
            #[inline]
            pub fn inverse(&self) -> Self {
                let mut out = Self::zeros();
                scalar::$inverse(&mut out.data, &self.data);
                out
            }

            /// Inverse, or [`MathError::Singular`] when `|det| < EPS`.
            pub fn try_inverse(&self) -> Result<Self, MathError> {
                if self.determinant().abs() < T::eps() {
                    return Err(MathError::Singular);
                }
                Ok(self.inverse())
            }
        }

        impl<T: FloatScalar> SquareMatrix<T> for $M<T> {
            type Column = $Vec<T>;

            #[inline]
            fn transpose(&self) -> Self {
                $M::transpose(self)
            }

            #[inline]
            fn transpose_in_place(&mut self) {
                $M::transpose_in_place(self)
            }

            #[inline]
            fn trace(&self) -> T {
                $M::trace(self)
            }

            #[inline]
            fn determinant(&self) -> T {
                $M::determinant(self)
            }

            #[inline]
            fn inverse(&self) -> Self {
                $M::inverse(self)
            }
        }
    };
}

square_ops!(Matrix2, Vector2; transpose_in_place_mat2, trace_mat2, determinant_mat2, inverse_mat2);
square_ops!(Matrix3, Vector3; transpose_in_place_mat3, trace_mat3, determinant_mat3, inverse_mat3);
square_ops!(Matrix4, Vector4; transpose_in_place_mat4, trace_mat4, determinant_mat4, inverse_mat4);
