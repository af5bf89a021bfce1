//! Reference scalar kernels.
//!
//! Every dispatched operation has a kernel here, and the SSE/AVX tiers must
//! agree with these within tolerance. They are also the only implementation
//! of the operations without a SIMD formulation (transpose, determinant,
//! inverse, comparison, lerp).
//!
//! Kernels only touch the logical lanes: lane 3 of a `Vector3` buffer (and of
//! each `Matrix3` column) is never read into a result nor written.

use super::{Mat2Buf, Mat3Buf, Mat4Buf, Vec2Buf, Vec3Buf, Vec4Buf};
use crate::traits::FloatScalar;

// ── Shared lane loops ───────────────────────────────────────────────

#[inline]
fn zip_lanes<T: FloatScalar>(dst: &mut [T], lhs: &[T], rhs: &[T], n: usize, f: impl Fn(T, T) -> T) {
    for i in 0..n {
        dst[i] = f(lhs[i], rhs[i]);
    }
}

#[inline]
fn dot_lanes<T: FloatScalar>(lhs: &[T], rhs: &[T], n: usize) -> T {
    let mut sum = T::zero();
    for i in 0..n {
        sum = sum + lhs[i] * rhs[i];
    }
    sum
}

#[inline]
fn normalize_lanes<T: FloatScalar>(v: &mut [T], n: usize) {
    let length = dot_lanes(v, v, n).sqrt();
    for x in v.iter_mut().take(n) {
        *x = *x / length;
    }
}

#[inline]
fn lerp_lanes<T: FloatScalar>(dst: &mut [T], a: &[T], b: &[T], alpha: T, n: usize) {
    let beta = T::one() - alpha;
    for i in 0..n {
        dst[i] = beta * a[i] + alpha * b[i];
    }
}

#[inline]
fn eq_lanes<T: FloatScalar>(lhs: &[T], rhs: &[T], n: usize) -> bool {
    let eps = T::eps();
    for i in 0..n {
        if (lhs[i] - rhs[i]).abs() >= eps {
            return false;
        }
    }
    true
}

// ── Vectors ─────────────────────────────────────────────────────────

macro_rules! vector_kernels {
    ($buf:ident, $n:literal, $add:ident, $sub:ident, $scale:ident, $hadamard:ident,
     $dot:ident, $length_square:ident, $length:ident, $normalize:ident, $lerp:ident, $eq:ident) => {
        #[inline]
        pub fn $add<T: FloatScalar>(dst: &mut $buf<T>, lhs: &$buf<T>, rhs: &$buf<T>) {
            zip_lanes(dst, lhs, rhs, $n, |a, b| a + b);
        }

        #[inline]
        pub fn $sub<T: FloatScalar>(dst: &mut $buf<T>, lhs: &$buf<T>, rhs: &$buf<T>) {
            zip_lanes(dst, lhs, rhs, $n, |a, b| a - b);
        }

        #[inline]
        pub fn $scale<T: FloatScalar>(dst: &mut $buf<T>, scale: T, src: &$buf<T>) {
            for i in 0..$n {
                dst[i] = scale * src[i];
            }
        }

        #[inline]
        pub fn $hadamard<T: FloatScalar>(dst: &mut $buf<T>, lhs: &$buf<T>, rhs: &$buf<T>) {
            zip_lanes(dst, lhs, rhs, $n, |a, b| a * b);
        }

        #[inline]
        pub fn $dot<T: FloatScalar>(lhs: &$buf<T>, rhs: &$buf<T>) -> T {
            dot_lanes(lhs, rhs, $n)
        }

        #[inline]
        pub fn $length_square<T: FloatScalar>(v: &$buf<T>) -> T {
            dot_lanes(v, v, $n)
        }

        #[inline]
        pub fn $length<T: FloatScalar>(v: &$buf<T>) -> T {
            dot_lanes(v, v, $n).sqrt()
        }

        #[inline]
        pub fn $normalize<T: FloatScalar>(v: &mut $buf<T>) {
            normalize_lanes(v, $n);
        }

        #[inline]
        pub fn $lerp<T: FloatScalar>(dst: &mut $buf<T>, a: &$buf<T>, b: &$buf<T>, alpha: T) {
            lerp_lanes(dst, a, b, alpha, $n);
        }

        #[inline]
        pub fn $eq<T: FloatScalar>(lhs: &$buf<T>, rhs: &$buf<T>) -> bool {
            eq_lanes(lhs, rhs, $n)
        }
    };
}

vector_kernels!(Vec2Buf, 2, add_vec2, sub_vec2, scale_vec2, hadamard_vec2, dot_vec2,
    length_square_vec2, length_vec2, normalize_in_place_vec2, lerp_vec2, compare_eq_vec2);
vector_kernels!(Vec3Buf, 3, add_vec3, sub_vec3, scale_vec3, hadamard_vec3, dot_vec3,
    length_square_vec3, length_vec3, normalize_in_place_vec3, lerp_vec3, compare_eq_vec3);
vector_kernels!(Vec4Buf, 4, add_vec4, sub_vec4, scale_vec4, hadamard_vec4, dot_vec4,
    length_square_vec4, length_vec4, normalize_in_place_vec4, lerp_vec4, compare_eq_vec4);

/// Right-handed cross product.
#[inline]
pub fn cross_vec3<T: FloatScalar>(dst: &mut Vec3Buf<T>, lhs: &Vec3Buf<T>, rhs: &Vec3Buf<T>) {
    let (a0, a1, a2) = (lhs[0], lhs[1], lhs[2]);
    let (b0, b1, b2) = (rhs[0], rhs[1], rhs[2]);
    dst[0] = a1 * b2 - a2 * b1;
    dst[1] = a2 * b0 - a0 * b2;
    dst[2] = a0 * b1 - a1 * b0;
}

// ── Matrices: element-wise and products ─────────────────────────────

macro_rules! matrix_kernels {
    ($mat:ident, $vec:ident, $n:literal, $add:ident, $sub:ident, $scale:ident,
     $hadamard:ident, $matmul:ident, $matmul_vec:ident, $eq:ident) => {
        #[inline]
        pub fn $add<T: FloatScalar>(dst: &mut $mat<T>, lhs: &$mat<T>, rhs: &$mat<T>) {
            for col in 0..$n {
                zip_lanes(&mut dst[col], &lhs[col], &rhs[col], $n, |a, b| a + b);
            }
        }

        #[inline]
        pub fn $sub<T: FloatScalar>(dst: &mut $mat<T>, lhs: &$mat<T>, rhs: &$mat<T>) {
            for col in 0..$n {
                zip_lanes(&mut dst[col], &lhs[col], &rhs[col], $n, |a, b| a - b);
            }
        }

        #[inline]
        pub fn $scale<T: FloatScalar>(dst: &mut $mat<T>, scale: T, src: &$mat<T>) {
            for col in 0..$n {
                for row in 0..$n {
                    dst[col][row] = scale * src[col][row];
                }
            }
        }

        #[inline]
        pub fn $hadamard<T: FloatScalar>(dst: &mut $mat<T>, lhs: &$mat<T>, rhs: &$mat<T>) {
            for col in 0..$n {
                zip_lanes(&mut dst[col], &lhs[col], &rhs[col], $n, |a, b| a * b);
            }
        }

        /// `dst[k][row] = Σⱼ lhs[j][row] · rhs[k][j]`.
        #[inline]
        pub fn $matmul<T: FloatScalar>(dst: &mut $mat<T>, lhs: &$mat<T>, rhs: &$mat<T>) {
            for k in 0..$n {
                for row in 0..$n {
                    let mut sum = T::zero();
                    for j in 0..$n {
                        sum = sum + lhs[j][row] * rhs[k][j];
                    }
                    dst[k][row] = sum;
                }
            }
        }

        /// `dst[row] = Σⱼ mat[j][row] · vec[j]`.
        #[inline]
        pub fn $matmul_vec<T: FloatScalar>(dst: &mut $vec<T>, mat: &$mat<T>, vec: &$vec<T>) {
            for row in 0..$n {
                let mut sum = T::zero();
                for j in 0..$n {
                    sum = sum + mat[j][row] * vec[j];
                }
                dst[row] = sum;
            }
        }

        #[inline]
        pub fn $eq<T: FloatScalar>(lhs: &$mat<T>, rhs: &$mat<T>) -> bool {
            (0..$n).all(|col| eq_lanes(&lhs[col], &rhs[col], $n))
        }
    };
}

matrix_kernels!(Mat2Buf, Vec2Buf, 2, add_mat2, sub_mat2, scale_mat2, hadamard_mat2,
    matmul_mat2, matmul_vec_mat2, compare_eq_mat2);
matrix_kernels!(Mat3Buf, Vec3Buf, 3, add_mat3, sub_mat3, scale_mat3, hadamard_mat3,
    matmul_mat3, matmul_vec_mat3, compare_eq_mat3);
matrix_kernels!(Mat4Buf, Vec4Buf, 4, add_mat4, sub_mat4, scale_mat4, hadamard_mat4,
    matmul_mat4, matmul_vec_mat4, compare_eq_mat4);

// ── Matrices: transpose and trace ───────────────────────────────────

macro_rules! square_kernels {
    ($mat:ident, $n:literal, $transpose_in_place:ident, $trace:ident) => {
        #[inline]
        pub fn $transpose_in_place<T: FloatScalar>(mat: &mut $mat<T>) {
            for col in 0..$n {
                for row in (col + 1)..$n {
                    let tmp = mat[col][row];
                    mat[col][row] = mat[row][col];
                    mat[row][col] = tmp;
                }
            }
        }

        #[inline]
        pub fn $trace<T: FloatScalar>(mat: &$mat<T>) -> T {
            let mut sum = T::zero();
            for i in 0..$n {
                sum = sum + mat[i][i];
            }
            sum
        }
    };
}

square_kernels!(Mat2Buf, 2, transpose_in_place_mat2, trace_mat2);
square_kernels!(Mat3Buf, 3, transpose_in_place_mat3, trace_mat3);
square_kernels!(Mat4Buf, 4, transpose_in_place_mat4, trace_mat4);

// ── Matrices: closed-form determinant and inverse ───────────────────
//
// Entries are named `m<row><col>`, read from column-major storage as
// `mat[col][row]`.

#[inline]
pub fn determinant_mat2<T: FloatScalar>(mat: &Mat2Buf<T>) -> T {
    let (m00, m10) = (mat[0][0], mat[0][1]);
    let (m01, m11) = (mat[1][0], mat[1][1]);
    m00 * m11 - m10 * m01
}

#[inline]
pub fn inverse_mat2<T: FloatScalar>(dst: &mut Mat2Buf<T>, src: &Mat2Buf<T>) {
    let (m00, m10) = (src[0][0], src[0][1]);
    let (m01, m11) = (src[1][0], src[1][1]);
    let det = m00 * m11 - m10 * m01;

    dst[0][0] = m11 / det;
    dst[0][1] = -m10 / det;
    dst[1][0] = -m01 / det;
    dst[1][1] = m00 / det;
}

#[inline]
pub fn determinant_mat3<T: FloatScalar>(mat: &Mat3Buf<T>) -> T {
    let (m00, m10, m20) = (mat[0][0], mat[0][1], mat[0][2]);
    let (m01, m11, m21) = (mat[1][0], mat[1][1], mat[1][2]);
    let (m02, m12, m22) = (mat[2][0], mat[2][1], mat[2][2]);

    let c00 = m11 * m22 - m21 * m12;
    let c10 = -(m01 * m22 - m21 * m02);
    let c20 = m01 * m12 - m11 * m02;

    m00 * c00 + m10 * c10 + m20 * c20
}

/// Adjugate divided by the determinant.
#[inline]
pub fn inverse_mat3<T: FloatScalar>(dst: &mut Mat3Buf<T>, src: &Mat3Buf<T>) {
    let (m00, m10, m20) = (src[0][0], src[0][1], src[0][2]);
    let (m01, m11, m21) = (src[1][0], src[1][1], src[1][2]);
    let (m02, m12, m22) = (src[2][0], src[2][1], src[2][2]);

    // c<row><col> is the cofactor of m<row><col>
    let c00 = m11 * m22 - m21 * m12;
    let c10 = -(m01 * m22 - m21 * m02);
    let c20 = m01 * m12 - m11 * m02;

    let c01 = -(m10 * m22 - m20 * m12);
    let c11 = m00 * m22 - m20 * m02;
    let c21 = -(m00 * m12 - m10 * m02);

    let c02 = m10 * m21 - m20 * m11;
    let c12 = -(m00 * m21 - m20 * m01);
    let c22 = m00 * m11 - m10 * m01;

    let det = m00 * c00 + m10 * c10 + m20 * c20;
    let inv_det = T::one() / det;

    // inverse(row, col) = c<col><row> / det
    dst[0][0] = c00 * inv_det;
    dst[0][1] = c01 * inv_det;
    dst[0][2] = c02 * inv_det;

    dst[1][0] = c10 * inv_det;
    dst[1][1] = c11 * inv_det;
    dst[1][2] = c12 * inv_det;

    dst[2][0] = c20 * inv_det;
    dst[2][1] = c21 * inv_det;
    dst[2][2] = c22 * inv_det;
}

/// 2×2 minors over columns 2 and 3, shared by the 4×4 determinant and
/// inverse. `mABCD` spans rows `A, B` and columns `C, D`.
struct Minors4<T> {
    m2323: T,
    m1323: T,
    m0323: T,
    m1223: T,
    m0223: T,
    m0123: T,
}

#[inline]
fn lower_minors<T: FloatScalar>(mat: &Mat4Buf<T>) -> Minors4<T> {
    let (m02, m12, m22, m32) = (mat[2][0], mat[2][1], mat[2][2], mat[2][3]);
    let (m03, m13, m23, m33) = (mat[3][0], mat[3][1], mat[3][2], mat[3][3]);
    Minors4 {
        m2323: m22 * m33 - m32 * m23,
        m1323: m12 * m33 - m32 * m13,
        m0323: m02 * m33 - m32 * m03,
        m1223: m12 * m23 - m22 * m13,
        m0223: m02 * m23 - m22 * m03,
        m0123: m02 * m13 - m12 * m03,
    }
}

#[inline]
pub fn determinant_mat4<T: FloatScalar>(mat: &Mat4Buf<T>) -> T {
    let (m00, m10, m20, m30) = (mat[0][0], mat[0][1], mat[0][2], mat[0][3]);
    let (m01, m11, m21, m31) = (mat[1][0], mat[1][1], mat[1][2], mat[1][3]);
    let Minors4 { m2323, m1323, m0323, m1223, m0223, m0123 } = lower_minors(mat);

    m00 * (m11 * m2323 - m21 * m1323 + m31 * m1223)
        - m10 * (m01 * m2323 - m21 * m0323 + m31 * m0223)
        + m20 * (m01 * m1323 - m11 * m0323 + m31 * m0123)
        - m30 * (m01 * m1223 - m11 * m0223 + m21 * m0123)
}

#[inline]
pub fn inverse_mat4<T: FloatScalar>(dst: &mut Mat4Buf<T>, src: &Mat4Buf<T>) {
    let (m00, m10, m20, m30) = (src[0][0], src[0][1], src[0][2], src[0][3]);
    let (m01, m11, m21, m31) = (src[1][0], src[1][1], src[1][2], src[1][3]);
    let (m02, m12, m22, m32) = (src[2][0], src[2][1], src[2][2], src[2][3]);
    let (m03, m13, m23, m33) = (src[3][0], src[3][1], src[3][2], src[3][3]);
    let Minors4 { m2323, m1323, m0323, m1223, m0223, m0123 } = lower_minors(src);

    let m1201 = m10 * m21 - m20 * m11;
    let m1301 = m10 * m31 - m30 * m11;
    let m2301 = m20 * m31 - m30 * m21;
    let m0201 = m00 * m21 - m20 * m01;
    let m0301 = m00 * m31 - m30 * m01;
    let m0101 = m00 * m11 - m10 * m01;

    let det = m00 * (m11 * m2323 - m21 * m1323 + m31 * m1223)
        - m10 * (m01 * m2323 - m21 * m0323 + m31 * m0223)
        + m20 * (m01 * m1323 - m11 * m0323 + m31 * m0123)
        - m30 * (m01 * m1223 - m11 * m0223 + m21 * m0123);
    let inv_det = T::one() / det;
    let neg_inv_det = -inv_det;

    dst[0][0] = (m11 * m2323 - m21 * m1323 + m31 * m1223) * inv_det;
    dst[0][1] = (m10 * m2323 - m20 * m1323 + m30 * m1223) * neg_inv_det;
    dst[0][2] = (m33 * m1201 - m23 * m1301 + m13 * m2301) * inv_det;
    dst[0][3] = (m32 * m1201 - m22 * m1301 + m12 * m2301) * neg_inv_det;

    dst[1][0] = (m01 * m2323 - m21 * m0323 + m31 * m0223) * neg_inv_det;
    dst[1][1] = (m00 * m2323 - m20 * m0323 + m30 * m0223) * inv_det;
    dst[1][2] = (m33 * m0201 - m23 * m0301 + m03 * m2301) * neg_inv_det;
    dst[1][3] = (m32 * m0201 - m22 * m0301 + m02 * m2301) * inv_det;

    dst[2][0] = (m01 * m1323 - m11 * m0323 + m31 * m0123) * inv_det;
    dst[2][1] = (m00 * m1323 - m10 * m0323 + m30 * m0123) * neg_inv_det;
    dst[2][2] = (m33 * m0101 - m13 * m0301 + m03 * m1301) * inv_det;
    dst[2][3] = (m32 * m0101 - m12 * m0301 + m02 * m1301) * neg_inv_det;

    dst[3][0] = (m01 * m1223 - m11 * m0223 + m21 * m0123) * neg_inv_det;
    dst[3][1] = (m00 * m1223 - m10 * m0223 + m20 * m0123) * inv_det;
    dst[3][2] = (m23 * m0101 - m13 * m0201 + m03 * m1201) * neg_inv_det;
    dst[3][3] = (m22 * m0101 - m12 * m0201 + m02 * m1201) * inv_det;
}
