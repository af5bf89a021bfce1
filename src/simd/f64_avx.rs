//! AVX-accelerated f64 kernels for x86_64.
//!
//! AVX provides 256-bit registers → 4×f64 lanes: one register holds a
//! `Vector3`/`Vector4`, one `Matrix3`/`Matrix4` column, or a whole `Matrix2`.
//! Three-lane results go through `vmaskmovpd`; reductions blend the padding
//! lane to zero first.
//! Only compiled when `target_feature = "avx"` is enabled
//! (e.g. via `-C target-cpu=native` on Sandy Bridge+).

use core::arch::x86_64::*;

use super::{Mat2Buf, Mat3Buf, Mat4Buf, Vec3Buf, Vec4Buf};

pub use super::f64_sse2::{
    add_vec2, cross_vec3, dot_vec2, hadamard_vec2, length_square_vec2, length_vec2,
    matmul_vec_mat2, normalize_in_place_vec2, scale_vec2, sub_vec2,
};

// ── Loads, stores, reductions ───────────────────────────────────────

#[inline(always)]
unsafe fn store3(p: *mut f64, v: __m256d) {
    _mm256_maskstore_pd(p, _mm256_set_epi64x(0, -1, -1, -1), v);
}

/// Zero lane 3.
#[inline(always)]
unsafe fn drop_padding(v: __m256d) -> __m256d {
    _mm256_blend_pd(v, _mm256_setzero_pd(), 0b1000)
}

/// Horizontal sum into lane 0 of an xmm.
#[inline(always)]
unsafe fn hsum(v: __m256d) -> f64 {
    let pairs = _mm256_hadd_pd(v, v); // [a+b, a+b, c+d, c+d]
    let lo = _mm256_castpd256_pd128(pairs);
    let hi = _mm256_extractf128_pd(pairs, 1);
    _mm_cvtsd_f64(_mm_add_pd(lo, hi))
}

/// Horizontal sum broadcast to all four lanes.
#[inline(always)]
unsafe fn hsum_broadcast(v: __m256d) -> __m256d {
    let pairs = _mm256_hadd_pd(v, v);
    _mm256_add_pd(pairs, _mm256_permute2f128_pd(pairs, pairs, 0x01))
}

// ── Vector3 / Vector4: one ymm ──────────────────────────────────────

macro_rules! vec_kernels {
    ($buf:ident, $store:ident, $mask:ident;
     $add:ident, $sub:ident, $scale:ident, $hadamard:ident,
     $dot:ident, $length_square:ident, $length:ident, $normalize:ident) => {
        vec_kernels!(@binary $buf, $store; $add => _mm256_add_pd);
        vec_kernels!(@binary $buf, $store; $sub => _mm256_sub_pd);
        vec_kernels!(@binary $buf, $store; $hadamard => _mm256_mul_pd);

        #[inline]
        pub fn $scale(dst: &mut $buf<f64>, scale: f64, src: &$buf<f64>) {
            unsafe { $store(dst.as_mut_ptr(), _mm256_mul_pd(_mm256_set1_pd(scale), _mm256_loadu_pd(src.as_ptr()))) }
        }

        #[inline]
        pub fn $dot(lhs: &$buf<f64>, rhs: &$buf<f64>) -> f64 {
            unsafe { hsum($mask(_mm256_mul_pd(_mm256_loadu_pd(lhs.as_ptr()), _mm256_loadu_pd(rhs.as_ptr())))) }
        }

        #[inline]
        pub fn $length_square(v: &$buf<f64>) -> f64 {
            $dot(v, v)
        }

        #[inline]
        pub fn $length(v: &$buf<f64>) -> f64 {
            unsafe {
                let sq = _mm_set_sd($length_square(v));
                _mm_cvtsd_f64(_mm_sqrt_sd(sq, sq))
            }
        }

        #[inline]
        pub fn $normalize(v: &mut $buf<f64>) {
            unsafe {
                let x = _mm256_loadu_pd(v.as_ptr());
                let length = _mm256_sqrt_pd(hsum_broadcast($mask(_mm256_mul_pd(x, x))));
                $store(v.as_mut_ptr(), _mm256_div_pd(x, length));
            }
        }
    };
    (@binary $buf:ident, $store:ident; $name:ident => $op:ident) => {
        #[inline]
        pub fn $name(dst: &mut $buf<f64>, lhs: &$buf<f64>, rhs: &$buf<f64>) {
            unsafe { $store(dst.as_mut_ptr(), $op(_mm256_loadu_pd(lhs.as_ptr()), _mm256_loadu_pd(rhs.as_ptr()))) }
        }
    };
}

#[inline(always)]
unsafe fn all_lanes(v: __m256d) -> __m256d {
    v
}

vec_kernels!(Vec3Buf, store3, drop_padding;
    add_vec3, sub_vec3, scale_vec3, hadamard_vec3,
    dot_vec3, length_square_vec3, length_vec3, normalize_in_place_vec3);
vec_kernels!(Vec4Buf, _mm256_storeu_pd, all_lanes;
    add_vec4, sub_vec4, scale_vec4, hadamard_vec4,
    dot_vec4, length_square_vec4, length_vec4, normalize_in_place_vec4);

// ── Matrix2: whole matrix in one ymm ────────────────────────────────

#[inline(always)]
unsafe fn load_mat2(m: &Mat2Buf<f64>) -> __m256d {
    _mm256_loadu_pd(m.as_ptr() as *const f64)
}

#[inline(always)]
unsafe fn store_mat2(m: &mut Mat2Buf<f64>, v: __m256d) {
    _mm256_storeu_pd(m.as_mut_ptr() as *mut f64, v);
}

macro_rules! mat2_binary {
    ($($name:ident => $op:ident),* $(,)?) => {$(
        #[inline]
        pub fn $name(dst: &mut Mat2Buf<f64>, lhs: &Mat2Buf<f64>, rhs: &Mat2Buf<f64>) {
            unsafe { store_mat2(dst, $op(load_mat2(lhs), load_mat2(rhs))) }
        }
    )*};
}

mat2_binary!(add_mat2 => _mm256_add_pd, sub_mat2 => _mm256_sub_pd, hadamard_mat2 => _mm256_mul_pd);

#[inline]
pub fn scale_mat2(dst: &mut Mat2Buf<f64>, scale: f64, src: &Mat2Buf<f64>) {
    unsafe { store_mat2(dst, _mm256_mul_pd(_mm256_set1_pd(scale), load_mat2(src))) }
}

/// Same lane algebra as the f32 SSE kernel:
/// `[l00 l10 l00 l10] * [r00 r00 r01 r01] + [l01 l11 l01 l11] * [r10 r10 r11 r11]`.
#[inline]
pub fn matmul_mat2(dst: &mut Mat2Buf<f64>, lhs: &Mat2Buf<f64>, rhs: &Mat2Buf<f64>) {
    unsafe {
        let l = load_mat2(lhs);
        let r = load_mat2(rhs);
        let col0 = _mm256_permute2f128_pd(l, l, 0x00);
        let col1 = _mm256_permute2f128_pd(l, l, 0x11);
        let row0 = _mm256_shuffle_pd(r, r, 0x0);
        let row1 = _mm256_shuffle_pd(r, r, 0xF);
        store_mat2(dst, _mm256_add_pd(_mm256_mul_pd(col0, row0), _mm256_mul_pd(col1, row1)));
    }
}

// ── Matrix3 / Matrix4: one ymm per column ───────────────────────────

macro_rules! mat_kernels {
    ($mat:ident, $vec:ident, $cols:literal, $store:ident;
     $add:ident, $sub:ident, $scale:ident, $hadamard:ident, $matmul:ident, $matmul_vec:ident) => {
        mat_kernels!(@binary $mat, $cols, $store; $add => _mm256_add_pd);
        mat_kernels!(@binary $mat, $cols, $store; $sub => _mm256_sub_pd);
        mat_kernels!(@binary $mat, $cols, $store; $hadamard => _mm256_mul_pd);

        #[inline]
        pub fn $scale(dst: &mut $mat<f64>, scale: f64, src: &$mat<f64>) {
            unsafe {
                let s = _mm256_set1_pd(scale);
                for j in 0..$cols {
                    $store(dst[j].as_mut_ptr(), _mm256_mul_pd(s, _mm256_loadu_pd(src[j].as_ptr())));
                }
            }
        }

        /// Column `j` of the product is `sum_k rhs[j][k] * lhs_col_k`.
        #[inline]
        pub fn $matmul(dst: &mut $mat<f64>, lhs: &$mat<f64>, rhs: &$mat<f64>) {
            unsafe {
                let mut cols = [_mm256_setzero_pd(); $cols];
                for (k, col) in cols.iter_mut().enumerate() {
                    *col = _mm256_loadu_pd(lhs[k].as_ptr());
                }
                for j in 0..$cols {
                    let mut acc = _mm256_mul_pd(cols[0], _mm256_set1_pd(rhs[j][0]));
                    for k in 1..$cols {
                        acc = _mm256_add_pd(acc, _mm256_mul_pd(cols[k], _mm256_set1_pd(rhs[j][k])));
                    }
                    $store(dst[j].as_mut_ptr(), acc);
                }
            }
        }

        #[inline]
        pub fn $matmul_vec(dst: &mut $vec<f64>, mat: &$mat<f64>, vec: &$vec<f64>) {
            unsafe {
                let mut acc = _mm256_mul_pd(_mm256_loadu_pd(mat[0].as_ptr()), _mm256_set1_pd(vec[0]));
                for k in 1..$cols {
                    acc = _mm256_add_pd(acc, _mm256_mul_pd(_mm256_loadu_pd(mat[k].as_ptr()), _mm256_set1_pd(vec[k])));
                }
                $store(dst.as_mut_ptr(), acc);
            }
        }
    };
    (@binary $mat:ident, $cols:literal, $store:ident; $name:ident => $op:ident) => {
        #[inline]
        pub fn $name(dst: &mut $mat<f64>, lhs: &$mat<f64>, rhs: &$mat<f64>) {
            unsafe {
                for j in 0..$cols {
                    let r = $op(_mm256_loadu_pd(lhs[j].as_ptr()), _mm256_loadu_pd(rhs[j].as_ptr()));
                    $store(dst[j].as_mut_ptr(), r);
                }
            }
        }
    };
}

mat_kernels!(Mat3Buf, Vec3Buf, 3, store3;
    add_mat3, sub_mat3, scale_mat3, hadamard_mat3, matmul_mat3, matmul_vec_mat3);
mat_kernels!(Mat4Buf, Vec4Buf, 4, _mm256_storeu_pd;
    add_mat4, sub_mat4, scale_mat4, hadamard_mat4, matmul_mat4, matmul_vec_mat4);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reductions_skip_padding() {
        let a = [1.0, 2.0, 3.0, f64::NAN];
        assert_eq!(dot_vec3(&a, &[4.0, 5.0, 6.0, 1e300]), 32.0);
        let mut v = [0.0, 3.0, 4.0, 42.0];
        normalize_in_place_vec3(&mut v);
        assert_eq!(v, [0.0, 0.6, 0.8, 42.0]);
        assert_eq!(length_vec4(&[1.0, 1.0, 1.0, 1.0]), 2.0);
    }

    #[test]
    fn matmul_mat2_fixture() {
        let a = [[1.0, 3.0], [2.0, 4.0]];
        let b = [[5.0, 7.0], [6.0, 8.0]];
        let mut c = [[0.0; 2]; 2];
        matmul_mat2(&mut c, &a, &b);
        assert_eq!(c, [[19.0, 43.0], [22.0, 50.0]]);
    }

    #[test]
    fn sub_mat3_uses_wide_kernel_and_keeps_padding() {
        let a = [[5.0, 5.0, 5.0, f64::NAN]; 3];
        let b = [[1.0, 2.0, 3.0, 0.0]; 3];
        let mut out = [[0.0, 0.0, 0.0, -1.0]; 3];
        sub_mat3(&mut out, &a, &b);
        assert_eq!(out, [[4.0, 3.0, 2.0, -1.0]; 3]);
    }
}
