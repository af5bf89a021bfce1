//! SSE2-accelerated f64 kernels for x86_64.
//!
//! SSE2 provides 128-bit registers → 2×f64 lanes.
//! SSE2 is baseline on x86_64 (always available).
//!
//! `Vector2` and `Matrix2` columns fit one register; four-lane buffers are
//! split into `lo` (lanes 0-1) and `hi` (lanes 2-3). For `Vector3` and
//! `Matrix3` columns `hi` is loaded and stored through lane 2 only.

use core::arch::x86_64::*;

use super::{Mat2Buf, Mat3Buf, Mat4Buf, Vec2Buf, Vec3Buf, Vec4Buf};

// ── Loads, stores, reductions ───────────────────────────────────────

#[inline(always)]
unsafe fn load3(p: *const f64) -> (__m128d, __m128d) {
    (_mm_loadu_pd(p), _mm_load_sd(p.add(2)))
}

#[inline(always)]
unsafe fn store3(p: *mut f64, (lo, hi): (__m128d, __m128d)) {
    _mm_storeu_pd(p, lo);
    _mm_store_sd(p.add(2), hi);
}

#[inline(always)]
unsafe fn load4(p: *const f64) -> (__m128d, __m128d) {
    (_mm_loadu_pd(p), _mm_loadu_pd(p.add(2)))
}

#[inline(always)]
unsafe fn store4(p: *mut f64, (lo, hi): (__m128d, __m128d)) {
    _mm_storeu_pd(p, lo);
    _mm_storeu_pd(p.add(2), hi);
}

#[cfg(not(target_feature = "sse4.1"))]
#[inline(always)]
fn lane_mask(imm: i32, bit: i32) -> i64 {
    if imm & bit != 0 {
        -1
    } else {
        0
    }
}

/// Masked dot product with `dppd` semantics: bits 4-5 of `IMM` select the
/// lanes multiplied, bits 0-1 the lanes receiving the sum.
#[inline(always)]
unsafe fn dp<const IMM: i32>(a: __m128d, b: __m128d) -> __m128d {
    #[cfg(target_feature = "sse4.1")]
    {
        _mm_dp_pd::<IMM>(a, b)
    }
    #[cfg(not(target_feature = "sse4.1"))]
    {
        let input = _mm_castsi128_pd(_mm_set_epi64x(lane_mask(IMM, 0x20), lane_mask(IMM, 0x10)));
        let output = _mm_castsi128_pd(_mm_set_epi64x(lane_mask(IMM, 0x2), lane_mask(IMM, 0x1)));
        let prod = _mm_and_pd(_mm_mul_pd(a, b), input);
        let total = _mm_add_pd(prod, _mm_shuffle_pd(prod, prod, 1));
        _mm_and_pd(total, output)
    }
}

// ── Vector2 ─────────────────────────────────────────────────────────

macro_rules! vec2_binary {
    ($($name:ident => $op:ident),* $(,)?) => {$(
        #[inline]
        pub fn $name(dst: &mut Vec2Buf<f64>, lhs: &Vec2Buf<f64>, rhs: &Vec2Buf<f64>) {
            unsafe { _mm_storeu_pd(dst.as_mut_ptr(), $op(_mm_loadu_pd(lhs.as_ptr()), _mm_loadu_pd(rhs.as_ptr()))) }
        }
    )*};
}

vec2_binary!(add_vec2 => _mm_add_pd, sub_vec2 => _mm_sub_pd, hadamard_vec2 => _mm_mul_pd);

#[inline]
pub fn scale_vec2(dst: &mut Vec2Buf<f64>, scale: f64, src: &Vec2Buf<f64>) {
    unsafe { _mm_storeu_pd(dst.as_mut_ptr(), _mm_mul_pd(_mm_set1_pd(scale), _mm_loadu_pd(src.as_ptr()))) }
}

#[inline]
pub fn dot_vec2(lhs: &Vec2Buf<f64>, rhs: &Vec2Buf<f64>) -> f64 {
    unsafe { _mm_cvtsd_f64(dp::<0x31>(_mm_loadu_pd(lhs.as_ptr()), _mm_loadu_pd(rhs.as_ptr()))) }
}

#[inline]
pub fn length_square_vec2(v: &Vec2Buf<f64>) -> f64 {
    dot_vec2(v, v)
}

#[inline]
pub fn length_vec2(v: &Vec2Buf<f64>) -> f64 {
    unsafe {
        let x = _mm_loadu_pd(v.as_ptr());
        let sq = dp::<0x31>(x, x);
        _mm_cvtsd_f64(_mm_sqrt_sd(sq, sq))
    }
}

#[inline]
pub fn normalize_in_place_vec2(v: &mut Vec2Buf<f64>) {
    unsafe {
        let x = _mm_loadu_pd(v.as_ptr());
        let length = _mm_sqrt_pd(dp::<0x33>(x, x));
        _mm_storeu_pd(v.as_mut_ptr(), _mm_div_pd(x, length));
    }
}

// ── Vector3 / Vector4: lo/hi split ──────────────────────────────────

macro_rules! split_binary {
    ($buf:ident, $load:ident, $store:ident; $($name:ident => $op:ident),* $(,)?) => {$(
        #[inline]
        pub fn $name(dst: &mut $buf<f64>, lhs: &$buf<f64>, rhs: &$buf<f64>) {
            unsafe {
                let (a_lo, a_hi) = $load(lhs.as_ptr());
                let (b_lo, b_hi) = $load(rhs.as_ptr());
                $store(dst.as_mut_ptr(), ($op(a_lo, b_lo), $op(a_hi, b_hi)));
            }
        }
    )*};
}

macro_rules! split_vector {
    ($buf:ident, $load:ident, $store:ident, $hi:literal;
     $scale:ident, $dot:ident, $length_square:ident, $length:ident, $normalize:ident) => {
        #[inline]
        pub fn $scale(dst: &mut $buf<f64>, scale: f64, src: &$buf<f64>) {
            unsafe {
                let s = _mm_set1_pd(scale);
                let (lo, hi) = $load(src.as_ptr());
                $store(dst.as_mut_ptr(), (_mm_mul_pd(s, lo), _mm_mul_pd(s, hi)));
            }
        }

        #[inline]
        pub fn $dot(lhs: &$buf<f64>, rhs: &$buf<f64>) -> f64 {
            unsafe {
                let (a_lo, a_hi) = $load(lhs.as_ptr());
                let (b_lo, b_hi) = $load(rhs.as_ptr());
                _mm_cvtsd_f64(_mm_add_sd(dp::<0x31>(a_lo, b_lo), dp::<$hi>(a_hi, b_hi)))
            }
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
                let (lo, hi) = $load(v.as_ptr());
                let sum = _mm_add_sd(dp::<0x31>(lo, lo), dp::<$hi>(hi, hi));
                let length = _mm_sqrt_pd(_mm_unpacklo_pd(sum, sum));
                $store(v.as_mut_ptr(), (_mm_div_pd(lo, length), _mm_div_pd(hi, length)));
            }
        }
    };
}

split_binary!(Vec3Buf, load3, store3;
    add_vec3 => _mm_add_pd, sub_vec3 => _mm_sub_pd, hadamard_vec3 => _mm_mul_pd);
split_vector!(Vec3Buf, load3, store3, 0x11;
    scale_vec3, dot_vec3, length_square_vec3, length_vec3, normalize_in_place_vec3);

split_binary!(Vec4Buf, load4, store4;
    add_vec4 => _mm_add_pd, sub_vec4 => _mm_sub_pd, hadamard_vec4 => _mm_mul_pd);
split_vector!(Vec4Buf, load4, store4, 0x31;
    scale_vec4, dot_vec4, length_square_vec4, length_vec4, normalize_in_place_vec4);

/// The lane shuffles cost more than they save at two lanes per register.
#[inline]
pub fn cross_vec3(dst: &mut Vec3Buf<f64>, lhs: &Vec3Buf<f64>, rhs: &Vec3Buf<f64>) {
    super::scalar::cross_vec3(dst, lhs, rhs);
}

// ── Matrix2: one register per column ────────────────────────────────

macro_rules! mat2_binary {
    ($($name:ident => $op:ident),* $(,)?) => {$(
        #[inline]
        pub fn $name(dst: &mut Mat2Buf<f64>, lhs: &Mat2Buf<f64>, rhs: &Mat2Buf<f64>) {
            unsafe {
                for j in 0..2 {
                    let r = $op(_mm_loadu_pd(lhs[j].as_ptr()), _mm_loadu_pd(rhs[j].as_ptr()));
                    _mm_storeu_pd(dst[j].as_mut_ptr(), r);
                }
            }
        }
    )*};
}

mat2_binary!(add_mat2 => _mm_add_pd, sub_mat2 => _mm_sub_pd, hadamard_mat2 => _mm_mul_pd);

#[inline]
pub fn scale_mat2(dst: &mut Mat2Buf<f64>, scale: f64, src: &Mat2Buf<f64>) {
    unsafe {
        let s = _mm_set1_pd(scale);
        for j in 0..2 {
            _mm_storeu_pd(dst[j].as_mut_ptr(), _mm_mul_pd(s, _mm_loadu_pd(src[j].as_ptr())));
        }
    }
}

#[inline]
pub fn matmul_mat2(dst: &mut Mat2Buf<f64>, lhs: &Mat2Buf<f64>, rhs: &Mat2Buf<f64>) {
    unsafe {
        let c0 = _mm_loadu_pd(lhs[0].as_ptr());
        let c1 = _mm_loadu_pd(lhs[1].as_ptr());
        for j in 0..2 {
            let r = _mm_add_pd(
                _mm_mul_pd(c0, _mm_set1_pd(rhs[j][0])),
                _mm_mul_pd(c1, _mm_set1_pd(rhs[j][1])),
            );
            _mm_storeu_pd(dst[j].as_mut_ptr(), r);
        }
    }
}

#[inline]
pub fn matmul_vec_mat2(dst: &mut Vec2Buf<f64>, mat: &Mat2Buf<f64>, vec: &Vec2Buf<f64>) {
    unsafe {
        let r = _mm_add_pd(
            _mm_mul_pd(_mm_loadu_pd(mat[0].as_ptr()), _mm_set1_pd(vec[0])),
            _mm_mul_pd(_mm_loadu_pd(mat[1].as_ptr()), _mm_set1_pd(vec[1])),
        );
        _mm_storeu_pd(dst.as_mut_ptr(), r);
    }
}

// ── Matrix3 / Matrix4: lo/hi per column ─────────────────────────────

macro_rules! mat_kernels {
    ($mat:ident, $vec:ident, $cols:literal, $load:ident, $store:ident;
     $add:ident, $sub:ident, $scale:ident, $hadamard:ident, $matmul:ident, $matmul_vec:ident) => {
        mat_kernels!(@binary $mat, $cols, $load, $store; $add => _mm_add_pd);
        mat_kernels!(@binary $mat, $cols, $load, $store; $sub => _mm_sub_pd);
        mat_kernels!(@binary $mat, $cols, $load, $store; $hadamard => _mm_mul_pd);

        #[inline]
        pub fn $scale(dst: &mut $mat<f64>, scale: f64, src: &$mat<f64>) {
            unsafe {
                let s = _mm_set1_pd(scale);
                for j in 0..$cols {
                    let (lo, hi) = $load(src[j].as_ptr());
                    $store(dst[j].as_mut_ptr(), (_mm_mul_pd(s, lo), _mm_mul_pd(s, hi)));
                }
            }
        }

        /// Column `j` of the product is `sum_k rhs[j][k] * lhs_col_k`.
        #[inline]
        pub fn $matmul(dst: &mut $mat<f64>, lhs: &$mat<f64>, rhs: &$mat<f64>) {
            unsafe {
                let mut cols = [(_mm_setzero_pd(), _mm_setzero_pd()); $cols];
                for (k, col) in cols.iter_mut().enumerate() {
                    *col = $load(lhs[k].as_ptr());
                }
                for j in 0..$cols {
                    let mut lo = _mm_setzero_pd();
                    let mut hi = _mm_setzero_pd();
                    for k in 0..$cols {
                        let s = _mm_set1_pd(rhs[j][k]);
                        lo = _mm_add_pd(lo, _mm_mul_pd(cols[k].0, s));
                        hi = _mm_add_pd(hi, _mm_mul_pd(cols[k].1, s));
                    }
                    $store(dst[j].as_mut_ptr(), (lo, hi));
                }
            }
        }

        #[inline]
        pub fn $matmul_vec(dst: &mut $vec<f64>, mat: &$mat<f64>, vec: &$vec<f64>) {
            unsafe {
                let mut lo = _mm_setzero_pd();
                let mut hi = _mm_setzero_pd();
                for k in 0..$cols {
                    let s = _mm_set1_pd(vec[k]);
                    let (c_lo, c_hi) = $load(mat[k].as_ptr());
                    lo = _mm_add_pd(lo, _mm_mul_pd(c_lo, s));
                    hi = _mm_add_pd(hi, _mm_mul_pd(c_hi, s));
                }
                $store(dst.as_mut_ptr(), (lo, hi));
            }
        }
    };
    (@binary $mat:ident, $cols:literal, $load:ident, $store:ident; $name:ident => $op:ident) => {
        #[inline]
        pub fn $name(dst: &mut $mat<f64>, lhs: &$mat<f64>, rhs: &$mat<f64>) {
            unsafe {
                for j in 0..$cols {
                    let (a_lo, a_hi) = $load(lhs[j].as_ptr());
                    let (b_lo, b_hi) = $load(rhs[j].as_ptr());
                    $store(dst[j].as_mut_ptr(), ($op(a_lo, b_lo), $op(a_hi, b_hi)));
                }
            }
        }
    };
}

mat_kernels!(Mat3Buf, Vec3Buf, 3, load3, store3;
    add_mat3, sub_mat3, scale_mat3, hadamard_mat3, matmul_mat3, matmul_vec_mat3);
mat_kernels!(Mat4Buf, Vec4Buf, 4, load4, store4;
    add_mat4, sub_mat4, scale_mat4, hadamard_mat4, matmul_mat4, matmul_vec_mat4);
