//! SSE2-accelerated f32 kernels for x86_64.
//!
//! SSE2 provides 128-bit registers → 4×f32 lanes: one register holds a
//! `Vector3`/`Vector4`, one `Matrix3`/`Matrix4` column, or a whole `Matrix2`.
//! `Vector2` lives in the low half of a register.
//!
//! Reductions use `dpps` when SSE4.1 is compiled in and an SSE2 emulation
//! otherwise.

use core::arch::x86_64::*;

use super::{Mat2Buf, Mat3Buf, Mat4Buf, Vec2Buf, Vec3Buf, Vec4Buf};

// ── Loads, stores, reductions ───────────────────────────────────────

/// Load two f32 into lanes 0-1, zeroing lanes 2-3.
#[inline(always)]
pub(crate) unsafe fn load2(p: *const f32) -> __m128 {
    _mm_castsi128_ps(_mm_loadl_epi64(p as *const __m128i))
}

/// Store lanes 0-1.
#[inline(always)]
pub(crate) unsafe fn store2(p: *mut f32, v: __m128) {
    _mm_storel_epi64(p as *mut __m128i, _mm_castps_si128(v));
}

/// Store lanes 0-2, leaving `p[3]` untouched.
#[inline(always)]
pub(crate) unsafe fn store3(p: *mut f32, v: __m128) {
    store2(p, v);
    _mm_store_ss(p.add(2), _mm_movehl_ps(v, v));
}

#[cfg(not(target_feature = "sse4.1"))]
#[inline(always)]
fn lane_mask(imm: i32, bit: i32) -> i32 {
    if imm & bit != 0 {
        -1
    } else {
        0
    }
}

/// Masked dot product with `dpps` semantics: the high nibble of `IMM`
/// selects the lanes multiplied, the low nibble the lanes receiving the sum.
#[inline(always)]
pub(crate) unsafe fn dp<const IMM: i32>(a: __m128, b: __m128) -> __m128 {
    #[cfg(target_feature = "sse4.1")]
    {
        _mm_dp_ps::<IMM>(a, b)
    }
    #[cfg(not(target_feature = "sse4.1"))]
    {
        let input = _mm_castsi128_ps(_mm_set_epi32(
            lane_mask(IMM, 0x80),
            lane_mask(IMM, 0x40),
            lane_mask(IMM, 0x20),
            lane_mask(IMM, 0x10),
        ));
        let output = _mm_castsi128_ps(_mm_set_epi32(
            lane_mask(IMM, 0x8),
            lane_mask(IMM, 0x4),
            lane_mask(IMM, 0x2),
            lane_mask(IMM, 0x1),
        ));
        // AND after the multiply so NaN in an unselected lane is discarded
        let prod = _mm_and_ps(_mm_mul_ps(a, b), input);
        let shuf = _mm_movehl_ps(prod, prod);
        let sums = _mm_add_ps(prod, shuf);
        let shuf2 = _mm_shuffle_ps(sums, sums, 1);
        let total = _mm_add_ss(sums, shuf2);
        _mm_and_ps(_mm_shuffle_ps(total, total, 0), output)
    }
}

// ── Vectors ─────────────────────────────────────────────────────────

macro_rules! vec_binary {
    ($buf:ident, $load:ident, $store:ident; $($name:ident => $op:ident),* $(,)?) => {$(
        #[inline]
        pub fn $name(dst: &mut $buf<f32>, lhs: &$buf<f32>, rhs: &$buf<f32>) {
            unsafe { $store(dst.as_mut_ptr(), $op($load(lhs.as_ptr()), $load(rhs.as_ptr()))) }
        }
    )*};
}

macro_rules! vec_scale {
    ($buf:ident, $load:ident, $store:ident; $name:ident) => {
        #[inline]
        pub fn $name(dst: &mut $buf<f32>, scale: f32, src: &$buf<f32>) {
            unsafe { $store(dst.as_mut_ptr(), _mm_mul_ps(_mm_set1_ps(scale), $load(src.as_ptr()))) }
        }
    };
}

/// `$one` sums the logical lanes into lane 0, `$all` broadcasts the sum.
macro_rules! vec_reduce {
    ($buf:ident, $load:ident, $store:ident, $one:literal, $all:literal;
     $dot:ident, $length_square:ident, $length:ident, $normalize:ident) => {
        #[inline]
        pub fn $dot(lhs: &$buf<f32>, rhs: &$buf<f32>) -> f32 {
            unsafe { _mm_cvtss_f32(dp::<$one>($load(lhs.as_ptr()), $load(rhs.as_ptr()))) }
        }

        #[inline]
        pub fn $length_square(v: &$buf<f32>) -> f32 {
            $dot(v, v)
        }

        #[inline]
        pub fn $length(v: &$buf<f32>) -> f32 {
            unsafe {
                let x = $load(v.as_ptr());
                _mm_cvtss_f32(_mm_sqrt_ss(dp::<$one>(x, x)))
            }
        }

        #[inline]
        pub fn $normalize(v: &mut $buf<f32>) {
            unsafe {
                let x = $load(v.as_ptr());
                let length = _mm_sqrt_ps(dp::<$all>(x, x));
                $store(v.as_mut_ptr(), _mm_div_ps(x, length));
            }
        }
    };
}

vec_binary!(Vec2Buf, load2, store2;
    add_vec2 => _mm_add_ps, sub_vec2 => _mm_sub_ps, hadamard_vec2 => _mm_mul_ps);
vec_scale!(Vec2Buf, load2, store2; scale_vec2);
vec_reduce!(Vec2Buf, load2, store2, 0x31, 0x3f;
    dot_vec2, length_square_vec2, length_vec2, normalize_in_place_vec2);

vec_binary!(Vec3Buf, _mm_loadu_ps, store3;
    add_vec3 => _mm_add_ps, sub_vec3 => _mm_sub_ps, hadamard_vec3 => _mm_mul_ps);
vec_scale!(Vec3Buf, _mm_loadu_ps, store3; scale_vec3);
vec_reduce!(Vec3Buf, _mm_loadu_ps, store3, 0x71, 0x7f;
    dot_vec3, length_square_vec3, length_vec3, normalize_in_place_vec3);

vec_binary!(Vec4Buf, _mm_loadu_ps, _mm_storeu_ps;
    add_vec4 => _mm_add_ps, sub_vec4 => _mm_sub_ps, hadamard_vec4 => _mm_mul_ps);
vec_scale!(Vec4Buf, _mm_loadu_ps, _mm_storeu_ps; scale_vec4);
vec_reduce!(Vec4Buf, _mm_loadu_ps, _mm_storeu_ps, 0xf1, 0xff;
    dot_vec4, length_square_vec4, length_vec4, normalize_in_place_vec4);

/// Shuffle form of `(a1 b2 - a2 b1, a2 b0 - a0 b2, a0 b1 - a1 b0)`.
#[inline(always)]
pub(crate) unsafe fn cross(a: __m128, b: __m128) -> __m128 {
    // 0xC9 = (y, z, x, w), 0xD2 = (z, x, y, w)
    let a_yzx = _mm_shuffle_ps(a, a, 0xC9);
    let b_zxy = _mm_shuffle_ps(b, b, 0xD2);
    let a_zxy = _mm_shuffle_ps(a, a, 0xD2);
    let b_yzx = _mm_shuffle_ps(b, b, 0xC9);
    _mm_sub_ps(_mm_mul_ps(a_yzx, b_zxy), _mm_mul_ps(a_zxy, b_yzx))
}

#[inline]
pub fn cross_vec3(dst: &mut Vec3Buf<f32>, lhs: &Vec3Buf<f32>, rhs: &Vec3Buf<f32>) {
    unsafe {
        let r = cross(_mm_loadu_ps(lhs.as_ptr()), _mm_loadu_ps(rhs.as_ptr()));
        store3(dst.as_mut_ptr(), r);
    }
}

// ── Matrix2: whole matrix in one register ───────────────────────────

#[inline(always)]
unsafe fn load_mat2(m: &Mat2Buf<f32>) -> __m128 {
    _mm_loadu_ps(m.as_ptr() as *const f32)
}

#[inline(always)]
unsafe fn store_mat2(m: &mut Mat2Buf<f32>, v: __m128) {
    _mm_storeu_ps(m.as_mut_ptr() as *mut f32, v);
}

macro_rules! mat2_binary {
    ($($name:ident => $op:ident),* $(,)?) => {$(
        #[inline]
        pub fn $name(dst: &mut Mat2Buf<f32>, lhs: &Mat2Buf<f32>, rhs: &Mat2Buf<f32>) {
            unsafe { store_mat2(dst, $op(load_mat2(lhs), load_mat2(rhs))) }
        }
    )*};
}

mat2_binary!(add_mat2 => _mm_add_ps, sub_mat2 => _mm_sub_ps, hadamard_mat2 => _mm_mul_ps);

#[inline]
pub fn scale_mat2(dst: &mut Mat2Buf<f32>, scale: f32, src: &Mat2Buf<f32>) {
    unsafe { store_mat2(dst, _mm_mul_ps(_mm_set1_ps(scale), load_mat2(src))) }
}

/// Lanes are `[l00 l10 l01 l11]`; the product is
/// `[l00 l10 l00 l10] * [r00 r00 r01 r01] + [l01 l11 l01 l11] * [r10 r10 r11 r11]`.
#[inline]
pub fn matmul_mat2(dst: &mut Mat2Buf<f32>, lhs: &Mat2Buf<f32>, rhs: &Mat2Buf<f32>) {
    unsafe {
        let l = load_mat2(lhs);
        let r = load_mat2(rhs);
        let col0 = _mm_shuffle_ps(l, l, 0x44);
        let col1 = _mm_shuffle_ps(l, l, 0xEE);
        let row0 = _mm_shuffle_ps(r, r, 0xA0);
        let row1 = _mm_shuffle_ps(r, r, 0xF5);
        store_mat2(dst, _mm_add_ps(_mm_mul_ps(col0, row0), _mm_mul_ps(col1, row1)));
    }
}

#[inline]
pub fn matmul_vec_mat2(dst: &mut Vec2Buf<f32>, mat: &Mat2Buf<f32>, vec: &Vec2Buf<f32>) {
    unsafe {
        let v = load2(vec.as_ptr());
        // [v0 v0 v1 v1] against [m00 m10 m01 m11], then fold the halves
        let prod = _mm_mul_ps(load_mat2(mat), _mm_shuffle_ps(v, v, 0x50));
        store2(dst.as_mut_ptr(), _mm_add_ps(prod, _mm_movehl_ps(prod, prod)));
    }
}

// ── Matrix3 / Matrix4: one register per column ──────────────────────

macro_rules! mat_kernels {
    ($mat:ident, $vec:ident, $cols:literal, $store:ident;
     $add:ident, $sub:ident, $scale:ident, $hadamard:ident, $matmul:ident, $matmul_vec:ident) => {
        mat_kernels!(@binary $mat, $cols, $store; $add => _mm_add_ps);
        mat_kernels!(@binary $mat, $cols, $store; $sub => _mm_sub_ps);
        mat_kernels!(@binary $mat, $cols, $store; $hadamard => _mm_mul_ps);

        #[inline]
        pub fn $scale(dst: &mut $mat<f32>, scale: f32, src: &$mat<f32>) {
            unsafe {
                let s = _mm_set1_ps(scale);
                for j in 0..$cols {
                    $store(dst[j].as_mut_ptr(), _mm_mul_ps(s, _mm_loadu_ps(src[j].as_ptr())));
                }
            }
        }

        /// Column `j` of the product is `sum_k rhs[j][k] * lhs_col_k`.
        #[inline]
        pub fn $matmul(dst: &mut $mat<f32>, lhs: &$mat<f32>, rhs: &$mat<f32>) {
            unsafe {
                let mut cols = [_mm_setzero_ps(); $cols];
                for (k, col) in cols.iter_mut().enumerate() {
                    *col = _mm_loadu_ps(lhs[k].as_ptr());
                }
                for j in 0..$cols {
                    let mut acc = _mm_mul_ps(cols[0], _mm_set1_ps(rhs[j][0]));
                    for k in 1..$cols {
                        acc = _mm_add_ps(acc, _mm_mul_ps(cols[k], _mm_set1_ps(rhs[j][k])));
                    }
                    $store(dst[j].as_mut_ptr(), acc);
                }
            }
        }

        #[inline]
        pub fn $matmul_vec(dst: &mut $vec<f32>, mat: &$mat<f32>, vec: &$vec<f32>) {
            unsafe {
                let mut acc = _mm_mul_ps(_mm_loadu_ps(mat[0].as_ptr()), _mm_set1_ps(vec[0]));
                for k in 1..$cols {
                    acc = _mm_add_ps(acc, _mm_mul_ps(_mm_loadu_ps(mat[k].as_ptr()), _mm_set1_ps(vec[k])));
                }
                $store(dst.as_mut_ptr(), acc);
            }
        }
    };
    (@binary $mat:ident, $cols:literal, $store:ident; $name:ident => $op:ident) => {
        #[inline]
        pub fn $name(dst: &mut $mat<f32>, lhs: &$mat<f32>, rhs: &$mat<f32>) {
            unsafe {
                for j in 0..$cols {
                    let r = $op(_mm_loadu_ps(lhs[j].as_ptr()), _mm_loadu_ps(rhs[j].as_ptr()));
                    $store(dst[j].as_mut_ptr(), r);
                }
            }
        }
    };
}

mat_kernels!(Mat3Buf, Vec3Buf, 3, store3;
    add_mat3, sub_mat3, scale_mat3, hadamard_mat3, matmul_mat3, matmul_vec_mat3);
mat_kernels!(Mat4Buf, Vec4Buf, 4, _mm_storeu_ps;
    add_mat4, sub_mat4, scale_mat4, hadamard_mat4, matmul_mat4, matmul_vec_mat4);
