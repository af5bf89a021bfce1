//! AVX-accelerated f32 kernels for x86_64.
//!
//! AVX provides 256-bit registers → 8×f32 lanes, so element-wise matrix
//! kernels process two columns per register. `Vector3` and `Matrix3`
//! results are written through `vmaskmovps`, which never touches the
//! padding lane. Everything that already fits one 128-bit register is the
//! SSE kernel (AVX implies SSE4.1, so those use `dpps`).
//!
//! Only compiled when `target_feature = "avx"` is enabled
//! (e.g. via `-C target-cpu=native` on Sandy Bridge+).

use core::arch::x86_64::*;

use super::f32_sse2::cross;
use super::{Mat3Buf, Mat4Buf, Vec3Buf};

pub use super::f32_sse2::{
    add_mat2, add_vec2, add_vec4, dot_vec2, dot_vec3, dot_vec4, hadamard_mat2, hadamard_vec2,
    hadamard_vec4, length_square_vec2, length_square_vec3, length_square_vec4, length_vec2,
    length_vec3, length_vec4, matmul_mat2, matmul_mat3, matmul_mat4, matmul_vec_mat2,
    matmul_vec_mat3, matmul_vec_mat4, normalize_in_place_vec2, normalize_in_place_vec4,
    scale_mat2, scale_vec2, scale_vec4, sub_mat2, sub_vec2, sub_vec4,
};

// ── Masked stores ───────────────────────────────────────────────────

/// Lanes 0-2 of one `Vector3`.
#[inline(always)]
unsafe fn mask3() -> __m128i {
    _mm_set_epi32(0, -1, -1, -1)
}

/// Lanes 0-2 of two consecutive `Matrix3` columns.
#[inline(always)]
unsafe fn mask3x2() -> __m256i {
    _mm256_set_epi32(0, -1, -1, -1, 0, -1, -1, -1)
}

#[inline(always)]
unsafe fn store3(p: *mut f32, v: __m128) {
    _mm_maskstore_ps(p, mask3(), v);
}

// ── Vector3 ─────────────────────────────────────────────────────────

macro_rules! vec3_binary {
    ($($name:ident => $op:ident),* $(,)?) => {$(
        #[inline]
        pub fn $name(dst: &mut Vec3Buf<f32>, lhs: &Vec3Buf<f32>, rhs: &Vec3Buf<f32>) {
            unsafe { store3(dst.as_mut_ptr(), $op(_mm_loadu_ps(lhs.as_ptr()), _mm_loadu_ps(rhs.as_ptr()))) }
        }
    )*};
}

vec3_binary!(add_vec3 => _mm_add_ps, sub_vec3 => _mm_sub_ps, hadamard_vec3 => _mm_mul_ps);

#[inline]
pub fn scale_vec3(dst: &mut Vec3Buf<f32>, scale: f32, src: &Vec3Buf<f32>) {
    unsafe { store3(dst.as_mut_ptr(), _mm_mul_ps(_mm_set1_ps(scale), _mm_loadu_ps(src.as_ptr()))) }
}

#[inline]
pub fn cross_vec3(dst: &mut Vec3Buf<f32>, lhs: &Vec3Buf<f32>, rhs: &Vec3Buf<f32>) {
    unsafe { store3(dst.as_mut_ptr(), cross(_mm_loadu_ps(lhs.as_ptr()), _mm_loadu_ps(rhs.as_ptr()))) }
}

#[inline]
pub fn normalize_in_place_vec3(v: &mut Vec3Buf<f32>) {
    unsafe {
        let x = _mm_loadu_ps(v.as_ptr());
        let length = _mm_sqrt_ps(_mm_dp_ps(x, x, 0x7f));
        store3(v.as_mut_ptr(), _mm_div_ps(x, length));
    }
}

// ── Matrix3: columns 0-1 in one ymm, column 2 in one xmm ────────────

macro_rules! mat3_binary {
    ($($name:ident => $op:ident, $op128:ident),* $(,)?) => {$(
        #[inline]
        pub fn $name(dst: &mut Mat3Buf<f32>, lhs: &Mat3Buf<f32>, rhs: &Mat3Buf<f32>) {
            unsafe {
                let (a, b, d) = (lhs.as_ptr() as *const f32, rhs.as_ptr() as *const f32, dst.as_mut_ptr() as *mut f32);
                _mm256_maskstore_ps(d, mask3x2(), $op(_mm256_loadu_ps(a), _mm256_loadu_ps(b)));
                store3(d.add(8), $op128(_mm_loadu_ps(a.add(8)), _mm_loadu_ps(b.add(8))));
            }
        }
    )*};
}

mat3_binary!(
    add_mat3 => _mm256_add_ps, _mm_add_ps,
    sub_mat3 => _mm256_sub_ps, _mm_sub_ps,
    hadamard_mat3 => _mm256_mul_ps, _mm_mul_ps,
);

#[inline]
pub fn scale_mat3(dst: &mut Mat3Buf<f32>, scale: f32, src: &Mat3Buf<f32>) {
    unsafe {
        let (s, d) = (src.as_ptr() as *const f32, dst.as_mut_ptr() as *mut f32);
        _mm256_maskstore_ps(d, mask3x2(), _mm256_mul_ps(_mm256_set1_ps(scale), _mm256_loadu_ps(s)));
        store3(d.add(8), _mm_mul_ps(_mm_set1_ps(scale), _mm_loadu_ps(s.add(8))));
    }
}

// ── Matrix4: two ymm registers ──────────────────────────────────────

macro_rules! mat4_binary {
    ($($name:ident => $op:ident),* $(,)?) => {$(
        #[inline]
        pub fn $name(dst: &mut Mat4Buf<f32>, lhs: &Mat4Buf<f32>, rhs: &Mat4Buf<f32>) {
            unsafe {
                let (a, b, d) = (lhs.as_ptr() as *const f32, rhs.as_ptr() as *const f32, dst.as_mut_ptr() as *mut f32);
                _mm256_storeu_ps(d, $op(_mm256_loadu_ps(a), _mm256_loadu_ps(b)));
                _mm256_storeu_ps(d.add(8), $op(_mm256_loadu_ps(a.add(8)), _mm256_loadu_ps(b.add(8))));
            }
        }
    )*};
}

mat4_binary!(add_mat4 => _mm256_add_ps, sub_mat4 => _mm256_sub_ps, hadamard_mat4 => _mm256_mul_ps);

#[inline]
pub fn scale_mat4(dst: &mut Mat4Buf<f32>, scale: f32, src: &Mat4Buf<f32>) {
    unsafe {
        let k = _mm256_set1_ps(scale);
        let (s, d) = (src.as_ptr() as *const f32, dst.as_mut_ptr() as *mut f32);
        _mm256_storeu_ps(d, _mm256_mul_ps(k, _mm256_loadu_ps(s)));
        _mm256_storeu_ps(d.add(8), _mm256_mul_ps(k, _mm256_loadu_ps(s.add(8))));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mat3_masked_store_keeps_padding() {
        let a = [[1.0_f32, 2.0, 3.0, f32::NAN]; 3];
        let b = [[1.0_f32, 1.0, 1.0, f32::NAN]; 3];
        let mut out = [[0.0_f32, 0.0, 0.0, -7.0]; 3];
        sub_mat3(&mut out, &a, &b);
        assert_eq!(out, [[0.0, 1.0, 2.0, -7.0]; 3]);
        scale_mat3(&mut out, 2.0, &a);
        assert_eq!(out, [[2.0, 4.0, 6.0, -7.0]; 3]);
    }

    #[test]
    fn vec3_masked_store_keeps_padding() {
        let mut out = [0.0_f32, 0.0, 0.0, 5.0];
        add_vec3(&mut out, &[1.0, 2.0, 3.0, 1.0], &[1.0, 1.0, 1.0, 1.0]);
        assert_eq!(out, [2.0, 3.0, 4.0, 5.0]);
    }
}
