//! SIMD-accelerated kernels with compile-time architecture dispatch.
//!
//! This module is private. It provides the kernels behind every vector and
//! matrix operation; the public types only see the dispatch functions.
//!
//! ## Dispatch strategy
//!
//! TypeId-based dispatch at monomorphization time: for `f32`/`f64`, the
//! compiler selects SIMD kernels and dead-code-eliminates the fallback.
//! For all other types the scalar kernels are used.
//!
//! On x86_64 the widest instruction set compiled in is selected: AVX > SSE.
//! SSE2 is part of the x86_64 baseline; AVX is enabled with
//! `-C target-cpu=native` or `-C target-feature=+avx`. Disabling the `simd`
//! feature forces the scalar tier everywhere. There is no runtime CPU
//! detection: running an AVX build on a CPU without AVX faults.
//!
//! ## Storage regimes
//!
//! | Type      | Buffer         | f32 (128-bit)          | f64 (128-bit)      | f64 (256-bit)       |
//! |-----------|----------------|------------------------|--------------------|---------------------|
//! | `Vector2` | `[T; 2]`       | low half of one xmm    | one xmm            | one xmm (SSE)       |
//! | `Vector3` | `[T; 4]`       | one xmm, 3-lane store  | lo/hi split        | one ymm, masked     |
//! | `Vector4` | `[T; 4]`       | one xmm                | lo/hi split        | one ymm             |
//! | `Matrix2` | `[[T; 2]; 2]`  | whole matrix, one xmm  | one xmm per column | whole matrix, ymm   |
//! | `Matrix3` | `[[T; 4]; 3]`  | one xmm per column     | lo/hi per column   | one ymm per column  |
//! | `Matrix4` | `[[T; 4]; 4]`  | one xmm per column     | lo/hi per column   | one ymm per column  |
//!
//! Under AVX, f32 element-wise matrix kernels pack two columns per ymm.
//!
//! Every tier module exposes the same kernel names. A tier without a better
//! formulation re-exports (or wraps) the kernel of the tier below it.

use core::fmt;

use crate::traits::{is_scalar, FloatScalar, CPU_HAS_AVX, CPU_HAS_SSE};

pub(crate) mod scalar;

#[cfg(all(target_arch = "x86_64", feature = "simd"))]
pub(crate) mod f64_sse2;
#[cfg(all(target_arch = "x86_64", feature = "simd"))]
pub(crate) mod f32_sse2;

#[cfg(all(target_arch = "x86_64", feature = "simd", target_feature = "avx"))]
pub(crate) mod f64_avx;
#[cfg(all(target_arch = "x86_64", feature = "simd", target_feature = "avx"))]
pub(crate) mod f32_avx;

// ── Storage buffers ─────────────────────────────────────────────────

pub(crate) type Vec2Buf<T> = [T; 2];
/// Three logical lanes plus one padding lane.
pub(crate) type Vec3Buf<T> = [T; 4];
pub(crate) type Vec4Buf<T> = [T; 4];
pub(crate) type Mat2Buf<T> = [[T; 2]; 2];
/// Three padded columns.
pub(crate) type Mat3Buf<T> = [[T; 4]; 3];
pub(crate) type Mat4Buf<T> = [[T; 4]; 4];

// ── Backend reporting ───────────────────────────────────────────────

/// Kernel tier that dispatch resolves to.
///
/// ```
/// use smallmat::Backend;
///
/// // Integer element types never reach a SIMD kernel.
/// assert_eq!(Backend::of::<i32>(), Backend::Scalar);
/// println!("f32 kernels: {}", Backend::of::<f32>());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Portable reference kernels.
    Scalar,
    /// 128-bit SSE kernels.
    Sse,
    /// 256-bit AVX kernels (with SSE-width fallbacks where noted).
    Avx,
}

impl Backend {
    /// Tier selected for element type `T` in this build.
    pub fn of<T: 'static>() -> Self {
        if !is_scalar::<T>() {
            Backend::Scalar
        } else if CPU_HAS_AVX {
            Backend::Avx
        } else if CPU_HAS_SSE {
            Backend::Sse
        } else {
            Backend::Scalar
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Scalar => write!(f, "scalar"),
            Backend::Sse => write!(f, "sse"),
            Backend::Avx => write!(f, "avx"),
        }
    }
}

// ── Buffer reinterpretation ─────────────────────────────────────────
//
// Only called after a TypeId check proved `A` and `B` are the same type
// up to the element (`T` vs `f32`/`f64`).

#[cfg(all(target_arch = "x86_64", feature = "simd"))]
#[inline(always)]
unsafe fn cast_ref<A, B>(a: &A) -> &B {
    debug_assert_eq!(core::mem::size_of::<A>(), core::mem::size_of::<B>());
    &*(a as *const A as *const B)
}

#[cfg(all(target_arch = "x86_64", feature = "simd"))]
#[inline(always)]
unsafe fn cast_mut<A, B>(a: &mut A) -> &mut B {
    debug_assert_eq!(core::mem::size_of::<A>(), core::mem::size_of::<B>());
    &mut *(a as *mut A as *mut B)
}

#[cfg(all(target_arch = "x86_64", feature = "simd"))]
#[inline(always)]
unsafe fn cast_val<A: Copy, B: Copy>(a: A) -> B {
    debug_assert_eq!(core::mem::size_of::<A>(), core::mem::size_of::<B>());
    core::mem::transmute_copy(&a)
}

#[cfg(all(target_arch = "x86_64", feature = "simd"))]
macro_rules! cast_arg {
    (out $x:ident) => {
        cast_mut($x)
    };
    (buf $x:ident) => {
        cast_ref($x)
    };
    (val $x:ident) => {
        cast_val($x)
    };
}

/// Generates one dispatch function per kernel name.
///
/// Arguments are tagged `out` (`&mut` buffer), `buf` (`&` buffer) or `val`
/// (element by value) so they can be reinterpreted for the concrete kernel.
macro_rules! dispatch {
    ($( $(#[$meta:meta])* fn $name:ident($($kind:ident $arg:ident: $ty:ty),* $(,)?) $(-> $ret:ty)?; )*) => {$(
        $(#[$meta])*
        #[inline]
        pub(crate) fn $name<T: FloatScalar>($($arg: $ty),*) $(-> $ret)? {
            #[cfg(all(target_arch = "x86_64", feature = "simd"))]
            {
                if crate::traits::is_float64::<T>() {
                    #[cfg(target_feature = "avx")]
                    return unsafe { cast_val(f64_avx::$name($(cast_arg!($kind $arg)),*)) };
                    #[cfg(not(target_feature = "avx"))]
                    return unsafe { cast_val(f64_sse2::$name($(cast_arg!($kind $arg)),*)) };
                }
                if crate::traits::is_float32::<T>() {
                    #[cfg(target_feature = "avx")]
                    return unsafe { cast_val(f32_avx::$name($(cast_arg!($kind $arg)),*)) };
                    #[cfg(not(target_feature = "avx"))]
                    return unsafe { cast_val(f32_sse2::$name($(cast_arg!($kind $arg)),*)) };
                }
            }
            scalar::$name($($arg),*)
        }
    )*};
}

// ── Vector2 ─────────────────────────────────────────────────────────

dispatch! {
    fn add_vec2(out dst: &mut Vec2Buf<T>, buf lhs: &Vec2Buf<T>, buf rhs: &Vec2Buf<T>);
    fn sub_vec2(out dst: &mut Vec2Buf<T>, buf lhs: &Vec2Buf<T>, buf rhs: &Vec2Buf<T>);
    fn scale_vec2(out dst: &mut Vec2Buf<T>, val scale: T, buf src: &Vec2Buf<T>);
    fn hadamard_vec2(out dst: &mut Vec2Buf<T>, buf lhs: &Vec2Buf<T>, buf rhs: &Vec2Buf<T>);
    fn dot_vec2(buf lhs: &Vec2Buf<T>, buf rhs: &Vec2Buf<T>) -> T;
    fn length_square_vec2(buf v: &Vec2Buf<T>) -> T;
    fn length_vec2(buf v: &Vec2Buf<T>) -> T;
    fn normalize_in_place_vec2(out v: &mut Vec2Buf<T>);
}

// ── Vector3 ─────────────────────────────────────────────────────────

dispatch! {
    fn add_vec3(out dst: &mut Vec3Buf<T>, buf lhs: &Vec3Buf<T>, buf rhs: &Vec3Buf<T>);
    fn sub_vec3(out dst: &mut Vec3Buf<T>, buf lhs: &Vec3Buf<T>, buf rhs: &Vec3Buf<T>);
    fn scale_vec3(out dst: &mut Vec3Buf<T>, val scale: T, buf src: &Vec3Buf<T>);
    fn hadamard_vec3(out dst: &mut Vec3Buf<T>, buf lhs: &Vec3Buf<T>, buf rhs: &Vec3Buf<T>);
    fn dot_vec3(buf lhs: &Vec3Buf<T>, buf rhs: &Vec3Buf<T>) -> T;
    fn cross_vec3(out dst: &mut Vec3Buf<T>, buf lhs: &Vec3Buf<T>, buf rhs: &Vec3Buf<T>);
    fn length_square_vec3(buf v: &Vec3Buf<T>) -> T;
    fn length_vec3(buf v: &Vec3Buf<T>) -> T;
    fn normalize_in_place_vec3(out v: &mut Vec3Buf<T>);
}

// ── Vector4 ─────────────────────────────────────────────────────────

dispatch! {
    fn add_vec4(out dst: &mut Vec4Buf<T>, buf lhs: &Vec4Buf<T>, buf rhs: &Vec4Buf<T>);
    fn sub_vec4(out dst: &mut Vec4Buf<T>, buf lhs: &Vec4Buf<T>, buf rhs: &Vec4Buf<T>);
    fn scale_vec4(out dst: &mut Vec4Buf<T>, val scale: T, buf src: &Vec4Buf<T>);
    fn hadamard_vec4(out dst: &mut Vec4Buf<T>, buf lhs: &Vec4Buf<T>, buf rhs: &Vec4Buf<T>);
    fn dot_vec4(buf lhs: &Vec4Buf<T>, buf rhs: &Vec4Buf<T>) -> T;
    fn length_square_vec4(buf v: &Vec4Buf<T>) -> T;
    fn length_vec4(buf v: &Vec4Buf<T>) -> T;
    fn normalize_in_place_vec4(out v: &mut Vec4Buf<T>);
}

// ── Matrices ────────────────────────────────────────────────────────

dispatch! {
    fn add_mat2(out dst: &mut Mat2Buf<T>, buf lhs: &Mat2Buf<T>, buf rhs: &Mat2Buf<T>);
    fn sub_mat2(out dst: &mut Mat2Buf<T>, buf lhs: &Mat2Buf<T>, buf rhs: &Mat2Buf<T>);
    fn scale_mat2(out dst: &mut Mat2Buf<T>, val scale: T, buf src: &Mat2Buf<T>);
    fn hadamard_mat2(out dst: &mut Mat2Buf<T>, buf lhs: &Mat2Buf<T>, buf rhs: &Mat2Buf<T>);
    fn matmul_mat2(out dst: &mut Mat2Buf<T>, buf lhs: &Mat2Buf<T>, buf rhs: &Mat2Buf<T>);
    fn matmul_vec_mat2(out dst: &mut Vec2Buf<T>, buf mat: &Mat2Buf<T>, buf vec: &Vec2Buf<T>);

    fn add_mat3(out dst: &mut Mat3Buf<T>, buf lhs: &Mat3Buf<T>, buf rhs: &Mat3Buf<T>);
    fn sub_mat3(out dst: &mut Mat3Buf<T>, buf lhs: &Mat3Buf<T>, buf rhs: &Mat3Buf<T>);
    fn scale_mat3(out dst: &mut Mat3Buf<T>, val scale: T, buf src: &Mat3Buf<T>);
    fn hadamard_mat3(out dst: &mut Mat3Buf<T>, buf lhs: &Mat3Buf<T>, buf rhs: &Mat3Buf<T>);
    fn matmul_mat3(out dst: &mut Mat3Buf<T>, buf lhs: &Mat3Buf<T>, buf rhs: &Mat3Buf<T>);
    fn matmul_vec_mat3(out dst: &mut Vec3Buf<T>, buf mat: &Mat3Buf<T>, buf vec: &Vec3Buf<T>);

    fn add_mat4(out dst: &mut Mat4Buf<T>, buf lhs: &Mat4Buf<T>, buf rhs: &Mat4Buf<T>);
    fn sub_mat4(out dst: &mut Mat4Buf<T>, buf lhs: &Mat4Buf<T>, buf rhs: &Mat4Buf<T>);
    fn scale_mat4(out dst: &mut Mat4Buf<T>, val scale: T, buf src: &Mat4Buf<T>);
    fn hadamard_mat4(out dst: &mut Mat4Buf<T>, buf lhs: &Mat4Buf<T>, buf rhs: &Mat4Buf<T>);
    fn matmul_mat4(out dst: &mut Mat4Buf<T>, buf lhs: &Mat4Buf<T>, buf rhs: &Mat4Buf<T>);
    fn matmul_vec_mat4(out dst: &mut Vec4Buf<T>, buf mat: &Mat4Buf<T>, buf vec: &Vec4Buf<T>);
}
