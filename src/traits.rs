use core::any::TypeId;
use core::fmt::Debug;
use num_traits::{Float, Num, One, Zero};

/// Tolerance used by the approximate `==` of every vector, matrix and quaternion.
pub const EPS: f64 = 1e-6;

/// Trait for types that can be stored in vectors and matrices.
///
/// Blanket-implemented for all types satisfying the bounds.
/// Covers `f32`, `f64`, and all integer types. The `'static` bound lets the
/// kernel dispatch identify `f32`/`f64` at monomorphization time.
pub trait Scalar: Copy + PartialEq + Debug + Zero + One + Num + 'static {}

impl<T: Copy + PartialEq + Debug + Zero + One + Num + 'static> Scalar for T {}

/// Trait for floating-point elements.
///
/// Required by every arithmetic operation (`sqrt` in norms, division in
/// inverses, `abs` in the approximate comparison).
pub trait FloatScalar: Scalar + Float {
    /// [`EPS`] converted to `Self`.
    #[inline]
    fn eps() -> Self {
        Self::from(EPS).unwrap_or_else(Self::epsilon)
    }

    /// Convert a literal `f64` constant to `Self`.
    #[inline]
    fn lit(x: f64) -> Self {
        Self::from(x).unwrap_or_else(Self::nan)
    }
}

impl<T: Scalar + Float> FloatScalar for T {}

// ── Compile-time predicates ─────────────────────────────────────────

/// `true` when `T` is `f32`.
#[inline]
pub fn is_float32<T: 'static>() -> bool {
    TypeId::of::<T>() == TypeId::of::<f32>()
}

/// `true` when `T` is `f64`.
#[inline]
pub fn is_float64<T: 'static>() -> bool {
    TypeId::of::<T>() == TypeId::of::<f64>()
}

/// `true` when `T` has SIMD kernels (`f32` or `f64`).
#[inline]
pub fn is_scalar<T: 'static>() -> bool {
    is_float32::<T>() || is_float64::<T>()
}

/// SSE kernels were compiled in.
pub const CPU_HAS_SSE: bool = cfg!(all(target_arch = "x86_64", feature = "simd"));

/// AVX kernels were compiled in.
pub const CPU_HAS_AVX: bool =
    cfg!(all(target_arch = "x86_64", feature = "simd", target_feature = "avx"));

// ── Operation traits ────────────────────────────────────────────────

/// Element-wise arithmetic shared by every vector and matrix type.
///
/// This is the seam the generic free functions ([`crate::add`],
/// [`crate::scale`], ...) are written against.
pub trait Elementwise<T>: Copy {
    fn add(&self, rhs: &Self) -> Self;
    fn sub(&self, rhs: &Self) -> Self;
    /// `scale * self`.
    fn scale(&self, scale: T) -> Self;
    /// Element-wise product.
    fn hadamard(&self, rhs: &Self) -> Self;
}

/// Vector-only operations: inner product, norms, interpolation.
pub trait InnerSpace<T>: Elementwise<T> {
    fn dot(&self, rhs: &Self) -> T;
    fn square_norm(&self) -> T;
    fn norm(&self) -> T;
    fn normalize_in_place(&mut self);
    /// `(1 - alpha) * self + alpha * rhs`. `alpha` outside `[0, 1]` extrapolates.
    fn lerp(&self, rhs: &Self, alpha: T) -> Self;

    #[inline]
    fn normalize(&self) -> Self {
        let mut out = *self;
        out.normalize_in_place();
        out
    }
}

/// Square-matrix operations.
pub trait SquareMatrix<T>: Elementwise<T> {
    /// Column vector type (`Vector2`, `Vector3`, `Vector4`).
    type Column;

    fn transpose(&self) -> Self;
    fn transpose_in_place(&mut self);
    fn trace(&self) -> T;
    fn determinant(&self) -> T;
    /// Closed-form inverse. Singular input yields non-finite entries.
    fn inverse(&self) -> Self;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_predicates() {
        assert!(is_float32::<f32>());
        assert!(!is_float32::<f64>());
        assert!(is_float64::<f64>());
        assert!(is_scalar::<f32>());
        assert!(is_scalar::<f64>());
        assert!(!is_scalar::<i32>());
    }

    #[test]
    fn eps_converts() {
        assert_eq!(<f64 as FloatScalar>::eps(), 1e-6);
        assert!((<f32 as FloatScalar>::eps() - 1e-6_f32).abs() < f32::EPSILON);
        assert_eq!(<f64 as FloatScalar>::lit(0.5), 0.5);
    }

    #[test]
    fn avx_implies_sse() {
        if CPU_HAS_AVX {
            assert!(CPU_HAS_SSE);
        }
    }
}
