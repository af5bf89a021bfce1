//! # smallmat
//!
//! Fixed-size 2, 3 and 4 dimensional vectors and square matrices over `f32`
//! and `f64`, with SSE/AVX kernels selected at compile time. No heap
//! allocation, no runtime CPU detection, `no_std` compatible.
//!
//! ## Quick start
//!
//! ```
//! use smallmat::{Matrix3, Vector3};
//!
//! let a = Matrix3::new([
//!     [2.0_f64, -3.0, 1.0],
//!     [2.0, 0.0, -1.0],
//!     [1.0, 4.0, 5.0],
//! ]);
//! assert!((a.determinant() - 49.0).abs() < 1e-12);
//! assert_eq!(a * a.inverse(), Matrix3::identity());
//!
//! let x = Vector3::new(1.0, 0.0, 0.0);
//! assert_eq!(a * x, a.col(0));
//! ```
//!
//! ## Layout
//!
//! Matrices are stored column-major (`data[col][row]`), but constructors
//! taking a nested array read it row by row, so the source looks like the
//! matrix. `m[j]` is column `j` as a vector and `m[(i, j)]` is the entry in
//! row `i`, column `j`.
//!
//! [`Vector3`] and the columns of [`Matrix3`] occupy four lanes. The fourth is
//! padding: zero after construction, never written by a kernel, never part
//! of a result.
//!
//! Types are aligned to their element type, not to a SIMD register. Every
//! kernel uses unaligned loads and stores, so values can live anywhere.
//!
//! ## Equality
//!
//! `==` on every vector, matrix and quaternion is approximate: two values
//! are equal when every logical entry differs by less than [`EPS`].
//!
//! ## Modules
//!
//! - [`vector`]: [`Vector2`], [`Vector3`], [`Vector4`].
//! - [`matrix`]: [`Matrix2`], [`Matrix3`], [`Matrix4`], including rotation,
//!   scale and projection factories.
//! - [`quaternion`]: scalar-first [`Quaternion`] on the Vector4 kernels.
//! - [`pose`]: [`Pose3d`], a rigid transform as position plus orientation.
//! - [`functions`]: generic free functions ([`dot`], [`cross`], [`inverse`], ...).
//! - [`traits`]: element traits and the operation traits behind the free functions.
//! - [`error`]: [`MathError`] for the checked constructors and [`try_inverse`](Matrix2::try_inverse).
//!
//! ## Cargo features
//!
//! | Feature | Default  | Description |
//! |---------|----------|-------------|
//! | `std`   | yes      | Hardware FPU via system libm; `std::error::Error` for [`MathError`] |
//! | `libm`  | baseline | Pure-Rust software float fallback |
//! | `simd`  | yes      | SSE kernels on x86_64, AVX kernels with `target_feature = "avx"` |
//!
//! [`Backend::of`] reports the kernel tier a build selected for an element type.
//!
//! ## Testing the kernel tiers
//!
//! The tier is fixed at compile time, so each one needs its own test run:
//!
//! ```text
//! cargo test                                               # SSE2
//! RUSTFLAGS="-C target-feature=+sse4.1" cargo test         # SSE4.1 dot products
//! RUSTFLAGS="-C target-feature=+avx,+sse4.1" cargo test    # AVX
//! cargo test --no-default-features --features std          # scalar only
//! ```
//!
//! The in-crate kernel tests compare every dispatched kernel against the
//! scalar reference for whichever tier the build selected.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod error;
pub mod functions;
pub mod matrix;
pub mod pose;
pub mod quaternion;
mod simd;
pub mod traits;
pub mod vector;

pub use error::MathError;
pub use functions::{
    add, cross, determinant, dot, hadamard, inverse, lerp, norm, normalize, normalize_in_place,
    scale, square_norm, sub, trace, transpose, transpose_in_place,
};
pub use matrix::{Matrix2, Matrix3, Matrix4};
pub use pose::Pose3d;
pub use quaternion::Quaternion;
pub use simd::Backend;
pub use traits::{
    is_float32, is_float64, is_scalar, Elementwise, FloatScalar, InnerSpace, Scalar,
    SquareMatrix, CPU_HAS_AVX, CPU_HAS_SSE, EPS,
};
pub use vector::{Vector2, Vector3, Vector4};
