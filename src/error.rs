/// Errors from the checked constructors and [`try_inverse`](crate::Matrix3::try_inverse).
///
/// The arithmetic itself never fails: a zero-length `normalize` or the
/// unchecked `inverse` of a singular matrix produce NaN/Inf instead.
///
/// ```
/// use smallmat::{MathError, Matrix2, Vector3};
///
/// let singular = Matrix2::new([[1.0_f64, 2.0], [2.0, 4.0]]);
/// assert_eq!(singular.try_inverse().unwrap_err(), MathError::Singular);
///
/// let err = Vector3::<f64>::from_slice(&[1.0, 2.0]).unwrap_err();
/// assert_eq!(err, MathError::DimensionMismatch { expected: 3, got: 2 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    /// `|det| < EPS`.
    Singular,
    /// A runtime slice did not have the element count of the target type.
    DimensionMismatch { expected: usize, got: usize },
}

impl core::fmt::Display for MathError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MathError::Singular => write!(f, "matrix is singular"),
            MathError::DimensionMismatch { expected, got } => {
                write!(f, "dimension mismatch: expected {} elements, got {}", expected, got)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MathError {}

/// Length check shared by every `from_slice`-style constructor.
#[inline]
pub(crate) fn check_len(expected: usize, got: usize) -> Result<(), MathError> {
    if expected == got {
        Ok(())
    } else {
        Err(MathError::DimensionMismatch { expected, got })
    }
}
