mod ops;
mod square;
mod transform;
mod util;

use core::ops::{Index, IndexMut};

use crate::error::{check_len, MathError};
use crate::simd::{Mat2Buf, Mat3Buf, Mat4Buf};
use crate::traits::Scalar;
use crate::vector::{Vector2, Vector3, Vector4};

/// 2×2 matrix.
///
/// Storage is column-major: `data[col][row]`. Constructors that take a
/// nested array read it row by row, so source code looks like the matrix.
///
/// ```
/// use smallmat::{Matrix2, Vector2};
///
/// let m = Matrix2::new([[1.0_f64, 2.0], [3.0, 4.0]]);
/// assert_eq!(m[(0, 1)], 2.0);
/// assert_eq!(m[1], Vector2::new(2.0, 4.0)); // column 1
/// assert_eq!(m.determinant(), -2.0);
/// ```
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct Matrix2<T> {
    pub(crate) data: Mat2Buf<T>,
}

/// 3×3 matrix.
///
/// Three columns of four lanes each: every column has the padded layout of
/// [`Vector3`], so `m[j]` is a `&Vector3` without copying.
///
/// ```
/// use smallmat::{Matrix3, Vector3};
///
/// let a = Matrix3::new([[-10.0_f64, -10.0, -2.0], [-8.0, -8.0, 1.0], [5.0, -7.0, -3.0]]);
/// let b = Matrix3::new([[-1.0, -1.0, 8.0], [6.0, 6.0, 0.0], [-8.0, 2.0, -9.0]]);
/// let c = Matrix3::new([[-34.0, -54.0, -62.0], [-48.0, -38.0, -73.0], [-23.0, -53.0, 67.0]]);
/// assert_eq!(a * b, c);
/// assert_eq!(a * Vector3::new(1.0, 0.0, 0.0), a.col(0));
/// ```
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct Matrix3<T> {
    pub(crate) data: Mat3Buf<T>,
}

/// 4×4 matrix, typically a homogeneous transform.
///
/// ```
/// use smallmat::{Matrix4, Vector4};
///
/// let m = Matrix4::from_diagonal(Vector4::new(1.0_f32, 2.0, 3.0, 4.0));
/// assert_eq!(m.determinant(), 24.0);
/// assert_eq!(m.trace(), 10.0);
/// ```
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct Matrix4<T> {
    pub(crate) data: Mat4Buf<T>,
}

macro_rules! matrix_common {
    ($M:ident, $Vec:ident, $n:literal, $lanes:literal) => {
        impl<T: Scalar> $M<T> {
            /// Create a matrix from a row-major 2D array.
            ///
            /// Internally transposed to column-major storage.
            pub fn new(rows: [[T; $n]; $n]) -> Self {
                let mut out = Self::zeros();
                for (r, row) in rows.iter().enumerate() {
                    for (c, x) in row.iter().enumerate() {
                        out.data[c][r] = *x;
                    }
                }
                out
            }

            #[inline]
            pub fn zeros() -> Self {
                Self {
                    data: [[T::zero(); $lanes]; $n],
                }
            }

            pub fn identity() -> Self {
                let mut m = Self::zeros();
                for i in 0..$n {
                    m.data[i][i] = T::one();
                }
                m
            }

            #[inline]
            pub fn from_columns(cols: [$Vec<T>; $n]) -> Self {
                Self {
                    data: cols.map(|c| c.data),
                }
            }

            /// Diagonal matrix with `diag` on the main diagonal.
            pub fn from_diagonal(diag: $Vec<T>) -> Self {
                let mut m = Self::zeros();
                for i in 0..$n {
                    m.data[i][i] = diag.data[i];
                }
                m
            }

            /// Checked construction from a row-major slice of `N * N` entries.
            pub fn from_row_slice(values: &[T]) -> Result<Self, MathError> {
                check_len($n * $n, values.len())?;
                let mut m = Self::zeros();
                for (k, x) in values.iter().enumerate() {
                    m.data[k % $n][k / $n] = *x;
                }
                Ok(m)
            }

            /// Checked construction from a column-major slice of `N * N` entries.
            pub fn from_col_slice(values: &[T]) -> Result<Self, MathError> {
                check_len($n * $n, values.len())?;
                let mut m = Self::zeros();
                for (col, chunk) in m.data.iter_mut().zip(values.chunks_exact($n)) {
                    col[..$n].copy_from_slice(chunk);
                }
                Ok(m)
            }

            /// Column `j` by value.
            #[inline]
            pub fn col(&self, j: usize) -> $Vec<T> {
                $Vec { data: self.data[j] }
            }

            /// Row `i` by value.
            #[inline]
            pub fn row(&self, i: usize) -> $Vec<T> {
                $Vec::from_array(core::array::from_fn(|j| self.data[j][i]))
            }
        }

        impl<T> $M<T> {
            /// Column-major storage buffer, padding included.
            #[inline]
            pub fn elements(&self) -> &[[T; $lanes]; $n] {
                &self.data
            }

            #[inline]
            pub fn elements_mut(&mut self) -> &mut [[T; $lanes]; $n] {
                &mut self.data
            }

            /// Pointer to the first entry of column 0.
            #[inline]
            pub fn as_ptr(&self) -> *const T {
                self.data.as_ptr() as *const T
            }

            #[inline]
            pub fn as_mut_ptr(&mut self) -> *mut T {
                self.data.as_mut_ptr() as *mut T
            }
        }

        impl<T: Scalar> Default for $M<T> {
            fn default() -> Self {
                Self::zeros()
            }
        }

        // Index by column
        impl<T> Index<usize> for $M<T> {
            type Output = $Vec<T>;

            #[inline]
            fn index(&self, j: usize) -> &$Vec<T> {
                let col = &self.data[j];
                // SAFETY: the vector type is `repr(transparent)` over the column buffer.
                unsafe { &*(col as *const [T; $lanes] as *const $Vec<T>) }
            }
        }

        impl<T> IndexMut<usize> for $M<T> {
            #[inline]
            fn index_mut(&mut self, j: usize) -> &mut $Vec<T> {
                let col = &mut self.data[j];
                // SAFETY: as above.
                unsafe { &mut *(col as *mut [T; $lanes] as *mut $Vec<T>) }
            }
        }

        // Index by (row, col) tuple
        impl<T> Index<(usize, usize)> for $M<T> {
            type Output = T;

            #[inline]
            fn index(&self, (row, col): (usize, usize)) -> &T {
                &self.data[col][..$n][row]
            }
        }

        impl<T> IndexMut<(usize, usize)> for $M<T> {
            #[inline]
            fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
                &mut self.data[col][..$n][row]
            }
        }
    };
}

matrix_common!(Matrix2, Vector2, 2, 2);
matrix_common!(Matrix3, Vector3, 3, 4);
matrix_common!(Matrix4, Vector4, 4, 4);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_major_constructor_is_transposed() {
        let m = Matrix3::new([[1, 2, 3], [4, 5, 6], [7, 8, 9]]);
        assert_eq!(m.elements(), &[[1, 4, 7, 0], [2, 5, 8, 0], [3, 6, 9, 0]]);
        for r in 0..3 {
            for c in 0..3 {
                assert_eq!(m[(r, c)], m[c][r]);
            }
        }
        assert_eq!(m.row(1).to_array(), [4, 5, 6]);
        assert_eq!(m.col(1).to_array(), [2, 5, 8]);
    }

    #[test]
    fn slices() {
        let values = [1.0_f64, 2.0, 3.0, 4.0];
        let by_rows = Matrix2::from_row_slice(&values).map(|m| m.data);
        assert_eq!(by_rows, Ok([[1.0, 3.0], [2.0, 4.0]]));
        let by_cols = Matrix2::from_col_slice(&values).map(|m| m.data);
        assert_eq!(by_cols, Ok([[1.0, 2.0], [3.0, 4.0]]));
        assert_eq!(
            Matrix3::<f64>::from_row_slice(&values).map(|m| m.data),
            Err(MathError::DimensionMismatch { expected: 9, got: 4 })
        );
        let m3 = Matrix3::from_col_slice(&[1, 2, 3, 4, 5, 6, 7, 8, 9]).map(|m| m.data);
        assert_eq!(m3, Ok([[1, 2, 3, 0], [4, 5, 6, 0], [7, 8, 9, 0]]));
    }

    #[test]
    fn column_index_aliases_storage() {
        let mut m = Matrix4::<i32>::identity();
        m[2][0] = 5;
        assert_eq!(m[(0, 2)], 5);
        m[(3, 1)] = 7;
        assert_eq!(m.col(1).to_array(), [0, 1, 0, 7]);
    }

    #[test]
    #[should_panic]
    fn matrix3_row_index_three_panics() {
        let m = Matrix3::<f64>::identity();
        let _ = m[(3, 0)];
    }

    #[test]
    fn storage_layout() {
        use core::mem::{align_of, size_of};

        // Element alignment only; kernels use unaligned loads and stores.
        assert_eq!(align_of::<Vector4<f32>>(), align_of::<f32>());
        assert_eq!(align_of::<Vector4<f64>>(), align_of::<f64>());
        assert_eq!(align_of::<Matrix4<f64>>(), align_of::<f64>());
        assert_eq!(align_of::<Matrix3<f32>>(), align_of::<f32>());

        assert_eq!(size_of::<Vector2<f32>>(), 8);
        assert_eq!(size_of::<Vector3<f32>>(), 16);
        assert_eq!(size_of::<Vector3<f64>>(), 32);
        assert_eq!(size_of::<Matrix2<f64>>(), 32);
        assert_eq!(size_of::<Matrix3<f32>>(), 48);
        assert_eq!(size_of::<Matrix3<f64>>(), 96);
        assert_eq!(size_of::<Matrix4<f32>>(), 64);

        // A column borrowed through `Index<usize>` aliases the matrix storage.
        let m = Matrix3::<f64>::identity();
        let col: *const Vector3<f64> = &m[1];
        let base = m.elements().as_ptr() as *const u8;
        assert_eq!(col as *const u8, base.wrapping_add(size_of::<Vector3<f64>>()));
    }

    #[test]
    fn columns_and_diagonal() {
        let m = Matrix3::from_columns([Vector3::new(1, 2, 3), Vector3::new(4, 5, 6), Vector3::new(7, 8, 9)]);
        assert_eq!(m.row(0).to_array(), [1, 4, 7]);
        let d = Matrix2::from_diagonal(Vector2::new(2, 3));
        assert_eq!(d.elements(), &[[2, 0], [0, 3]]);
    }
}
