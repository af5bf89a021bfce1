use core::fmt;

use super::{Matrix2, Matrix3, Matrix4};
use crate::traits::Scalar;
use crate::vector::{Vector2, Vector3, Vector4};

macro_rules! matrix_util {
    ($M:ident, $Vec:ident, $n:literal) => {
        impl<T: Scalar> $M<T> {
            /// Overwrite row `i`.
            ///
            /// ```
            #[doc = concat!("use smallmat::{", stringify!($M), ", ", stringify!($Vec), "};")]
            #[doc = concat!("let mut m = ", stringify!($M), "::<f64>::zeros();")]
            #[doc = concat!("m.set_row(0, &", stringify!($Vec), "::splat(1.0));")]
            /// assert_eq!(m[(0, 1)], 1.0);
            /// assert_eq!(m[(1, 0)], 0.0);
            /// ```
            pub fn set_row(&mut self, i: usize, v: &$Vec<T>) {
                for (col, x) in self.data.iter_mut().zip(v.as_slice()) {
                    col[..$n][i] = *x;
                }
            }

            /// Overwrite column `j`. Column padding is left as is.
            pub fn set_col(&mut self, j: usize, v: &$Vec<T>) {
                self.data[j][..$n].copy_from_slice(v.as_slice());
            }

            pub fn swap_rows(&mut self, a: usize, b: usize) {
                for col in self.data.iter_mut() {
                    col[..$n].swap(a, b);
                }
            }
        }

        // Row by row, columns right-aligned.
        impl<T: fmt::Display> fmt::Display for $M<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let precision = f.precision();
                let mut widths = [0usize; $n];
                for (j, col) in self.data.iter().enumerate() {
                    for x in &col[..$n] {
                        let w = WriteCounting::count(|wc| write_entry(wc, x, precision, 0));
                        widths[j] = widths[j].max(w);
                    }
                }

                for i in 0..$n {
                    write!(f, "│")?;
                    for j in 0..$n {
                        if j > 0 {
                            write!(f, "  ")?;
                        }
                        write_entry(f, &self.data[j][i], precision, widths[j])?;
                    }
                    write!(f, "│")?;
                    if i < $n - 1 {
                        writeln!(f)?;
                    }
                }
                Ok(())
            }
        }

        // Rows of logical entries; padding never shows.
        impl<T: fmt::Debug> fmt::Debug for $M<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let mut t = f.debug_tuple(stringify!($M));
                for i in 0..$n {
                    let row: [&T; $n] = core::array::from_fn(|j| &self.data[j][i]);
                    t.field(&row);
                }
                t.finish()
            }
        }
    };
}

matrix_util!(Matrix2, Vector2, 2);
matrix_util!(Matrix3, Vector3, 3);
matrix_util!(Matrix4, Vector4, 4);

fn write_entry<W: fmt::Write, T: fmt::Display>(
    w: &mut W,
    x: &T,
    precision: Option<usize>,
    width: usize,
) -> fmt::Result {
    match precision {
        Some(p) => write!(w, "{:>width$.p$}", x, width = width, p = p),
        None => write!(w, "{:>width$}", x, width = width),
    }
}

/// Helper to count characters written, without allocating.
struct WriteCounting {
    count: usize,
}

impl WriteCounting {
    fn count(f: impl FnOnce(&mut Self) -> fmt::Result) -> usize {
        let mut wc = WriteCounting { count: 0 };
        let _ = f(&mut wc);
        wc.count
    }
}

impl fmt::Write for WriteCounting {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.count += s.chars().count();
        Ok(())
    }
}
