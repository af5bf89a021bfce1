mod ops;

use core::fmt;
use core::ops::{Index, IndexMut};

use crate::error::{check_len, MathError};
use crate::simd::{Vec2Buf, Vec3Buf, Vec4Buf};
use crate::traits::Scalar;

/// 2-dimensional vector.
///
/// ```
/// use smallmat::Vector2;
///
/// let v = Vector2::new(3.0_f32, 4.0);
/// assert_eq!(v.norm(), 5.0);
/// assert_eq!(v[1], 4.0);
/// ```
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct Vector2<T> {
    pub(crate) data: Vec2Buf<T>,
}

/// 3-dimensional vector, stored in four lanes.
///
/// The fourth lane is padding so that the whole vector loads as one SIMD
/// register. It is zero after construction and no operation writes it or
/// lets it reach a result. Indexing, [`as_slice`](Self::as_slice), `Debug`,
/// `Display` and `==` only see `x`, `y`, `z`; [`elements`](Self::elements)
/// exposes the raw buffer.
///
/// ```
/// use smallmat::Vector3;
///
/// let i = Vector3::new(1.0_f64, 0.0, 0.0);
/// let j = Vector3::new(0.0, 1.0, 0.0);
/// assert_eq!(i.cross(&j), Vector3::new(0.0, 0.0, 1.0));
/// assert_eq!(i.elements().len(), 4);
/// ```
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct Vector3<T> {
    pub(crate) data: Vec3Buf<T>,
}

/// 4-dimensional vector.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct Vector4<T> {
    pub(crate) data: Vec4Buf<T>,
}

// ── Type-specific constructors ──────────────────────────────────────

impl<T: Scalar> Vector2<T> {
    #[inline]
    pub fn new(x: T, y: T) -> Self {
        Self { data: [x, y] }
    }

    #[inline]
    pub fn from_array(values: [T; 2]) -> Self {
        Self { data: values }
    }
}

impl<T: Scalar> Vector3<T> {
    #[inline]
    pub fn new(x: T, y: T, z: T) -> Self {
        Self {
            data: [x, y, z, T::zero()],
        }
    }

    #[inline]
    pub fn from_array(values: [T; 3]) -> Self {
        Self::new(values[0], values[1], values[2])
    }

    /// `(x, y, y)`: the second value fills both `y` and `z`.
    #[inline]
    pub fn from_xy(x: T, y: T) -> Self {
        Self::new(x, y, y)
    }
}

impl<T: Scalar> Vector4<T> {
    #[inline]
    pub fn new(x: T, y: T, z: T, w: T) -> Self {
        Self { data: [x, y, z, w] }
    }

    #[inline]
    pub fn from_array(values: [T; 4]) -> Self {
        Self { data: values }
    }

    /// Extend a 3-vector with a `w` component.
    #[inline]
    pub fn from_vec3(v: Vector3<T>, w: T) -> Self {
        Self::new(v.data[0], v.data[1], v.data[2], w)
    }
}

impl<T: Scalar> From<Vector4<T>> for Vector3<T> {
    /// Drops `w`.
    #[inline]
    fn from(v: Vector4<T>) -> Self {
        Self::new(v.data[0], v.data[1], v.data[2])
    }
}

// ── Shared surface ──────────────────────────────────────────────────

macro_rules! vector_common {
    ($V:ident, $n:literal, $lanes:literal; $($axis:ident => $idx:literal),*) => {
        impl<T: Scalar> $V<T> {
            /// Every logical lane set to `value`.
            #[inline]
            pub fn splat(value: T) -> Self {
                Self::from_array([value; $n])
            }

            #[inline]
            pub fn zeros() -> Self {
                Self::splat(T::zero())
            }

            /// Checked construction from a runtime slice of exactly the logical length.
            pub fn from_slice(values: &[T]) -> Result<Self, MathError> {
                check_len($n, values.len())?;
                let mut out = Self::zeros();
                out.data[..$n].copy_from_slice(values);
                Ok(out)
            }

            #[inline]
            pub fn to_array(&self) -> [T; $n] {
                core::array::from_fn(|i| self.data[i])
            }

            $(
                #[inline]
                pub fn $axis(&self) -> T {
                    self.data[$idx]
                }
            )*
        }

        impl<T> $V<T> {
            /// Number of logical lanes.
            #[inline]
            pub const fn len(&self) -> usize {
                $n
            }

            #[inline]
            pub const fn is_empty(&self) -> bool {
                false
            }

            /// Logical lanes.
            #[inline]
            pub fn as_slice(&self) -> &[T] {
                &self.data[..$n]
            }

            #[inline]
            pub fn as_mut_slice(&mut self) -> &mut [T] {
                &mut self.data[..$n]
            }

            /// Full storage buffer, padding included.
            #[inline]
            pub fn elements(&self) -> &[T; $lanes] {
                &self.data
            }

            #[inline]
            pub fn elements_mut(&mut self) -> &mut [T; $lanes] {
                &mut self.data
            }

            #[inline]
            pub fn as_ptr(&self) -> *const T {
                self.data.as_ptr()
            }

            #[inline]
            pub fn as_mut_ptr(&mut self) -> *mut T {
                self.data.as_mut_ptr()
            }
        }

        impl<T: Scalar> Default for $V<T> {
            fn default() -> Self {
                Self::zeros()
            }
        }

        impl<T: Scalar> From<[T; $n]> for $V<T> {
            #[inline]
            fn from(values: [T; $n]) -> Self {
                Self::from_array(values)
            }
        }

        impl<T: Scalar> From<$V<T>> for [T; $n] {
            #[inline]
            fn from(v: $V<T>) -> Self {
                v.to_array()
            }
        }

        impl<T> Index<usize> for $V<T> {
            type Output = T;

            #[inline]
            fn index(&self, i: usize) -> &T {
                &self.data[..$n][i]
            }
        }

        impl<T> IndexMut<usize> for $V<T> {
            #[inline]
            fn index_mut(&mut self, i: usize) -> &mut T {
                &mut self.data[..$n][i]
            }
        }

        impl<T: fmt::Debug> fmt::Debug for $V<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let mut t = f.debug_tuple(stringify!($V));
                for x in &self.data[..$n] {
                    t.field(x);
                }
                t.finish()
            }
        }

        impl<T: fmt::Display> fmt::Display for $V<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "(")?;
                for (i, x) in self.data[..$n].iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    fmt::Display::fmt(x, f)?;
                }
                write!(f, ")")
            }
        }
    };
}

vector_common!(Vector2, 2, 2; x => 0, y => 1);
vector_common!(Vector3, 3, 4; x => 0, y => 1, z => 2);
vector_common!(Vector4, 4, 4; x => 0, y => 1, z => 2, w => 3);
