//! # Traits
//!
//! The lists and tableaus of this crate are generic over the scalar they store. Besides the usual
//! arithmetic, the sparse merge algorithms need to decide whether a computed value should be
//! stored at all. That decision is made by the `NonZero` trait, which is where a caller plugs in
//! the notion of "zero" of its number type (exact for integers, tolerance based for floats).
use std::fmt::{Debug, Display};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, MulAssign};

use num_traits::{One, Zero};

use crate::data::linear_algebra::{F32_EPSILON, F64_EPSILON};

/// Whether a value should be considered different from the additive identity.
///
/// Values for which this returns `false` are elided from sparse merge results.
pub trait NonZero {
    /// Whether the value is (numerically) not zero.
    fn is_not_zero(&self) -> bool;
}

macro_rules! exact_non_zero {
    ($($t:ty),*) => {
        $(
        impl NonZero for $t {
            #[inline]
            fn is_not_zero(&self) -> bool {
                *self != 0
            }
        }
        )*
    }
}
exact_non_zero!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl NonZero for f32 {
    #[inline]
    fn is_not_zero(&self) -> bool {
        self.abs() >= F32_EPSILON
    }
}

impl NonZero for f64 {
    #[inline]
    fn is_not_zero(&self) -> bool {
        self.abs() >= F64_EPSILON
    }
}

/// Scalars that can be stored in a `List`.
///
/// Automatically implemented for all types satisfying the trait's bounds.
pub trait Scalar:
    Copy +
    Send +
    Sync +
    Debug +
    Display +
    PartialOrd +
    Zero +
    One +
    Add<Output=Self> +
    Mul<Output=Self> +
    AddAssign +
    MulAssign +
    Sum +
    NonZero +
{
}
impl<T> Scalar for T
where
    T: Copy + Send + Sync + Debug + Display + PartialOrd + Zero + One + Add<Output=T> + Mul<Output=T>
        + AddAssign + MulAssign + Sum + NonZero,
{
}
