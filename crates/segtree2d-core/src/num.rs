//! Number types for cells, deltas, and sums

use std::fmt;
use std::ops::AddAssign;

/// Exact additive number type
///
/// Grid cells, deltas, and all aggregate sums share this type. The update and
/// query algorithms only ever add values and multiply them by exact
/// non-negative cell counts via [`Self::scale()`]. There is no division, hence
/// no rounding: results are bit-exact.
///
/// The implementations for the primitive integer types use plain arithmetic.
/// Overflow is a numeric-range contract of the caller: choose a type that can
/// hold at least `max|delta| × height × width × update_count`. (Debug builds
/// panic on overflow as usual.) With the `bigint` feature, `BigInt` never
/// overflows.
pub trait Value: Clone + PartialEq + fmt::Debug + for<'a> AddAssign<&'a Self> {
    /// The additive identity
    fn zero() -> Self;

    /// `true` iff `self` is the additive identity
    ///
    /// Used to skip pushing down empty lazy values.
    fn is_zero(&self) -> bool;

    /// Multiply `self` by the exact count `factor`
    fn scale(&self, factor: usize) -> Self;
}

macro_rules! impl_value_primitive {
    ($($t:ty),*) => {
        $(
            impl Value for $t {
                #[inline]
                fn zero() -> Self {
                    0
                }
                #[inline]
                fn is_zero(&self) -> bool {
                    *self == 0
                }
                #[inline]
                fn scale(&self, factor: usize) -> Self {
                    *self * factor as $t
                }
            }
        )*
    };
}

impl_value_primitive!(i32, i64, i128);

#[cfg(feature = "bigint")]
impl Value for num_bigint::BigInt {
    #[inline]
    fn zero() -> Self {
        num_bigint::BigInt::default()
    }
    #[inline]
    fn is_zero(&self) -> bool {
        self.sign() == num_bigint::Sign::NoSign
    }
    #[inline]
    fn scale(&self, factor: usize) -> Self {
        self * num_bigint::BigInt::from(factor)
    }
}
