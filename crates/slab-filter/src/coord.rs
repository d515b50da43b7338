// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Lossless conversion of input coordinates to `f64`.
//!
//! The fast path's error bound assumes every `f64` it starts from equals the
//! true input value. A coordinate that cannot be held exactly (a rational such
//! as `1/3`, an `i64` beyond 2^53, a non-finite float) voids that assumption,
//! so [`Coordinate::fit_in_f64`] returns `None` and the query is delegated.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{ToPrimitive, Zero};

/// A coordinate value that may or may not be exactly representable as `f64`.
pub trait Coordinate {
    /// Returns the value as an `f64` if and only if the conversion is exact
    /// and the result is finite.
    fn fit_in_f64(&self) -> Option<f64>;

    /// Returns `false` for infinities and NaN. Only floating-point types can
    /// hold such values.
    fn is_finite(&self) -> bool {
        true
    }
}

impl Coordinate for f64 {
    #[inline]
    fn fit_in_f64(&self) -> Option<f64> {
        f64::is_finite(*self).then_some(*self)
    }

    #[inline]
    fn is_finite(&self) -> bool {
        f64::is_finite(*self)
    }
}

impl Coordinate for f32 {
    #[inline]
    fn fit_in_f64(&self) -> Option<f64> {
        f32::is_finite(*self).then(|| f64::from(*self))
    }

    #[inline]
    fn is_finite(&self) -> bool {
        f32::is_finite(*self)
    }
}

impl Coordinate for i32 {
    #[inline]
    fn fit_in_f64(&self) -> Option<f64> {
        Some(f64::from(*self))
    }
}

impl Coordinate for i64 {
    #[inline]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    fn fit_in_f64(&self) -> Option<f64> {
        let approx = *self as f64;
        // Compare in i128: `i64::MAX as f64` is 2^63, which saturates back to
        // i64::MAX and would otherwise pass the round trip.
        (approx as i128 == i128::from(*self)).then_some(approx)
    }
}

impl Coordinate for BigInt {
    fn fit_in_f64(&self) -> Option<f64> {
        let approx = self.to_f64().filter(|v| v.is_finite())?;
        let back = BigRational::from_float(approx)?;
        let exact = BigRational::from_integer(self.clone());
        (back == exact).then_some(approx)
    }
}

impl Coordinate for BigRational {
    fn fit_in_f64(&self) -> Option<f64> {
        if self.is_zero() {
            return Some(0.0);
        }
        let approx = self.to_f64().filter(|v| v.is_finite())?;
        let back = BigRational::from_float(approx)?;
        (back == *self).then_some(approx)
    }
}

impl<C: Coordinate + ?Sized> Coordinate for &C {
    #[inline]
    fn fit_in_f64(&self) -> Option<f64> {
        (**self).fit_in_f64()
    }

    #[inline]
    fn is_finite(&self) -> bool {
        (**self).is_finite()
    }
}
