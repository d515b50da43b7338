// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Symbolic error propagation under the standard rounding model.
//!
//! Every operation rounds its exact result to nearest, adding at most half an
//! ulp of the result's magnitude bound. Bounds and errors are scaled so that
//! inputs have magnitude at most one: a value of degree `k` computed from
//! inputs bounded by `m` then has true error at most `error * m^k`.

use core::ops::{Add, Mul, Neg, Sub};

use tracing::warn;

use crate::error::AnalyzeError;
use crate::rounding::{add_up, mul_up, ulp};

/// Magnitude bound, absolute error bound and degree of an `f64` expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticFilterError {
    bound: f64,
    error: f64,
    degree: u32,
}

impl StaticFilterError {
    /// An exact degree-1 input whose magnitude is at most `bound`.
    #[must_use]
    pub const fn input(bound: f64) -> Self {
        Self::new(bound, 0.0, 1)
    }

    /// A value with explicit bound, error and degree.
    #[must_use]
    pub const fn new(bound: f64, error: f64, degree: u32) -> Self {
        Self {
            bound,
            error,
            degree,
        }
    }

    /// Upper bound on the computed value's magnitude.
    #[must_use]
    pub const fn bound(&self) -> f64 {
        self.bound
    }

    /// Upper bound on the absolute rounding error.
    #[must_use]
    pub const fn error(&self) -> f64 {
        self.error
    }

    /// Polynomial degree of the expression in its inputs.
    #[must_use]
    pub const fn degree(&self) -> u32 {
        self.degree
    }

    /// Sum of two expressions of equal degree.
    pub fn try_add(self, rhs: Self) -> Result<Self, AnalyzeError> {
        if self.degree != rhs.degree {
            return Err(AnalyzeError::DegreeMismatch {
                left: self.degree,
                right: rhs.degree,
            });
        }
        Ok(self.sum_unchecked(rhs))
    }

    /// Difference of two expressions of equal degree; bounds the same as a sum.
    pub fn try_sub(self, rhs: Self) -> Result<Self, AnalyzeError> {
        self.try_add(rhs)
    }

    fn product(self, rhs: Self) -> Self {
        let exact = mul_up(self.bound, rhs.bound);
        let rounding = ulp(exact) / 2.0;
        // (x + ex)(y + ey) - xy = x ey + y ex + ex ey
        let propagated = add_up(
            add_up(
                mul_up(self.error, rhs.error),
                mul_up(self.error, rhs.bound),
            ),
            mul_up(self.bound, rhs.error),
        );
        Self {
            bound: add_up(exact, rounding),
            error: add_up(rounding, propagated),
            degree: self.degree + rhs.degree,
        }
    }

    fn sum_unchecked(self, rhs: Self) -> Self {
        let exact = add_up(self.bound, rhs.bound);
        let rounding = ulp(exact) / 2.0;
        Self {
            bound: add_up(exact, rounding),
            error: add_up(add_up(rounding, self.error), rhs.error),
            degree: self.degree.max(rhs.degree),
        }
    }
}

impl Add for StaticFilterError {
    type Output = Self;

    /// Mixed degrees are not homogeneous; the sum keeps the larger degree and
    /// logs a warning. Use [`StaticFilterError::try_add`] to reject them.
    fn add(self, rhs: Self) -> Self {
        if self.degree != rhs.degree {
            warn!(
                left = self.degree,
                right = rhs.degree,
                "adding expressions of different degree"
            );
        }
        self.sum_unchecked(rhs)
    }
}

impl Sub for StaticFilterError {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.add(rhs)
    }
}

impl Neg for StaticFilterError {
    type Output = Self;

    fn neg(self) -> Self {
        self
    }
}

impl Mul for StaticFilterError {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.product(rhs)
    }
}
