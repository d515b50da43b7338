// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Derivation of the slab fast path's certified constants.
//!
//! The fast path compares differences of products of input differences, so
//! its worst expression is `(a - b) * (c - d) - (e - f) * (g - h)` (degree 2).
//! Degree-1 comparisons are `(a - b) - (c - d)`. The runtime also rounds the
//! error term `EPS * m * m` itself; the published factor absorbs that with a
//! `(1 + 2u)` correction.

use serde::Serialize;
use tracing::debug;

use crate::error::AnalyzeError;
use crate::rounding::{add_up, mul_up, ulp};
use crate::symbolic::StaticFilterError;

/// Error bound of one named expression shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExpressionBound {
    /// The expression, written over distinct inputs.
    pub name: &'static str,
    /// Polynomial degree.
    pub degree: u32,
    /// Error factor before any correction.
    pub error: f64,
}

/// The constants the fast path relies on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FilterBounds {
    /// Error factor for degree-2 comparisons.
    pub eps: f64,
    /// Error factor for degree-1 comparisons.
    pub degree1_eps: f64,
    /// Smallest `m` for which `eps * m` stays normal.
    pub underflow_degree1: f64,
    /// Smallest `m` for which `eps * m * m` stays normal.
    pub underflow_degree2: f64,
    /// Largest `m` for which `a * b - c * d` cannot overflow.
    pub overflow_degree2: f64,
}

/// Rounding direction for [`round_decimal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward +∞.
    Up,
    /// Toward -∞.
    Down,
}

/// Evaluates every expression shape used by the fast path.
pub fn expression_bounds() -> Result<Vec<ExpressionBound>, AnalyzeError> {
    let one = StaticFilterError::input(1.0);
    let diff = one.try_sub(one)?;
    let diff_of_diffs = diff.try_sub(diff)?;
    let product = diff * diff;
    let cross = product.try_sub(product)?;

    let bounds = [
        ("a - b", diff),
        ("(a - b) - (c - d)", diff_of_diffs),
        ("(a - b) * (c - d)", product),
        ("(a - b) * (c - d) - (e - f) * (g - h)", cross),
    ]
    .into_iter()
    .map(|(name, value)| {
        debug!(
            name,
            degree = value.degree(),
            error = value.error(),
            "expression bound"
        );
        ExpressionBound {
            name,
            degree: value.degree(),
            error: value.error(),
        }
    })
    .collect();
    Ok(bounds)
}

/// Derives [`FilterBounds`] from scratch.
pub fn derive_bounds() -> Result<FilterBounds, AnalyzeError> {
    let one = StaticFilterError::input(1.0);
    let diff = one.try_sub(one)?;
    let degree1 = diff.try_sub(diff)?;
    let product = diff * diff;
    let degree2 = product.try_sub(product)?;

    let eps = corrected(degree2.error())?;
    let degree1_eps = corrected(degree1.error())?;

    // The runtime uses a single factor for both degrees.
    let shared = eps.max(degree1_eps);
    let underflow_degree1 = (f64::MIN_POSITIVE / shared).next_up();
    let underflow_degree2 = (f64::MIN_POSITIVE / shared)
        .sqrt()
        .next_up();
    let overflow_degree2 = (f64::MAX / 2.0).sqrt().next_down();

    let bounds = FilterBounds {
        eps,
        degree1_eps,
        underflow_degree1,
        underflow_degree2,
        overflow_degree2,
    };
    debug!(?bounds, "derived filter bounds");
    Ok(bounds)
}

/// `error * (1 + 2u)`, rounded up.
fn corrected(error: f64) -> Result<f64, AnalyzeError> {
    if !(error.is_finite() && error > 0.0) {
        return Err(AnalyzeError::InvalidFactor(error));
    }
    Ok(add_up(error, mul_up(error, 2.0 * ulp(1.0))))
}

impl FilterBounds {
    /// Rounds every constant outward to `digits` significant decimal digits:
    /// factors and underflow thresholds up, the overflow threshold down.
    #[must_use]
    pub fn rounded_outward(&self, digits: usize) -> Self {
        Self {
            eps: round_decimal(self.eps, digits, Direction::Up),
            degree1_eps: round_decimal(self.degree1_eps, digits, Direction::Up),
            underflow_degree1: round_decimal(self.underflow_degree1, digits, Direction::Up),
            underflow_degree2: round_decimal(self.underflow_degree2, digits, Direction::Up),
            overflow_degree2: round_decimal(self.overflow_degree2, digits, Direction::Down),
        }
    }

    /// Checks that `self`, taken as published constants, is at least as
    /// conservative as `derived`.
    pub fn covers(&self, derived: &Self) -> Result<(), AnalyzeError> {
        let checks = [
            ("EPS_1", self.eps, derived.eps, Direction::Up),
            (
                "EPS_1 (degree 1)",
                self.degree1_eps,
                derived.degree1_eps,
                Direction::Up,
            ),
            (
                "UNDERFLOW_DEGREE1",
                self.underflow_degree1,
                derived.underflow_degree1,
                Direction::Up,
            ),
            (
                "UNDERFLOW_DEGREE2",
                self.underflow_degree2,
                derived.underflow_degree2,
                Direction::Up,
            ),
            (
                "OVERFLOW_DEGREE2",
                self.overflow_degree2,
                derived.overflow_degree2,
                Direction::Down,
            ),
        ];
        for (name, published, derived, direction) in checks {
            let ok = match direction {
                Direction::Up => published >= derived,
                Direction::Down => published <= derived,
            };
            if !ok {
                return Err(AnalyzeError::NotConservative {
                    name,
                    published,
                    derived,
                });
            }
        }
        Ok(())
    }

    /// Renders the constants as Rust `const` items for the runtime crate.
    #[must_use]
    pub fn to_rust_consts(&self) -> String {
        let eps = self.eps.max(self.degree1_eps);
        format!(
            "pub const EPS_1: f64 = {eps:e};\n\
             pub const UNDERFLOW_DEGREE1: f64 = {:e};\n\
             pub const UNDERFLOW_DEGREE2: f64 = {:e};\n\
             pub const OVERFLOW_DEGREE2: f64 = {:e};\n",
            self.underflow_degree1, self.underflow_degree2, self.overflow_degree2,
        )
    }
}

/// Rounds `value` to `digits` significant decimal digits in `direction`.
///
/// The result is the nearest `f64` to a short decimal that lies on the
/// requested side of `value`; if no such decimal can be produced, `value` is
/// returned unchanged.
#[must_use]
pub fn round_decimal(value: f64, digits: usize, direction: Direction) -> f64 {
    if !value.is_finite() || value == 0.0 {
        return value;
    }
    let precision = digits.max(1) - 1;
    let on_side = |candidate: f64| match direction {
        Direction::Up => candidate >= value,
        Direction::Down => candidate <= value,
    };

    let text = format!("{value:.precision$e}");
    let Some((mantissa, exponent)) = text.split_once('e') else {
        return value;
    };
    let (Ok(mantissa), Ok(exponent)) = (mantissa.parse::<f64>(), exponent.parse::<i32>()) else {
        return value;
    };
    let Ok(nearest) = text.parse::<f64>() else {
        return value;
    };
    if on_side(nearest) {
        return nearest;
    }

    let step = i32::try_from(precision)
        .map_or(0.0, |p| 10f64.powi(-p));
    let shifted = match direction {
        Direction::Up => mantissa + step,
        Direction::Down => mantissa - step,
    };
    format!("{shifted:.precision$}e{exponent}")
        .parse::<f64>()
        .ok()
        .filter(|candidate| on_side(*candidate))
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degree_two_error_is_sixteen_half_ulps() {
        let bounds = derive_bounds().unwrap();
        let sixteen_u = 2f64.powi(-48);
        assert!(bounds.eps > sixteen_u);
        assert!(bounds.eps < sixteen_u * (1.0 + 1e-12));
        assert!(bounds.degree1_eps < bounds.eps);
    }

    #[test]
    fn expression_table_lists_every_shape() {
        let table = expression_bounds().unwrap();
        let degrees: Vec<u32> = table
            .iter()
            .map(|e| e.degree)
            .collect();
        assert_eq!(degrees, vec![1, 1, 2, 2]);
        assert_eq!(table[0].error, f64::EPSILON);
        assert!(table.windows(2).all(|w| w[0].error < w[1].error));
    }

    #[test]
    fn thresholds_follow_from_eps() {
        let b = derive_bounds().unwrap();
        let smallest_square = b.underflow_degree2 * b.underflow_degree2;
        let largest_square = b.overflow_degree2 * b.overflow_degree2;
        assert!((b.eps * b.underflow_degree1).is_normal());
        assert!((b.eps * smallest_square).is_normal());
        assert!((largest_square * 2.0).is_finite());
    }

    #[test]
    fn round_decimal_respects_direction() {
        let cases = [
            (3.552713678800501e-15, 6, Direction::Up, 3.55272e-15),
            (3.552713678800501e-15, 6, Direction::Down, 3.55271e-15),
            (9.480751908109176e153, 3, Direction::Down, 9.48e153),
            (0.25, 3, Direction::Up, 0.25),
            (0.0, 3, Direction::Up, 0.0),
        ];
        for (value, digits, direction, expected) in cases {
            assert_eq!(round_decimal(value, digits, direction), expected);
        }
    }

    #[test]
    fn rounded_constants_still_cover_derived_ones() {
        let derived = derive_bounds().unwrap();
        for digits in [1, 3, 6, 10] {
            derived.rounded_outward(digits).covers(&derived).unwrap();
        }
    }

    #[test]
    fn covers_reports_the_offending_constant() {
        let derived = derive_bounds().unwrap();
        let tight = FilterBounds {
            eps: derived.eps / 2.0,
            ..derived
        };
        assert!(matches!(
            tight.covers(&derived),
            Err(AnalyzeError::NotConservative { name: "EPS_1", .. })
        ));
        let loose_overflow = FilterBounds {
            overflow_degree2: f64::MAX,
            ..derived
        };
        assert!(matches!(
            loose_overflow.covers(&derived),
            Err(AnalyzeError::NotConservative {
                name: "OVERFLOW_DEGREE2",
                ..
            })
        ));
    }

    #[test]
    fn rust_output_is_const_items() {
        let text = derive_bounds()
            .unwrap()
            .rounded_outward(6)
            .to_rust_consts();
        assert!(text.starts_with("pub const EPS_1: f64 = 3.55272e-15;"));
        assert_eq!(text.lines().count(), 4);
    }
}
