// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Certified constants for the slab fast path.
//!
//! Derived offline by `slab-errbound` for IEEE-754 binary64 with
//! round-to-nearest. The values below are rounded *outward* from the derived
//! ones: epsilons and underflow thresholds up, the overflow threshold down.
//! Re-run `cargo run -p slab-errbound` if the fast-path expressions change.

/// Relative error factor of `(a - b) * (c - d) - (e - f) * (g - h)`, including
/// the extra rounding of `EPS_1 * m * m`. Also dominates the degree-1
/// expression `(a - b) - (c - d)`.
pub const EPS_1: f64 = 3.55618e-15;

/// Below this magnitude `EPS_1 * m` may underflow.
///
/// `f64::MIN_POSITIVE / EPS_1 ≈ 6.26e-294`.
pub const UNDERFLOW_DEGREE1: f64 = 7e-294;

/// Below this magnitude `EPS_1 * m * m` may underflow.
///
/// `sqrt(f64::MIN_POSITIVE / EPS_1) ≈ 7.9e-148`.
pub const UNDERFLOW_DEGREE2: f64 = 3e-147;

/// Above this magnitude `a * b - c * d` may overflow.
///
/// `sqrt(f64::MAX / 2) ≈ 9.48e153`.
pub const OVERFLOW_DEGREE2: f64 = 1e153;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_cover_their_derivations() {
        assert!(UNDERFLOW_DEGREE1 >= f64::MIN_POSITIVE / EPS_1);
        assert!(UNDERFLOW_DEGREE2 >= (f64::MIN_POSITIVE / EPS_1).sqrt());
        assert!(OVERFLOW_DEGREE2 <= (f64::MAX / 2.0).sqrt());
    }

    #[test]
    fn error_terms_stay_normal_at_thresholds() {
        assert!((EPS_1 * UNDERFLOW_DEGREE1).is_normal());
        assert!((EPS_1 * UNDERFLOW_DEGREE2 * UNDERFLOW_DEGREE2).is_normal());
        assert!((OVERFLOW_DEGREE2 * OVERFLOW_DEGREE2 * 2.0).is_finite());
    }
}
