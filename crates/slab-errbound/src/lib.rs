// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![doc = r"Offline rounding-error analysis for the slab fast path.

`StaticFilterError` is a symbolic stand-in for `f64`: it carries a bound on
the magnitude of a value, a bound on its accumulated absolute rounding error
(both relative to `m^degree`, where `m` bounds the inputs) and the polynomial
degree. Evaluating the fast path's worst expression on it yields the factor
`EPS` with `|computed - exact| <= EPS * m^degree`.

The bounds are evaluated with upward-rounded arithmetic so the derived
constants never understate the true error. Nothing here runs on the hot path;
`slab-filter` carries the results as literal constants, and the
`slab-errbound` binary regenerates and checks them.
"]

/// Error type for the analysis.
pub mod error;
/// Certified constants derived from the symbolic evaluation.
pub mod derive;
/// Upward-rounded scalar helpers.
pub mod rounding;
/// The symbolic error type.
pub mod symbolic;

pub use derive::{
    derive_bounds, expression_bounds, round_decimal, Direction, ExpressionBound, FilterBounds,
};
pub use error::AnalyzeError;
pub use symbolic::StaticFilterError;
