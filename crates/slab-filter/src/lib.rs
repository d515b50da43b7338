// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![doc = r"Filtered segment/ray vs. axis-aligned box intersection predicates.

This crate provides:
- Geometry primitives generic over their coordinate type (`Point3`,
  `Segment3`, `Ray3`, `Bbox3`).
- A representability guard (`Coordinate`) that converts coordinates to `f64`
  only when the conversion is lossless.
- A floating-point fast path (`fast_path`) that certifies every sign it relies
  on against an a priori error bound and reports `Uncertainty` otherwise.
- Strategy composition (`do_intersect`, `FilteredPredicate`) that hands the
  original, unconverted query to an exact fallback whenever the fast path
  cannot certify its answer.
- An exact rational fallback (`exact::Exact`) and diagnostic probes
  (`FilterStats`).

Design notes:
- Pure and reentrant: no global state, no allocation on the fast path.
- A definite answer from the fast path equals the exact-arithmetic answer;
  anything else is delegated.
- Probes observe which path answered; they never influence the answer.
"]

/// Representability guard for input coordinates.
pub mod coord;
/// Error types for checked constructors.
pub mod error;
/// Exact rational fallback predicate.
pub mod exact;
/// Certified fast path and fallback composition.
pub mod filter;
/// Diagnostic instrumentation hooks.
pub mod probe;
/// Three-way certified sign classification.
pub mod sign;
/// Geometry primitives.
pub mod types;

pub use coord::Coordinate;
pub use error::GeomError;
pub use exact::{Exact, ExactCoordinate, ExactPredicate};
pub use filter::{
    do_intersect, do_intersect_with_probe, fast_path, ray_box_fast, segment_box_fast, Comparison,
    Filtered, FilteredPredicate, Uncertainty,
};
pub use probe::{FilterStats, NoProbe, Probe, StatsSnapshot};
pub use sign::CertifiedSign;
pub use types::bbox::Bbox3;
pub use types::point::{Axis, Point3};
pub use types::query::{Extent, LinearQuery, Ray3, Segment3};
