// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Geometry types consumed by the predicates (points, segments, rays, boxes).
//!
//! Conventions:
//! - Every type is generic over its coordinate type `T` and defaults to `f64`.
//!   The predicates only require `T: Coordinate` (fast path) and
//!   `T: ExactCoordinate` (exact fallback).
//! - Values are immutable once constructed; accessors return references so
//!   non-`Copy` coordinates (e.g. `BigRational`) are never cloned on the hot
//!   path.
//! - Box containment is inclusive on faces: touching counts as intersecting.

#[doc = "Axis-aligned bounding boxes."]
pub mod bbox;
#[doc = "Points and axis identifiers."]
pub mod point;
#[doc = "Segments, rays and the shared linear query shape."]
pub mod query;
