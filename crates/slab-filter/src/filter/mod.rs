// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Filtered segment/ray vs. box predicates.
//!
//! The fast path ([`fast_path`]) never guesses: it returns
//! [`Filtered::Certain`] only when every sign it used was certified, and
//! [`Filtered::Uncertain`] with the first reason otherwise. Composition with a
//! fallback is explicit ([`do_intersect`], [`FilteredPredicate`]): the
//! fallback receives the caller's original query and box, never the `f64`
//! copies.
//!
//! Uncertainty triggers, all resolved the same way (delegation):
//! - a coordinate is not exactly representable as `f64`;
//! - the operand magnitude leaves the range the error bound is valid for;
//! - a difference lands inside its certified error band.

pub mod bounds;
mod slab;

use core::fmt;

use tracing::trace;

use crate::coord::Coordinate;
use crate::exact::ExactPredicate;
use crate::probe::{NoProbe, Probe};
use crate::types::bbox::Bbox3;
use crate::types::point::Axis;
use crate::types::query::{LinearQuery, Ray3, Segment3};
use slab::SlabInput;

/// A comparison of the slab test whose sign could not be certified.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Comparison {
    /// Segment far end vs. the first-axis exit.
    FarEnd,
    /// Disjointness of the running window and the window on this axis.
    Separation(Axis),
    /// Which entry parameter is later.
    Entry(Axis),
    /// Which exit parameter is earlier.
    Exit(Axis),
}

/// Why the fast path declined to answer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Uncertainty {
    /// An input coordinate has no exact `f64` representation.
    NotRepresentable,
    /// Operand magnitudes are too small for the error bound to be computed.
    Underflow,
    /// Operand magnitudes are large enough for a product to overflow.
    Overflow,
    /// A computed difference fell inside its error band.
    Sign(Comparison),
}

impl fmt::Display for Uncertainty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotRepresentable => f.write_str("coordinate not representable as f64"),
            Self::Underflow => f.write_str("magnitude underflow"),
            Self::Overflow => f.write_str("magnitude overflow"),
            Self::Sign(Comparison::FarEnd) => f.write_str("uncertain sign: far end"),
            Self::Sign(Comparison::Separation(axis)) => {
                write!(f, "uncertain sign: {axis} separation")
            }
            Self::Sign(Comparison::Entry(axis)) => write!(f, "uncertain sign: {axis} entry"),
            Self::Sign(Comparison::Exit(axis)) => write!(f, "uncertain sign: {axis} exit"),
        }
    }
}

/// Outcome of the fast path.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Filtered {
    /// The answer, identical to the exact-arithmetic answer.
    Certain(bool),
    /// No answer; the query must be delegated.
    Uncertain(Uncertainty),
}

impl Filtered {
    /// The certified answer, if any.
    #[must_use]
    pub const fn certain(self) -> Option<bool> {
        match self {
            Self::Certain(answer) => Some(answer),
            Self::Uncertain(_) => None,
        }
    }
}

impl From<Result<bool, Uncertainty>> for Filtered {
    fn from(value: Result<bool, Uncertainty>) -> Self {
        match value {
            Ok(answer) => Self::Certain(answer),
            Err(reason) => Self::Uncertain(reason),
        }
    }
}

/// Runs the certified floating-point slab test without any fallback.
pub fn fast_path<T, Q>(query: &Q, bbox: &Bbox3<T>) -> Filtered
where
    T: Coordinate,
    Q: LinearQuery<T>,
{
    match SlabInput::convert(query, bbox) {
        Some(input) => input.evaluate(Q::EXTENT).into(),
        None => Filtered::Uncertain(Uncertainty::NotRepresentable),
    }
}

/// [`fast_path`] for a segment.
pub fn segment_box_fast<T: Coordinate>(segment: &Segment3<T>, bbox: &Bbox3<T>) -> Filtered {
    fast_path(segment, bbox)
}

/// [`fast_path`] for a ray.
pub fn ray_box_fast<T: Coordinate>(ray: &Ray3<T>, bbox: &Bbox3<T>) -> Filtered {
    fast_path(ray, bbox)
}

/// Decides whether `query` intersects `bbox`, calling `fallback` with the
/// original inputs whenever the fast path cannot certify the answer.
///
/// `fallback` must implement the same exact contract; its answer is returned
/// unchanged.
pub fn do_intersect<T, Q, F>(query: &Q, bbox: &Bbox3<T>, fallback: F) -> bool
where
    T: Coordinate,
    Q: LinearQuery<T>,
    F: FnOnce(&Q, &Bbox3<T>) -> bool,
{
    do_intersect_with_probe(query, bbox, &NoProbe, fallback)
}

/// [`do_intersect`] reporting which path answered to `probe`.
pub fn do_intersect_with_probe<T, Q, F, P>(
    query: &Q,
    bbox: &Bbox3<T>,
    probe: &P,
    fallback: F,
) -> bool
where
    T: Coordinate,
    Q: LinearQuery<T>,
    F: FnOnce(&Q, &Bbox3<T>) -> bool,
    P: Probe + ?Sized,
{
    match fast_path(query, bbox) {
        Filtered::Certain(answer) => {
            probe.on_certain(answer);
            answer
        }
        Filtered::Uncertain(reason) => {
            trace!(%reason, extent = ?Q::EXTENT, "delegating to exact predicate");
            probe.on_delegate(reason);
            fallback(query, bbox)
        }
    }
}

/// A fast path bundled with an exact fallback and a probe.
///
/// ```
/// use slab_filter::{Bbox3, Exact, FilteredPredicate, Point3, Segment3};
///
/// let predicate = FilteredPredicate::new(Exact);
/// let bbox = Bbox3::new(Point3::new(1.0, -1.0, -1.0), Point3::new(3.0, 1.0, 1.0));
/// let seg = Segment3::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0));
/// assert!(predicate.segment_box(&seg, &bbox));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FilteredPredicate<E, P = NoProbe> {
    exact: E,
    probe: P,
}

impl<E> FilteredPredicate<E> {
    /// Creates a predicate delegating to `exact`, without instrumentation.
    #[must_use]
    pub const fn new(exact: E) -> Self {
        Self {
            exact,
            probe: NoProbe,
        }
    }
}

impl<E, P: Probe> FilteredPredicate<E, P> {
    /// Creates a predicate delegating to `exact` and reporting to `probe`.
    #[must_use]
    pub const fn with_probe(exact: E, probe: P) -> Self {
        Self { exact, probe }
    }

    /// The exact fallback.
    #[must_use]
    pub const fn exact(&self) -> &E {
        &self.exact
    }

    /// The attached probe.
    #[must_use]
    pub const fn probe(&self) -> &P {
        &self.probe
    }

    /// Decides whether `query` intersects `bbox`.
    pub fn intersects<T, Q>(&self, query: &Q, bbox: &Bbox3<T>) -> bool
    where
        T: Coordinate,
        Q: LinearQuery<T>,
        E: ExactPredicate<T>,
    {
        do_intersect_with_probe(query, bbox, &self.probe, |q, b| {
            self.exact.intersects(q, b)
        })
    }

    /// Decides whether `segment` intersects `bbox`.
    pub fn segment_box<T>(&self, segment: &Segment3<T>, bbox: &Bbox3<T>) -> bool
    where
        T: Coordinate,
        E: ExactPredicate<T>,
    {
        self.intersects(segment, bbox)
    }

    /// Decides whether `ray` intersects `bbox`.
    pub fn ray_box<T>(&self, ray: &Ray3<T>, bbox: &Bbox3<T>) -> bool
    where
        T: Coordinate,
        E: ExactPredicate<T>,
    {
        self.intersects(ray, bbox)
    }
}
