// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use super::point::Point3;

/// How far a linear query extends past its second defining point.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Extent {
    /// Stops at the second point (segment, `t ∈ [0, 1]`).
    Bounded,
    /// Continues past the second point forever (ray, `t ∈ [0, ∞)`).
    Unbounded,
}

/// Shape shared by segments and rays: the points `source + t * (second - source)`
/// for `t` in a parameter range fixed by [`LinearQuery::EXTENT`].
pub trait LinearQuery<T> {
    /// Parameter range of the query.
    const EXTENT: Extent;

    /// Point at `t = 0`.
    fn source(&self) -> &Point3<T>;

    /// Point at `t = 1`.
    fn second_point(&self) -> &Point3<T>;
}

/// Closed segment between two points.
///
/// A zero-length segment (`source == target`) is accepted; the predicates
/// route it to the exact fallback when the fast path cannot certify it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Segment3<T = f64> {
    source: Point3<T>,
    target: Point3<T>,
}

impl<T> Segment3<T> {
    /// Creates the segment `source → target`.
    #[must_use]
    pub const fn new(source: Point3<T>, target: Point3<T>) -> Self {
        Self { source, target }
    }

    /// First endpoint.
    #[must_use]
    pub const fn source(&self) -> &Point3<T> {
        &self.source
    }

    /// Second endpoint.
    #[must_use]
    pub const fn target(&self) -> &Point3<T> {
        &self.target
    }

    /// Returns `true` when both endpoints coincide.
    #[must_use]
    pub fn is_degenerate(&self) -> bool
    where
        T: PartialEq,
    {
        self.source == self.target
    }

    /// Returns the same segment traversed from `target` to `source`.
    #[must_use]
    pub fn reversed(self) -> Self {
        Self {
            source: self.target,
            target: self.source,
        }
    }
}

impl<T> LinearQuery<T> for Segment3<T> {
    const EXTENT: Extent = Extent::Bounded;

    fn source(&self) -> &Point3<T> {
        &self.source
    }

    fn second_point(&self) -> &Point3<T> {
        &self.target
    }
}

/// Half-line starting at `source` and passing through `second_point`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Ray3<T = f64> {
    source: Point3<T>,
    second: Point3<T>,
}

impl<T> Ray3<T> {
    /// Creates the ray from `source` through `second`.
    #[must_use]
    pub const fn new(source: Point3<T>, second: Point3<T>) -> Self {
        Self { source, second }
    }

    /// Origin of the ray.
    #[must_use]
    pub const fn source(&self) -> &Point3<T> {
        &self.source
    }

    /// The defining point at parameter `t = 1`.
    #[must_use]
    pub const fn second_point(&self) -> &Point3<T> {
        &self.second
    }

    /// The finite segment `source → second_point`.
    #[must_use]
    pub fn to_segment(&self) -> Segment3<T>
    where
        T: Clone,
    {
        Segment3::new(self.source.clone(), self.second.clone())
    }
}

impl<T> LinearQuery<T> for Ray3<T> {
    const EXTENT: Extent = Extent::Unbounded;

    fn source(&self) -> &Point3<T> {
        &self.source
    }

    fn second_point(&self) -> &Point3<T> {
        &self.second
    }
}
