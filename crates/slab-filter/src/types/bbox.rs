// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::cmp::Ordering;

use super::point::{Axis, Point3};
use crate::coord::Coordinate;
use crate::error::GeomError;

/// Axis-aligned bounding box.
///
/// Invariants:
/// - `min` components are less than or equal to `max` components.
/// - Containment is inclusive on faces.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Bbox3<T = f64> {
    min: Point3<T>,
    max: Point3<T>,
}

impl<T: PartialOrd> Bbox3<T> {
    /// Constructs a box from its minimum and maximum corners.
    ///
    /// # Panics
    /// Panics if any component of `min` is greater than its counterpart in `max`.
    #[must_use]
    pub fn new(min: Point3<T>, max: Point3<T>) -> Self {
        assert!(
            first_inverted_axis(&min, &max).is_none(),
            "invalid bbox: min > max"
        );
        Self { min, max }
    }
}

impl<T: PartialOrd + Coordinate> Bbox3<T> {
    /// Constructs a box, rejecting non-finite bounds and corners with
    /// `min > max` on some axis.
    pub fn try_new(min: Point3<T>, max: Point3<T>) -> Result<Self, GeomError> {
        let non_finite = min
            .first_non_finite_axis()
            .or_else(|| max.first_non_finite_axis());
        if let Some(axis) = non_finite {
            return Err(GeomError::NonFinite { axis });
        }
        match first_inverted_axis(&min, &max) {
            Some(axis) => Err(GeomError::InvalidBox { axis }),
            None => Ok(Self { min, max }),
        }
    }

    /// Builds the minimal box that contains all `points`.
    pub fn from_points(points: &[Point3<T>]) -> Result<Self, GeomError>
    where
        T: Clone,
    {
        let (first, rest) = points
            .split_first()
            .ok_or(GeomError::EmptyPointSet)?;
        let mut min = first.clone();
        let mut max = first.clone();
        for p in rest {
            min = Point3::from_array(core::array::from_fn(|i| {
                pick(&min.coords()[i], &p.coords()[i], |a, b| b < a)
            }));
            max = Point3::from_array(core::array::from_fn(|i| {
                pick(&max.coords()[i], &p.coords()[i], |a, b| b > a)
            }));
        }
        Self::try_new(min, max)
    }
}

impl<T> Bbox3<T> {
    /// Minimum corner.
    #[must_use]
    pub const fn min(&self) -> &Point3<T> {
        &self.min
    }

    /// Maximum corner.
    #[must_use]
    pub const fn max(&self) -> &Point3<T> {
        &self.max
    }

    /// Lower bound along `axis`.
    #[must_use]
    pub const fn lower(&self, axis: Axis) -> &T {
        self.min.coord(axis)
    }

    /// Upper bound along `axis`.
    #[must_use]
    pub const fn upper(&self, axis: Axis) -> &T {
        self.max.coord(axis)
    }

    /// Lower `x` bound.
    #[must_use]
    pub const fn xmin(&self) -> &T {
        self.min.x()
    }

    /// Upper `x` bound.
    #[must_use]
    pub const fn xmax(&self) -> &T {
        self.max.x()
    }

    /// Lower `y` bound.
    #[must_use]
    pub const fn ymin(&self) -> &T {
        self.min.y()
    }

    /// Upper `y` bound.
    #[must_use]
    pub const fn ymax(&self) -> &T {
        self.max.y()
    }

    /// Lower `z` bound.
    #[must_use]
    pub const fn zmin(&self) -> &T {
        self.min.z()
    }

    /// Upper `z` bound.
    #[must_use]
    pub const fn zmax(&self) -> &T {
        self.max.z()
    }
}

fn pick<T: Clone>(current: &T, candidate: &T, better: impl Fn(&T, &T) -> bool) -> T {
    if better(current, candidate) {
        candidate.clone()
    } else {
        current.clone()
    }
}

fn first_inverted_axis<T: PartialOrd>(min: &Point3<T>, max: &Point3<T>) -> Option<Axis> {
    // Incomparable bounds (NaN) count as inverted.
    Axis::ALL.into_iter().find(|&axis| {
        !matches!(
            min.coord(axis).partial_cmp(max.coord(axis)),
            Some(Ordering::Less | Ordering::Equal)
        )
    })
}
