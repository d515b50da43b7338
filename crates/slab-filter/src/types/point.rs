// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::fmt;

use crate::coord::Coordinate;
use crate::error::GeomError;

/// Coordinate axis identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// First coordinate.
    X,
    /// Second coordinate.
    Y,
    /// Third coordinate.
    Z,
}

impl Axis {
    /// All axes in evaluation order.
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    /// Index of this axis into a `[T; 3]` coordinate array.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        };
        f.write_str(name)
    }
}

/// Point in 3D space with coordinates of type `T`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Point3<T = f64> {
    coords: [T; 3],
}

impl<T> Point3<T> {
    /// Creates a point from its three coordinates.
    #[must_use]
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self { coords: [x, y, z] }
    }

    /// Creates a point from a coordinate array.
    #[must_use]
    pub const fn from_array(coords: [T; 3]) -> Self {
        Self { coords }
    }

    /// First coordinate.
    #[must_use]
    pub const fn x(&self) -> &T {
        &self.coords[0]
    }

    /// Second coordinate.
    #[must_use]
    pub const fn y(&self) -> &T {
        &self.coords[1]
    }

    /// Third coordinate.
    #[must_use]
    pub const fn z(&self) -> &T {
        &self.coords[2]
    }

    /// Coordinate along `axis`.
    #[must_use]
    pub const fn coord(&self, axis: Axis) -> &T {
        &self.coords[axis.index()]
    }

    /// All three coordinates.
    #[must_use]
    pub const fn coords(&self) -> &[T; 3] {
        &self.coords
    }

    /// Applies `f` to every coordinate.
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> Point3<U> {
        let [x, y, z] = &self.coords;
        Point3::new(f(x), f(y), f(z))
    }
}

impl<T: Coordinate> Point3<T> {
    /// Creates a point, rejecting infinite and NaN coordinates.
    pub fn try_new(x: T, y: T, z: T) -> Result<Self, GeomError> {
        let point = Self::new(x, y, z);
        match point.first_non_finite_axis() {
            Some(axis) => Err(GeomError::NonFinite { axis }),
            None => Ok(point),
        }
    }

    pub(crate) fn first_non_finite_axis(&self) -> Option<Axis> {
        Axis::ALL
            .into_iter()
            .find(|&axis| !self.coord(axis).is_finite())
    }
}

impl<T: fmt::Display> fmt::Display for Point3<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z] = &self.coords;
        write!(f, "({x}, {y}, {z})")
    }
}
