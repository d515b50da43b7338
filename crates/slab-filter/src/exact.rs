// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Exact segment/ray vs. box intersection in rational arithmetic.
//!
//! Every finite `f64` is a dyadic rational, so converting inputs to
//! `BigRational` and running the textbook slab test there gives the
//! exact-arithmetic answer for any magnitude. This is the slow path the
//! filtered predicates fall back to; it allocates and is orders of magnitude
//! slower than the fast path.

use core::cmp::Ordering;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

use crate::types::bbox::Bbox3;
use crate::types::point::{Axis, Point3};
use crate::types::query::{Extent, LinearQuery};

/// A coordinate with an exact rational value.
pub trait ExactCoordinate {
    /// The exact value, or `None` for non-finite values.
    fn to_exact(&self) -> Option<BigRational>;
}

impl ExactCoordinate for f64 {
    fn to_exact(&self) -> Option<BigRational> {
        if !self.is_finite() {
            return None;
        }
        if *self == 0.0 {
            return Some(BigRational::zero());
        }
        BigRational::from_float(*self)
    }
}

impl ExactCoordinate for f32 {
    fn to_exact(&self) -> Option<BigRational> {
        f64::from(*self).to_exact()
    }
}

impl ExactCoordinate for i32 {
    fn to_exact(&self) -> Option<BigRational> {
        Some(BigRational::from_integer(BigInt::from(*self)))
    }
}

impl ExactCoordinate for i64 {
    fn to_exact(&self) -> Option<BigRational> {
        Some(BigRational::from_integer(BigInt::from(*self)))
    }
}

impl ExactCoordinate for BigInt {
    fn to_exact(&self) -> Option<BigRational> {
        Some(BigRational::from_integer(self.clone()))
    }
}

impl ExactCoordinate for BigRational {
    fn to_exact(&self) -> Option<BigRational> {
        Some(self.clone())
    }
}

impl<C: ExactCoordinate + ?Sized> ExactCoordinate for &C {
    fn to_exact(&self) -> Option<BigRational> {
        (**self).to_exact()
    }
}

/// An intersection predicate that is correct for every input.
///
/// Implementations back the filtered predicates: they are called with the
/// caller's original inputs whenever the fast path declines to answer.
pub trait ExactPredicate<T> {
    /// Decides whether `query` intersects `bbox` (inclusive of touching).
    fn intersects<Q: LinearQuery<T>>(&self, query: &Q, bbox: &Bbox3<T>) -> bool;
}

impl<T, E: ExactPredicate<T> + ?Sized> ExactPredicate<T> for &E {
    fn intersects<Q: LinearQuery<T>>(&self, query: &Q, bbox: &Bbox3<T>) -> bool {
        (**self).intersects(query, bbox)
    }
}

/// Rational-arithmetic slab test.
///
/// Queries with a non-finite coordinate never intersect.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Exact;

impl<T: ExactCoordinate> ExactPredicate<T> for Exact {
    fn intersects<Q: LinearQuery<T>>(&self, query: &Q, bbox: &Bbox3<T>) -> bool {
        exact_intersects(query, bbox).unwrap_or(false)
    }
}

/// Parameter window `[lo, hi]` of the query, `hi = None` meaning unbounded.
struct Window {
    lo: BigRational,
    hi: Option<BigRational>,
}

impl Window {
    fn new(extent: Extent) -> Self {
        Self {
            lo: BigRational::zero(),
            hi: match extent {
                Extent::Bounded => Some(BigRational::one()),
                Extent::Unbounded => None,
            },
        }
    }

    fn clip(&mut self, enter: BigRational, exit: BigRational) {
        if enter > self.lo {
            self.lo = enter;
        }
        if self.hi.as_ref().is_none_or(|hi| exit < *hi) {
            self.hi = Some(exit);
        }
    }

    fn is_empty(&self) -> bool {
        self.hi.as_ref().is_some_and(|hi| *hi < self.lo)
    }
}

fn exact_point<T: ExactCoordinate>(point: &Point3<T>) -> Option<[BigRational; 3]> {
    let [x, y, z] = point.coords();
    Some([x.to_exact()?, y.to_exact()?, z.to_exact()?])
}

fn exact_intersects<T, Q>(query: &Q, bbox: &Bbox3<T>) -> Option<bool>
where
    T: ExactCoordinate,
    Q: LinearQuery<T>,
{
    let p = exact_point(query.source())?;
    let q = exact_point(query.second_point())?;
    let lo = exact_point(bbox.min())?;
    let hi = exact_point(bbox.max())?;

    let mut window = Window::new(Q::EXTENT);
    for axis in Axis::ALL {
        let i = axis.index();
        let d = &q[i] - &p[i];
        match d.cmp(&BigRational::zero()) {
            Ordering::Equal => {
                // Parallel to the slab: inside for every t or for none.
                if p[i] < lo[i] || p[i] > hi[i] {
                    return Some(false);
                }
            }
            order => {
                let mut enter = (&lo[i] - &p[i]) / &d;
                let mut exit = (&hi[i] - &p[i]) / &d;
                if order == Ordering::Less {
                    core::mem::swap(&mut enter, &mut exit);
                }
                window.clip(enter, exit);
                if window.is_empty() {
                    return Some(false);
                }
            }
        }
    }
    Some(true)
}
