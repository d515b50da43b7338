// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(dead_code)]

use std::cell::Cell;

use slab_filter::{Bbox3, Exact, ExactPredicate, LinearQuery, Point3, Ray3, Segment3};

pub fn bbox(min: [f64; 3], max: [f64; 3]) -> Bbox3 {
    Bbox3::new(Point3::from_array(min), Point3::from_array(max))
}

pub fn seg(p: [f64; 3], q: [f64; 3]) -> Segment3 {
    Segment3::new(Point3::from_array(p), Point3::from_array(q))
}

pub fn ray(p: [f64; 3], q: [f64; 3]) -> Ray3 {
    Ray3::new(Point3::from_array(p), Point3::from_array(q))
}

/// Exact fallback that counts how often it was consulted.
#[derive(Default)]
pub struct CountingExact {
    calls: Cell<usize>,
}

impl CountingExact {
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl<T> ExactPredicate<T> for CountingExact
where
    Exact: ExactPredicate<T>,
{
    fn intersects<Q: LinearQuery<T>>(&self, query: &Q, bbox: &Bbox3<T>) -> bool {
        self.calls.set(self.calls.get() + 1);
        Exact.intersects(query, bbox)
    }
}
