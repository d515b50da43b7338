// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Integration tests for the filtered segment vs. box predicate.

mod common;

use common::{bbox, seg, CountingExact};
use slab_filter::{
    do_intersect, segment_box_fast, Bbox3, Exact, ExactPredicate, Filtered, FilteredPredicate,
    Point3, Segment3,
};

#[test]
fn segment_ending_on_a_face_intersects() {
    let b = bbox([1.0, -1.0, -1.0], [3.0, 1.0, 1.0]);
    let s = seg([0.0, 0.0, 0.0], [2.0, 0.0, 0.0]);
    let predicate = FilteredPredicate::new(Exact);
    assert!(predicate.segment_box(&s, &b));

    // Touching exactly at the endpoint, whichever path answers.
    let touching = seg([0.0, 0.0, 0.0], [1.0, 0.0, 0.0]);
    assert!(predicate.segment_box(&touching, &b));
    assert!(Exact.intersects(&touching, &b));
}

#[test]
fn clearly_separated_segment_is_rejected_by_the_fast_path() {
    let b = bbox([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
    let s = seg([-5.0, -5.0, -5.0], [-4.0, -4.0, -4.0]);
    assert_eq!(segment_box_fast(&s, &b), Filtered::Certain(false));

    let exact = CountingExact::default();
    let predicate = FilteredPredicate::new(&exact);
    assert!(!predicate.segment_box(&s, &b));
    assert_eq!(exact.calls(), 0, "fast path must answer without delegation");
}

#[test]
fn segment_through_the_box_is_certified() {
    let b = bbox([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
    let s = seg([-1.0, 0.25, 0.5], [2.0, 0.75, 0.5]);
    assert_eq!(segment_box_fast(&s, &b), Filtered::Certain(true));
    assert_eq!(segment_box_fast(&s.reversed(), &b), Filtered::Certain(true));
}

#[test]
fn segment_inside_the_box_intersects() {
    let b = bbox([-10.0, -10.0, -10.0], [10.0, 10.0, 10.0]);
    let s = seg([-1.0, 2.0, 3.0], [4.0, -5.0, 6.0]);
    assert_eq!(segment_box_fast(&s, &b), Filtered::Certain(true));
}

#[test]
fn segment_passing_beside_the_box_misses() {
    // Crosses the x and z slabs while staying above the box in y.
    let b = bbox([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
    let s = seg([-1.0, 1.5, 0.5], [2.0, 2.5, 0.5]);
    assert_eq!(segment_box_fast(&s, &b), Filtered::Certain(false));

    // Steep diagonal through a thin z slab.
    let d = seg([-1.0, 0.5, 3.0], [2.0, 0.5, -3.0]);
    let b2 = bbox([0.0, 0.0, -0.1], [1.0, 1.0, 0.1]);
    assert_eq!(
        segment_box_fast(&d, &b2),
        Filtered::Certain(Exact.intersects(&d, &b2))
    );
}

#[test]
fn fallback_answer_is_returned_unchanged() {
    // A grazing corner hit cannot be certified; the injected fallback decides.
    let b = bbox([1.0, -5.0, 0.0], [3.0, 1.0, 1.0]);
    let s = seg([0.0, 0.0, 0.5], [2.0, 2.0, 0.5]);
    assert!(matches!(segment_box_fast(&s, &b), Filtered::Uncertain(_)));
    assert!(do_intersect(&s, &b, |q, bb| Exact.intersects(q, bb)));
    assert!(!do_intersect(&s, &b, |_, _| false));
}

#[test]
fn repeated_calls_agree() {
    let predicate = FilteredPredicate::new(Exact);
    let b = bbox([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
    let cases = [
        seg([-1.0, 0.5, 0.5], [0.5, 0.5, 0.5]),
        seg([1.0, 1.0, 1.0], [2.0, 2.0, 2.0]),
        seg([0.0, 0.0, 2.0], [1.0, 1.0, 1.0 + f64::EPSILON]),
    ];
    for s in &cases {
        let first = predicate.segment_box(s, &b);
        for _ in 0..8 {
            assert_eq!(predicate.segment_box(s, &b), first);
        }
    }
}

#[test]
fn integer_coordinates_use_the_fast_path() {
    let b: Bbox3<i64> = Bbox3::new(Point3::new(0, 0, 0), Point3::new(10, 10, 10));
    let s: Segment3<i64> = Segment3::new(Point3::new(-5, 5, 5), Point3::new(5, 5, 5));
    assert_eq!(segment_box_fast(&s, &b), Filtered::Certain(true));

    let f: Segment3<f32> = Segment3::new(Point3::new(-5.0, 5.0, 5.0), Point3::new(-1.0, 5.0, 5.0));
    let fb: Bbox3<f32> = Bbox3::new(Point3::new(0.0, 0.0, 0.0), Point3::new(10.0, 10.0, 10.0));
    assert_eq!(segment_box_fast(&f, &fb), Filtered::Certain(false));
}

#[test]
fn degenerate_segment_matches_exact() {
    let predicate = FilteredPredicate::new(Exact);
    let b = bbox([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
    let points = [
        [0.5, 0.5, 0.5],
        [1.0, 0.5, 0.5],
        [1.5, 0.5, 0.5],
        [0.0, 0.0, 0.0],
    ];
    for p in points {
        let s = seg(p, p);
        assert!(s.is_degenerate());
        assert_eq!(
            predicate.segment_box(&s, &b),
            Exact.intersects(&s, &b),
            "p = {p:?}"
        );
    }
}
