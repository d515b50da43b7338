// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Property tests: the filtered predicates agree with the exact predicate on
//! grid-aligned, multi-scale, near-tangent and tiny inputs.

use proptest::array::{uniform3, uniform4};
use proptest::prelude::*;
use slab_filter::{
    fast_path, Bbox3, Exact, ExactPredicate, Filtered, FilteredPredicate, LinearQuery, Point3,
    Ray3, Segment3,
};

fn ordered_box(a: [f64; 3], b: [f64; 3]) -> Bbox3 {
    let min = [a[0].min(b[0]), a[1].min(b[1]), a[2].min(b[2])];
    let max = [a[0].max(b[0]), a[1].max(b[1]), a[2].max(b[2])];
    Bbox3::new(Point3::from_array(min), Point3::from_array(max))
}

/// Small integers: plenty of exact tangencies and parallel axes.
fn grid_point() -> impl Strategy<Value = [f64; 3]> {
    uniform3(-4i32..=4).prop_map(|c| c.map(f64::from))
}

fn scaled_point(scale: f64) -> impl Strategy<Value = [f64; 3]> {
    uniform3(-scale..scale)
}

/// Four points sharing one random magnitude between 2^-60 and 2^60.
fn multi_scale_case() -> impl Strategy<Value = [[f64; 3]; 4]> {
    (-60i32..=60).prop_flat_map(|exp| {
        let scale = 2f64.powi(exp);
        uniform4(scaled_point(scale))
    })
}

fn check<Q: LinearQuery<f64>>(query: &Q, bbox: &Bbox3) -> Result<(), TestCaseError> {
    let expected = Exact.intersects(query, bbox);
    if let Filtered::Certain(answer) = fast_path(query, bbox) {
        prop_assert_eq!(answer, expected, "fast path certified a wrong answer");
    }
    let predicate = FilteredPredicate::new(Exact);
    prop_assert_eq!(predicate.intersects(query, bbox), expected);
    Ok(())
}

fn check_both(p: [f64; 3], q: [f64; 3], bbox: &Bbox3) -> Result<(), TestCaseError> {
    let seg = Segment3::new(Point3::from_array(p), Point3::from_array(q));
    let ray = Ray3::new(Point3::from_array(p), Point3::from_array(q));
    check(&seg, bbox)?;
    check(&ray, bbox)
}

/// Moves `v` up or down by a few ulps.
fn nudge(v: f64, steps: i8) -> f64 {
    let mut out = v;
    for _ in 0..steps.unsigned_abs() {
        out = if steps > 0 {
            out.next_up()
        } else {
            out.next_down()
        };
    }
    out
}

proptest! {
    #[test]
    fn grid_inputs_match_exact(
        p in grid_point(),
        q in grid_point(),
        a in grid_point(),
        b in grid_point(),
    ) {
        check_both(p, q, &ordered_box(a, b))?;
    }

    #[test]
    fn multi_scale_inputs_match_exact(pts in multi_scale_case()) {
        let [p, q, a, b] = pts;
        check_both(p, q, &ordered_box(a, b))?;
    }

    #[test]
    fn near_tangent_inputs_match_exact(
        a in grid_point(),
        b in grid_point(),
        p in grid_point(),
        corner in prop::array::uniform3(any::<bool>()),
        steps in prop::array::uniform3(-2i8..=2),
    ) {
        let bbox = ordered_box(a, b);
        // Aim the query at a box corner, then nudge the endpoint off it.
        let target: [f64; 3] = core::array::from_fn(|i| {
            let face = if corner[i] {
                bbox.max().coords()[i]
            } else {
                bbox.min().coords()[i]
            };
            nudge(face, steps[i])
        });
        check_both(p, target, &bbox)?;
    }

    #[test]
    fn tiny_inputs_match_exact(
        p in scaled_point(1e-290),
        q in scaled_point(1e-290),
        a in scaled_point(1e-290),
        b in scaled_point(1e-290),
    ) {
        check_both(p, q, &ordered_box(a, b))?;
    }

    #[test]
    fn reversing_a_segment_keeps_the_answer(
        p in grid_point(),
        q in grid_point(),
        a in grid_point(),
        b in grid_point(),
    ) {
        let bbox = ordered_box(a, b);
        let seg = Segment3::new(Point3::from_array(p), Point3::from_array(q));
        let predicate = FilteredPredicate::new(Exact);
        prop_assert_eq!(
            predicate.segment_box(&seg, &bbox),
            predicate.segment_box(&seg.reversed(), &bbox)
        );
    }
}
