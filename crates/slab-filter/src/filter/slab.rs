// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Certified slab test on `f64` inputs.
//!
//! The query is the set `p + t * (q - p)` for `t` in `[0, 1]` (segment) or
//! `[0, ∞)` (ray). Per axis the admissible parameters form a window whose
//! endpoints are ratios `t / d` with `d >= 0`; windows are compared by
//! cross-multiplication so no division ever happens. Only subtractions of raw
//! inputs and the final differences of products carry rounding error, and
//! every sign taken from those is certified against `EPS_1 * m^degree`.
//!
//! An axis along which the query does not move is decided by comparing raw
//! inputs and then skipped; its zero extent would only make every product
//! that involves it vanish.
//!
//! `m` is the running maximum of every operand magnitude seen so far,
//! accumulated across axes. Later comparisons mix quantities from earlier
//! axes, so it must never be reset.

use super::bounds::{EPS_1, OVERFLOW_DEGREE2, UNDERFLOW_DEGREE1, UNDERFLOW_DEGREE2};
use super::{Comparison, Uncertainty};
use crate::coord::Coordinate;
use crate::sign::CertifiedSign;
use crate::types::bbox::Bbox3;
use crate::types::point::{Axis, Point3};
use crate::types::query::{Extent, LinearQuery};

/// Query and box coordinates after a successful representability check.
#[derive(Debug, Copy, Clone)]
pub(crate) struct SlabInput {
    p: [f64; 3],
    q: [f64; 3],
    lo: [f64; 3],
    hi: [f64; 3],
}

impl SlabInput {
    /// Converts all twelve coordinates, or returns `None` if any is not exactly
    /// representable as `f64`.
    pub(crate) fn convert<T, Q>(query: &Q, bbox: &Bbox3<T>) -> Option<Self>
    where
        T: Coordinate,
        Q: LinearQuery<T>,
    {
        Some(Self {
            p: fit_point(query.source())?,
            q: fit_point(query.second_point())?,
            lo: fit_point(bbox.min())?,
            hi: fit_point(bbox.max())?,
        })
    }

    /// Runs the slab test, returning the certified answer or the first reason
    /// the answer could not be certified.
    pub(crate) fn evaluate(&self, extent: Extent) -> Result<bool, Uncertainty> {
        let bounded = extent == Extent::Bounded;

        // ---------------------------------------------------------------
        // x: establishes the running window [tmin/dmin, tmax/dmax].
        // Branching and trivial rejection compare raw inputs only.
        // ---------------------------------------------------------------
        let (px, qx) = (self.p[0], self.q[0]);
        let (bxmin, bxmax) = (self.lo[0], self.hi[0]);
        let (mut tmin, mut tmax, mut dmin, mut dmax);
        let mut m;
        match self.fixed_on(Axis::X) {
            Some(false) => return Ok(false),
            Some(true) => {
                // No x constraint: the window is the whole query, with
                // `1 / 0` standing for the ray's unbounded exit.
                tmin = 0.0;
                dmin = 1.0;
                tmax = 1.0;
                dmax = if bounded { 1.0 } else { 0.0 };
                m = 1.0;
            }
            None => {
                if qx > px {
                    if px > bxmax {
                        return Ok(false);
                    }
                    if bounded && qx < bxmin {
                        return Ok(false);
                    }
                    tmax = bxmax - px;
                    dmax = qx - px;
                    if bxmin < px {
                        tmin = 0.0;
                        dmin = 1.0;
                    } else {
                        tmin = bxmin - px;
                        dmin = dmax;
                    }
                } else {
                    if px < bxmin {
                        return Ok(false);
                    }
                    if bounded && qx > bxmax {
                        return Ok(false);
                    }
                    tmax = px - bxmin;
                    dmax = px - qx;
                    if px < bxmax {
                        tmin = 0.0;
                        dmin = 1.0;
                    } else {
                        tmin = px - bxmax;
                        dmin = dmax;
                    }
                }

                // `dmax` counts even though the segment may clamp it to 1
                // below: an unclamped exit feeds every later product.
                m = max_abs(0.0, &[tmin, tmax, dmin, dmax]);

                if bounded {
                    if m < UNDERFLOW_DEGREE1 {
                        return Err(Uncertainty::Underflow);
                    }
                    // Clamp the exit to the segment's far end when the box
                    // extends beyond it.
                    match CertifiedSign::classify(tmax - dmax, EPS_1 * m) {
                        CertifiedSign::Positive => {
                            tmax = 1.0;
                            dmax = 1.0;
                        }
                        CertifiedSign::Negative => {}
                        CertifiedSign::Uncertain => {
                            return Err(Uncertainty::Sign(Comparison::FarEnd));
                        }
                    }
                }
            }
        }

        // ---------------------------------------------------------------
        // y: intersect the running window with the y window.
        // ---------------------------------------------------------------
        match self.fixed_on(Axis::Y) {
            Some(false) => return Ok(false),
            Some(true) => {}
            None => {
                let (tmin_y, tmax_y, d_y) = self.axis_window(Axis::Y);
                m = max_abs(m, &[tmin_y, tmax_y, d_y]);

                if m < UNDERFLOW_DEGREE2 {
                    return Err(Uncertainty::Underflow);
                }
                if m > OVERFLOW_DEGREE2 {
                    return Err(Uncertainty::Overflow);
                }
                let error = EPS_1 * m * m;

                // y exits before the running window opens / the running window
                // closes before y opens.
                let exits_early = CertifiedSign::classify(d_y * tmin - dmin * tmax_y, error);
                let opens_late = CertifiedSign::classify(dmax * tmin_y - d_y * tmax, error);
                if exits_early.is_positive() || opens_late.is_positive() {
                    return Ok(false);
                }
                if exits_early.is_uncertain() || opens_late.is_uncertain() {
                    return Err(Uncertainty::Sign(Comparison::Separation(Axis::Y)));
                }

                match CertifiedSign::classify(dmin * tmin_y - d_y * tmin, error) {
                    CertifiedSign::Positive => {
                        tmin = tmin_y;
                        dmin = d_y;
                    }
                    CertifiedSign::Negative => {}
                    CertifiedSign::Uncertain => {
                        return Err(Uncertainty::Sign(Comparison::Entry(Axis::Y)));
                    }
                }

                match CertifiedSign::classify(d_y * tmax - dmax * tmax_y, error) {
                    CertifiedSign::Positive => {
                        tmax = tmax_y;
                        dmax = d_y;
                    }
                    CertifiedSign::Negative => {}
                    CertifiedSign::Uncertain => {
                        return Err(Uncertainty::Sign(Comparison::Exit(Axis::Y)));
                    }
                }
            }
        }

        // ---------------------------------------------------------------
        // z: the final window must overlap the z window.
        // ---------------------------------------------------------------
        // The running window is non-empty here, so a fixed z decides alone.
        if let Some(inside) = self.fixed_on(Axis::Z) {
            return Ok(inside);
        }
        let (tmin_z, tmax_z, d_z) = self.axis_window(Axis::Z);
        m = max_abs(m, &[tmin_z, tmax_z, d_z]);

        if m < UNDERFLOW_DEGREE2 {
            return Err(Uncertainty::Underflow);
        }
        if m > OVERFLOW_DEGREE2 {
            return Err(Uncertainty::Overflow);
        }
        let error = EPS_1 * m * m;

        let z_exit_after_entry = CertifiedSign::classify(dmin * tmax_z - d_z * tmin, error);
        let exit_after_z_entry = CertifiedSign::classify(d_z * tmax - dmax * tmin_z, error);
        if z_exit_after_entry.is_negative() || exit_after_z_entry.is_negative() {
            return Ok(false);
        }
        if z_exit_after_entry.is_uncertain() || exit_after_z_entry.is_uncertain() {
            return Err(Uncertainty::Sign(Comparison::Separation(Axis::Z)));
        }
        Ok(true)
    }

    /// `Some(inside)` when the query does not move along `axis`. It then lies
    /// in the slab for every parameter or for none, decided on raw inputs.
    fn fixed_on(&self, axis: Axis) -> Option<bool> {
        let i = axis.index();
        let p = self.p[i];
        (self.q[i] == p).then(|| self.lo[i] <= p && p <= self.hi[i])
    }

    /// Entry distance, exit distance and extent along `axis`, oriented so the
    /// extent is non-negative.
    fn axis_window(&self, axis: Axis) -> (f64, f64, f64) {
        let i = axis.index();
        let (p, q, lo, hi) = (self.p[i], self.q[i], self.lo[i], self.hi[i]);
        if q >= p {
            (lo - p, hi - p, q - p)
        } else {
            (p - hi, p - lo, p - q)
        }
    }
}

fn fit_point<T: Coordinate>(point: &Point3<T>) -> Option<[f64; 3]> {
    let [x, y, z] = point.coords();
    Some([x.fit_in_f64()?, y.fit_in_f64()?, z.fit_in_f64()?])
}

#[inline]
fn max_abs(current: f64, values: &[f64]) -> f64 {
    values.iter().fold(current, |m, v| m.max(v.abs()))
}
