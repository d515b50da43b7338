// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Round-toward-+∞ arithmetic emulated on top of round-to-nearest.
//!
//! The rounding error of a sum or product is recovered exactly (two-sum and
//! fused multiply-add); when it is positive the nearest result lies below the
//! true value and is bumped one ulp up. Only meaningful for finite,
//! non-negative operands, which is all the analysis ever feeds it.

/// Distance from `x` to the next larger `f64`.
#[must_use]
pub fn ulp(x: f64) -> f64 {
    x.next_up() - x
}

/// `a + b` rounded toward +∞.
#[must_use]
pub fn add_up(a: f64, b: f64) -> f64 {
    let sum = a + b;
    if !sum.is_finite() {
        return sum;
    }
    let b_virtual = sum - a;
    let a_virtual = sum - b_virtual;
    let residual = (a - a_virtual) + (b - b_virtual);
    if residual > 0.0 {
        sum.next_up()
    } else {
        sum
    }
}

/// `a * b` rounded toward +∞.
#[must_use]
pub fn mul_up(a: f64, b: f64) -> f64 {
    let product = a * b;
    if !product.is_finite() {
        return product;
    }
    if a.mul_add(b, -product) > 0.0 {
        product.next_up()
    } else {
        product
    }
}
