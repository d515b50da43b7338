// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Errors raised by checked constructors.
//!
//! The predicates never fail: uncertainty is resolved by delegation, not
//! reported. These errors only cover building malformed inputs.

use thiserror::Error;

use crate::types::point::Axis;

/// Error type for geometry construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeomError {
    /// A box bound had `min > max` (or an incomparable value) on `axis`.
    #[error("invalid bbox: min > max on the {axis} axis")]
    InvalidBox {
        /// First offending axis.
        axis: Axis,
    },
    /// A coordinate on `axis` was infinite or NaN.
    #[error("non-finite coordinate on the {axis} axis")]
    NonFinite {
        /// First offending axis.
        axis: Axis,
    },
    /// A bounding box was requested for zero points.
    #[error("cannot bound an empty point set")]
    EmptyPointSet,
}
