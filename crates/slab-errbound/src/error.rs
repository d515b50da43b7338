// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use thiserror::Error;

/// Failures of the offline analysis.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum AnalyzeError {
    /// Sums are only meaningful between homogeneous expressions.
    #[error("cannot add expressions of degree {left} and {right}")]
    DegreeMismatch {
        /// Degree of the left operand.
        left: u32,
        /// Degree of the right operand.
        right: u32,
    },
    /// The analysis produced a factor that cannot serve as a bound.
    #[error("error factor {0:e} is not positive and finite")]
    InvalidFactor(f64),
    /// A published constant is tighter than the derived one.
    #[error("published {name} = {published:e} does not cover derived {derived:e}")]
    NotConservative {
        /// Constant name as it appears in the runtime crate.
        name: &'static str,
        /// The published value.
        published: f64,
        /// The freshly derived value.
        derived: f64,
    },
}
