// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

/// Sign of a floating-point quantity certified against an error bound.
///
/// `Uncertain` does not claim the exact value is zero; it only says the
/// computed value lies inside `[-error, +error]`, where the true sign cannot
/// be told apart from rounding noise.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CertifiedSign {
    /// The exact value is certainly `> 0`.
    Positive,
    /// The exact value is certainly `< 0`.
    Negative,
    /// The sign cannot be certified.
    Uncertain,
}

impl CertifiedSign {
    /// Classifies `value` against the symmetric band `[-error, +error]`.
    ///
    /// NaN inputs classify as `Uncertain`.
    #[inline]
    #[must_use]
    pub fn classify(value: f64, error: f64) -> Self {
        if value > error {
            Self::Positive
        } else if value < -error {
            Self::Negative
        } else {
            Self::Uncertain
        }
    }

    /// Returns `true` for [`CertifiedSign::Positive`].
    #[must_use]
    pub const fn is_positive(self) -> bool {
        matches!(self, Self::Positive)
    }

    /// Returns `true` for [`CertifiedSign::Negative`].
    #[must_use]
    pub const fn is_negative(self) -> bool {
        matches!(self, Self::Negative)
    }

    /// Returns `true` for [`CertifiedSign::Uncertain`].
    #[must_use]
    pub const fn is_uncertain(self) -> bool {
        matches!(self, Self::Uncertain)
    }
}
