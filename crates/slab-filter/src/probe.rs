// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Instrumentation hooks for the filtered predicates.
//!
//! Probes see which path produced each answer. They are diagnostic only: the
//! predicates call them after the answer is fixed and never read anything
//! back, so a probe cannot change a result.

use core::sync::atomic::{AtomicU64, Ordering};

use crate::filter::Uncertainty;

/// Observer notified once per predicate call.
pub trait Probe {
    /// The fast path certified `answer`.
    fn on_certain(&self, answer: bool);
    /// The query was handed to the exact fallback because of `reason`.
    fn on_delegate(&self, reason: Uncertainty);
}

/// Probe that ignores every event.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct NoProbe;

impl Probe for NoProbe {
    #[inline]
    fn on_certain(&self, _answer: bool) {}

    #[inline]
    fn on_delegate(&self, _reason: Uncertainty) {}
}

impl<P: Probe + ?Sized> Probe for &P {
    fn on_certain(&self, answer: bool) {
        (**self).on_certain(answer);
    }

    fn on_delegate(&self, reason: Uncertainty) {
        (**self).on_delegate(reason);
    }
}

/// Thread-safe counters of fast-path successes and delegations by reason.
///
/// Counters use relaxed atomics; a [`snapshot`](FilterStats::snapshot) taken
/// while other threads are still recording may mix events from both sides of
/// the read.
#[derive(Debug, Default)]
pub struct FilterStats {
    certain_true: AtomicU64,
    certain_false: AtomicU64,
    not_representable: AtomicU64,
    underflow: AtomicU64,
    overflow: AtomicU64,
    uncertain_sign: AtomicU64,
}

impl FilterStats {
    /// Creates zeroed counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies the current counter values.
    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            certain_true: self.certain_true.load(Ordering::Relaxed),
            certain_false: self.certain_false.load(Ordering::Relaxed),
            not_representable: self.not_representable.load(Ordering::Relaxed),
            underflow: self.underflow.load(Ordering::Relaxed),
            overflow: self.overflow.load(Ordering::Relaxed),
            uncertain_sign: self.uncertain_sign.load(Ordering::Relaxed),
        }
    }

    /// Resets every counter to zero.
    pub fn reset(&self) {
        for counter in [
            &self.certain_true,
            &self.certain_false,
            &self.not_representable,
            &self.underflow,
            &self.overflow,
            &self.uncertain_sign,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

impl Probe for FilterStats {
    fn on_certain(&self, answer: bool) {
        let counter = if answer {
            &self.certain_true
        } else {
            &self.certain_false
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn on_delegate(&self, reason: Uncertainty) {
        let counter = match reason {
            Uncertainty::NotRepresentable => &self.not_representable,
            Uncertainty::Underflow => &self.underflow,
            Uncertainty::Overflow => &self.overflow,
            Uncertainty::Sign(_) => &self.uncertain_sign,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// Plain copy of [`FilterStats`] counters.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatsSnapshot {
    /// Fast-path answers of `true`.
    pub certain_true: u64,
    /// Fast-path answers of `false`.
    pub certain_false: u64,
    /// Delegations caused by a non-representable coordinate.
    pub not_representable: u64,
    /// Delegations caused by magnitude underflow.
    pub underflow: u64,
    /// Delegations caused by magnitude overflow.
    pub overflow: u64,
    /// Delegations caused by an uncertain sign.
    pub uncertain_sign: u64,
}

impl StatsSnapshot {
    /// Calls answered by the fast path.
    #[must_use]
    pub const fn certain(&self) -> u64 {
        self.certain_true + self.certain_false
    }

    /// Calls handed to the fallback.
    #[must_use]
    pub const fn delegated(&self) -> u64 {
        self.not_representable + self.underflow + self.overflow + self.uncertain_sign
    }

    /// All recorded calls.
    #[must_use]
    pub const fn calls(&self) -> u64 {
        self.certain() + self.delegated()
    }

    /// Fraction of calls answered by the fast path, or `None` before any call.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fast_path_ratio(&self) -> Option<f64> {
        let calls = self.calls();
        (calls > 0).then(|| self.certain() as f64 / calls as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Comparison;
    use crate::types::point::Axis;

    #[test]
    fn stats_count_by_reason() {
        let stats = FilterStats::new();
        stats.on_certain(true);
        stats.on_certain(false);
        stats.on_certain(false);
        stats.on_delegate(Uncertainty::Underflow);
        stats.on_delegate(Uncertainty::Sign(Comparison::Entry(Axis::Y)));
        let snap = stats.snapshot();
        assert_eq!(snap.certain_true, 1);
        assert_eq!(snap.certain_false, 2);
        assert_eq!(snap.underflow, 1);
        assert_eq!(snap.uncertain_sign, 1);
        assert_eq!(snap.calls(), 5);
        assert_eq!(snap.fast_path_ratio(), Some(0.6));
    }

    #[test]
    fn reset_zeroes_everything() {
        let stats = FilterStats::new();
        stats.on_delegate(Uncertainty::Overflow);
        stats.reset();
        assert_eq!(stats.snapshot(), StatsSnapshot::default());
        assert_eq!(stats.snapshot().fast_path_ratio(), None);
    }
}
