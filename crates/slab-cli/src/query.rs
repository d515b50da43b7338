// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use std::cell::Cell;
use std::fmt;

use serde::Serialize;
use slab_filter::{Bbox3, Exact, FilteredPredicate, Point3, Probe, Ray3, Segment3, Uncertainty};

/// Shape of the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum QueryKind {
    /// Bounded by its two points.
    Segment,
    /// Starts at the source and passes through the second point.
    Ray,
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Segment => "segment",
            Self::Ray => "ray",
        })
    }
}

/// Answer plus the path that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QueryOutcome {
    /// Whether the query touches the box.
    pub intersects: bool,
    /// Why the fast path declined, or `None` when it answered.
    pub delegated: Option<Uncertainty>,
}

impl QueryOutcome {
    /// `"fast"` or `"exact"`.
    pub const fn path(&self) -> &'static str {
        match self.delegated {
            None => "fast",
            Some(_) => "exact",
        }
    }
}

/// Remembers the delegation reason of the last call.
#[derive(Default)]
struct LastPath(Cell<Option<Uncertainty>>);

impl Probe for LastPath {
    fn on_certain(&self, _answer: bool) {
        self.0.set(None);
    }

    fn on_delegate(&self, reason: Uncertainty) {
        self.0.set(Some(reason));
    }
}

/// Evaluates one query with the exact rational fallback.
pub fn run_query(kind: QueryKind, source: Point3, target: Point3, bbox: &Bbox3) -> QueryOutcome {
    let predicate = FilteredPredicate::with_probe(Exact, LastPath::default());
    let intersects = match kind {
        QueryKind::Segment => predicate.segment_box(&Segment3::new(source, target), bbox),
        QueryKind::Ray => predicate.ray_box(&Ray3::new(source, target), bbox),
    };
    QueryOutcome {
        intersects,
        delegated: predicate.probe().0.get(),
    }
}
