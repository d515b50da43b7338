// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Seeded comparison of the filtered predicates against [`Exact`].
//!
//! Cases come from weighted families that aim at the fast path's weak spots:
//! exact tangencies, ulp-scale near misses and magnitudes outside the
//! certified range. Every case is answered twice, once through
//! [`FilteredPredicate`] and once by [`Exact`] alone; any disagreement is a
//! mismatch.

use std::fmt;

use comfy_table::Table;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use slab_filter::{
    Bbox3, Exact, ExactPredicate, FilterStats, FilteredPredicate, Point3, Ray3, Segment3,
    StatsSnapshot,
};
use tracing::{debug, warn};

use crate::config::{ConfigError, FuzzConfig};
use crate::query::QueryKind;

/// Mismatches kept verbatim in a report; later ones are only counted.
pub const KEPT_MISMATCHES: usize = 16;

/// Case generator family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    /// Query entirely beyond one face of the box.
    Separated,
    /// Endpoint within a few ulps of a box corner.
    NearTangent,
    /// Magnitudes below the underflow thresholds.
    Tiny,
    /// Magnitudes above the overflow threshold.
    Huge,
    /// Small integer coordinates.
    Grid,
}

impl Family {
    /// Every family, in config weight order.
    pub const ALL: [Self; 5] = [
        Self::Separated,
        Self::NearTangent,
        Self::Tiny,
        Self::Huge,
        Self::Grid,
    ];

    const fn index(self) -> usize {
        match self {
            Self::Separated => 0,
            Self::NearTangent => 1,
            Self::Tiny => 2,
            Self::Huge => 3,
            Self::Grid => 4,
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Separated => "separated",
            Self::NearTangent => "near-tangent",
            Self::Tiny => "tiny",
            Self::Huge => "huge",
            Self::Grid => "grid",
        })
    }
}

/// One generated query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Case {
    /// Generating family.
    pub family: Family,
    /// Segment or ray.
    pub kind: QueryKind,
    /// First point.
    pub source: Point3,
    /// Second point.
    pub target: Point3,
    /// The box.
    pub bbox: Bbox3,
}

impl Case {
    /// Answer of the filtered predicate, reporting to `stats`.
    pub fn filtered(&self, stats: &FilterStats) -> bool {
        let predicate = FilteredPredicate::with_probe(Exact, stats);
        match self.kind {
            QueryKind::Segment => predicate.segment_box(&self.segment(), &self.bbox),
            QueryKind::Ray => predicate.ray_box(&self.ray(), &self.bbox),
        }
    }

    /// Answer of the exact predicate alone.
    pub fn exact(&self) -> bool {
        match self.kind {
            QueryKind::Segment => Exact.intersects(&self.segment(), &self.bbox),
            QueryKind::Ray => Exact.intersects(&self.ray(), &self.bbox),
        }
    }

    const fn segment(&self) -> Segment3 {
        Segment3::new(self.source, self.target)
    }

    const fn ray(&self) -> Ray3 {
        Ray3::new(self.source, self.target)
    }
}

/// Infinite, deterministic stream of cases.
pub struct CaseGenerator {
    rng: StdRng,
    families: WeightedIndex<u32>,
    rays: bool,
    tiny_scale: f64,
    huge_scale: f64,
}

impl CaseGenerator {
    /// Seeds a generator from `config`.
    pub fn new(config: &FuzzConfig) -> Result<Self, ConfigError> {
        let families = WeightedIndex::new(config.mix.weights())
            .map_err(|e| ConfigError::Invalid(format!("family weights: {e}")))?;
        Ok(Self {
            rng: StdRng::seed_from_u64(config.seed),
            families,
            rays: config.rays,
            tiny_scale: config.tiny_scale,
            huge_scale: config.huge_scale,
        })
    }

    /// Draws the next case.
    pub fn next_case(&mut self) -> Case {
        let family = Family::ALL[self.families.sample(&mut self.rng)];
        let kind = if self.rays && self.rng.gen_bool(0.5) {
            QueryKind::Ray
        } else {
            QueryKind::Segment
        };
        let (source, target, bbox) = match family {
            Family::Separated => self.separated(),
            Family::NearTangent => self.near_tangent(),
            Family::Tiny => self.scaled(self.tiny_scale),
            Family::Huge => self.scaled(self.huge_scale),
            Family::Grid => {
                let bbox = ordered_box(self.grid_point(), self.grid_point());
                (self.grid_point(), self.grid_point(), bbox)
            }
        };
        Case {
            family,
            kind,
            source: Point3::from_array(source),
            target: Point3::from_array(target),
            bbox,
        }
    }

    fn uniform_point(&mut self, scale: f64) -> [f64; 3] {
        core::array::from_fn(|_| self.rng.gen_range(-scale..=scale))
    }

    fn grid_point(&mut self) -> [f64; 3] {
        core::array::from_fn(|_| f64::from(self.rng.gen_range(-4i32..=4)))
    }

    fn scaled(&mut self, scale: f64) -> ([f64; 3], [f64; 3], Bbox3) {
        let bbox = ordered_box(self.uniform_point(scale), self.uniform_point(scale));
        let source = self.uniform_point(2.0 * scale);
        let target = self.uniform_point(2.0 * scale);
        (source, target, bbox)
    }

    fn separated(&mut self) -> ([f64; 3], [f64; 3], Bbox3) {
        let bbox = ordered_box(self.uniform_point(4.0), self.uniform_point(4.0));
        let axis = self.rng.gen_range(0..3);
        let above = self.rng.gen_bool(0.5);
        let mut source = self.uniform_point(8.0);
        let mut target = self.uniform_point(8.0);
        for point in [&mut source, &mut target] {
            let gap = self.rng.gen_range(1e-9..4.0);
            point[axis] = if above {
                bbox.max().coords()[axis] + gap
            } else {
                bbox.min().coords()[axis] - gap
            };
        }
        (source, target, bbox)
    }

    fn near_tangent(&mut self) -> ([f64; 3], [f64; 3], Bbox3) {
        let bbox = ordered_box(self.grid_point(), self.grid_point());
        let source = self.grid_point();
        let target = core::array::from_fn(|i| {
            let corner = if self.rng.gen_bool(0.5) {
                bbox.max().coords()[i]
            } else {
                bbox.min().coords()[i]
            };
            nudge(corner, self.rng.gen_range(-2i8..=2))
        });
        (source, target, bbox)
    }
}

impl Iterator for CaseGenerator {
    type Item = Case;

    fn next(&mut self) -> Option<Case> {
        Some(self.next_case())
    }
}

fn ordered_box(a: [f64; 3], b: [f64; 3]) -> Bbox3 {
    Bbox3::new(
        Point3::from_array(core::array::from_fn(|i| a[i].min(b[i]))),
        Point3::from_array(core::array::from_fn(|i| a[i].max(b[i]))),
    )
}

fn nudge(v: f64, steps: i8) -> f64 {
    (0..steps.unsigned_abs()).fold(v, |x, _| {
        if steps > 0 {
            x.next_up()
        } else {
            x.next_down()
        }
    })
}

/// A case where the filtered and exact answers differ.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Mismatch {
    /// Zero-based case number within the run.
    pub index: u64,
    /// The offending case.
    pub case: Case,
    /// Filtered answer.
    pub filtered: bool,
    /// Exact answer.
    pub exact: bool,
}

/// Counters for one family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FamilyReport {
    /// The family.
    pub family: Family,
    /// Path counters of its cases.
    pub stats: StatsSnapshot,
}

/// Outcome of a fuzz run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuzzReport {
    /// Seed the run used.
    pub seed: u64,
    /// Cases evaluated.
    pub cases: u64,
    /// Per-family counters, in [`Family::ALL`] order.
    pub families: Vec<FamilyReport>,
    /// Total disagreements.
    pub mismatch_count: u64,
    /// The first [`KEPT_MISMATCHES`] disagreements.
    pub mismatches: Vec<Mismatch>,
}

impl FuzzReport {
    /// Counters summed over every family.
    pub fn totals(&self) -> StatsSnapshot {
        self.families
            .iter()
            .fold(StatsSnapshot::default(), |acc, f| StatsSnapshot {
                certain_true: acc.certain_true + f.stats.certain_true,
                certain_false: acc.certain_false + f.stats.certain_false,
                not_representable: acc.not_representable + f.stats.not_representable,
                underflow: acc.underflow + f.stats.underflow,
                overflow: acc.overflow + f.stats.overflow,
                uncertain_sign: acc.uncertain_sign + f.stats.uncertain_sign,
            })
    }

    /// Renders the per-family counters.
    pub fn table(&self) -> Table {
        let mut table = Table::new();
        table.set_header(vec![
            "family",
            "cases",
            "fast true",
            "fast false",
            "not repr.",
            "underflow",
            "overflow",
            "uncertain sign",
            "fast %",
        ]);
        let rows = self
            .families
            .iter()
            .map(|f| (f.family.to_string(), f.stats))
            .chain(std::iter::once(("total".to_owned(), self.totals())));
        for (name, s) in rows {
            let ratio = s
                .fast_path_ratio()
                .map_or_else(|| "-".to_owned(), |r| format!("{:.1}", r * 100.0));
            table.add_row(vec![
                name,
                s.calls().to_string(),
                s.certain_true.to_string(),
                s.certain_false.to_string(),
                s.not_representable.to_string(),
                s.underflow.to_string(),
                s.overflow.to_string(),
                s.uncertain_sign.to_string(),
                ratio,
            ]);
        }
        table
    }
}

/// Generates `config.cases` cases and compares both predicates on each.
pub fn run(config: &FuzzConfig) -> Result<FuzzReport, ConfigError> {
    let stats: [FilterStats; 5] = core::array::from_fn(|_| FilterStats::new());
    let mut mismatch_count = 0;
    let mut mismatches = Vec::new();

    for (index, case) in (0..config.cases).zip(CaseGenerator::new(config)?) {
        let filtered = case.filtered(&stats[case.family.index()]);
        let exact = case.exact();
        if filtered != exact {
            mismatch_count += 1;
            warn!(index, family = %case.family, kind = %case.kind, filtered, exact, "mismatch");
            if mismatches.len() < KEPT_MISMATCHES {
                mismatches.push(Mismatch {
                    index,
                    case,
                    filtered,
                    exact,
                });
            }
        }
    }

    let families = Family::ALL
        .iter()
        .map(|&family| FamilyReport {
            family,
            stats: stats[family.index()].snapshot(),
        })
        .collect();
    debug!(cases = config.cases, mismatch_count, "fuzz run finished");
    Ok(FuzzReport {
        seed: config.seed,
        cases: config.cases,
        families,
        mismatch_count,
        mismatches,
    })
}
