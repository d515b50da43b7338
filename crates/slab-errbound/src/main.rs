// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! `slab-errbound`: derives the certified constants of the slab fast path and
//! checks the ones compiled into `slab-filter`.
//!
//! # Usage
//! ```text
//! slab-errbound [--format text|rust|json] [--digits N] [--check]
//! ```
//!
//! `--format rust` prints `const` items ready to paste into
//! `slab-filter/src/filter/bounds.rs`. `--check` exits non-zero when a compiled
//! constant is tighter than the derived one.

// The tool reports on stdout.
#![allow(clippy::print_stdout)]

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use slab_errbound::{derive_bounds, expression_bounds, ExpressionBound, FilterBounds};
use slab_filter::filter::bounds::{EPS_1, OVERFLOW_DEGREE2, UNDERFLOW_DEGREE1, UNDERFLOW_DEGREE2};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "slab-errbound",
    version,
    about = "Derive certified error bounds for the slab fast path"
)]
struct Cli {
    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Significant decimal digits of the published (outward-rounded) constants.
    #[arg(long, default_value_t = 6, value_parser = clap::value_parser!(u8).range(1..=17))]
    digits: u8,

    /// Fail unless the constants compiled into slab-filter cover the derived ones.
    #[arg(long)]
    check: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Human-readable report.
    Text,
    /// Rust `const` items.
    Rust,
    /// Machine-readable report.
    Json,
}

#[derive(Serialize)]
struct Report {
    expressions: Vec<ExpressionBound>,
    derived: FilterBounds,
    published: FilterBounds,
    compiled: FilterBounds,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::from_default_env().add_directive("warn".parse()?);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let expressions = expression_bounds()
        .context("evaluating expression bounds")?;
    let derived = derive_bounds()
        .context("deriving filter bounds")?;
    let published = derived.rounded_outward(usize::from(cli.digits));
    let report = Report {
        expressions,
        derived,
        published,
        compiled: compiled_bounds(),
    };

    match cli.format {
        Format::Text => print_text(&report),
        Format::Rust => print!("{}", report.published.to_rust_consts()),
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if cli.check {
        report
            .compiled
            .covers(&report.derived)
            .context("slab-filter constants are not conservative")?;
        info!("compiled constants cover the derived bounds");
    }
    Ok(())
}

/// The constants `slab-filter` was built with. The runtime applies `EPS_1` to
/// both degrees.
fn compiled_bounds() -> FilterBounds {
    FilterBounds {
        eps: EPS_1,
        degree1_eps: EPS_1,
        underflow_degree1: UNDERFLOW_DEGREE1,
        underflow_degree2: UNDERFLOW_DEGREE2,
        overflow_degree2: OVERFLOW_DEGREE2,
    }
}

fn print_text(report: &Report) {
    println!("expression bounds (|error| <= factor * m^degree):");
    for e in &report.expressions {
        println!("  {:<40} degree {}  {:e}", e.name, e.degree, e.error);
    }
    println!();
    let rows = [
        (
            "EPS_1",
            report.derived.eps,
            report.published.eps,
            report.compiled.eps,
        ),
        (
            "EPS_1 (degree 1)",
            report.derived.degree1_eps,
            report.published.degree1_eps,
            report.compiled.degree1_eps,
        ),
        (
            "UNDERFLOW_DEGREE1",
            report.derived.underflow_degree1,
            report.published.underflow_degree1,
            report.compiled.underflow_degree1,
        ),
        (
            "UNDERFLOW_DEGREE2",
            report.derived.underflow_degree2,
            report.published.underflow_degree2,
            report.compiled.underflow_degree2,
        ),
        (
            "OVERFLOW_DEGREE2",
            report.derived.overflow_degree2,
            report.published.overflow_degree2,
            report.compiled.overflow_degree2,
        ),
    ];
    println!(
        "  {:<20} {:>26} {:>14} {:>14}",
        "constant", "derived", "published", "compiled"
    );
    for (name, derived, published, compiled) in rows {
        println!("  {name:<20} {derived:>26e} {published:>14e} {compiled:>14e}");
    }
}
