// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! `slab`: run filtered segment/ray vs. box queries from the command line.
//!
//! # Usage
//! ```text
//! slab query segment --source 0,0,0 --target 2,0,0 --bbox 1,-1,-1,3,1,1
//! slab fuzz [--config FILE] [--cases N] [--seed S] [--json]
//! ```
//!
//! `query` prints the answer and whether the fast path or the exact fallback
//! produced it. `fuzz` compares both on generated cases and exits non-zero on
//! any disagreement.

// The CLI is expected to print to stdout/stderr.
#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use slab_cli::config::FuzzConfig;
use slab_cli::fuzz;
use slab_cli::parse::{parse_bbox, parse_point};
use slab_cli::query::{run_query, QueryKind};
use slab_filter::{Bbox3, Point3};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "slab",
    version,
    about = "Filtered segment/ray vs. box intersection queries",
    disable_help_subcommand = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer a single query.
    Query(QueryArgs),
    /// Compare filtered and exact answers on generated cases.
    Fuzz(FuzzArgs),
}

#[derive(Args)]
struct QueryArgs {
    /// Query shape.
    #[arg(value_enum)]
    kind: QueryKind,

    /// First point, `x,y,z`.
    #[arg(long, allow_hyphen_values = true, value_parser = parse_point)]
    source: Point3,

    /// Second point, `x,y,z` (the ray passes through it).
    #[arg(long, allow_hyphen_values = true, value_parser = parse_point)]
    target: Point3,

    /// Box bounds, `xmin,ymin,zmin,xmax,ymax,zmax`.
    #[arg(long, allow_hyphen_values = true, value_parser = parse_bbox)]
    bbox: Bbox3,

    /// Print the outcome as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct FuzzArgs {
    /// JSON config file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of cases.
    #[arg(long)]
    cases: Option<u64>,

    /// RNG seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Print the report as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::from_default_env().add_directive("warn".parse()?);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        Commands::Query(args) => run_query_command(&args),
        Commands::Fuzz(args) => run_fuzz_command(args),
    }
}

fn run_query_command(args: &QueryArgs) -> Result<()> {
    let outcome = run_query(args.kind, args.source, args.target, &args.bbox);
    if args.json {
        println!("{}", serde_json::to_string(&outcome)?);
        return Ok(());
    }
    println!(
        "{} {} -> {} vs box [{}, {}]",
        args.kind,
        args.source,
        args.target,
        args.bbox.min(),
        args.bbox.max()
    );
    println!("intersects: {}", outcome.intersects);
    match outcome.delegated {
        None => println!("path: fast"),
        Some(reason) => println!("path: exact ({reason})"),
    }
    Ok(())
}

fn run_fuzz_command(args: FuzzArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => FuzzConfig::load(path)
            .with_context(|| format!("loading fuzz config {}", path.display()))?,
        None => FuzzConfig::default(),
    };
    if let Some(cases) = args.cases {
        config.cases = cases;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    config.validate()?;

    info!(
        cases = config.cases,
        seed = config.seed,
        "starting fuzz run"
    );
    let report = fuzz::run(&config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.table());
        println!(
            "seed {}: {} cases, {} mismatches",
            report.seed, report.cases, report.mismatch_count
        );
        for m in &report.mismatches {
            eprintln!(
                "mismatch #{}: {} {} {} -> {} vs box [{}, {}]: filtered {} exact {}",
                m.index,
                m.case.family,
                m.case.kind,
                m.case.source,
                m.case.target,
                m.case.bbox.min(),
                m.case.bbox.max(),
                m.filtered,
                m.exact
            );
        }
    }

    if report.mismatch_count > 0 {
        bail!(
            "{} of {} cases disagreed with the exact predicate",
            report.mismatch_count,
            report.cases
        );
    }
    Ok(())
}
