// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![doc = r"Library half of the `slab` command-line tool.

- `parse`: `x,y,z` and six-number box arguments.
- `query`: one predicate call, reporting which path answered.
- `config`: JSON fuzz configuration.
- `fuzz`: seeded case generation and the filtered-vs-exact comparison.
"]

/// Fuzz configuration loading and validation.
pub mod config;
/// Filtered-vs-exact fuzzing.
pub mod fuzz;
/// Command-line value parsers.
pub mod parse;
/// Single-query evaluation.
pub mod query;
