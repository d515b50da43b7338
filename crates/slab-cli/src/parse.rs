// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::num::ParseFloatError;

use slab_filter::{Bbox3, GeomError, Point3};
use thiserror::Error;

/// Error parsing a coordinate list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The list had the wrong number of entries.
    #[error("expected {expected} comma-separated numbers, found {found}")]
    Arity {
        /// Required count.
        expected: usize,
        /// Count supplied.
        found: usize,
    },
    /// An entry was not a number.
    #[error("entry {index}: {source}")]
    Number {
        /// Zero-based position in the list.
        index: usize,
        /// Underlying parse failure.
        source: ParseFloatError,
    },
    /// The numbers did not form a valid point or box.
    #[error(transparent)]
    Geometry(#[from] GeomError),
}

fn parse_list<const N: usize>(text: &str) -> Result<[f64; N], ParseError> {
    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    if parts.len() != N {
        return Err(ParseError::Arity {
            expected: N,
            found: parts.len(),
        });
    }
    let mut out = [0.0; N];
    for (index, (slot, part)) in out.iter_mut().zip(parts).enumerate() {
        *slot = part
            .parse()
            .map_err(|source| ParseError::Number { index, source })?;
    }
    Ok(out)
}

/// Parses `x,y,z`. Infinite and NaN coordinates are rejected.
pub fn parse_point(text: &str) -> Result<Point3, ParseError> {
    let [x, y, z] = parse_list::<3>(text)?;
    Ok(Point3::try_new(x, y, z)?)
}

/// Parses `xmin,ymin,zmin,xmax,ymax,zmax`. Bounds must be finite.
pub fn parse_bbox(text: &str) -> Result<Bbox3, ParseError> {
    let [x0, y0, z0, x1, y1, z1] = parse_list::<6>(text)?;
    Ok(Bbox3::try_new(
        Point3::new(x0, y0, z0),
        Point3::new(x1, y1, z1),
    )?)
}
