// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! JSON configuration for `slab fuzz`.
//!
//! Every field is optional; missing fields take the defaults below and
//! unknown fields are rejected. Command-line flags override file values.
//!
//! ```json
//! { "cases": 50000, "seed": 7, "rays": true,
//!   "mix": { "separated": 1, "near_tangent": 4, "tiny": 1, "huge": 1, "grid": 2 } }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for config loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("reading {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The file is not valid config JSON.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// The values parsed but make no sense together.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Relative weights of the generated case families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaseMix {
    /// Query entirely beyond one face of the box.
    pub separated: u32,
    /// Query aimed at a box corner, endpoint nudged by a few ulps.
    pub near_tangent: u32,
    /// Magnitudes around `tiny_scale`, below the underflow thresholds.
    pub tiny: u32,
    /// Magnitudes around `huge_scale`, above the overflow threshold.
    pub huge: u32,
    /// Small integer coordinates: exact tangencies and parallel axes.
    pub grid: u32,
}

impl Default for CaseMix {
    fn default() -> Self {
        Self {
            separated: 1,
            near_tangent: 2,
            tiny: 1,
            huge: 1,
            grid: 2,
        }
    }
}

impl CaseMix {
    /// Weights in [`crate::fuzz::Family::ALL`] order.
    pub const fn weights(&self) -> [u32; 5] {
        [
            self.separated,
            self.near_tangent,
            self.tiny,
            self.huge,
            self.grid,
        ]
    }
}

/// Fuzz run parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FuzzConfig {
    /// Number of generated cases.
    pub cases: u64,
    /// RNG seed; equal seeds replay identical runs.
    pub seed: u64,
    /// Also generate rays (half of the cases) besides segments.
    pub rays: bool,
    /// Scale of the `tiny` family.
    pub tiny_scale: f64,
    /// Scale of the `huge` family.
    pub huge_scale: f64,
    /// Family weights.
    pub mix: CaseMix,
}

impl Default for FuzzConfig {
    fn default() -> Self {
        Self {
            cases: 10_000,
            seed: 0x5eed,
            rays: true,
            tiny_scale: 1e-300,
            huge_scale: 1e200,
            mix: CaseMix::default(),
        }
    }
}

impl FuzzConfig {
    /// Parses and validates a config from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Rejects configs that cannot produce cases.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mix.weights().iter().all(|w| *w == 0) {
            return Err(ConfigError::Invalid("all family weights are zero".into()));
        }
        let scales = [
            ("tiny_scale", self.tiny_scale),
            ("huge_scale", self.huge_scale),
        ];
        for (name, scale) in scales {
            if !(scale.is_normal() && scale > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a positive normal number, got {scale}"
                )));
            }
        }
        // Cases span up to 16 scale units around the origin.
        if !(self.huge_scale * 16.0).is_finite() {
            return Err(ConfigError::Invalid(format!(
                "huge_scale {} overflows generated coordinates",
                self.huge_scale
            )));
        }
        Ok(())
    }
}
