//! config.rs
//! Construction-time settings for a `Decompressor`.
//!
//! Values are accepted as given. `size_hint > max_size` is allowed but logged,
//! since the hint then pre-allocates bytes that can never be kept.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{DEFAULT_MAX_SIZE, DEFAULT_SIZE_HINT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecompressorConfig {
    /// Expected decoded size in bytes, used to pre-size the output buffer.
    pub size_hint: u64,
    /// Hard ceiling on decoded bytes, inclusive.
    pub max_size: u64,
}

impl Default for DecompressorConfig {
    fn default() -> Self {
        Self {
            size_hint: DEFAULT_SIZE_HINT,
            max_size: DEFAULT_MAX_SIZE,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid decompressor config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl DecompressorConfig {
    pub fn new(size_hint: u64, max_size: u64) -> Self {
        Self { size_hint, max_size }
    }

    /// Parses a JSON object; missing fields take their defaults.
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn hint_exceeds_limit(&self) -> bool {
        self.size_hint > self.max_size
    }
}
