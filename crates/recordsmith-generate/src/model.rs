use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, TemplateError};

/// What the `uuid` keyword produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UuidMode {
    /// RFC 4122 version 4 identifier drawn from the processor RNG.
    #[default]
    V4,
    /// Unix epoch seconds, identical to `timestamp`. Kept for fixtures
    /// recorded against the legacy generator.
    LegacyTimestamp,
}

/// How a string is recognized as a directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerPolicy {
    /// The marker may appear anywhere; the body is whatever follows the first
    /// `marker.len()` bytes of the string.
    #[default]
    Anywhere,
    /// The string must start with the marker.
    Prefix,
}

/// Options for building a processor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorOptions {
    /// Fixed RNG seed. A time-derived seed is used when absent.
    pub seed: Option<u64>,
    /// Behavior of the `uuid` keyword.
    pub uuid_mode: UuidMode,
    /// Directive recognition rule.
    pub marker_policy: MarkerPolicy,
}

impl GeneratorOptions {
    /// Parse options from a TOML document.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|err| TemplateError::Config(err.to_string()))
    }

    /// Read and parse options from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }
}
