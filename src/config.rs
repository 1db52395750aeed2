use crate::optional::OptionalPolicy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_MAX_DEPTH: usize = 32;
pub const DEFAULT_TRUNCATION_MARKER: &str = "…";

/// Settings of one tree build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    /// Nested composite levels expanded below the root composite.
    pub max_depth: usize,
    /// Value shown on rows whose expansion was cut off by `max_depth`.
    pub truncation_marker: String,
    pub optional_policy: OptionalPolicy,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions {
            max_depth: DEFAULT_MAX_DEPTH,
            truncation_marker: DEFAULT_TRUNCATION_MARKER.to_string(),
            optional_policy: OptionalPolicy::default(),
        }
    }
}

impl BuildOptions {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse build options")
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json_str(&json)
    }
}
