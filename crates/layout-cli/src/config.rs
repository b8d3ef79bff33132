//! Optional JSON configuration file.
//!
//! ```json
//! {
//!   "generation": { "layout_table": "Fields Input", "table_name_policy": "override_all" },
//!   "validation": { "error_policy": "block" }
//! }
//! ```
//!
//! Missing keys keep their defaults; command-line flags are applied on top.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use layout_output::GenerationOptions;
use layout_validate::ValidateOptions;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub generation: GenerationOptions,
    pub validation: ValidateOptions,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parse config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Loads `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }
}
