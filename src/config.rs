//! Command-line configuration, read from `ast-builder.yaml`.
//!
//! ```yaml
//! render:
//!   namespace: b
//!   quote: double
//! format: json
//! ```
//!
//! Every field is optional; missing ones take their defaults.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::errors::{AstError, Result};
use crate::render::RenderOptions;

/// File looked up in the working directory when no `--config` is given.
pub const CONFIG_FILE: &str = "ast-builder.yaml";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One rendered builder call per line.
    #[default]
    Text,
    /// The constructor expressions as a JSON array.
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub render: RenderOptions,
    pub format: OutputFormat,
}

impl Config {
    pub fn from_yaml(text: &str) -> Result<Self> {
        // An empty document is a valid, all-default config.
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).map_err(|e| AstError::invalid_input(format!("bad config: {}", e)))
    }

    /// Reads an explicitly requested config file; any failure is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            AstError::invalid_input(format!("cannot read config '{}': {}", path.display(), e))
        })?;
        Self::from_yaml(&text).map_err(|e| e.with_help(format!("while loading {}", path.display())))
    }

    /// Reads [`CONFIG_FILE`] from `dir` if it exists. A broken file is logged
    /// and ignored.
    pub fn discover(dir: &Path) -> Self {
        let path = dir.join(CONFIG_FILE);
        if !path.is_file() {
            return Self::default();
        }
        match Self::load(&path) {
            Ok(config) => {
                debug!("loaded {}", path.display());
                config
            }
            Err(e) => {
                warn!("ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}
