//! User configuration
//!
//! Stored in `~/.config/strata/config.yaml`. Every field is optional; missing
//! sections fall back to their defaults.
//!
//! ```yaml
//! search:
//!   case_sensitive: false
//!   wrap_around: true
//! merge:
//!   ours: HEAD
//!   theirs: incoming
//! diff:
//!   old_prefix: "a/"
//!   new_prefix: "b/"
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::diff::MergeLabels;
use crate::search::SearchOptions;

/// Path prefixes used in unified-diff `---`/`+++` headers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffLabels {
    pub old_prefix: String,
    pub new_prefix: String,
}

impl Default for DiffLabels {
    fn default() -> Self {
        Self {
            old_prefix: "a/".to_string(),
            new_prefix: "b/".to_string(),
        }
    }
}

impl DiffLabels {
    pub fn old_name(&self, path: &str) -> String {
        format!("{}{}", self.old_prefix, path)
    }

    pub fn new_name(&self, path: &str) -> String {
        format!("{}{}", self.new_prefix, path)
    }
}

/// Configuration shared by the command-line tools
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrataConfig {
    /// Defaults for search and replace
    pub search: SearchOptions,
    /// Conflict marker labels for three-way merges
    pub merge: MergeLabels,
    /// Unified-diff header prefixes
    pub diff: DiffLabels,
}

impl StrataConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{:#}", e);
                Self::default()
            }
        }
    }

    /// Read and parse a specific config file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("Failed to parse config at {}", path.display()))
    }

    /// Parse config from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config = serde_yaml::from_str(content).context("Invalid config YAML")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(StrataConfig::from_yaml_str("").unwrap(), StrataConfig::default());
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let config = StrataConfig::from_yaml_str("search:\n  case_sensitive: false\n").unwrap();
        assert!(!config.search.case_sensitive);
        assert!(config.search.wrap_around);
        assert_eq!(config.merge, MergeLabels::default());
        assert_eq!(config.diff.old_name("x.txt"), "a/x.txt");
    }

    #[test]
    fn test_merge_labels_from_yaml() {
        let config = StrataConfig::from_yaml_str("merge:\n  ours: HEAD\n").unwrap();
        assert_eq!(config.merge.ours, "HEAD");
        assert_eq!(config.merge.theirs, "theirs");
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        assert!(StrataConfig::from_yaml_str("search: [1, 2").is_err());
    }
}
