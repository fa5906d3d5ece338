//! Site configuration
//!
//! ## Configuration Sources (in precedence order)
//!
//! 1. CLI flags (`--base-path`, `--data`), applied by the caller
//! 2. Environment: `MCP_NAVIGATOR_BASE_PATH`, `MCP_NAVIGATOR_DATA`,
//!    `MCP_NAVIGATOR_BUILD_TIME`
//! 3. `navigator.yaml` (explicit path, or the platform config directory)
//! 4. Built-in defaults
//!
//! ```yaml
//! base_path: /navigator/
//! data_source: data/comprehensive_mcp_directory.json
//! orphan_policy: bucket
//! featured_limit: 6
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, warn};

use crate::catalog::ParseError;

/// Well-known location of the catalog document
pub const DEFAULT_DATA_SOURCE: &str = "data/comprehensive_mcp_directory.json";

/// Config file name inside the platform config directory
pub const CONFIG_FILE_NAME: &str = "navigator.yaml";

pub const ENV_BASE_PATH: &str = "MCP_NAVIGATOR_BASE_PATH";
pub const ENV_DATA_SOURCE: &str = "MCP_NAVIGATOR_DATA";
pub const ENV_BUILD_TIME: &str = "MCP_NAVIGATOR_BUILD_TIME";

/// What to do with entries whose category matches no known category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrphanPolicy {
    /// Leave them out of every category view
    #[default]
    Exclude,
    /// Collect them under a synthetic "Uncategorized" category
    Bucket,
}

impl FromStr for OrphanPolicy {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exclude" => Ok(OrphanPolicy::Exclude),
            "bucket" => Ok(OrphanPolicy::Bucket),
            other => Err(ParseError::OrphanPolicy(other.to_string())),
        }
    }
}

impl fmt::Display for OrphanPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrphanPolicy::Exclude => f.write_str("exclude"),
            OrphanPolicy::Bucket => f.write_str("bucket"),
        }
    }
}

/// Deployment and display settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Prefix the site is served under
    #[serde(default = "default_base_path")]
    pub base_path: String,

    /// File path or http(s) URL of the catalog document
    #[serde(default = "default_data_source")]
    pub data_source: String,

    /// Build timestamp shown in the footer
    #[serde(default)]
    pub build_time: Option<String>,

    #[serde(default)]
    pub orphan_policy: OrphanPolicy,

    /// High-popularity entries shown on the home page
    #[serde(default = "default_featured_limit")]
    pub featured_limit: usize,

    /// Same-category entries shown on a detail page
    #[serde(default = "default_related_limit")]
    pub related_limit: usize,

    /// Names shown in a category card preview
    #[serde(default = "default_preview_limit")]
    pub preview_limit: usize,

    /// Description length on list cards
    #[serde(default = "default_description_limit")]
    pub description_limit: usize,

    /// Other categories offered at the bottom of a category page
    #[serde(default = "default_other_categories_limit")]
    pub other_categories_limit: usize,

    /// Category links in the footer
    #[serde(default = "default_footer_categories_limit")]
    pub footer_categories_limit: usize,
}

fn default_base_path() -> String {
    "/".to_string()
}

fn default_data_source() -> String {
    DEFAULT_DATA_SOURCE.to_string()
}

fn default_featured_limit() -> usize {
    6
}

fn default_related_limit() -> usize {
    3
}

fn default_preview_limit() -> usize {
    3
}

fn default_description_limit() -> usize {
    100
}

fn default_other_categories_limit() -> usize {
    4
}

fn default_footer_categories_limit() -> usize {
    6
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            data_source: default_data_source(),
            build_time: None,
            orphan_policy: OrphanPolicy::default(),
            featured_limit: default_featured_limit(),
            related_limit: default_related_limit(),
            preview_limit: default_preview_limit(),
            description_limit: default_description_limit(),
            other_categories_limit: default_other_categories_limit(),
            footer_categories_limit: default_footer_categories_limit(),
        }
    }
}

impl SiteConfig {
    /// Load file configuration, then apply environment overrides
    ///
    /// An explicit path must exist and parse. Without one, the platform
    /// config directory is tried and a missing file means defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::load_from_path(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::load_from_path(&path).unwrap_or_else(|e| {
                    warn!("Ignoring config {}: {:#}", path.display(), e);
                    Self::default()
                }),
                _ => Self::default(),
            },
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load configuration from a specific YAML file
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let config: Self = serde_yaml_ng::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;

        debug!("Loaded site config from {}", path.display());
        Ok(config)
    }

    /// Platform config file location, if a home directory is known
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("io", "mcp-navigator", "mcp-navigator")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Apply overrides from a key lookup (the process environment in practice)
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(base_path) = non_empty(ENV_BASE_PATH) {
            self.base_path = base_path;
        }
        if let Some(data_source) = non_empty(ENV_DATA_SOURCE) {
            self.data_source = data_source;
        }
        if let Some(build_time) = non_empty(ENV_BUILD_TIME) {
            self.build_time = Some(build_time);
        }
    }

    /// Base path without a trailing slash; `""` for the root
    pub fn normalized_base(&self) -> String {
        normalize_base_path(&self.base_path)
    }

    /// Link to a site path under the base path
    pub fn href(&self, path: &str) -> String {
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
        format!("{}{}", self.normalized_base(), path)
    }

    /// Footer timestamp: the configured build time, or now
    pub fn build_time_display(&self) -> String {
        self.build_time
            .clone()
            .unwrap_or_else(|| chrono::Utc::now().to_rfc3339())
    }
}

/// Canonical form of a base path: `""` for the root, otherwise a leading
/// slash and no trailing slash
pub fn normalize_base_path(base_path: &str) -> String {
    let trimmed = base_path.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
