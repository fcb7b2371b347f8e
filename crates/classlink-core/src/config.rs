//! Configuration for resolution, traversal, and output settings.
//!
//! Load order: `.classlink.toml` → environment variables → defaults.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the optional config file at the project root.
pub const CONFIG_FILE: &str = ".classlink.toml";

/// Top-level classlink configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClasslinkConfig {
    pub resolve: ResolveConfig,
    pub traversal: TraversalConfig,
    pub output: OutputConfig,
}

/// Path resolution configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveConfig {
    /// Cache file name, relative to the project root.
    pub cache_file: String,
    /// Glob patterns (relative to the project root) of directories that are
    /// never considered as source roots, e.g. `"**/build/**"`.
    pub exclude: Vec<String>,
    /// Skip directories listed in `.gitignore` while discovering source roots.
    pub respect_gitignore: bool,
}

/// Traversal configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalConfig {
    /// Depth used when none is given on the command line.
    pub default_depth: usize,
}

/// Bundle output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default bundle format: `txt`, `md`, or `json`.
    pub format: String,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            cache_file: crate::cache::CACHE_FILE.to_string(),
            exclude: Vec::new(),
            respect_gitignore: false,
        }
    }
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self { default_depth: 1 }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "txt".to_string(),
        }
    }
}

/// Helper to parse an env var and apply it to a config field.
fn env_override<T: std::str::FromStr>(var: &str, target: &mut T) {
    if let Ok(v) = std::env::var(var)
        && let Ok(n) = v.parse()
    {
        *target = n;
    }
}

impl ClasslinkConfig {
    /// Load config from `.classlink.toml` in the project root, with env var overrides.
    /// Falls back to defaults if no config file exists.
    pub fn load(project_root: &Path) -> Result<Self> {
        let config_path = project_root.join(CONFIG_FILE);

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };

        env_override("CLASSLINK_DEPTH", &mut config.traversal.default_depth);
        env_override("CLASSLINK_CACHE_FILE", &mut config.resolve.cache_file);

        if config.resolve.cache_file.trim().is_empty() {
            anyhow::bail!("resolve.cache_file must not be empty");
        }

        Ok(config)
    }

    /// Absolute location of the class-path cache for `project_root`.
    pub fn cache_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.resolve.cache_file)
    }
}
