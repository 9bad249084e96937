use crate::domain::{TagPattern, DEFAULT_TAG_PATTERN};
use crate::error::{ReleaseTagsError, Result};
use crate::git::Backend;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Represents the complete configuration for release-tags.
///
/// Every field has a default, so running with no configuration at all reads
/// `v{version}` tags from the repository in the working directory via `git`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Tag naming pattern with a single `{version}` placeholder
    #[serde(default = "default_pattern")]
    pub pattern: String,

    #[serde(default)]
    pub backend: Backend,

    /// Repository directory; `None` means the working directory
    #[serde(default)]
    pub repo: Option<PathBuf>,
}

/// Returns the default tag pattern.
fn default_pattern() -> String {
    DEFAULT_TAG_PATTERN.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            pattern: default_pattern(),
            backend: Backend::default(),
            repo: None,
        }
    }
}

/// Values given on the command line; each one that is set wins over the file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub pattern: Option<String>,
    pub backend: Option<Backend>,
    pub repo: Option<PathBuf>,
}

impl Config {
    /// Apply command-line overrides on top of this configuration
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(pattern) = overrides.pattern {
            self.pattern = pattern;
        }
        if let Some(backend) = overrides.backend {
            self.backend = backend;
        }
        if overrides.repo.is_some() {
            self.repo = overrides.repo;
        }
        self
    }

    /// Compile the configured tag pattern
    pub fn tag_pattern(&self) -> Result<TagPattern> {
        TagPattern::new(self.pattern.clone())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Only an explicitly given file is read; nothing is discovered implicitly.
///
/// # Arguments
/// * `config_path` - Optional path to a TOML configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If the file cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let Some(path) = config_path else {
        return Ok(Config::default());
    };

    let config_str = fs::read_to_string(path).map_err(|e| {
        ReleaseTagsError::config(format!("Cannot read config file '{}': {}", path, e))
    })?;

    let config: Config = toml::from_str(&config_str).map_err(|e| {
        ReleaseTagsError::config(format!("Invalid config file '{}': {}", path, e))
    })?;

    Ok(config)
}
