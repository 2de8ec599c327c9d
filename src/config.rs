//! Generator configuration.
//!
//! Settings come from an optional `assetchain-gen.yaml` file. Every field has a
//! default, so running without a config file reproduces the stock behavior:
//! read `assetchains.old`, write `<name>.cmd` files into the working directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::GenError;
use crate::extraction::DEFAULT_MARKER;
use crate::rewrite::RuleSet;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "assetchain-gen.yaml";

/// Environment variable overriding the input path
pub const INPUT_ENV: &str = "ASSETCHAIN_GEN_INPUT";

/// Top-level configuration from assetchain-gen.yaml
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GenConfig {
    /// Command list to read
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// Directory receiving the generated files
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Extension of generated files, without the leading dot
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Literal preceding the chain name on a launch line
    #[serde(default = "default_marker")]
    pub marker: String,

    /// Rewrite rules; replaces the built-in set entirely when present
    #[serde(default)]
    pub rules: RuleSet,
}

fn default_input() -> PathBuf {
    PathBuf::from("assetchains.old")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_extension() -> String {
    "cmd".to_string()
}

fn default_marker() -> String {
    DEFAULT_MARKER.to_string()
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            output_dir: default_output_dir(),
            extension: default_extension(),
            marker: default_marker(),
            rules: RuleSet::default(),
        }
    }
}

impl GenConfig {
    /// Load configuration from a YAML file and validate it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, GenError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            GenError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::from_yaml(&contents)
            .map_err(|e| GenError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Parse configuration from YAML text and validate it.
    ///
    /// An empty document yields the defaults.
    pub fn from_yaml(contents: &str) -> Result<Self, GenError> {
        let config: GenConfig = if contents.trim().is_empty() {
            GenConfig::default()
        } else {
            serde_yaml::from_str(contents)
                .map_err(|e| GenError::Config(format!("Failed to parse YAML: {}", e)))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, GenError> {
        let path = path.as_ref();
        if path.exists() {
            tracing::debug!("Loading configuration from {}", path.display());
            Self::from_file(path)
        } else {
            tracing::debug!("No configuration at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Resolve the input path with precedence: CLI > ENV > config file > default.
    ///
    /// `self.input` already holds the config file value or the default. An
    /// empty environment value is treated as unset.
    pub fn resolve_input(&mut self, cli_override: Option<PathBuf>, env_value: Option<String>) {
        if let Some(path) = cli_override {
            tracing::debug!("Using input from CLI flag: {}", path.display());
            self.input = path;
            return;
        }

        if let Some(path) = env_value.filter(|p| !p.is_empty()) {
            tracing::debug!("Using input from {}: {}", INPUT_ENV, path);
            self.input = PathBuf::from(path);
        }
    }

    pub fn validate(&self) -> Result<(), GenError> {
        if self.marker.is_empty() {
            return Err(GenError::Config("'marker' must not be empty".to_string()));
        }

        if self.extension.is_empty() {
            return Err(GenError::Config("'extension' must not be empty".to_string()));
        }

        // The extension is appended to a file name; it must not escape output_dir
        if self.extension.contains(['/', '\\']) || self.extension.starts_with('.') {
            return Err(GenError::Config(format!(
                "'extension' must be a bare extension like \"cmd\", got {:?}",
                self.extension
            )));
        }

        self.rules.validate()
    }
}
