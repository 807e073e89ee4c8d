//! Run configuration: resolution and validation.
//!
//! The config document is TOML with three mandatory keys and no defaults:
//!
//! ```toml
//! seed = 42
//! window = 5
//! version = "v1"
//! ```

use std::num::NonZeroUsize;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

/// Errors from config loading and resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("cannot read config '{path}': {reason}")]
    Unreadable { path: String, reason: String },

    #[error("invalid config document: {0}")]
    Parse(String),

    #[error("missing required key '{0}'")]
    MissingKey(&'static str),

    #[error("key '{key}' must be {expected}, got {found}")]
    WrongType {
        key: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("window must be >= 1, got {0}")]
    InvalidWindow(i64),
}

/// Resolved, immutable run parameters.
///
/// `seed` is reported for reproducibility only; nothing in the signal
/// pipeline consumes randomness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunConfig {
    pub seed: i64,
    pub window: NonZeroUsize,
    pub version: String,
}

impl RunConfig {
    /// Build a config from already-typed values, applying the window check.
    pub fn new(seed: i64, window: i64, version: impl Into<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            seed,
            window: validate_window(window)?,
            version: version.into(),
        })
    }

    /// Resolve from a key-value mapping. Keys are checked in the order
    /// `seed`, `window`, `version`; the first problem wins.
    pub fn resolve(source: &toml::Table) -> Result<Self, ConfigError> {
        let seed = require(source, "seed")?
            .as_integer()
            .ok_or_else(|| wrong_type(source, "seed", "an integer"))?;
        let window = require(source, "window")?
            .as_integer()
            .ok_or_else(|| wrong_type(source, "window", "an integer"))?;
        let version = require(source, "version")?
            .as_str()
            .ok_or_else(|| wrong_type(source, "version", "a string"))?;

        Self::new(seed, window, version)
    }

    /// Parse a TOML string and resolve it.
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        ConfigDocument::parse(s)?.resolve()
    }

    /// Read a TOML file and resolve it.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        ConfigDocument::read(path)?.resolve()
    }
}

fn validate_window(window: i64) -> Result<NonZeroUsize, ConfigError> {
    usize::try_from(window)
        .ok()
        .and_then(NonZeroUsize::new)
        .ok_or(ConfigError::InvalidWindow(window))
}

fn require<'a>(source: &'a toml::Table, key: &'static str) -> Result<&'a toml::Value, ConfigError> {
    source.get(key).ok_or(ConfigError::MissingKey(key))
}

fn wrong_type(source: &toml::Table, key: &'static str, expected: &'static str) -> ConfigError {
    ConfigError::WrongType {
        key,
        expected,
        found: source.get(key).map_or("nothing", |v| v.type_str()),
    }
}

/// A parsed but not yet resolved config document.
///
/// Kept separate from `RunConfig` so a failed resolution can still report the
/// document's `version` tag.
#[derive(Debug, Clone)]
pub struct ConfigDocument {
    table: toml::Table,
}

impl ConfigDocument {
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let table: toml::Table = toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Ok(Self { table })
    }

    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::parse(&content)
    }

    /// The document's `version` value, if it is a string.
    pub fn version_hint(&self) -> Option<&str> {
        self.table.get("version").and_then(|v| v.as_str())
    }

    pub fn resolve(&self) -> Result<RunConfig, ConfigError> {
        RunConfig::resolve(&self.table)
    }
}
