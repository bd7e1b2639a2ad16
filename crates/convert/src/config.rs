//! Converter configuration via `kvmarshal.toml`
//!
//! Every field has a default, so an empty file is a valid configuration.

use kvmarshal_core::Limits;
use kvmarshal_host::SerializerPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Conventional config file name.
pub const CONFIG_FILE_NAME: &str = "kvmarshal.toml";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read or written
    #[error("Failed to access config file '{}': {source}", .path.display())]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// The config text is not valid TOML for this schema
    #[error("Failed to parse config: {0}")]
    Parse(String),

    /// A field holds an out-of-range value
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Converter configuration loaded from `kvmarshal.toml`.
///
/// # Example
///
/// ```toml
/// strict_types = false
/// serializer = "native"
/// max_nesting_depth = 128
/// pool_capacity = 4096
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// Enforce bin name length, stop on unset bins, reject index overflow.
    #[serde(default)]
    pub strict_types: bool,
    /// Serializer used for objects with no wire representation.
    #[serde(default)]
    pub serializer: SerializerPolicy,
    /// Maximum list/map nesting depth accepted by the dispatcher.
    #[serde(default = "default_max_nesting_depth")]
    pub max_nesting_depth: usize,
    /// Pooled byte buffers available to one conversion call.
    #[serde(default = "default_pool_capacity")]
    pub pool_capacity: usize,
}

fn default_max_nesting_depth() -> usize {
    128
}

fn default_pool_capacity() -> usize {
    4096
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            strict_types: false,
            serializer: SerializerPolicy::default(),
            max_nesting_depth: default_max_nesting_depth(),
            pool_capacity: default_pool_capacity(),
        }
    }
}

impl ConverterConfig {
    /// Strict mode on, everything else default.
    pub fn strict() -> Self {
        Self {
            strict_types: true,
            ..Self::default()
        }
    }

    /// Check field ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_nesting_depth == 0 {
            return Err(ConfigError::Invalid(
                "max_nesting_depth must be at least 1".to_string(),
            ));
        }
        if self.pool_capacity == 0 {
            return Err(ConfigError::Invalid(
                "pool_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Limits derived from this configuration.
    pub fn limits(&self) -> Limits {
        Limits {
            max_nesting_depth: self.max_nesting_depth,
            ..Limits::default()
        }
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# kvmarshal converter configuration
#
# Strict mode (default: false)
#   - bin names longer than 14 bytes are rejected
#   - a bin that cannot be set stops the record
#   - index overflow is an error instead of saturating
strict_types = false

# Serializer for values with no wire representation (booleans, tuples,
# class instances): "none", "native" (default) or "user".
serializer = "native"

# Maximum list/map nesting depth (default: 128)
max_nesting_depth = 128

# Pooled byte buffers per conversion call (default: 4096)
pool_capacity = 4096
"#
    }

    /// Parse and validate config text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ConverterConfig =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate config from a file path.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Write the default config file if it does not already exist.
    pub fn write_default_if_missing(path: &Path) -> Result<(), ConfigError> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
