//! Configuration for the resolution engine

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::i18n::Locale;

/// Errors that can occur when reading TOML files (token sources, translations,
/// engine configuration)
#[derive(Error, Debug)]
pub enum FileError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Configuration options for tree resolution
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ResolveConfig {
    /// Locale used when the caller does not supply one
    pub default_locale: Locale,

    /// Prefix for ids generated for elements that carry none
    pub id_prefix: String,

    /// Classes attached to failure placeholders
    pub failure_classes: Vec<String>,

    /// Maximum nesting of linked sub-trees
    pub max_link_depth: usize,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            default_locale: Locale::default(),
            id_prefix: "randomid".to_string(),
            failure_classes: vec!["alert".to_string(), "error".to_string()],
            max_link_depth: 32,
        }
    }
}

impl ResolveConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self, FileError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, FileError> {
        Ok(toml::from_str(content)?)
    }

    /// Set the locale used when none is given
    pub fn with_default_locale(mut self, locale: Locale) -> Self {
        self.default_locale = locale;
        self
    }

    /// Set the prefix of generated ids
    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    /// Set the classes of failure placeholders
    pub fn with_failure_classes(mut self, classes: Vec<String>) -> Self {
        self.failure_classes = classes;
        self
    }

    /// Set the maximum linked sub-tree depth
    pub fn with_max_link_depth(mut self, depth: usize) -> Self {
        self.max_link_depth = depth;
        self
    }
}
