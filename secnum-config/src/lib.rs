//! Shared configuration loader for the secnum toolchain.
//!
//! `defaults/secnum.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files
//! on top of those defaults via [`Loader`] before deserializing into
//! [`SecnumConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/secnum.default.toml");

/// Top-level configuration consumed by secnum applications.
#[derive(Debug, Clone, Deserialize)]
pub struct SecnumConfig {
    pub indexing: IndexingConfig,
}

/// Mirrors the knobs exposed by the indexing pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct IndexingConfig {
    pub enable: bool,
    pub index_styles: String,
    pub connector: String,
    pub global_prefix: String,
    pub global_suffix: String,
    pub allow_html: bool,
    pub start_level: u32,
}

impl IndexingConfig {
    /// Bridge into the core pipeline's settings type.
    pub fn into_settings(self) -> secnum::IndexingSettings {
        secnum::IndexingSettings {
            enable: self.enable,
            index_styles: self.index_styles,
            connector: self.connector,
            global_prefix: self.global_prefix,
            global_suffix: self.global_suffix,
            allow_html: self.allow_html,
            start_level: self.start_level,
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<SecnumConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<SecnumConfig, ConfigError> {
    Loader::new().build()
}
