//! Layered configuration
//!
//! `defaults/quiz.default.toml` is embedded into the crate so documented defaults and runtime
//! behavior stay in sync. Callers layer user files and single-key overrides on top through
//! [`Loader`] before deserializing into [`QuizConfig`].

use crate::quiz::parsing::TableMarkers;
use crate::quiz::selection::SelectionMethod;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_TOML: &str = include_str!("../../defaults/quiz.default.toml");

/// Top-level configuration
#[derive(Debug, Clone, Deserialize)]
pub struct QuizConfig {
    pub markers: MarkersConfig,
    pub dispatch: DispatchConfig,
    pub catalog: CatalogConfig,
    pub selection: SelectionConfig,
}

/// Localized phrases of the table grammars, as regex sources.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkersConfig {
    pub task_headers: Vec<String>,
    pub choice_instructions: Vec<String>,
    pub sequence_instructions: Vec<String>,
    pub matching_instructions: Vec<String>,
}

impl MarkersConfig {
    /// Compile into the matcher the table grammars use.
    pub fn compile(&self) -> Result<TableMarkers, regex::Error> {
        TableMarkers::from_patterns(
            &self.task_headers,
            &self.choice_instructions,
            &self.sequence_instructions,
            &self.matching_instructions,
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DispatchConfig {
    /// Grammar names in priority order
    pub order: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    pub asset_base: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SelectionConfig {
    pub default_count: usize,
    pub method: SelectionMethod,
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

    /// Layer an optional configuration file (ignored if absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (CLI flags).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<QuizConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<QuizConfig, ConfigError> {
    Loader::new().build()
}
