//! nlsql configuration.
//!
//! Loaded from TOML. Lookup order: an explicit path (`--config` or
//! `NLSQL_CONFIG`), then `<config_dir>/nlsql/config.toml`. A missing default
//! file means defaults; a missing explicit file is an error.
//!
//! ```toml
//! max_query_chars = 500
//! format = "json"
//! log_level = "info"
//! history_file = "/home/me/.nlsql_history"
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{NlSqlError, NlSqlResult};

/// Default cap on query length, in characters.
pub const DEFAULT_MAX_QUERY_CHARS: usize = 500;

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Bare SQL on success, one error line on failure
    #[default]
    Text,
    /// The full result envelope as JSON
    Json,
}

/// Main configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Longest accepted query, counted in chars after trimming
    pub max_query_chars: usize,

    /// Output format when `--format` is not given
    pub format: OutputFormat,

    /// `tracing` filter used when `NLSQL_LOG` is unset
    pub log_level: String,

    /// REPL history file
    pub history_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_query_chars: DEFAULT_MAX_QUERY_CHARS,
            format: OutputFormat::Text,
            log_level: "warn".to_string(),
            history_file: None,
        }
    }
}

impl Config {
    /// Create a new configuration builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Parse a TOML document.
    pub fn from_toml(text: &str) -> NlSqlResult<Self> {
        let config: Config =
            toml::from_str(text).map_err(|e| NlSqlError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a config file.
    pub fn from_file(path: &Path) -> NlSqlResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Load from `explicit` if given, else from the default location if it exists.
    pub fn load(explicit: Option<&Path>) -> NlSqlResult<Self> {
        if let Some(path) = explicit {
            tracing::debug!("Loading config from {}", path.display());
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => {
                tracing::debug!("Loading config from {}", path.display());
                Self::from_file(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// `<config_dir>/nlsql/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("nlsql").join("config.toml"))
    }

    /// History file for the REPL, defaulting to `~/.nlsql_history`.
    pub fn history_path(&self) -> Option<PathBuf> {
        self.history_file
            .clone()
            .or_else(|| dirs::home_dir().map(|p| p.join(".nlsql_history")))
    }

    fn validate(&self) -> NlSqlResult<()> {
        if self.max_query_chars == 0 {
            return Err(NlSqlError::Config("max_query_chars must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the query length cap
    pub fn max_query_chars(mut self, n: usize) -> Self {
        self.config.max_query_chars = n;
        self
    }

    /// Set the output format
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.config.format = format;
        self
    }

    /// Set the log filter
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.config.log_level = level.into();
        self
    }

    /// Set the REPL history file
    pub fn history_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.history_file = Some(path.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Config {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_document_gives_defaults() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_document() {
        let config = Config::from_toml("format = \"json\"\nmax_query_chars = 80\n").unwrap();
        assert_eq!(
            config,
            Config::builder().format(OutputFormat::Json).max_query_chars(80).build()
        );
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = Config::from_toml("colour = true").unwrap_err();
        assert!(matches!(err, NlSqlError::Config(_)));
    }

    #[test]
    fn test_zero_length_cap_rejected() {
        let err = Config::from_toml("max_query_chars = 0").unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: max_query_chars must be at least 1");
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let path = std::env::temp_dir().join("nlsql-does-not-exist").join("config.toml");
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, NlSqlError::Io(_)));
        assert_eq!(err.kind(), ErrorKind::IoError);
    }

    #[test]
    fn test_load_explicit_file() {
        let path = std::env::temp_dir().join(format!("nlsql-config-{}.toml", std::process::id()));
        std::fs::write(&path, "log_level = \"debug\"\n").unwrap();
        let config = Config::load(Some(&path)).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.max_query_chars, DEFAULT_MAX_QUERY_CHARS);
    }

    #[test]
    fn test_history_file_override() {
        let config = Config::builder().history_file("/tmp/h").build();
        assert_eq!(config.history_path(), Some(PathBuf::from("/tmp/h")));
    }
}
