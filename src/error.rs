//! Error types for nlsql.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// The main error type for nlsql operations.
#[derive(Debug, Error)]
pub enum NlSqlError {
    /// The query text was empty, unreadable, or too long.
    #[error("Validation error: {0}")]
    Validation(String),

    /// No table mapping matched the query.
    #[error("Match error: {0}")]
    Match(String),

    /// An SQL string failed the read-only safety check.
    #[error("Unsafe SQL: {0}")]
    UnsafeSql(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl NlSqlError {
    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a match error.
    pub fn no_match(message: impl Into<String>) -> Self {
        Self::Match(message.into())
    }

    /// Short machine-readable kind, used in the JSON envelope.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::ValidationError,
            Self::Match(_) => ErrorKind::MatchError,
            Self::UnsafeSql(_) => ErrorKind::UnsafeSql,
            Self::Config(_) => ErrorKind::ConfigError,
            Self::Io(_) => ErrorKind::IoError,
        }
    }
}

/// Error classification reported alongside a failed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    ValidationError,
    MatchError,
    UnsafeSql,
    ConfigError,
    IoError,
}

/// A pipeline stage, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    InputValidator,
    TableMatcher,
    TemplateFiller,
}

impl Stage {
    /// All stages in the order the orchestrator runs them.
    pub const ALL: [Stage; 3] = [Stage::InputValidator, Stage::TableMatcher, Stage::TemplateFiller];

    pub fn name(&self) -> &'static str {
        match self {
            Stage::InputValidator => "input_validator",
            Stage::TableMatcher => "table_matcher",
            Stage::TemplateFiller => "template_filler",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A pipeline failure tagged with the stage that produced it.
#[derive(Debug, Error)]
#[error("[{stage}] {source}")]
pub struct StageError {
    pub stage: Stage,
    #[source]
    pub source: NlSqlError,
}

impl StageError {
    pub fn new(stage: Stage, source: NlSqlError) -> Self {
        Self { stage, source }
    }

    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }
}

/// Result type alias for nlsql operations.
pub type NlSqlResult<T> = Result<T, NlSqlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NlSqlError::validation("query is empty");
        assert_eq!(err.to_string(), "Validation error: query is empty");
    }

    #[test]
    fn test_stage_error_display() {
        let err = StageError::new(Stage::TableMatcher, NlSqlError::no_match("no table matched"));
        assert_eq!(err.to_string(), "[table_matcher] Match error: no table matched");
        assert_eq!(err.kind(), ErrorKind::MatchError);
    }

    #[test]
    fn test_stage_order() {
        let names: Vec<&str> = Stage::ALL.iter().map(Stage::name).collect();
        assert_eq!(names, vec!["input_validator", "table_matcher", "template_filler"]);
    }
}
