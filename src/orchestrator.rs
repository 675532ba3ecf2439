//! Pipeline orchestration.
//!
//! Runs validator → matcher → template filler in fixed order and stops at
//! the first failing stage. The outcome is a `Result`; [`ResultEnvelope`]
//! is its serializable view for the CLI.

use serde::Serialize;

use crate::catalog::Table;
use crate::config::Config;
use crate::error::{ErrorKind, Stage, StageError};
use crate::matcher::{self, TableMatch};
use crate::template;
use crate::validator::InputValidator;

/// Confidence reported for every generated statement.
pub const CONFIDENCE: f64 = 0.9;

/// A generated statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedSql {
    pub sql: String,
    pub table: Table,
    /// Catalog keyword that selected the table
    pub keyword: &'static str,
    pub confidence: f64,
}

/// Runs the three stages.
#[derive(Debug, Clone, Copy, Default)]
pub struct Orchestrator {
    validator: InputValidator,
}

impl Orchestrator {
    pub fn new(config: &Config) -> Self {
        Self {
            validator: InputValidator::new(config.max_query_chars),
        }
    }

    /// Generate SQL for `query`.
    pub fn run(&self, query: &str) -> Result<GeneratedSql, StageError> {
        self.run_traced(query).result
    }

    /// Generate SQL for `query`, also recording which stages completed.
    pub fn run_traced(&self, query: &str) -> Trace {
        let mut completed = Vec::with_capacity(Stage::ALL.len());
        let result = self.run_stages(query, &mut completed);

        match &result {
            Ok(generated) => tracing::info!("Generated SQL for table '{}'", generated.table),
            Err(e) => tracing::info!("Pipeline stopped: {}", e),
        }

        Trace { completed, result }
    }

    fn run_stages(
        &self,
        query: &str,
        completed: &mut Vec<Stage>,
    ) -> Result<GeneratedSql, StageError> {
        tracing::debug!("{}: {:?}", Stage::InputValidator, query);
        let query = self
            .validator
            .validate(query)
            .map_err(|e| StageError::new(Stage::InputValidator, e))?;
        completed.push(Stage::InputValidator);

        tracing::debug!("{}: {:?}", Stage::TableMatcher, query);
        let TableMatch { mapping, keyword } =
            matcher::match_table(query).map_err(|e| StageError::new(Stage::TableMatcher, e))?;
        completed.push(Stage::TableMatcher);

        tracing::debug!("{}: {}", Stage::TemplateFiller, mapping.table);
        let sql = template::fill(mapping.table);
        completed.push(Stage::TemplateFiller);

        Ok(GeneratedSql {
            sql,
            table: mapping.table,
            keyword,
            confidence: CONFIDENCE,
        })
    }
}

/// Outcome of one request plus the stages that finished before it.
#[derive(Debug)]
pub struct Trace {
    pub completed: Vec<Stage>,
    pub result: Result<GeneratedSql, StageError>,
}

/// Serializable summary of one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultEnvelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<GeneratedSql>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    /// Stage that failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<Stage>,
    pub completed: Vec<Stage>,
}

impl From<Trace> for ResultEnvelope {
    fn from(trace: Trace) -> Self {
        match trace.result {
            Ok(generated) => Self {
                success: true,
                payload: Some(generated),
                error: None,
                error_kind: None,
                stage: None,
                completed: trace.completed,
            },
            Err(e) => Self {
                success: false,
                payload: None,
                error: Some(e.source.to_string()),
                error_kind: Some(e.kind()),
                stage: Some(e.stage),
                completed: trace.completed,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ORDERS_SQL: &str = "SELECT id, user_id, total_amount, created_at \
        FROM orders ORDER BY created_at DESC LIMIT 10";

    #[test]
    fn test_success() {
        let generated = Orchestrator::default().run("주문 내역을 찾아줘").unwrap();
        assert_eq!(
            generated,
            GeneratedSql {
                sql: ORDERS_SQL.to_string(),
                table: Table::Orders,
                keyword: "주문",
                confidence: CONFIDENCE,
            }
        );
    }

    #[test]
    fn test_validation_short_circuits() {
        let trace = Orchestrator::default().run_traced("   ");
        let err = trace.result.unwrap_err();
        assert_eq!(err.stage, Stage::InputValidator);
        assert_eq!(err.kind(), ErrorKind::ValidationError);
        assert!(trace.completed.is_empty());
    }

    #[test]
    fn test_match_failure_is_tagged() {
        let trace = Orchestrator::default().run_traced("오늘 날씨 알려줘");
        let err = trace.result.unwrap_err();
        assert_eq!(err.stage, Stage::TableMatcher);
        assert_eq!(err.kind(), ErrorKind::MatchError);
        assert_eq!(trace.completed, vec![Stage::InputValidator]);
    }

    #[test]
    fn test_config_length_cap() {
        let config = Config::builder().max_query_chars(4).build();
        let err = Orchestrator::new(&config).run("사용자 목록을 보여줘").unwrap_err();
        assert_eq!(err.stage, Stage::InputValidator);
    }

    #[test]
    fn test_envelope_from_success() {
        let trace = Orchestrator::default().run_traced("상품 정보를 조회해줘");
        let envelope = ResultEnvelope::from(trace);
        assert!(envelope.success);
        assert_eq!(envelope.stage, None);
        assert_eq!(envelope.completed, Stage::ALL.to_vec());
        assert_eq!(
            envelope.payload.map(|p| p.sql).as_deref(),
            Some("SELECT id, name, price FROM products ORDER BY id LIMIT 10")
        );
    }

    #[test]
    fn test_envelope_json_on_failure() {
        let envelope = ResultEnvelope::from(Orchestrator::default().run_traced(""));
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "success": false,
                "error": "Validation error: query is empty",
                "error_kind": "ValidationError",
                "stage": "input_validator",
                "completed": [],
            })
        );
    }
}
