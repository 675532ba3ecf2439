//! # nlsql: natural language to SQL, by the rules
//!
//! nlsql turns short requests such as "사용자 목록을 보여줘" into a fixed
//! `SELECT` for one of three known tables. There is no model behind it:
//! keywords pick the table, and the table picks the statement.
//!
//! ## Quick Example
//!
//! ```
//! let generated = nlsql::generate("주문 내역을 찾아줘").unwrap();
//! assert_eq!(
//!     generated.sql,
//!     "SELECT id, user_id, total_amount, created_at FROM orders ORDER BY created_at DESC LIMIT 10"
//! );
//! ```
//!
//! ## Pipeline
//!
//! | Stage             | Fails with        |
//! |-------------------|-------------------|
//! | `input_validator` | `ValidationError` |
//! | `table_matcher`   | `MatchError`      |
//! | `template_filler` | never             |

pub mod catalog;
pub mod config;
pub mod error;
pub mod guard;
pub mod matcher;
pub mod orchestrator;
pub mod template;
pub mod validator;

pub mod prelude {
    pub use crate::catalog::{CATALOG, OrderBy, SortOrder, Table, TableMapping};
    pub use crate::config::{Config, OutputFormat};
    pub use crate::error::*;
    pub use crate::orchestrator::{CONFIDENCE, GeneratedSql, Orchestrator, ResultEnvelope, Trace};
    pub use crate::template::ToSql;
}

/// Generate SQL for a request using the default configuration.
///
/// # Example
///
/// ```
/// use nlsql::error::Stage;
///
/// let err = nlsql::generate("   ").unwrap_err();
/// assert_eq!(err.stage, Stage::InputValidator);
/// ```
pub fn generate(query: &str) -> Result<orchestrator::GeneratedSql, error::StageError> {
    orchestrator::Orchestrator::default().run(query)
}
