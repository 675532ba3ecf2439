//! Read-only SQL check.
//!
//! Accepts a statement only when it starts with `SELECT`, has a `FROM`
//! clause, and contains none of the write/DDL keywords below. Keywords are
//! compared as whole words, so `updated_at` is not `UPDATE`.

use crate::error::{NlSqlError, NlSqlResult};

const FORBIDDEN: &[&str] = &[
    "DROP", "DELETE", "UPDATE", "INSERT", "TRUNCATE", "ALTER", "CREATE", "REPLACE",
];

/// Check that `sql` is a plain read-only SELECT.
pub fn check(sql: &str) -> NlSqlResult<()> {
    let upper = sql.trim().to_uppercase();
    if upper.is_empty() {
        return Err(NlSqlError::UnsafeSql("statement is empty".to_string()));
    }

    let words: Vec<&str> = upper
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|w| !w.is_empty())
        .collect();

    if words.first() != Some(&"SELECT") {
        return Err(NlSqlError::UnsafeSql("only SELECT statements are allowed".to_string()));
    }

    if let Some(word) = words.iter().find(|w| FORBIDDEN.contains(*w)) {
        return Err(NlSqlError::UnsafeSql(format!("'{}' is not allowed", word)));
    }

    if !words.contains(&"FROM") {
        return Err(NlSqlError::UnsafeSql("missing FROM clause".to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(sql: &str) -> String {
        check(sql).unwrap_err().to_string()
    }

    #[test]
    fn test_plain_select() {
        assert!(check("SELECT id, updated_at FROM users LIMIT 5").is_ok());
        assert!(check("  select * from orders").is_ok());
    }

    #[test]
    fn test_empty() {
        assert_eq!(reason("   "), "Unsafe SQL: statement is empty");
    }

    #[test]
    fn test_not_select() {
        let not_select = "Unsafe SQL: only SELECT statements are allowed";
        assert_eq!(reason("DELETE FROM users"), not_select);
        assert_eq!(reason("WITH x AS (SELECT 1) SELECT * FROM x"), not_select);
    }

    #[test]
    fn test_smuggled_write() {
        assert_eq!(
            reason("SELECT 1 FROM users; DROP TABLE users"),
            "Unsafe SQL: 'DROP' is not allowed"
        );
        assert_eq!(
            reason("select * from t; insert into t values (1)"),
            "Unsafe SQL: 'INSERT' is not allowed"
        );
    }

    #[test]
    fn test_missing_from() {
        assert_eq!(reason("SELECT 1"), "Unsafe SQL: missing FROM clause");
    }
}
