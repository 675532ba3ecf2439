//! Input validation, the first pipeline stage.
//!
//! A query passes when, after trimming, it is non-empty, contains at least
//! one alphabetic character (any script), and fits within the length cap.
//! Whether its words name a table is left to the matcher.

use crate::config::DEFAULT_MAX_QUERY_CHARS;
use crate::error::{NlSqlError, NlSqlResult};

/// Checks raw query text before matching.
#[derive(Debug, Clone, Copy)]
pub struct InputValidator {
    max_chars: usize,
}

impl Default for InputValidator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_QUERY_CHARS)
    }
}

impl InputValidator {
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }

    /// Validate `input`, returning the trimmed query.
    pub fn validate<'a>(&self, input: &'a str) -> NlSqlResult<&'a str> {
        let query = input.trim();

        if query.is_empty() {
            return Err(NlSqlError::validation("query is empty"));
        }

        let len = query.chars().count();
        if len > self.max_chars {
            return Err(NlSqlError::validation(format!(
                "query is {} characters long, the limit is {}",
                len, self.max_chars
            )));
        }

        if !query.chars().any(char::is_alphabetic) {
            return Err(NlSqlError::validation(format!(
                "unrecognized input '{}': no words found",
                query
            )));
        }

        Ok(query)
    }
}

/// Validate with the default length cap.
pub fn validate(input: &str) -> NlSqlResult<&str> {
    InputValidator::default().validate(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_whitespace() {
        for input in ["", " ", "\t\n", "\u{3000}"] {
            let err = validate(input).unwrap_err();
            assert!(matches!(err, NlSqlError::Validation(_)), "{input:?} should be rejected");
        }
    }

    #[test]
    fn test_no_words() {
        let err = validate("?? 123 !!").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: unrecognized input '?? 123 !!': no words found"
        );
    }

    #[test]
    fn test_returns_trimmed_query() {
        let query = validate("  사용자 목록을 보여줘 \n").unwrap();
        assert_eq!(query, "사용자 목록을 보여줘");
    }

    #[test]
    fn test_unknown_words_pass() {
        assert_eq!(validate("날씨가 어때?").unwrap(), "날씨가 어때?");
    }

    #[test]
    fn test_length_cap_counts_chars() {
        let validator = InputValidator::new(3);
        assert!(validator.validate("주문들").is_ok());
        assert!(matches!(validator.validate("주문내역"), Err(NlSqlError::Validation(_))));
    }
}
