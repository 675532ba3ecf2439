//! Keyword-to-table matching, the second pipeline stage.

use crate::catalog::{CATALOG, TableMapping, table_names};
use crate::error::{NlSqlError, NlSqlResult};

/// Request words that say "show me something" without naming what.
const VAGUE_WORDS: &[&str] = &[
    "매출", "데이터", "결과", "보여줘", "data", "result", "show",
];

/// Time scopes that make a request specific enough not to ask back.
const SPECIFIC_WORDS: &[&str] = &["최근", "지난달", "recent", "last month"];

/// A successful match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableMatch {
    pub mapping: &'static TableMapping,
    /// The catalog keyword found in the query.
    pub keyword: &'static str,
}

/// Find the first catalog table, in catalog order, with a keyword in `query`.
///
/// Matching is case-insensitive. Hangul keywords match anywhere, since
/// particles attach to the noun ("사용자들"). ASCII keywords must start a
/// word, so "Users" hits `users` but "remember" does not hit `member`.
pub fn match_table(query: &str) -> NlSqlResult<TableMatch> {
    let lowered = query.to_lowercase();

    for mapping in &CATALOG {
        if let Some(keyword) = mapping
            .keywords
            .iter()
            .copied()
            .find(|kw| contains_keyword(&lowered, kw))
        {
            tracing::debug!("Matched table '{}' on keyword '{}'", mapping.table, keyword);
            return Ok(TableMatch { mapping, keyword });
        }
    }

    Err(no_match_error(&lowered))
}

fn contains_keyword(haystack: &str, keyword: &str) -> bool {
    if !keyword.is_ascii() {
        return haystack.contains(keyword);
    }

    haystack.match_indices(keyword).any(|(at, _)| {
        haystack[..at]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric())
    })
}

fn no_match_error(lowered: &str) -> NlSqlError {
    let mut message = String::from("no table matched");

    let vague = VAGUE_WORDS.iter().any(|w| lowered.contains(w));
    let specific = SPECIFIC_WORDS.iter().any(|w| lowered.contains(w));
    if vague && !specific {
        message.push_str(&format!(
            ". 어떤 테이블의 데이터를 찾으시나요? (옵션: {})",
            table_names().join(", ")
        ));
    }
    NlSqlError::no_match(message)
}
