//! Keyword oracle (C1).
//!
//! Decides whether an identifier string is a *true reserved* Spanner
//! keyword — one that cannot appear as a bare identifier — or a context
//! keyword that may. Per spec.md §4.1 this must route through the bound
//! dialect lexer's authoritative predicate rather than a hand-maintained
//! list, so `is_reserved` tokenizes `s` with the same `sqlparser` dialect
//! used everywhere else in this crate and defers the reserved/non-reserved
//! call to that dialect's own keyword table.

use sqlparser::dialect::Dialect as _;
use sqlparser::tokenizer::{Token, Tokenizer};

use crate::dialect::spanner_dialect;

/// Returns `true` exactly when `s` is a reserved Spanner keyword (cannot
/// appear as a bare identifier). Strings that are not recognized as any
/// SQL keyword at all — including ordinary column/table names — are never
/// reserved.
pub fn is_reserved(s: &str) -> bool {
    let dialect = spanner_dialect();
    let mut tokenizer = Tokenizer::new(&*dialect, s);
    let tokens = match tokenizer.tokenize() {
        Ok(tokens) => tokens,
        Err(_) => return false,
    };

    // `s` must be exactly one keyword token: anything else (multiple
    // tokens, an identifier, a literal) is not a bare reserved keyword.
    let mut words = tokens.into_iter().filter(|t| !matches!(t, Token::Whitespace(_)));
    let only_token = match (words.next(), words.next()) {
        (Some(tok), None) => tok,
        _ => return false,
    };

    match only_token {
        Token::Word(word) if word.keyword != sqlparser::keywords::Keyword::NoKeyword => {
            dialect.is_reserved_for_identifier(word.keyword)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_keywords_are_reserved() {
        for kw in [
            "SELECT", "FROM", "WHERE", "CASE", "WHEN", "THEN", "ELSE", "END", "JOIN", "UNNEST",
            "INTERVAL", "ARRAY", "STRUCT", "WITH", "WINDOW",
        ] {
            assert!(is_reserved(kw), "{kw} should be reserved");
            assert!(is_reserved(&kw.to_lowercase()), "{kw} should be case-insensitively reserved");
        }
    }

    #[test]
    fn context_keywords_are_not_reserved() {
        for kw in [
            "INSERT", "UPDATE", "DELETE", "TABLE", "INDEX", "VIEW", "QUALIFY", "VALUES", "OFFSET",
            "MATCHED", "FIRST", "LAST",
        ] {
            assert!(!is_reserved(kw), "{kw} should not be reserved");
        }
    }

    #[test]
    fn plain_identifiers_are_never_reserved() {
        for ident in ["user_id", "my_table", "total_amount", "x"] {
            assert!(!is_reserved(ident));
        }
    }

    #[test]
    fn multi_word_input_is_not_a_bare_keyword() {
        assert!(!is_reserved("SELECT FROM"));
    }
}
