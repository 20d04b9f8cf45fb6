//! Error types for Spanner SQL parsing and translation.
//!
//! # Error handling strategy
//!
//! This crate uses two complementary error handling patterns, matching the
//! fatal/non-fatal split used throughout this crate's SQL-analysis lineage:
//!
//! - [`ParseError`]: fatal errors that stop translation of the statement (or
//!   the whole `parse` call) that produced them. Adapted from whatever shape
//!   the bound dialect parser (`sqlparser`) reports.
//!
//! - [`Diagnostic`]: non-fatal notes accumulated while translating a
//!   statement whose dialect-AST shape this crate does not (yet) know how to
//!   translate faithfully. The statement still produces a result — a
//!   `todo`-kind placeholder node — rather than aborting the whole `parse`
//!   call. A diagnostic is not an error the caller must act on; it is a
//!   coverage gap report.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A fatal error encountered while parsing or translating a single statement.
///
/// Carries 1-based line/column position information when the underlying
/// dialect parser reported one, per the error adapter contract (C6): the
/// dialect parser may report 0-based positions, in which case the adapter
/// that constructs this value must already have added 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseError {
    /// Stable top-level message, always `"syntax error"` for parser-reported
    /// failures per the error adapter contract.
    pub message: String,
    /// The first underlying parser message, verbatim.
    pub detail: String,
    /// 1-based line number, if the dialect parser reported one.
    pub line: Option<usize>,
    /// 1-based column number, if the dialect parser reported one.
    pub column: Option<usize>,
}

impl ParseError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            message: "syntax error".to_string(),
            detail: detail.into(),
            line: None,
            column: None,
        }
    }

    pub fn with_position(detail: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            message: "syntax error".to_string(),
            detail: detail.into(),
            line: Some(line),
            column: Some(column),
        }
    }

    /// Adapts a single `sqlparser` parser error (C6, shape 2: "a single parse
    /// error with optional line/column"). `sqlparser` error messages embed
    /// position as `... at Line: L, Column: C`; this adapter always
    /// re-surfaces 1-based coordinates.
    pub fn from_parser_error(err: &sqlparser::parser::ParserError) -> Self {
        let message = err.to_string();
        match parse_line_column(&message) {
            Some((line, column)) => Self::with_position(message, line, column),
            None => Self::new(message),
        }
    }

    /// Adapts a sequence of parser errors (C6, shape 3): only the first
    /// underlying message is retained as `detail`, per the error adapter
    /// contract.
    pub fn from_parser_errors(errs: &[sqlparser::parser::ParserError]) -> Self {
        match errs.first() {
            Some(first) => Self::from_parser_error(first),
            None => Self::new("syntax error"),
        }
    }
}

/// `sqlparser` embeds position as `Line: L, Column: C` in the message text.
fn parse_line_column(message: &str) -> Option<(usize, usize)> {
    static LINE_COLUMN_RE: OnceLock<Regex> = OnceLock::new();
    let re = LINE_COLUMN_RE
        .get_or_init(|| Regex::new(r"Line:\s*(\d+)\s*,\s*Column:\s*(\d+)").expect("valid regex"));

    let caps = re.captures(message)?;
    let line: usize = caps.get(1)?.as_str().parse().ok()?;
    let column: usize = caps.get(2)?.as_str().parse().ok()?;
    Some((line, column))
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let (Some(line), Some(column)) = (self.line, self.column) {
            write!(f, " at line {line}, column {column}")?;
        }
        write!(f, ": {}", self.detail)
    }
}

impl std::error::Error for ParseError {}

/// A non-fatal note describing a dialect-AST shape this crate could not
/// translate faithfully. The enclosing statement still translates to a
/// `todo`-kind placeholder node rather than failing outright (spec error
/// kind 2): partial source files remain usable while gaps are flagged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Byte offset (absolute within the original source buffer) of the node
    /// that could not be translated.
    pub position: usize,
    /// Debug description of the dialect-AST node that triggered this note.
    pub node_kind: String,
}

impl Diagnostic {
    pub fn new(position: usize, node_kind: impl Into<String>) -> Self {
        let node_kind = node_kind.into();
        #[cfg(feature = "tracing")]
        tracing::debug!(position, node_kind = %node_kind, "unsupported dialect node, emitting todo placeholder");
        Self { position, node_kind }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_line_column_from_sqlparser_style_message() {
        let msg = "Expected SELECT, found: INSERT at Line: 3, Column: 12";
        assert_eq!(parse_line_column(msg), Some((3, 12)));
    }

    #[test]
    fn returns_none_when_no_position_present() {
        assert_eq!(parse_line_column("Unexpected token"), None);
    }

    #[test]
    fn display_includes_position_when_present() {
        let err = ParseError::with_position("bad token", 2, 5);
        assert_eq!(
            err.to_string(),
            "syntax error at line 2, column 5: bad token"
        );
    }

    #[test]
    fn display_omits_position_when_absent() {
        let err = ParseError::new("bad token");
        assert_eq!(err.to_string(), "syntax error: bad token");
    }

    #[test]
    fn from_parser_errors_keeps_only_first() {
        use sqlparser::parser::ParserError;
        let errs = vec![
            ParserError::ParserError("first at Line: 1, Column: 1".to_string()),
            ParserError::ParserError("second at Line: 9, Column: 9".to_string()),
        ];
        let adapted = ParseError::from_parser_errors(&errs);
        assert!(adapted.detail.starts_with("first"));
        assert_eq!(adapted.line, Some(1));
    }

    #[test]
    fn error_trait_object_safe() {
        let err = ParseError::new("x");
        let _: &dyn std::error::Error = &err;
    }
}
