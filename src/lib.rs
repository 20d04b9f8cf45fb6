pub mod ast;
pub mod catalog;
pub mod dialect;
pub mod error;
pub mod keywords;
pub mod params;
pub mod splitter;
pub mod translator;

use serde::{Deserialize, Serialize};
use sqlparser::parser::Parser;

use ast::Stmt;
use error::ParseError;
use translator::TranslateCtx;

pub use catalog::{default_catalog, Catalog, CatalogWithSchema};
pub use error::Diagnostic;

/// One translated top-level statement plus the byte span of its original
/// source text (§3, §6 op.1). `location`/`length` echo the splitter's
/// [`splitter::StatementRecord`] so a caller can slice the original buffer
/// back out without re-running the splitter.
///
/// `diagnostics` collects every non-fatal note (§4.6/§7 error kind 2)
/// recorded while translating this one statement — e.g. an `INTERLEAVE IN
/// PARENT` clause accepted syntactically but not reconstructed, or a
/// `DELETE ... USING` with no engine-neutral counterpart. An empty vector
/// means the statement translated with full fidelity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawStatement {
    pub stmt: Stmt,
    pub location: usize,
    pub length: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Frontend façade operation 1 (§6): split `source` into statements (C3),
/// rewrite Spanner-only surface syntax per statement (C0), parse each with
/// the dialect parser, and translate (C5). Statement ordering matches
/// source order. Empty or whitespace-/comment-only input yields an empty
/// vector and no error (§6 op.1).
///
/// A dialect-parser failure on any one statement is fatal for the whole
/// call (§4.6): the first underlying parse error is adapted into a single
/// [`ParseError`] and returned. Statements that parse but translate to a
/// bare [`Stmt::Todo`] at the root are dropped from the result rather than
/// surfaced (§7, error kind 2) — they carry no projection a caller could
/// use, unlike a `Todo` nested inside an otherwise-translated statement.
pub fn parse(source: &str) -> Result<Vec<RawStatement>, ParseError> {
    let dialect = dialect::spanner_dialect();
    let mut out = Vec::new();

    for record in splitter::split_statements(source) {
        let sql = record.sql_text(source);
        if sql.trim().is_empty() {
            continue;
        }
        let rewritten = dialect::rewrite_then_return(sql);
        let statements = Parser::parse_sql(&*dialect, rewritten.as_ref())
            .map_err(|err| ParseError::from_parser_error(&err))?;

        for sql_stmt in &statements {
            let mut ctx = TranslateCtx::new(record.location);
            let stmt = translator::translate_statement(&mut ctx, sql_stmt);
            if matches!(stmt, Stmt::Todo(_)) {
                continue;
            }
            out.push(RawStatement {
                stmt,
                location: record.location,
                length: record.length,
                diagnostics: ctx.diagnostics,
            });
        }
    }

    Ok(out)
}

/// Frontend façade operation 2 (§6): Spanner accepts all three lexical
/// comment kinds.
pub fn comment_syntax() -> CommentSyntax {
    CommentSyntax {
        dash: true,
        slash_star: true,
        hash: true,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentSyntax {
    pub dash: bool,
    pub slash_star: bool,
    pub hash: bool,
}

/// Frontend façade operation 3 (§6): delegates to C1.
pub fn is_reserved_keyword(identifier: &str) -> bool {
    keywords::is_reserved(identifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source_yields_empty_vector() {
        assert_eq!(parse("").unwrap(), Vec::new());
        assert_eq!(parse("   \n-- just a comment\n").unwrap(), Vec::new());
    }

    #[test]
    fn simple_select_parses_one_statement() {
        let out = parse("SELECT 1 AS one;").unwrap();
        assert_eq!(out.len(), 1);
        assert!(matches!(out[0].stmt, Stmt::Select(_)));
    }

    #[test]
    fn statement_ordering_matches_source_order() {
        let out = parse("SELECT 1; SELECT 2;").unwrap();
        assert_eq!(out.len(), 2);
        assert!(out[0].location < out[1].location);
    }

    #[test]
    fn syntax_error_is_fatal() {
        let err = parse("SELECT FROM FROM FROM;").unwrap_err();
        assert_eq!(err.message, "syntax error");
    }

    #[test]
    fn comment_syntax_accepts_all_three_kinds() {
        let cs = comment_syntax();
        assert!(cs.dash && cs.slash_star && cs.hash);
    }

    #[test]
    fn reserved_keyword_delegates_to_c1() {
        assert!(is_reserved_keyword("SELECT"));
        assert!(!is_reserved_keyword("my_table"));
    }

    #[test]
    fn then_return_is_rewritten_before_parsing() {
        let out = parse("INSERT INTO t (a) VALUES (1) THEN RETURN a;").unwrap();
        assert_eq!(out.len(), 1);
        match &out[0].stmt {
            Stmt::Insert(insert) => assert_eq!(insert.returning.len(), 1),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn fully_translated_statement_has_no_diagnostics() {
        let out = parse("SELECT id FROM users WHERE id = @id;").unwrap();
        assert!(out[0].diagnostics.is_empty());
    }

    #[test]
    fn unsupported_clause_on_an_otherwise_translated_statement_surfaces_a_diagnostic() {
        let out = parse("ALTER TABLE t RENAME TO t2;").unwrap();
        assert_eq!(out.len(), 1);
        assert!(matches!(out[0].stmt, Stmt::AlterTable(_)));
        assert!(!out[0].diagnostics.is_empty());
    }
}
