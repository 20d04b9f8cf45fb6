//! Statement splitter (C3).
//!
//! Splits a source buffer containing one or more `;`-terminated statements,
//! interspersed with `--`, `#`, and `/* */` comments, into an ordered list
//! of [`StatementRecord`]s. This is deliberately *not* a naive split-on-`;`:
//! the scan tracks quoted spans (string/bytes literals and backtick
//! identifiers, including GoogleSQL triple-quoted strings and `R`-prefixed
//! raw strings, where backslash is not an escape character) so a `;` inside
//! a literal never terminates the containing statement (P2), and it tracks
//! preceding comments so sqlc-style metadata comments stay attached to the
//! statement that follows them (§4.3).
//!
//! The scan is hand-rolled rather than driven through `sqlparser`'s
//! tokenizer because comment-style recognition in `sqlparser` is dialect
//! gated (not every dialect recognizes `#` comments), while this crate's
//! façade promises all three comment styles unconditionally (§6,
//! `comment_syntax`). The scan only needs to classify "comment / quoted
//! span / terminator / everything else" — a much smaller job than full
//! tokenization — so duplicating that slice of lexing here keeps the
//! splitter correct independent of dialect configuration.

/// One statement, located within the original source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatementRecord {
    /// Byte offset where this statement begins, including any preceding
    /// metadata comments.
    pub location: usize,
    /// Bytes from `location` up to and including the terminating `;` (or
    /// end-of-buffer if absent).
    pub length: usize,
    /// Byte offset of the first token of the SQL body itself (excludes
    /// preceding comments).
    pub sql_start: usize,
    /// Byte offset one past the last byte of the SQL body (excludes the
    /// terminating `;`, if any).
    pub sql_end: usize,
}

impl StatementRecord {
    /// The SQL text to hand to the dialect parser: comments and the
    /// terminator are excluded, matching spec.md's "sql_text" in §4.3.
    pub fn sql_text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.sql_start..self.sql_end]
    }
}

/// Splits `source` into statement records (C3 operation).
///
/// Whitespace-only and comment-only segments never produce a record.
pub fn split_statements(source: &str) -> Vec<StatementRecord> {
    let bytes = source.as_bytes();
    let n = bytes.len();
    let mut i = 0usize;

    let mut stmt_start: Option<usize> = None;
    let mut sql_start: Option<usize> = None;
    let mut records = Vec::new();

    while i < n {
        let c = bytes[i];

        if c.is_ascii_whitespace() {
            i += 1;
            continue;
        }

        // Line comments: `--` and `#`.
        if (c == b'-' && i + 1 < n && bytes[i + 1] == b'-') || c == b'#' {
            let start = i;
            while i < n && bytes[i] != b'\n' {
                i += 1;
            }
            stmt_start.get_or_insert(start);
            continue;
        }

        // Block comments: `/* ... */`.
        if c == b'/' && i + 1 < n && bytes[i + 1] == b'*' {
            let start = i;
            i += 2;
            while i + 1 < n && !(bytes[i] == b'*' && bytes[i + 1] == b'/') {
                i += 1;
            }
            i = (i + 2).min(n);
            stmt_start.get_or_insert(start);
            continue;
        }

        if c == b';' {
            if let Some(start) = sql_start {
                let terminator_end = i + 1;
                let location = stmt_start.unwrap_or(start);
                records.push(StatementRecord {
                    location,
                    length: terminator_end - location,
                    sql_start: start,
                    sql_end: i,
                });
            }
            i += 1;
            stmt_start = None;
            sql_start = None;
            continue;
        }

        // Quoted spans: string/bytes literals (', ") and backtick
        // identifiers (`). A leading `'`/`"` may be tripled.
        if c == b'\'' || c == b'"' || c == b'`' {
            sql_start.get_or_insert(i);
            stmt_start.get_or_insert_with(|| sql_start.unwrap());
            let raw = c != b'`' && has_raw_string_prefix(bytes, i);
            i = skip_quoted(bytes, i, raw);
            continue;
        }

        sql_start.get_or_insert(i);
        stmt_start.get_or_insert_with(|| sql_start.unwrap());
        i += 1;
    }

    if let Some(start) = sql_start {
        let location = stmt_start.unwrap_or(start);
        records.push(StatementRecord {
            location,
            length: n - location,
            sql_start: start,
            sql_end: n,
        });
    }

    records
}

/// Looks back from a quote's opening byte at `i` for an `R`/`B` string
/// prefix (e.g. `r'...'`, `rb"..."`, `Rb'''...'''`) and reports whether it
/// contains an `r`/`R` — GoogleSQL raw string literals, where backslash is
/// an ordinary character rather than an escape. The byte immediately before
/// the prefix (if any) must not itself be an identifier character, so a
/// plain identifier ending in `r` immediately before a literal is never
/// mistaken for a prefix.
fn has_raw_string_prefix(bytes: &[u8], i: usize) -> bool {
    let mut j = i;
    let mut saw_r = false;
    for _ in 0..2 {
        if j == 0 {
            break;
        }
        let prev = bytes[j - 1];
        if prev.eq_ignore_ascii_case(&b'r') {
            saw_r = true;
            j -= 1;
        } else if prev.eq_ignore_ascii_case(&b'b') {
            j -= 1;
        } else {
            break;
        }
    }
    if saw_r && j > 0 {
        let before = bytes[j - 1];
        if before.is_ascii_alphanumeric() || before == b'_' {
            return false;
        }
    }
    saw_r
}

/// Advances past a quoted span starting at `bytes[i]` (which must be `'`,
/// `"`, or `` ` ``), returning the index one past its end. Handles
/// triple-quoted strings and backslash escapes (escapes do not apply inside
/// backtick-quoted identifiers, nor inside a raw (`R`-prefixed) string,
/// where `raw` is `true`). An unterminated literal runs to the end of the
/// buffer.
fn skip_quoted(bytes: &[u8], i: usize, raw: bool) -> usize {
    let n = bytes.len();
    let quote = bytes[i];
    let triple = i + 2 < n && bytes[i + 1] == quote && bytes[i + 2] == quote;
    let qlen = if triple { 3 } else { 1 };
    let mut j = i + qlen;

    while j < n {
        if !raw && bytes[j] == b'\\' && quote != b'`' && j + 1 < n {
            j += 2;
            continue;
        }
        if bytes[j] == quote {
            if !triple {
                return j + 1;
            }
            if bytes.get(j + 1) == Some(&quote) && bytes.get(j + 2) == Some(&quote) {
                return j + 3;
            }
        }
        j += 1;
    }
    n
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts<'a>(source: &'a str, records: &[StatementRecord]) -> Vec<&'a str> {
        records.iter().map(|r| r.sql_text(source)).collect()
    }

    #[test]
    fn splits_two_simple_statements() {
        let src = "SELECT 1; SELECT 2;";
        let recs = split_statements(src);
        assert_eq!(recs.len(), 2);
        assert_eq!(texts(src, &recs), vec!["SELECT 1", " SELECT 2"]);
    }

    #[test]
    fn trailing_statement_without_terminator_is_kept() {
        let src = "SELECT 1; SELECT 2";
        let recs = split_statements(src);
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[1].sql_end, src.len());
        assert_eq!(recs[1].length, src.len() - recs[1].location);
    }

    #[test]
    fn semicolon_inside_string_literal_does_not_split() {
        let src = "SELECT ';' FROM t; SELECT 2;";
        let recs = split_statements(src);
        assert_eq!(recs.len(), 2);
        assert!(texts(src, &recs)[0].contains("';'"));
    }

    #[test]
    fn metadata_comment_is_attached_via_location() {
        let src = "-- name: GetUser :one\nSELECT * FROM users WHERE id = @id;";
        let recs = split_statements(src);
        assert_eq!(recs.len(), 1);
        let r = recs[0];
        assert_eq!(r.location, 0);
        let full = &src[r.location..r.location + r.length];
        assert!(full.starts_with("-- name: GetUser"));
        assert!(full.ends_with(';'));
    }

    #[test]
    fn comment_only_input_produces_no_records() {
        let src = "-- just a comment\n# another one\n/* and a block */";
        assert!(split_statements(src).is_empty());
    }

    #[test]
    fn whitespace_only_input_produces_no_records() {
        assert!(split_statements("   \n\t  ").is_empty());
    }

    #[test]
    fn empty_input_produces_no_records() {
        assert!(split_statements("").is_empty());
    }

    #[test]
    fn hash_and_block_comments_are_both_recognized() {
        let src = "# leading hash comment\n/* block */ SELECT 1;";
        let recs = split_statements(src);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].location, 0);
    }

    #[test]
    fn raw_string_prefix_disables_backslash_escaping() {
        // In `r'a\'`, the backslash is an ordinary character, so the
        // literal ends at that `'`; a buggy escape-everywhere scanner would
        // instead swallow the rest of the buffer as one unterminated string.
        let src = "SELECT r'a\\' FROM t; SELECT 2;";
        let recs = split_statements(src);
        assert_eq!(recs.len(), 2);
    }

    #[test]
    fn triple_quoted_string_with_embedded_quote_and_semicolon() {
        let src = "SELECT '''a; b\\' c''' FROM t;";
        let recs = split_statements(src);
        assert_eq!(recs.len(), 1);
    }

    #[test]
    fn position_roundtrip_covers_comments_and_terminator_exactly() {
        let src = "  -- name: ListUsers :many\nSELECT id FROM users;\n-- name: CountUsers :one\nSELECT COUNT(*) FROM users;";
        let recs = split_statements(src);
        assert_eq!(recs.len(), 2);
        for r in &recs {
            let slice = &src[r.location..r.location + r.length];
            assert!(!slice.starts_with(char::is_whitespace));
        }
    }
}
