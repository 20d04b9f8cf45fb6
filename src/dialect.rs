//! Binding to the bound dialect parser (C0 + the "dialect parser" role from
//! spec.md §1).
//!
//! spec.md treats the Spanner grammar parser as an external, pre-existing
//! library. This crate binds that role to `sqlparser::dialect::BigQueryDialect`
//! — Spanner's GoogleSQL dialect is the same family BigQuery speaks, and
//! `sqlparser` ships no dedicated Spanner dialect. The two real surface
//! forms `sqlparser` has no grammar for at all are handled here by a
//! byte-length-preserving source rewrite (C0) performed before a statement's
//! text is handed to `sqlparser::Parser`, never by trying to teach
//! `sqlparser` new grammar.

use std::borrow::Cow;

use sqlparser::dialect::{BigQueryDialect, Dialect};
use sqlparser::keywords::Keyword;
use sqlparser::tokenizer::{Token, Tokenizer};

/// The dialect this crate binds "the dialect parser" to.
pub fn spanner_dialect() -> Box<dyn Dialect> {
    Box::new(BigQueryDialect {})
}

/// Rewrites Spanner's `THEN RETURN` clause to `RETURNING` in place,
/// preserving the original byte length so every byte offset computed before
/// and after rewriting stays valid (C0). spec.md §6 states the two are
/// semantically identical at the source boundary, so this is a pure syntax
/// normalization, not a semantic change.
///
/// Matching is token-driven (via the same tokenizer used everywhere else in
/// this crate) rather than a textual search, so `THEN RETURN` appearing
/// inside a string or bytes literal — or spelled with unusual whitespace —
/// is handled correctly.
pub fn rewrite_then_return(sql: &str) -> Cow<'_, str> {
    let dialect = spanner_dialect();
    let mut tokenizer = Tokenizer::new(&*dialect, sql);
    let tokens = match tokenizer.tokenize_with_location() {
        Ok(tokens) => tokens,
        Err(_) => return Cow::Borrowed(sql),
    };

    let mut rewritten: Option<String> = None;
    let mut iter = tokens.iter().peekable();
    while let Some(tok) = iter.next() {
        let is_then = matches!(&tok.token, Token::Word(w) if w.keyword == Keyword::THEN);
        if !is_then {
            continue;
        }
        // Skip whitespace between THEN and RETURN when looking ahead.
        let mut lookahead = iter.clone();
        let next_word = loop {
            match lookahead.next() {
                Some(t) if matches!(t.token, Token::Whitespace(_)) => continue,
                other => break other,
            }
        };
        let Some(return_tok) = next_word else { continue };
        let is_return = matches!(&return_tok.token, Token::Word(w) if w.keyword == Keyword::RETURN);
        if !is_return {
            continue;
        }

        let start = byte_offset(sql, tok.span.start);
        let end = byte_offset(sql, return_tok.span.end);
        let Some((start, end)) = start.zip(end) else {
            continue;
        };
        let buf = rewritten.get_or_insert_with(|| sql.to_string());
        splice_preserving_len(buf, start, end, "RETURNING");
    }

    match rewritten {
        Some(s) => Cow::Owned(s),
        None => Cow::Borrowed(sql),
    }
}

/// `sqlparser` locations are 1-based line/column pairs, not byte offsets;
/// since this crate only ever rewrites single-statement text (never spans
/// crossing a line we haven't already scanned), we recompute the byte
/// offset for a given line/column by walking the buffer once.
fn byte_offset(sql: &str, loc: sqlparser::tokenizer::Location) -> Option<usize> {
    let mut line = 1u64;
    let mut col = 1u64;
    for (idx, ch) in sql.char_indices() {
        if line == loc.line && col == loc.column {
            return Some(idx);
        }
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    if line == loc.line && col == loc.column {
        return Some(sql.len());
    }
    None
}

/// Overwrites `buf[start..end]` with `replacement`, padding with trailing
/// ASCII spaces (or truncating with a trailing space-run) so the total
/// buffer length is unchanged.
fn splice_preserving_len(buf: &mut String, start: usize, end: usize, replacement: &str) {
    if start >= end || end > buf.len() {
        return;
    }
    let original_len = end - start;
    let mut patch = replacement.to_string();
    if patch.len() > original_len {
        // Replacement text itself is longer than the matched span (should
        // not happen for "THEN RETURN" -> "RETURNING" but guarded
        // defensively); truncate rather than grow the buffer.
        patch.truncate(original_len);
    } else {
        while patch.len() < original_len {
            patch.push(' ');
        }
    }
    buf.replace_range(start..end, &patch);
}
