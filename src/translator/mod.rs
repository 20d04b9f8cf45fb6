//! AST translator (C5): the dialect-AST → engine-neutral-AST pass (§4.5).
//!
//! `translate_statement` is the single entry point C7 calls once per
//! statement returned by the statement splitter. Everything below it is
//! total: there is no path that returns `Err`, only paths that may append a
//! [`Diagnostic`](crate::error::Diagnostic) and fall back to a placeholder
//! (§7, error kind 2).

mod ddl;
mod dml;
mod expr;
mod from;
mod select;
mod types;

use sqlparser::ast::{Query as SqlQuery, SetExpr, Statement as SqlStatement};

use crate::ast::{SelectStmt, Stmt};
use crate::error::Diagnostic;
use crate::params::ParamTracker;

pub use expr::{lower_ident, object_name_lowered, translate_expr};

/// Per-statement translation state: the parameter tracker (§4.4) and the
/// diagnostic sink (§4.6/§7). `base_offset` is the byte offset within the
/// original source buffer at which this statement's sub-string began, so
/// positions recorded here are coherent with the splitter's byte ranges
/// (§9, "Position offsets").
pub struct TranslateCtx {
    pub base_offset: usize,
    pub params: ParamTracker,
    pub diagnostics: Vec<Diagnostic>,
}

impl TranslateCtx {
    pub fn new(base_offset: usize) -> Self {
        Self {
            base_offset,
            params: ParamTracker::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Records that an unsupported dialect-AST shape was encountered.
    /// Position tracking is statement-granular rather than node-granular:
    /// `sqlparser`'s `Expr`/`Statement` nodes do not all carry spans in
    /// every dialect configuration, so this crate anchors every diagnostic
    /// at the statement's start rather than guessing a finer position.
    pub fn note_unsupported(&mut self, node_kind: String) {
        self.diagnostics.push(Diagnostic::new(self.base_offset, node_kind));
    }
}

/// Translates one top-level statement (§4.5.2). Returns `Stmt::Todo` for
/// statement kinds this crate does not yet translate; the caller (C7) is
/// responsible for dropping statements whose *root* is a placeholder,
/// per §7.
pub fn translate_statement(ctx: &mut TranslateCtx, stmt: &SqlStatement) -> Stmt {
    match stmt {
        SqlStatement::Query(query) => Stmt::Select(translate_query(ctx, query)),
        SqlStatement::Insert(insert) => dml::translate_insert(ctx, insert),
        SqlStatement::Update {
            table,
            assignments,
            from,
            selection,
            returning,
            ..
        } => dml::translate_update(ctx, table, assignments, from.as_ref(), selection.as_ref(), returning.as_deref()),
        SqlStatement::Delete(delete) => dml::translate_delete(ctx, delete),
        SqlStatement::CreateTable(create_table) => ddl::translate_create_table(ctx, create_table),
        SqlStatement::CreateIndex(create_index) => ddl::translate_create_index(ctx, create_index),
        SqlStatement::AlterTable {
            name,
            if_exists,
            operations,
            ..
        } => ddl::translate_alter_table(ctx, name, *if_exists, operations),
        SqlStatement::CreateView {
            or_replace,
            name,
            columns,
            query,
            ..
        } => ddl::translate_create_view(ctx, *or_replace, name, columns, query),
        SqlStatement::Drop {
            object_type,
            if_exists,
            names,
            ..
        } => ddl::translate_drop(ctx, *object_type, *if_exists, names),
        other => {
            ctx.note_unsupported(format!("{other:?}"));
            Stmt::Todo(crate::ast::TodoNode::new(ctx.base_offset, "UnsupportedStatement"))
        }
    }
}

/// Translates a `Query` (§4.5.2: "`Query` carries `ORDER BY`, `LIMIT`, and
/// `WITH` outside the inner `SELECT`... attaches them to [the select
/// node]").
pub fn translate_query(ctx: &mut TranslateCtx, query: &SqlQuery) -> SelectStmt {
    let mut select = match query.body.as_ref() {
        SetExpr::Select(sel) => select::translate_select(ctx, sel),
        SetExpr::Query(inner) => translate_query(ctx, inner),
        SetExpr::SetOperation { op, set_quantifier, left, right } => {
            select::translate_set_operation(ctx, op, set_quantifier, left, right)
        }
        SetExpr::Values(values) => select::translate_values(ctx, values),
        other => {
            ctx.note_unsupported(format!("{other:?}"));
            SelectStmt::default()
        }
    };

    if let Some(with) = &query.with {
        select.with = Some(select::translate_with(ctx, with));
    }
    if let Some(order_by) = &query.order_by {
        select.sort_by = select::translate_order_by(ctx, order_by);
    }
    if let Some(limit_clause) = &query.limit_clause {
        let (limit, offset) = select::translate_limit_clause(ctx, limit_clause);
        select.limit = limit;
        select.offset = offset;
    }
    select
}

/// Wraps [`translate_query`] as a boxed `Stmt::Select`, for subquery
/// positions (`IN (subquery)`, `EXISTS(...)`, scalar subqueries, CTEs).
pub fn translate_query_as_stmt(ctx: &mut TranslateCtx, query: &SqlQuery) -> Stmt {
    Stmt::Select(translate_query(ctx, query))
}
