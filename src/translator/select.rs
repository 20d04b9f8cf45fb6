//! `SELECT` translation (§4.5.3).

use sqlparser::ast::{
    Cte, GroupByExpr, LimitClause, OrderByExpr, OrderByKind, Select as SqlSelect, SelectItem,
    SetExpr, SetOperator, SetQuantifier, Values as SqlValues, With as SqlWith,
};

use crate::ast::{
    ColumnRef, Expr, Field, ResTarget, SelectStmt, SetOperation, SetOperator as NeutralSetOp,
    SortBy, Stmt, WithClause,
};

use super::{translate_expr, translate_query};
use super::from::translate_table_with_joins;
use super::TranslateCtx;

/// §4.5.3's `target_list`/`from_clause` are always present, even empty;
/// `where`/`group`/`sort`/`limit`/`values` are absent when empty. The
/// default built here already satisfies that (§8 P7).
pub fn translate_select(ctx: &mut TranslateCtx, sel: &SqlSelect) -> SelectStmt {
    let target_list = sel
        .projection
        .iter()
        .map(|item| translate_select_item(ctx, item))
        .collect();
    let from = sel
        .from
        .iter()
        .map(|twj| translate_table_with_joins(ctx, twj))
        .collect();
    let where_clause = sel.selection.as_ref().map(|e| translate_expr(ctx, e));
    let group_by = match &sel.group_by {
        GroupByExpr::All(_) => Vec::new(),
        GroupByExpr::Expressions(exprs, _) => exprs.iter().map(|e| translate_expr(ctx, e)).collect(),
    };
    let having = sel.having.as_ref().map(|e| translate_expr(ctx, e));
    let qualify = sel.qualify.as_ref().map(|e| translate_expr(ctx, e));

    SelectStmt {
        distinct: sel.distinct.is_some(),
        target_list,
        from,
        where_clause,
        group_by,
        having,
        qualify,
        ..SelectStmt::default()
    }
}

/// Projection-item mapping table from §4.5.3. Also reused by `RETURNING`/
/// `THEN RETURN` projections (§4.5.2), which follow the identical mapping.
pub(super) fn translate_select_item(ctx: &mut TranslateCtx, item: &SelectItem) -> ResTarget {
    match item {
        SelectItem::Wildcard(_) => ResTarget {
            name: None,
            val: Expr::ColumnRef(ColumnRef {
                fields: vec![Field::Star],
            }),
        },
        SelectItem::QualifiedWildcard(kind, _) => {
            let mut fields: Vec<Field> = qualified_wildcard_prefix(kind)
                .into_iter()
                .map(Field::Name)
                .collect();
            fields.push(Field::Star);
            ResTarget {
                name: None,
                val: Expr::ColumnRef(ColumnRef { fields }),
            }
        }
        SelectItem::ExprWithAlias { expr, alias } => ResTarget {
            name: Some(super::lower_ident(alias)),
            val: translate_expr(ctx, expr),
        },
        SelectItem::UnnamedExpr(expr) => {
            let name = bare_column_name(expr);
            ResTarget {
                name,
                val: translate_expr(ctx, expr),
            }
        }
    }
}

fn qualified_wildcard_prefix(kind: &sqlparser::ast::SelectItemQualifiedWildcardKind) -> Vec<String> {
    match kind {
        sqlparser::ast::SelectItemQualifiedWildcardKind::ObjectName(name) => {
            super::object_name_lowered(name)
        }
        sqlparser::ast::SelectItemQualifiedWildcardKind::Expr(_) => Vec::new(),
    }
}

/// Name-inference rule from §4.5.3/P10: a bare column identifier's
/// result-target `name` is its last path segment; anything else is `None`
/// (an alias is handled separately via `ExprWithAlias`).
fn bare_column_name(expr: &sqlparser::ast::Expr) -> Option<String> {
    match expr {
        sqlparser::ast::Expr::Identifier(ident) => Some(super::lower_ident(ident)),
        sqlparser::ast::Expr::CompoundIdentifier(idents) => {
            idents.last().map(super::lower_ident)
        }
        _ => None,
    }
}

pub fn translate_set_operation(
    ctx: &mut TranslateCtx,
    op: &SetOperator,
    quantifier: &SetQuantifier,
    left: &SetExpr,
    right: &SetExpr,
) -> SelectStmt {
    let neutral_op = match op {
        SetOperator::Union => NeutralSetOp::Union,
        SetOperator::Intersect => NeutralSetOp::Intersect,
        SetOperator::Except => NeutralSetOp::Except,
    };
    let all = matches!(quantifier, SetQuantifier::All);
    let left_stmt = translate_set_operand(ctx, left);
    let right_stmt = translate_set_operand(ctx, right);

    SelectStmt {
        set_op: Some(Box::new(SetOperation {
            op: neutral_op,
            all,
            left: left_stmt,
            right: right_stmt,
        })),
        ..SelectStmt::default()
    }
}

fn translate_set_operand(ctx: &mut TranslateCtx, expr: &SetExpr) -> SelectStmt {
    match expr {
        SetExpr::Select(sel) => translate_select(ctx, sel),
        SetExpr::Query(q) => translate_query(ctx, q),
        SetExpr::SetOperation { op, set_quantifier, left, right } => {
            translate_set_operation(ctx, op, set_quantifier, left, right)
        }
        SetExpr::Values(values) => translate_values(ctx, values),
        other => {
            ctx.note_unsupported(format!("{other:?}"));
            SelectStmt::default()
        }
    }
}

pub fn translate_values(ctx: &mut TranslateCtx, values: &SqlValues) -> SelectStmt {
    let rows: Vec<Vec<Expr>> = values
        .rows
        .iter()
        .map(|row| row.iter().map(|e| translate_expr(ctx, e)).collect())
        .collect();
    SelectStmt {
        values_lists: Some(rows),
        ..SelectStmt::default()
    }
}

pub fn translate_with(ctx: &mut TranslateCtx, with: &SqlWith) -> WithClause {
    WithClause {
        recursive: with.recursive,
        ctes: with.cte_tables.iter().map(|cte| translate_cte(ctx, cte)).collect(),
    }
}

fn translate_cte(ctx: &mut TranslateCtx, cte: &Cte) -> crate::ast::CommonTableExpr {
    crate::ast::CommonTableExpr {
        name: super::lower_ident(&cte.alias.name),
        column_aliases: cte.alias.columns.iter().map(|c| super::lower_ident(&c.name)).collect(),
        query: Box::new(Stmt::Select(translate_query(ctx, &cte.query))),
    }
}

pub fn translate_order_by(ctx: &mut TranslateCtx, order_by: &sqlparser::ast::OrderBy) -> Vec<SortBy> {
    match &order_by.kind {
        OrderByKind::Expressions(exprs) => exprs.iter().map(|o| translate_order_by_expr(ctx, o)).collect(),
        OrderByKind::All(_) => Vec::new(),
    }
}

fn translate_order_by_expr(ctx: &mut TranslateCtx, o: &OrderByExpr) -> SortBy {
    SortBy {
        node: translate_expr(ctx, &o.expr),
        descending: o.options.asc.map(|asc| !asc),
        nulls_first: o.options.nulls_first,
    }
}

/// `LIMIT`/`OFFSET` (§4.5.2: `Query` carries these outside the inner
/// `SELECT`). `sqlparser` 0.59 folds both into one `LimitClause` with two
/// surface forms: standard `LIMIT n OFFSET m` and MySQL's `LIMIT m, n`.
pub fn translate_limit_clause(
    ctx: &mut TranslateCtx,
    clause: &LimitClause,
) -> (Option<Expr>, Option<Expr>) {
    match clause {
        LimitClause::LimitOffset { limit, offset, .. } => (
            limit.as_ref().map(|e| translate_expr(ctx, e)),
            offset.as_ref().map(|o| translate_expr(ctx, &o.value)),
        ),
        LimitClause::OffsetCommaLimit { offset, limit } => (
            Some(translate_expr(ctx, limit)),
            Some(translate_expr(ctx, offset)),
        ),
    }
}

