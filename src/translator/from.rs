//! `FROM`-clause table-expression translation (§4.5.6).

use sqlparser::ast::{
    Join, JoinOperator, TableAlias, TableFactor, TableWithJoins,
};

use crate::ast::{Expr, JoinExpr, JoinQual, JoinType, RangeFunction, RangeSubselect, RangeVar, TableRef};

use super::{lower_ident, object_name_lowered, translate_expr, translate_query_as_stmt};
use super::TranslateCtx;

pub fn translate_table_with_joins(ctx: &mut TranslateCtx, twj: &TableWithJoins) -> TableRef {
    let mut table = translate_table_factor(ctx, &twj.relation);
    for join in &twj.joins {
        table = translate_join(ctx, table, join);
    }
    table
}

fn translate_join(ctx: &mut TranslateCtx, left: TableRef, join: &Join) -> TableRef {
    let right = translate_table_factor(ctx, &join.relation);
    let (join_type, qual) = translate_join_operator(ctx, &join.join_operator);
    TableRef::JoinExpr(Box::new(JoinExpr {
        join_type,
        left,
        right,
        qual,
    }))
}

/// §4.5.6: `jointype ∈ {inner, left, right, full}`; comma-join and
/// `CROSS JOIN` both collapse to `inner` with no qualifier. `NATURAL` joins
/// have no `sqlparser` qualifier to translate either, so they fall into the
/// same no-qual bucket as cross joins; semi/anti/apply/`AS OF` joins have no
/// direct engine-neutral counterpart and are lowered to a plain inner join
/// on whatever condition they do carry (a documented approximation, not a
/// spec-covered construct).
fn translate_join_operator(ctx: &mut TranslateCtx, op: &JoinOperator) -> (JoinType, Option<JoinQual>) {
    use JoinOperator::*;
    match op {
        Join(c) | Inner(c) => (JoinType::Inner, translate_join_constraint(ctx, c)),
        Left(c) | LeftOuter(c) => (JoinType::Left, translate_join_constraint(ctx, c)),
        Right(c) | RightOuter(c) => (JoinType::Right, translate_join_constraint(ctx, c)),
        FullOuter(c) => (JoinType::Full, translate_join_constraint(ctx, c)),
        CrossJoin(_) => (JoinType::Inner, None),
        StraightJoin(c) => (JoinType::Inner, translate_join_constraint(ctx, c)),
        Semi(c) | LeftSemi(c) => (JoinType::Inner, translate_join_constraint(ctx, c)),
        RightSemi(c) => (JoinType::Inner, translate_join_constraint(ctx, c)),
        Anti(c) | LeftAnti(c) => (JoinType::Inner, translate_join_constraint(ctx, c)),
        RightAnti(c) => (JoinType::Inner, translate_join_constraint(ctx, c)),
        AsOf { constraint, .. } => (JoinType::Inner, translate_join_constraint(ctx, constraint)),
        CrossApply | OuterApply => (JoinType::Inner, None),
    }
}

fn translate_join_constraint(
    ctx: &mut TranslateCtx,
    constraint: &sqlparser::ast::JoinConstraint,
) -> Option<JoinQual> {
    match constraint {
        sqlparser::ast::JoinConstraint::On(expr) => Some(JoinQual::On(translate_expr(ctx, expr))),
        sqlparser::ast::JoinConstraint::Using(cols) => Some(JoinQual::Using(
            cols.iter().map(|c| c.to_string().to_lowercase()).collect(),
        )),
        sqlparser::ast::JoinConstraint::Natural | sqlparser::ast::JoinConstraint::None => None,
    }
}

fn translate_table_factor(ctx: &mut TranslateCtx, factor: &TableFactor) -> TableRef {
    match factor {
        // `TABLESAMPLE` is accepted syntactically and recorded as a noop
        // (§4.5.6): `sample` is simply not consulted here.
        TableFactor::Table { name, alias, .. } => {
            TableRef::RangeVar(range_var_from_object_name(name, alias.as_ref()))
        }
        TableFactor::Derived {
            subquery, alias, ..
        } => TableRef::RangeSubselect(RangeSubselect {
            subquery: Box::new(translate_query_as_stmt(ctx, subquery)),
            alias: alias.as_ref().map(|a| lower_ident(&a.name)),
            column_aliases: alias
                .as_ref()
                .map(|a| a.columns.iter().map(|c| lower_ident(&c.name)).collect())
                .unwrap_or_default(),
        }),
        TableFactor::NestedJoin {
            table_with_joins, ..
        } => translate_table_with_joins(ctx, table_with_joins),
        TableFactor::UNNEST {
            alias,
            array_exprs,
            with_offset,
            with_offset_alias,
            ..
        } => translate_unnest(ctx, array_exprs, *with_offset, with_offset_alias.as_ref(), alias.as_ref()),
        TableFactor::TableFunction { expr, alias, .. } => TableRef::RangeFunction(RangeFunction {
            function: translate_expr(ctx, expr),
            alias: alias.as_ref().map(|a| lower_ident(&a.name)),
            column_aliases: alias
                .as_ref()
                .map(|a| a.columns.iter().map(|c| lower_ident(&c.name)).collect())
                .unwrap_or_default(),
            with_offset: None,
        }),
        other => {
            ctx.note_unsupported(format!("{other:?}"));
            TableRef::RangeVar(RangeVar {
                schema: None,
                name: String::new(),
                alias: None,
            })
        }
    }
}

/// `UNNEST(arr) [WITH OFFSET [AS a]] [AS v]` in `FROM` (§4.5.5, §4.5.6):
/// lowered to a range-function node whose function call is `unnest(arr)`;
/// `with_offset` being present sets the ordinality flag, and a custom
/// offset alias is recorded as a known limitation (§4.5.5) rather than
/// threaded through, since this crate's `RangeFunction` only carries the
/// value-table alias.
fn translate_unnest(
    ctx: &mut TranslateCtx,
    array_exprs: &[sqlparser::ast::Expr],
    with_offset: bool,
    with_offset_alias: Option<&sqlparser::ast::Ident>,
    alias: Option<&TableAlias>,
) -> TableRef {
    if with_offset && with_offset_alias.is_some() {
        ctx.note_unsupported("UNNEST WITH OFFSET AS <custom alias>".to_string());
    }
    let args: Vec<Expr> = array_exprs.iter().map(|e| translate_expr(ctx, e)).collect();
    let function = Expr::FuncCall {
        name: vec!["unnest".to_string()],
        args: args
            .into_iter()
            .map(crate::ast::FuncArg::Positional)
            .collect(),
        distinct: false,
        over: None,
    };
    TableRef::RangeFunction(RangeFunction {
        function,
        alias: alias.map(|a| lower_ident(&a.name)),
        column_aliases: alias
            .map(|a| a.columns.iter().map(|c| lower_ident(&c.name)).collect())
            .unwrap_or_default(),
        with_offset: if with_offset {
            Some(with_offset_alias.map(lower_ident))
        } else {
            None
        },
    })
}

/// Builds a [`RangeVar`] from a (possibly multi-part) table path, lowering
/// every segment (§4.5.1). Up to 3 parts (`catalog.schema.name`) collapse
/// into `schema` (everything but the last segment, dot-joined) and `name`
/// (the last segment).
pub fn range_var_from_object_name(
    name: &sqlparser::ast::ObjectName,
    alias: Option<&TableAlias>,
) -> RangeVar {
    let mut parts = object_name_lowered(name);
    let table_name = parts.pop().unwrap_or_default();
    let schema = if parts.is_empty() { None } else { Some(parts.join(".")) };
    RangeVar {
        schema,
        name: table_name,
        alias: alias.map(|a| lower_ident(&a.name)),
    }
}
