//! `INSERT`/`UPDATE`/`DELETE` translation (§4.5.2).

use sqlparser::ast::{
    Assignment, AssignmentTarget, Delete, Expr as SqlExpr, FromTable, Insert, SelectItem,
    TableWithJoins, UpdateTableFromKind,
};

use crate::ast::{DeleteStmt, InsertStmt, ResTarget, Stmt, UpdateStmt, UpdateTarget};

use super::from::{range_var_from_object_name, translate_table_with_joins};
use super::select::translate_select_item;
use super::{translate_expr, translate_query};
use super::TranslateCtx;

/// `INSERT` (§4.5.2): `columns` is always present (empty when the statement
/// omits an explicit column list) and `returning` is always present too
/// (empty list, not absent, when there is no `RETURNING`/`THEN RETURN`) —
/// both follow the §8 P7 always-present-container rule.
pub fn translate_insert(ctx: &mut TranslateCtx, insert: &Insert) -> Stmt {
    let relation = range_var_from_object_name(&insert.table, None);
    let columns = insert
        .columns
        .iter()
        .map(|c| super::lower_ident(c))
        .collect();

    let (select, values) = match insert.source.as_deref() {
        Some(query) => match query.body.as_ref() {
            sqlparser::ast::SetExpr::Values(values) => {
                (None, super::select::translate_values(ctx, values).values_lists.unwrap_or_default())
            }
            _ => (Some(Box::new(translate_query(ctx, query))), Vec::new()),
        },
        None => (None, Vec::new()),
    };

    let returning = translate_returning(ctx, insert.returning.as_deref());

    Stmt::Insert(InsertStmt {
        relation,
        columns,
        select,
        values,
        returning,
    })
}

/// `UPDATE` (§4.5.2): `target` is a `SET col = expr` pair; `DEFAULT` as a
/// `SET` value lowers to the string constant `"DEFAULT"` like everywhere
/// else `DEFAULT` appears (§4.5.5), via the generic expression translator.
pub fn translate_update(
    ctx: &mut TranslateCtx,
    table: &TableWithJoins,
    assignments: &[Assignment],
    from: Option<&UpdateTableFromKind>,
    selection: Option<&SqlExpr>,
    returning: Option<&[SelectItem]>,
) -> Stmt {
    let relation = match translate_table_with_joins(ctx, table) {
        crate::ast::TableRef::RangeVar(rv) => rv,
        other => {
            ctx.note_unsupported(format!("{other:?}"));
            crate::ast::RangeVar {
                schema: None,
                name: String::new(),
                alias: None,
            }
        }
    };

    if from.is_some() {
        ctx.note_unsupported("UPDATE ... FROM".to_string());
    }

    let targets = assignments
        .iter()
        .map(|a| translate_assignment(ctx, a))
        .collect();
    let where_clause = selection.map(|e| translate_expr(ctx, e));
    let returning = translate_returning(ctx, returning);

    Stmt::Update(UpdateStmt {
        relation,
        targets,
        where_clause,
        returning,
    })
}

fn translate_assignment(ctx: &mut TranslateCtx, assignment: &Assignment) -> UpdateTarget {
    let name = match &assignment.target {
        AssignmentTarget::ColumnName(name) => super::object_name_lowered(name).join("."),
        AssignmentTarget::Tuple(names) => names
            .iter()
            .map(|n| super::object_name_lowered(n).join("."))
            .collect::<Vec<_>>()
            .join(", "),
    };
    let val = translate_expr(ctx, &assignment.value);
    UpdateTarget { name, val }
}

/// `DELETE` (§4.5.2): `USING` has no engine-neutral counterpart and is
/// recorded as a diagnostic rather than translated, same treatment as
/// `UPDATE ... FROM`.
pub fn translate_delete(ctx: &mut TranslateCtx, delete: &Delete) -> Stmt {
    let tables = match &delete.from {
        FromTable::WithFromKeyword(tables) | FromTable::WithoutKeyword(tables) => tables,
    };
    let relation = match tables.first() {
        Some(twj) => match translate_table_with_joins(ctx, twj) {
            crate::ast::TableRef::RangeVar(rv) => rv,
            other => {
                ctx.note_unsupported(format!("{other:?}"));
                crate::ast::RangeVar {
                    schema: None,
                    name: String::new(),
                    alias: None,
                }
            }
        },
        None => {
            ctx.note_unsupported("DELETE with no target table".to_string());
            crate::ast::RangeVar {
                schema: None,
                name: String::new(),
                alias: None,
            }
        }
    };

    if delete.using.is_some() {
        ctx.note_unsupported("DELETE ... USING".to_string());
    }

    let where_clause = delete.selection.as_ref().map(|e| translate_expr(ctx, e));
    let returning = translate_returning(ctx, delete.returning.as_deref());

    Stmt::Delete(DeleteStmt {
        relation,
        where_clause,
        returning,
    })
}

fn translate_returning(ctx: &mut TranslateCtx, returning: Option<&[SelectItem]>) -> Vec<ResTarget> {
    match returning {
        Some(items) => items.iter().map(|item| translate_select_item(ctx, item)).collect(),
        None => Vec::new(),
    }
}
