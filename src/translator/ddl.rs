//! `CREATE TABLE` / `CREATE INDEX` / `ALTER TABLE` / `CREATE VIEW` / `DROP`
//! translation (§4.5.2).

use sqlparser::ast::{
    AlterTableOperation, ColumnDef as SqlColumnDef, ColumnOption, CreateIndex, CreateTable,
    ObjectName, ObjectType, Query as SqlQuery, TableConstraint,
};

use crate::ast::{
    AlterAction, AlterTableStmt, ColumnDef, CreateIndexStmt, CreateTableStmt, CreateViewStmt,
    DropIndexStmt, DropTableStmt, DropViewStmt, IndexElem, Stmt,
};

use super::from::range_var_from_object_name;
use super::translate_expr;
use super::types::translate_type_name;
use super::TranslateCtx;

/// `CREATE TABLE` (§4.5.2): `primary_key` collects column names from both an
/// inline `PRIMARY KEY` column option and a table-level `PRIMARY KEY (...)`
/// constraint into one flat list, since the neutral AST does not
/// distinguish the two spellings.
pub fn translate_create_table(ctx: &mut TranslateCtx, create: &CreateTable) -> Stmt {
    if create.query.is_some() {
        ctx.note_unsupported("CREATE TABLE ... AS SELECT".to_string());
    }

    let mut primary_key: Vec<String> = Vec::new();
    let columns = create
        .columns
        .iter()
        .map(|c| translate_column_def(&mut primary_key, c))
        .collect();

    for constraint in &create.constraints {
        if let TableConstraint::PrimaryKey { columns, .. } = constraint {
            for col in columns {
                let name = col.column.expr.to_string().to_lowercase();
                if !primary_key.contains(&name) {
                    primary_key.push(name);
                }
            }
        } else {
            ctx.note_unsupported(format!("{constraint:?}"));
        }
    }

    Stmt::CreateTable(CreateTableStmt {
        relation: range_var_from_object_name(&create.name, None),
        if_not_exists: create.if_not_exists,
        columns,
        primary_key,
    })
}

fn translate_column_def(primary_key: &mut Vec<String>, col: &SqlColumnDef) -> ColumnDef {
    let name = super::lower_ident(&col.name);
    let mut not_null = false;
    for opt in &col.options {
        match &opt.option {
            ColumnOption::NotNull => not_null = true,
            ColumnOption::Unique { is_primary, .. } if *is_primary => {
                not_null = true;
                if !primary_key.contains(&name) {
                    primary_key.push(name.clone());
                }
            }
            _ => {}
        }
    }
    ColumnDef {
        name,
        type_name: translate_type_name(&col.data_type),
        not_null,
    }
}

/// `CREATE INDEX` (§4.5.2). `USING <method>` and partial-index predicates
/// have no engine-neutral counterpart and are recorded as diagnostics.
pub fn translate_create_index(ctx: &mut TranslateCtx, create: &CreateIndex) -> Stmt {
    if create.predicate.is_some() {
        ctx.note_unsupported("CREATE INDEX ... WHERE".to_string());
    }
    let name = create
        .name
        .as_ref()
        .map(|n| object_name_lower_joined(n))
        .unwrap_or_default();
    let columns = create
        .columns
        .iter()
        .map(|c| IndexElem {
            name: c.column.expr.to_string().to_lowercase(),
            descending: c.column.options.asc == Some(false),
        })
        .collect();

    Stmt::CreateIndex(CreateIndexStmt {
        name,
        relation: range_var_from_object_name(&create.table_name, None),
        unique: create.unique,
        if_not_exists: create.if_not_exists,
        columns,
    })
}

fn object_name_lower_joined(name: &ObjectName) -> String {
    super::object_name_lowered(name).join(".")
}

/// `ALTER TABLE` (§4.5.2): `ADD COLUMN`, `DROP COLUMN`, and
/// `ALTER COLUMN ... SET DATA TYPE / SET DEFAULT / DROP DEFAULT` have
/// engine-neutral actions; everything else becomes a diagnostic and is
/// dropped from `actions`.
pub fn translate_alter_table(
    ctx: &mut TranslateCtx,
    name: &ObjectName,
    _if_exists: bool,
    operations: &[AlterTableOperation],
) -> Stmt {
    let mut actions = Vec::new();
    let mut primary_key = Vec::new();
    for op in operations {
        match op {
            AlterTableOperation::AddColumn { column_def, .. } => {
                actions.push(AlterAction::AddColumn(translate_column_def(&mut primary_key, column_def)));
            }
            AlterTableOperation::DropColumn { column_name, .. } => {
                actions.push(AlterAction::DropColumn {
                    name: super::lower_ident(column_name),
                });
            }
            AlterTableOperation::AlterColumn { column_name, op } => match op {
                sqlparser::ast::AlterColumnOperation::SetDataType { data_type, .. } => {
                    actions.push(AlterAction::AlterColumnType {
                        name: super::lower_ident(column_name),
                        type_name: translate_type_name(data_type),
                    });
                }
                sqlparser::ast::AlterColumnOperation::SetDefault { value } => {
                    actions.push(AlterAction::SetDefault {
                        name: super::lower_ident(column_name),
                        default: translate_expr(ctx, value),
                    });
                }
                sqlparser::ast::AlterColumnOperation::DropDefault => {
                    actions.push(AlterAction::DropDefault {
                        name: super::lower_ident(column_name),
                    });
                }
                other => ctx.note_unsupported(format!("{other:?}")),
            },
            other => ctx.note_unsupported(format!("{other:?}")),
        }
    }

    Stmt::AlterTable(AlterTableStmt {
        relation: range_var_from_object_name(name, None),
        actions,
    })
}

/// `CREATE VIEW` (§4.5.2). The query is translated as a full `SELECT`
/// statement, reusing the expression/select translator.
pub fn translate_create_view(
    ctx: &mut TranslateCtx,
    or_replace: bool,
    name: &ObjectName,
    columns: &[sqlparser::ast::ViewColumnDef],
    query: &SqlQuery,
) -> Stmt {
    let column_aliases = columns
        .iter()
        .map(|c| super::lower_ident(&c.name))
        .collect();
    Stmt::CreateView(CreateViewStmt {
        relation: range_var_from_object_name(name, None),
        or_replace,
        column_aliases,
        query: Box::new(super::translate_query(ctx, query)),
    })
}

/// `DROP TABLE` / `DROP INDEX` / `DROP VIEW` (§4.5.2): only the first name
/// in a multi-name `DROP` is translated, per §4.5.2's "one relation per
/// drop statement" simplification; additional names are recorded as
/// diagnostics rather than silently discarded.
pub fn translate_drop(
    ctx: &mut TranslateCtx,
    object_type: ObjectType,
    if_exists: bool,
    names: &[ObjectName],
) -> Stmt {
    let Some(first) = names.first() else {
        ctx.note_unsupported("DROP with no target".to_string());
        return Stmt::Todo(crate::ast::TodoNode::new(ctx.base_offset, "DropWithNoTarget"));
    };
    if names.len() > 1 {
        ctx.note_unsupported("DROP with multiple targets".to_string());
    }
    let relation = range_var_from_object_name(first, None);
    match object_type {
        ObjectType::Table => Stmt::DropTable(DropTableStmt { relation, if_exists }),
        ObjectType::View => Stmt::DropView(DropViewStmt { relation, if_exists }),
        ObjectType::Index => Stmt::DropIndex(DropIndexStmt {
            name: relation.name,
            if_exists,
        }),
        other => {
            ctx.note_unsupported(format!("DROP {other:?}"));
            Stmt::Todo(crate::ast::TodoNode::new(ctx.base_offset, "UnsupportedDropObjectType"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlparser::ast::Statement;
    use sqlparser::dialect::GenericDialect;
    use sqlparser::parser::Parser;

    fn parse(sql: &str) -> Statement {
        Parser::parse_sql(&GenericDialect {}, sql)
            .unwrap()
            .into_iter()
            .next()
            .unwrap()
    }

    #[test]
    fn create_table_collects_inline_and_table_level_pk() {
        let stmt = parse("CREATE TABLE t (id INT64 NOT NULL PRIMARY KEY, name STRING)");
        let mut ctx = TranslateCtx::new(0);
        let Statement::CreateTable(create) = &stmt else {
            panic!("expected create table")
        };
        let translated = translate_create_table(&mut ctx, create);
        match translated {
            Stmt::CreateTable(t) => {
                assert_eq!(t.relation.name, "t");
                assert_eq!(t.columns.len(), 2);
                assert!(t.primary_key.contains(&"id".to_string()));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn alter_table_add_column() {
        let stmt = parse("ALTER TABLE t ADD COLUMN age INT64");
        let mut ctx = TranslateCtx::new(0);
        let Statement::AlterTable {
            name,
            if_exists,
            operations,
            ..
        } = &stmt
        else {
            panic!("expected alter table")
        };
        let translated = translate_alter_table(&mut ctx, name, *if_exists, operations);
        match translated {
            Stmt::AlterTable(a) => {
                assert_eq!(a.relation.name, "t");
                assert_eq!(a.actions.len(), 1);
                assert!(matches!(a.actions[0], AlterAction::AddColumn(_)));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn alter_column_set_and_drop_default() {
        let stmt = parse("ALTER TABLE t ALTER COLUMN age SET DEFAULT 0");
        let mut ctx = TranslateCtx::new(0);
        let Statement::AlterTable {
            name,
            if_exists,
            operations,
            ..
        } = &stmt
        else {
            panic!("expected alter table")
        };
        let translated = translate_alter_table(&mut ctx, name, *if_exists, operations);
        match translated {
            Stmt::AlterTable(a) => {
                assert_eq!(a.actions.len(), 1);
                match &a.actions[0] {
                    AlterAction::SetDefault { name, default } => {
                        assert_eq!(name, "age");
                        assert_eq!(default, &crate::ast::Expr::Const(crate::ast::Const::Int(0)));
                    }
                    other => panic!("unexpected {other:?}"),
                }
            }
            other => panic!("unexpected {other:?}"),
        }

        let stmt = parse("ALTER TABLE t ALTER COLUMN age DROP DEFAULT");
        let mut ctx = TranslateCtx::new(0);
        let Statement::AlterTable {
            name,
            if_exists,
            operations,
            ..
        } = &stmt
        else {
            panic!("expected alter table")
        };
        let translated = translate_alter_table(&mut ctx, name, *if_exists, operations);
        match translated {
            Stmt::AlterTable(a) => {
                assert_eq!(a.actions.len(), 1);
                assert!(matches!(&a.actions[0], AlterAction::DropDefault { name } if name == "age"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn drop_table_if_exists() {
        let stmt = parse("DROP TABLE IF EXISTS t");
        let mut ctx = TranslateCtx::new(0);
        let Statement::Drop {
            object_type,
            if_exists,
            names,
            ..
        } = &stmt
        else {
            panic!("expected drop")
        };
        let translated = translate_drop(&mut ctx, *object_type, *if_exists, names);
        match translated {
            Stmt::DropTable(d) => {
                assert_eq!(d.relation.name, "t");
                assert!(d.if_exists);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
