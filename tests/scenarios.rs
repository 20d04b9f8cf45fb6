//! The six named scenarios from spec.md §8.

use spanner_sqlfrontend::ast::{Const, Expr, Field, Stmt, TableRef};
use spanner_sqlfrontend::{default_catalog, parse};

#[test]
fn scenario_1_simple_select() {
    let out = parse("SELECT id, name, email FROM users WHERE id = @user_id;").unwrap();
    assert_eq!(out.len(), 1);
    let Stmt::Select(select) = &out[0].stmt else {
        panic!("expected select")
    };
    assert_eq!(select.target_list.len(), 3);
    for target in &select.target_list {
        assert!(matches!(target.name.as_deref(), Some("id" | "name" | "email")));
        assert!(matches!(target.val, Expr::ColumnRef(_)));
    }
    match select.where_clause.as_ref().unwrap() {
        Expr::AExpr { op, .. } => assert_eq!(op, "="),
        other => panic!("unexpected where clause {other:?}"),
    }
}

#[test]
fn scenario_2_then_return() {
    let out = parse(
        "INSERT INTO users (id, name, email) VALUES (@id, @name, @email) THEN RETURN id, name, email;",
    )
    .unwrap();
    assert_eq!(out.len(), 1);
    let Stmt::Insert(insert) = &out[0].stmt else {
        panic!("expected insert")
    };
    assert_eq!(insert.columns, vec!["id", "name", "email"]);
    assert_eq!(insert.values.len(), 1);
    assert_eq!(insert.values[0].len(), 3);
    for (i, val) in insert.values[0].iter().enumerate() {
        match val {
            Expr::ParamRef { index, .. } => assert_eq!(*index, i + 1),
            other => panic!("unexpected param {other:?}"),
        }
    }
    assert_eq!(insert.returning.len(), 3);
}

#[test]
fn scenario_3_unnest_with_offset() {
    let out = parse("SELECT value, pos FROM UNNEST(@arr) AS value WITH OFFSET AS pos;").unwrap();
    assert_eq!(out.len(), 1);
    let Stmt::Select(select) = &out[0].stmt else {
        panic!("expected select")
    };
    assert_eq!(select.from.len(), 1);
    let TableRef::RangeFunction(rf) = &select.from[0] else {
        panic!("expected range function")
    };
    match &rf.function {
        Expr::FuncCall { name, args, .. } => {
            assert_eq!(name, &vec!["unnest".to_string()]);
            assert_eq!(args.len(), 1);
        }
        other => panic!("unexpected function {other:?}"),
    }
    assert!(rf.with_offset.is_some());
    assert_eq!(rf.alias.as_deref(), Some("value"));
}

#[test]
fn scenario_4_safe_and_namespaced_call() {
    let out = parse("SELECT SAFE.SUBSTR(name, 0, -2), NET.IPV4_TO_INT64(ip) FROM t;").unwrap();
    let Stmt::Select(select) = &out[0].stmt else {
        panic!("expected select")
    };
    assert_eq!(select.target_list.len(), 2);
    let names: Vec<String> = select
        .target_list
        .iter()
        .map(|t| match &t.val {
            Expr::FuncCall { name, .. } => name.join("."),
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    assert_eq!(names, vec!["SAFE.SUBSTR".to_string(), "NET.IPV4_TO_INT64".to_string()]);

    let catalog = default_catalog();
    let safe_substr = catalog.lookup("SAFE.SUBSTR");
    assert!(!safe_substr.is_empty());
    assert!(safe_substr.iter().all(|sig| sig.nullable));
}

#[test]
fn scenario_5_typed_struct_field_access() {
    let out = parse("SELECT STRUCT<id INT64, name STRING>(42, 'Alice').name;").unwrap();
    let Stmt::Select(select) = &out[0].stmt else {
        panic!("expected select")
    };
    assert_eq!(select.target_list.len(), 1);
    match &select.target_list[0].val {
        Expr::Indirection { arg, path } => {
            match arg.as_ref() {
                Expr::RowExpr { colnames, .. } => {
                    assert_eq!(
                        colnames,
                        &vec!["id:INT64".to_string(), "name:STRING".to_string()]
                    );
                }
                other => panic!("unexpected row expr {other:?}"),
            }
            assert_eq!(path.len(), 1);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn scenario_6_parameter_reuse() {
    let out = parse("UPDATE users SET name = @name WHERE id = @id AND name != @name;").unwrap();
    let Stmt::Update(update) = &out[0].stmt else {
        panic!("expected update")
    };
    assert_eq!(update.targets.len(), 1);
    match &update.targets[0].val {
        Expr::ParamRef { index, name } => {
            assert_eq!(*index, 1);
            assert_eq!(name, "name");
        }
        other => panic!("unexpected {other:?}"),
    }

    let mut param_refs = Vec::new();
    collect_param_refs(update.where_clause.as_ref().unwrap(), &mut param_refs);
    assert_eq!(param_refs.len(), 2);
    assert!(param_refs.iter().any(|(idx, name)| *idx == 2 && name == "id"));
    assert!(param_refs.iter().any(|(idx, name)| *idx == 1 && name == "name"));
}

fn collect_param_refs<'a>(expr: &'a Expr, out: &mut Vec<(usize, &'a str)>) {
    match expr {
        Expr::ParamRef { index, name } => out.push((*index, name)),
        Expr::BoolExpr { args, .. } => {
            for a in args {
                collect_param_refs(a, out);
            }
        }
        Expr::AExpr { left, right, .. } => {
            if let Some(l) = left {
                collect_param_refs(l, out);
            }
            collect_param_refs(right, out);
        }
        _ => {}
    }
}

#[test]
fn star_wraps_in_column_ref_wildcard() {
    let out = parse("SELECT * FROM t;").unwrap();
    let Stmt::Select(select) = &out[0].stmt else {
        panic!("expected select")
    };
    match &select.target_list[0].val {
        Expr::ColumnRef(cr) => assert_eq!(cr.fields, vec![Field::Star]),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn numeric_and_string_literals_translate_to_consts() {
    let out = parse("SELECT 1, 'x', true, NULL;").unwrap();
    let Stmt::Select(select) = &out[0].stmt else {
        panic!("expected select")
    };
    let consts: Vec<&Const> = select
        .target_list
        .iter()
        .map(|t| match &t.val {
            Expr::Const(c) => c,
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    assert!(matches!(consts[0], Const::Int(1)));
    assert!(matches!(consts[1], Const::String(s) if s == "x"));
    assert!(matches!(consts[2], Const::String(s) if s == "true"));
    assert!(matches!(consts[3], Const::Null));
}

#[test]
fn bare_default_in_insert_values_is_a_string_constant() {
    let out = parse("INSERT INTO t (a, b) VALUES (1, DEFAULT);").unwrap();
    let Stmt::Insert(insert) = &out[0].stmt else {
        panic!("expected insert")
    };
    assert!(matches!(
        insert.values[0][1],
        Expr::Const(Const::String(ref s)) if s == "DEFAULT"
    ));
}
