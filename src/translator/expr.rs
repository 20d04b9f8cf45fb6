//! Expression translation (§4.5.5, §4.5.7).
//!
//! Each `sqlparser` `Expr` shape maps onto exactly the engine-neutral node
//! the shared analyzer expects; shapes this crate does not yet recognize
//! fall back to a null constant and a diagnostic recorded on the
//! translation context (§4.6, error kind 2) rather than aborting the whole
//! statement.

use sqlparser::ast::{
    BinaryOperator, CaseWhen as SqlCaseWhen, DuplicateTreatment, Expr as SqlExpr, Function,
    FunctionArg, FunctionArgExpr, FunctionArguments, Ident, ObjectName, Subscript, UnaryOperator,
    Value,
};

use crate::ast::{
    BoolExprOp, CaseWhen, ColumnRef, Const, Expr, Field, FuncArg as NeutralFuncArg,
    IndirectionStep, InList, SubLinkOp,
};

use super::TranslateCtx;

pub fn lower_ident(ident: &Ident) -> String {
    ident.value.to_lowercase()
}

pub fn object_name_lowered(name: &ObjectName) -> Vec<String> {
    name.0
        .iter()
        .filter_map(|part| part.as_ident())
        .map(lower_ident)
        .collect()
}

/// Joins a function path in its **original case**, per §4.5.7.
fn object_name_original_case(name: &ObjectName) -> Vec<String> {
    name.0
        .iter()
        .filter_map(|part| part.as_ident())
        .map(|i| i.value.clone())
        .collect()
}

pub fn translate_expr(ctx: &mut TranslateCtx, expr: &SqlExpr) -> Expr {
    match expr {
        SqlExpr::Identifier(ident) => Expr::ColumnRef(ColumnRef {
            fields: vec![Field::Name(lower_ident(ident))],
        }),
        SqlExpr::CompoundIdentifier(idents) => Expr::ColumnRef(ColumnRef {
            fields: idents.iter().map(|i| Field::Name(lower_ident(i))).collect(),
        }),
        SqlExpr::Value(v) => translate_value(ctx, v),
        SqlExpr::TypedString { data_type, value } => Expr::TypeCast {
            arg: Box::new(Expr::Const(Const::String(value.clone()))),
            type_name: super::types::translate_type_name(data_type),
        },
        SqlExpr::Cast {
            expr: inner,
            data_type,
            ..
        } => Expr::TypeCast {
            arg: Box::new(translate_expr(ctx, inner)),
            type_name: super::types::translate_type_name(data_type),
        },
        SqlExpr::Array(arr) => Expr::ArrayExpr {
            elements: arr.elem.iter().map(|e| translate_expr(ctx, e)).collect(),
            element_type: None,
        },
        SqlExpr::Interval(interval) => {
            let value_text = match translate_expr(ctx, &interval.value) {
                Expr::Const(Const::String(s)) => s,
                other => format!("{other:?}"),
            };
            // `INTERVAL n UNIT` carries only `leading_field`; the
            // `INTERVAL 'a-b' START TO END` range form carries both
            // `leading_field` and `last_field` (§4.5.5).
            let text = match (&interval.leading_field, &interval.last_field) {
                (Some(start), Some(end)) => format!("{value_text} {start} TO {end}"),
                (Some(unit), None) => format!("{value_text} {unit}"),
                _ => value_text,
            };
            Expr::TypeCast {
                arg: Box::new(Expr::Const(Const::String(text))),
                type_name: crate::ast::TypeName::simple("interval"),
            }
        }
        SqlExpr::BinaryOp { left, op, right } => Expr::AExpr {
            op: op.to_string(),
            left: Some(Box::new(translate_expr(ctx, left))),
            right: Box::new(translate_expr(ctx, right)),
        },
        SqlExpr::UnaryOp { op, expr: inner } => match op {
            UnaryOperator::Not => Expr::BoolExpr {
                op: BoolExprOp::Not,
                args: vec![translate_expr(ctx, inner)],
            },
            _ => Expr::AExpr {
                op: op.to_string(),
                left: None,
                right: Box::new(translate_expr(ctx, inner)),
            },
        },
        SqlExpr::Nested(inner) => translate_expr(ctx, inner),
        SqlExpr::IsNull(inner) => Expr::NullTest {
            arg: Box::new(translate_expr(ctx, inner)),
            negated: false,
        },
        SqlExpr::IsNotNull(inner) => Expr::NullTest {
            arg: Box::new(translate_expr(ctx, inner)),
            negated: true,
        },
        SqlExpr::Between {
            expr: inner,
            negated,
            low,
            high,
        } => {
            let x = translate_expr(ctx, inner);
            let ge = Expr::AExpr {
                op: ">=".to_string(),
                left: Some(Box::new(x.clone())),
                right: Box::new(translate_expr(ctx, low)),
            };
            let le = Expr::AExpr {
                op: "<=".to_string(),
                left: Some(Box::new(x)),
                right: Box::new(translate_expr(ctx, high)),
            };
            let and_expr = Expr::BoolExpr {
                op: BoolExprOp::And,
                args: vec![ge, le],
            };
            if *negated {
                Expr::BoolExpr {
                    op: BoolExprOp::Not,
                    args: vec![and_expr],
                }
            } else {
                and_expr
            }
        }
        SqlExpr::InList {
            expr: inner,
            list,
            negated,
        } => Expr::InExpr {
            arg: Box::new(translate_expr(ctx, inner)),
            negated: *negated,
            list: InList::Exprs(list.iter().map(|e| translate_expr(ctx, e)).collect()),
        },
        SqlExpr::InSubquery {
            expr: inner,
            subquery,
            negated,
        } => Expr::InExpr {
            arg: Box::new(translate_expr(ctx, inner)),
            negated: *negated,
            list: InList::Subquery(Box::new(super::translate_query_as_stmt(ctx, subquery))),
        },
        SqlExpr::InUnnest {
            expr: inner,
            array_expr,
            negated,
        } => Expr::InExpr {
            arg: Box::new(translate_expr(ctx, inner)),
            negated: *negated,
            list: InList::Unnest(Box::new(translate_expr(ctx, array_expr))),
        },
        SqlExpr::Exists { subquery, negated } => {
            let sublink = Expr::SubLink {
                op: SubLinkOp::Exists,
                test_expr: None,
                subselect: Box::new(super::translate_query_as_stmt(ctx, subquery)),
            };
            if *negated {
                Expr::BoolExpr {
                    op: BoolExprOp::Not,
                    args: vec![sublink],
                }
            } else {
                sublink
            }
        }
        SqlExpr::Subquery(q) => Expr::SubLink {
            op: SubLinkOp::Expr,
            test_expr: None,
            subselect: Box::new(super::translate_query_as_stmt(ctx, q)),
        },
        SqlExpr::Extract {
            field,
            expr: inner,
            ..
        } => Expr::FuncCall {
            name: vec!["extract".to_string()],
            args: vec![
                NeutralFuncArg::Positional(Expr::Const(Const::String(field.to_string()))),
                NeutralFuncArg::Positional(translate_expr(ctx, inner)),
            ],
            distinct: false,
            over: None,
        },
        SqlExpr::Case {
            operand,
            conditions,
            else_result,
            ..
        } => translate_case(ctx, operand.as_deref(), conditions, else_result.as_deref()),
        SqlExpr::Function(func) => translate_function(ctx, func),
        SqlExpr::CompositeAccess { expr: inner, key } => Expr::Indirection {
            arg: Box::new(translate_expr(ctx, inner)),
            path: vec![IndirectionStep::Field(lower_ident(key))],
        },
        SqlExpr::Subscript {
            expr: inner,
            subscript,
        } => translate_subscript(ctx, inner, subscript),
        SqlExpr::Tuple(items) => Expr::RowExpr {
            args: items.iter().map(|e| translate_expr(ctx, e)).collect(),
            colnames: Vec::new(),
        },
        SqlExpr::Struct { values, fields } => translate_struct(ctx, values, fields),
        // Bare `DEFAULT` (e.g. `INSERT INTO t VALUES (DEFAULT)`, `UPDATE ...
        // SET col = DEFAULT`) has no value of its own to translate; §4.5.5
        // maps it to the string constant `"DEFAULT"` everywhere it appears.
        SqlExpr::Default => Expr::Const(Const::String("DEFAULT".to_string())),
        other => {
            ctx.note_unsupported(format!("{other:?}"));
            Expr::Const(Const::Null)
        }
    }
}

fn translate_subscript(ctx: &mut TranslateCtx, base: &SqlExpr, subscript: &Subscript) -> Expr {
    let arg = Box::new(translate_expr(ctx, base));
    match subscript {
        Subscript::Index { index } => Expr::Indirection {
            arg,
            path: vec![IndirectionStep::Index(Box::new(translate_expr(ctx, index)))],
        },
        Subscript::Slice { lower, upper, .. } => Expr::Indirection {
            arg,
            path: vec![IndirectionStep::Slice {
                lower: lower.as_ref().map(|e| Box::new(translate_expr(ctx, e))),
                upper: upper.as_ref().map(|e| Box::new(translate_expr(ctx, e))),
            }],
        },
    }
}

fn translate_case(
    ctx: &mut TranslateCtx,
    operand: Option<&SqlExpr>,
    conditions: &[SqlCaseWhen],
    else_result: Option<&SqlExpr>,
) -> Expr {
    Expr::CaseExpr {
        arg: operand.map(|e| Box::new(translate_expr(ctx, e))),
        when_clauses: conditions
            .iter()
            .map(|w| CaseWhen {
                condition: translate_expr(ctx, &w.condition),
                result: translate_expr(ctx, &w.result),
            })
            .collect(),
        default_result: else_result.map(|e| Box::new(translate_expr(ctx, e))),
    }
}

/// Struct literals (§4.5.5). Typed `STRUCT<field_i: T_i>(v_i)` carries
/// non-empty `fields`, and the declared type text is preserved verbatim in
/// the colname (not lowered, unlike ordinary type translation) so field
/// access after the literal can recover it.
fn translate_struct(
    ctx: &mut TranslateCtx,
    values: &[SqlExpr],
    fields: &[sqlparser::ast::StructField],
) -> Expr {
    let args: Vec<Expr> = values.iter().map(|e| translate_expr(ctx, e)).collect();

    if !fields.is_empty() {
        let colnames: Vec<String> = fields
            .iter()
            .map(|field| {
                let name = field.field_name.as_ref().map(lower_ident).unwrap_or_default();
                format!("{name}:{}", field.field_type)
            })
            .collect();
        return Expr::RowExpr { args, colnames };
    }

    // Typeless `STRUCT(v_i AS a_i)`: only literal-valued args carry an
    // inferred type in the colname; everything else (e.g. column
    // references) is emitted with no colname, per §4.5.5 / §9.
    let colnames = values
        .iter()
        .zip(&args)
        .map(|(src, translated)| infer_struct_colname(src, translated))
        .collect();
    Expr::RowExpr { args, colnames }
}

fn infer_struct_colname(source: &SqlExpr, translated: &Expr) -> String {
    let SqlExpr::Named { expr: inner, name } = source else {
        return String::new();
    };
    let alias = lower_ident(name);
    // `Const::String` alone no longer distinguishes bool/bytes/string
    // literals (§4.5.5 collapses all three into one constant kind), so the
    // source value is consulted directly for those three cases.
    let ty = match (inner.as_ref(), translated) {
        (_, Expr::Const(Const::Int(_))) => "INT64",
        (_, Expr::Const(Const::Float(_))) => "FLOAT64",
        (SqlExpr::Value(Value::Boolean(_)), _) => "BOOL",
        (
            SqlExpr::Value(
                Value::SingleQuotedByteStringLiteral(_)
                | Value::DoubleQuotedByteStringLiteral(_)
                | Value::TripleSingleQuotedByteStringLiteral(_)
                | Value::TripleDoubleQuotedByteStringLiteral(_),
            ),
            _,
        ) => "BYTES",
        (_, Expr::Const(Const::String(_))) => "STRING",
        (_, Expr::TypeCast { type_name, .. }) => {
            return format!("{alias}:{}", type_name.names.join("."));
        }
        _ => return alias,
    };
    format!("{alias}:{ty}")
}

/// `@name` parameters arrive as `Value::Placeholder` carrying the sigil plus
/// name verbatim (e.g. `"@user_id"`); this is the only `Value` shape that
/// needs the translation context, since every occurrence must resolve
/// through the per-statement parameter tracker (C4, §4.4, §4.5.5).
fn translate_value(ctx: &mut TranslateCtx, v: &Value) -> Expr {
    match v {
        Value::Null => Expr::Const(Const::Null),
        Value::Boolean(b) => Expr::Const(Const::String(b.to_string())),
        Value::Number(text, _) => parse_number(text),
        Value::SingleQuotedString(s)
        | Value::DoubleQuotedString(s)
        | Value::TripleSingleQuotedString(s)
        | Value::TripleDoubleQuotedString(s)
        | Value::EscapedStringLiteral(s)
        | Value::UnQuotedString(s)
        | Value::RawStringLiteral(s) => Expr::Const(Const::String(s.clone())),
        Value::SingleQuotedByteStringLiteral(s)
        | Value::DoubleQuotedByteStringLiteral(s)
        | Value::TripleSingleQuotedByteStringLiteral(s)
        | Value::TripleDoubleQuotedByteStringLiteral(s) => {
            // Bytes literals carry their raw byte sequence coerced to a
            // string-shaped constant (§4.5.5) — no dedicated bytes kind.
            Expr::Const(Const::String(s.clone()))
        }
        Value::Placeholder(raw) => {
            let name = raw.strip_prefix('@').unwrap_or(raw);
            let index = ctx.params.intern(name);
            Expr::ParamRef {
                index,
                name: name.to_string(),
            }
        }
        other => Expr::Const(Const::String(other.to_string())),
    }
}

fn parse_number(text: &str) -> Expr {
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        if let Ok(i) = i64::from_str_radix(hex, 16) {
            return Expr::Const(Const::Int(i));
        }
    }
    if let Ok(i) = text.parse::<i64>() {
        return Expr::Const(Const::Int(i));
    }
    if let Ok(f) = text.parse::<f64>() {
        return Expr::Const(Const::Float(f));
    }
    Expr::TypeCast {
        arg: Box::new(Expr::Const(Const::String(text.to_string()))),
        type_name: crate::ast::TypeName::simple("numeric"),
    }
}

/// Generic function-call translation (§4.5.7), including the special
/// lowerings `IF`/`IFNULL`/`NULLIF`/`COALESCE` from §4.5.5. `COUNT(*)` falls
/// out of the generic path automatically: a bare `*` argument becomes
/// [`NeutralFuncArg::Star`].
fn translate_function(ctx: &mut TranslateCtx, func: &Function) -> Expr {
    let name_segments = object_name_original_case(&func.name);

    if name_segments.len() == 1 {
        if let Some(special) = translate_special_function(ctx, &name_segments[0], &func.args) {
            return special;
        }
    }

    let distinct = matches!(
        &func.args,
        FunctionArguments::List(list)
            if matches!(list.duplicate_treatment, Some(DuplicateTreatment::Distinct))
    );
    let args = translate_func_args(ctx, &func.args);

    Expr::FuncCall {
        name: name_segments,
        args,
        distinct,
        over: None,
    }
}

/// Handles the small set of BigQuery scalar functions §4.5.5 requires to be
/// lowered to dedicated expression nodes instead of staying function calls.
fn translate_special_function(
    ctx: &mut TranslateCtx,
    name: &str,
    raw_args: &FunctionArguments,
) -> Option<Expr> {
    let upper = name.to_uppercase();
    let plain_args = plain_arg_exprs(raw_args)?;

    match upper.as_str() {
        "IF" if plain_args.len() == 3 => Some(Expr::CaseExpr {
            arg: None,
            when_clauses: vec![CaseWhen {
                condition: translate_expr(ctx, plain_args[0]),
                result: translate_expr(ctx, plain_args[1]),
            }],
            default_result: Some(Box::new(translate_expr(ctx, plain_args[2]))),
        }),
        "IFNULL" if plain_args.len() == 2 => {
            let e = translate_expr(ctx, plain_args[0]);
            Some(Expr::CaseExpr {
                arg: None,
                when_clauses: vec![CaseWhen {
                    condition: Expr::NullTest {
                        arg: Box::new(e.clone()),
                        negated: true,
                    },
                    result: e,
                }],
                default_result: Some(Box::new(translate_expr(ctx, plain_args[1]))),
            })
        }
        "NULLIF" if plain_args.len() == 2 => {
            let e = translate_expr(ctx, plain_args[0]);
            let m = translate_expr(ctx, plain_args[1]);
            Some(Expr::CaseExpr {
                arg: None,
                when_clauses: vec![CaseWhen {
                    condition: Expr::AExpr {
                        op: "=".to_string(),
                        left: Some(Box::new(e.clone())),
                        right: Box::new(m),
                    },
                    result: Expr::Const(Const::Null),
                }],
                default_result: Some(Box::new(e)),
            })
        }
        "COALESCE" => Some(Expr::CoalesceExpr {
            args: plain_args.into_iter().map(|e| translate_expr(ctx, e)).collect(),
        }),
        _ => None,
    }
}

/// Returns the plain-expression arguments of a function call, or `None` if
/// any argument is a wildcard/named form (the special lowerings above only
/// apply to plain-expression argument lists).
fn plain_arg_exprs(args: &FunctionArguments) -> Option<Vec<&SqlExpr>> {
    let FunctionArguments::List(list) = args else {
        return None;
    };
    list.args
        .iter()
        .map(|a| match a {
            FunctionArg::Unnamed(FunctionArgExpr::Expr(e)) => Some(e),
            _ => None,
        })
        .collect()
}

fn translate_func_args(ctx: &mut TranslateCtx, args: &FunctionArguments) -> Vec<NeutralFuncArg> {
    let FunctionArguments::List(list) = args else {
        return Vec::new();
    };
    list.args
        .iter()
        .map(|a| match a {
            FunctionArg::Unnamed(FunctionArgExpr::Expr(e)) => {
                NeutralFuncArg::Positional(translate_expr(ctx, e))
            }
            FunctionArg::Unnamed(FunctionArgExpr::Wildcard)
            | FunctionArg::Unnamed(FunctionArgExpr::QualifiedWildcard(_)) => NeutralFuncArg::Star,
            _ => {
                ctx.note_unsupported("named function argument".to_string());
                NeutralFuncArg::Positional(Expr::Const(Const::Null))
            }
        })
        .collect()
}
