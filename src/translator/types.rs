//! Type-name translation (§4.5.4).
//!
//! Spanner scalar type names are folded onto the engine-neutral vocabulary
//! the downstream analyzer understands; anything unrecognized falls back to
//! `text` rather than failing translation. Matching goes through `Display`
//! on `sqlparser`'s `DataType` rather than an exhaustive variant match:
//! `sqlparser` keeps adding dialect-specific `DataType` variants, and the
//! mapping this crate needs only cares about the rendered type keyword, not
//! which variant produced it.

use sqlparser::ast::{ArrayElemTypeDef, DataType};

use crate::ast::TypeName;

pub fn translate_type_name(dt: &DataType) -> TypeName {
    if let DataType::Array(elem) = dt {
        let inner = array_elem_type_name(elem);
        return TypeName {
            names: inner.names,
            array_bounds: inner.array_bounds + 1,
        };
    }

    let text = dt.to_string().to_uppercase();
    let head = text
        .split(|c: char| c == '(' || c == '<')
        .next()
        .unwrap_or(&text)
        .trim();

    let simple = match head {
        "BOOL" | "BOOLEAN" => "bool",
        "INT64" | "BIGINT" | "INT" | "INTEGER" | "SMALLINT" | "TINYINT" => "int64",
        "FLOAT32" | "REAL" => "float32",
        "FLOAT64" | "FLOAT" | "DOUBLE" | "DOUBLE PRECISION" => "float64",
        "NUMERIC" | "DECIMAL" | "BIGNUMERIC" => "numeric",
        "STRING" | "VARCHAR" | "TEXT" | "CHAR" | "CHARACTER" | "CHARACTER VARYING" => "string",
        "BYTES" | "VARBINARY" | "BLOB" | "BINARY" => "bytes",
        "DATE" => "date",
        "TIMESTAMP" | "DATETIME" => "timestamp",
        "INTERVAL" => "interval",
        "JSON" | "JSONB" => "json",
        "TOKENLIST" => "tokenlist",
        _ => "text",
    };
    TypeName::simple(simple)
}

fn array_elem_type_name(elem: &ArrayElemTypeDef) -> TypeName {
    match elem {
        ArrayElemTypeDef::None => TypeName::simple("text"),
        ArrayElemTypeDef::AngleBracket(t) => translate_type_name(t),
        ArrayElemTypeDef::SquareBracket(t, _) => translate_type_name(t),
        ArrayElemTypeDef::Parenthesis(t) => translate_type_name(t),
    }
}
