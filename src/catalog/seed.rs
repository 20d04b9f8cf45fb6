//! The bundled standard-library seed for the [`Catalog`](super::Catalog)
//! (§4.2's inventory). Organized by family to mirror the order spec.md lists
//! them in; each family is a small private helper so `populate` reads as a
//! table of contents.

use super::{ArgType::*, Catalog, FunctionSignature};

fn f(name: &str, args: &[super::ArgType], ret: super::ArgType, nullable: bool) -> FunctionSignature {
    FunctionSignature {
        name: name.to_string(),
        args: args.to_vec(),
        return_type: ret,
        nullable,
        is_aggregate: false,
    }
}

fn agg(name: &str, args: &[super::ArgType], ret: super::ArgType) -> FunctionSignature {
    FunctionSignature {
        name: name.to_string(),
        args: args.to_vec(),
        return_type: ret,
        nullable: false,
        is_aggregate: true,
    }
}

/// Adds one overload per numeric type for a function whose shape is
/// `F(numeric_arg) -> same_type`, e.g. `ABS`, `ROUND`, `CEIL`.
fn numeric_unary(cat: &mut Catalog, name: &str) {
    for ty in [Int64, Float64, Numeric] {
        cat.insert(f(name, &[ty.clone()], ty, false));
    }
}

fn scalar_and_string(cat: &mut Catalog) {
    numeric_unary(cat, "ABS");
    numeric_unary(cat, "SIGN");
    numeric_unary(cat, "CEIL");
    numeric_unary(cat, "CEILING");
    numeric_unary(cat, "FLOOR");
    numeric_unary(cat, "ROUND");
    cat.insert(f("SQRT", &[Float64], Float64, false));
    cat.insert(f("POW", &[Float64, Float64], Float64, false));
    cat.insert(f("MOD", &[Int64, Int64], Int64, false));
    cat.insert(f("LOG", &[Float64], Float64, false));
    cat.insert(f("LOG", &[Float64, Float64], Float64, false));
    cat.insert(f("LOG10", &[Float64], Float64, false));
    cat.insert(f("EXP", &[Float64], Float64, false));
    cat.insert(f("GREATEST", &[Any], Any, true));
    cat.insert(f("LEAST", &[Any], Any, true));

    for (name, nullable) in [
        ("SAFE_ADD", true),
        ("SAFE_SUBTRACT", true),
        ("SAFE_MULTIPLY", true),
        ("SAFE_DIVIDE", true),
    ] {
        for ty in [Int64, Float64, Numeric] {
            cat.insert(f(name, &[ty.clone(), ty.clone()], ty, nullable));
        }
    }
    for ty in [Int64, Float64, Numeric] {
        cat.insert(f("SAFE_NEGATE", &[ty.clone()], ty, true));
    }

    cat.insert(f("CONCAT", &[String], String, false));
    cat.insert(f("LENGTH", &[String], Int64, false));
    cat.insert(f("LENGTH", &[Bytes], Int64, false));
    cat.insert(f("LOWER", &[String], String, false));
    cat.insert(f("UPPER", &[String], String, false));
    cat.insert(f("SUBSTR", &[String, Int64], String, false));
    cat.insert(f("SUBSTR", &[String, Int64, Int64], String, false));
    cat.insert(f("TRIM", &[String], String, false));
    cat.insert(f("LTRIM", &[String], String, false));
    cat.insert(f("RTRIM", &[String], String, false));
    cat.insert(f("REPLACE", &[String, String, String], String, false));
    cat.insert(f("SPLIT", &[String, String], Array(Box::new(String)), false));
    cat.insert(f("STARTS_WITH", &[String, String], Bool, false));
    cat.insert(f("ENDS_WITH", &[String, String], Bool, false));
    cat.insert(f("STRPOS", &[String, String], Int64, false));
    cat.insert(f("REVERSE", &[String], String, false));
    cat.insert(f("FORMAT", &[String, Any], String, false));
    cat.insert(f("REGEXP_CONTAINS", &[String, String], Bool, false));
    cat.insert(f("REGEXP_EXTRACT", &[String, String], String, true));
    cat.insert(
        f("REGEXP_EXTRACT_ALL", &[String, String], Array(Box::new(String)), false),
    );
    cat.insert(f("REGEXP_REPLACE", &[String, String, String], String, false));
}

fn date_time(cat: &mut Catalog) {
    cat.insert(f("CURRENT_DATE", &[], Date, false));
    cat.insert(f("CURRENT_TIMESTAMP", &[], Timestamp, false));
    cat.insert(f("DATE", &[String], Date, false));
    cat.insert(f("TIMESTAMP", &[String], Timestamp, false));
    cat.insert(f("EXTRACT", &[String, Timestamp], Int64, false));
    cat.insert(f("DATE_ADD", &[Date, Int64, String], Date, false));
    cat.insert(f("DATE_SUB", &[Date, Int64, String], Date, false));
    cat.insert(f("DATE_DIFF", &[Date, Date, String], Int64, false));
    cat.insert(f("TIMESTAMP_ADD", &[Timestamp, Int64, String], Timestamp, false));
    cat.insert(f("TIMESTAMP_SUB", &[Timestamp, Int64, String], Timestamp, false));
    cat.insert(f("TIMESTAMP_DIFF", &[Timestamp, Timestamp, String], Int64, false));
    cat.insert(f("FORMAT_DATE", &[String, Date], String, false));
    cat.insert(f("FORMAT_TIMESTAMP", &[String, Timestamp], String, false));
    cat.insert(f("PARSE_DATE", &[String, String], Date, false));
    cat.insert(f("PARSE_TIMESTAMP", &[String, String], Timestamp, false));
}

fn array_fns(cat: &mut Catalog) {
    cat.insert(f("ARRAY_LENGTH", &[Array(Box::new(Any))], Int64, false));
    cat.insert(f("ARRAY_TO_STRING", &[Array(Box::new(String)), String], String, false));
    cat.insert(f("ARRAY_CONCAT", &[Array(Box::new(Any))], Array(Box::new(Any)), false));
    cat.insert(f("ARRAY_REVERSE", &[Array(Box::new(Any))], Array(Box::new(Any)), false));
    cat.insert(f("GENERATE_ARRAY", &[Int64, Int64], Array(Box::new(Int64)), false));
    cat.insert(f("GENERATE_ARRAY", &[Int64, Int64, Int64], Array(Box::new(Int64)), false));
}

fn json_fns(cat: &mut Catalog) {
    cat.insert(f("JSON_EXTRACT", &[Json, String], Json, true));
    cat.insert(f("JSON_EXTRACT_SCALAR", &[Json, String], String, true));
    cat.insert(f("JSON_QUERY", &[Json, String], Json, true));
    cat.insert(f("JSON_VALUE", &[Json, String], String, true));
    cat.insert(f("TO_JSON", &[Any], Json, false));
    cat.insert(f("TO_JSON_STRING", &[Any], String, false));
    cat.insert(f("PARSE_JSON", &[String], Json, false));
    cat.insert(f("JSON_EXTRACT_ARRAY", &[Json, String], Array(Box::new(Json)), true));
    cat.insert(f(
        "JSON_EXTRACT_STRING_ARRAY",
        &[Json, String],
        Array(Box::new(String)),
        true,
    ));
}

fn aggregates(cat: &mut Catalog) {
    cat.insert(agg("COUNT", &[Any], Int64));
    cat.insert(agg("SUM", &[Int64], Int64));
    cat.insert(agg("SUM", &[Float64], Float64));
    cat.insert(agg("SUM", &[Numeric], Numeric));
    cat.insert(agg("AVG", &[Float64], Float64));
    cat.insert(agg("MIN", &[Any], Any));
    cat.insert(agg("MAX", &[Any], Any));
    cat.insert(agg("STRING_AGG", &[String], String));
    cat.insert(agg("ARRAY_AGG", &[Any], Array(Box::new(Any))));
    cat.insert(f("COUNT_IF", &[Bool], Int64, false));
    for name in ["STDDEV", "STDDEV_POP", "STDDEV_SAMP", "VARIANCE", "VAR_POP", "VAR_SAMP"] {
        cat.insert(agg(name, &[Float64], Float64));
    }
    for name in ["BIT_AND", "BIT_OR", "BIT_XOR"] {
        cat.insert(agg(name, &[Int64], Int64));
    }
    for name in ["LOGICAL_AND", "LOGICAL_OR"] {
        cat.insert(agg(name, &[Bool], Bool));
    }
}

fn conditional(cat: &mut Catalog) {
    cat.insert(f("CAST", &[Any], Any, false));
    cat.insert(f("SAFE_CAST", &[Any], Any, true));
    cat.insert(f("IF", &[Bool, Any, Any], Any, false));
    cat.insert(f("IFNULL", &[Any, Any], Any, false));
    cat.insert(f("NULLIF", &[Any, Any], Any, true));
    cat.insert(f("COALESCE", &[Any], Any, true));
}

fn uuid_and_hash(cat: &mut Catalog) {
    cat.insert(f("PENDING_COMMIT_TIMESTAMP", &[], Timestamp, false));
    cat.insert(f("GENERATE_UUID", &[], String, false));
    cat.insert(f("FARM_FINGERPRINT", &[Bytes], Int64, false));
    for name in ["MD5", "SHA1", "SHA256", "SHA512"] {
        cat.insert(f(name, &[Bytes], Bytes, false));
    }
    cat.insert(f("TO_BASE64", &[Bytes], String, false));
    cat.insert(f("FROM_BASE64", &[String], Bytes, false));
    cat.insert(f("TO_HEX", &[Bytes], String, false));
    cat.insert(f("FROM_HEX", &[String], Bytes, false));
}

fn window_fns(cat: &mut Catalog) {
    for name in ["ROW_NUMBER", "RANK", "DENSE_RANK", "NTILE"] {
        cat.insert(f(name, &[], Int64, false));
    }
    cat.insert(f("PERCENT_RANK", &[], Float64, false));
    cat.insert(f("CUME_DIST", &[], Float64, false));
    cat.insert(f("LAG", &[Any], Any, true));
    cat.insert(f("LEAD", &[Any], Any, true));
    cat.insert(f("FIRST_VALUE", &[Any], Any, true));
    cat.insert(f("LAST_VALUE", &[Any], Any, true));
    cat.insert(f("NTH_VALUE", &[Any, Int64], Any, true));
}

fn bit_fns(cat: &mut Catalog) {
    cat.insert(f("BIT_NOT", &[Int64], Int64, false));
    cat.insert(f("BIT_COUNT", &[Int64], Int64, false));
}

fn net_fns(cat: &mut Catalog) {
    cat.insert(f("NET.IP_FROM_STRING", &[String], Bytes, false));
    cat.insert(f("NET.IP_TO_STRING", &[Bytes], String, false));
    cat.insert(f("NET.IPV4_FROM_INT64", &[Int64], Bytes, false));
    cat.insert(f("NET.IPV4_TO_INT64", &[Bytes], Int64, false));
    cat.insert(f("NET.HOST", &[String], String, true));
    cat.insert(f("NET.REG_DOMAIN", &[String], String, true));
    cat.insert(f("NET.PUBLIC_SUFFIX", &[String], String, true));
}

pub fn populate(cat: &mut Catalog) {
    scalar_and_string(cat);
    date_time(cat);
    array_fns(cat);
    json_fns(cat);
    aggregates(cat);
    conditional(cat);
    uuid_and_hash(cat);
    window_fns(cat);
    bit_fns(cat);
    net_fns(cat);
}
