//! Table-driven coverage for the function catalog (§4.2), the keyword
//! oracle (§8 P6), and type-name translation (§4.5.4), one `#[case]` row
//! per catalog function / keyword / type-mapping entry, in the style of
//! this crate's teacher lineage's own `#[rstest]` fixture tables.

use rstest::rstest;

use spanner_sqlfrontend::ast::{ColumnDef, Stmt};
use spanner_sqlfrontend::{default_catalog, is_reserved_keyword, parse};

#[rstest]
#[case("ABS")]
#[case("SIGN")]
#[case("CEIL")]
#[case("FLOOR")]
#[case("ROUND")]
#[case("CONCAT")]
#[case("SUBSTR")]
#[case("STARTS_WITH")]
#[case("ENDS_WITH")]
#[case("LOWER")]
#[case("UPPER")]
#[case("LENGTH")]
#[case("CURRENT_DATE")]
#[case("CURRENT_TIMESTAMP")]
#[case("DATE_ADD")]
#[case("TIMESTAMP_DIFF")]
#[case("ARRAY_LENGTH")]
#[case("ARRAY_TO_STRING")]
#[case("GENERATE_ARRAY")]
#[case("TO_JSON")]
#[case("JSON_VALUE")]
#[case("IF")]
#[case("IFNULL")]
#[case("COALESCE")]
#[case("GENERATE_UUID")]
#[case("FARM_FINGERPRINT")]
#[case("BIT_COUNT")]
#[case("NET.IPV4_TO_INT64")]
#[case("NET.REG_DOMAIN")]
fn catalog_knows_every_seeded_non_aggregate_function(#[case] name: &str) {
    let cat = default_catalog();
    assert!(cat.is_known(name), "{name} should be a known function");
    assert!(!cat.is_aggregate(name), "{name} should not be an aggregate");
    assert!(
        cat.is_known(&format!("SAFE.{name}")),
        "SAFE.{name} should be synthesized"
    );
}

#[rstest]
#[case("AVG")]
#[case("COUNT")]
#[case("MAX")]
#[case("MIN")]
#[case("SUM")]
#[case("STRING_AGG")]
#[case("ARRAY_AGG")]
#[case("BIT_AND")]
#[case("BIT_OR")]
#[case("BIT_XOR")]
#[case("LOGICAL_AND")]
#[case("LOGICAL_OR")]
#[case("STDDEV")]
#[case("STDDEV_POP")]
#[case("STDDEV_SAMP")]
#[case("VARIANCE")]
#[case("VAR_POP")]
#[case("VAR_SAMP")]
fn catalog_marks_every_aggregate_and_skips_safe_synthesis(#[case] name: &str) {
    let cat = default_catalog();
    assert!(cat.is_known(name), "{name} should be a known function");
    assert!(cat.is_aggregate(name), "{name} should be an aggregate");
    assert!(
        !cat.is_known(&format!("SAFE.{name}")),
        "SAFE.{name} should not exist for an aggregate"
    );
}

#[rstest]
#[case("SELECT", true)]
#[case("FROM", true)]
#[case("WHERE", true)]
#[case("CASE", true)]
#[case("WHEN", true)]
#[case("THEN", true)]
#[case("ELSE", true)]
#[case("END", true)]
#[case("JOIN", true)]
#[case("UNNEST", true)]
#[case("INTERVAL", true)]
#[case("ARRAY", true)]
#[case("STRUCT", true)]
#[case("WITH", true)]
#[case("WINDOW", true)]
#[case("INSERT", false)]
#[case("UPDATE", false)]
#[case("DELETE", false)]
#[case("TABLE", false)]
#[case("INDEX", false)]
#[case("VIEW", false)]
#[case("QUALIFY", false)]
#[case("VALUES", false)]
#[case("OFFSET", false)]
#[case("my_table", false)]
#[case("user_id", false)]
#[case("total_amount", false)]
fn keyword_oracle_partitions_the_known_vocabulary(#[case] word: &str, #[case] reserved: bool) {
    assert_eq!(is_reserved_keyword(word), reserved, "word = {word}");
    assert_eq!(
        is_reserved_keyword(&word.to_lowercase()),
        reserved,
        "word = {word} (lowercase)"
    );
}

#[rstest]
#[case("INT64", "int64")]
#[case("BOOL", "bool")]
#[case("FLOAT64", "float64")]
#[case("NUMERIC", "numeric")]
#[case("STRING(MAX)", "string")]
#[case("BYTES(1024)", "bytes")]
#[case("DATE", "date")]
#[case("TIMESTAMP", "timestamp")]
#[case("JSON", "json")]
fn scalar_type_names_map_to_engine_neutral_names(#[case] spanner_type: &str, #[case] expected: &str) {
    let sql = format!("CREATE TABLE t (c {spanner_type});");
    let out = parse(&sql).unwrap();
    let Stmt::CreateTable(create) = &out[0].stmt else {
        panic!("expected create table")
    };
    let col: &ColumnDef = &create.columns[0];
    assert_eq!(col.type_name.names, vec![expected.to_string()]);
    assert_eq!(col.type_name.array_bounds, 0);
}

#[test]
fn array_type_name_increments_array_bounds() {
    let out = parse("CREATE TABLE t (tags ARRAY<STRING(MAX)>);").unwrap();
    let Stmt::CreateTable(create) = &out[0].stmt else {
        panic!("expected create table")
    };
    let col = &create.columns[0];
    assert_eq!(col.type_name.names, vec!["string".to_string()]);
    assert_eq!(col.type_name.array_bounds, 1);
}
