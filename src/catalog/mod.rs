//! Function catalog (C2).
//!
//! An in-memory mapping from function name (possibly dotted, e.g.
//! `NET.IPV4_TO_INT64`, `SAFE.SUBSTR`) plus an argument-type tuple to a
//! return-type descriptor with a nullable flag (§3, §4.2). Seeded once with
//! a bundled standard library ([`seed`]) and then extended with synthesized
//! `SAFE.`-prefixed entries — no build script, unlike this crate's
//! multi-dialect ancestor: a single fixed dialect needs no codegen step to
//! produce its catalog, just a static table.

mod seed;

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// Closed set of aggregate function names (§4.2). Checked case-insensitively
/// against the last dot segment of a function name.
pub const AGGREGATE_NAMES: &[&str] = &[
    "AVG",
    "COUNT",
    "MAX",
    "MIN",
    "SUM",
    "STRING_AGG",
    "ARRAY_AGG",
    "BIT_AND",
    "BIT_OR",
    "BIT_XOR",
    "LOGICAL_AND",
    "LOGICAL_OR",
    "STDDEV",
    "STDDEV_POP",
    "STDDEV_SAMP",
    "VARIANCE",
    "VAR_POP",
    "VAR_SAMP",
];

/// An argument or return-type descriptor. Deliberately coarse: this crate's
/// catalog only needs enough type granularity to pick the right overload and
/// report a return type, not a full type system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ArgType {
    Int64,
    Float64,
    Numeric,
    Bool,
    String,
    Bytes,
    Date,
    Timestamp,
    Json,
    Struct,
    Array(Box<ArgType>),
    /// Accepts/returns any type; used for polymorphic functions such as
    /// `COALESCE`, `IFNULL`, `GREATEST`/`LEAST` at the catalog level (the
    /// translator resolves the concrete type from the call site).
    Any,
}

/// One resolved overload of a (possibly dotted) function name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionSignature {
    /// Case-preserving dotted name, exactly as it should be echoed back to
    /// callers (§3: `name`).
    pub name: String,
    pub args: Vec<ArgType>,
    pub return_type: ArgType,
    pub nullable: bool,
    pub is_aggregate: bool,
}

/// Lowercases each dot-separated segment independently, per the lookup
/// contract in §4.2 ("resolves case-insensitively by lowercasing both sides
/// of each dot-separated segment").
pub fn normalize(name: &str) -> String {
    name.split('.')
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(".")
}

fn is_aggregate_name(name: &str) -> bool {
    let last = name.rsplit('.').next().unwrap_or(name);
    AGGREGATE_NAMES.iter().any(|a| a.eq_ignore_ascii_case(last))
}

/// The catalog itself: every overload, grouped by normalized name.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    entries: HashMap<String, Vec<FunctionSignature>>,
}

impl Catalog {
    pub fn insert(&mut self, sig: FunctionSignature) {
        self.entries.entry(normalize(&sig.name)).or_default().push(sig);
    }

    /// Looks up every overload of `name` (case-insensitive, per dot
    /// segment). Returns an empty slice when the name is unknown.
    pub fn lookup(&self, name: &str) -> &[FunctionSignature] {
        self.entries
            .get(&normalize(name))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_known(&self, name: &str) -> bool {
        !self.lookup(name).is_empty()
    }

    pub fn is_aggregate(&self, name: &str) -> bool {
        self.lookup(name).iter().any(|s| s.is_aggregate)
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Synthesizes `SAFE.<name>` entries for every non-aggregate base entry,
/// including dotted ones, so `SAFE.NET.HOST` exists (§4.2). Skips names
/// already beginning with `SAFE` (case-insensitive) so `SAFE_ADD` and
/// friends are not double-prefixed, and skips aggregates entirely.
fn synthesize_safe(catalog: &mut Catalog) {
    let base: Vec<FunctionSignature> = catalog
        .entries
        .values()
        .flatten()
        .filter(|sig| {
            !sig.is_aggregate
                && !sig
                    .name
                    .split('.')
                    .next()
                    .is_some_and(|seg| seg.eq_ignore_ascii_case("safe"))
        })
        .cloned()
        .collect();

    for sig in base {
        catalog.insert(FunctionSignature {
            name: format!("SAFE.{}", sig.name),
            args: sig.args,
            return_type: sig.return_type,
            nullable: true,
            is_aggregate: false,
        });
    }
}

fn build() -> Catalog {
    let mut catalog = Catalog::default();
    seed::populate(&mut catalog);
    synthesize_safe(&mut catalog);
    catalog
}

static DEFAULT_CATALOG: OnceLock<Catalog> = OnceLock::new();

/// Spanner's function catalog under one schema (§6 op.4): Spanner has no
/// multi-schema concept by default, so `schema_name` is always the empty
/// string. Derefs to the underlying [`Catalog`] so callers can look up
/// functions directly without going through `.functions`.
#[derive(Debug, Clone, Copy)]
pub struct CatalogWithSchema {
    pub schema_name: &'static str,
    pub functions: &'static Catalog,
}

impl std::ops::Deref for CatalogWithSchema {
    type Target = Catalog;

    fn deref(&self) -> &Catalog {
        self.functions
    }
}

/// The standard catalog this crate ships (C7's `default_catalog`, §6 op.4).
pub fn default_catalog() -> CatalogWithSchema {
    CatalogWithSchema {
        schema_name: "",
        functions: DEFAULT_CATALOG.get_or_init(build),
    }
}
