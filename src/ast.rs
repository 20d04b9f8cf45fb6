//! Engine-neutral AST (the translation target of C5).
//!
//! These types mirror the PostgreSQL/`pg_query`-shaped node vocabulary this
//! crate translates into (§3, §4.5): every dialect-specific construct the
//! translator encounters is folded down into one of these nodes, so a
//! downstream consumer never has to know it originated from Spanner's
//! GoogleSQL dialect rather than Postgres. Nodes this crate cannot yet
//! translate faithfully become [`TodoNode`] rather than causing the whole
//! statement to fail (§4.6, error kind 2).
//!
//! All types are `serde`-(de)serializable: this is a library boundary, and
//! the analyzed tree crosses it as data, not just as Rust values held in one
//! process.

use serde::{Deserialize, Serialize};

/// Absolute byte offset into the original source buffer.
pub type Pos = usize;

/// Top-level statement kinds this crate translates (§4.5.1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Stmt {
    Select(SelectStmt),
    Insert(InsertStmt),
    Update(UpdateStmt),
    Delete(DeleteStmt),
    CreateTable(CreateTableStmt),
    DropTable(DropTableStmt),
    CreateIndex(CreateIndexStmt),
    DropIndex(DropIndexStmt),
    AlterTable(AlterTableStmt),
    CreateView(CreateViewStmt),
    DropView(DropViewStmt),
    /// A dialect-AST shape this crate does not translate; carries a
    /// [`Diagnostic`](crate::error::Diagnostic) describing the gap.
    Todo(TodoNode),
}

/// A placeholder standing in for a dialect-AST node this crate could not
/// translate (§4.6). Preserves position so a caller can point at the source
/// span that was skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoNode {
    pub position: Pos,
    pub node_kind: String,
}

impl TodoNode {
    pub fn new(position: Pos, node_kind: impl Into<String>) -> Self {
        Self {
            position,
            node_kind: node_kind.into(),
        }
    }
}

// ---------------------------------------------------------------------
// SELECT
// ---------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectStmt {
    pub with: Option<WithClause>,
    pub distinct: bool,
    pub target_list: Vec<ResTarget>,
    pub from: Vec<TableRef>,
    #[serde(rename = "where")]
    pub where_clause: Option<Expr>,
    pub group_by: Vec<Expr>,
    pub having: Option<Expr>,
    pub qualify: Option<Expr>,
    pub sort_by: Vec<SortBy>,
    pub limit: Option<Expr>,
    pub offset: Option<Expr>,
    /// `VALUES (...), (...)` rows, as in a bare `VALUES` statement or the
    /// select-shaped body of `INSERT ... VALUES` (§4.5.2). Absent, not
    /// empty, when there is no `VALUES` clause.
    pub values_lists: Option<Vec<Vec<Expr>>>,
    /// Non-empty when this is a set-operation tree (`UNION`/`INTERSECT`/
    /// `EXCEPT`); in that case `target_list`/`from`/etc. on the outer node
    /// are empty and the operands carry their own clauses.
    pub set_op: Option<Box<SetOperation>>,
}

impl Default for SelectStmt {
    fn default() -> Self {
        Self {
            with: None,
            distinct: false,
            target_list: Vec::new(),
            from: Vec::new(),
            where_clause: None,
            group_by: Vec::new(),
            having: None,
            qualify: None,
            sort_by: Vec::new(),
            limit: None,
            offset: None,
            values_lists: None,
            set_op: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetOperation {
    pub op: SetOperator,
    pub all: bool,
    pub left: SelectStmt,
    pub right: SelectStmt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetOperator {
    Union,
    Intersect,
    Except,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithClause {
    pub recursive: bool,
    pub ctes: Vec<CommonTableExpr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommonTableExpr {
    pub name: String,
    pub column_aliases: Vec<String>,
    pub query: Box<Stmt>,
}

/// A single item of a `SELECT` target list (§4.5.2: "result-target").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResTarget {
    /// `None` for a bare `*` / `table.*` wildcard target.
    pub name: Option<String>,
    pub val: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortBy {
    pub node: Expr,
    pub descending: Option<bool>,
    pub nulls_first: Option<bool>,
}

// ---------------------------------------------------------------------
// Column references / wildcards
// ---------------------------------------------------------------------

/// A (possibly qualified) column reference, or a wildcard sentinel
/// (§4.5.2: "wildcard sentinel").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRef {
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Field {
    Name(String),
    /// `*`, or `table.*` when it is not the first field.
    Star,
}

// ---------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Expr {
    ColumnRef(ColumnRef),
    Const(Const),
    /// A `@name` parameter reference, already resolved to its tracker index.
    ParamRef { index: usize, name: String },
    TypeCast {
        arg: Box<Expr>,
        type_name: TypeName,
    },
    ArrayExpr {
        elements: Vec<Expr>,
        element_type: Option<TypeName>,
    },
    /// Binary or unary operator application, kept as a single catch-all node
    /// (§4.5.5) rather than one variant per operator.
    AExpr {
        op: String,
        left: Option<Box<Expr>>,
        right: Box<Expr>,
    },
    BoolExpr {
        op: BoolExprOp,
        args: Vec<Expr>,
    },
    NullTest {
        arg: Box<Expr>,
        negated: bool,
    },
    InExpr {
        arg: Box<Expr>,
        negated: bool,
        list: InList,
    },
    SubLink {
        op: SubLinkOp,
        test_expr: Option<Box<Expr>>,
        subselect: Box<Stmt>,
    },
    CaseExpr {
        arg: Option<Box<Expr>>,
        when_clauses: Vec<CaseWhen>,
        default_result: Option<Box<Expr>>,
    },
    CoalesceExpr {
        args: Vec<Expr>,
    },
    FuncCall {
        name: Vec<String>,
        args: Vec<FuncArg>,
        distinct: bool,
        over: Option<WindowDef>,
    },
    RowExpr {
        args: Vec<Expr>,
        /// Per-argument `"name:TYPE"` (or bare `"name"`) encoding used by
        /// struct literals (§4.5.5); empty when the row has no column
        /// names (plain tuple literal).
        colnames: Vec<String>,
    },
    Indirection {
        arg: Box<Expr>,
        path: Vec<IndirectionStep>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum Const {
    Null,
    Int(i64),
    Float(f64),
    /// Also carries bool literals (`"true"`/`"false"`) and bytes literals
    /// (raw byte sequence coerced to a string) per the literal table (§4.5.5)
    /// — neither gets a dedicated constant kind downstream.
    String(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoolExprOp {
    And,
    Or,
    Not,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum InList {
    Exprs(Vec<Expr>),
    Subquery(Box<Stmt>),
    /// `IN UNNEST(arr)`: same comparison kind as `Exprs`/`Subquery`, but the
    /// right operand is an array-valued expression rather than a value list.
    Unnest(Box<Expr>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubLinkOp {
    Exists,
    In,
    Any,
    All,
    /// Scalar subquery used directly as an expression.
    Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseWhen {
    pub condition: Expr,
    pub result: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum FuncArg {
    Positional(Expr),
    /// `*`, as in `COUNT(*)`.
    Star,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowDef {
    pub partition_by: Vec<Expr>,
    pub order_by: Vec<SortBy>,
    pub frame: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum IndirectionStep {
    Field(String),
    Index(Box<Expr>),
    Slice {
        lower: Option<Box<Expr>>,
        upper: Option<Box<Expr>>,
    },
}

// ---------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeName {
    pub names: Vec<String>,
    pub array_bounds: usize,
}

impl TypeName {
    pub fn simple(name: impl Into<String>) -> Self {
        Self {
            names: vec![name.into()],
            array_bounds: 0,
        }
    }
}

// ---------------------------------------------------------------------
// FROM / JOIN
// ---------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum TableRef {
    RangeVar(RangeVar),
    RangeSubselect(RangeSubselect),
    RangeFunction(RangeFunction),
    JoinExpr(Box<JoinExpr>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeVar {
    pub schema: Option<String>,
    pub name: String,
    pub alias: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeSubselect {
    pub subquery: Box<Stmt>,
    pub alias: Option<String>,
    pub column_aliases: Vec<String>,
}

/// `UNNEST(...)` and other table-valued function calls in `FROM` (§4.5.6).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeFunction {
    pub function: Expr,
    pub alias: Option<String>,
    pub column_aliases: Vec<String>,
    /// `WITH OFFSET [AS alias]`.
    pub with_offset: Option<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinExpr {
    pub join_type: JoinType,
    pub left: TableRef,
    pub right: TableRef,
    pub qual: Option<JoinQual>,
}

/// §4.5.6: comma-join and `CROSS JOIN` both map to `Inner` (with no `ON`/
/// `USING` qualifier) rather than getting a distinct variant, so this set
/// stays exactly the closed `{inner, left, right, full}` the shared
/// analyzer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Full,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum JoinQual {
    On(Expr),
    Using(Vec<String>),
}

// ---------------------------------------------------------------------
// DML
// ---------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertStmt {
    pub relation: RangeVar,
    pub columns: Vec<String>,
    pub select: Option<Box<SelectStmt>>,
    pub values: Vec<Vec<Expr>>,
    pub returning: Vec<ResTarget>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateStmt {
    pub relation: RangeVar,
    pub targets: Vec<UpdateTarget>,
    #[serde(rename = "where")]
    pub where_clause: Option<Expr>,
    pub returning: Vec<ResTarget>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateTarget {
    pub name: String,
    pub val: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteStmt {
    pub relation: RangeVar,
    #[serde(rename = "where")]
    pub where_clause: Option<Expr>,
    pub returning: Vec<ResTarget>,
}

// ---------------------------------------------------------------------
// DDL
// ---------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTableStmt {
    pub relation: RangeVar,
    pub if_not_exists: bool,
    pub columns: Vec<ColumnDef>,
    pub primary_key: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    pub type_name: TypeName,
    pub not_null: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropTableStmt {
    pub relation: RangeVar,
    pub if_exists: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateIndexStmt {
    pub name: String,
    pub relation: RangeVar,
    pub unique: bool,
    pub if_not_exists: bool,
    pub columns: Vec<IndexElem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexElem {
    pub name: String,
    pub descending: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropIndexStmt {
    pub name: String,
    pub if_exists: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlterTableStmt {
    pub relation: RangeVar,
    pub actions: Vec<AlterAction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum AlterAction {
    AddColumn(ColumnDef),
    DropColumn { name: String },
    AlterColumnType { name: String, type_name: TypeName },
    SetDefault { name: String, default: Expr },
    DropDefault { name: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateViewStmt {
    pub relation: RangeVar,
    pub or_replace: bool,
    pub column_aliases: Vec<String>,
    pub query: Box<SelectStmt>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropViewStmt {
    pub relation: RangeVar,
    pub if_exists: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_stmt_default_has_empty_clauses() {
        let s = SelectStmt::default();
        assert!(s.target_list.is_empty());
        assert!(s.from.is_empty());
        assert!(s.where_clause.is_none());
    }

    #[test]
    fn stmt_round_trips_through_json() {
        let stmt = Stmt::Select(SelectStmt {
            target_list: vec![ResTarget {
                name: None,
                val: Expr::ColumnRef(ColumnRef {
                    fields: vec![Field::Star],
                }),
            }],
            ..SelectStmt::default()
        });
        let json = serde_json::to_string(&stmt).unwrap();
        let back: Stmt = serde_json::from_str(&json).unwrap();
        assert_eq!(stmt, back);
    }

    #[test]
    fn todo_node_carries_position_and_kind() {
        let todo = TodoNode::new(42, "MergeStatement");
        assert_eq!(todo.position, 42);
        assert_eq!(todo.node_kind, "MergeStatement");
    }
}
