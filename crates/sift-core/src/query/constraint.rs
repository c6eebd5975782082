use chrono::{DateTime, Utc};

///
/// Typed engine constraints.
///
/// A `Constraint` is one fully-typed comparison as appended into the
/// query expression tree: the operator, the typed operands, and (for the
/// column operand) the link-hop chain to traverse before the terminal
/// column is addressed. Operand sides are preserved exactly as compiled;
/// the operator is never re-oriented.
///

///
/// LinkedColumn
///
/// A column address plus the ordered link hops that lead to it. The hop
/// list is a plain value scoped to this constraint, so sibling
/// constraints in the same group never share traversal state.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LinkedColumn {
    pub links: Vec<usize>,
    pub column: usize,
}

impl LinkedColumn {
    #[must_use]
    pub const fn new(links: Vec<usize>, column: usize) -> Self {
        Self { links, column }
    }

    #[must_use]
    pub const fn direct(column: usize) -> Self {
        Self {
            links: Vec::new(),
            column,
        }
    }
}

///
/// Operand
///
/// One side of a typed comparison: either the addressed column or a
/// concrete value of the column's type.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Operand<T> {
    Column(LinkedColumn),
    Value(T),
}

///
/// EqualityOp
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EqualityOp {
    Eq,
    Ne,
}

///
/// OrderingOp
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OrderingOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
}

///
/// StringOp
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StringOp {
    Eq,
    Ne,
    StartsWith,
    EndsWith,
    Contains,
}

///
/// NullableType
///
/// Property types that have a null state. `List` is absent by
/// construction: to-many relationships have no null state and the
/// compiler rejects list-vs-null comparisons outright.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NullableType {
    Bool,
    Int,
    Float,
    Double,
    Text,
    Binary,
    Timestamp,
    Object,
}

///
/// Constraint
///

#[derive(Clone, Debug, PartialEq)]
pub enum Constraint {
    Bool {
        op: EqualityOp,
        lhs: Operand<bool>,
        rhs: Operand<bool>,
    },
    Int {
        op: OrderingOp,
        lhs: Operand<i64>,
        rhs: Operand<i64>,
    },
    Float {
        op: OrderingOp,
        lhs: Operand<f32>,
        rhs: Operand<f32>,
    },
    Double {
        op: OrderingOp,
        lhs: Operand<f64>,
        rhs: Operand<f64>,
    },
    Timestamp {
        op: OrderingOp,
        lhs: Operand<DateTime<Utc>>,
        rhs: Operand<DateTime<Utc>>,
    },
    Text {
        op: StringOp,
        case_sensitive: bool,
        lhs: Operand<String>,
        rhs: Operand<String>,
    },
    Binary {
        op: StringOp,
        lhs: Operand<Vec<u8>>,
        rhs: Operand<Vec<u8>>,
    },
    /// Link equality against a concrete row of the target table. Hop
    /// chains are disallowed for link comparisons, so the column is
    /// always addressed on the root table.
    LinksTo { column: usize, row: usize },
    /// Null test on a column of the given type.
    Null {
        column: LinkedColumn,
        op: EqualityOp,
        ty: NullableType,
    },
}
