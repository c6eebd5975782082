use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr};

///
/// Predicate AST
///
/// Pure, schema-agnostic representation of a parsed boolean predicate.
/// This layer carries no type information and no execution semantics;
/// all interpretation happens in `compile`, against a `Schema` and an
/// `Arguments` resolver.
///

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    StartsWith,
    EndsWith,
    Contains,
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::StartsWith => "beginswith",
            Self::EndsWith => "endswith",
            Self::Contains => "contains",
        };
        write!(f, "{label}")
    }
}

///
/// TextMode
///
/// Case-sensitivity option on a comparison. Only meaningful for text
/// operators; the compiler rejects `Ci` on binary comparisons.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum TextMode {
    /// Case-sensitive (the default).
    #[default]
    Cs,
    /// Case-insensitive.
    Ci,
}

///
/// Expression
///
/// One side of a comparison, as produced by the external parser.
/// `Number` keeps the literal's source text; conversion to a concrete
/// numeric or timestamp representation is deferred until the terminal
/// property's type is known.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Expression {
    /// Dotted property path, resolved against the schema.
    KeyPath(String),
    /// Positional placeholder, resolved through `Arguments`.
    Argument(usize),
    Text(String),
    Number(String),
    True,
    False,
    Null,
}

impl Expression {
    #[must_use]
    pub const fn is_key_path(&self) -> bool {
        matches!(self, Self::KeyPath(_))
    }

    /// Short label used in diagnostics.
    #[must_use]
    pub const fn kind_label(&self) -> &'static str {
        match self {
            Self::KeyPath(_) => "key path",
            Self::Argument(_) => "argument",
            Self::Text(_) => "string literal",
            Self::Number(_) => "number literal",
            Self::True => "'true' literal",
            Self::False => "'false' literal",
            Self::Null => "'null' literal",
        }
    }
}

///
/// Comparison
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Comparison {
    pub lhs: Expression,
    pub op: CompareOp,
    pub rhs: Expression,
    pub mode: TextMode,
}

impl Comparison {
    #[must_use]
    pub fn new(lhs: Expression, op: CompareOp, rhs: Expression) -> Self {
        Self {
            lhs,
            op,
            rhs,
            mode: TextMode::default(),
        }
    }

    #[must_use]
    pub const fn with_mode(mut self, mode: TextMode) -> Self {
        self.mode = mode;
        self
    }
}

///
/// PredicateKind
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum PredicateKind {
    Comparison(Comparison),
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    True,
    False,
}

///
/// Predicate
///
/// A predicate node plus its negate flag. Negation is applied after the
/// node's own semantics, so `negate` on an `And` negates the whole
/// conjunction.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Predicate {
    pub kind: PredicateKind,
    pub negate: bool,
}

impl Predicate {
    #[must_use]
    pub const fn new(kind: PredicateKind) -> Self {
        Self {
            kind,
            negate: false,
        }
    }

    #[must_use]
    pub const fn always_true() -> Self {
        Self::new(PredicateKind::True)
    }

    #[must_use]
    pub const fn always_false() -> Self {
        Self::new(PredicateKind::False)
    }

    #[must_use]
    pub const fn and(subpredicates: Vec<Self>) -> Self {
        Self::new(PredicateKind::And(subpredicates))
    }

    #[must_use]
    pub const fn or(subpredicates: Vec<Self>) -> Self {
        Self::new(PredicateKind::Or(subpredicates))
    }

    #[must_use]
    pub fn compare(lhs: Expression, op: CompareOp, rhs: Expression) -> Self {
        Self::new(PredicateKind::Comparison(Comparison::new(lhs, op, rhs)))
    }

    #[must_use]
    pub fn comparison(cmp: Comparison) -> Self {
        Self::new(PredicateKind::Comparison(cmp))
    }

    /// Toggle the negate flag. Double negation cancels out, so
    /// `p.negated().negated() == p`.
    #[must_use]
    pub const fn negated(mut self) -> Self {
        self.negate = !self.negate;
        self
    }
}

impl BitAnd for Predicate {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self::and(vec![self, rhs])
    }
}

impl BitOr for Predicate {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::or(vec![self, rhs])
    }
}
