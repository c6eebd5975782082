use crate::{predicate::CompareOp, schema::PropertyType};
use thiserror::Error as ThisError;

///
/// Compile-time error taxonomy.
///
/// Every fallible step of predicate compilation reports through these
/// types. All of them are deterministic functions of the predicate,
/// schema, and arguments: compilation aborts on the first error, nothing
/// is retried, and nothing is logged internally.
///

///
/// SchemaResolutionError
///
/// Key-path resolution failures against the schema graph.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SchemaResolutionError {
    #[error("no property '{property}' on object of type '{object_type}'")]
    PropertyNotFound {
        property: String,
        object_type: String,
    },

    #[error("property '{property}' is not a link in object of type '{object_type}'")]
    NotALink {
        property: String,
        object_type: String,
    },

    #[error("unknown object type '{object_type}'")]
    UnknownObjectType { object_type: String },
}

///
/// UnsupportedComparisonError
///
/// Structurally disallowed comparison shapes. These reject the shape of
/// the comparison itself, independent of which operator was requested.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum UnsupportedComparisonError {
    #[error("comparisons must compare a key path against a constant value or argument")]
    NoKeyPath,

    #[error("comparing two key paths is not supported")]
    TwoKeyPaths,

    #[error("substring comparison is not supported for key-path substrings")]
    KeyPathSubstring,

    #[error("binary properties must be compared against a binary argument")]
    BinaryLiteral,

    #[error("case-insensitive comparison is not supported for binary properties")]
    CaseOptionOnBinary,

    #[error("key-path traversal is not supported for {property_type} comparisons")]
    KeyPathTraversal { property_type: PropertyType },

    #[error("comparing a list property to null is not supported")]
    ListNull,
}

///
/// UnsupportedOperatorError
///
/// The operator exists but is not valid for the terminal property's
/// type, or for a null comparison.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum UnsupportedOperatorError {
    #[error("operator {op} is not supported for {property_type} properties")]
    ForType {
        op: CompareOp,
        property_type: PropertyType,
    },

    #[error("operator {op}: only equal and not-equal are supported when comparing against null")]
    ForNull { op: CompareOp },
}

///
/// ArgumentError
///
/// Failures surfaced by the caller-provided argument resolver.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ArgumentError {
    #[error("argument index {index} is out of bounds ({count} arguments bound)")]
    OutOfBounds { index: usize, count: usize },

    #[error("argument {index} is not {requested}")]
    TypeMismatch {
        index: usize,
        requested: &'static str,
    },
}

///
/// Error
///
/// Top-level compilation error. Each variant maps to one category of the
/// compiler's failure taxonomy; all carry enough context to name the
/// offending property, type, operator, or literal.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum Error {
    #[error(transparent)]
    SchemaResolution(#[from] SchemaResolutionError),

    #[error("cannot compare {property_type} property '{property}' to a {actual}")]
    TypeMismatch {
        property: String,
        property_type: PropertyType,
        actual: &'static str,
    },

    #[error("cannot convert '{literal}' to {target}")]
    ParseLiteral {
        literal: String,
        target: &'static str,
    },

    #[error(transparent)]
    UnsupportedOperator(#[from] UnsupportedOperatorError),

    #[error(transparent)]
    UnsupportedComparison(#[from] UnsupportedComparisonError),

    #[error("invalid query: {diagnostic}")]
    InvalidQuery { diagnostic: String },

    #[error(transparent)]
    Argument(#[from] ArgumentError),
}

impl Error {
    pub(crate) fn type_mismatch(
        property: &str,
        property_type: PropertyType,
        actual: &'static str,
    ) -> Self {
        Self::TypeMismatch {
            property: property.to_string(),
            property_type,
            actual,
        }
    }

    pub(crate) fn parse_literal(literal: &str, target: &'static str) -> Self {
        Self::ParseLiteral {
            literal: literal.to_string(),
            target,
        }
    }

    pub(crate) const fn unsupported_operator(op: CompareOp, property_type: PropertyType) -> Self {
        Self::UnsupportedOperator(UnsupportedOperatorError::ForType { op, property_type })
    }
}
