//! Core runtime for Sift: the predicate AST, schema model, argument
//! resolution, the typed query accumulator, and the compiler that
//! connects them.
#![warn(unreachable_pub)]

pub mod args;
pub mod compile;
pub mod error;
pub mod predicate;
pub mod query;
pub mod schema;

pub use compile::apply_predicate;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, stores, or resolver implementations are re-exported here.
///

pub mod prelude {
    pub use crate::{
        args::Arguments,
        compile::apply_predicate,
        predicate::{CompareOp, Comparison, Expression, Predicate, PredicateKind, TextMode},
        query::Query,
        schema::{ObjectSchema, Property, PropertyType, Schema},
    };
}
