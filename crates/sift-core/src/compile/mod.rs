mod comparison;
mod keypath;
mod value;

#[cfg(test)]
mod tests;

use crate::{
    args::Arguments,
    compile::{
        comparison::{Side, add_null_comparison, add_typed_comparison},
        keypath::resolve_key_path,
        value::expression_is_null,
    },
    error::{Error, UnsupportedComparisonError},
    predicate::{Comparison, Expression, Predicate, PredicateKind},
    query::Query,
    schema::Schema,
};

///
/// Predicate compiler.
///
/// Walks a predicate tree and drives the query accumulator: comparisons
/// become typed constraints, connectives become groups and connectives
/// on the accumulator. Compilation is all-or-nothing; the first error
/// aborts and the query must be discarded.
///

/// Compile `predicate` into `query` against rows of `object_type`, then
/// check the assembled tree. A non-empty validation diagnostic is
/// surfaced as an error even when every step succeeded.
pub fn apply_predicate(
    query: &mut Query,
    predicate: &Predicate,
    args: &dyn Arguments,
    schema: &Schema,
    object_type: &str,
) -> Result<(), Error> {
    update_query(query, predicate, args, schema, object_type)?;

    let diagnostic = query.validate();
    if !diagnostic.is_empty() {
        return Err(Error::InvalidQuery { diagnostic });
    }

    Ok(())
}

fn update_query(
    query: &mut Query,
    predicate: &Predicate,
    args: &dyn Arguments,
    schema: &Schema,
    object_type: &str,
) -> Result<(), Error> {
    if predicate.negate {
        query.not();
    }

    match &predicate.kind {
        PredicateKind::Comparison(cmp) => add_comparison(query, cmp, args, schema, object_type),
        PredicateKind::And(subs) => {
            query.group();
            for sub in subs {
                update_query(query, sub, args, schema, object_type)?;
            }
            // A vacuous conjunction holds.
            if subs.is_empty() {
                query.push_true();
            }
            query.end_group();
            Ok(())
        }
        PredicateKind::Or(subs) => {
            query.group();
            for sub in subs {
                query.or();
                update_query(query, sub, args, schema, object_type)?;
            }
            // A vacuous disjunction fails.
            if subs.is_empty() {
                query.push_false();
            }
            query.end_group();
            Ok(())
        }
        PredicateKind::True => {
            query.push_true();
            Ok(())
        }
        PredicateKind::False => {
            query.push_false();
            Ok(())
        }
    }
}

/// Orient the comparison around its key path, then hand off to null or
/// typed dispatch. Exactly one side must be a key path.
fn add_comparison(
    query: &mut Query,
    cmp: &Comparison,
    args: &dyn Arguments,
    schema: &Schema,
    object_type: &str,
) -> Result<(), Error> {
    let (key_path, value_expr, side) = match (&cmp.lhs, &cmp.rhs) {
        (Expression::KeyPath(_), Expression::KeyPath(_)) => {
            return Err(UnsupportedComparisonError::TwoKeyPaths.into());
        }
        (Expression::KeyPath(path), value) => (path, value, Side::PropertyFirst),
        (value, Expression::KeyPath(path)) => (path, value, Side::ValueFirst),
        _ => return Err(UnsupportedComparisonError::NoKeyPath.into()),
    };

    let resolved = resolve_key_path(schema, object_type, key_path)?;

    if expression_is_null(value_expr, args)? {
        add_null_comparison(query, cmp.op, &resolved)
    } else {
        add_typed_comparison(query, cmp, &resolved, value_expr, side, args)
    }
}
