use super::{key, num, run};
use crate::{
    args::{ArgumentList, ArgumentValue, NoArguments},
    error::{Error, UnsupportedComparisonError, UnsupportedOperatorError},
    predicate::{CompareOp, Expression, Predicate},
    schema::PropertyType,
};

#[test]
fn scalar_null_equality() {
    let p = Predicate::compare(key("balance"), CompareOp::Eq, Expression::Null);
    assert_eq!(run(&p, &NoArguments), Ok(vec![2]));

    let p = Predicate::compare(key("balance"), CompareOp::Ne, Expression::Null);
    assert_eq!(run(&p, &NoArguments), Ok(vec![0, 1]));
}

#[test]
fn binary_null_equality() {
    let p = Predicate::compare(key("avatar"), CompareOp::Eq, Expression::Null);
    assert_eq!(run(&p, &NoArguments), Ok(vec![2]));
}

#[test]
fn link_null_checks_the_link_cell() {
    let p = Predicate::compare(key("best_friend"), CompareOp::Eq, Expression::Null);
    assert_eq!(run(&p, &NoArguments), Ok(vec![1]));

    let p = Predicate::compare(key("best_friend"), CompareOp::Ne, Expression::Null);
    assert_eq!(run(&p, &NoArguments), Ok(vec![0, 2]));
}

#[test]
fn null_on_the_left_works_for_equality() {
    let p = Predicate::compare(Expression::Null, CompareOp::Eq, key("balance"));
    assert_eq!(run(&p, &NoArguments), Ok(vec![2]));
}

#[test]
fn list_against_null_is_rejected() {
    let p = Predicate::compare(key("friends"), CompareOp::Eq, Expression::Null);
    assert_eq!(
        run(&p, &NoArguments),
        Err(Error::UnsupportedComparison(
            UnsupportedComparisonError::ListNull
        ))
    );
}

#[test]
fn ordering_against_null_is_rejected() {
    let p = Predicate::compare(key("age"), CompareOp::Gte, Expression::Null);
    assert_eq!(
        run(&p, &NoArguments),
        Err(Error::UnsupportedOperator(UnsupportedOperatorError::ForNull {
            op: CompareOp::Gte,
        }))
    );
}

#[test]
fn null_bound_argument_routes_to_null_comparison() {
    let args = ArgumentList::new(vec![ArgumentValue::Null]);
    let p = Predicate::compare(key("balance"), CompareOp::Eq, Expression::Argument(0));
    assert_eq!(run(&p, &args), Ok(vec![2]));
}

#[test]
fn scalar_null_through_a_link() {
    // No best friend has a null balance; row 1 has no best friend at all.
    let p = Predicate::compare(key("best_friend.balance"), CompareOp::Eq, Expression::Null);
    assert_eq!(run(&p, &NoArguments), Ok(vec![]));

    let p = Predicate::compare(key("best_friend.balance"), CompareOp::Gt, num(5.0));
    assert_eq!(run(&p, &NoArguments), Ok(vec![2]));
}

#[test]
fn link_null_through_a_hop_is_rejected() {
    let p = Predicate::compare(key("best_friend.dog"), CompareOp::Eq, Expression::Null);
    assert_eq!(
        run(&p, &NoArguments),
        Err(Error::UnsupportedComparison(
            UnsupportedComparisonError::KeyPathTraversal {
                property_type: PropertyType::Object,
            }
        ))
    );
}

#[test]
fn binary_null_through_a_hop_is_rejected() {
    let p = Predicate::compare(key("best_friend.avatar"), CompareOp::Eq, Expression::Null);
    assert_eq!(
        run(&p, &NoArguments),
        Err(Error::UnsupportedComparison(
            UnsupportedComparisonError::KeyPathTraversal {
                property_type: PropertyType::Binary,
            }
        ))
    );
}
