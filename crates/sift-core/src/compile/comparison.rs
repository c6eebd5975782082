use crate::{
    args::Arguments,
    compile::{
        keypath::ResolvedKeyPath,
        value::{
            binary_value, bool_value, double_value, float_value, int_value, row_index_value,
            text_value, timestamp_value,
        },
    },
    error::{Error, UnsupportedComparisonError, UnsupportedOperatorError},
    predicate::{CompareOp, Comparison, Expression, TextMode},
    query::{
        Constraint, EqualityOp, LinkedColumn, NullableType, Operand, OrderingOp, Query, StringOp,
    },
    schema::PropertyType,
};

///
/// Typed comparison dispatch.
///
/// The terminal property's declared type selects the comparison routine;
/// the match over `PropertyType` is exhaustive, so a new property type
/// cannot be added without updating every dispatch site.
///

///
/// Side
///
/// Which operand of the source comparison is the key path. The operator
/// is never re-oriented: `3 < age` compiles with the value on the left,
/// not as `age > 3`.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    /// The key path is the left operand.
    PropertyFirst,
    /// The key path is the right operand.
    ValueFirst,
}

fn operands<T>(side: Side, column: LinkedColumn, value: T) -> (Operand<T>, Operand<T>) {
    match side {
        Side::PropertyFirst => (Operand::Column(column), Operand::Value(value)),
        Side::ValueFirst => (Operand::Value(value), Operand::Column(column)),
    }
}

const fn equality_op(op: CompareOp) -> Option<EqualityOp> {
    match op {
        CompareOp::Eq => Some(EqualityOp::Eq),
        CompareOp::Ne => Some(EqualityOp::Ne),
        _ => None,
    }
}

const fn ordering_op(op: CompareOp) -> Option<OrderingOp> {
    match op {
        CompareOp::Eq => Some(OrderingOp::Eq),
        CompareOp::Ne => Some(OrderingOp::Ne),
        CompareOp::Lt => Some(OrderingOp::Lt),
        CompareOp::Lte => Some(OrderingOp::Lte),
        CompareOp::Gt => Some(OrderingOp::Gt),
        CompareOp::Gte => Some(OrderingOp::Gte),
        _ => None,
    }
}

const fn string_op(op: CompareOp) -> Option<StringOp> {
    match op {
        CompareOp::Eq => Some(StringOp::Eq),
        CompareOp::Ne => Some(StringOp::Ne),
        CompareOp::StartsWith => Some(StringOp::StartsWith),
        CompareOp::EndsWith => Some(StringOp::EndsWith),
        CompareOp::Contains => Some(StringOp::Contains),
        _ => None,
    }
}

/// Append one typed comparison for a non-null value side.
pub(crate) fn add_typed_comparison(
    query: &mut Query,
    cmp: &Comparison,
    path: &ResolvedKeyPath<'_>,
    value_expr: &Expression,
    side: Side,
    args: &dyn Arguments,
) -> Result<(), Error> {
    let property = path.property;
    let column = LinkedColumn::new(path.links.clone(), property.column);

    match property.ty {
        PropertyType::Bool => {
            let op = equality_op(cmp.op)
                .ok_or(Error::unsupported_operator(cmp.op, property.ty))?;
            let value = bool_value(property, value_expr, args)?;
            let (lhs, rhs) = operands(side, column, value);
            query.push(Constraint::Bool { op, lhs, rhs });
        }
        PropertyType::Int => {
            let op = ordering_op(cmp.op)
                .ok_or(Error::unsupported_operator(cmp.op, property.ty))?;
            let value = int_value(property, value_expr, args)?;
            let (lhs, rhs) = operands(side, column, value);
            query.push(Constraint::Int { op, lhs, rhs });
        }
        PropertyType::Float => {
            let op = ordering_op(cmp.op)
                .ok_or(Error::unsupported_operator(cmp.op, property.ty))?;
            let value = float_value(property, value_expr, args)?;
            let (lhs, rhs) = operands(side, column, value);
            query.push(Constraint::Float { op, lhs, rhs });
        }
        PropertyType::Double => {
            let op = ordering_op(cmp.op)
                .ok_or(Error::unsupported_operator(cmp.op, property.ty))?;
            let value = double_value(property, value_expr, args)?;
            let (lhs, rhs) = operands(side, column, value);
            query.push(Constraint::Double { op, lhs, rhs });
        }
        PropertyType::Timestamp => {
            let op = ordering_op(cmp.op)
                .ok_or(Error::unsupported_operator(cmp.op, property.ty))?;
            let value = timestamp_value(property, value_expr, args)?;
            let (lhs, rhs) = operands(side, column, value);
            query.push(Constraint::Timestamp { op, lhs, rhs });
        }
        PropertyType::Text => {
            let op = string_op(cmp.op)
                .ok_or(Error::unsupported_operator(cmp.op, property.ty))?;
            restrict_value_first_substring(op, side)?;
            let value = text_value(property, value_expr, args)?;
            let case_sensitive = cmp.mode != TextMode::Ci;
            let (lhs, rhs) = operands(side, column, value);
            query.push(Constraint::Text {
                op,
                case_sensitive,
                lhs,
                rhs,
            });
        }
        PropertyType::Binary => {
            if cmp.mode == TextMode::Ci {
                return Err(UnsupportedComparisonError::CaseOptionOnBinary.into());
            }
            let op = string_op(cmp.op)
                .ok_or(Error::unsupported_operator(cmp.op, property.ty))?;
            restrict_value_first_substring(op, side)?;
            let value = binary_value(value_expr, args)?;
            let (lhs, rhs) = operands(side, column, value);
            query.push(Constraint::Binary { op, lhs, rhs });
        }
        PropertyType::Object | PropertyType::List => {
            add_link_comparison(query, cmp.op, path, value_expr, args)?;
        }
    }

    Ok(())
}

/// When the key path is the right operand, only equality forms are
/// valid: substring operators would read the stored value as the needle.
const fn restrict_value_first_substring(op: StringOp, side: Side) -> Result<(), Error> {
    match (side, op) {
        (Side::ValueFirst, StringOp::StartsWith | StringOp::EndsWith | StringOp::Contains) => {
            Err(Error::UnsupportedComparison(
                UnsupportedComparisonError::KeyPathSubstring,
            ))
        }
        _ => Ok(()),
    }
}

/// Link equality against a bound object row. Not-equal is realized by
/// negating the equality fragment; there is no distinct primitive.
fn add_link_comparison(
    query: &mut Query,
    op: CompareOp,
    path: &ResolvedKeyPath<'_>,
    value_expr: &Expression,
    args: &dyn Arguments,
) -> Result<(), Error> {
    let property = path.property;
    if path.has_links() {
        return Err(UnsupportedComparisonError::KeyPathTraversal {
            property_type: property.ty,
        }
        .into());
    }

    let row = row_index_value(property, value_expr, args)?;
    match op {
        CompareOp::Ne => query.not(),
        CompareOp::Eq => {}
        _ => return Err(Error::unsupported_operator(op, property.ty)),
    }

    query.push(Constraint::LinksTo {
        column: property.column,
        row,
    });

    Ok(())
}

/// Append a null comparison for the terminal property. Only equality
/// forms are valid against null; list properties have no null state.
pub(crate) fn add_null_comparison(
    query: &mut Query,
    op: CompareOp,
    path: &ResolvedKeyPath<'_>,
) -> Result<(), Error> {
    let property = path.property;
    let Some(op) = equality_op(op) else {
        return Err(UnsupportedOperatorError::ForNull { op }.into());
    };

    let column = LinkedColumn::new(path.links.clone(), property.column);
    let ty = match property.ty {
        PropertyType::Bool => NullableType::Bool,
        PropertyType::Int => NullableType::Int,
        PropertyType::Float => NullableType::Float,
        PropertyType::Double => NullableType::Double,
        PropertyType::Text => NullableType::Text,
        PropertyType::Timestamp => NullableType::Timestamp,
        PropertyType::Binary => {
            if path.has_links() {
                return Err(UnsupportedComparisonError::KeyPathTraversal {
                    property_type: property.ty,
                }
                .into());
            }
            NullableType::Binary
        }
        PropertyType::Object => {
            if path.has_links() {
                return Err(UnsupportedComparisonError::KeyPathTraversal {
                    property_type: property.ty,
                }
                .into());
            }
            // Not-equal on a link's null state is negation of equal.
            if op == EqualityOp::Ne {
                query.not();
            }
            query.push(Constraint::Null {
                column,
                op: EqualityOp::Eq,
                ty: NullableType::Object,
            });
            return Ok(());
        }
        PropertyType::List => {
            return Err(UnsupportedComparisonError::ListNull.into());
        }
    };

    query.push(Constraint::Null { column, op, ty });

    Ok(())
}
