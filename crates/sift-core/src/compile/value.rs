use crate::{
    args::Arguments,
    error::{Error, UnsupportedComparisonError},
    predicate::Expression,
    schema::Property,
};
use chrono::{DateTime, TimeZone, Utc};

///
/// Typed value resolution.
///
/// Each routine converts the value side of a comparison into the
/// terminal property's representation: arguments are dereferenced
/// through the resolver, literal text is parsed, and anything else is a
/// type mismatch against the property.
///

pub(crate) fn bool_value(
    property: &Property,
    expr: &Expression,
    args: &dyn Arguments,
) -> Result<bool, Error> {
    match expr {
        Expression::Argument(index) => Ok(args.bool_at(*index)?),
        Expression::True => Ok(true),
        Expression::False => Ok(false),
        _ => Err(Error::type_mismatch(
            &property.name,
            property.ty,
            expr.kind_label(),
        )),
    }
}

pub(crate) fn int_value(
    property: &Property,
    expr: &Expression,
    args: &dyn Arguments,
) -> Result<i64, Error> {
    match expr {
        Expression::Argument(index) => Ok(args.long_at(*index)?),
        Expression::Number(text) | Expression::Text(text) => text
            .parse()
            .map_err(|_| Error::parse_literal(text, "an int")),
        _ => Err(Error::type_mismatch(
            &property.name,
            property.ty,
            expr.kind_label(),
        )),
    }
}

pub(crate) fn float_value(
    property: &Property,
    expr: &Expression,
    args: &dyn Arguments,
) -> Result<f32, Error> {
    match expr {
        Expression::Argument(index) => Ok(args.float_at(*index)?),
        Expression::Number(text) | Expression::Text(text) => text
            .parse()
            .map_err(|_| Error::parse_literal(text, "a float")),
        _ => Err(Error::type_mismatch(
            &property.name,
            property.ty,
            expr.kind_label(),
        )),
    }
}

pub(crate) fn double_value(
    property: &Property,
    expr: &Expression,
    args: &dyn Arguments,
) -> Result<f64, Error> {
    match expr {
        Expression::Argument(index) => Ok(args.double_at(*index)?),
        Expression::Number(text) | Expression::Text(text) => text
            .parse()
            .map_err(|_| Error::parse_literal(text, "a double")),
        _ => Err(Error::type_mismatch(
            &property.name,
            property.ty,
            expr.kind_label(),
        )),
    }
}

/// Timestamps accept an argument, an RFC 3339 string literal, or an
/// integer epoch-seconds number literal.
pub(crate) fn timestamp_value(
    property: &Property,
    expr: &Expression,
    args: &dyn Arguments,
) -> Result<DateTime<Utc>, Error> {
    match expr {
        Expression::Argument(index) => Ok(args.timestamp_at(*index)?),
        Expression::Text(text) => DateTime::parse_from_rfc3339(text)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| Error::parse_literal(text, "a date")),
        Expression::Number(text) => {
            let seconds: i64 = text
                .parse()
                .map_err(|_| Error::parse_literal(text, "a date"))?;
            Utc.timestamp_opt(seconds, 0)
                .single()
                .ok_or_else(|| Error::parse_literal(text, "a date"))
        }
        _ => Err(Error::type_mismatch(
            &property.name,
            property.ty,
            expr.kind_label(),
        )),
    }
}

pub(crate) fn text_value(
    property: &Property,
    expr: &Expression,
    args: &dyn Arguments,
) -> Result<String, Error> {
    match expr {
        Expression::Argument(index) => Ok(args.string_at(*index)?),
        Expression::Text(text) => Ok(text.clone()),
        _ => Err(Error::type_mismatch(
            &property.name,
            property.ty,
            expr.kind_label(),
        )),
    }
}

/// Binary values have no literal form in predicate syntax; only an
/// argument is accepted.
pub(crate) fn binary_value(expr: &Expression, args: &dyn Arguments) -> Result<Vec<u8>, Error> {
    match expr {
        Expression::Argument(index) => Ok(args.binary_at(*index)?),
        _ => Err(UnsupportedComparisonError::BinaryLiteral.into()),
    }
}

/// Link comparisons accept only an argument bound to an object row.
pub(crate) fn row_index_value(
    property: &Property,
    expr: &Expression,
    args: &dyn Arguments,
) -> Result<usize, Error> {
    match expr {
        Expression::Argument(index) => Ok(args.object_index_at(*index)?),
        _ => Err(Error::type_mismatch(
            &property.name,
            property.ty,
            expr.kind_label(),
        )),
    }
}

/// Whether the value side resolves to null, either literally or through
/// a null-bound argument.
pub(crate) fn expression_is_null(expr: &Expression, args: &dyn Arguments) -> Result<bool, Error> {
    match expr {
        Expression::Null => Ok(true),
        Expression::Argument(index) => Ok(args.is_null_at(*index)?),
        _ => Ok(false),
    }
}
