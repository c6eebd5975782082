use crate::error::ArgumentError;
use chrono::{DateTime, Utc};

///
/// Arguments
///
/// Positional argument resolution for `Expression::Argument`
/// placeholders. The compiler dereferences each placeholder through the
/// accessor matching the terminal property's type; implementations are
/// read-only and may be shared across compilations.
///

pub trait Arguments {
    fn bool_at(&self, index: usize) -> Result<bool, ArgumentError>;
    fn long_at(&self, index: usize) -> Result<i64, ArgumentError>;
    fn double_at(&self, index: usize) -> Result<f64, ArgumentError>;
    fn float_at(&self, index: usize) -> Result<f32, ArgumentError>;
    fn string_at(&self, index: usize) -> Result<String, ArgumentError>;
    fn binary_at(&self, index: usize) -> Result<Vec<u8>, ArgumentError>;
    fn timestamp_at(&self, index: usize) -> Result<DateTime<Utc>, ArgumentError>;

    /// Row index of the object bound at `index`, for link comparisons.
    fn object_index_at(&self, index: usize) -> Result<usize, ArgumentError>;

    /// Whether the argument at `index` is bound to null.
    fn is_null_at(&self, index: usize) -> Result<bool, ArgumentError>;
}

///
/// NoArguments
///
/// Resolver for predicates without placeholders; every access is out of
/// bounds.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct NoArguments;

impl NoArguments {
    #[expect(clippy::unnecessary_wraps, clippy::unused_self)]
    fn fail<T>(&self, index: usize) -> Result<T, ArgumentError> {
        Err(ArgumentError::OutOfBounds { index, count: 0 })
    }
}

impl Arguments for NoArguments {
    fn bool_at(&self, index: usize) -> Result<bool, ArgumentError> {
        self.fail(index)
    }

    fn long_at(&self, index: usize) -> Result<i64, ArgumentError> {
        self.fail(index)
    }

    fn double_at(&self, index: usize) -> Result<f64, ArgumentError> {
        self.fail(index)
    }

    fn float_at(&self, index: usize) -> Result<f32, ArgumentError> {
        self.fail(index)
    }

    fn string_at(&self, index: usize) -> Result<String, ArgumentError> {
        self.fail(index)
    }

    fn binary_at(&self, index: usize) -> Result<Vec<u8>, ArgumentError> {
        self.fail(index)
    }

    fn timestamp_at(&self, index: usize) -> Result<DateTime<Utc>, ArgumentError> {
        self.fail(index)
    }

    fn object_index_at(&self, index: usize) -> Result<usize, ArgumentError> {
        self.fail(index)
    }

    fn is_null_at(&self, index: usize) -> Result<bool, ArgumentError> {
        self.fail(index)
    }
}

///
/// ArgumentValue
///

#[derive(Clone, Debug, PartialEq)]
pub enum ArgumentValue {
    Bool(bool),
    Int(i64),
    Float(f32),
    Double(f64),
    Text(String),
    Binary(Vec<u8>),
    Timestamp(DateTime<Utc>),
    /// Row index of an object in its table.
    Row(usize),
    Null,
}

///
/// ArgumentList
///
/// Concrete resolver over a list of typed values. Accessors check the
/// bound value's kind; a null binding satisfies `is_null_at` and fails
/// every typed accessor.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArgumentList {
    values: Vec<ArgumentValue>,
}

impl ArgumentList {
    #[must_use]
    pub const fn new(values: Vec<ArgumentValue>) -> Self {
        Self { values }
    }

    fn value_at(&self, index: usize) -> Result<&ArgumentValue, ArgumentError> {
        self.values.get(index).ok_or(ArgumentError::OutOfBounds {
            index,
            count: self.values.len(),
        })
    }
}

impl From<Vec<ArgumentValue>> for ArgumentList {
    fn from(values: Vec<ArgumentValue>) -> Self {
        Self::new(values)
    }
}

impl Arguments for ArgumentList {
    fn bool_at(&self, index: usize) -> Result<bool, ArgumentError> {
        match self.value_at(index)? {
            ArgumentValue::Bool(value) => Ok(*value),
            _ => Err(ArgumentError::TypeMismatch {
                index,
                requested: "a bool",
            }),
        }
    }

    fn long_at(&self, index: usize) -> Result<i64, ArgumentError> {
        match self.value_at(index)? {
            ArgumentValue::Int(value) => Ok(*value),
            _ => Err(ArgumentError::TypeMismatch {
                index,
                requested: "an int",
            }),
        }
    }

    fn double_at(&self, index: usize) -> Result<f64, ArgumentError> {
        match self.value_at(index)? {
            ArgumentValue::Double(value) => Ok(*value),
            _ => Err(ArgumentError::TypeMismatch {
                index,
                requested: "a double",
            }),
        }
    }

    fn float_at(&self, index: usize) -> Result<f32, ArgumentError> {
        match self.value_at(index)? {
            ArgumentValue::Float(value) => Ok(*value),
            _ => Err(ArgumentError::TypeMismatch {
                index,
                requested: "a float",
            }),
        }
    }

    fn string_at(&self, index: usize) -> Result<String, ArgumentError> {
        match self.value_at(index)? {
            ArgumentValue::Text(value) => Ok(value.clone()),
            _ => Err(ArgumentError::TypeMismatch {
                index,
                requested: "a string",
            }),
        }
    }

    fn binary_at(&self, index: usize) -> Result<Vec<u8>, ArgumentError> {
        match self.value_at(index)? {
            ArgumentValue::Binary(value) => Ok(value.clone()),
            _ => Err(ArgumentError::TypeMismatch {
                index,
                requested: "binary data",
            }),
        }
    }

    fn timestamp_at(&self, index: usize) -> Result<DateTime<Utc>, ArgumentError> {
        match self.value_at(index)? {
            ArgumentValue::Timestamp(value) => Ok(*value),
            _ => Err(ArgumentError::TypeMismatch {
                index,
                requested: "a date",
            }),
        }
    }

    fn object_index_at(&self, index: usize) -> Result<usize, ArgumentError> {
        match self.value_at(index)? {
            ArgumentValue::Row(row) => Ok(*row),
            _ => Err(ArgumentError::TypeMismatch {
                index,
                requested: "an object",
            }),
        }
    }

    fn is_null_at(&self, index: usize) -> Result<bool, ArgumentError> {
        Ok(matches!(self.value_at(index)?, ArgumentValue::Null))
    }
}
