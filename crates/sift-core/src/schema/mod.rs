
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error as ThisError;

///
/// Schema
///
/// Immutable description of the object graph the compiler resolves key
/// paths against: object types, their typed properties, storage column
/// indices, and link targets. Built once by the caller and shared
/// read-only across compilations.
///

///
/// PropertyType
///
/// Closed set of semantic property types. Every dispatch site in the
/// compiler matches this enum exhaustively; adding a variant without
/// updating those sites is a build failure, not a runtime fallback.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum PropertyType {
    Bool,
    Int,
    Float,
    Double,
    Text,
    Binary,
    Timestamp,
    /// To-one link to another object type.
    Object,
    /// To-many link to another object type.
    List,
}

impl PropertyType {
    #[must_use]
    pub const fn is_link(self) -> bool {
        matches!(self, Self::Object | Self::List)
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Double => "double",
            Self::Text => "string",
            Self::Binary => "binary",
            Self::Timestamp => "date",
            Self::Object => "object",
            Self::List => "list",
        };
        write!(f, "{label}")
    }
}

///
/// Property
///
/// A typed, column-indexed field of an object type. Link properties
/// always carry the referenced object-type name.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Property {
    pub name: String,
    pub ty: PropertyType,
    pub column: usize,
    pub object_type: Option<String>,
}

impl Property {
    #[must_use]
    pub fn scalar(name: impl Into<String>, ty: PropertyType, column: usize) -> Self {
        Self {
            name: name.into(),
            ty,
            column,
            object_type: None,
        }
    }

    #[must_use]
    pub fn object(name: impl Into<String>, target: impl Into<String>, column: usize) -> Self {
        Self {
            name: name.into(),
            ty: PropertyType::Object,
            column,
            object_type: Some(target.into()),
        }
    }

    #[must_use]
    pub fn list(name: impl Into<String>, target: impl Into<String>, column: usize) -> Self {
        Self {
            name: name.into(),
            ty: PropertyType::List,
            column,
            object_type: Some(target.into()),
        }
    }

    #[must_use]
    pub const fn is_link(&self) -> bool {
        self.ty.is_link()
    }
}

///
/// ObjectSchema
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ObjectSchema {
    name: String,
    properties: Vec<Property>,
}

impl ObjectSchema {
    /// Build an object schema, rejecting duplicate property names and
    /// malformed link declarations up front.
    pub fn new(name: impl Into<String>, properties: Vec<Property>) -> Result<Self, SchemaError> {
        let name = name.into();

        let mut seen = BTreeMap::new();
        for property in &properties {
            if seen.insert(property.name.clone(), ()).is_some() {
                return Err(SchemaError::DuplicateProperty {
                    object_type: name,
                    property: property.name.clone(),
                });
            }

            match (property.is_link(), &property.object_type) {
                (true, None) => {
                    return Err(SchemaError::MissingLinkTarget {
                        object_type: name,
                        property: property.name.clone(),
                    });
                }
                (false, Some(_)) => {
                    return Err(SchemaError::TargetOnScalar {
                        object_type: name,
                        property: property.name.clone(),
                    });
                }
                _ => {}
            }
        }

        Ok(Self { name, properties })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn property_for_name(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    #[must_use]
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }
}

///
/// Schema
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Schema {
    objects: BTreeMap<String, ObjectSchema>,
}

impl Schema {
    /// Build a schema from object schemas, rejecting duplicate type names
    /// and link targets that do not resolve within the schema.
    pub fn new(object_schemas: Vec<ObjectSchema>) -> Result<Self, SchemaError> {
        let mut objects = BTreeMap::new();
        for object in object_schemas {
            let name = object.name.clone();
            if objects.insert(name.clone(), object).is_some() {
                return Err(SchemaError::DuplicateObjectType { object_type: name });
            }
        }

        for object in objects.values() {
            for property in &object.properties {
                if let Some(target) = &property.object_type
                    && !objects.contains_key(target)
                {
                    return Err(SchemaError::UnknownLinkTarget {
                        object_type: object.name.clone(),
                        property: property.name.clone(),
                        target: target.clone(),
                    });
                }
            }
        }

        Ok(Self { objects })
    }

    #[must_use]
    pub fn find(&self, type_name: &str) -> Option<&ObjectSchema> {
        self.objects.get(type_name)
    }

    pub fn objects(&self) -> impl Iterator<Item = &ObjectSchema> {
        self.objects.values()
    }
}

///
/// SchemaError
///
/// Construction-time schema invariant violations. Distinct from the
/// compile-time `Error` taxonomy: these are caller contract failures
/// raised before any predicate is compiled.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SchemaError {
    #[error("duplicate object type '{object_type}'")]
    DuplicateObjectType { object_type: String },

    #[error("duplicate property '{property}' on object type '{object_type}'")]
    DuplicateProperty {
        object_type: String,
        property: String,
    },

    #[error("link property '{property}' on object type '{object_type}' has no target type")]
    MissingLinkTarget {
        object_type: String,
        property: String,
    },

    #[error("scalar property '{property}' on object type '{object_type}' declares a link target")]
    TargetOnScalar {
        object_type: String,
        property: String,
    },

    #[error(
        "link property '{property}' on object type '{object_type}' references unknown type '{target}'"
    )]
    UnknownLinkTarget {
        object_type: String,
        property: String,
        target: String,
    },
}
