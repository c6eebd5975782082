use crate::{
    error::{Error, SchemaResolutionError},
    schema::{Property, Schema},
};

///
/// ResolvedKeyPath
///
/// Result of resolving a dotted key path against the schema: the
/// ordered link-hop columns to traverse, then the terminal property.
/// The hop list is a plain value; it is applied to the accumulator only
/// when the comparison is materialized, so sibling comparisons each get
/// an independent traversal context.
///

#[derive(Clone, Debug)]
pub(crate) struct ResolvedKeyPath<'a> {
    pub links: Vec<usize>,
    pub property: &'a Property,
}

impl ResolvedKeyPath<'_> {
    #[must_use]
    pub(crate) fn has_links(&self) -> bool {
        !self.links.is_empty()
    }
}

/// Resolve `key_path` starting at `object_type`, walking one segment at
/// a time. Every non-terminal segment must resolve to a link property;
/// the cursor then advances to the link's target type.
pub(crate) fn resolve_key_path<'a>(
    schema: &'a Schema,
    object_type: &str,
    key_path: &str,
) -> Result<ResolvedKeyPath<'a>, Error> {
    let mut current =
        schema
            .find(object_type)
            .ok_or_else(|| SchemaResolutionError::UnknownObjectType {
                object_type: object_type.to_string(),
            })?;

    let mut resolved: Option<&Property> = None;
    let mut links = Vec::new();

    for segment in key_path.split('.') {
        if let Some(previous) = resolved {
            if !previous.is_link() {
                return Err(SchemaResolutionError::NotALink {
                    property: previous.name.clone(),
                    object_type: current.name().to_string(),
                }
                .into());
            }
            links.push(previous.column);
        }

        let property = current.property_for_name(segment).ok_or_else(|| {
            SchemaResolutionError::PropertyNotFound {
                property: segment.to_string(),
                object_type: current.name().to_string(),
            }
        })?;

        if let Some(target) = &property.object_type {
            // Schema construction guarantees link targets resolve.
            current =
                schema
                    .find(target)
                    .ok_or_else(|| SchemaResolutionError::UnknownObjectType {
                        object_type: target.clone(),
                    })?;
        }

        resolved = Some(property);
    }

    let property = resolved.ok_or_else(|| SchemaResolutionError::PropertyNotFound {
        property: String::new(),
        object_type: object_type.to_string(),
    })?;

    Ok(ResolvedKeyPath { links, property })
}
