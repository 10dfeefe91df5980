pub mod document;
pub mod error_obj;
pub mod link;
pub mod meta;
pub mod relationship;
pub mod resource;

use serde_json::{Map, Value};

use crate::access::Accessable;
use crate::error::Error;
use crate::factory::NodeKind;
use crate::manager::ParseEnv;
use crate::resolve::{classify_resource, json_kind, stringify_number, ResourceShape};
use crate::Result;

pub use document::Document;
pub use error_obj::{ErrorCollection, ErrorObject, ErrorSource};
pub use link::{DocumentLink, ErrorLink, Link, Pagination, RelationshipLink, ResourceItemLink};
pub use meta::{Attributes, Jsonapi, Meta};
pub use relationship::{Relationship, RelationshipCollection};
pub use resource::{
    ResourceCollection, ResourceIdentifier, ResourceIdentifierCollection, ResourceItem,
    ResourceNull,
};

/// A validator/builder for one specification element.
///
/// Every node has exactly two states: empty (freshly constructed) and
/// parsed (store populated, immutable). `parse` runs at most once; on
/// failure the node is discarded and never reachable from a parent store.
pub trait Node: Accessable + std::fmt::Debug {
    fn kind(&self) -> NodeKind;

    fn parse(&mut self, value: &Value, env: &ParseEnv<'_>) -> Result<()>;
}

/// Where a `data` member sits; relationships restrict the legal shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DataPosition {
    Document,
    Relationship,
}

/// Resolves a raw `data` value to the node type it represents and parses
/// it. This is the single dispatch point used everywhere `data` appears.
pub(crate) fn parse_data(
    value: &Value,
    env: &ParseEnv<'_>,
    position: DataPosition,
) -> Result<Box<dyn Node>> {
    let shape = classify_resource(value).ok_or_else(|| {
        Error::validation(format!(
            "Data value has to be null, an object or an array, \"{}\" given.",
            json_kind(value)
        ))
    })?;

    let kind = match (position, shape) {
        (_, ResourceShape::Null) => NodeKind::ResourceNull,
        (DataPosition::Document, ResourceShape::Identifier) => NodeKind::ResourceIdentifier,
        (DataPosition::Document, ResourceShape::Item) => NodeKind::ResourceItem,
        (DataPosition::Document, _) => NodeKind::ResourceCollection,
        // Relationship data only ever carries identifiers; extra members on
        // an element are ignored by the identifier validator.
        (DataPosition::Relationship, ResourceShape::Identifier | ResourceShape::Item) => {
            NodeKind::ResourceIdentifier
        }
        (DataPosition::Relationship, _) => NodeKind::ResourceIdentifierCollection,
    };

    env.make_parsed(kind, value)
}

/// Asserts that `value` is an object, with the standard diagnostic.
pub(crate) fn expect_object<'a>(value: &'a Value, what: &str) -> Result<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| {
        Error::validation(format!(
            "{what} has to be an object, \"{}\" given.",
            json_kind(value)
        ))
    })
}

/// Validates a member that MUST be a string.
pub(crate) fn expect_string(name: &str, value: &Value) -> Result<String> {
    match value {
        Value::String(text) => Ok(text.clone()),
        _ => Err(Error::validation(format!(
            "property \"{name}\" has to be a string, \"{}\" given.",
            json_kind(value)
        ))),
    }
}

/// Validates a resource-identifying member (`type`, `id`, `version`):
/// strings pass through, numbers are coerced to their string form, objects
/// and arrays get a dedicated rejection.
pub(crate) fn coerce_identifying_string(what: &str, name: &str, value: &Value) -> Result<String> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Number(number) => Ok(stringify_number(number)),
        Value::Object(_) | Value::Array(_) => Err(Error::validation(format!(
            "{what} {name} cannot be an array or object, \"{}\" given.",
            json_kind(value)
        ))),
        _ => Err(Error::validation(format!(
            "property \"{name}\" has to be a string, \"{}\" given.",
            json_kind(value)
        ))),
    }
}
