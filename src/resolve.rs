use serde_json::{Map, Number, Value};

/// JSON kind name used in validation messages.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Resolved shape of a `data` member, decided before any field validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceShape {
    Null,
    Identifier,
    Item,
    IdentifierCollection,
    ItemCollection,
}

/// Classifies a raw `data` value into one resource shape.
///
/// An object is an item as soon as it carries any of `attributes`,
/// `relationships` or `links`, otherwise a bare identifier. An array is an
/// item collection if any element is item-shaped. Scalars are unclassifiable
/// and left to the caller to report.
pub fn classify_resource(value: &Value) -> Option<ResourceShape> {
    match value {
        Value::Null => Some(ResourceShape::Null),
        Value::Object(object) => {
            if is_item_shaped(object) {
                Some(ResourceShape::Item)
            } else {
                Some(ResourceShape::Identifier)
            }
        }
        Value::Array(elements) => {
            let any_item = elements
                .iter()
                .any(|element| element.as_object().is_some_and(is_item_shaped));
            if any_item {
                Some(ResourceShape::ItemCollection)
            } else {
                Some(ResourceShape::IdentifierCollection)
            }
        }
        _ => None,
    }
}

pub fn is_item_shaped(object: &Map<String, Value>) -> bool {
    object.contains_key("attributes")
        || object.contains_key("relationships")
        || object.contains_key("links")
}

/// Formats a JSON number the way a string cast would, for the `type`/`id`
/// coercion. Integers never grow an exponent or fraction.
pub fn stringify_number(number: &Number) -> String {
    if let Some(value) = number.as_i64() {
        let mut buffer = itoa::Buffer::new();
        return buffer.format(value).to_string();
    }
    if let Some(value) = number.as_u64() {
        let mut buffer = itoa::Buffer::new();
        return buffer.format(value).to_string();
    }
    match number.as_f64() {
        Some(value) if value.is_finite() => {
            let mut buffer = ryu::Buffer::new();
            buffer.format(value).to_string()
        }
        _ => number.to_string(),
    }
}
