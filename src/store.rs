use std::fmt;

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::node::Node;

/// A single stored member value: raw JSON kept as-is (scalars and
/// uninterpreted structures inside `meta`/`attributes`) or a nested
/// validated node.
pub enum StoreValue {
    Json(Value),
    Node(Box<dyn Node>),
}

impl StoreValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            StoreValue::Json(Value::String(value)) => Some(value),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            StoreValue::Json(Value::Number(number)) => number.as_i64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            StoreValue::Json(Value::Number(number)) => number.as_f64(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            StoreValue::Json(Value::Bool(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, StoreValue::Json(Value::Null))
    }

    pub fn as_node(&self) -> Option<&dyn Node> {
        match self {
            StoreValue::Node(node) => Some(node.as_ref()),
            _ => None,
        }
    }

    /// Recursively unwraps nested nodes into their plain JSON form.
    pub fn to_json(&self) -> Value {
        match self {
            StoreValue::Json(value) => value.clone(),
            StoreValue::Node(node) => node.to_json(),
        }
    }
}

impl fmt::Debug for StoreValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreValue::Json(value) => f.debug_tuple("Json").field(value).finish(),
            StoreValue::Node(node) => write!(f, "Node({})", node.context()),
        }
    }
}

impl Serialize for StoreValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// Insertion-ordered member storage every node delegates to.
///
/// A key is present if and only if the corresponding member was present and
/// valid in the input; iteration reproduces first-insertion order.
#[derive(Debug, Default)]
pub struct AttributeStore {
    entries: IndexMap<String, StoreValue>,
}

impl AttributeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: StoreValue) {
        self.entries.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&StoreValue> {
        self.entries.get(key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StoreValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Plain JSON object form, nested nodes unwrapped recursively.
    pub fn to_json(&self) -> Value {
        let mut map = serde_json::Map::with_capacity(self.entries.len());
        for (key, value) in &self.entries {
            map.insert(key.clone(), value.to_json());
        }
        Value::Object(map)
    }

    /// Plain JSON array form, used by the collection node types whose keys
    /// are positional indices.
    pub fn to_json_array(&self) -> Value {
        Value::Array(self.entries.values().map(StoreValue::to_json).collect())
    }
}

impl Serialize for AttributeStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
