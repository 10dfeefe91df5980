use serde_json::Value;

use crate::access::Accessable;
use crate::error::{Error, ErrorList};
use crate::factory::NodeKind;
use crate::manager::{FailurePolicy, ParseEnv};
use crate::node::{expect_object, expect_string, Node};
use crate::resolve::json_kind;
use crate::store::{AttributeStore, StoreValue};
use crate::Result;

/// A single error object: optional string members `id`, `status`, `code`,
/// `title`, `detail` plus nested `links`, `source` and `meta`.
#[derive(Debug, Default)]
pub struct ErrorObject {
    store: AttributeStore,
}

impl ErrorObject {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accessable for ErrorObject {
    fn store(&self) -> &AttributeStore {
        &self.store
    }

    fn context(&self) -> &'static str {
        "error object"
    }
}

impl Node for ErrorObject {
    fn kind(&self) -> NodeKind {
        NodeKind::Error
    }

    fn parse(&mut self, value: &Value, env: &ParseEnv<'_>) -> Result<()> {
        let object = expect_object(value, "Error")?;

        for (name, raw) in object {
            let parsed = match name.as_str() {
                "id" | "status" | "code" | "title" | "detail" => {
                    StoreValue::Json(Value::String(expect_string(name, raw)?))
                }
                "links" => StoreValue::Node(env.make_parsed(NodeKind::ErrorLink, raw)?),
                "source" => StoreValue::Node(env.make_parsed(NodeKind::ErrorSource, raw)?),
                "meta" => StoreValue::Node(env.make_parsed(NodeKind::Meta, raw)?),
                _ => continue,
            };
            self.store.set(name, parsed);
        }

        Ok(())
    }
}

/// The `source` member of an error object.
#[derive(Debug, Default)]
pub struct ErrorSource {
    store: AttributeStore,
}

impl ErrorSource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accessable for ErrorSource {
    fn store(&self) -> &AttributeStore {
        &self.store
    }

    fn context(&self) -> &'static str {
        "error source"
    }
}

impl Node for ErrorSource {
    fn kind(&self) -> NodeKind {
        NodeKind::ErrorSource
    }

    fn parse(&mut self, value: &Value, _env: &ParseEnv<'_>) -> Result<()> {
        let object = expect_object(value, "ErrorSource")?;
        for (name, raw) in object {
            if name == "pointer" || name == "parameter" {
                self.store
                    .set(name, StoreValue::Json(Value::String(expect_string(name, raw)?)));
            }
        }
        Ok(())
    }
}

/// Top-level `errors` list. Under the abort policy the first invalid
/// element fails the parse; under the collect policy every element is
/// attempted and all failures are reported together, positions preserved.
#[derive(Debug, Default)]
pub struct ErrorCollection {
    store: AttributeStore,
}

impl ErrorCollection {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accessable for ErrorCollection {
    fn store(&self) -> &AttributeStore {
        &self.store
    }

    fn context(&self) -> &'static str {
        "error collection"
    }

    fn to_json(&self) -> Value {
        self.store.to_json_array()
    }
}

impl Node for ErrorCollection {
    fn kind(&self) -> NodeKind {
        NodeKind::ErrorCollection
    }

    fn parse(&mut self, value: &Value, env: &ParseEnv<'_>) -> Result<()> {
        let elements = value.as_array().ok_or_else(|| {
            Error::validation(format!(
                "Errors for a collection have to be in an array, \"{}\" given.",
                json_kind(value)
            ))
        })?;
        if elements.is_empty() {
            return Err(Error::validation(
                "Errors array cannot be empty and MUST have at least one object",
            ));
        }

        match env.policy() {
            FailurePolicy::Abort => {
                for (index, element) in elements.iter().enumerate() {
                    let node = env.make_parsed(NodeKind::Error, element)?;
                    self.store.set(index.to_string(), StoreValue::Node(node));
                }
            }
            FailurePolicy::Collect => {
                let mut failures = ErrorList::new();
                for (index, element) in elements.iter().enumerate() {
                    match env.make_parsed(NodeKind::Error, element) {
                        Ok(node) => self.store.set(index.to_string(), StoreValue::Node(node)),
                        Err(failure) => failures.push(index, failure.to_string()),
                    }
                }
                if !failures.is_empty() {
                    return Err(Error::Collected(failures));
                }
            }
        }

        Ok(())
    }
}
