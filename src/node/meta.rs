use serde_json::Value;

use crate::access::Accessable;
use crate::error::Error;
use crate::factory::NodeKind;
use crate::manager::ParseEnv;
use crate::node::{coerce_identifying_string, expect_object, Node};
use crate::store::{AttributeStore, StoreValue};
use crate::Result;

/// Free-form meta object; members are stored raw and are not navigable
/// beyond this node.
#[derive(Debug, Default)]
pub struct Meta {
    store: AttributeStore,
}

impl Meta {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accessable for Meta {
    fn store(&self) -> &AttributeStore {
        &self.store
    }

    fn context(&self) -> &'static str {
        "meta object"
    }
}

impl Node for Meta {
    fn kind(&self) -> NodeKind {
        NodeKind::Meta
    }

    fn parse(&mut self, value: &Value, _env: &ParseEnv<'_>) -> Result<()> {
        let object = expect_object(value, "Meta")?;
        for (name, raw) in object {
            self.store.set(name, StoreValue::Json(raw.clone()));
        }
        Ok(())
    }
}

/// Resource attributes. The member names `type`, `id`, `relationships` and
/// `links` are reserved by the resource object and forbidden here.
#[derive(Debug, Default)]
pub struct Attributes {
    store: AttributeStore,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }
}

const RESERVED_ATTRIBUTE_NAMES: [&str; 4] = ["type", "id", "relationships", "links"];

impl Accessable for Attributes {
    fn store(&self) -> &AttributeStore {
        &self.store
    }

    fn context(&self) -> &'static str {
        "attributes object"
    }
}

impl Node for Attributes {
    fn kind(&self) -> NodeKind {
        NodeKind::Attributes
    }

    fn parse(&mut self, value: &Value, _env: &ParseEnv<'_>) -> Result<()> {
        let object = expect_object(value, "Attributes")?;
        for reserved in RESERVED_ATTRIBUTE_NAMES {
            if object.contains_key(reserved) {
                return Err(Error::validation(
                    "These properties are not allowed in attributes: `type`, `id`, `relationships`, `links`",
                ));
            }
        }
        for (name, raw) in object {
            self.store.set(name, StoreValue::Json(raw.clone()));
        }
        Ok(())
    }
}

/// The `jsonapi` implementation-info object: optional `version` (string,
/// numbers coerced) and optional nested `meta`.
#[derive(Debug, Default)]
pub struct Jsonapi {
    store: AttributeStore,
}

impl Jsonapi {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accessable for Jsonapi {
    fn store(&self) -> &AttributeStore {
        &self.store
    }

    fn context(&self) -> &'static str {
        "jsonapi object"
    }
}

impl Node for Jsonapi {
    fn kind(&self) -> NodeKind {
        NodeKind::Jsonapi
    }

    fn parse(&mut self, value: &Value, env: &ParseEnv<'_>) -> Result<()> {
        let object = expect_object(value, "Jsonapi")?;
        for (name, raw) in object {
            let parsed = match name.as_str() {
                "version" => {
                    StoreValue::Json(Value::String(coerce_identifying_string("Jsonapi", name, raw)?))
                }
                "meta" => StoreValue::Node(env.make_parsed(NodeKind::Meta, raw)?),
                _ => continue,
            };
            self.store.set(name, parsed);
        }
        Ok(())
    }
}
