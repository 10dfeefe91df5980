use serde_json::Value;

use crate::access::Accessable;
use crate::error::Error;
use crate::factory::NodeKind;
use crate::manager::ParseEnv;
use crate::node::{expect_object, parse_data, DataPosition, Node};
use crate::store::{AttributeStore, StoreValue};
use crate::Result;

/// A single relationship: MUST contain at least one of `links`, `data`,
/// `meta`. Its `data` resolves to a null resource, one identifier or an
/// identifier collection.
#[derive(Debug, Default)]
pub struct Relationship {
    store: AttributeStore,
}

impl Relationship {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accessable for Relationship {
    fn store(&self) -> &AttributeStore {
        &self.store
    }

    fn context(&self) -> &'static str {
        "relationship"
    }
}

impl Node for Relationship {
    fn kind(&self) -> NodeKind {
        NodeKind::Relationship
    }

    fn parse(&mut self, value: &Value, env: &ParseEnv<'_>) -> Result<()> {
        let object = expect_object(value, "Relationship")?;

        if !object.contains_key("links")
            && !object.contains_key("data")
            && !object.contains_key("meta")
        {
            return Err(Error::validation(
                "A Relationship object MUST contain at least one of the following properties: links, data, meta",
            ));
        }

        for (name, raw) in object {
            let parsed = match name.as_str() {
                "links" => StoreValue::Node(env.make_parsed(NodeKind::RelationshipLink, raw)?),
                "data" => StoreValue::Node(parse_data(raw, env, DataPosition::Relationship)?),
                "meta" => StoreValue::Node(env.make_parsed(NodeKind::Meta, raw)?),
                _ => continue,
            };
            self.store.set(name, parsed);
        }

        Ok(())
    }
}

/// The `relationships` member of a resource: a mapping from relationship
/// name to relationship object. `type` and `id` are reserved names.
#[derive(Debug, Default)]
pub struct RelationshipCollection {
    store: AttributeStore,
}

impl RelationshipCollection {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accessable for RelationshipCollection {
    fn store(&self) -> &AttributeStore {
        &self.store
    }

    fn context(&self) -> &'static str {
        "relationship collection"
    }
}

impl Node for RelationshipCollection {
    fn kind(&self) -> NodeKind {
        NodeKind::RelationshipCollection
    }

    fn parse(&mut self, value: &Value, env: &ParseEnv<'_>) -> Result<()> {
        let object = expect_object(value, "Relationships")?;

        if object.contains_key("type") || object.contains_key("id") {
            return Err(Error::validation(
                "These properties are not allowed in relationships: `type`, `id`",
            ));
        }

        for (name, raw) in object {
            let relationship = env.make_parsed(NodeKind::Relationship, raw)?;
            self.store.set(name, StoreValue::Node(relationship));
        }

        Ok(())
    }
}
