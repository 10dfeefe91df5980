use serde_json::{Map, Value};

use crate::access::Accessable;
use crate::error::Error;
use crate::factory::NodeKind;
use crate::manager::ParseEnv;
use crate::node::{coerce_identifying_string, expect_object, Node};
use crate::resolve::{is_item_shaped, json_kind};
use crate::store::{AttributeStore, StoreValue};
use crate::Result;

/// Bare resource identifier: `type` and `id` are mandatory strings
/// (numbers coerced), `meta` optional. Under the optional-id configuration
/// a missing `id` is simply absent.
#[derive(Debug, Default)]
pub struct ResourceIdentifier {
    store: AttributeStore,
}

impl ResourceIdentifier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accessable for ResourceIdentifier {
    fn store(&self) -> &AttributeStore {
        &self.store
    }

    fn context(&self) -> &'static str {
        "resource identifier"
    }
}

impl Node for ResourceIdentifier {
    fn kind(&self) -> NodeKind {
        NodeKind::ResourceIdentifier
    }

    fn parse(&mut self, value: &Value, env: &ParseEnv<'_>) -> Result<()> {
        let object = expect_object(value, "Resource")?;
        parse_identifying_members(&mut self.store, object, env)?;
        check_mandatory_members(&self.store, env)
    }
}

/// Full resource object: the identifier members plus `attributes`,
/// `relationships` and `links`. Relationship names must not collide with
/// attribute names.
#[derive(Debug, Default)]
pub struct ResourceItem {
    store: AttributeStore,
}

impl ResourceItem {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accessable for ResourceItem {
    fn store(&self) -> &AttributeStore {
        &self.store
    }

    fn context(&self) -> &'static str {
        "resource"
    }
}

impl Node for ResourceItem {
    fn kind(&self) -> NodeKind {
        NodeKind::ResourceItem
    }

    fn parse(&mut self, value: &Value, env: &ParseEnv<'_>) -> Result<()> {
        let object = expect_object(value, "Resource")?;

        for (name, raw) in object {
            let parsed = match name.as_str() {
                "type" | "id" => {
                    StoreValue::Json(Value::String(coerce_identifying_string("Resource", name, raw)?))
                }
                "meta" => StoreValue::Node(env.make_parsed(NodeKind::Meta, raw)?),
                "attributes" => StoreValue::Node(env.make_parsed(NodeKind::Attributes, raw)?),
                "relationships" => {
                    StoreValue::Node(env.make_parsed(NodeKind::RelationshipCollection, raw)?)
                }
                "links" => StoreValue::Node(env.make_parsed(NodeKind::ResourceItemLink, raw)?),
                _ => continue,
            };
            self.store.set(name, parsed);
        }

        check_mandatory_members(&self.store, env)?;
        check_relationship_collisions(&self.store)
    }
}

fn parse_identifying_members(
    store: &mut AttributeStore,
    object: &Map<String, Value>,
    env: &ParseEnv<'_>,
) -> Result<()> {
    for (name, raw) in object {
        let parsed = match name.as_str() {
            "type" | "id" => {
                StoreValue::Json(Value::String(coerce_identifying_string("Resource", name, raw)?))
            }
            "meta" => StoreValue::Node(env.make_parsed(NodeKind::Meta, raw)?),
            _ => continue,
        };
        store.set(name, parsed);
    }
    Ok(())
}

fn check_mandatory_members(store: &AttributeStore, env: &ParseEnv<'_>) -> Result<()> {
    if !store.has("type") {
        return Err(Error::validation("A resource object MUST contain a type"));
    }
    if !store.has("id") && !env.config().optional_id {
        return Err(Error::validation("A resource object MUST contain an id"));
    }
    Ok(())
}

fn check_relationship_collisions(store: &AttributeStore) -> Result<()> {
    let attributes = match store.get("attributes").and_then(StoreValue::as_node) {
        Some(node) => node,
        None => return Ok(()),
    };
    let relationships = match store.get("relationships").and_then(StoreValue::as_node) {
        Some(node) => node,
        None => return Ok(()),
    };
    for name in relationships.keys() {
        if attributes.store().has(name) {
            return Err(Error::validation(format!(
                "\"{name}\" cannot be used as relationship name because it exists already in the attributes"
            )));
        }
    }
    Ok(())
}

/// Explicit null primary resource (`"data": null`).
#[derive(Debug, Default)]
pub struct ResourceNull {
    store: AttributeStore,
}

impl ResourceNull {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accessable for ResourceNull {
    fn store(&self) -> &AttributeStore {
        &self.store
    }

    fn context(&self) -> &'static str {
        "resource"
    }

    fn to_json(&self) -> Value {
        Value::Null
    }
}

impl Node for ResourceNull {
    fn kind(&self) -> NodeKind {
        NodeKind::ResourceNull
    }

    fn parse(&mut self, value: &Value, _env: &ParseEnv<'_>) -> Result<()> {
        if !value.is_null() {
            return Err(Error::validation(format!(
                "ResourceNull has to be null, \"{}\" given.",
                json_kind(value)
            )));
        }
        Ok(())
    }
}

/// Homogeneous primary-data collection; each element independently resolves
/// to an identifier or a full item, so one collection may legally mix both.
#[derive(Debug, Default)]
pub struct ResourceCollection {
    store: AttributeStore,
}

impl ResourceCollection {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accessable for ResourceCollection {
    fn store(&self) -> &AttributeStore {
        &self.store
    }

    fn context(&self) -> &'static str {
        "resource collection"
    }

    fn to_json(&self) -> Value {
        self.store.to_json_array()
    }
}

impl Node for ResourceCollection {
    fn kind(&self) -> NodeKind {
        NodeKind::ResourceCollection
    }

    fn parse(&mut self, value: &Value, env: &ParseEnv<'_>) -> Result<()> {
        parse_resource_array(&mut self.store, value, env, |object| {
            if is_item_shaped(object) {
                NodeKind::ResourceItem
            } else {
                NodeKind::ResourceIdentifier
            }
        })
    }
}

/// Collection of bare resource identifiers (relationship `data` arrays).
#[derive(Debug, Default)]
pub struct ResourceIdentifierCollection {
    store: AttributeStore,
}

impl ResourceIdentifierCollection {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accessable for ResourceIdentifierCollection {
    fn store(&self) -> &AttributeStore {
        &self.store
    }

    fn context(&self) -> &'static str {
        "resource identifier collection"
    }

    fn to_json(&self) -> Value {
        self.store.to_json_array()
    }
}

impl Node for ResourceIdentifierCollection {
    fn kind(&self) -> NodeKind {
        NodeKind::ResourceIdentifierCollection
    }

    fn parse(&mut self, value: &Value, env: &ParseEnv<'_>) -> Result<()> {
        parse_resource_array(&mut self.store, value, env, |_| NodeKind::ResourceIdentifier)
    }
}

fn parse_resource_array(
    store: &mut AttributeStore,
    value: &Value,
    env: &ParseEnv<'_>,
    element_kind: fn(&Map<String, Value>) -> NodeKind,
) -> Result<()> {
    let elements = value.as_array().ok_or_else(|| {
        Error::validation(format!(
            "Resources have to be in an array, \"{}\" given.",
            json_kind(value)
        ))
    })?;

    for (index, element) in elements.iter().enumerate() {
        let object = element.as_object().ok_or_else(|| {
            Error::validation(format!(
                "Resources inside a collection MUST be objects, \"{}\" given.",
                json_kind(element)
            ))
        })?;
        let node = env.make_parsed(element_kind(object), element)?;
        store.set(index.to_string(), StoreValue::Node(node));
    }

    Ok(())
}
