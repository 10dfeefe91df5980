use serde_json::Value;

use crate::access::Accessable;
use crate::error::Error;
use crate::factory::NodeKind;
use crate::manager::ParseEnv;
use crate::node::{expect_object, Node};
use crate::resolve::json_kind;
use crate::store::{AttributeStore, StoreValue};
use crate::Result;

pub(crate) const PAGINATION_NAMES: [&str; 4] = ["first", "last", "prev", "next"];

/// A link member is either a bare URL string or an object-valued link,
/// which itself may carry `href` and `meta`.
fn set_link_member(
    store: &mut AttributeStore,
    name: &str,
    raw: &Value,
    env: &ParseEnv<'_>,
) -> Result<()> {
    match raw {
        Value::String(_) => {
            store.set(name, StoreValue::Json(raw.clone()));
            Ok(())
        }
        Value::Object(_) => {
            let link = env.make_parsed(NodeKind::Link, raw)?;
            store.set(name, StoreValue::Node(link));
            Ok(())
        }
        _ => Err(Error::validation(format!(
            "property \"{name}\" has to be a string or object, \"{}\" given.",
            json_kind(raw)
        ))),
    }
}

/// Pagination members additionally accept an explicit `null`, which means
/// "link unavailable" and is omitted from the store.
fn set_pagination_member(
    store: &mut AttributeStore,
    name: &str,
    raw: &Value,
    env: &ParseEnv<'_>,
) -> Result<()> {
    match raw {
        Value::Null => Ok(()),
        Value::String(_) => {
            store.set(name, StoreValue::Json(raw.clone()));
            Ok(())
        }
        Value::Object(_) => {
            let link = env.make_parsed(NodeKind::Link, raw)?;
            store.set(name, StoreValue::Node(link));
            Ok(())
        }
        _ => Err(Error::validation(format!(
            "property \"{name}\" has to be a string or null, \"{}\" given.",
            json_kind(raw)
        ))),
    }
}

/// Object-valued link (`href` plus optional `meta`).
#[derive(Debug, Default)]
pub struct Link {
    store: AttributeStore,
}

impl Link {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accessable for Link {
    fn store(&self) -> &AttributeStore {
        &self.store
    }

    fn context(&self) -> &'static str {
        "link"
    }
}

impl Node for Link {
    fn kind(&self) -> NodeKind {
        NodeKind::Link
    }

    fn parse(&mut self, value: &Value, env: &ParseEnv<'_>) -> Result<()> {
        let object = expect_object(value, "Link")?;
        for (name, raw) in object {
            if name == "meta" {
                let meta = env.make_parsed(NodeKind::Meta, raw)?;
                self.store.set(name, StoreValue::Node(meta));
                continue;
            }
            set_link_member(&mut self.store, name, raw, env)?;
        }
        Ok(())
    }
}

/// Document-level link set; permits arbitrary named links plus the
/// pagination keys.
#[derive(Debug, Default)]
pub struct DocumentLink {
    store: AttributeStore,
}

impl DocumentLink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accessable for DocumentLink {
    fn store(&self) -> &AttributeStore {
        &self.store
    }

    fn context(&self) -> &'static str {
        "links object"
    }
}

impl Node for DocumentLink {
    fn kind(&self) -> NodeKind {
        NodeKind::DocumentLink
    }

    fn parse(&mut self, value: &Value, env: &ParseEnv<'_>) -> Result<()> {
        let object = expect_object(value, "DocumentLink")?;
        for (name, raw) in object {
            if PAGINATION_NAMES.contains(&name.as_str()) {
                set_pagination_member(&mut self.store, name, raw, env)?;
            } else {
                set_link_member(&mut self.store, name, raw, env)?;
            }
        }
        Ok(())
    }
}

/// Relationship-level link set; MUST contain at least one of `self` or
/// `related`, and permits the pagination keys.
#[derive(Debug, Default)]
pub struct RelationshipLink {
    store: AttributeStore,
}

impl RelationshipLink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accessable for RelationshipLink {
    fn store(&self) -> &AttributeStore {
        &self.store
    }

    fn context(&self) -> &'static str {
        "links object"
    }
}

impl Node for RelationshipLink {
    fn kind(&self) -> NodeKind {
        NodeKind::RelationshipLink
    }

    fn parse(&mut self, value: &Value, env: &ParseEnv<'_>) -> Result<()> {
        let object = expect_object(value, "RelationshipLink")?;
        if !object.contains_key("self") && !object.contains_key("related") {
            return Err(Error::validation(
                "RelationshipLink MUST contain at least one of the following properties: self, related",
            ));
        }
        for (name, raw) in object {
            if PAGINATION_NAMES.contains(&name.as_str()) {
                set_pagination_member(&mut self.store, name, raw, env)?;
            } else {
                set_link_member(&mut self.store, name, raw, env)?;
            }
        }
        Ok(())
    }
}

/// Resource-level link set.
#[derive(Debug, Default)]
pub struct ResourceItemLink {
    store: AttributeStore,
}

impl ResourceItemLink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accessable for ResourceItemLink {
    fn store(&self) -> &AttributeStore {
        &self.store
    }

    fn context(&self) -> &'static str {
        "links object"
    }
}

impl Node for ResourceItemLink {
    fn kind(&self) -> NodeKind {
        NodeKind::ResourceItemLink
    }

    fn parse(&mut self, value: &Value, env: &ParseEnv<'_>) -> Result<()> {
        let object = expect_object(value, "ResourceItemLink")?;
        for (name, raw) in object {
            set_link_member(&mut self.store, name, raw, env)?;
        }
        Ok(())
    }
}

/// Error-object link set; MUST contain `about`.
#[derive(Debug, Default)]
pub struct ErrorLink {
    store: AttributeStore,
}

impl ErrorLink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accessable for ErrorLink {
    fn store(&self) -> &AttributeStore {
        &self.store
    }

    fn context(&self) -> &'static str {
        "links object"
    }
}

impl Node for ErrorLink {
    fn kind(&self) -> NodeKind {
        NodeKind::ErrorLink
    }

    fn parse(&mut self, value: &Value, env: &ParseEnv<'_>) -> Result<()> {
        let object = expect_object(value, "ErrorLink")?;
        if !object.contains_key("about") {
            return Err(Error::validation(
                "ErrorLink MUST contain these properties: about",
            ));
        }
        for (name, raw) in object {
            if name == "meta" {
                let meta = env.make_parsed(NodeKind::Meta, raw)?;
                self.store.set(name, StoreValue::Node(meta));
                continue;
            }
            set_link_member(&mut self.store, name, raw, env)?;
        }
        Ok(())
    }
}

/// Standalone pagination-key set: exactly `first`/`last`/`prev`/`next`,
/// each a string or an explicit null (omitted); unknown keys are ignored.
#[derive(Debug, Default)]
pub struct Pagination {
    store: AttributeStore,
}

impl Pagination {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accessable for Pagination {
    fn store(&self) -> &AttributeStore {
        &self.store
    }

    fn context(&self) -> &'static str {
        "pagination object"
    }
}

impl Node for Pagination {
    fn kind(&self) -> NodeKind {
        NodeKind::Pagination
    }

    fn parse(&mut self, value: &Value, _env: &ParseEnv<'_>) -> Result<()> {
        let object = expect_object(value, "Pagination")?;
        for (name, raw) in object {
            if !PAGINATION_NAMES.contains(&name.as_str()) {
                continue;
            }
            match raw {
                Value::Null => {}
                Value::String(_) => self.store.set(name, StoreValue::Json(raw.clone())),
                _ => {
                    return Err(Error::validation(format!(
                        "property \"{name}\" has to be a string or null, \"{}\" given.",
                        json_kind(raw)
                    )))
                }
            }
        }
        Ok(())
    }
}
