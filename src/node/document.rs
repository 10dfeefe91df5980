use serde::ser::{Serialize, Serializer};
use serde_json::Value;

use crate::access::Accessable;
use crate::error::Error;
use crate::factory::NodeKind;
use crate::manager::{DocumentContext, ParseEnv};
use crate::node::{expect_object, parse_data, DataPosition, Node};
use crate::store::{AttributeStore, StoreValue};
use crate::Result;

/// Root node of a parsed document.
///
/// A document MUST contain at least one of `data`, `errors`, `meta`;
/// `data` and `errors` are mutually exclusive and `included` is only legal
/// alongside `data`. Members are stored in input order.
#[derive(Debug, Default)]
pub struct Document {
    store: AttributeStore,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accessable for Document {
    fn store(&self) -> &AttributeStore {
        &self.store
    }

    fn context(&self) -> &'static str {
        "document"
    }
}

impl Node for Document {
    fn kind(&self) -> NodeKind {
        NodeKind::Document
    }

    fn parse(&mut self, value: &Value, env: &ParseEnv<'_>) -> Result<()> {
        let object = expect_object(value, "Document")?;

        let has_data = object.contains_key("data");
        let has_errors = object.contains_key("errors");
        let has_meta = object.contains_key("meta");

        if !has_data && !has_errors && !has_meta {
            return Err(Error::validation(
                "Document MUST contain at least one of the following properties: data, errors, meta",
            ));
        }
        if has_data && has_errors {
            return Err(Error::validation(
                "The properties `data` and `errors` MUST NOT coexist in Document.",
            ));
        }
        if !has_data && object.contains_key("included") {
            return Err(Error::validation(
                "If Document does not contain a `data` property, the `included` property MUST NOT be present either.",
            ));
        }

        if env.config().context == DocumentContext::Request {
            if !has_data {
                return Err(Error::validation(
                    "A request document MUST contain a `data` property",
                ));
            }
            if object.contains_key("included") {
                return Err(Error::validation(
                    "A request document MUST NOT contain an `included` property",
                ));
            }
        }

        for (name, raw) in object {
            let parsed = match name.as_str() {
                "data" => StoreValue::Node(parse_data(raw, env, DataPosition::Document)?),
                "errors" => StoreValue::Node(env.make_parsed(NodeKind::ErrorCollection, raw)?),
                "meta" => StoreValue::Node(env.make_parsed(NodeKind::Meta, raw)?),
                "jsonapi" => StoreValue::Node(env.make_parsed(NodeKind::Jsonapi, raw)?),
                "links" => StoreValue::Node(env.make_parsed(NodeKind::DocumentLink, raw)?),
                "included" => StoreValue::Node(env.make_parsed(NodeKind::ResourceCollection, raw)?),
                // Unrecognized members are ignored for forward compatibility.
                _ => continue,
            };
            self.store.set(name, parsed);
        }

        Ok(())
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}
