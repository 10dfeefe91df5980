pub mod access;
pub mod error;
pub mod factory;
pub mod manager;
pub mod node;
pub mod resolve;
pub mod store;

use serde_json::Value;

pub use crate::access::Accessable;
pub use crate::error::{Error, ErrorList};
pub use crate::factory::{Factory, MakeNode, NodeKind};
pub use crate::manager::{Config, DocumentContext, FailurePolicy, Manager, ParseEnv};
pub use crate::node::{Document, Node};
pub use crate::resolve::{classify_resource, json_kind, ResourceShape};
pub use crate::store::{AttributeStore, StoreValue};

pub type Result<T> = std::result::Result<T, Error>;

/// Parses a decoded JSON value as a server response body: `data`, `errors`
/// and `meta` are all legal top-level members.
pub fn parse_response_body(value: &Value) -> Result<Box<dyn Node>> {
    Manager::new(Factory::default()).parse(value)
}

/// Parses a decoded JSON value as a client request body: only `data` is
/// legal at the top level, and resource ids are optional so that creation
/// requests without client-generated ids validate.
pub fn parse_request_body(value: &Value) -> Result<Box<dyn Node>> {
    Manager::new(Factory::default())
        .with_config(Config::request())
        .parse(value)
}
