use std::collections::HashMap;
use std::fmt;

use crate::error::Error;
use crate::node::{
    Attributes, Document, DocumentLink, ErrorCollection, ErrorLink, ErrorObject, ErrorSource,
    Jsonapi, Link, Meta, Node, Pagination, Relationship, RelationshipCollection, RelationshipLink,
    ResourceCollection, ResourceIdentifier, ResourceIdentifierCollection, ResourceItem,
    ResourceItemLink, ResourceNull,
};
use crate::Result;

/// Closed enumeration of every node type the engine can construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Document,
    ResourceIdentifier,
    ResourceItem,
    ResourceNull,
    ResourceCollection,
    ResourceIdentifierCollection,
    Attributes,
    Relationship,
    RelationshipCollection,
    Link,
    DocumentLink,
    RelationshipLink,
    ResourceItemLink,
    ErrorLink,
    Pagination,
    Error,
    ErrorCollection,
    ErrorSource,
    Meta,
    Jsonapi,
}

impl NodeKind {
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Document => "Document",
            NodeKind::ResourceIdentifier => "ResourceIdentifier",
            NodeKind::ResourceItem => "ResourceItem",
            NodeKind::ResourceNull => "ResourceNull",
            NodeKind::ResourceCollection => "ResourceCollection",
            NodeKind::ResourceIdentifierCollection => "ResourceIdentifierCollection",
            NodeKind::Attributes => "Attributes",
            NodeKind::Relationship => "Relationship",
            NodeKind::RelationshipCollection => "RelationshipCollection",
            NodeKind::Link => "Link",
            NodeKind::DocumentLink => "DocumentLink",
            NodeKind::RelationshipLink => "RelationshipLink",
            NodeKind::ResourceItemLink => "ResourceItemLink",
            NodeKind::ErrorLink => "ErrorLink",
            NodeKind::Pagination => "Pagination",
            NodeKind::Error => "Error",
            NodeKind::ErrorCollection => "ErrorCollection",
            NodeKind::ErrorSource => "ErrorSource",
            NodeKind::Meta => "Meta",
            NodeKind::Jsonapi => "Jsonapi",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Constructor for one node type; returns the node in its empty state.
pub type MakeNode = fn() -> Box<dyn Node>;

/// Pure construction table from node kind to constructor. Validation lives
/// in each node's own `parse`, never here.
pub struct Factory {
    constructors: HashMap<NodeKind, MakeNode>,
}

impl Factory {
    /// A factory with no registered constructors; useful as a base for
    /// fully custom node sets.
    pub fn empty() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Replaces or adds the constructor for one node kind.
    pub fn with_override(mut self, kind: NodeKind, make: MakeNode) -> Self {
        self.constructors.insert(kind, make);
        self
    }

    pub fn make(&self, kind: NodeKind) -> Result<Box<dyn Node>> {
        match self.constructors.get(&kind) {
            Some(make) => Ok(make()),
            None => Err(Error::factory(format!(
                "\"{kind}\" is not a registered node type"
            ))),
        }
    }
}

impl Default for Factory {
    fn default() -> Self {
        Self::empty()
            .with_override(NodeKind::Document, || Box::new(Document::new()))
            .with_override(NodeKind::ResourceIdentifier, || {
                Box::new(ResourceIdentifier::new())
            })
            .with_override(NodeKind::ResourceItem, || Box::new(ResourceItem::new()))
            .with_override(NodeKind::ResourceNull, || Box::new(ResourceNull::new()))
            .with_override(NodeKind::ResourceCollection, || {
                Box::new(ResourceCollection::new())
            })
            .with_override(NodeKind::ResourceIdentifierCollection, || {
                Box::new(ResourceIdentifierCollection::new())
            })
            .with_override(NodeKind::Attributes, || Box::new(Attributes::new()))
            .with_override(NodeKind::Relationship, || Box::new(Relationship::new()))
            .with_override(NodeKind::RelationshipCollection, || {
                Box::new(RelationshipCollection::new())
            })
            .with_override(NodeKind::Link, || Box::new(Link::new()))
            .with_override(NodeKind::DocumentLink, || Box::new(DocumentLink::new()))
            .with_override(NodeKind::RelationshipLink, || {
                Box::new(RelationshipLink::new())
            })
            .with_override(NodeKind::ResourceItemLink, || {
                Box::new(ResourceItemLink::new())
            })
            .with_override(NodeKind::ErrorLink, || Box::new(ErrorLink::new()))
            .with_override(NodeKind::Pagination, || Box::new(Pagination::new()))
            .with_override(NodeKind::Error, || Box::new(ErrorObject::new()))
            .with_override(NodeKind::ErrorCollection, || Box::new(ErrorCollection::new()))
            .with_override(NodeKind::ErrorSource, || Box::new(ErrorSource::new()))
            .with_override(NodeKind::Meta, || Box::new(Meta::new()))
            .with_override(NodeKind::Jsonapi, || Box::new(Jsonapi::new()))
    }
}
