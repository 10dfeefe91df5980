use serde_json::Value;

use crate::factory::{Factory, NodeKind};
use crate::node::Node;
use crate::Result;

/// How the document under parse is being used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentContext {
    /// Server response: `data`, `errors` and `meta` are all legal top-level
    /// members, `included` is legal alongside `data`.
    #[default]
    Response,
    /// Client request: only `data` is legal; resource ids become optional
    /// to allow creation requests without client-generated ids.
    Request,
}

/// Failure policy applied while parsing a top-level error document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// The first invalid field anywhere aborts the whole parse.
    #[default]
    Abort,
    /// Every element of a top-level error list is parsed and all failures
    /// are reported together. Nested collections still abort on first.
    Collect,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Config {
    pub context: DocumentContext,
    pub optional_id: bool,
}

impl Config {
    pub fn response() -> Self {
        Self::default()
    }

    pub fn request() -> Self {
        Self {
            context: DocumentContext::Request,
            optional_id: true,
        }
    }

    pub fn with_optional_id(mut self, optional_id: bool) -> Self {
        self.optional_id = optional_id;
        self
    }
}

/// Per-invocation context holding the factory, configuration and failure
/// policy. One `parse` call builds one independent graph; managers share no
/// mutable state, so independent inputs may be parsed in parallel.
pub struct Manager {
    factory: Factory,
    config: Config,
    policy: FailurePolicy,
}

impl Manager {
    pub fn new(factory: Factory) -> Self {
        Self {
            factory,
            config: Config::default(),
            policy: FailurePolicy::default(),
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parses an already-decoded JSON value into a validated document graph.
    pub fn parse(&self, value: &Value) -> Result<Box<dyn Node>> {
        let env = ParseEnv::new(&self.factory, &self.config, self.policy);
        env.make_parsed(NodeKind::Document, value)
    }
}

/// Read-only parse-time environment threaded through every node's `parse`.
#[derive(Clone, Copy)]
pub struct ParseEnv<'a> {
    factory: &'a Factory,
    config: &'a Config,
    policy: FailurePolicy,
}

impl<'a> ParseEnv<'a> {
    pub fn new(factory: &'a Factory, config: &'a Config, policy: FailurePolicy) -> Self {
        Self {
            factory,
            config,
            policy,
        }
    }

    pub fn factory(&self) -> &Factory {
        self.factory
    }

    pub fn config(&self) -> &Config {
        self.config
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Constructs a node of `kind` and runs its validator over `value`.
    /// A failed parse publishes nothing.
    pub fn make_parsed(&self, kind: NodeKind, value: &Value) -> Result<Box<dyn Node>> {
        let mut node = self.factory.make(kind)?;
        node.parse(value, self)?;
        Ok(node)
    }
}
