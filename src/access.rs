use serde_json::Value;

use crate::error::Error;
use crate::store::{AttributeStore, StoreValue};
use crate::Result;

/// Uniform navigation capability over a node's attribute store.
///
/// Paths are dot-separated; each segment resolves against the current store
/// and descent continues only into nested nodes. `has` never fails, `get`
/// raises an access error naming the offending segment and the innermost
/// node's context.
pub trait Accessable {
    fn store(&self) -> &AttributeStore;

    /// Context name used in access error messages ("document", "resource", ...).
    fn context(&self) -> &'static str;

    fn has(&self, path: &str) -> bool {
        self.get(path).is_ok()
    }

    fn get(&self, path: &str) -> Result<&StoreValue> {
        let mut store = self.store();
        let mut context = self.context();
        let mut segments = path.split('.').peekable();

        loop {
            let segment = match segments.next() {
                Some(segment) => segment,
                None => break,
            };
            let value = store.get(segment).ok_or_else(|| {
                Error::access(format!("\"{segment}\" doesn't exist in this {context}."))
            })?;
            if segments.peek().is_none() {
                return Ok(value);
            }
            match value {
                StoreValue::Node(node) => {
                    store = node.store();
                    context = node.context();
                }
                StoreValue::Json(_) => {
                    // Raw JSON values are not navigable.
                    let next = segments.next().unwrap_or_default();
                    return Err(Error::access(format!(
                        "\"{next}\" doesn't exist in this {context}."
                    )));
                }
            }
        }

        Err(Error::access(format!(
            "\"{path}\" doesn't exist in this {context}."
        )))
    }

    /// Keys of this node's own store, in insertion order.
    fn keys(&self) -> Vec<&str> {
        self.store().keys().collect()
    }

    /// Recursive plain JSON form of this node. Collection nodes override
    /// this to produce an array, the null resource to produce `null`.
    fn to_json(&self) -> Value {
        self.store().to_json()
    }
}
