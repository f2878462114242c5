use serde_json::Value;
use std::collections::BTreeSet;
use tracing::{debug, instrument, trace};

use crate::error::{ExtractError, ExtractResult};

/// Default bound on how deep traversal descends into nested containers
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Limits applied while walking a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraversalLimits {
    pub max_depth: usize,
}

impl Default for TraversalLimits {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH }
    }
}

impl TraversalLimits {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// A pending node on the worklist
///
/// `name` is the property name the node was reached through, or `None` for
/// the root and for array elements.
struct Frame<'a> {
    name: Option<&'a str>,
    value: &'a Value,
    depth: usize,
}

/// Walks `root` in pre-order, calling `visit` with each node's property name
///
/// Children are pushed in reverse so they are popped in document order. This
/// gives the same visiting sequence as a recursive descent without growing
/// the native stack.
fn walk<'a, F>(root: &'a Value, limits: TraversalLimits, mut visit: F) -> ExtractResult<()>
where
    F: FnMut(Option<&'a str>, &'a Value),
{
    let mut stack = vec![Frame { name: None, value: root, depth: 0 }];

    while let Some(frame) = stack.pop() {
        visit(frame.name, frame.value);

        let child_depth = frame.depth + 1;
        match frame.value {
            Value::Object(map) if !map.is_empty() => {
                if child_depth > limits.max_depth {
                    return Err(ExtractError::DepthLimitExceeded { limit: limits.max_depth });
                }
                for (key, child) in map.iter().rev() {
                    stack.push(Frame { name: Some(key.as_str()), value: child, depth: child_depth });
                }
            }
            Value::Array(items) if !items.is_empty() => {
                if child_depth > limits.max_depth {
                    return Err(ExtractError::DepthLimitExceeded { limit: limits.max_depth });
                }
                for child in items.iter().rev() {
                    stack.push(Frame { name: None, value: child, depth: child_depth });
                }
            }
            _ => {}
        }
    }

    Ok(())
}

/// Collects every distinct object key in the document, sorted ascending
///
/// Arrays are descended element by element but contribute no key of their
/// own. Scalars and null end the descent.
#[instrument(level = "debug", skip_all)]
pub fn discover_keys(root: &Value, limits: TraversalLimits) -> ExtractResult<Vec<String>> {
    let mut keys = BTreeSet::new();
    walk(root, limits, |name, _| {
        if let Some(name) = name {
            keys.insert(name);
        }
    })?;

    debug!("Discovered {} distinct keys", keys.len());
    Ok(keys.into_iter().map(str::to_owned).collect())
}

/// Collects every value assigned to `key` at any depth, in document order
///
/// A captured value is still descended into afterwards, so a match nested
/// inside another match is captured as well. Values are neither deduplicated
/// nor sorted.
#[instrument(level = "debug", skip(root, limits))]
pub fn extract_values(root: &Value, key: &str, limits: TraversalLimits) -> ExtractResult<Vec<Value>> {
    let mut values = Vec::new();
    walk(root, limits, |name, value| {
        if name == Some(key) {
            trace!("Captured value #{} for key", values.len() + 1);
            values.push(value.clone());
        }
    })?;

    debug!("Extracted {} values", values.len());
    Ok(values)
}
