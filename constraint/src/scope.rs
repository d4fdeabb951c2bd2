//! Nested attribute scopes.
//!
//! Narrowing an instance set on an attribute produces a scope: the
//! `(owner, value)` pairs for every instance that has the attribute. Scopes
//! form an immutable chain; pushing returns a new chain whose parent is the
//! previous one, popping returns the parent.

use bimv_core::{InstanceId, Value};
use bimv_graph::Model;
use std::sync::Arc;
use tracing::trace;

/// One `(owner, value)` pair of a scope.
#[derive(Debug, Clone, PartialEq)]
pub struct ScopeEntry {
    pub owner: InstanceId,
    pub value: Value,
}

#[derive(Debug)]
struct ScopeNode {
    attribute: String,
    entries: Vec<ScopeEntry>,
    parent: Option<Arc<ScopeNode>>,
}

/// Immutable chain of scopes, innermost on top.
#[derive(Debug, Clone, Default)]
pub struct ScopeChain {
    top: Option<Arc<ScopeNode>>,
}

impl ScopeChain {
    /// The empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_none()
    }

    /// Number of scopes on the chain.
    pub fn depth(&self) -> usize {
        self.nodes().count()
    }

    /// Push a scope on top of this chain.
    pub fn push(&self, attribute: impl Into<String>, entries: Vec<ScopeEntry>) -> ScopeChain {
        ScopeChain {
            top: Some(Arc::new(ScopeNode {
                attribute: attribute.into(),
                entries,
                parent: self.top.clone(),
            })),
        }
    }

    /// The chain without its top scope. Popping the empty chain yields the
    /// empty chain.
    pub fn pop(&self) -> ScopeChain {
        ScopeChain {
            top: self.top.as_ref().and_then(|node| node.parent.clone()),
        }
    }

    /// Attribute the top scope was narrowed on.
    pub fn attribute(&self) -> Option<&str> {
        self.top.as_deref().map(|node| node.attribute.as_str())
    }

    /// Pairs of the top scope.
    pub fn entries(&self) -> &[ScopeEntry] {
        self.top.as_deref().map_or(&[], |node| node.entries.as_slice())
    }

    /// Values of the top scope: the current working collection.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries().iter().map(|entry| &entry.value)
    }

    /// Instances referenced by the values of the top scope, flattened in
    /// order.
    pub fn instances(&self) -> Vec<InstanceId> {
        self.values().flat_map(Value::refs).collect()
    }

    /// Narrow the instances referenced by the top scope on `attribute`.
    pub fn narrow(&self, model: &dyn Model, attribute: &str) -> ScopeChain {
        narrow_by_attribute_values(model, &self.instances(), attribute, self)
    }

    /// Owner recorded by the most recently pushed non-empty scope.
    pub fn current_owner(&self) -> Option<InstanceId> {
        self.nodes()
            .find_map(|node| node.entries.last())
            .map(|entry| entry.owner)
    }

    fn nodes(&self) -> impl Iterator<Item = &ScopeNode> {
        std::iter::successors(self.top.as_deref(), |node| node.parent.as_deref())
    }
}

/// Pair every instance with its value for `attribute`, drop absent values,
/// and push the result on `parent`.
pub fn narrow_by_attribute_values(
    model: &dyn Model,
    instances: &[InstanceId],
    attribute: &str,
    parent: &ScopeChain,
) -> ScopeChain {
    let entries: Vec<ScopeEntry> = instances
        .iter()
        .filter_map(|&owner| {
            model.get_attribute(owner, attribute).map(|value| ScopeEntry {
                owner,
                value: value.clone(),
            })
        })
        .collect();

    trace!(
        attribute,
        instances = instances.len(),
        entries = entries.len(),
        "narrowed scope"
    );
    parent.push(attribute, entries)
}
