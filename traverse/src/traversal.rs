//! Relationship traversal.

use crate::error::{TraverseError, TraverseResult};
use bimv_core::InstanceId;
use bimv_graph::Model;
use bimv_registry::RelationshipAccessors;
use serde::Deserialize;
use std::collections::HashSet;
use tracing::debug;

/// Side of a relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// The relating side.
    From,
    /// The related side.
    To,
}

impl Role {
    /// Attribute holding this side of the relationship.
    pub fn accessor(self, accessors: &RelationshipAccessors) -> &str {
        match self {
            Role::From => &accessors.relating,
            Role::To => &accessors.related,
        }
    }
}

/// A walk over the instances of one relationship type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Traversal {
    pub relationship: String,
    pub source_role: Role,
    pub target_role: Role,
    /// Type a source side instance must have for the relationship to be
    /// followed.
    pub target_type: String,
    /// Type of the instances kept from the target side.
    pub entity: String,
    /// Follow the relationship a second time from the first hop's result.
    #[serde(default)]
    pub chain_once: bool,
}

/// Resolve the accessors of a relationship.
pub(crate) fn accessors<'m>(
    model: &'m dyn Model,
    relationship: &str,
) -> TraverseResult<&'m RelationshipAccessors> {
    model
        .accessors(relationship)
        .ok_or_else(|| TraverseError::unknown_relationship(relationship))
}

/// Instances reached through `traversal`, deduplicated in first-occurrence
/// order.
pub fn traverse(model: &dyn Model, traversal: &Traversal) -> TraverseResult<Vec<InstanceId>> {
    if traversal.source_role == traversal.target_role {
        return Err(TraverseError::same_roles(traversal.source_role));
    }
    let table = accessors(model, &traversal.relationship)?;
    let source = traversal.source_role.accessor(table);
    let sink = traversal.target_role.accessor(table);
    let relationships = model.by_type(&traversal.relationship);

    let mut reached = hop(model, &relationships, source, sink, |id| {
        model.is_a(id, &traversal.target_type)
    });
    if traversal.chain_once {
        let first: HashSet<InstanceId> = reached.iter().copied().collect();
        reached = hop(model, &relationships, source, sink, |id| first.contains(&id));
    }

    let mut seen = HashSet::new();
    let result: Vec<InstanceId> = reached
        .into_iter()
        .filter(|&id| model.is_a(id, &traversal.entity))
        .filter(|&id| seen.insert(id))
        .collect();

    debug!(
        relationship = %traversal.relationship,
        relationships = relationships.len(),
        reached = result.len(),
        "traversed"
    );
    Ok(result)
}

/// Sink side instances of every relationship whose source side references
/// an instance accepted by `accept`.
fn hop(
    model: &dyn Model,
    relationships: &[InstanceId],
    source: &str,
    sink: &str,
    accept: impl Fn(InstanceId) -> bool,
) -> Vec<InstanceId> {
    relationships
        .iter()
        .filter(|&&rel| {
            model
                .get_attribute(rel, source)
                .is_some_and(|value| value.refs().into_iter().any(&accept))
        })
        .flat_map(|&rel| {
            model
                .get_attribute(rel, sink)
                .map(|value| value.refs())
                .unwrap_or_default()
        })
        .collect()
}
