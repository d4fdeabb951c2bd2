//! Schema definition types.

use bimv_core::TypeId;
use std::collections::{HashMap, HashSet};

/// Entity type definition.
#[derive(Debug, Clone)]
pub struct TypeDef {
    /// Unique identifier.
    pub id: TypeId,
    /// Type name as declared (`IfcWall`).
    pub name: String,
    /// Parent type IDs (for inheritance).
    pub parent_ids: Vec<TypeId>,
    /// Abstract types cannot be instantiated.
    pub is_abstract: bool,
}

/// Accessor names of the two ends of a relationship type.
///
/// `relating` names the attribute holding the source side (the container,
/// the whole); `related` names the attribute holding the sink side, which
/// may be a single reference or an aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipAccessors {
    /// Relationship entity type name.
    pub relationship: String,
    /// Relating-side attribute name (e.g. `RelatingObject`).
    pub relating: String,
    /// Related-side attribute name (e.g. `RelatedObjects`).
    pub related: String,
}

impl RelationshipAccessors {
    pub fn new(
        relationship: impl Into<String>,
        relating: impl Into<String>,
        related: impl Into<String>,
    ) -> Self {
        Self {
            relationship: relationship.into(),
            relating: relating.into(),
            related: related.into(),
        }
    }
}

/// Precomputed subtype relationships.
#[derive(Debug, Default)]
pub struct SubtypeIndex {
    /// For each type, the set of all its subtypes (transitive).
    subtypes: HashMap<TypeId, HashSet<TypeId>>,
    /// For each type, the set of all its supertypes (transitive).
    supertypes: HashMap<TypeId, HashSet<TypeId>>,
}

impl SubtypeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the subtype index from type definitions.
    ///
    /// Parents are always declared before their children, so the
    /// inheritance graph is acyclic and a plain walk up the parents
    /// terminates.
    pub fn build(types: &HashMap<TypeId, TypeDef>) -> Self {
        let mut index = Self::new();

        for &type_id in types.keys() {
            let mut ancestors = HashSet::new();
            let mut pending: Vec<TypeId> = types[&type_id].parent_ids.clone();
            while let Some(parent_id) = pending.pop() {
                if !ancestors.insert(parent_id) {
                    continue;
                }
                if let Some(parent) = types.get(&parent_id) {
                    pending.extend(parent.parent_ids.iter().copied());
                }
            }

            for &ancestor in &ancestors {
                index.subtypes.entry(ancestor).or_default().insert(type_id);
            }
            index.supertypes.insert(type_id, ancestors);
        }

        index
    }

    /// Check if `sub` is `super_type` or one of its descendants.
    pub fn is_subtype(&self, sub: TypeId, super_type: TypeId) -> bool {
        if sub == super_type {
            return true;
        }
        self.supertypes
            .get(&sub)
            .map(|set| set.contains(&super_type))
            .unwrap_or(false)
    }

    /// Get all subtypes of a type (not including the type itself).
    pub fn get_subtypes(&self, type_id: TypeId) -> impl Iterator<Item = TypeId> + '_ {
        self.subtypes
            .get(&type_id)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Get all supertypes of a type (not including the type itself).
    pub fn get_supertypes(&self, type_id: TypeId) -> impl Iterator<Item = TypeId> + '_ {
        self.supertypes
            .get(&type_id)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }
}
