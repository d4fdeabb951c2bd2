//! The Registry - immutable schema lookup.

use crate::{RelationshipAccessors, SubtypeIndex, TypeDef};
use bimv_core::TypeId;
use std::collections::HashMap;

/// The Registry provides runtime lookup of schema definitions.
/// It is immutable after construction.
///
/// Type names are matched case-insensitively, as entity names are in
/// the exchange format.
#[derive(Debug, Default)]
pub struct Registry {
    /// Entity type definitions by ID.
    types: HashMap<TypeId, TypeDef>,
    /// Type ID lookup by lowercased name.
    type_names: HashMap<String, TypeId>,

    /// Relationship accessor table, keyed by lowercased relationship name.
    relationships: HashMap<String, RelationshipAccessors>,

    /// Precomputed subtype relationships.
    subtype_index: SubtypeIndex,
}

impl Registry {
    pub(crate) fn new(
        types: HashMap<TypeId, TypeDef>,
        type_names: HashMap<String, TypeId>,
        relationships: HashMap<String, RelationshipAccessors>,
        subtype_index: SubtypeIndex,
    ) -> Self {
        Self {
            types,
            type_names,
            relationships,
            subtype_index,
        }
    }

    // ==================== Type Lookups ====================

    /// Get a type definition by name.
    pub fn get_type_by_name(&self, name: &str) -> Option<&TypeDef> {
        self.get_type_id(name).and_then(|id| self.types.get(&id))
    }

    /// Get a type definition by ID.
    pub fn get_type(&self, id: TypeId) -> Option<&TypeDef> {
        self.types.get(&id)
    }

    /// Get a type ID by name.
    pub fn get_type_id(&self, name: &str) -> Option<TypeId> {
        self.type_names.get(&name.to_ascii_lowercase()).copied()
    }

    // ==================== Subtype Queries ====================

    /// Check if `sub` is a subtype of `super_type`.
    pub fn is_subtype(&self, sub: TypeId, super_type: TypeId) -> bool {
        self.subtype_index.is_subtype(sub, super_type)
    }

    /// Check if `type_id` is the named type or one of its subtypes.
    /// Unknown names never match.
    pub fn is_a(&self, type_id: TypeId, type_name: &str) -> bool {
        self.get_type_id(type_name)
            .map(|super_type| self.is_subtype(type_id, super_type))
            .unwrap_or(false)
    }

    /// Get all subtypes of a type (not including the type itself).
    pub fn get_subtypes(&self, type_id: TypeId) -> impl Iterator<Item = TypeId> + '_ {
        self.subtype_index.get_subtypes(type_id)
    }

    /// Get all supertypes of a type (not including the type itself).
    pub fn get_supertypes(&self, type_id: TypeId) -> impl Iterator<Item = TypeId> + '_ {
        self.subtype_index.get_supertypes(type_id)
    }

    // ==================== Relationship Accessors ====================

    /// Accessor names for a relationship type.
    pub fn accessors(&self, relationship: &str) -> Option<&RelationshipAccessors> {
        self.relationships.get(&relationship.to_ascii_lowercase())
    }
}
