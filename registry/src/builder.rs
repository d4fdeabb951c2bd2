//! RegistryBuilder for constructing an immutable Registry.

use crate::{Registry, RelationshipAccessors, SubtypeIndex, TypeDef};
use bimv_core::TypeId;
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur during registry construction.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Duplicate type name: {0}")]
    DuplicateTypeName(String),

    #[error("Unknown parent type: {0}")]
    UnknownParentType(String),

    #[error("Unknown relationship type: {0}")]
    UnknownRelationshipType(String),

    #[error("Duplicate relationship accessors for: {0}")]
    DuplicateRelationship(String),
}

/// Builder for constructing an immutable Registry.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    /// Next type ID to allocate.
    next_type_id: u32,

    /// Types being built.
    types: HashMap<TypeId, TypeDef>,
    /// Lowercased type name to ID mapping.
    type_names: HashMap<String, TypeId>,

    /// Relationship accessors, keyed by lowercased relationship name.
    relationships: HashMap<String, RelationshipAccessors>,
}

impl RegistryBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a type definition.
    pub fn add_type(&mut self, name: impl Into<String>) -> TypeBuilder<'_> {
        let name = name.into();
        let id = TypeId::new(self.next_type_id);
        self.next_type_id += 1;

        TypeBuilder {
            builder: self,
            id,
            name,
            parent_names: Vec::new(),
            is_abstract: false,
        }
    }

    /// Register the accessor names of a relationship type.
    ///
    /// The relationship must already be declared as a type.
    pub fn add_relationship(
        &mut self,
        relationship: impl Into<String>,
        relating: impl Into<String>,
        related: impl Into<String>,
    ) -> Result<(), RegistryError> {
        let relationship = relationship.into();
        let key = relationship.to_ascii_lowercase();

        if !self.type_names.contains_key(&key) {
            return Err(RegistryError::UnknownRelationshipType(relationship));
        }
        if self.relationships.contains_key(&key) {
            return Err(RegistryError::DuplicateRelationship(relationship));
        }

        self.relationships.insert(
            key,
            RelationshipAccessors::new(relationship, relating, related),
        );
        Ok(())
    }

    /// Look up a type ID declared so far.
    pub fn get_type_id(&self, name: &str) -> Option<TypeId> {
        self.type_names.get(&name.to_ascii_lowercase()).copied()
    }

    /// Build the immutable Registry.
    pub fn build(self) -> Result<Registry, RegistryError> {
        let subtype_index = SubtypeIndex::build(&self.types);

        Ok(Registry::new(
            self.types,
            self.type_names,
            self.relationships,
            subtype_index,
        ))
    }
}

/// Builder for a type definition.
pub struct TypeBuilder<'a> {
    builder: &'a mut RegistryBuilder,
    id: TypeId,
    name: String,
    parent_names: Vec<String>,
    is_abstract: bool,
}

impl<'a> TypeBuilder<'a> {
    /// Add a parent type by name.
    pub fn extends(mut self, parent_name: impl Into<String>) -> Self {
        self.parent_names.push(parent_name.into());
        self
    }

    /// Mark as abstract.
    pub fn abstract_type(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Finish building this type.
    pub fn done(self) -> Result<TypeId, RegistryError> {
        let key = self.name.to_ascii_lowercase();
        if self.builder.type_names.contains_key(&key) {
            return Err(RegistryError::DuplicateTypeName(self.name));
        }

        let mut parent_ids = Vec::new();
        for parent_name in &self.parent_names {
            match self.builder.get_type_id(parent_name) {
                Some(parent_id) => parent_ids.push(parent_id),
                None => return Err(RegistryError::UnknownParentType(parent_name.clone())),
            }
        }

        let type_def = TypeDef {
            id: self.id,
            name: self.name,
            parent_ids,
            is_abstract: self.is_abstract,
        };

        self.builder.type_names.insert(key, self.id);
        self.builder.types.insert(self.id, type_def);

        Ok(self.id)
    }
}
