//! Entity structures.
//!
//! `Instance` is the stored form of a model entity. `InstanceRef` is the
//! detached description findings carry so they can be rendered after the
//! validation pass has released its borrows on the model.

use crate::{Attributes, InstanceId, TypeId, Value};
use serde::{Serialize, Serializer};
use std::fmt;

/// Attribute holding the globally unique identifier of rooted entities.
pub const GLOBAL_ID: &str = "GlobalId";

/// An instance in the model graph.
#[derive(Debug, Clone)]
pub struct Instance {
    /// Step identifier.
    pub id: InstanceId,
    /// Entity type (reference to registry).
    pub type_id: TypeId,
    /// Attribute values.
    pub attributes: Attributes,
}

impl Instance {
    /// Create a new instance with the given properties.
    pub fn new(id: InstanceId, type_id: TypeId, attributes: Attributes) -> Self {
        Self {
            id,
            type_id,
            attributes,
        }
    }

    /// Get an attribute value by name. Null values count as absent.
    pub fn get_attr(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name).filter(|v| !v.is_null())
    }

    /// Instances referenced directly by any attribute, sorted by id.
    pub fn forward_refs(&self) -> Vec<InstanceId> {
        let mut refs: Vec<InstanceId> = self
            .attributes
            .values()
            .flat_map(|v| v.refs())
            .collect();
        refs.sort();
        refs.dedup();
        refs
    }
}

/// Detached description of an instance, used in findings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InstanceRef {
    pub id: InstanceId,
    pub type_name: String,
    pub global_id: Option<String>,
}

impl InstanceRef {
    pub fn new(id: InstanceId, type_name: impl Into<String>) -> Self {
        Self {
            id,
            type_name: type_name.into(),
            global_id: None,
        }
    }

    pub fn with_global_id(mut self, global_id: impl Into<String>) -> Self {
        self.global_id = Some(global_id.into());
        self
    }
}

impl fmt::Display for InstanceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.id, self.type_name)?;
        if let Some(guid) = &self.global_id {
            write!(f, "('{}')", guid)?;
        }
        Ok(())
    }
}

impl Serialize for InstanceRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
