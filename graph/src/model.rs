//! The capability set validation code reads a model snapshot through.

use crate::FileHeader;
use bimv_core::{InstanceId, InstanceRef, Value, GLOBAL_ID};
use bimv_registry::RelationshipAccessors;

/// Read-only view of a parsed model.
///
/// Implementations must be pure: the same call on the same snapshot
/// returns the same result in the same order.
pub trait Model {
    /// File header of the snapshot.
    fn header(&self) -> &FileHeader;

    /// All instances of the named type or its subtypes, in id order.
    /// Unknown type names yield an empty list.
    fn by_type(&self, type_name: &str) -> Vec<InstanceId>;

    /// Declared type name of an instance.
    fn type_name(&self, id: InstanceId) -> Option<&str>;

    /// Attribute value; None when the instance or attribute is absent or null.
    fn get_attribute(&self, id: InstanceId, name: &str) -> Option<&Value>;

    /// Whether the instance is of the named type or a subtype of it.
    fn is_a(&self, id: InstanceId, type_name: &str) -> bool;

    /// The instance followed by every instance transitively reachable
    /// through its attribute references, breadth first.
    fn closure(&self, id: InstanceId) -> Vec<InstanceId>;

    /// Instances holding a reference to `id`, in id order.
    fn referenced_by(&self, id: InstanceId) -> Vec<InstanceId>;

    /// Relating/related accessor names of a relationship type.
    fn accessors(&self, relationship: &str) -> Option<&RelationshipAccessors>;

    /// Detached description of an instance for reporting.
    fn describe(&self, id: InstanceId) -> InstanceRef {
        let type_name = self.type_name(id).unwrap_or("?");
        let instance = InstanceRef::new(id, type_name);
        match self.get_attribute(id, GLOBAL_ID).and_then(Value::as_str) {
            Some(guid) => instance.with_global_id(guid),
            None => instance,
        }
    }
}
