//! In-memory model snapshot.

use crate::index::{InverseIndex, TypeIndex};
use crate::{FileHeader, Model};
use bimv_core::{Attributes, Instance, InstanceId, ModelError, ModelResult, TypeId, Value};
use bimv_registry::{Registry, RelationshipAccessors};
use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};

/// ID allocator for instances inserted without an explicit step id.
#[derive(Debug)]
struct IdAllocator {
    next_id: u64,
}

impl IdAllocator {
    fn new() -> Self {
        Self { next_id: 1 }
    }

    fn alloc(&mut self) -> InstanceId {
        let id = InstanceId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Keep future allocations clear of an explicitly assigned id.
    fn observe(&mut self, id: InstanceId) {
        if id.raw() >= self.next_id {
            self.next_id = id.raw() + 1;
        }
    }
}

/// The in-memory model graph.
///
/// Forward references to instances that are inserted later are allowed;
/// `check_references` reports any that never resolve.
#[derive(Debug)]
pub struct Graph {
    /// Schema
    registry: Registry,
    /// Header metadata
    header: FileHeader,
    /// Instance storage, ordered by id
    instances: BTreeMap<InstanceId, Instance>,
    /// ID allocator
    id_alloc: IdAllocator,
    /// Type index
    type_index: TypeIndex,
    /// Inverse reference index
    inverse_index: InverseIndex,
}

impl Graph {
    /// Create a new empty graph over a schema.
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            header: FileHeader::default(),
            instances: BTreeMap::new(),
            id_alloc: IdAllocator::new(),
            type_index: TypeIndex::new(),
            inverse_index: InverseIndex::new(),
        }
    }

    /// Replace the header metadata.
    pub fn with_header(mut self, header: FileHeader) -> Self {
        self.header = header;
        self
    }

    /// The schema this graph was built against.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    // ==================== Instance Operations ====================

    /// Insert an instance with the next free id.
    pub fn insert(&mut self, type_name: &str, attributes: Attributes) -> ModelResult<InstanceId> {
        let type_id = self.resolve_type(type_name)?;
        let id = self.id_alloc.alloc();
        self.store(Instance::new(id, type_id, attributes));
        Ok(id)
    }

    /// Insert an instance under an explicit step id.
    pub fn insert_with_id(
        &mut self,
        id: InstanceId,
        type_name: &str,
        attributes: Attributes,
    ) -> ModelResult<()> {
        if self.instances.contains_key(&id) {
            return Err(ModelError::DuplicateInstance(id));
        }
        let type_id = self.resolve_type(type_name)?;
        self.id_alloc.observe(id);
        self.store(Instance::new(id, type_id, attributes));
        Ok(())
    }

    /// Get an instance by ID.
    pub fn get(&self, id: InstanceId) -> Option<&Instance> {
        self.instances.get(&id)
    }

    /// Set an attribute on an instance, keeping the inverse index current.
    pub fn set_attr(&mut self, id: InstanceId, name: &str, value: Value) -> ModelResult<()> {
        let instance = self
            .instances
            .get_mut(&id)
            .ok_or(ModelError::InstanceNotFound(id))?;

        let before: HashSet<InstanceId> = instance.forward_refs().into_iter().collect();
        instance.attributes.insert(name.to_string(), value);
        let after: HashSet<InstanceId> = instance.forward_refs().into_iter().collect();

        for gone in before.difference(&after) {
            self.inverse_index.remove(*gone, id);
        }
        for added in after.difference(&before) {
            self.inverse_index.insert(*added, id);
        }
        Ok(())
    }

    /// Verify that every reference resolves to an instance in the graph.
    pub fn check_references(&self) -> ModelResult<()> {
        for instance in self.instances.values() {
            for target in instance.forward_refs() {
                if !self.instances.contains_key(&target) {
                    return Err(ModelError::DanglingReference {
                        from: instance.id,
                        to: target,
                    });
                }
            }
        }
        Ok(())
    }

    /// Get the number of instances in the graph.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    fn resolve_type(&self, type_name: &str) -> ModelResult<TypeId> {
        let type_def = self
            .registry
            .get_type_by_name(type_name)
            .ok_or_else(|| ModelError::UnknownType(type_name.to_string()))?;
        if type_def.is_abstract {
            return Err(ModelError::AbstractType(type_def.name.clone()));
        }
        Ok(type_def.id)
    }

    fn store(&mut self, instance: Instance) {
        let id = instance.id;
        self.type_index.insert(instance.type_id, id);
        for target in instance.forward_refs() {
            self.inverse_index.insert(target, id);
        }
        self.instances.insert(id, instance);
    }
}

impl Model for Graph {
    fn header(&self) -> &FileHeader {
        &self.header
    }

    fn by_type(&self, type_name: &str) -> Vec<InstanceId> {
        let Some(type_id) = self.registry.get_type_id(type_name) else {
            return Vec::new();
        };

        let mut ids: BTreeSet<InstanceId> = self.type_index.get(type_id).collect();
        for sub in self.registry.get_subtypes(type_id) {
            ids.extend(self.type_index.get(sub));
        }
        ids.into_iter().collect()
    }

    fn type_name(&self, id: InstanceId) -> Option<&str> {
        let instance = self.instances.get(&id)?;
        self.registry
            .get_type(instance.type_id)
            .map(|t| t.name.as_str())
    }

    fn get_attribute(&self, id: InstanceId, name: &str) -> Option<&Value> {
        self.instances.get(&id)?.get_attr(name)
    }

    fn is_a(&self, id: InstanceId, type_name: &str) -> bool {
        self.instances
            .get(&id)
            .map(|instance| self.registry.is_a(instance.type_id, type_name))
            .unwrap_or(false)
    }

    fn closure(&self, id: InstanceId) -> Vec<InstanceId> {
        let Some(root) = self.instances.get(&id) else {
            return Vec::new();
        };

        let mut seen = HashSet::from([id]);
        let mut order = vec![id];
        let mut queue: VecDeque<&Instance> = VecDeque::from([root]);

        while let Some(current) = queue.pop_front() {
            for target in current.forward_refs() {
                if !seen.insert(target) {
                    continue;
                }
                if let Some(next) = self.instances.get(&target) {
                    order.push(target);
                    queue.push_back(next);
                }
            }
        }
        order
    }

    fn referenced_by(&self, id: InstanceId) -> Vec<InstanceId> {
        self.inverse_index.referenced_by(id).collect()
    }

    fn accessors(&self, relationship: &str) -> Option<&RelationshipAccessors> {
        self.registry.accessors(relationship)
    }
}
