//! Indexes for efficient model lookups.
//!
//! Both indexes keep ordered sets so every lookup returns instances in id
//! order, which keeps validation output stable across runs.

use bimv_core::{InstanceId, TypeId};
use std::collections::{BTreeSet, HashMap};

/// Type index: TypeId -> Set<InstanceId> (exact type only)
#[derive(Debug, Default)]
pub struct TypeIndex {
    index: HashMap<TypeId, BTreeSet<InstanceId>>,
}

impl TypeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, type_id: TypeId, id: InstanceId) {
        self.index.entry(type_id).or_default().insert(id);
    }

    pub fn get(&self, type_id: TypeId) -> impl Iterator<Item = InstanceId> + '_ {
        self.index
            .get(&type_id)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }
}

/// Inverse reference index: referenced InstanceId -> Set<referencing InstanceId>
#[derive(Debug, Default)]
pub struct InverseIndex {
    index: HashMap<InstanceId, BTreeSet<InstanceId>>,
}

impl InverseIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, referenced: InstanceId, by: InstanceId) {
        self.index.entry(referenced).or_default().insert(by);
    }

    pub fn remove(&mut self, referenced: InstanceId, by: InstanceId) {
        if let Some(set) = self.index.get_mut(&referenced) {
            set.remove(&by);
            if set.is_empty() {
                self.index.remove(&referenced);
            }
        }
    }

    /// Instances holding a reference to `referenced`.
    pub fn referenced_by(&self, referenced: InstanceId) -> impl Iterator<Item = InstanceId> + '_ {
        self.index
            .get(&referenced)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }
}
