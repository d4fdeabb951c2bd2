//! Instance count checks.

use crate::finding::Finding;
use bimv_graph::Model;
use serde::Deserialize;
use tracing::trace;

/// Bound on the number of instances of a type in the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstanceBound {
    AtLeast,
    AtMost,
}

impl InstanceBound {
    pub fn holds(self, actual: usize, bound: usize) -> bool {
        match self {
            InstanceBound::AtLeast => actual >= bound,
            InstanceBound::AtMost => actual <= bound,
        }
    }
}

/// Count the instances of `type_name` and report them all when the count
/// violates the bound.
pub fn check_instance_count(
    model: &dyn Model,
    type_name: &str,
    constraint: InstanceBound,
    bound: usize,
) -> Option<Finding> {
    let instances = model.by_type(type_name);
    trace!(type_name, count = instances.len(), ?constraint, bound, "instance count");
    if constraint.holds(instances.len(), bound) {
        return None;
    }
    let described = instances.iter().map(|&id| model.describe(id)).collect();
    Some(Finding::instance_count(type_name, described))
}
