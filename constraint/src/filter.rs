//! Attribute filters over instance sets.

use crate::error::{ConstraintError, ConstraintResult};
use bimv_core::{InstanceId, Value};
use bimv_graph::Model;
use regex_lite::Regex;
use serde::Deserialize;
use tracing::trace;

/// Predicate on a single attribute value. An absent attribute never
/// satisfies a predicate.
#[derive(Debug, Clone)]
pub enum AttrPredicate {
    Equals(Value),
    NotEquals(Value),
    /// String or enumeration values matching the pattern.
    Matches(Regex),
    Present,
}

impl AttrPredicate {
    /// Compile a pattern predicate.
    pub fn matches(pattern: &str) -> ConstraintResult<Self> {
        Regex::new(pattern)
            .map(AttrPredicate::Matches)
            .map_err(|e| ConstraintError::invalid_pattern(pattern, e.to_string()))
    }

    /// Evaluate against an attribute value.
    pub fn test(&self, value: Option<&Value>) -> bool {
        let Some(value) = value else {
            return false;
        };
        match self {
            AttrPredicate::Equals(expected) => value == expected,
            AttrPredicate::NotEquals(expected) => value != expected,
            AttrPredicate::Matches(re) => value.as_str().is_some_and(|s| re.is_match(s)),
            AttrPredicate::Present => true,
        }
    }
}

/// Retain the instances whose `attribute` satisfies `predicate`.
pub fn filter_by_attribute(
    model: &dyn Model,
    instances: &[InstanceId],
    attribute: &str,
    predicate: &AttrPredicate,
) -> Vec<InstanceId> {
    let kept: Vec<InstanceId> = instances
        .iter()
        .copied()
        .filter(|&id| predicate.test(model.get_attribute(id, attribute)))
        .collect();
    trace!(attribute, before = instances.len(), after = kept.len(), "filtered by attribute");
    kept
}

/// Lower bound on the number of members of a collection attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountConstraint {
    AtLeast,
    MoreThan,
}

impl CountConstraint {
    pub fn holds(self, actual: usize, bound: usize) -> bool {
        match self {
            CountConstraint::AtLeast => actual >= bound,
            CountConstraint::MoreThan => actual > bound,
        }
    }
}

/// Retain the instances whose collection `attribute` has a member count
/// satisfying `constraint` against `bound`. An absent attribute counts as
/// empty.
pub fn filter_by_member_count(
    model: &dyn Model,
    instances: &[InstanceId],
    attribute: &str,
    constraint: CountConstraint,
    bound: usize,
) -> Vec<InstanceId> {
    let kept: Vec<InstanceId> = instances
        .iter()
        .copied()
        .filter(|&id| {
            let count = model.get_attribute(id, attribute).map_or(0, Value::len);
            constraint.holds(count, bound)
        })
        .collect();
    trace!(attribute, before = instances.len(), after = kept.len(), "filtered by member count");
    kept
}
