//! Duplicate attribute value detection.

use crate::finding::{Finding, Findings};
use crate::scope::ScopeChain;
use bimv_core::{InstanceId, InstanceRef, Value};
use bimv_graph::Model;
use ordered_float::OrderedFloat;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::trace;

/// What to do with instances that lack the checked attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingValuePolicy {
    /// Each missing value is distinct from every other value.
    #[default]
    Distinct,
    /// Instances without a value take no part in the check.
    Skip,
}

/// Grouping key for attribute values.
///
/// Floats compare by total order. `Missing` carries the entry position so
/// no two missing values are ever equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum ValueKey {
    Null,
    Bool(bool),
    Int(i64),
    Float(OrderedFloat<f64>),
    String(String),
    Enum(String),
    Ref(InstanceId),
    List(Vec<ValueKey>),
    Missing(usize),
}

impl ValueKey {
    fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => ValueKey::Null,
            Value::Bool(b) => ValueKey::Bool(*b),
            Value::Int(i) => ValueKey::Int(*i),
            Value::Float(f) => ValueKey::Float(OrderedFloat(*f)),
            Value::String(s) => ValueKey::String(s.clone()),
            Value::Enum(s) => ValueKey::Enum(s.clone()),
            Value::Ref(id) => ValueKey::Ref(*id),
            Value::List(items) => ValueKey::List(items.iter().map(ValueKey::from_value).collect()),
        }
    }
}

/// Report the values of `attribute` shared by more than one entry.
///
/// Duplicated values are listed once each in first-occurrence order; every
/// entry holding one of them is listed in input order.
pub fn check_unique<I>(
    owner: Option<InstanceRef>,
    attribute: &str,
    entries: I,
    policy: MissingValuePolicy,
) -> Option<Finding>
where
    I: IntoIterator<Item = (InstanceRef, Option<Value>)>,
{
    let mut keyed: Vec<(InstanceRef, ValueKey, Option<Value>)> = Vec::new();
    for (position, (instance, value)) in entries.into_iter().enumerate() {
        let key = match (&value, policy) {
            (Some(v), _) => ValueKey::from_value(v),
            (None, MissingValuePolicy::Distinct) => ValueKey::Missing(position),
            (None, MissingValuePolicy::Skip) => continue,
        };
        keyed.push((instance, key, value));
    }

    let mut counts: HashMap<&ValueKey, usize> = HashMap::new();
    for (_, key, _) in &keyed {
        *counts.entry(key).or_insert(0) += 1;
    }
    let duplicated = |key: &ValueKey| counts.get(key).is_some_and(|&n| n > 1);

    let mut values: Vec<Value> = Vec::new();
    let mut listed: Vec<&ValueKey> = Vec::new();
    let mut instances: Vec<InstanceRef> = Vec::new();
    for (instance, key, value) in &keyed {
        if !duplicated(key) {
            continue;
        }
        if !listed.contains(&key) {
            listed.push(key);
            if let Some(value) = value {
                values.push(value.clone());
            }
        }
        instances.push(instance.clone());
    }

    if instances.is_empty() {
        return None;
    }
    trace!(attribute, duplicates = values.len(), "duplicate values");
    Some(Finding::DuplicateValue {
        owner,
        attribute: attribute.to_string(),
        values,
        instances,
    })
}

fn read_entries(
    model: &dyn Model,
    instances: &[InstanceId],
    attribute: &str,
) -> Vec<(InstanceRef, Option<Value>)> {
    instances
        .iter()
        .map(|&id| (model.describe(id), model.get_attribute(id, attribute).cloned()))
        .collect()
}

/// Check `attribute` across a flat instance list. Findings are attributed
/// to the current owner of `scope`, if any.
pub fn unique_across(
    model: &dyn Model,
    instances: &[InstanceId],
    attribute: &str,
    scope: Option<&ScopeChain>,
    policy: MissingValuePolicy,
) -> Option<Finding> {
    let owner = scope
        .and_then(ScopeChain::current_owner)
        .map(|id| model.describe(id));
    check_unique(owner, attribute, read_entries(model, instances, attribute), policy)
}

/// For every `(owner, value)` pair of the top scope, check `attribute`
/// among the instances the value references, attributed to that owner.
pub fn unique_in_scope(
    model: &dyn Model,
    scope: &ScopeChain,
    attribute: &str,
    policy: MissingValuePolicy,
) -> Findings {
    scope
        .entries()
        .iter()
        .filter_map(|entry| {
            let members = entry.value.refs();
            check_unique(
                Some(model.describe(entry.owner)),
                attribute,
                read_entries(model, &members, attribute),
                policy,
            )
        })
        .collect()
}

/// For every instance, check `attribute` among the instances referenced by
/// its `member_attribute`, attributed to the instance.
pub fn unique_among_members(
    model: &dyn Model,
    instances: &[InstanceId],
    member_attribute: &str,
    attribute: &str,
    policy: MissingValuePolicy,
) -> Findings {
    instances
        .iter()
        .filter_map(|&id| {
            let members = model
                .get_attribute(id, member_attribute)
                .map(Value::refs)
                .unwrap_or_default();
            check_unique(
                Some(model.describe(id)),
                attribute,
                read_entries(model, &members, attribute),
                policy,
            )
        })
        .collect()
}
