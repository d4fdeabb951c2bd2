//! Text and structured rendering of findings.

use crate::finding::Finding;
use serde_json::{Map, Value as JsonValue};
use std::borrow::Cow;
use std::fmt;

/// Rendered items longer than this are shortened.
pub const ELIDE_THRESHOLD: usize = 35;
const ELIDE_HEAD: usize = 25;
const ELIDE_TAIL: usize = 7;

/// Shorten `text` to its first 25 and last 7 characters when it is
/// longer than 35 characters.
pub fn elide(text: &str) -> Cow<'_, str> {
    let count = text.chars().count();
    if count <= ELIDE_THRESHOLD {
        return Cow::Borrowed(text);
    }
    let head: String = text.chars().take(ELIDE_HEAD).collect();
    let tail: String = text.chars().skip(count - ELIDE_TAIL).collect();
    Cow::Owned(format!("{}...{}", head, tail))
}

fn item(x: &impl fmt::Display) -> String {
    elide(&x.to_string()).into_owned()
}

fn optional(x: &Option<impl fmt::Display>) -> String {
    match x {
        Some(x) => item(x),
        None => "None".to_string(),
    }
}

fn join<T: fmt::Display>(items: &[T], separator: &str) -> String {
    items.iter().map(item).collect::<Vec<_>>().join(separator)
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::EdgeUsage {
                instance,
                edge,
                count,
            } => write!(
                f,
                "On instance {} the edge {} was referenced {} times",
                item(instance),
                edge,
                count
            ),
            Finding::DuplicateValue {
                owner,
                attribute,
                values,
                instances,
            } => {
                match owner {
                    Some(owner) => write!(f, "Instance {} has duplicate", item(owner))?,
                    None => write!(f, "Duplicate")?,
                }
                write!(
                    f,
                    " values for attribute {}: {} at instances {}",
                    attribute,
                    join(values, ", "),
                    join(instances, ";")
                )
            }
            Finding::InstanceCount {
                type_name,
                instances,
            } => {
                if instances.is_empty() {
                    write!(f, "No instances of type {} were encountered", type_name)
                } else {
                    write!(
                        f,
                        "The following {} instances of type {} were encountered: {}",
                        instances.len(),
                        type_name,
                        join(instances, ";")
                    )
                }
            }
            Finding::StructuralAssignment { related, relating } => write!(
                f,
                "The instance {} is assigned to {}",
                item(related),
                item(relating)
            ),
            Finding::PlacementMismatch {
                entity,
                expected_placement_type,
                container,
                relationship,
                container_placement,
                entity_placement_rel,
            } => {
                write!(f, "The ")?;
                if let Some(placement_type) = expected_placement_type {
                    write!(f, "{} ", placement_type)?;
                }
                write!(
                    f,
                    "placement of {} is relative to {} instead of {} of its container {} (through {})",
                    item(entity),
                    optional(entity_placement_rel),
                    optional(container_placement),
                    item(container),
                    item(relationship)
                )
            }
        }
    }
}

impl Finding {
    /// Structured record: the tagged variant fields plus the rendered
    /// message and the identity of the primary instance.
    pub fn to_record(&self) -> serde_json::Result<JsonValue> {
        let mut record = match serde_json::to_value(self)? {
            JsonValue::Object(map) => map,
            _ => Map::new(),
        };
        record.insert("message".into(), JsonValue::String(self.to_string()));
        if let Some(subject) = self.subject() {
            record.insert(
                "inst_guid".into(),
                subject
                    .global_id
                    .clone()
                    .map_or(JsonValue::Null, JsonValue::String),
            );
            record.insert(
                "inst_type".into(),
                JsonValue::String(subject.type_name.clone()),
            );
            record.insert("inst_id".into(), JsonValue::from(subject.id.raw()));
        }
        Ok(JsonValue::Object(record))
    }
}
