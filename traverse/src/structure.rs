//! Structural assignment checks.

use crate::error::TraverseResult;
use crate::traversal::accessors;
use bimv_constraint::{Finding, Findings};
use bimv_graph::Model;
use serde::Deserialize;
use tracing::debug;

/// Whether instances of a type exist in the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    Present,
    Absent,
}

/// Gate on the presence or absence of instances of a type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PresenceCondition {
    pub entity: String,
    pub presence: Presence,
}

impl PresenceCondition {
    pub fn holds(&self, model: &dyn Model) -> bool {
        let present = !model.by_type(&self.entity).is_empty();
        match self.presence {
            Presence::Present => present,
            Presence::Absent => !present,
        }
    }
}

/// Every `related` instance must be assigned through `relationship` to
/// instances of type `relating` only.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Assignment {
    pub related: String,
    pub relating: String,
    pub relationship: String,
    #[serde(default)]
    pub condition: Option<PresenceCondition>,
}

/// Report every assignment of a `related` instance to a relating instance
/// of the wrong type.
pub fn check_structural_assignment(
    model: &dyn Model,
    assignment: &Assignment,
) -> TraverseResult<Findings> {
    let table = accessors(model, &assignment.relationship)?;
    let mut findings = Findings::new();

    if let Some(condition) = &assignment.condition {
        if !condition.holds(model) {
            debug!(entity = %condition.entity, "assignment condition not met");
            return Ok(findings);
        }
    }

    for instance in model.by_type(&assignment.related) {
        let relationships = model
            .referenced_by(instance)
            .into_iter()
            .filter(|&rel| model.is_a(rel, &assignment.relationship))
            .filter(|&rel| {
                model
                    .get_attribute(rel, &table.related)
                    .is_some_and(|value| value.refs().contains(&instance))
            });

        for rel in relationships {
            let relating = model
                .get_attribute(rel, &table.relating)
                .map(|value| value.refs())
                .unwrap_or_default();
            for container in relating {
                if !model.is_a(container, &assignment.relating) {
                    findings.push(Finding::structural_assignment(
                        model.describe(instance),
                        model.describe(container),
                    ));
                }
            }
        }
    }

    debug!(
        related = %assignment.related,
        relating = %assignment.relating,
        findings = findings.len(),
        "checked structural assignment"
    );
    Ok(findings)
}
