//! Placement consistency between contained elements and their containers.

use crate::error::TraverseResult;
use crate::traversal::accessors;
use bimv_constraint::{Finding, Findings};
use bimv_core::InstanceId;
use bimv_graph::Model;
use serde::Deserialize;
use tracing::debug;

const OBJECT_PLACEMENT: &str = "ObjectPlacement";
const PLACEMENT_REL_TO: &str = "PlacementRelTo";

/// Elements of type `entity` related through `relationship` must be placed
/// relative to their container's placement.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlacementCheck {
    pub entity: String,
    pub relationship: String,
    /// Only placements of this type are checked.
    #[serde(default)]
    pub expected_placement_type: Option<String>,
}

fn reference(model: &dyn Model, id: InstanceId, attribute: &str) -> Option<InstanceId> {
    model.get_attribute(id, attribute).and_then(|v| v.as_ref_id())
}

/// Report every related element whose placement is not relative to the
/// placement of the relating container.
pub fn check_placement(model: &dyn Model, check: &PlacementCheck) -> TraverseResult<Findings> {
    let table = accessors(model, &check.relationship)?;
    let mut findings = Findings::new();

    for rel in model.by_type(&check.relationship) {
        let Some(container) = reference(model, rel, &table.relating) else {
            continue;
        };
        let container_placement = reference(model, container, OBJECT_PLACEMENT);
        let elements = model
            .get_attribute(rel, &table.related)
            .map(|v| v.refs())
            .unwrap_or_default();

        for element in elements {
            if !model.is_a(element, &check.entity) {
                continue;
            }
            let Some(placement) = reference(model, element, OBJECT_PLACEMENT) else {
                continue;
            };
            if let Some(placement_type) = &check.expected_placement_type {
                if !model.is_a(placement, placement_type) {
                    continue;
                }
            }

            let relative_to = reference(model, placement, PLACEMENT_REL_TO);
            if relative_to != container_placement {
                findings.push(Finding::PlacementMismatch {
                    entity: model.describe(element),
                    expected_placement_type: check.expected_placement_type.clone(),
                    container: model.describe(container),
                    relationship: model.describe(rel),
                    container_placement: container_placement.map(|p| model.describe(p)),
                    entity_placement_rel: relative_to.map(|p| model.describe(p)),
                });
            }
        }
    }

    debug!(
        entity = %check.entity,
        relationship = %check.relationship,
        findings = findings.len(),
        "checked placement"
    );
    Ok(findings)
}
