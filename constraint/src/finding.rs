//! Validation findings.

use bimv_core::{Edge, InstanceRef, Value};
use serde::Serialize;

/// A single validation finding.
///
/// Findings carry detached instance descriptions so they outlive the
/// evaluation pass that produced them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    /// An edge of a face set was referenced an unexpected number of times.
    EdgeUsage {
        instance: InstanceRef,
        edge: Edge,
        count: usize,
    },
    /// Several instances share a value for an attribute that must be unique.
    DuplicateValue {
        owner: Option<InstanceRef>,
        attribute: String,
        values: Vec<Value>,
        instances: Vec<InstanceRef>,
    },
    /// The number of instances of a type violates a count constraint.
    InstanceCount {
        type_name: String,
        instances: Vec<InstanceRef>,
    },
    /// An instance is assigned to a container of the wrong type.
    StructuralAssignment {
        related: InstanceRef,
        relating: InstanceRef,
    },
    /// An element is not placed relative to its container's placement.
    PlacementMismatch {
        entity: InstanceRef,
        expected_placement_type: Option<String>,
        container: InstanceRef,
        relationship: InstanceRef,
        container_placement: Option<InstanceRef>,
        entity_placement_rel: Option<InstanceRef>,
    },
}

impl Finding {
    pub fn edge_usage(instance: InstanceRef, edge: Edge, count: usize) -> Self {
        Self::EdgeUsage {
            instance,
            edge,
            count,
        }
    }

    pub fn instance_count(type_name: impl Into<String>, instances: Vec<InstanceRef>) -> Self {
        Self::InstanceCount {
            type_name: type_name.into(),
            instances,
        }
    }

    pub fn structural_assignment(related: InstanceRef, relating: InstanceRef) -> Self {
        Self::StructuralAssignment { related, relating }
    }

    /// Short name of the finding kind, as used in structured records.
    pub fn kind(&self) -> &'static str {
        match self {
            Finding::EdgeUsage { .. } => "edge_usage",
            Finding::DuplicateValue { .. } => "duplicate_value",
            Finding::InstanceCount { .. } => "instance_count",
            Finding::StructuralAssignment { .. } => "structural_assignment",
            Finding::PlacementMismatch { .. } => "placement_mismatch",
        }
    }

    /// The instance the finding is primarily about, if there is one.
    pub fn subject(&self) -> Option<&InstanceRef> {
        match self {
            Finding::EdgeUsage { instance, .. } => Some(instance),
            Finding::DuplicateValue { owner, .. } => owner.as_ref(),
            Finding::InstanceCount { .. } => None,
            Finding::StructuralAssignment { related, .. } => Some(related),
            Finding::PlacementMismatch { entity, .. } => Some(entity),
        }
    }
}

/// Ordered collection of findings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Findings {
    findings: Vec<Finding>,
}

impl Findings {
    /// Create a new empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a finding.
    pub fn push(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    /// Check if there are any findings.
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Get the number of findings.
    pub fn len(&self) -> usize {
        self.findings.len()
    }

    /// Get all findings.
    pub fn all(&self) -> &[Finding] {
        &self.findings
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Finding> {
        self.findings.iter()
    }

    /// Merge another collection, keeping order.
    pub fn merge(&mut self, other: Findings) {
        self.findings.extend(other.findings);
    }
}

impl Extend<Finding> for Findings {
    fn extend<I: IntoIterator<Item = Finding>>(&mut self, iter: I) {
        self.findings.extend(iter);
    }
}

impl FromIterator<Finding> for Findings {
    fn from_iter<I: IntoIterator<Item = Finding>>(iter: I) -> Self {
        Self {
            findings: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Findings {
    type Item = Finding;
    type IntoIter = std::vec::IntoIter<Finding>;

    fn into_iter(self) -> Self::IntoIter {
        self.findings.into_iter()
    }
}

impl<'a> IntoIterator for &'a Findings {
    type Item = &'a Finding;
    type IntoIter = std::slice::Iter<'a, Finding>;

    fn into_iter(self) -> Self::IntoIter {
        self.findings.iter()
    }
}
