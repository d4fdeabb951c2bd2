//! Edge usage counting.

use crate::decode::decode_edges;
use crate::error::MeshResult;
use bimv_constraint::{Finding, Findings};
use bimv_core::{Edge, InstanceId, OrientationMode};
use bimv_graph::Model;
use std::collections::HashMap;
use tracing::debug;

/// Occurrence count per edge, iterated in first-occurrence order.
#[derive(Debug, Clone, Default)]
pub struct EdgeMultiset {
    order: Vec<Edge>,
    counts: HashMap<Edge, usize>,
}

impl EdgeMultiset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, edge: Edge) {
        let count = self.counts.entry(edge).or_insert(0);
        if *count == 0 {
            self.order.push(edge);
        }
        *count += 1;
    }

    /// Number of times `edge` was inserted.
    pub fn count(&self, edge: &Edge) -> usize {
        self.counts.get(edge).copied().unwrap_or(0)
    }

    /// Number of distinct edges.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Distinct edges with their counts.
    pub fn iter(&self) -> impl Iterator<Item = (Edge, usize)> + '_ {
        self.order.iter().map(|edge| (*edge, self.count(edge)))
    }
}

impl FromIterator<Edge> for EdgeMultiset {
    fn from_iter<I: IntoIterator<Item = Edge>>(iter: I) -> Self {
        let mut set = EdgeMultiset::new();
        for edge in iter {
            set.insert(edge);
        }
        set
    }
}

/// Report every edge of every instance that is not used exactly `expected`
/// times by the faces of that instance.
pub fn check_edge_usage(
    model: &dyn Model,
    instances: &[InstanceId],
    expected: usize,
    mode: OrientationMode,
) -> MeshResult<Findings> {
    let mut findings = Findings::new();

    for &instance in instances {
        let usage: EdgeMultiset = decode_edges(model, instance, mode)?.into_iter().collect();
        let before = findings.len();
        let described = model.describe(instance);

        findings.extend(
            usage
                .iter()
                .filter(|&(_, count)| count != expected)
                .map(|(edge, count)| Finding::edge_usage(described.clone(), edge, count)),
        );
        debug!(
            %instance,
            edges = usage.len(),
            findings = findings.len() - before,
            "checked edge usage"
        );
    }
    Ok(findings)
}
