//! Per-resource capacity derivation from topology and explicit overrides.

use indexmap::IndexMap;
use petgraph::visit::EdgeRef;
use crate::models::{RailwayGraph, ResourceKey, TrackSegment};

/// Build the capacity table for one detection run.
///
/// Station-global capacity is the node's platform count. Segment capacity is
/// derived from the group of all edges between the same unordered station
/// pair; an explicit override on any grouped edge wins outright.
/// Station-track resources are not entered: a physical platform holds one
/// train regardless of the station's platform count, which the default
/// lookup already encodes.
#[must_use]
pub fn build_capacity_table(graph: &RailwayGraph) -> IndexMap<ResourceKey, u32> {
    let mut capacities = IndexMap::new();

    for node_idx in graph.graph.node_indices() {
        if let Some(node) = graph.node(node_idx) {
            capacities.insert(ResourceKey::station(node.id.clone()), node.platform_count());
        }
    }

    let mut groups: IndexMap<ResourceKey, Vec<&TrackSegment>> = IndexMap::new();
    for edge in graph.graph.edge_references() {
        let segment = edge.weight();
        groups
            .entry(ResourceKey::segment(&segment.from, &segment.to))
            .or_default()
            .push(segment);
    }

    for (key, segments) in groups {
        capacities.insert(key, segment_group_capacity(&segments));
    }

    capacities
}

/// Capacity used for a resource, defaulting to 1 when the table has no entry
#[must_use]
pub fn capacity_for(table: &IndexMap<ResourceKey, u32>, key: &ResourceKey) -> u32 {
    table.get(key).copied().unwrap_or(1)
}

#[allow(clippy::cast_possible_truncation)]
fn segment_group_capacity(segments: &[&TrackSegment]) -> u32 {
    let base = if segments.iter().any(|s| s.is_double_capacity()) {
        2
    } else {
        1
    };
    // Two directions share each pair of parallel tracks
    let capacity = if segments.len() > 2 {
        base.max(segments.len() as u32 / 2)
    } else {
        base
    };
    segments
        .iter()
        .find_map(|s| s.capacity.filter(|&c| c > 0))
        .unwrap_or(capacity)
}
