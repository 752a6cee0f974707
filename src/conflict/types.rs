//! Core types for conflict detection.

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use crate::models::{RailwayGraph, ResourceKey, ResourceKind};

/// Where a conflict happened, resolved for display
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConflictLocation {
    pub kind: ResourceKind,
    pub resource: ResourceKey,
    pub name: String,
}

impl ConflictLocation {
    /// Resolve a resource key to its display location using the graph's
    /// station names
    #[must_use]
    pub fn resolve(resource: &ResourceKey, graph: &RailwayGraph) -> Self {
        let name = match resource {
            ResourceKey::StationTrack { station, track } => {
                format!("{} track {track}", graph.station_display_name(station))
            }
            ResourceKey::Station { station } => graph.station_display_name(station),
            ResourceKey::Segment { a, b } => format!(
                "{} - {}",
                graph.station_display_name(a),
                graph.station_display_name(b)
            ),
        };
        Self {
            kind: resource.kind(),
            resource: resource.clone(),
            name,
        }
    }
}

/// One reported capacity violation between two trains.
///
/// Identity is (unordered train pair, resource, start); which train lands in
/// the `a` fields is irrelevant for equality, hashing and deduplication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConflict {
    pub train_a_id: String,
    pub train_a_name: String,
    pub train_b_id: String,
    pub train_b_name: String,
    pub location: ConflictLocation,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl ScheduleConflict {
    /// Train-id pair in canonical order
    #[must_use]
    pub fn pair_key(&self) -> (&str, &str) {
        if self.train_a_id <= self.train_b_id {
            (&self.train_a_id, &self.train_b_id)
        } else {
            (&self.train_b_id, &self.train_a_id)
        }
    }

    #[must_use]
    pub fn involves(&self, train_id: &str) -> bool {
        self.train_a_id == train_id || self.train_b_id == train_id
    }

    /// Human-readable one-line description
    #[must_use]
    pub fn format_message(&self) -> String {
        match self.location.kind {
            ResourceKind::Station => format!(
                "{} conflicts with {} at {}",
                self.train_a_name, self.train_b_name, self.location.name
            ),
            ResourceKind::Track => format!(
                "{} conflicts with {} between {}",
                self.train_a_name, self.train_b_name, self.location.name
            ),
        }
    }
}

impl PartialEq for ScheduleConflict {
    fn eq(&self, other: &Self) -> bool {
        self.pair_key() == other.pair_key()
            && self.location.resource == other.location.resource
            && self.start == other.start
    }
}

impl Eq for ScheduleConflict {}

impl Hash for ScheduleConflict {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pair_key().hash(state);
        self.location.resource.hash(state);
        self.start.hash(state);
    }
}

/// One atomic detection result: the deduplicated conflict list and the
/// capacity value used for every resource in this run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConflictReport {
    pub conflicts: Vec<ScheduleConflict>,
    pub capacities: IndexMap<ResourceKey, u32>,
    /// Monotonic run counter so callers can discard superseded results
    pub generation: u64,
}
