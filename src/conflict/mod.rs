//! Conflict detection pipeline: capacity table, occupancy expansion,
//! per-resource sweep, incident grouping.

mod grouping;
mod sweep;
mod types;

pub use types::{ConflictLocation, ConflictReport, ScheduleConflict};

use log::debug;
use crate::capacity::{build_capacity_table, capacity_for};
use crate::models::{PathCache, RailwayGraph, Train};
use crate::occupancy::{build_occupancies_with_policy, DwellPolicy};

/// Run one detection pass over an immutable snapshot of the network and train
/// list.
///
/// Pure and synchronous: inputs are never mutated, every derived structure is
/// rebuilt from scratch, and the returned report replaces any previous one
/// wholesale. The only state crossing invocations is the caller-owned path
/// cache.
#[must_use]
pub fn detect_conflicts(
    graph: &RailwayGraph,
    trains: &[Train],
    cache: &mut PathCache,
) -> ConflictReport {
    detect_conflicts_with_policy(graph, trains, cache, DwellPolicy::default())
}

/// Same as [`detect_conflicts`] with an explicit dwell policy
#[must_use]
pub fn detect_conflicts_with_policy(
    graph: &RailwayGraph,
    trains: &[Train],
    cache: &mut PathCache,
    policy: DwellPolicy,
) -> ConflictReport {
    let capacities = build_capacity_table(graph);
    let occupancies = build_occupancies_with_policy(graph, trains, cache, policy);

    let mut raw = Vec::new();
    for (resource, occupations) in &occupancies {
        let capacity = capacity_for(&capacities, resource);
        let resource_conflicts = sweep::sweep_resource(occupations, capacity);
        if resource_conflicts.is_empty() {
            continue;
        }
        let location = ConflictLocation::resolve(resource, graph);
        for conflict in resource_conflicts {
            raw.push(ScheduleConflict {
                train_a_id: conflict.train_a_id,
                train_a_name: conflict.train_a_name,
                train_b_id: conflict.train_b_id,
                train_b_name: conflict.train_b_name,
                location: location.clone(),
                start: conflict.start,
                end: conflict.end,
            });
        }
    }

    let conflicts = grouping::group_incidents(grouping::dedup_conflicts(raw));
    debug!(
        "detection pass: {} trains, {} resources, {} conflicts",
        trains.len(),
        capacities.len(),
        conflicts.len()
    );

    ConflictReport {
        conflicts,
        capacities,
        generation: 0,
    }
}
