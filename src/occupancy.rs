//! Expansion of train stop sequences into per-resource occupation intervals.

use chrono::{Duration, NaiveDateTime};
use indexmap::IndexMap;
use log::debug;
use crate::constants::{ORIGIN_PREPARATION, STABILIZATION_BUFFER, STATION_MARGIN, TERMINAL_CLEARANCE};
use crate::models::{PathCache, RailwayGraph, ResourceKey, Routes, Stop, Train};
use crate::time::normalize;

/// A time interval during which one train holds one resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occupation {
    pub train_id: String,
    pub train_name: String,
    pub entry: NaiveDateTime,
    pub exit: NaiveDateTime,
}

impl Occupation {
    /// Exit time extended by the stabilization buffer. Used only when testing
    /// for overlap, never reported as a conflict end.
    #[must_use]
    pub fn effective_exit(&self) -> NaiveDateTime {
        self.exit + STABILIZATION_BUFFER
    }
}

/// Occupations grouped by resource, in deterministic insertion order
pub type OccupancyMap = IndexMap<ResourceKey, Vec<Occupation>>;

/// Dwell windows synthesized around stops missing a timestamp. Policy, not
/// invariant: relation-driven schedules reserve more platform time before an
/// origin departure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DwellPolicy {
    /// Platform time assumed before a departure-only stop
    pub origin_preparation: Duration,
    /// Platform time assumed after an arrival-only stop
    pub terminal_clearance: Duration,
}

impl Default for DwellPolicy {
    fn default() -> Self {
        Self {
            origin_preparation: STATION_MARGIN,
            terminal_clearance: STATION_MARGIN,
        }
    }
}

impl DwellPolicy {
    /// Dwell windows for schedules re-derived from a train's assigned relation
    #[must_use]
    pub fn relation_driven() -> Self {
        Self {
            origin_preparation: ORIGIN_PREPARATION,
            terminal_clearance: TERMINAL_CLEARANCE,
        }
    }
}

/// Expand every train's stop sequence into station and segment occupations
pub fn build_occupancies(
    graph: &RailwayGraph,
    trains: &[Train],
    cache: &mut PathCache,
) -> OccupancyMap {
    build_occupancies_with_policy(graph, trains, cache, DwellPolicy::default())
}

/// Same as [`build_occupancies`] with an explicit dwell policy
pub fn build_occupancies_with_policy(
    graph: &RailwayGraph,
    trains: &[Train],
    cache: &mut PathCache,
    policy: DwellPolicy,
) -> OccupancyMap {
    let mut occupancies = OccupancyMap::new();

    for train in trains {
        let mut prev: Option<&Stop> = None;
        for stop in &train.stops {
            if let Some(prev_stop) = prev {
                if let (Some(leaves), Some(arrives)) = (prev_stop.leaves_at(), stop.arrives_at()) {
                    record_segment_occupations(
                        graph,
                        cache,
                        train,
                        prev_stop,
                        stop,
                        normalize(leaves),
                        normalize(arrives),
                        &mut occupancies,
                    );
                }
            }
            record_station_occupation(train, stop, policy, &mut occupancies);
            prev = Some(stop);
        }
    }

    occupancies
}

fn record_station_occupation(
    train: &Train,
    stop: &Stop,
    policy: DwellPolicy,
    occupancies: &mut OccupancyMap,
) {
    let (entry, exit) = match (stop.arrival.map(normalize), stop.departure.map(normalize)) {
        (Some(arrival), Some(departure)) => (arrival, departure),
        (None, Some(departure)) => (departure - policy.origin_preparation, departure),
        (Some(arrival), None) => (arrival, arrival + policy.terminal_clearance),
        (None, None) => return,
    };
    let exit = exit.max(entry);

    let occupation = Occupation {
        train_id: train.id.clone(),
        train_name: train.name.clone(),
        entry,
        exit,
    };

    occupancies
        .entry(ResourceKey::station_track(&stop.station, stop.track_or_default()))
        .or_default()
        .push(occupation.clone());
    occupancies
        .entry(ResourceKey::station(&stop.station))
        .or_default()
        .push(occupation);
}

/// Walk the physical edge sequence between two consecutive stops, spreading
/// the elapsed time across edges in proportion to their distance
#[allow(
    clippy::too_many_arguments,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
fn record_segment_occupations(
    graph: &RailwayGraph,
    cache: &mut PathCache,
    train: &Train,
    from: &Stop,
    to: &Stop,
    leaves: NaiveDateTime,
    arrives: NaiveDateTime,
    occupancies: &mut OccupancyMap,
) {
    let edges = match graph.path_edges_cached(&from.station, &to.station, cache) {
        Ok(edges) => edges,
        Err(err) => {
            // Recoverable: the leg contributes no segment occupancy
            debug!("skipping segment occupancy for {}: {err}", train.id);
            return;
        }
    };

    let total_distance: f64 = edges
        .iter()
        .filter_map(|&edge| graph.track(edge))
        .map(|segment| segment.distance)
        .sum();
    let elapsed_secs = (arrives - leaves).num_seconds();

    // Degenerate legs collapse every edge to the boundary instant
    let average_speed = if total_distance > 0.0 && elapsed_secs > 0 {
        total_distance / elapsed_secs as f64
    } else {
        0.0
    };

    let mut clock = leaves;
    for &edge in &edges {
        let Some(segment) = graph.track(edge) else {
            continue;
        };
        let transit = if average_speed > 0.0 {
            Duration::milliseconds((segment.distance / average_speed * 1000.0) as i64)
        } else {
            Duration::zero()
        };
        occupancies
            .entry(ResourceKey::segment(&segment.from, &segment.to))
            .or_default()
            .push(Occupation {
                train_id: train.id.clone(),
                train_name: train.name.clone(),
                entry: normalize(clock),
                exit: normalize(clock + transit),
            });
        clock += transit;
    }
}
