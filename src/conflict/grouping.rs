//! Incident grouping: collapse chains of segment conflicts between the same
//! trains into one reportable incident.

use std::collections::HashSet;
use crate::constants::{BASE_MIDNIGHT, INCIDENT_WINDOW_MINUTES};
use crate::models::ResourceKind;
use super::types::ScheduleConflict;

/// Drop exact duplicate detections, keeping the first occurrence. Identity is
/// the conflict's order-independent (pair, resource, start) key.
pub(super) fn dedup_conflicts(conflicts: Vec<ScheduleConflict>) -> Vec<ScheduleConflict> {
    let mut seen = HashSet::new();
    conflicts
        .into_iter()
        .filter(|conflict| seen.insert(conflict.clone()))
        .collect()
}

/// Collapse segment conflicts between the same train pair within the same
/// time bucket into the first one seen. Station conflicts are never
/// collapsed; each platform collision matters independently.
pub(super) fn group_incidents(conflicts: Vec<ScheduleConflict>) -> Vec<ScheduleConflict> {
    let mut seen: HashSet<(String, String, i64)> = HashSet::new();
    let mut grouped = Vec::with_capacity(conflicts.len());

    for conflict in conflicts {
        if conflict.location.kind == ResourceKind::Station {
            grouped.push(conflict);
            continue;
        }
        let bucket =
            (conflict.start - BASE_MIDNIGHT).num_minutes() / INCIDENT_WINDOW_MINUTES;
        let (a, b) = conflict.pair_key();
        if seen.insert((a.to_string(), b.to_string(), bucket)) {
            grouped.push(conflict);
        }
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::BASE_DATE;
    use crate::conflict::types::ConflictLocation;
    use crate::models::ResourceKey;

    fn segment_conflict(a: &str, b: &str, start_min: u32, resource: ResourceKey) -> ScheduleConflict {
        ScheduleConflict {
            train_a_id: a.to_string(),
            train_a_name: a.to_uppercase(),
            train_b_id: b.to_string(),
            train_b_name: b.to_uppercase(),
            location: ConflictLocation {
                kind: resource.kind(),
                resource,
                name: "somewhere".to_string(),
            },
            start: BASE_DATE
                .and_hms_opt(8 + start_min / 60, start_min % 60, 0)
                .expect("valid time"),
            end: BASE_DATE
                .and_hms_opt(8 + start_min / 60, (start_min % 60) + 1, 0)
                .expect("valid time"),
        }
    }

    #[test]
    fn test_chain_of_segments_collapses_to_one() {
        let conflicts = vec![
            segment_conflict("t1", "t2", 0, ResourceKey::segment("a", "b")),
            segment_conflict("t1", "t2", 5, ResourceKey::segment("b", "c")),
            segment_conflict("t1", "t2", 10, ResourceKey::segment("c", "d")),
        ];
        let grouped = group_incidents(conflicts);
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[0].location.resource, ResourceKey::segment("a", "b"));
    }

    #[test]
    fn test_pair_key_order_does_not_split_incidents() {
        let conflicts = vec![
            segment_conflict("t1", "t2", 0, ResourceKey::segment("a", "b")),
            segment_conflict("t2", "t1", 5, ResourceKey::segment("b", "c")),
        ];
        assert_eq!(group_incidents(conflicts).len(), 1);
    }

    #[test]
    fn test_distinct_buckets_stay_separate() {
        let conflicts = vec![
            segment_conflict("t1", "t2", 0, ResourceKey::segment("a", "b")),
            segment_conflict("t1", "t2", 45, ResourceKey::segment("b", "c")),
        ];
        assert_eq!(group_incidents(conflicts).len(), 2);
    }

    #[test]
    fn test_distinct_pairs_stay_separate() {
        let conflicts = vec![
            segment_conflict("t1", "t2", 0, ResourceKey::segment("a", "b")),
            segment_conflict("t1", "t3", 0, ResourceKey::segment("a", "b")),
        ];
        assert_eq!(group_incidents(conflicts).len(), 2);
    }

    #[test]
    fn test_station_conflicts_never_collapse() {
        let conflicts = vec![
            segment_conflict("t1", "t2", 0, ResourceKey::station("a")),
            segment_conflict("t1", "t2", 1, ResourceKey::station_track("a", "1")),
            segment_conflict("t1", "t2", 2, ResourceKey::station("b")),
        ];
        assert_eq!(group_incidents(conflicts).len(), 3);
    }

    #[test]
    fn test_dedup_drops_identical_detections() {
        let conflicts = vec![
            segment_conflict("t1", "t2", 0, ResourceKey::segment("a", "b")),
            segment_conflict("t2", "t1", 0, ResourceKey::segment("a", "b")),
        ];
        assert_eq!(dedup_conflicts(conflicts).len(), 1);
    }
}
