//! Per-resource sweep line over occupation intervals.

use chrono::NaiveDateTime;
use std::collections::HashSet;
use crate::occupancy::Occupation;

/// Entry sorts before Exit so that an occupant arriving exactly when another
/// leaves still counts as overlapping. Deliberately conservative; borderline
/// scenarios are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum EventKind {
    Entry,
    Exit,
}

/// One pairwise capacity violation on a single resource
#[derive(Debug, Clone)]
pub(super) struct ResourceConflict {
    pub train_a_id: String,
    pub train_a_name: String,
    pub train_b_id: String,
    pub train_b_name: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Sweep one resource's occupations and emit every pairwise violation of its
/// capacity.
///
/// Whenever an entering train pushes the active set over capacity, every pair
/// of trains in the set is in violation; each pair yields one record. Pair
/// windows depend only on the two occupations, so re-detections of the same
/// pair at later entry events collapse onto the first record. Overlap is
/// decided against buffered exits; the reported window is clamped to the raw
/// occupation times.
#[allow(clippy::cast_possible_truncation)]
pub(super) fn sweep_resource(occupations: &[Occupation], capacity: u32) -> Vec<ResourceConflict> {
    let capacity = capacity as usize;
    if occupations.len() <= capacity {
        return Vec::new();
    }

    let mut events: Vec<(NaiveDateTime, EventKind, usize)> =
        Vec::with_capacity(occupations.len() * 2);
    for (idx, occupation) in occupations.iter().enumerate() {
        events.push((occupation.entry, EventKind::Entry, idx));
        events.push((occupation.effective_exit(), EventKind::Exit, idx));
    }
    events.sort();

    // Active occupations, one per train id; Vec keeps scan order deterministic
    let mut active: Vec<usize> = Vec::new();
    let mut emitted: HashSet<(usize, usize)> = HashSet::new();
    let mut conflicts = Vec::new();

    for (_, kind, idx) in events {
        let train_id = &occupations[idx].train_id;
        match kind {
            EventKind::Entry => {
                active.retain(|&i| occupations[i].train_id != *train_id);
                active.push(idx);
                if active.len() > capacity {
                    for (position, &first_idx) in active.iter().enumerate() {
                        for &second_idx in &active[position + 1..] {
                            if emitted.insert((first_idx.min(second_idx), first_idx.max(second_idx)))
                            {
                                conflicts.push(pair_conflict(
                                    &occupations[first_idx],
                                    &occupations[second_idx],
                                ));
                            }
                        }
                    }
                }
            }
            EventKind::Exit => {
                active.retain(|&i| occupations[i].train_id != *train_id);
            }
        }
    }

    conflicts
}

/// Conflict record for one violating pair. The window opens when the later
/// train enters and closes when the earlier one releases the resource; the
/// stabilization buffer decides overlap but is never part of the reported
/// window.
fn pair_conflict(first: &Occupation, second: &Occupation) -> ResourceConflict {
    let (earlier, later) = if first.entry <= second.entry {
        (first, second)
    } else {
        (second, first)
    };
    let start = later.entry;
    ResourceConflict {
        train_a_id: later.train_id.clone(),
        train_a_name: later.train_name.clone(),
        train_b_id: earlier.train_id.clone(),
        train_b_name: earlier.train_name.clone(),
        start,
        end: earlier.exit.max(start),
    }
}
