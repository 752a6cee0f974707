//! Reusable detection runner owning the cross-run path cache.

use crate::conflict::{detect_conflicts_with_policy, ConflictReport};
use crate::models::{PathCache, RailwayGraph, Train};
use crate::occupancy::DwellPolicy;

/// Runs detection passes against network snapshots.
///
/// Owns the path cache reused across calls on a stable network, and stamps
/// every report with a monotonic generation so callers running detection on a
/// background thread can discard superseded results instead of cancelling
/// in-flight work. Each run returns one whole report; partial results are
/// never exposed.
#[derive(Debug, Default)]
pub struct ConflictDetector {
    cache: PathCache,
    policy: DwellPolicy,
    generation: u64,
}

impl ConflictDetector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_policy(policy: DwellPolicy) -> Self {
        Self {
            cache: PathCache::new(),
            policy,
            generation: 0,
        }
    }

    /// Run one detection pass over the given snapshot
    pub fn run(&mut self, graph: &RailwayGraph, trains: &[Train]) -> ConflictReport {
        self.generation += 1;
        let mut report = detect_conflicts_with_policy(graph, trains, &mut self.cache, self.policy);
        report.generation = self.generation;
        report
    }

    /// Drop cached path resolutions after the network topology changed
    pub fn invalidate_cache(&mut self) {
        self.cache.clear();
    }
}
