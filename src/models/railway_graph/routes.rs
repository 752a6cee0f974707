use petgraph::graph::{EdgeIndex, NodeIndex};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};
use thiserror::Error;
use super::RailwayGraph;

/// Cache of resolved edge sequences keyed by the ordered (from, to) station
/// pair. Owned by the caller and passed in explicitly so concurrent detection
/// runs never share one instance.
pub type PathCache = HashMap<(String, String), Vec<EdgeIndex>>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("no path between {from} and {to}")]
    PathNotFound { from: String, to: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoutePath {
    /// Ordered station ids from start to end, inclusive
    pub stations: Vec<String>,
    /// Total distance in kilometres
    pub distance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlternateRoute {
    pub label: String,
    pub stations: Vec<String>,
    pub distance: f64,
}

/// Extension trait for path search on `RailwayGraph`
pub trait Routes {
    /// Shortest path by total distance under the directional reachability
    /// rule.
    ///
    /// # Errors
    ///
    /// Returns `PathError::PathNotFound` when `end` is unreachable from
    /// `start` or either station id is unknown.
    fn shortest_path(&self, start: &str, end: &str) -> Result<RoutePath, PathError>;

    /// The direct shortest path plus simple detours through every interchange
    /// station, deduplicated and sorted ascending by distance
    fn alternate_paths(&self, start: &str, end: &str) -> Vec<AlternateRoute>;

    /// Literal edge sequence connecting `start` to `end`, breadth-first. With
    /// parallel tracks the first discovered sequence is authoritative.
    ///
    /// # Errors
    ///
    /// Returns `PathError::PathNotFound` when no edge sequence exists. Callers
    /// treat this as a recoverable skip, never as fatal.
    fn path_edges(&self, start: &str, end: &str) -> Result<Vec<EdgeIndex>, PathError>;

    /// Same as [`Routes::path_edges`], resolving through a caller-owned cache
    ///
    /// # Errors
    ///
    /// Returns `PathError::PathNotFound` when no edge sequence exists.
    fn path_edges_cached(
        &self,
        start: &str,
        end: &str,
        cache: &mut PathCache,
    ) -> Result<Vec<EdgeIndex>, PathError>;
}

/// Min-heap entry for Dijkstra; ties resolve by heap pop order, which is
/// stable within one run
#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    distance: f64,
    node: NodeIndex,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.distance == other.distance
    }
}

impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the BinaryHeap pops the smallest distance first
        other
            .distance
            .partial_cmp(&self.distance)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn not_found(start: &str, end: &str) -> PathError {
    PathError::PathNotFound {
        from: start.to_string(),
        to: end.to_string(),
    }
}

impl Routes for RailwayGraph {
    fn shortest_path(&self, start: &str, end: &str) -> Result<RoutePath, PathError> {
        let start_idx = self
            .get_station_index(start)
            .ok_or_else(|| not_found(start, end))?;
        let end_idx = self
            .get_station_index(end)
            .ok_or_else(|| not_found(start, end))?;

        let mut distances: HashMap<NodeIndex, f64> = HashMap::new();
        let mut previous: HashMap<NodeIndex, NodeIndex> = HashMap::new();
        let mut heap = BinaryHeap::new();

        distances.insert(start_idx, 0.0);
        heap.push(QueueEntry {
            distance: 0.0,
            node: start_idx,
        });

        while let Some(QueueEntry { distance, node }) = heap.pop() {
            if node == end_idx {
                break;
            }
            if distance > distances.get(&node).copied().unwrap_or(f64::INFINITY) {
                continue;
            }
            for (edge, neighbor) in self.traversable_edges(node) {
                let Some(segment) = self.track(edge) else {
                    continue;
                };
                let candidate = distance + segment.distance;
                if candidate < distances.get(&neighbor).copied().unwrap_or(f64::INFINITY) {
                    distances.insert(neighbor, candidate);
                    previous.insert(neighbor, node);
                    heap.push(QueueEntry {
                        distance: candidate,
                        node: neighbor,
                    });
                }
            }
        }

        let Some(&total) = distances.get(&end_idx) else {
            return Err(not_found(start, end));
        };

        let mut stations = Vec::new();
        let mut cursor = end_idx;
        loop {
            let Some(id) = self.station_id(cursor) else {
                return Err(not_found(start, end));
            };
            stations.push(id.to_string());
            if cursor == start_idx {
                break;
            }
            let Some(&prev) = previous.get(&cursor) else {
                return Err(not_found(start, end));
            };
            cursor = prev;
        }
        stations.reverse();

        Ok(RoutePath {
            stations,
            distance: total,
        })
    }

    fn alternate_paths(&self, start: &str, end: &str) -> Vec<AlternateRoute> {
        let mut routes = Vec::new();
        let Ok(direct) = self.shortest_path(start, end) else {
            return routes;
        };
        routes.push(AlternateRoute {
            label: "Direct".to_string(),
            stations: direct.stations,
            distance: direct.distance,
        });

        for node_idx in self.graph.node_indices() {
            let Some(node) = self.node(node_idx) else {
                continue;
            };
            if !node.is_interchange() || node.id == start || node.id == end {
                continue;
            }
            let (Ok(first), Ok(second)) = (
                self.shortest_path(start, &node.id),
                self.shortest_path(&node.id, end),
            ) else {
                continue;
            };

            let mut stations = first.stations;
            stations.extend(second.stations.into_iter().skip(1));

            // Only simple paths qualify as alternates
            let unique: HashSet<&String> = stations.iter().collect();
            if unique.len() != stations.len() {
                continue;
            }
            if routes.iter().any(|route| route.stations == stations) {
                continue;
            }

            routes.push(AlternateRoute {
                label: format!("Via {}", node.name),
                stations,
                distance: first.distance + second.distance,
            });
        }

        routes.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(Ordering::Equal)
        });
        routes
    }

    fn path_edges(&self, start: &str, end: &str) -> Result<Vec<EdgeIndex>, PathError> {
        let start_idx = self
            .get_station_index(start)
            .ok_or_else(|| not_found(start, end))?;
        let end_idx = self
            .get_station_index(end)
            .ok_or_else(|| not_found(start, end))?;
        if start_idx == end_idx {
            return Ok(Vec::new());
        }

        let mut visited = HashSet::from([start_idx]);
        let mut previous: HashMap<NodeIndex, (NodeIndex, EdgeIndex)> = HashMap::new();
        let mut queue = VecDeque::from([start_idx]);

        while let Some(node) = queue.pop_front() {
            for (edge, neighbor) in self.traversable_edges(node) {
                if !visited.insert(neighbor) {
                    continue;
                }
                previous.insert(neighbor, (node, edge));
                if neighbor == end_idx {
                    let mut edges = Vec::new();
                    let mut cursor = end_idx;
                    while cursor != start_idx {
                        let Some(&(prev, via)) = previous.get(&cursor) else {
                            return Err(not_found(start, end));
                        };
                        edges.push(via);
                        cursor = prev;
                    }
                    edges.reverse();
                    return Ok(edges);
                }
                queue.push_back(neighbor);
            }
        }

        Err(not_found(start, end))
    }

    fn path_edges_cached(
        &self,
        start: &str,
        end: &str,
        cache: &mut PathCache,
    ) -> Result<Vec<EdgeIndex>, PathError> {
        let key = (start.to_string(), end.to_string());
        if let Some(edges) = cache.get(&key) {
            return Ok(edges.clone());
        }
        let edges = self.path_edges(start, end)?;
        cache.insert(key, edges.clone());
        Ok(edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Node, NodeType, TrackClass, TrackSegment};

    fn station(id: &str) -> Node {
        Node::new(id, id.to_uppercase(), NodeType::Station)
    }

    fn interchange(id: &str) -> Node {
        Node::new(id, id.to_uppercase(), NodeType::Interchange)
    }

    /// A–B single track (10 km), B–C double track (20 km)
    fn linear_graph() -> RailwayGraph {
        RailwayGraph::from_parts(
            vec![station("a"), station("b"), station("c")],
            vec![
                TrackSegment::new("a", "b", 10.0, TrackClass::Single, 100.0),
                TrackSegment::new("b", "c", 20.0, TrackClass::Double, 160.0),
            ],
        )
    }

    #[test]
    fn test_shortest_path_linear() {
        let graph = linear_graph();
        let path = graph.shortest_path("a", "c").expect("path exists");
        assert_eq!(path.stations, vec!["a", "b", "c"]);
        assert_eq!(path.distance, 30.0);
    }

    #[test]
    fn test_shortest_path_same_station() {
        let graph = linear_graph();
        let path = graph.shortest_path("b", "b").expect("path exists");
        assert_eq!(path.stations, vec!["b"]);
        assert_eq!(path.distance, 0.0);
    }

    #[test]
    fn test_shortest_path_respects_directionality() {
        let graph = linear_graph();
        // Single track a-b is reversible, double track b-c is not
        assert!(graph.shortest_path("b", "a").is_ok());
        assert_eq!(
            graph.shortest_path("c", "b"),
            Err(PathError::PathNotFound {
                from: "c".to_string(),
                to: "b".to_string()
            })
        );
    }

    #[test]
    fn test_shortest_path_prefers_shorter_route() {
        let graph = RailwayGraph::from_parts(
            vec![station("a"), station("b"), station("c")],
            vec![
                TrackSegment::new("a", "c", 50.0, TrackClass::Double, 160.0),
                TrackSegment::new("a", "b", 10.0, TrackClass::Double, 160.0),
                TrackSegment::new("b", "c", 15.0, TrackClass::Double, 160.0),
            ],
        );
        let path = graph.shortest_path("a", "c").expect("path exists");
        assert_eq!(path.stations, vec!["a", "b", "c"]);
        assert_eq!(path.distance, 25.0);
    }

    #[test]
    fn test_alternate_paths_direct_label() {
        let graph = linear_graph();
        let routes = graph.alternate_paths("a", "c");
        assert!(!routes.is_empty());
        assert_eq!(routes[0].label, "Direct");
    }

    #[test]
    fn test_alternate_paths_via_interchange() {
        // Diamond: a-c direct, plus a-m-c through an interchange
        let graph = RailwayGraph::from_parts(
            vec![station("a"), interchange("m"), station("c")],
            vec![
                TrackSegment::new("a", "c", 12.0, TrackClass::Double, 160.0),
                TrackSegment::new("a", "m", 10.0, TrackClass::Double, 160.0),
                TrackSegment::new("m", "c", 10.0, TrackClass::Double, 160.0),
            ],
        );
        let routes = graph.alternate_paths("a", "c");
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].label, "Direct");
        assert_eq!(routes[0].distance, 12.0);
        assert_eq!(routes[1].label, "Via M");
        assert_eq!(routes[1].stations, vec!["a", "m", "c"]);
        assert_eq!(routes[1].distance, 20.0);
    }

    #[test]
    fn test_alternate_paths_dedupes_identical_routes() {
        // The interchange sits on the only route, so the detour equals the
        // direct path and must not be reported twice
        let graph = RailwayGraph::from_parts(
            vec![station("a"), interchange("m"), station("c")],
            vec![
                TrackSegment::new("a", "m", 10.0, TrackClass::Double, 160.0),
                TrackSegment::new("m", "c", 10.0, TrackClass::Double, 160.0),
            ],
        );
        let routes = graph.alternate_paths("a", "c");
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].label, "Direct");
    }

    #[test]
    fn test_alternate_paths_rejects_non_simple_detours() {
        // Detour through m revisits b, so only the direct path survives
        let graph = RailwayGraph::from_parts(
            vec![station("a"), station("b"), interchange("m"), station("c")],
            vec![
                TrackSegment::new("a", "b", 10.0, TrackClass::Single, 100.0),
                TrackSegment::new("b", "c", 10.0, TrackClass::Single, 100.0),
                TrackSegment::new("b", "m", 5.0, TrackClass::Single, 100.0),
            ],
        );
        let routes = graph.alternate_paths("a", "c");
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].label, "Direct");
    }

    #[test]
    fn test_path_edges_linear() {
        let graph = linear_graph();
        let edges = graph.path_edges("a", "c").expect("path exists");
        assert_eq!(edges.len(), 2);
        let first = graph.track(edges[0]).expect("edge weight");
        assert_eq!((first.from.as_str(), first.to.as_str()), ("a", "b"));
    }

    #[test]
    fn test_path_edges_not_found_is_recoverable() {
        let graph = RailwayGraph::from_parts(
            vec![station("a"), station("b")],
            vec![],
        );
        let err = graph.path_edges("a", "b").expect_err("no path");
        assert_eq!(
            err,
            PathError::PathNotFound {
                from: "a".to_string(),
                to: "b".to_string()
            }
        );
    }

    #[test]
    fn test_path_edges_cached_reuses_resolution() {
        let graph = linear_graph();
        let mut cache = PathCache::new();
        let first = graph
            .path_edges_cached("a", "c", &mut cache)
            .expect("path exists");
        assert_eq!(cache.len(), 1);
        let second = graph
            .path_edges_cached("a", "c", &mut cache)
            .expect("path exists");
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
    }
}
