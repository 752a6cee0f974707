mod routes;

pub use routes::{AlternateRoute, PathCache, PathError, RoutePath, Routes};

use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use super::{Node, TrackSegment};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RailwayGraph {
    #[serde(with = "graph_serde")]
    pub graph: DiGraph<Node, TrackSegment>,
    pub station_id_to_index: HashMap<String, NodeIndex>,
}

impl RailwayGraph {
    #[must_use]
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            station_id_to_index: HashMap::new(),
        }
    }

    /// Build a graph from externally validated node and edge lists. Edges
    /// referencing unknown stations are dropped.
    #[must_use]
    pub fn from_parts(nodes: Vec<Node>, tracks: Vec<TrackSegment>) -> Self {
        let mut graph = Self::new();
        for node in nodes {
            graph.add_station(node);
        }
        for track in tracks {
            graph.add_track(track);
        }
        graph
    }

    /// Add a station node if its id is not present yet, return its `NodeIndex`
    pub fn add_station(&mut self, node: Node) -> NodeIndex {
        if let Some(&index) = self.station_id_to_index.get(&node.id) {
            index
        } else {
            let id = node.id.clone();
            let index = self.graph.add_node(node);
            self.station_id_to_index.insert(id, index);
            index
        }
    }

    /// Add a track segment between the stations named in its record, returns
    /// the `EdgeIndex`, or `None` when either endpoint is unknown
    pub fn add_track(&mut self, segment: TrackSegment) -> Option<EdgeIndex> {
        let from = self.get_station_index(&segment.from)?;
        let to = self.get_station_index(&segment.to)?;
        Some(self.graph.add_edge(from, to, segment))
    }

    /// Get `NodeIndex` by station id
    #[must_use]
    pub fn get_station_index(&self, id: &str) -> Option<NodeIndex> {
        self.station_id_to_index.get(id).copied()
    }

    /// Get station node by `NodeIndex`
    #[must_use]
    pub fn node(&self, index: NodeIndex) -> Option<&Node> {
        self.graph.node_weight(index)
    }

    /// Get station id by `NodeIndex`
    #[must_use]
    pub fn station_id(&self, index: NodeIndex) -> Option<&str> {
        self.graph.node_weight(index).map(|node| node.id.as_str())
    }

    /// Get track segment by edge index
    #[must_use]
    pub fn track(&self, edge_idx: EdgeIndex) -> Option<&TrackSegment> {
        self.graph.edge_weight(edge_idx)
    }

    /// Get endpoints of a track segment
    #[must_use]
    pub fn track_endpoints(&self, edge_idx: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.graph.edge_endpoints(edge_idx)
    }

    /// Display name for a station id, falling back to the id itself
    #[must_use]
    pub fn station_display_name(&self, id: &str) -> String {
        self.get_station_index(id)
            .and_then(|idx| self.graph.node_weight(idx))
            .map_or_else(|| id.to_string(), |node| node.name.clone())
    }

    /// Edges leaving `from` under the directional reachability rule: every
    /// edge is traversable source→target; single track is additionally
    /// traversable target→source.
    pub(crate) fn traversable_edges(&self, from: NodeIndex) -> Vec<(EdgeIndex, NodeIndex)> {
        let mut neighbors = Vec::new();
        for edge in self.graph.edges_directed(from, Direction::Outgoing) {
            neighbors.push((edge.id(), edge.target()));
        }
        for edge in self.graph.edges_directed(from, Direction::Incoming) {
            if edge.weight().is_reversible() {
                neighbors.push((edge.id(), edge.source()));
            }
        }
        neighbors
    }
}

impl Default for RailwayGraph {
    fn default() -> Self {
        Self::new()
    }
}

// Serialization helpers
mod graph_serde {
    use super::{Node, TrackSegment};
    use petgraph::graph::DiGraph;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(
        graph: &DiGraph<Node, TrackSegment>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Petgraph's built-in serialization
        graph.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DiGraph<Node, TrackSegment>, D::Error>
    where
        D: Deserializer<'de>,
    {
        DiGraph::deserialize(deserializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NodeType, TrackClass};

    fn station(id: &str) -> Node {
        Node::new(id, id.to_uppercase(), NodeType::Station)
    }

    #[test]
    fn test_add_station_dedupes_by_id() {
        let mut graph = RailwayGraph::new();
        let first = graph.add_station(station("fi"));
        let second = graph.add_station(station("fi"));
        assert_eq!(first, second);
        assert_eq!(graph.graph.node_count(), 1);
    }

    #[test]
    fn test_add_track_unknown_station() {
        let mut graph = RailwayGraph::new();
        graph.add_station(station("fi"));
        let edge = graph.add_track(TrackSegment::new("fi", "po", 10.0, TrackClass::Single, 100.0));
        assert!(edge.is_none());
        assert_eq!(graph.graph.edge_count(), 0);
    }

    #[test]
    fn test_traversable_edges_single_track_both_ways() {
        let mut graph = RailwayGraph::new();
        let fi = graph.add_station(station("fi"));
        let po = graph.add_station(station("po"));
        graph
            .add_track(TrackSegment::new("fi", "po", 10.0, TrackClass::Single, 100.0))
            .expect("edge added");

        assert_eq!(graph.traversable_edges(fi).len(), 1);
        assert_eq!(graph.traversable_edges(po).len(), 1);
    }

    #[test]
    fn test_traversable_edges_double_track_one_way() {
        let mut graph = RailwayGraph::new();
        let fi = graph.add_station(station("fi"));
        let po = graph.add_station(station("po"));
        graph
            .add_track(TrackSegment::new("fi", "po", 10.0, TrackClass::Double, 160.0))
            .expect("edge added");

        assert_eq!(graph.traversable_edges(fi).len(), 1);
        assert!(graph.traversable_edges(po).is_empty());
    }

    #[test]
    fn test_station_display_name_fallback() {
        let mut graph = RailwayGraph::new();
        graph.add_station(Node::new("fi", "Firenze SMN", NodeType::Station));
        assert_eq!(graph.station_display_name("fi"), "Firenze SMN");
        assert_eq!(graph.station_display_name("xx"), "xx");
    }

    #[test]
    fn test_graph_json_roundtrip() {
        let graph = RailwayGraph::from_parts(
            vec![station("fi"), station("po")],
            vec![TrackSegment::new("fi", "po", 17.0, TrackClass::Double, 160.0)],
        );
        let json = serde_json::to_string(&graph).expect("serializes");
        let back: RailwayGraph = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(back.graph.node_count(), 2);
        assert_eq!(back.graph.edge_count(), 1);
        assert!(back.get_station_index("po").is_some());
    }
}
