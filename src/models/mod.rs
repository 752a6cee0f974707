mod node;
mod railway_graph;
mod resource;
mod track;
mod train;

pub use node::{Node, NodeType};
pub use railway_graph::{
    AlternateRoute, PathCache, PathError, RailwayGraph, RoutePath, Routes,
};
pub use resource::{ResourceKey, ResourceKind};
pub use track::{TrackClass, TrackSegment};
pub use train::{Stop, Train};
