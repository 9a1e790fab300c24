//! Road-network graph access.
//!
//! The matcher never owns the road network: it consumes a read-only graph
//! through the [`RoadNetwork`] trait. [`RoadGraph`] is the in-memory
//! implementation, built from a [`GraphSnapshot`] produced by whatever
//! downloaded the map data.

mod error;
mod road_graph;
mod snapshot;

pub use error::GraphError;
pub use road_graph::{RoadGraph, RoadGraphBuilder};
pub use snapshot::{GraphSnapshot, SnapshotEdge, SnapshotNode};

use crate::domain::{Coordinate, NodeId, Route, WeightKey};

/// Read-only queries the matcher needs from a road network.
///
/// Implementations must not mutate shared state from these methods, so a
/// single graph can serve concurrent matching requests.
pub trait RoadNetwork {
    /// Coordinate of a node, or `None` if the node is unknown or has no
    /// position.
    fn node_coordinate(&self, node: NodeId) -> Option<Coordinate>;

    /// The node closest to a coordinate.
    ///
    /// Deterministic for identical inputs on the same graph. Fails only if
    /// no node has a coordinate at all.
    fn nearest_node(&self, coordinate: Coordinate) -> Result<NodeId, GraphError>;

    /// Minimum-weight path under `weight`, or the empty route if there is
    /// no path.
    fn shortest_path(&self, source: NodeId, destination: NodeId, weight: WeightKey) -> Route;

    /// Sum of `weight` over consecutive edges of `route`.
    ///
    /// Between two nodes joined by parallel edges only the first edge (the
    /// lowest edge index) counts. Routes of zero or one node weigh 0.
    fn path_weight(&self, route: &Route, weight: WeightKey) -> f64;

    /// Minimum total `weight` from `source` to `destination`, or
    /// `f64::INFINITY` if unreachable.
    fn shortest_path_length(&self, source: NodeId, destination: NodeId, weight: WeightKey)
    -> f64;
}
