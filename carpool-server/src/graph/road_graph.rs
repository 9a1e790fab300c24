//! In-memory road graph backed by petgraph.

use std::collections::HashMap;

use ordered_float::OrderedFloat;
use petgraph::algo::astar;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use rstar::RTree;
use rstar::primitives::GeomWithData;
use tracing::debug;

use super::snapshot::{GraphSnapshot, SnapshotEdge, SnapshotNode};
use super::{GraphError, RoadNetwork};
use crate::domain::{Coordinate, NodeId, Route, WeightKey, distance_km};

/// Node payload: external id plus position, if known.
#[derive(Debug, Clone)]
struct NodeData {
    id: NodeId,
    coordinate: Option<Coordinate>,
}

/// A located node as a point on the unit sphere.
///
/// Straight-line (chord) distance between unit vectors grows with the
/// great-circle distance, so the R-tree's nearest neighbours are the
/// haversine nearest neighbours as well.
type Located = GeomWithData<[f64; 3], NodeIndex>;

/// Extra squared chord length accepted past the closest entry, covering
/// rounding in the unit vectors (a few metres on the ground).
const CHORD2_SLACK: f64 = 1e-12;

fn unit_vector(c: Coordinate) -> [f64; 3] {
    let (lat, lon) = (c.lat().to_radians(), c.lon().to_radians());
    [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
}

/// Edge payload: both weight attributes.
#[derive(Debug, Clone, Copy)]
struct EdgeData {
    length: f64,
    travel_time: f64,
}

impl EdgeData {
    fn weight(&self, key: WeightKey) -> f64 {
        match key {
            WeightKey::TravelTime => self.travel_time,
            WeightKey::Length => self.length,
        }
    }
}

/// A directed multigraph of the drive network.
///
/// Built once and then only read. Parallel edges between the same pair
/// of nodes are kept; shortest-path searches consider all of them, while
/// [`RoadNetwork::path_weight`] uses the first one in snapshot order.
#[derive(Debug, Clone)]
pub struct RoadGraph {
    graph: DiGraph<NodeData, EdgeData>,
    index: HashMap<NodeId, NodeIndex>,
    locator: RTree<Located>,
}

impl RoadGraph {
    /// Build a graph from a snapshot, validating ids, weights and
    /// coordinates.
    pub fn from_snapshot(snapshot: GraphSnapshot) -> Result<Self, GraphError> {
        let mut graph = DiGraph::with_capacity(snapshot.nodes.len(), snapshot.edges.len());
        let mut index = HashMap::with_capacity(snapshot.nodes.len());
        let mut located = Vec::with_capacity(snapshot.nodes.len());

        for node in snapshot.nodes {
            let coordinate = match (node.lat, node.lon) {
                (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon).map_err(|source| {
                    GraphError::InvalidCoordinate {
                        node: node.id,
                        source,
                    }
                })?),
                _ => None,
            };

            if index.contains_key(&node.id) {
                return Err(GraphError::DuplicateNode(node.id));
            }
            let idx = graph.add_node(NodeData {
                id: node.id,
                coordinate,
            });
            index.insert(node.id, idx);
            if let Some(c) = coordinate {
                located.push(Located::new(unit_vector(c), idx));
            }
        }

        for (i, edge) in snapshot.edges.into_iter().enumerate() {
            let lookup = |node: NodeId| {
                index
                    .get(&node)
                    .copied()
                    .ok_or(GraphError::UnknownNode { edge: i, node })
            };
            let from = lookup(edge.from)?;
            let to = lookup(edge.to)?;

            for (key, value) in [
                (WeightKey::Length, edge.length),
                (WeightKey::TravelTime, edge.travel_time),
            ] {
                if !value.is_finite() || value < 0.0 {
                    return Err(GraphError::InvalidWeight {
                        edge: i,
                        key,
                        value,
                    });
                }
            }

            graph.add_edge(
                from,
                to,
                EdgeData {
                    length: edge.length,
                    travel_time: edge.travel_time,
                },
            );
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            located = located.len(),
            "road graph built"
        );

        Ok(Self {
            graph,
            index,
            locator: RTree::bulk_load(located),
        })
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of directed edges, counting parallel edges separately.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns true if the node id is part of the graph.
    pub fn contains(&self, node: NodeId) -> bool {
        self.index.contains_key(&node)
    }

    /// The first (lowest-indexed) edge from `from` to `to`.
    fn first_edge(&self, from: NodeIndex, to: NodeIndex) -> Option<&EdgeData> {
        self.graph
            .edges_connecting(from, to)
            .min_by_key(|e| e.id())
            .map(|e| e.weight())
    }

    /// A* with a zero heuristic, i.e. Dijkstra that also returns the path.
    fn search(
        &self,
        source: NodeId,
        destination: NodeId,
        weight: WeightKey,
    ) -> Option<(f64, Vec<NodeIndex>)> {
        let start = *self.index.get(&source)?;
        let goal = *self.index.get(&destination)?;

        let (cost, path) = astar(
            &self.graph,
            start,
            |n| n == goal,
            |e| OrderedFloat(e.weight().weight(weight)),
            |_| OrderedFloat(0.0),
        )?;

        Some((cost.into_inner(), path))
    }
}

impl RoadNetwork for RoadGraph {
    fn node_coordinate(&self, node: NodeId) -> Option<Coordinate> {
        let idx = self.index.get(&node)?;
        self.graph[*idx].coordinate
    }

    fn nearest_node(&self, coordinate: Coordinate) -> Result<NodeId, GraphError> {
        // Walk outwards from the closest entry; everything within the slack
        // is compared by haversine distance, ties by id.
        let mut best: Option<(OrderedFloat<f64>, NodeId)> = None;
        let mut bound = f64::INFINITY;
        for (entry, d2) in self
            .locator
            .nearest_neighbor_iter_with_distance_2(&unit_vector(coordinate))
        {
            if d2 > bound {
                break;
            }
            bound = bound.min(d2 + CHORD2_SLACK);

            let node = &self.graph[entry.data];
            let Some(c) = node.coordinate else {
                continue;
            };
            let key = (OrderedFloat(distance_km(coordinate, c)), node.id);
            if best.is_none_or(|b| key < b) {
                best = Some(key);
            }
        }

        best.map(|(_, id)| id).ok_or(GraphError::NoLocatedNodes)
    }

    fn shortest_path(&self, source: NodeId, destination: NodeId, weight: WeightKey) -> Route {
        match self.search(source, destination, weight) {
            Some((_, path)) => path
                .into_iter()
                .map(|idx| self.graph[idx].id)
                .collect::<Vec<_>>()
                .into(),
            None => Route::empty(),
        }
    }

    fn path_weight(&self, route: &Route, weight: WeightKey) -> f64 {
        let mut total = 0.0;
        for (from, to) in route.hops() {
            let edge = match (self.index.get(&from), self.index.get(&to)) {
                (Some(&u), Some(&v)) => self.first_edge(u, v),
                _ => None,
            };
            match edge {
                Some(edge) => total += edge.weight(weight),
                None => return f64::INFINITY,
            }
        }
        total
    }

    fn shortest_path_length(
        &self,
        source: NodeId,
        destination: NodeId,
        weight: WeightKey,
    ) -> f64 {
        self.search(source, destination, weight)
            .map_or(f64::INFINITY, |(cost, _)| cost)
    }
}

/// Builder for assembling a road graph in code.
///
/// Provides a fluent API over [`GraphSnapshot`]; validation happens in
/// [`RoadGraphBuilder::build`].
///
/// # Example
///
/// ```
/// use carpool_server::domain::{NodeId, WeightKey};
/// use carpool_server::graph::{RoadGraphBuilder, RoadNetwork};
///
/// let graph = RoadGraphBuilder::new()
///     .node(1, 12.930, 77.610)
///     .node(2, 12.934, 77.620)
///     .edge(1, 2, 1150.0, 95.0)
///     .build()
///     .unwrap();
///
/// let route = graph.shortest_path(NodeId(1), NodeId(2), WeightKey::TravelTime);
/// assert_eq!(route.nodes(), &[NodeId(1), NodeId(2)]);
/// assert_eq!(graph.path_weight(&route, WeightKey::Length), 1150.0);
/// ```
#[derive(Debug, Default)]
pub struct RoadGraphBuilder {
    snapshot: GraphSnapshot,
}

impl RoadGraphBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node with a position.
    pub fn node(mut self, id: i64, lat: f64, lon: f64) -> Self {
        self.snapshot.nodes.push(SnapshotNode {
            id: NodeId(id),
            lat: Some(lat),
            lon: Some(lon),
        });
        self
    }

    /// Add a node whose position is unknown.
    pub fn unlocated_node(mut self, id: i64) -> Self {
        self.snapshot.nodes.push(SnapshotNode {
            id: NodeId(id),
            lat: None,
            lon: None,
        });
        self
    }

    /// Add a directed edge.
    pub fn edge(mut self, from: i64, to: i64, length: f64, travel_time: f64) -> Self {
        self.snapshot.edges.push(SnapshotEdge {
            from: NodeId(from),
            to: NodeId(to),
            length,
            travel_time,
        });
        self
    }

    /// Add the same edge in both directions.
    pub fn two_way(self, a: i64, b: i64, length: f64, travel_time: f64) -> Self {
        self.edge(a, b, length, travel_time)
            .edge(b, a, length, travel_time)
    }

    /// Build the graph.
    pub fn build(self) -> Result<RoadGraph, GraphError> {
        RoadGraph::from_snapshot(self.snapshot)
    }
}
