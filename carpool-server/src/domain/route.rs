//! Graph node identifiers, edge weight keys and routes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of a node in the road network.
///
/// Ids are owned by the graph source (OSM node ids in practice); the
/// matcher only resolves and compares them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub i64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Edge attribute used as the cost of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeightKey {
    /// Estimated traversal time, in seconds.
    TravelTime,
    /// Physical length, in metres.
    Length,
}

impl WeightKey {
    /// Attribute name as it appears in graph snapshots.
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightKey::TravelTime => "travel_time",
            WeightKey::Length => "length",
        }
    }
}

impl fmt::Display for WeightKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeightKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "travel_time" => Ok(WeightKey::TravelTime),
            "length" => Ok(WeightKey::Length),
            other => Err(format!("unknown weight key: {other}")),
        }
    }
}

/// An ordered sequence of nodes from a source to a destination.
///
/// The empty route means "no path found". That is a valid outcome
/// (disconnected components, one-way streets), not an error, and every
/// consumer has to check [`Route::is_empty`] before querying the graph
/// with the route's endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Route {
    nodes: Vec<NodeId>,
}

impl Route {
    /// Create a route from a node sequence.
    pub fn new(nodes: Vec<NodeId>) -> Self {
        Self { nodes }
    }

    /// The "no path" route.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if no path was found.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of nodes on the route.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// First node, if any.
    pub fn source(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    /// Last node, if any.
    pub fn destination(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }

    /// The nodes in travel order.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Consecutive `(from, to)` node pairs, one per traversed edge.
    pub fn hops(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.nodes.windows(2).map(|w| (w[0], w[1]))
    }
}

impl From<Vec<NodeId>> for Route {
    fn from(nodes: Vec<NodeId>) -> Self {
        Self::new(nodes)
    }
}
