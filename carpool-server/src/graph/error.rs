//! Graph loading and lookup errors.

use std::path::PathBuf;

use crate::domain::{DomainError, NodeId, WeightKey};

/// Errors from building or querying a road graph.
///
/// Missing paths are not errors; they surface as empty routes and
/// infinite lengths.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// Snapshot file could not be read
    #[error("failed to read graph snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Snapshot is not valid JSON for the expected shape
    #[error("invalid graph snapshot: {0}")]
    Json(#[from] serde_json::Error),

    /// The same node id appears twice
    #[error("duplicate node id {0}")]
    DuplicateNode(NodeId),

    /// An edge refers to a node that is not in the snapshot
    #[error("edge {edge} refers to unknown node {node}")]
    UnknownNode { edge: usize, node: NodeId },

    /// An edge weight is negative or not finite
    #[error("edge {edge} has invalid {key} weight {value}")]
    InvalidWeight {
        edge: usize,
        key: WeightKey,
        value: f64,
    },

    /// A node carries an out-of-range coordinate
    #[error("node {node}: {source}")]
    InvalidCoordinate { node: NodeId, source: DomainError },

    /// Nearest-node lookup on a graph where no node has a coordinate
    #[error("graph has no nodes with coordinates")]
    NoLocatedNodes,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = GraphError::DuplicateNode(NodeId(5));
        assert_eq!(err.to_string(), "duplicate node id 5");

        let err = GraphError::UnknownNode {
            edge: 3,
            node: NodeId(99),
        };
        assert_eq!(err.to_string(), "edge 3 refers to unknown node 99");

        let err = GraphError::InvalidWeight {
            edge: 0,
            key: WeightKey::TravelTime,
            value: -1.0,
        };
        assert_eq!(err.to_string(), "edge 0 has invalid travel_time weight -1");

        let err = GraphError::NoLocatedNodes;
        assert_eq!(err.to_string(), "graph has no nodes with coordinates");
    }
}
