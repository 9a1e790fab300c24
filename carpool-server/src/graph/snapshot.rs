//! JSON snapshots of a drive network.
//!
//! A snapshot is what the map download step hands over: nodes with
//! optional positions and directed edges carrying `length` (metres) and
//! `travel_time` (seconds).
//!
//! ```json
//! {
//!   "nodes": [{ "id": 1, "lat": 12.93, "lon": 77.62 }],
//!   "edges": [{ "from": 1, "to": 2, "length": 120.5, "travel_time": 14.2 }]
//! }
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::GraphError;
use crate::domain::NodeId;

/// A node as stored in a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotNode {
    pub id: NodeId,

    /// Latitude in degrees; absent when the source had no position.
    #[serde(default)]
    pub lat: Option<f64>,

    /// Longitude in degrees; absent when the source had no position.
    #[serde(default)]
    pub lon: Option<f64>,
}

/// A directed edge as stored in a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEdge {
    pub from: NodeId,
    pub to: NodeId,
    pub length: f64,
    pub travel_time: f64,
}

/// A complete road-network snapshot.
///
/// Edge order is significant: when several edges join the same pair of
/// nodes, the earliest one is the edge used for path weights.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<SnapshotNode>,
    pub edges: Vec<SnapshotEdge>,
}

impl GraphSnapshot {
    /// Parse a snapshot from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, GraphError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a snapshot from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, GraphError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Read a snapshot file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GraphError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| GraphError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "nodes": [
            { "id": 1, "lat": 12.93, "lon": 77.62 },
            { "id": 2 }
        ],
        "edges": [
            { "from": 1, "to": 2, "length": 120.5, "travel_time": 14.2 }
        ]
    }"#;

    #[test]
    fn parse_sample() {
        let snapshot = GraphSnapshot::from_json_str(SAMPLE).unwrap();

        assert_eq!(snapshot.nodes.len(), 2);
        assert_eq!(snapshot.nodes[0].lat, Some(12.93));
        assert_eq!(snapshot.nodes[1].lat, None);
        assert_eq!(snapshot.nodes[1].lon, None);

        assert_eq!(snapshot.edges.len(), 1);
        assert_eq!(snapshot.edges[0].from, NodeId(1));
        assert_eq!(snapshot.edges[0].travel_time, 14.2);
    }

    #[test]
    fn reject_missing_weight() {
        let json = r#"{ "nodes": [], "edges": [{ "from": 1, "to": 2, "length": 1.0 }] }"#;
        let err = GraphSnapshot::from_json_str(json).unwrap_err();
        assert!(matches!(err, GraphError::Json(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let snapshot = GraphSnapshot::load(file.path()).unwrap();
        assert_eq!(snapshot.nodes.len(), 2);
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let err = GraphSnapshot::load(&path).unwrap_err();
        match err {
            GraphError::Io { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
