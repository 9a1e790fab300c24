//! Toy road networks shared by the matcher tests.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::{Coordinate, DriverId, NodeId};
use crate::graph::{RoadGraph, RoadGraphBuilder};

pub fn coord(lat: f64, lon: f64) -> Coordinate {
    Coordinate::new(lat, lon).unwrap()
}

pub fn driver(s: &str) -> DriverId {
    DriverId::parse(s).unwrap()
}

pub fn drivers(entries: &[(&str, f64, f64)]) -> BTreeMap<DriverId, Coordinate> {
    entries
        .iter()
        .map(|(id, lat, lon)| (driver(id), coord(*lat, *lon)))
        .collect()
}

pub fn nodes(ids: &[i64]) -> BTreeSet<NodeId> {
    ids.iter().copied().map(NodeId).collect()
}

/// Driver (1) -> intermediate (2) <-> office (3).
///
/// The intermediate node sits on the companion's coordinate.
pub fn three_node_builder() -> RoadGraphBuilder {
    RoadGraphBuilder::new()
        .node(1, 13.0, 77.69)
        .node(2, 12.937, 77.63)
        .node(3, 12.934, 77.62)
        .edge(1, 2, 9000.0, 600.0)
        .two_way(2, 3, 1200.0, 120.0)
}

pub fn three_node_graph() -> RoadGraph {
    three_node_builder().build().unwrap()
}

/// The three-node network plus a two-node island (4, 5) that cannot reach
/// the office.
pub fn with_island() -> RoadGraph {
    three_node_builder()
        .node(4, 13.1, 77.5)
        .node(5, 13.11, 77.51)
        .two_way(4, 5, 1500.0, 150.0)
        .build()
        .unwrap()
}

/// Companion (10) and office (11) shared by the larger fixtures.
fn base() -> RoadGraphBuilder {
    RoadGraphBuilder::new()
        .node(10, 12.950, 77.600)
        .node(11, 12.900, 77.600)
}

/// Two drivers, A (20) and B (30), each passing a node from which the
/// companion is a short walk: 800 m from A's node 21, 500 m from B's
/// node 31. Both walks fit inside the default buffer.
pub fn two_driver_graph() -> RoadGraph {
    base()
        .node(20, 12.990, 77.650)
        .node(21, 12.950, 77.607)
        .node(30, 12.990, 77.550)
        .node(31, 12.950, 77.5955)
        .edge(20, 21, 5000.0, 400.0)
        .edge(21, 11, 6000.0, 450.0)
        .edge(30, 31, 5000.0, 400.0)
        .edge(31, 11, 6000.0, 450.0)
        .edge(21, 10, 800.0, 90.0)
        .edge(31, 10, 500.0, 60.0)
        .build()
        .unwrap()
}

/// One driver (20) whose only access to the companion is a walk that
/// takes longer than the driver's time to the meeting point plus five
/// minutes.
pub fn slow_walk_graph() -> RoadGraph {
    base()
        .node(20, 12.990, 77.650)
        .node(21, 12.950, 77.607)
        .edge(20, 21, 5000.0, 400.0)
        .edge(21, 11, 6000.0, 450.0)
        .edge(21, 10, 800.0, 1000.0)
        .build()
        .unwrap()
}

/// One driver (20 -> 21 -> 22 -> 11). Node 21 is the closest meeting
/// point by road but its walk breaks the buffer; node 22 is farther and
/// fits.
pub fn buffer_tradeoff_graph() -> RoadGraph {
    base()
        .node(20, 12.990, 77.650)
        .node(21, 12.950, 77.607)
        .node(22, 12.940, 77.610)
        .edge(20, 21, 5000.0, 400.0)
        .edge(21, 22, 1500.0, 120.0)
        .edge(22, 11, 5000.0, 400.0)
        .edge(21, 10, 800.0, 1000.0)
        .edge(22, 10, 1500.0, 100.0)
        .build()
        .unwrap()
}
