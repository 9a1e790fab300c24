//! Meeting-point candidates and per-driver match results.

use super::{DriverId, NodeId, Route};

/// A node on a driver's route, scored by straight-line distance to the
/// companion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Route node.
    pub node: NodeId,

    /// Aerial distance to the companion, in kilometres.
    pub aerial_km: f64,
}

impl Candidate {
    pub fn new(node: NodeId, aerial_km: f64) -> Self {
        Self { node, aerial_km }
    }
}

/// Best meeting point found for one (driver, companion) pair.
///
/// When no candidate passes the buffer rule, `node` is `None` and the
/// distance and time fields stay at `f64::INFINITY`.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionResult {
    /// The chosen meeting node.
    pub node: Option<NodeId>,

    /// Road distance from the meeting node to the companion (metres).
    pub companion_distance: f64,

    /// Travel time along the companion-side path (seconds).
    pub companion_travel_time: f64,

    /// Road distance from the driver's start to the meeting node (metres).
    pub driver_distance: f64,

    /// Travel time from the driver's start to the meeting node (seconds).
    pub driver_travel_time: f64,

    /// Shortest path by length from the meeting node to the companion.
    pub companion_path: Route,
}

impl IntersectionResult {
    /// The "no intersection found" result.
    pub fn none() -> Self {
        Self {
            node: None,
            companion_distance: f64::INFINITY,
            companion_travel_time: f64::INFINITY,
            driver_distance: f64::INFINITY,
            driver_travel_time: f64::INFINITY,
            companion_path: Route::empty(),
        }
    }

    /// Returns true if a meeting node was accepted.
    pub fn is_found(&self) -> bool {
        self.node.is_some()
    }
}

impl Default for IntersectionResult {
    fn default() -> Self {
        Self::none()
    }
}

/// The globally best driver for a companion.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    /// The winning driver.
    pub driver: DriverId,

    /// Graph node the companion was snapped to.
    pub companion: NodeId,

    /// Where the driver picks the companion up.
    pub meeting_node: NodeId,

    /// Distances, times and the companion's path for this meeting point.
    pub result: IntersectionResult,
}
