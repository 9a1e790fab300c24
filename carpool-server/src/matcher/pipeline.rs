//! End-to-end matching for a single request.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info};

use crate::domain::{
    Candidate, Coordinate, DriverId, IntersectionResult, Match, NodeId, PairKey, Route,
};
use crate::graph::{GraphError, RoadNetwork};

use super::candidates::find_candidates;
use super::config::MatchConfig;
use super::intersection::select_best_intersection;
use super::rank::{rank_results, select_best_match};
use super::routes::compute_driver_routes;

/// Error from matching.
///
/// Only precondition violations and infrastructure failures are errors;
/// "no route", "no meeting point" and "no match" are normal outcomes.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    /// Invalid matching request
    #[error("invalid match request: {0}")]
    InvalidRequest(String),

    /// The road graph could not resolve a location
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// Matching did not finish within the caller's deadline
    #[error("matching timed out")]
    Timeout,
}

/// Inputs of one matching run.
#[derive(Debug, Clone)]
pub struct MatchRequest {
    /// Driver start locations.
    pub drivers: BTreeMap<DriverId, Coordinate>,

    /// Where every driver is heading.
    pub destination: Coordinate,

    /// Companions waiting to be picked up.
    pub companions: Vec<Coordinate>,
}

impl MatchRequest {
    /// Create a new match request.
    pub fn new(
        drivers: BTreeMap<DriverId, Coordinate>,
        destination: Coordinate,
        companions: Vec<Coordinate>,
    ) -> Self {
        Self {
            drivers,
            destination,
            companions,
        }
    }

    /// Validate the match request.
    pub fn validate(&self) -> Result<(), MatchError> {
        if self.drivers.is_empty() {
            return Err(MatchError::InvalidRequest(
                "at least one driver is required".to_string(),
            ));
        }

        if self.companions.is_empty() {
            return Err(MatchError::InvalidRequest(
                "at least one companion is required".to_string(),
            ));
        }

        Ok(())
    }
}

/// Everything a matching run produced.
///
/// The intermediate stages are kept so callers can draw routes and
/// meeting points, not only the winner.
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    /// Each driver's route to the destination; empty if unreachable.
    pub routes: BTreeMap<DriverId, Route>,

    /// Graph nodes the companions were snapped to.
    pub companion_nodes: BTreeSet<NodeId>,

    /// Aerial pre-filter output per (driver, companion).
    pub candidates: BTreeMap<PairKey, Vec<Candidate>>,

    /// Chosen meeting point per (driver, companion).
    pub intersections: BTreeMap<PairKey, IntersectionResult>,

    /// The best driver overall, if any qualifies.
    pub best: Option<Match>,
}

impl MatchOutcome {
    /// Per-pair results, closest companion distance first.
    pub fn ranked(&self) -> Vec<(&PairKey, &IntersectionResult)> {
        rank_results(&self.intersections)
    }
}

/// Runs the matching pipeline against a road network.
pub struct Matcher<'a, G: RoadNetwork + ?Sized> {
    graph: &'a G,
    config: &'a MatchConfig,
}

impl<'a, G: RoadNetwork + ?Sized> Matcher<'a, G> {
    /// Create a new matcher.
    pub fn new(graph: &'a G, config: &'a MatchConfig) -> Self {
        Self { graph, config }
    }

    /// Match drivers to the request's companions.
    pub fn run(&self, request: &MatchRequest) -> Result<MatchOutcome, MatchError> {
        request.validate()?;

        let routes = compute_driver_routes(self.graph, &request.drivers, request.destination)?;

        let companion_nodes = request
            .companions
            .iter()
            .map(|&c| self.graph.nearest_node(c))
            .collect::<Result<BTreeSet<_>, _>>()?;
        debug!(companions = companion_nodes.len(), "companions snapped");

        let candidates = find_candidates(self.graph, &routes, &companion_nodes, self.config.top_k);
        let intersections =
            select_best_intersection(self.graph, &routes, &candidates, self.config.buffer_secs());
        let best = select_best_match(&intersections);

        info!(
            drivers = request.drivers.len(),
            companions = companion_nodes.len(),
            matched = best.as_ref().map(|m| m.driver.as_str()),
            "matching complete"
        );

        Ok(MatchOutcome {
            routes,
            companion_nodes,
            candidates,
            intersections,
            best,
        })
    }
}
