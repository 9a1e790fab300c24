//! Application state for the web layer.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::Coordinate;
use crate::graph::RoadGraph;
use crate::matcher::MatchConfig;

/// Shared application state.
///
/// The road graph is loaded once and only read afterwards, so every
/// request can use it concurrently.
#[derive(Clone)]
pub struct AppState {
    /// Road network
    pub graph: Arc<RoadGraph>,

    /// Matcher configuration
    pub config: Arc<MatchConfig>,

    /// Destination used when a request names none
    pub default_office: Coordinate,

    /// Deadline for one matching run
    pub match_timeout: Duration,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        graph: RoadGraph,
        config: MatchConfig,
        default_office: Coordinate,
        match_timeout: Duration,
    ) -> Self {
        Self {
            graph: Arc::new(graph),
            config: Arc::new(config),
            default_office,
            match_timeout,
        }
    }
}
