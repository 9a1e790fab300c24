//! Data transfer objects for web requests and responses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, DomainError, DriverId, IntersectionResult, Route};
use crate::graph::RoadNetwork;
use crate::matcher::{MatchOutcome, MatchRequest};

/// A latitude/longitude pair on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateDto {
    pub lat: f64,
    pub lon: f64,
}

impl CoordinateDto {
    /// Validate into a domain coordinate.
    pub fn to_coordinate(self) -> Result<Coordinate, DomainError> {
        Coordinate::new(self.lat, self.lon)
    }
}

impl From<Coordinate> for CoordinateDto {
    fn from(c: Coordinate) -> Self {
        Self {
            lat: c.lat(),
            lon: c.lon(),
        }
    }
}

/// A driver's start location.
#[derive(Debug, Clone, Deserialize)]
pub struct DriverInput {
    /// Driver identifier (e.g., "driver1")
    pub id: String,
    pub lat: f64,
    pub lon: f64,
}

/// Request to match drivers with companions.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchDriversRequest {
    /// Drivers heading to the office
    pub drivers: Vec<DriverInput>,

    /// Companions waiting for a ride
    pub companions: Vec<CoordinateDto>,

    /// Destination (defaults to the configured office)
    #[serde(default)]
    pub office: Option<CoordinateDto>,
}

impl MatchDriversRequest {
    /// Validate and convert into a matcher request.
    ///
    /// Returns a human-readable message on invalid input.
    pub fn into_match_request(self, default_office: Coordinate) -> Result<MatchRequest, String> {
        let mut drivers = BTreeMap::new();
        for input in self.drivers {
            let id = DriverId::parse(&input.id).map_err(|e| e.to_string())?;
            let location = Coordinate::new(input.lat, input.lon)
                .map_err(|e| format!("driver {id}: {e}"))?;
            if drivers.insert(id.clone(), location).is_some() {
                return Err(format!("duplicate driver id: {id}"));
            }
        }

        let companions = self
            .companions
            .into_iter()
            .map(|c| c.to_coordinate().map_err(|e| format!("companion: {e}")))
            .collect::<Result<Vec<_>, _>>()?;

        let destination = match self.office {
            Some(office) => office.to_coordinate().map_err(|e| format!("office: {e}"))?,
            None => default_office,
        };

        Ok(MatchRequest::new(drivers, destination, companions))
    }
}

/// The winning driver.
#[derive(Debug, Serialize)]
pub struct BestMatchResult {
    /// Driver identifier
    pub driver: String,

    /// Meeting-point graph node
    pub meeting_node: i64,

    /// Meeting-point position (absent if the node has no coordinate)
    pub meeting_point: Option<CoordinateDto>,

    /// Road distance from meeting point to companion (metres)
    pub companion_distance_m: f64,

    /// Travel time from meeting point to companion (seconds)
    pub companion_travel_time_s: f64,

    /// Road distance from driver start to meeting point (metres)
    pub driver_distance_m: f64,

    /// Travel time from driver start to meeting point (seconds)
    pub driver_travel_time_s: f64,

    /// Companion's path to the meeting point, as positions
    pub companion_path: Vec<CoordinateDto>,
}

/// Result for one (driver, companion) pair.
#[derive(Debug, Serialize)]
pub struct PairResult {
    pub driver: String,
    pub companion_node: i64,

    /// Meeting node, or null if nothing fits the buffer
    pub meeting_node: Option<i64>,

    /// Companion-side distance (metres), null when not found
    pub companion_distance_m: Option<f64>,

    /// Companion-side travel time (seconds), null when not found
    pub companion_travel_time_s: Option<f64>,
}

impl PairResult {
    fn new(driver: &DriverId, companion_node: i64, result: &IntersectionResult) -> Self {
        let finite = |v: f64| v.is_finite().then_some(v);
        Self {
            driver: driver.to_string(),
            companion_node,
            meeting_node: result.node.map(|n| n.0),
            companion_distance_m: finite(result.companion_distance),
            companion_travel_time_s: finite(result.companion_travel_time),
        }
    }
}

/// A driver's route to the office.
#[derive(Debug, Serialize)]
pub struct DriverRouteResult {
    pub driver: String,

    /// False when the driver cannot reach the office
    pub reachable: bool,

    /// Route positions, in travel order
    pub path: Vec<CoordinateDto>,
}

/// Response for a match request.
#[derive(Debug, Serialize)]
pub struct MatchDriversResponse {
    /// Best driver, or null when no driver qualifies
    pub best: Option<BestMatchResult>,

    /// All pairs, closest companion distance first
    pub results: Vec<PairResult>,

    /// Every driver's route
    pub routes: Vec<DriverRouteResult>,
}

/// Positions of a route's nodes, skipping nodes without a coordinate.
fn polyline<G: RoadNetwork + ?Sized>(graph: &G, route: &Route) -> Vec<CoordinateDto> {
    route
        .nodes()
        .iter()
        .filter_map(|&n| graph.node_coordinate(n))
        .map(CoordinateDto::from)
        .collect()
}

impl MatchDriversResponse {
    /// Build a response from a matcher outcome.
    pub fn from_outcome<G: RoadNetwork + ?Sized>(outcome: &MatchOutcome, graph: &G) -> Self {
        let best = outcome.best.as_ref().map(|m| {
            // Walking path runs meeting point -> companion; show it companion-first
            let mut companion_path = polyline(graph, &m.result.companion_path);
            companion_path.reverse();

            BestMatchResult {
                driver: m.driver.to_string(),
                meeting_node: m.meeting_node.0,
                meeting_point: graph.node_coordinate(m.meeting_node).map(CoordinateDto::from),
                companion_distance_m: m.result.companion_distance,
                companion_travel_time_s: m.result.companion_travel_time,
                driver_distance_m: m.result.driver_distance,
                driver_travel_time_s: m.result.driver_travel_time,
                companion_path,
            }
        });

        let results = outcome
            .ranked()
            .into_iter()
            .map(|(key, result)| PairResult::new(&key.driver, key.companion.0, result))
            .collect();

        let routes = outcome
            .routes
            .iter()
            .map(|(driver, route)| DriverRouteResult {
                driver: driver.to_string(),
                reachable: !route.is_empty(),
                path: polyline(graph, route),
            })
            .collect();

        Self {
            best,
            results,
            routes,
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::RoadGraphBuilder;
    use crate::matcher::{MatchConfig, Matcher};

    fn office() -> Coordinate {
        Coordinate::new(12.934, 77.62).unwrap()
    }

    fn parse(json: &str) -> MatchDriversRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn office_defaults_when_absent() {
        let req = parse(
            r#"{
                "drivers": [{ "id": "driver1", "lat": 13.0, "lon": 77.69 }],
                "companions": [{ "lat": 12.937, "lon": 77.63 }]
            }"#,
        );

        let request = req.into_match_request(office()).unwrap();
        assert_eq!(request.destination, office());
        assert_eq!(request.drivers.len(), 1);
        assert_eq!(request.companions.len(), 1);
    }

    #[test]
    fn explicit_office_wins() {
        let req = parse(
            r#"{
                "drivers": [{ "id": "driver1", "lat": 13.0, "lon": 77.69 }],
                "companions": [{ "lat": 12.937, "lon": 77.63 }],
                "office": { "lat": 12.95, "lon": 77.6 }
            }"#,
        );

        let request = req.into_match_request(office()).unwrap();
        assert_eq!(request.destination, Coordinate::new(12.95, 77.6).unwrap());
    }

    #[test]
    fn reject_duplicate_driver() {
        let req = parse(
            r#"{
                "drivers": [
                    { "id": "driver1", "lat": 13.0, "lon": 77.69 },
                    { "id": " driver1 ", "lat": 13.1, "lon": 77.7 }
                ],
                "companions": [{ "lat": 12.937, "lon": 77.63 }]
            }"#,
        );

        let err = req.into_match_request(office()).unwrap_err();
        assert_eq!(err, "duplicate driver id: driver1");
    }

    #[test]
    fn reject_bad_coordinates() {
        let req = parse(
            r#"{
                "drivers": [{ "id": "driver1", "lat": 130.0, "lon": 77.69 }],
                "companions": [{ "lat": 12.937, "lon": 77.63 }]
            }"#,
        );
        let err = req.into_match_request(office()).unwrap_err();
        assert!(err.starts_with("driver driver1: invalid coordinate"), "{err}");

        let req = parse(
            r#"{
                "drivers": [{ "id": "", "lat": 13.0, "lon": 77.69 }],
                "companions": []
            }"#,
        );
        assert!(req.into_match_request(office()).is_err());
    }

    #[test]
    fn response_from_outcome() {
        let g = RoadGraphBuilder::new()
            .node(1, 13.0, 77.69)
            .node(2, 12.937, 77.63)
            .node(3, 12.934, 77.62)
            .node(4, 13.1, 77.5)
            .edge(1, 2, 9000.0, 600.0)
            .two_way(2, 3, 1200.0, 120.0)
            .build()
            .unwrap();
        let config = MatchConfig::default();

        let request = parse(
            r#"{
                "drivers": [
                    { "id": "driver1", "lat": 13.0, "lon": 77.69 },
                    { "id": "driver2", "lat": 13.1, "lon": 77.5 }
                ],
                "companions": [{ "lat": 12.937, "lon": 77.63 }]
            }"#,
        )
        .into_match_request(office())
        .unwrap();

        let outcome = Matcher::new(&g, &config).run(&request).unwrap();
        let response = MatchDriversResponse::from_outcome(&outcome, &g);

        let best = response.best.as_ref().unwrap();
        assert_eq!(best.driver, "driver1");
        assert_eq!(best.meeting_node, 2);
        assert_eq!(best.meeting_point, Some(CoordinateDto { lat: 12.937, lon: 77.63 }));
        assert_eq!(best.companion_path.len(), 1);

        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].meeting_node, Some(2));

        assert_eq!(response.routes.len(), 2);
        assert!(response.routes[0].reachable);
        assert_eq!(response.routes[0].path.len(), 3);
        assert!(!response.routes[1].reachable);
        assert!(response.routes[1].path.is_empty());

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["best"]["driver"], "driver1");
    }

    #[test]
    fn unmatched_pair_serializes_nulls() {
        let driver = DriverId::parse("d").unwrap();
        let pair = PairResult::new(&driver, 10, &IntersectionResult::none());

        let json = serde_json::to_value(&pair).unwrap();
        assert!(json["meeting_node"].is_null());
        assert!(json["companion_distance_m"].is_null());
    }
}
