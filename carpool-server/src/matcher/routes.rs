//! Driver routes to the destination.

use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::{Coordinate, DriverId, Route, WeightKey};
use crate::graph::{GraphError, RoadNetwork};

/// Compute each driver's fastest route to the destination.
///
/// The destination is snapped to the graph once; each driver is snapped to
/// their nearest node and routed by `travel_time`. Drivers with no path
/// keep an empty route in the result rather than being dropped.
///
/// Fails only if a coordinate cannot be snapped at all, which happens
/// when no node of the graph has a position.
pub fn compute_driver_routes<G: RoadNetwork + ?Sized>(
    graph: &G,
    drivers: &BTreeMap<DriverId, Coordinate>,
    destination: Coordinate,
) -> Result<BTreeMap<DriverId, Route>, GraphError> {
    let destination_node = graph.nearest_node(destination)?;

    let mut routes = BTreeMap::new();
    for (driver, &location) in drivers {
        let driver_node = graph.nearest_node(location)?;
        let route = graph.shortest_path(driver_node, destination_node, WeightKey::TravelTime);

        if route.is_empty() {
            debug!(
                driver = %driver,
                from = %driver_node,
                to = %destination_node,
                "no route to destination"
            );
        }

        routes.insert(driver.clone(), route);
    }

    debug!(
        drivers = routes.len(),
        routed = routes.values().filter(|r| !r.is_empty()).count(),
        "driver routes computed"
    );

    Ok(routes)
}
