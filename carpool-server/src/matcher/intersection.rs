//! Meeting-point selection under the buffer rule.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::domain::{
    Candidate, DriverId, IntersectionResult, NodeId, PairKey, Route, WeightKey,
};
use crate::graph::RoadNetwork;

/// Road costs of meeting at one candidate node.
struct Legs {
    driver_distance: f64,
    driver_travel_time: f64,
    companion_distance: f64,
    companion_travel_time: f64,
    companion_path: Route,
}

/// Both legs through `node`, or `None` if either leg has no path.
fn evaluate<G: RoadNetwork + ?Sized>(
    graph: &G,
    start: NodeId,
    node: NodeId,
    companion: NodeId,
) -> Option<Legs> {
    // Driver side: fastest path in, its time, and the shortest road distance
    let path_to = graph.shortest_path(start, node, WeightKey::TravelTime);
    if path_to.is_empty() {
        return None;
    }
    let driver_travel_time = graph.path_weight(&path_to, WeightKey::TravelTime);
    let driver_distance = graph.shortest_path_length(start, node, WeightKey::Length);

    // Companion side: shortest path by length, and the time along it
    let companion_path = graph.shortest_path(node, companion, WeightKey::Length);
    if companion_path.is_empty() {
        return None;
    }
    let companion_distance = graph.shortest_path_length(node, companion, WeightKey::Length);
    let companion_travel_time = graph.path_weight(&companion_path, WeightKey::TravelTime);

    Some(Legs {
        driver_distance,
        driver_travel_time,
        companion_distance,
        companion_travel_time,
        companion_path,
    })
}

/// Pick the best meeting node for every (driver, companion) pair.
///
/// For each candidate `n` the driver's time to `n` (`time_to`, fastest
/// path) and the companion-side road distance and time (`dist_from`,
/// `time_from`, shortest path by length) are computed. `n` replaces the
/// current best when
///
/// ```text
/// dist_from < best_dist  &&  time_from <= time_to + buffer
/// ```
///
/// Both conditions are required: a closer candidate that breaks the
/// buffer is skipped. Candidates unreachable on either leg are skipped.
/// `buffer_secs` is in the graph's travel-time unit.
///
/// Pairs whose driver has no route get no entry. Pairs where nothing
/// passes get [`IntersectionResult::none`].
pub fn select_best_intersection<G: RoadNetwork + ?Sized>(
    graph: &G,
    routes: &BTreeMap<DriverId, Route>,
    candidates: &BTreeMap<PairKey, Vec<Candidate>>,
    buffer_secs: f64,
) -> BTreeMap<PairKey, IntersectionResult> {
    let mut results = BTreeMap::new();

    for (key, list) in candidates {
        let Some(start) = routes.get(&key.driver).and_then(Route::source) else {
            continue;
        };

        let mut best = IntersectionResult::none();

        for candidate in list {
            let Some(legs) = evaluate(graph, start, candidate.node, key.companion) else {
                trace!(pair = %key, node = %candidate.node, "candidate unreachable");
                continue;
            };

            let within_buffer =
                legs.companion_travel_time <= legs.driver_travel_time + buffer_secs;

            trace!(
                pair = %key,
                node = %candidate.node,
                dist_from = legs.companion_distance,
                time_from = legs.companion_travel_time,
                time_to = legs.driver_travel_time,
                within_buffer,
                "candidate evaluated"
            );

            if legs.companion_distance < best.companion_distance && within_buffer {
                best = IntersectionResult {
                    node: Some(candidate.node),
                    companion_distance: legs.companion_distance,
                    companion_travel_time: legs.companion_travel_time,
                    driver_distance: legs.driver_distance,
                    driver_travel_time: legs.driver_travel_time,
                    companion_path: legs.companion_path,
                };
            }
        }

        match best.node {
            Some(node) => debug!(
                pair = %key,
                node = %node,
                distance = best.companion_distance,
                "meeting point chosen"
            ),
            None => debug!(pair = %key, "no meeting point within buffer"),
        }

        results.insert(key.clone(), best);
    }

    results
}
