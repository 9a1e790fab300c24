//! Aerial-distance pre-filter for meeting points.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, trace};

use crate::domain::{Candidate, DriverId, NodeId, PairKey, Route, aerial_distance_km};
use crate::graph::RoadNetwork;

/// Rank the nodes of each driver's route by straight-line distance to
/// each companion and keep the closest `top_k`.
///
/// Drivers with an empty route produce no entries. Nodes whose distance
/// cannot be computed (no coordinate on either side) are left out. Each
/// returned list is sorted ascending by distance, ties kept in route
/// order.
///
/// This bounds the road-distance work of the next stage to `top_k`
/// shortest-path pairs per driver instead of one per route node.
pub fn find_candidates<G: RoadNetwork + ?Sized>(
    graph: &G,
    routes: &BTreeMap<DriverId, Route>,
    companions: &BTreeSet<NodeId>,
    top_k: usize,
) -> BTreeMap<PairKey, Vec<Candidate>> {
    let mut candidates = BTreeMap::new();

    for (driver, route) in routes {
        if route.is_empty() {
            trace!(driver = %driver, "skipping driver without route");
            continue;
        }

        for &companion in companions {
            let target = graph.node_coordinate(companion);

            let mut scored: Vec<Candidate> = route
                .nodes()
                .iter()
                .map(|&node| {
                    Candidate::new(
                        node,
                        aerial_distance_km(graph.node_coordinate(node), target),
                    )
                })
                .filter(|c| c.aerial_km.is_finite())
                .collect();

            // Stable: equal distances stay in route order
            scored.sort_by(|a, b| a.aerial_km.total_cmp(&b.aerial_km));
            scored.truncate(top_k);

            candidates.insert(PairKey::new(driver.clone(), companion), scored);
        }
    }

    debug!(pairs = candidates.len(), top_k, "candidates found");

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::RoadGraphBuilder;
    use crate::matcher::fixtures::{driver, nodes, three_node_graph};

    fn routes(entries: Vec<(&str, Vec<i64>)>) -> BTreeMap<DriverId, Route> {
        entries
            .into_iter()
            .map(|(id, path)| {
                let route: Route = path.into_iter().map(NodeId).collect::<Vec<_>>().into();
                (driver(id), route)
            })
            .collect()
    }

    fn candidate_ids(list: &[Candidate]) -> Vec<i64> {
        list.iter().map(|c| c.node.0).collect()
    }

    #[test]
    fn ranks_route_nodes_by_aerial_distance() {
        let g = three_node_graph();
        let found = find_candidates(&g, &routes(vec![("d", vec![1, 2, 3])]), &nodes(&[2]), 5);

        let list = &found[&PairKey::new(driver("d"), NodeId(2))];
        assert_eq!(candidate_ids(list), vec![2, 3, 1]);
        assert_eq!(list[0].aerial_km, 0.0);
        assert!((list[1].aerial_km - 1.134).abs() < 0.01);
    }

    #[test]
    fn keeps_top_k() {
        let g = three_node_graph();
        let found = find_candidates(&g, &routes(vec![("d", vec![1, 2, 3])]), &nodes(&[2]), 2);

        let list = &found[&PairKey::new(driver("d"), NodeId(2))];
        assert_eq!(candidate_ids(list), vec![2, 3]);
    }

    #[test]
    fn zero_top_k_keeps_nothing() {
        let g = three_node_graph();
        let found = find_candidates(&g, &routes(vec![("d", vec![1, 2, 3])]), &nodes(&[2]), 0);

        assert!(found[&PairKey::new(driver("d"), NodeId(2))].is_empty());
    }

    #[test]
    fn empty_route_produces_no_entry() {
        let g = three_node_graph();
        let found = find_candidates(
            &g,
            &routes(vec![("a", vec![1, 2, 3]), ("b", vec![])]),
            &nodes(&[2]),
            5,
        );

        assert_eq!(found.len(), 1);
        assert!(found.contains_key(&PairKey::new(driver("a"), NodeId(2))));
    }

    #[test]
    fn one_entry_per_companion() {
        let g = three_node_graph();
        let found = find_candidates(&g, &routes(vec![("d", vec![1, 2, 3])]), &nodes(&[2, 3]), 5);

        assert_eq!(found.len(), 2);
        let to_office = &found[&PairKey::new(driver("d"), NodeId(3))];
        assert_eq!(candidate_ids(to_office), vec![3, 2, 1]);
    }

    #[test]
    fn unlocated_nodes_are_excluded() {
        let g = RoadGraphBuilder::new()
            .node(1, 12.90, 77.60)
            .unlocated_node(2)
            .node(3, 12.95, 77.60)
            .build()
            .unwrap();

        let found = find_candidates(&g, &routes(vec![("d", vec![1, 2, 3])]), &nodes(&[3]), 5);
        assert_eq!(
            candidate_ids(&found[&PairKey::new(driver("d"), NodeId(3))]),
            vec![3, 1]
        );

        // Unlocated companion: nothing can be ranked
        let found = find_candidates(&g, &routes(vec![("d", vec![1, 3])]), &nodes(&[2]), 5);
        assert!(found[&PairKey::new(driver("d"), NodeId(2))].is_empty());
    }

    #[test]
    fn ties_keep_route_order() {
        let g = RoadGraphBuilder::new()
            .node(1, 12.90, 77.60)
            .node(2, 12.90, 77.60)
            .node(3, 12.90, 77.60)
            .node(9, 12.95, 77.60)
            .build()
            .unwrap();

        let found = find_candidates(&g, &routes(vec![("d", vec![3, 1, 2])]), &nodes(&[9]), 5);
        assert_eq!(
            candidate_ids(&found[&PairKey::new(driver("d"), NodeId(9))]),
            vec![3, 1, 2]
        );
    }
}
