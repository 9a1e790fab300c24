//! Ranking of per-driver results.

use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::{IntersectionResult, Match, PairKey};

/// Pick the driver whose meeting point is closest to the companion by road.
///
/// Results are scanned in key order (driver id, then companion node) and
/// only a strictly smaller distance replaces the current best, so ties go
/// to the first key. Returns `None` when no pair found a meeting point;
/// that is a normal "no driver qualifies" outcome.
pub fn select_best_match(results: &BTreeMap<PairKey, IntersectionResult>) -> Option<Match> {
    let mut best: Option<Match> = None;

    for (key, result) in results {
        let Some(meeting_node) = result.node else {
            continue;
        };

        let better = best
            .as_ref()
            .is_none_or(|b| result.companion_distance < b.result.companion_distance);

        if better {
            best = Some(Match {
                driver: key.driver.clone(),
                companion: key.companion,
                meeting_node,
                result: result.clone(),
            });
        }
    }

    match &best {
        Some(m) => debug!(
            driver = %m.driver,
            meeting_node = %m.meeting_node,
            distance = m.result.companion_distance,
            "best match selected"
        ),
        None => debug!(pairs = results.len(), "no driver qualifies"),
    }

    best
}

/// All results ordered by companion distance, closest first.
///
/// The sort is stable over key order, and pairs without a meeting point
/// (infinite distance) come last.
pub fn rank_results(
    results: &BTreeMap<PairKey, IntersectionResult>,
) -> Vec<(&PairKey, &IntersectionResult)> {
    let mut ranked: Vec<_> = results.iter().collect();
    ranked.sort_by(|a, b| a.1.companion_distance.total_cmp(&b.1.companion_distance));
    ranked
}
