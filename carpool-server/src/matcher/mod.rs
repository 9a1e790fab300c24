//! Driver/companion route matching.
//!
//! This module implements the core algorithm that answers: "which driver,
//! on their way to the office, can pick up this companion with the least
//! walking for the companion?"
//!
//! The pipeline runs in four stages, each a plain function over the
//! previous stage's output:
//!
//! 1. [`compute_driver_routes`]: each driver's fastest route to the office.
//! 2. [`find_candidates`]: the route nodes closest to the companion as the
//!    crow flies, a cheap pre-filter.
//! 3. [`select_best_intersection`]: road distances for the candidates and
//!    the buffer rule, giving one meeting point per driver.
//! 4. [`select_best_match`]: the best driver overall.
//!
//! [`Matcher`] wires the stages together for a single request.

mod candidates;
mod config;
mod intersection;
mod pipeline;
mod rank;
mod routes;

#[cfg(test)]
mod fixtures;

pub use candidates::find_candidates;
pub use config::MatchConfig;
pub use intersection::select_best_intersection;
pub use pipeline::{MatchError, MatchOutcome, MatchRequest, Matcher};
pub use rank::{rank_results, select_best_match};
pub use routes::compute_driver_routes;
