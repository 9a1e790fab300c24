//! Domain types for the carpool matcher.
//!
//! These are the validated values that flow between the graph layer and
//! the matching pipeline. Coordinates and driver ids are checked at
//! construction time; routes and match results are derived, read-only
//! artifacts produced fresh for every matching request.

mod coordinate;
mod driver;
mod error;
mod intersection;
mod route;

pub use coordinate::{Coordinate, EARTH_RADIUS_KM, aerial_distance_km, distance_km};
pub use driver::{DriverId, PairKey};
pub use error::DomainError;
pub use intersection::{Candidate, IntersectionResult, Match};
pub use route::{NodeId, Route, WeightKey};
