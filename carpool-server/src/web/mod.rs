//! Web layer for the carpool matcher.
//!
//! Provides a small JSON API around the matching pipeline. Rendering and
//! session handling belong to whatever client calls it.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
