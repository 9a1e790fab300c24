//! Driver identifiers and (driver, companion) keys.

use std::fmt;

use serde::Serialize;

use super::{DomainError, NodeId};

/// A non-empty driver identifier, e.g. `"driver1"`.
///
/// Ordering is lexical; it gives result maps a stable iteration order so
/// tie-breaks between drivers are deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DriverId(String);

impl DriverId {
    /// Parse a driver id, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyDriverId);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DriverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key of a per-(driver, companion) result.
///
/// Ordered by driver first, then companion node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey {
    /// The driver being considered.
    pub driver: DriverId,

    /// Graph node the companion was snapped to.
    pub companion: NodeId,
}

impl PairKey {
    pub fn new(driver: DriverId, companion: NodeId) -> Self {
        Self { driver, companion }
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.driver, self.companion)
    }
}
