//! Domain error types.
//!
//! These errors represent validation failures on values entering the
//! domain layer. They are distinct from graph loading and HTTP errors.

/// Domain-level errors for input validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Latitude or longitude outside the valid range, or not finite
    #[error("invalid coordinate ({lat}, {lon}): {reason}")]
    InvalidCoordinate {
        lat: f64,
        lon: f64,
        reason: &'static str,
    },

    /// Driver identifier is empty or whitespace
    #[error("driver id must not be empty")]
    EmptyDriverId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::InvalidCoordinate {
            lat: 91.0,
            lon: 0.0,
            reason: "latitude must be within [-90, 90]",
        };
        assert_eq!(
            err.to_string(),
            "invalid coordinate (91, 0): latitude must be within [-90, 90]"
        );

        let err = DomainError::EmptyDriverId;
        assert_eq!(err.to_string(), "driver id must not be empty");
    }
}
