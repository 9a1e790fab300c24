//! Server configuration from environment variables.
//!
//! | Variable                      | Default          |
//! |-------------------------------|------------------|
//! | `CARPOOL_GRAPH_PATH`          | required         |
//! | `CARPOOL_BIND_ADDR`           | `127.0.0.1:3000` |
//! | `CARPOOL_MATCH_TIMEOUT_SECS`  | `30`             |
//! | `CARPOOL_TOP_K`               | `5`              |
//! | `CARPOOL_BUFFER_MINS`         | `5`              |
//! | `CARPOOL_OFFICE_LAT`          | `12.934`         |
//! | `CARPOOL_OFFICE_LON`          | `77.62`          |

use std::fmt::Display;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::domain::Coordinate;
use crate::matcher::MatchConfig;

/// Default office location (latitude, longitude).
pub const DEFAULT_OFFICE: (f64, f64) = (12.934, 77.62);

/// Errors reading the configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is not set
    #[error("{0} is not set")]
    Missing(&'static str),

    /// A variable could not be parsed
    #[error("invalid {key}={value}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Everything the server binary needs to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Road-network snapshot to load at startup.
    pub graph_path: PathBuf,

    /// Address to listen on.
    pub bind_addr: SocketAddr,

    /// Deadline for one matching run.
    pub match_timeout: Duration,

    /// Matcher tuning.
    pub match_config: MatchConfig,

    /// Destination used when a request names none.
    pub default_office: Coordinate,
}

impl ServerConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through a variable lookup function.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let graph_path = lookup("CARPOOL_GRAPH_PATH")
            .map(PathBuf::from)
            .ok_or(ConfigError::Missing("CARPOOL_GRAPH_PATH"))?;

        let bind_addr = parse_or(
            &lookup,
            "CARPOOL_BIND_ADDR",
            SocketAddr::from(([127, 0, 0, 1], 3000)),
        )?;
        let timeout_secs: u64 = parse_or(&lookup, "CARPOOL_MATCH_TIMEOUT_SECS", 30)?;

        let defaults = MatchConfig::default();
        let top_k = parse_or(&lookup, "CARPOOL_TOP_K", defaults.top_k)?;
        let buffer_mins = parse_or(&lookup, "CARPOOL_BUFFER_MINS", defaults.buffer_mins)?;
        let buffer_problem = if buffer_mins < 0 {
            Some("must not be negative")
        } else if chrono::Duration::try_minutes(buffer_mins).is_none() {
            Some("too large")
        } else {
            None
        };
        if let Some(reason) = buffer_problem {
            return Err(ConfigError::Invalid {
                key: "CARPOOL_BUFFER_MINS",
                value: buffer_mins.to_string(),
                reason: reason.to_string(),
            });
        }

        let lat = parse_or(&lookup, "CARPOOL_OFFICE_LAT", DEFAULT_OFFICE.0)?;
        let lon = parse_or(&lookup, "CARPOOL_OFFICE_LON", DEFAULT_OFFICE.1)?;
        let default_office = Coordinate::new(lat, lon).map_err(|e| ConfigError::Invalid {
            key: "CARPOOL_OFFICE_LAT",
            value: format!("{lat},{lon}"),
            reason: e.to_string(),
        })?;

        Ok(Self {
            graph_path,
            bind_addr,
            match_timeout: Duration::from_secs(timeout_secs),
            match_config: MatchConfig::new(top_k, buffer_mins),
            default_office,
        })
    }
}

/// Parse an optional variable, falling back to `default` when unset.
fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value,
        }),
    }
}
