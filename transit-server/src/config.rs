//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::planner::PlannerConfig;

/// Listen address environment variable.
pub const ADDR_VAR: &str = "TRANSIT_ADDR";
/// Optional JSON network file environment variable.
pub const NETWORK_VAR: &str = "TRANSIT_NETWORK";
/// Walk transfer time environment variable.
pub const WALK_TIME_VAR: &str = "TRANSIT_WALK_TIME";
/// Mode-switch penalty environment variable.
pub const SWITCH_PENALTY_VAR: &str = "TRANSIT_SWITCH_PENALTY";

const DEFAULT_ADDR: &str = "127.0.0.1:3000";

/// Error reading configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Variable is set but cannot be parsed
    #[error("{var}={value:?} is invalid: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Top-level server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub addr: SocketAddr,

    /// Network file to seed from, instead of the built-in network.
    pub network_file: Option<PathBuf>,

    /// Penalty knobs for reconciliation and search.
    pub planner: PlannerConfig,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through a variable lookup function.
    ///
    /// Unset variables fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let addr_value = lookup(ADDR_VAR).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr_value.parse().map_err(|_| ConfigError::Invalid {
            var: ADDR_VAR,
            value: addr_value.clone(),
            reason: "expected host:port",
        })?;

        let network_file = lookup(NETWORK_VAR)
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let defaults = PlannerConfig::default();
        let planner = PlannerConfig::new(
            penalty(&lookup, WALK_TIME_VAR, defaults.transfer_walk_time)?,
            penalty(&lookup, SWITCH_PENALTY_VAR, defaults.mode_switch_penalty)?,
        );

        Ok(Self {
            addr,
            network_file,
            planner,
        })
    }
}

/// Parse a non-negative number, or return `default` when unset.
fn penalty(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: f64,
) -> Result<f64, ConfigError> {
    let Some(value) = lookup(var) else {
        return Ok(default);
    };
    match value.trim().parse::<f64>() {
        Ok(n) if n.is_finite() && n >= 0.0 => Ok(n),
        _ => Err(ConfigError::Invalid {
            var,
            value,
            reason: "expected a non-negative number",
        }),
    }
}
