//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, Metric, Mode, StationId, check_weight};
use crate::knowledge::EdgeFact;
use crate::planner::{Leg, Route};

/// Response listing registered stations.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    /// Station names, sorted
    pub stations: Vec<String>,
}

/// Request to add a new route between two stations.
#[derive(Debug, Deserialize)]
pub struct AddEdgeRequest {
    /// Origin station name
    pub from: String,

    /// Destination station name
    pub to: String,

    /// Transport mode (case-insensitive)
    pub mode: String,

    /// Travel time
    pub time: f64,

    /// Fare
    pub cost: f64,
}

impl AddEdgeRequest {
    /// Validate into a bidirectional base fact.
    pub fn into_fact(self) -> Result<EdgeFact, DomainError> {
        Ok(EdgeFact {
            from: StationId::parse(&self.from)?,
            to: StationId::parse(&self.to)?,
            mode: Mode::parse(&self.mode)?,
            time: check_weight("time", self.time)?,
            cost: check_weight("cost", self.cost)?,
            bidirectional: true,
        })
    }
}

/// Response after adding a route.
#[derive(Debug, Serialize)]
pub struct AddEdgeResponse {
    /// Directed edges stored after reconciliation
    pub edges: usize,

    /// Distinct stations after reconciliation
    pub stations: usize,
}

/// Query for the best route.
#[derive(Debug, Deserialize)]
pub struct RouteQuery {
    /// Origin station name
    pub from: String,

    /// Destination station name
    pub to: String,

    /// "time" or "cost" (defaults to "time")
    pub metric: Option<String>,
}

/// A found route.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    /// Stations from origin to destination
    pub path: Vec<String>,

    /// Edges taken
    pub legs: Vec<LegResult>,

    /// Metric that was minimised
    pub metric: Metric,

    /// Accumulated metric plus mode-switch penalties
    pub total: f64,

    /// Total formatted to two decimals
    pub total_display: String,

    /// Number of mode changes along the route
    pub mode_switches: usize,
}

impl RouteResponse {
    /// Create from a domain Route.
    pub fn from_route(route: &Route) -> Self {
        Self {
            path: route
                .stations
                .iter()
                .map(|s| s.as_str().to_string())
                .collect(),
            legs: route.legs.iter().map(LegResult::from_leg).collect(),
            metric: route.metric,
            total: route.total,
            total_display: route.total_display(),
            mode_switches: route.mode_switches(),
        }
    }
}

/// A leg of a route.
#[derive(Debug, Serialize)]
pub struct LegResult {
    pub from: String,
    pub to: String,
    pub mode: String,

    /// The edge's time or cost
    pub weight: f64,

    /// Mode-switch penalty paid for this leg
    pub penalty: f64,
}

impl LegResult {
    /// Create from a domain Leg.
    pub fn from_leg(leg: &Leg) -> Self {
        Self {
            from: leg.from.as_str().to_string(),
            to: leg.to.as_str().to_string(),
            mode: leg.mode.as_str().to_string(),
            weight: leg.weight,
            penalty: leg.penalty,
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
