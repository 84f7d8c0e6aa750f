//! Askama templates for the web frontend.

use askama::Template;

use crate::domain::StationId;
use crate::planner::Route;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with the station list and route form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub stations: Vec<String>,
}

impl IndexTemplate {
    /// Create from the registered stations.
    pub fn new(stations: &[StationId]) -> Self {
        Self {
            stations: stations.iter().map(|s| s.as_str().to_string()).collect(),
        }
    }
}

// ============================================================================
// Fragment Templates (no base.html)
// ============================================================================

/// Route result fragment.
#[derive(Template)]
#[template(path = "route_result.html")]
pub struct RouteResultTemplate {
    pub route: RouteView,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Route view model for templates.
#[derive(Debug, Clone)]
pub struct RouteView {
    pub origin: String,
    pub destination: String,
    pub metric: String,
    pub path: String,
    pub total: String,
    pub legs: Vec<LegView>,
}

/// Leg view model for templates.
#[derive(Debug, Clone)]
pub struct LegView {
    pub from: String,
    pub to: String,
    pub mode: String,
    pub weight: String,
    pub penalty: Option<String>,
}

impl RouteView {
    /// Create from a domain Route.
    pub fn from_route(route: &Route) -> Self {
        let name = |s: Option<&StationId>| s.map(|s| s.as_str().to_string()).unwrap_or_default();

        Self {
            origin: name(route.stations.first()),
            destination: name(route.stations.last()),
            metric: route.metric.to_string(),
            path: route.display_path(),
            total: route.total_display(),
            legs: route
                .legs
                .iter()
                .map(|leg| LegView {
                    from: leg.from.as_str().to_string(),
                    to: leg.to.as_str().to_string(),
                    mode: leg.mode.as_str().to_string(),
                    weight: format!("{:.2}", leg.weight),
                    penalty: (leg.penalty > 0.0).then(|| format!("{:.2}", leg.penalty)),
                })
                .collect(),
        }
    }
}
