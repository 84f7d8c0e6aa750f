//! Planner configuration.

/// Configuration parameters for route planning.
///
/// The two penalties are independent: `transfer_walk_time` is the duration
/// written onto synthesized walk edges when the knowledge base is
/// reconciled, while `mode_switch_penalty` is added by the search every time
/// a route changes mode.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Time assigned to synthesized pedestrian transfer edges.
    pub transfer_walk_time: f64,

    /// Surcharge added to the accumulated metric on each change of mode.
    pub mode_switch_penalty: f64,
}

impl PlannerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(transfer_walk_time: f64, mode_switch_penalty: f64) -> Self {
        Self {
            transfer_walk_time,
            mode_switch_penalty,
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            transfer_walk_time: 3.0,
            mode_switch_penalty: 2.0,
        }
    }
}
