//! Mode-penalized shortest route search.
//!
//! The search runs over `(station, arriving mode)` states rather than plain
//! stations: the cheapest way to reach a station by bus is not necessarily
//! the cheapest way to continue from it by metro.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use tracing::{debug, trace};

use crate::domain::{DomainError, Metric, Mode, StationId};
use crate::knowledge::KnowledgeBase;

use super::config::PlannerConfig;

/// Error from route planning.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlannerError {
    /// Request fields failed validation
    #[error(transparent)]
    Invalid(#[from] DomainError),

    /// Station does not appear in the knowledge base
    #[error("unknown station: {0}")]
    UnknownStation(StationId),

    /// Goal is unreachable from start
    #[error("no route from {start} to {goal}")]
    NoRouteFound { start: StationId, goal: StationId },
}

/// One traversed edge of a route.
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    pub from: StationId,
    pub to: StationId,
    pub mode: Mode,
    /// The edge's metric attribute.
    pub weight: f64,
    /// Mode-switch penalty paid to take this edge.
    pub penalty: f64,
}

/// A found route.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Stations from start to goal inclusive.
    pub stations: Vec<StationId>,
    /// Edges taken, one fewer than `stations`.
    pub legs: Vec<Leg>,
    /// Accumulated metric plus penalties.
    pub total: f64,
    /// The metric that was minimised.
    pub metric: Metric,
}

impl Route {
    /// Number of times consecutive legs change mode.
    pub fn mode_switches(&self) -> usize {
        self.legs
            .windows(2)
            .filter(|pair| pair[0].mode != pair[1].mode)
            .count()
    }

    /// Station names joined with arrows, e.g. `A -> B -> C`.
    pub fn display_path(&self) -> String {
        self.stations
            .iter()
            .map(StationId::as_str)
            .collect::<Vec<_>>()
            .join(" -> ")
    }

    /// The total formatted to two decimal places.
    pub fn total_display(&self) -> String {
        format!("{:.2}", self.total)
    }
}

/// A node of the predecessor arena: one pushed search state.
#[derive(Debug)]
struct Step {
    station: StationId,
    /// Mode of the edge used to arrive here; `None` at the start.
    mode: Option<Mode>,
    parent: Option<usize>,
    weight: f64,
    penalty: f64,
}

/// Priority queue entry, ordered so that `BinaryHeap` pops the lowest value
/// first and, among equal values, the earliest pushed.
#[derive(Debug)]
struct QueueEntry {
    value: f64,
    seq: usize,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for min-heap behaviour
        other
            .value
            .total_cmp(&self.value)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Find the minimum-value route from `start` to `goal`.
///
/// Each edge contributes its `metric` attribute, plus `transfer_penalty`
/// when its mode differs from the mode of the edge used to arrive at its
/// origin. The first edge out of `start` is never penalised.
///
/// Returns `None` when `goal` is unreachable, including when `start` has no
/// outgoing edges. When `start == goal` the route is the single station with
/// a total of zero.
pub fn find_route(
    kb: &KnowledgeBase,
    start: &StationId,
    goal: &StationId,
    metric: Metric,
    transfer_penalty: f64,
) -> Option<Route> {
    // Every pushed state lives in the arena; the queue holds indices into it
    let mut arena: Vec<Step> = vec![Step {
        station: start.clone(),
        mode: None,
        parent: None,
        weight: 0.0,
        penalty: 0.0,
    }];
    let mut queue = BinaryHeap::new();
    queue.push(QueueEntry { value: 0.0, seq: 0 });

    let mut best: HashMap<(StationId, Option<Mode>), f64> = HashMap::new();
    let mut expanded = 0usize;

    while let Some(QueueEntry { value, seq }) = queue.pop() {
        let station = arena[seq].station.clone();
        let arrived_by = arena[seq].mode.clone();

        if &station == goal {
            debug!(
                start = %start,
                goal = %goal,
                expanded,
                pushed = arena.len(),
                total = value,
                "route found"
            );
            return Some(reconstruct(&arena, seq, value, metric));
        }

        let key = (station.clone(), arrived_by.clone());
        if best.get(&key).is_some_and(|&seen| seen <= value) {
            continue;
        }
        best.insert(key, value);
        expanded += 1;

        trace!(
            station = %station,
            mode = arrived_by.as_ref().map(Mode::as_str).unwrap_or("-"),
            value,
            "expanding state"
        );

        for (next, edge) in kb.neighbors(&station) {
            let weight = edge.weight(metric);
            let penalty = match &arrived_by {
                Some(previous) if previous != &edge.mode => transfer_penalty,
                _ => 0.0,
            };

            let index = arena.len();
            arena.push(Step {
                station: next.clone(),
                mode: Some(edge.mode.clone()),
                parent: Some(seq),
                weight,
                penalty,
            });
            queue.push(QueueEntry {
                value: value + weight + penalty,
                seq: index,
            });
        }
    }

    debug!(
        start = %start,
        goal = %goal,
        expanded,
        pushed = arena.len(),
        "no route"
    );
    None
}

/// Walk parent links back from `last` and build the route.
fn reconstruct(arena: &[Step], last: usize, total: f64, metric: Metric) -> Route {
    let mut chain = Vec::new();
    let mut cursor = Some(last);
    while let Some(index) = cursor {
        chain.push(index);
        cursor = arena[index].parent;
    }
    chain.reverse();

    let stations: Vec<StationId> = chain
        .iter()
        .map(|&index| arena[index].station.clone())
        .collect();

    let legs = chain
        .windows(2)
        .filter_map(|pair| {
            let to = &arena[pair[1]];
            Some(Leg {
                from: arena[pair[0]].station.clone(),
                to: to.station.clone(),
                mode: to.mode.clone()?,
                weight: to.weight,
                penalty: to.penalty,
            })
        })
        .collect();

    Route {
        stations,
        legs,
        total,
        metric,
    }
}

/// A validated route query.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub start: StationId,
    pub goal: StationId,
    pub metric: Metric,
}

impl RouteRequest {
    /// Create a new route request.
    pub fn new(start: StationId, goal: StationId, metric: Metric) -> Self {
        Self {
            start,
            goal,
            metric,
        }
    }

    /// Build a request from raw user input.
    pub fn parse(start: &str, goal: &str, metric: &str) -> Result<Self, PlannerError> {
        Ok(Self {
            start: StationId::parse(start)?,
            goal: StationId::parse(goal)?,
            metric: metric.parse()?,
        })
    }

    /// Check both stations are known to the knowledge base.
    pub fn validate(&self, kb: &KnowledgeBase) -> Result<(), PlannerError> {
        for station in [&self.start, &self.goal] {
            if !kb.contains_station(station) {
                return Err(PlannerError::UnknownStation(station.clone()));
            }
        }
        Ok(())
    }
}

/// Route planner over a knowledge base.
pub struct Planner<'a> {
    kb: &'a KnowledgeBase,
    config: &'a PlannerConfig,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(kb: &'a KnowledgeBase, config: &'a PlannerConfig) -> Self {
        Self { kb, config }
    }

    /// Validate the request and search for the best route.
    pub fn plan(&self, request: &RouteRequest) -> Result<Route, PlannerError> {
        request.validate(self.kb)?;

        find_route(
            self.kb,
            &request.start,
            &request.goal,
            request.metric,
            self.config.mode_switch_penalty,
        )
        .ok_or_else(|| PlannerError::NoRouteFound {
            start: request.start.clone(),
            goal: request.goal.clone(),
        })
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
