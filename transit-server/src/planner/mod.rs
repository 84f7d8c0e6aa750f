//! Route planner using a mode-aware Dijkstra search.
//!
//! This module answers: "what is the cheapest way from here to there?"
//! over a reconciled [`KnowledgeBase`](crate::knowledge::KnowledgeBase),
//! where cheapest means the smallest accumulated time or cost plus a
//! surcharge for every change of transport mode.

mod config;
mod search;

pub use config::PlannerConfig;
pub use search::{Leg, Planner, PlannerError, Route, RouteRequest, find_route};
