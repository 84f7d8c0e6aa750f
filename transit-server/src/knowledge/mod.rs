//! Transit network knowledge base.
//!
//! Stores directed, attributed connections between stations as facts keyed by
//! `(origin, destination)`, and enriches them with two inference rules:
//!
//! - **symmetry**: every connection can be travelled in reverse with the same
//!   mode, time and cost;
//! - **transfers**: two stations reached from a common station by different
//!   modes are joined by a pedestrian `walk` connection.
//!
//! Rules are applied explicitly (see [`KnowledgeBase::reconcile`]) rather than
//! on every insertion, so `add_edge` stays cheap and each rule application is
//! a separate, repeatable step.

mod seed;

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Metric, Mode, StationId};

pub use seed::{EdgeFact, NetworkBuilder, NetworkFile, SeedError, default_network};

/// Attributes of a directed connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Transport mode (e.g. `metro`, `bus`, `walk`).
    pub mode: Mode,
    /// Travel duration.
    pub time: f64,
    /// Fare.
    pub cost: f64,
}

impl Edge {
    /// Create a new edge.
    pub fn new(mode: Mode, time: f64, cost: f64) -> Self {
        Self { mode, time, cost }
    }

    /// The attribute selected by `metric`.
    pub fn weight(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Time => self.time,
            Metric::Cost => self.cost,
        }
    }
}

/// A fact base of directed connections.
///
/// At most one edge exists per ordered station pair; inserting an existing
/// pair overwrites its attributes. Storage is ordered, so neighbour and
/// station enumeration are deterministic (ascending by station name).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KnowledgeBase {
    edges: BTreeMap<(StationId, StationId), Edge>,
    /// Keys written by the transfer rule; these never seed transfers.
    transfers: BTreeSet<(StationId, StationId)>,
}

impl KnowledgeBase {
    /// Create an empty knowledge base.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the `origin -> destination` edge.
    ///
    /// With `bidirectional`, the reverse edge is written too. No validation
    /// is performed on `time` or `cost`.
    pub fn add_edge(
        &mut self,
        origin: StationId,
        destination: StationId,
        mode: Mode,
        time: f64,
        cost: f64,
        bidirectional: bool,
    ) {
        let edge = Edge::new(mode, time, cost);
        if bidirectional {
            let reverse = (destination.clone(), origin.clone());
            self.transfers.remove(&reverse);
            self.edges.insert(reverse, edge.clone());
        }
        let key = (origin, destination);
        self.transfers.remove(&key);
        self.edges.insert(key, edge);
    }

    /// Look up the edge for an ordered pair.
    pub fn edge(&self, origin: &StationId, destination: &StationId) -> Option<&Edge> {
        self.edges.get(&(origin.clone(), destination.clone()))
    }

    /// Whether an edge exists for an ordered pair.
    pub fn has_edge(&self, origin: &StationId, destination: &StationId) -> bool {
        self.edge(origin, destination).is_some()
    }

    /// Every edge leaving `node`, in ascending destination order.
    ///
    /// The iterator borrows the knowledge base and may be recreated freely.
    pub fn neighbors<'a>(
        &'a self,
        node: &StationId,
    ) -> impl Iterator<Item = (&'a StationId, &'a Edge)> + use<'a> {
        let node = node.clone();
        self.edges
            .range((node.clone(), StationId::new(""))..)
            .take_while(move |((origin, _), _)| *origin == node)
            .map(|((_, destination), edge)| (destination, edge))
    }

    /// Every stored edge, ordered by `(origin, destination)`.
    pub fn edges(&self) -> impl Iterator<Item = (&StationId, &StationId, &Edge)> {
        self.edges.iter().map(|((o, d), e)| (o, d, e))
    }

    /// Apply the symmetry rule once.
    ///
    /// For every `u -> v` without a `v -> u`, the reverse edge is added with
    /// identical attributes. Candidates come from a snapshot taken before any
    /// insertion, so a second call is a no-op.
    pub fn make_bidirectional(&mut self) {
        let missing: Vec<((StationId, StationId), Edge)> = self
            .edges
            .iter()
            .filter(|((u, v), _)| !self.edges.contains_key(&(v.clone(), u.clone())))
            .map(|((u, v), edge)| ((v.clone(), u.clone()), edge.clone()))
            .collect();

        let added = missing.len();
        for (key, edge) in missing {
            self.edges.entry(key).or_insert(edge);
        }

        debug!(added, total = self.edges.len(), "symmetry rule applied");
    }

    /// Apply the transfer rule once.
    ///
    /// For every station `a` with edges `a -> b` and `a -> d` of different
    /// modes (`b != d`), a `walk` edge with time `penalty_time` and zero cost
    /// is added in both directions between `b` and `d` unless `b -> d` is
    /// already known.
    ///
    /// Existing facts are never overwritten: each walk direction is written
    /// only when that ordered pair is absent.
    ///
    /// Edges synthesized by this rule never seed further transfers, so once
    /// every pair has been joined a repeated call adds nothing. Base facts
    /// with mode `walk` seed transfers like any other mode.
    pub fn add_transfers(&mut self, penalty_time: f64) {
        let mut by_origin: BTreeMap<&StationId, Vec<(&StationId, &Mode)>> = BTreeMap::new();
        for (key, edge) in &self.edges {
            if self.transfers.contains(key) {
                continue;
            }
            let (origin, destination) = key;
            by_origin
                .entry(origin)
                .or_default()
                .push((destination, &edge.mode));
        }

        let mut pairs: BTreeSet<(StationId, StationId)> = BTreeSet::new();
        for outgoing in by_origin.values() {
            for (b, mode_b) in outgoing {
                for (d, mode_d) in outgoing {
                    if b == d || mode_b == mode_d {
                        continue;
                    }
                    let key = ((*b).clone(), (*d).clone());
                    if !self.edges.contains_key(&key) {
                        pairs.insert(key);
                    }
                }
            }
        }

        let before = self.edges.len();
        for (b, d) in pairs {
            let walk = Edge::new(Mode::walk(), penalty_time, 0.0);
            for key in [(d.clone(), b.clone()), (b, d)] {
                if !self.edges.contains_key(&key) {
                    self.transfers.insert(key.clone());
                    self.edges.insert(key, walk.clone());
                }
            }
        }

        debug!(
            added = self.edges.len() - before,
            penalty_time, "transfer rule applied"
        );
    }

    /// Apply symmetry, then transfers.
    ///
    /// Callers run this after inserting new base facts.
    pub fn reconcile(&mut self, transfer_walk_time: f64) {
        self.make_bidirectional();
        self.add_transfers(transfer_walk_time);
    }

    /// All distinct stations appearing as an origin or destination, sorted.
    pub fn stations(&self) -> Vec<StationId> {
        let set: BTreeSet<&StationId> = self
            .edges
            .keys()
            .flat_map(|(origin, destination)| [origin, destination])
            .collect();
        set.into_iter().cloned().collect()
    }

    /// Whether `station` appears in any edge.
    pub fn contains_station(&self, station: &StationId) -> bool {
        self.edges
            .keys()
            .any(|(origin, destination)| origin == station || destination == station)
    }

    /// Number of stored directed edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if no edges are stored.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
