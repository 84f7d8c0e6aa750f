//! Base facts for the knowledge base.
//!
//! Provides the built-in demonstration network and loading of base facts
//! from a JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::KnowledgeBase;
use crate::domain::{DomainError, Mode, StationId, check_weight};

/// Error loading a network file.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    /// The file could not be read
    #[error("failed to read network file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid network description
    #[error("failed to parse network file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A fact names a blank station or mode, or carries a bad weight
    #[error("invalid network fact: {0}")]
    Invalid(#[from] DomainError),
}

fn default_bidirectional() -> bool {
    true
}

/// A single base fact as it appears in a network file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeFact {
    pub from: StationId,
    pub to: StationId,
    pub mode: Mode,
    pub time: f64,
    pub cost: f64,
    #[serde(default = "default_bidirectional")]
    pub bidirectional: bool,
}

impl EdgeFact {
    /// Normalize names and check weights, as for facts added at runtime.
    pub fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            from: StationId::parse(self.from.as_str())?,
            to: StationId::parse(self.to.as_str())?,
            mode: Mode::parse(self.mode.as_str())?,
            time: check_weight("time", self.time)?,
            cost: check_weight("cost", self.cost)?,
            bidirectional: self.bidirectional,
        })
    }
}

/// A network description: a list of base facts.
///
/// ```json
/// { "edges": [ { "from": "A", "to": "B", "mode": "metro", "time": 4, "cost": 1.5 } ] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkFile {
    pub edges: Vec<EdgeFact>,
}

impl NetworkFile {
    /// Read and parse a network file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: display.clone(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| SeedError::Parse {
            path: display,
            source,
        })
    }

    /// Validate every fact and insert it into a fresh knowledge base.
    ///
    /// Station names are trimmed, modes are normalized to lowercase and
    /// weights must be finite and non-negative. The first invalid fact
    /// aborts the load. Rules are not applied; callers reconcile afterwards.
    pub fn into_knowledge_base(self) -> Result<KnowledgeBase, SeedError> {
        let mut kb = KnowledgeBase::new();
        for fact in self.edges {
            let fact = fact.validate()?;
            kb.add_edge(
                fact.from,
                fact.to,
                fact.mode,
                fact.time,
                fact.cost,
                fact.bidirectional,
            );
        }
        Ok(kb)
    }
}

/// Builder for a knowledge base of bidirectional base facts.
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    inner: KnowledgeBase,
}

impl NetworkBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a bidirectional connection.
    pub fn connect(mut self, from: &str, to: &str, mode: &str, time: f64, cost: f64) -> Self {
        self.inner.add_edge(
            StationId::new(from),
            StationId::new(to),
            Mode::new(mode),
            time,
            cost,
            true,
        );
        self
    }

    /// Build the knowledge base.
    pub fn build(self) -> KnowledgeBase {
        self.inner
    }
}

/// The demonstration network: a metro line, a bus line and a tram line
/// between `A` and `D`.
///
/// Only base facts are included; call [`KnowledgeBase::reconcile`] to derive
/// reverse and transfer edges.
pub fn default_network() -> KnowledgeBase {
    NetworkBuilder::new()
        // Metro: A - B - C - D
        .connect("A", "B", "metro", 4.0, 1.5)
        .connect("B", "C", "metro", 3.0, 1.2)
        .connect("C", "D", "metro", 5.0, 1.8)
        // Bus: B - P1 - P2 - D
        .connect("B", "P1", "bus", 6.0, 0.9)
        .connect("P1", "P2", "bus", 8.0, 1.1)
        .connect("P2", "D", "bus", 7.0, 1.0)
        // Tram: A - Centro - D
        .connect("A", "Centro", "tram", 10.0, 1.7)
        .connect("Centro", "D", "tram", 9.0, 1.6)
        .build()
}
