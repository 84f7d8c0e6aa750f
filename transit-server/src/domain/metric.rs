//! Optimisation metric selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// Which edge attribute a route search accumulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Travel duration.
    Time,
    /// Fare.
    Cost,
}

impl Metric {
    /// Returns the metric name as used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Time => "time",
            Metric::Cost => "cost",
        }
    }
}

impl FromStr for Metric {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "time" => Ok(Metric::Time),
            "cost" => Ok(Metric::Cost),
            _ => Err(DomainError::InvalidMetric(s.to_string())),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
