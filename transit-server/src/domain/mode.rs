//! Transport mode labels.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// The mode assigned to synthesized pedestrian transfer edges.
pub const WALK: &str = "walk";

/// A transport mode label such as `metro`, `bus`, `tram` or `walk`.
///
/// Modes are compared as plain strings. [`Mode::parse`] lower-cases its
/// input so that user-entered `"Metro"` and `"metro"` refer to the same line
/// type; [`Mode::new`] stores the label verbatim.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mode(String);

impl Mode {
    /// Wrap a label without normalisation.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Parse user-supplied input: trimmed and lower-cased.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let normalized = input.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(DomainError::InvalidMode(input.to_string()));
        }
        Ok(Self(normalized))
    }

    /// The pedestrian transfer mode.
    pub fn walk() -> Self {
        Self::new(WALK)
    }

    /// Whether this is the pedestrian transfer mode.
    pub fn is_walk(&self) -> bool {
        self.0 == WALK
    }

    /// Returns the label as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Mode {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl fmt::Debug for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mode({})", self.0)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
