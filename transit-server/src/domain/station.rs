//! Station identifier type.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// An opaque, case-sensitive station identifier.
///
/// The knowledge base treats station names as plain strings and never
/// normalises them: `"Centro"` and `"centro"` are different stations.
///
/// # Examples
///
/// ```
/// use transit_server::domain::StationId;
///
/// let centro = StationId::parse("  Centro ").unwrap();
/// assert_eq!(centro.as_str(), "Centro");
///
/// // Case is significant
/// assert_ne!(centro, StationId::new("centro"));
///
/// // Blank names are rejected by `parse`
/// assert!(StationId::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(String);

impl StationId {
    /// Wrap a name without any validation.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Parse user-supplied input.
    ///
    /// Surrounding whitespace is trimmed. Case is preserved.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidStation(input.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for StationId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StationId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_whitespace() {
        let id = StationId::parse("  P1\t").unwrap();
        assert_eq!(id.as_str(), "P1");
    }

    #[test]
    fn parse_preserves_case() {
        assert_eq!(StationId::parse("Centro").unwrap().as_str(), "Centro");
        assert_ne!(StationId::new("Centro"), StationId::new("CENTRO"));
    }

    #[test]
    fn reject_blank() {
        assert!(StationId::parse("").is_err());
        assert!(StationId::parse("   ").is_err());
    }

    #[test]
    fn display_and_debug() {
        let id = StationId::new("A");
        assert_eq!(format!("{}", id), "A");
        assert_eq!(format!("{:?}", id), "StationId(A)");
    }

    #[test]
    fn ordering_is_lexicographic() {
        let mut ids = vec![StationId::new("P1"), StationId::new("A"), StationId::new("Centro")];
        ids.sort();
        let names: Vec<&str> = ids.iter().map(StationId::as_str).collect();
        assert_eq!(names, ["A", "Centro", "P1"]);
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&StationId::new("B")).unwrap();
        assert_eq!(json, "\"B\"");
        let back: StationId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, StationId::new("B"));
    }
}
