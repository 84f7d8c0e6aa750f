//! Domain error types.
//!
//! These errors represent validation failures for user-supplied identifiers.
//! The knowledge base and search never produce them; they belong to the
//! layers that turn raw input into domain values.

/// Domain-level errors for input validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Station name is blank
    #[error("invalid station: {0:?}")]
    InvalidStation(String),

    /// Mode label is blank
    #[error("invalid mode: {0:?}")]
    InvalidMode(String),

    /// Metric is neither "time" nor "cost"
    #[error("invalid metric {0:?}: expected \"time\" or \"cost\"")]
    InvalidMetric(String),

    /// Time or cost is negative or not a number
    #[error("invalid {field}: {value} (must be a non-negative number)")]
    InvalidWeight { field: &'static str, value: f64 },
}

/// Check that an edge weight is a finite, non-negative number.
pub fn check_weight(field: &'static str, value: f64) -> Result<f64, DomainError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(DomainError::InvalidWeight { field, value })
    }
}
