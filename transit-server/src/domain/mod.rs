//! Domain types for the transit route planner.
//!
//! Station names and mode labels are thin string wrappers. Validating
//! constructors (`parse`) exist for the web layer; the knowledge base and
//! search accept whatever they are given.

mod error;
mod metric;
mod mode;
mod station;

pub use error::{DomainError, check_weight};
pub use metric::Metric;
pub use mode::{Mode, WALK};
pub use station::StationId;
