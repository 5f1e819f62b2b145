//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A fault rate outside of the 0-100 percentage range
    #[error("invalid fault rate: {0} is out of range (must be 0-100)")]
    InvalidFaultRate(i64),

    /// A rolled value that does not fit the selected bound
    #[error("roll outcome {value} is outside of 1..={bound}")]
    OutcomeOutOfRange { value: u32, bound: u8 },
}
