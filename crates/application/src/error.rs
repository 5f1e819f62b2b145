//! Application-level errors

use domain::DomainError;
use thiserror::Error;

use crate::services::InjectedError;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A fault deliberately injected by the error gate
    #[error(transparent)]
    Fault(#[from] InjectedError),
}

impl ApplicationError {
    /// Check if this error was injected on purpose
    pub const fn is_injected(&self) -> bool {
        matches!(self, Self::Fault(_))
    }
}
