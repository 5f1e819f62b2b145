//! Application layer - Use cases and orchestration
//!
//! Contains the roll pipeline and its building blocks: player
//! classification, the roll engine and fault injection. Randomness and
//! metric sinks are reached through ports implemented by outer layers.

pub mod error;
pub mod ports;
pub mod services;

#[cfg(test)]
mod testing;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
