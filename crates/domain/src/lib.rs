//! Domain layer for the dice roller
//!
//! Contains the value objects that describe a roll and its fault
//! configuration, plus domain errors. No I/O and no randomness live here.

pub mod errors;
pub mod value_objects;

pub use errors::DomainError;
pub use value_objects::*;
