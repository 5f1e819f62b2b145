//! Roll outcome value object
//!
//! # Examples
//!
//! ```
//! use domain::value_objects::{RollBound, RollOutcome};
//!
//! let outcome = RollOutcome::new(4, RollBound::Standard).expect("in range");
//! assert_eq!(outcome.value(), 4);
//! assert_eq!(outcome.to_string(), "4");
//!
//! assert!(RollOutcome::new(7, RollBound::Standard).is_err());
//! assert!(RollOutcome::new(7, RollBound::Privileged).is_ok());
//! ```

use serde::Serialize;
use std::fmt;

use crate::{DomainError, RollBound};

/// Result of a single roll, always within `1..=bound`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RollOutcome(u8);

impl RollOutcome {
    /// Create an outcome, checking it against the bound it was rolled with
    ///
    /// # Errors
    ///
    /// Returns `DomainError::OutcomeOutOfRange` if `value` is zero or above
    /// the bound.
    pub fn new(value: u32, bound: RollBound) -> Result<Self, DomainError> {
        let max = bound.max();
        match u8::try_from(value) {
            Ok(v) if (1..=max).contains(&v) => Ok(Self(v)),
            _ => Err(DomainError::OutcomeOutOfRange { value, bound: max }),
        }
    }

    /// The rolled value
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for RollOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_rejected() {
        assert_eq!(
            RollOutcome::new(0, RollBound::Standard),
            Err(DomainError::OutcomeOutOfRange { value: 0, bound: 6 })
        );
    }

    #[test]
    fn upper_bound_is_inclusive() {
        assert!(RollOutcome::new(6, RollBound::Standard).is_ok());
        assert!(RollOutcome::new(8, RollBound::Privileged).is_ok());
        assert!(RollOutcome::new(9, RollBound::Privileged).is_err());
    }

    #[test]
    fn values_beyond_u8_are_rejected() {
        assert!(RollOutcome::new(257, RollBound::Privileged).is_err());
    }

    #[test]
    fn display_is_decimal() {
        let outcome = RollOutcome::new(3, RollBound::Privileged).unwrap();
        assert_eq!(outcome.to_string(), "3");
    }
}
