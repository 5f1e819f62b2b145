//! Fault rate value object
//!
//! Represents a validated fault injection probability as a whole-number
//! percentage (0-100%).
//!
//! # Examples
//!
//! ```
//! use domain::value_objects::FaultRate;
//!
//! let rate = FaultRate::new(25).expect("valid rate");
//! assert_eq!(rate.value(), 25);
//!
//! assert!(FaultRate::new(101).is_err());
//! assert!(FaultRate::try_from(-1_i64).is_err());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::DomainError;

/// Fault injection rate in percent (0-100)
///
/// A gate evaluated against this rate draws a number in `[0, 100)` and
/// triggers when the draw is strictly below the rate, so `0` never
/// triggers and `100` always does.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "i64", into = "u8")]
pub struct FaultRate(u8);

impl FaultRate {
    /// Maximum valid rate
    pub const MAX: u8 = 100;

    /// A rate that never triggers
    pub const NEVER: Self = Self(0);

    /// A rate that always triggers
    pub const ALWAYS: Self = Self(Self::MAX);

    /// Create a new validated fault rate
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidFaultRate` if the value is greater than 100.
    pub const fn new(value: u8) -> Result<Self, DomainError> {
        if value > Self::MAX {
            Err(DomainError::InvalidFaultRate(value as i64))
        } else {
            Ok(Self(value))
        }
    }

    /// Get the rate as a percentage
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Check whether this rate can ever trigger
    #[must_use]
    pub const fn is_disabled(self) -> bool {
        self.0 == 0
    }
}

impl TryFrom<i64> for FaultRate {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .filter(|v| *v <= Self::MAX)
            .map(Self)
            .ok_or(DomainError::InvalidFaultRate(value))
    }
}

impl From<FaultRate> for u8 {
    fn from(rate: FaultRate) -> Self {
        rate.0
    }
}

impl fmt::Display for FaultRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
