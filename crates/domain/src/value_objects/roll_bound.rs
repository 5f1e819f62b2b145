//! Roll bound value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive upper limit of a dice roll
///
/// Only two bounds exist: a six-sided die for everybody and an
/// eight-sided die for the one privileged player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RollBound {
    /// Six-sided die
    #[default]
    Standard,
    /// Eight-sided die
    Privileged,
}

impl RollBound {
    /// Highest value that can be rolled with this bound
    #[must_use]
    pub const fn max(self) -> u8 {
        match self {
            Self::Standard => 6,
            Self::Privileged => 8,
        }
    }

    /// Category label used in logs and span attributes
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Privileged => "privileged",
        }
    }
}

impl fmt::Display for RollBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (d{})", self.label(), self.max())
    }
}
