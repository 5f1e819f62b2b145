//! Player name value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the player asking for a roll
///
/// An absent or empty name falls back to [`PlayerName::ANONYMOUS`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerName(String);

impl PlayerName {
    /// Label used when a request carries no player name
    pub const ANONYMOUS: &'static str = "Anonymous player";

    /// Create a player name, falling back to the anonymous label when empty
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        if name.is_empty() {
            Self::anonymous()
        } else {
            Self(name)
        }
    }

    /// The anonymous player
    #[must_use]
    pub fn anonymous() -> Self {
        Self(Self::ANONYMOUS.to_string())
    }

    /// Build from an optional query parameter
    #[must_use]
    pub fn from_query(player: Option<String>) -> Self {
        player.map_or_else(Self::anonymous, Self::new)
    }

    /// Borrow the name
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether this is the anonymous fallback
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.0 == Self::ANONYMOUS
    }
}

impl Default for PlayerName {
    fn default() -> Self {
        Self::anonymous()
    }
}

impl AsRef<str> for PlayerName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
