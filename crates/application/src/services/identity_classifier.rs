//! Player classification
//!
//! Decides which die a player gets by comparing the SHA-256 digest of the
//! name against a configured reference. The reference is public, so this is
//! a hidden branch for demo purposes and not an access control.

use domain::{PlayerName, RollBound};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{Span, instrument};

/// Lowercase hex SHA-256 of the one name that rolls an eight-sided die
pub const PRIVILEGED_PLAYER_DIGEST: &str =
    "f4b7c19317c929d2a34297d6229defe5262fa556ef654b600fc98f02c6d87fdc";

/// Configuration for player classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Hex digest that selects the privileged bound
    #[serde(default = "default_privileged_digest")]
    pub privileged_digest: String,
}

fn default_privileged_digest() -> String {
    PRIVILEGED_PLAYER_DIGEST.to_string()
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            privileged_digest: default_privileged_digest(),
        }
    }
}

/// Maps a player name to the bound of the die they roll
#[derive(Debug, Clone)]
pub struct IdentityClassifier {
    privileged_digest: String,
}

impl Default for IdentityClassifier {
    fn default() -> Self {
        Self::new(&IdentityConfig::default())
    }
}

impl IdentityClassifier {
    /// Create a classifier from configuration
    ///
    /// The configured digest is lowercased so it compares against the
    /// lowercase hex rendering of the name digest.
    #[must_use]
    pub fn new(config: &IdentityConfig) -> Self {
        Self {
            privileged_digest: config.privileged_digest.trim().to_ascii_lowercase(),
        }
    }

    /// Lowercase hex SHA-256 of a name's UTF-8 bytes
    #[must_use]
    pub fn digest(name: &str) -> String {
        hex::encode(Sha256::digest(name.as_bytes()))
    }

    /// Classify a player
    #[instrument(name = "classify_player", skip_all, fields(roll.bound = tracing::field::Empty))]
    pub fn classify(&self, player: &PlayerName) -> RollBound {
        let bound = if Self::digest(player.as_str()) == self.privileged_digest {
            RollBound::Privileged
        } else {
            RollBound::Standard
        };
        Span::current().record("roll.bound", bound.max());
        bound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // SHA-256("abc") from FIPS 180-2
    const ABC_DIGEST: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

    fn classifier_for(digest: &str) -> IdentityClassifier {
        IdentityClassifier::new(&IdentityConfig {
            privileged_digest: digest.to_string(),
        })
    }

    #[test]
    fn digest_is_lowercase_hex_sha256() {
        assert_eq!(IdentityClassifier::digest("abc"), ABC_DIGEST);
    }

    #[test]
    fn default_config_uses_reference_digest() {
        assert_eq!(
            IdentityConfig::default().privileged_digest,
            PRIVILEGED_PLAYER_DIGEST
        );
    }

    #[test]
    fn anonymous_player_gets_standard_bound() {
        let classifier = IdentityClassifier::default();
        assert_eq!(
            classifier.classify(&PlayerName::anonymous()),
            RollBound::Standard
        );
    }

    #[test]
    fn ordinary_names_get_standard_bound() {
        let classifier = IdentityClassifier::default();
        for name in ["alice", "bob", "", "Anonymous Player", "🎲"] {
            assert_eq!(
                classifier.classify(&PlayerName::new(name)),
                RollBound::Standard,
                "{name} should not be privileged"
            );
        }
    }

    #[test]
    fn matching_digest_gets_privileged_bound() {
        let classifier = classifier_for(ABC_DIGEST);
        assert_eq!(
            classifier.classify(&PlayerName::new("abc")),
            RollBound::Privileged
        );
        assert_eq!(
            classifier.classify(&PlayerName::new("abd")),
            RollBound::Standard
        );
    }

    #[test]
    fn configured_digest_is_case_insensitive() {
        let classifier = classifier_for(&ABC_DIGEST.to_uppercase());
        assert_eq!(
            classifier.classify(&PlayerName::new("abc")),
            RollBound::Privileged
        );
    }

    #[test]
    fn config_deserializes_with_default_digest() {
        let config: IdentityConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, IdentityConfig::default());
    }
}
