//! Property-based tests for domain value objects
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::value_objects::{FaultRate, PlayerName, RollBound, RollOutcome};
use proptest::prelude::*;

fn any_bound() -> impl Strategy<Value = RollBound> {
    prop_oneof![Just(RollBound::Standard), Just(RollBound::Privileged)]
}

// ============================================================================
// RollOutcome Property Tests
// ============================================================================

mod roll_outcome_tests {
    use super::*;

    proptest! {
        #[test]
        fn accepted_outcomes_stay_within_bound(value in 0u32..1000, bound in any_bound()) {
            if let Ok(outcome) = RollOutcome::new(value, bound) {
                prop_assert!(outcome.value() >= 1);
                prop_assert!(outcome.value() <= bound.max());
            }
        }

        #[test]
        fn every_value_in_range_is_accepted(bound in any_bound(), offset in 0u8..8) {
            let value = u32::from(offset % bound.max()) + 1;
            prop_assert!(RollOutcome::new(value, bound).is_ok());
        }

        #[test]
        fn display_parses_back(bound in any_bound(), offset in 0u8..8) {
            let value = u32::from(offset % bound.max()) + 1;
            let outcome = RollOutcome::new(value, bound).unwrap();
            let parsed: u32 = outcome.to_string().parse().unwrap();
            prop_assert_eq!(parsed, value);
        }
    }
}

// ============================================================================
// FaultRate Property Tests
// ============================================================================

mod fault_rate_tests {
    use super::*;

    proptest! {
        #[test]
        fn rates_up_to_hundred_are_valid(value in 0i64..=100) {
            let rate = FaultRate::try_from(value);
            prop_assert!(rate.is_ok());
            prop_assert_eq!(i64::from(rate.unwrap().value()), value);
        }

        #[test]
        fn rates_above_hundred_are_invalid(value in 101i64..i64::MAX) {
            prop_assert!(FaultRate::try_from(value).is_err());
        }

        #[test]
        fn negative_rates_are_invalid(value in i64::MIN..0) {
            prop_assert!(FaultRate::try_from(value).is_err());
        }
    }
}

// ============================================================================
// PlayerName Property Tests
// ============================================================================

mod player_name_tests {
    use super::*;

    proptest! {
        #[test]
        fn non_empty_names_round_trip(name in ".{1,64}") {
            let player = PlayerName::from_query(Some(name.clone()));
            prop_assert_eq!(player.as_str(), name.as_str());
        }
    }
}
