//! Roll engine

use std::{fmt, sync::Arc};

use domain::{DomainError, RollBound, RollOutcome};
use tracing::{Span, instrument};

use crate::ports::RandomSource;

/// Draws dice rolls from a random source
#[derive(Clone)]
pub struct RollEngine {
    random: Arc<dyn RandomSource>,
}

impl fmt::Debug for RollEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RollEngine").finish_non_exhaustive()
    }
}

impl RollEngine {
    /// Create a roll engine
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self { random }
    }

    /// Roll a value uniformly from `1..=bound`
    #[instrument(
        name = "do_roll",
        skip_all,
        fields(roll.bound = bound.max(), roll.result = tracing::field::Empty)
    )]
    pub fn roll(&self, bound: RollBound) -> Result<RollOutcome, DomainError> {
        let value = self
            .random
            .below(u32::from(bound.max()))
            .saturating_add(1);
        let outcome = RollOutcome::new(value, bound)?;
        Span::current().record("roll.result", outcome.value());
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MockRandomSource;
    use mockall::predicate::eq;

    fn engine_returning(bound: u32, draw: u32) -> RollEngine {
        let mut random = MockRandomSource::new();
        random.expect_below().with(eq(bound)).return_const(draw);
        RollEngine::new(Arc::new(random))
    }

    #[test]
    fn lowest_draw_rolls_one() {
        let outcome = engine_returning(6, 0).roll(RollBound::Standard).unwrap();
        assert_eq!(outcome.value(), 1);
    }

    #[test]
    fn highest_draw_rolls_bound() {
        let outcome = engine_returning(6, 5).roll(RollBound::Standard).unwrap();
        assert_eq!(outcome.value(), 6);

        let outcome = engine_returning(8, 7).roll(RollBound::Privileged).unwrap();
        assert_eq!(outcome.value(), 8);
    }

    #[test]
    fn out_of_range_draw_is_an_error() {
        let result = engine_returning(6, 6).roll(RollBound::Standard);
        assert_eq!(
            result,
            Err(DomainError::OutcomeOutOfRange { value: 7, bound: 6 })
        );
    }

    #[test]
    fn saturating_draw_does_not_overflow() {
        let result = engine_returning(6, u32::MAX).roll(RollBound::Standard);
        assert!(result.is_err());
    }
}
