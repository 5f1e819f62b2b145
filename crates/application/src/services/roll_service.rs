//! Roll service - the request pipeline
//!
//! Classifies the player, rolls, passes the delay gate and then the error
//! gate, and finally reports the outcome to the metrics sink. The delay gate
//! is always evaluated before the error gate, so a failed request can still
//! carry an induced pause.

use std::{fmt, sync::Arc};

use domain::{PlayerName, RollOutcome};
use tracing::{Span, info, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::{RandomSource, RollMetricsPort},
    services::{
        FaultConfig, FaultInjector, FaultStatsSnapshot, IdentityClassifier, IdentityConfig,
        RollEngine,
    },
};

/// Orchestrates a single dice roll
pub struct RollService {
    classifier: IdentityClassifier,
    engine: RollEngine,
    faults: FaultInjector,
    metrics: Arc<dyn RollMetricsPort>,
}

impl fmt::Debug for RollService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RollService")
            .field("classifier", &self.classifier)
            .field("faults", &self.faults)
            .finish_non_exhaustive()
    }
}

impl RollService {
    /// Create a roll service from its parts
    pub fn new(
        classifier: IdentityClassifier,
        engine: RollEngine,
        faults: FaultInjector,
        metrics: Arc<dyn RollMetricsPort>,
    ) -> Self {
        Self {
            classifier,
            engine,
            faults,
            metrics,
        }
    }

    /// Wire a roll service that shares one random source between the engine
    /// and the fault gates
    pub fn from_config(
        faults: FaultConfig,
        identity: &IdentityConfig,
        random: Arc<dyn RandomSource>,
        metrics: Arc<dyn RollMetricsPort>,
    ) -> Self {
        Self::new(
            IdentityClassifier::new(identity),
            RollEngine::new(Arc::clone(&random)),
            FaultInjector::new(faults, random),
            metrics,
        )
    }

    /// Roll the dice for a player
    ///
    /// Counters are only touched when the roll succeeds.
    #[instrument(
        name = "roll_dice",
        skip_all,
        fields(
            player.name = %player,
            roll.bound = tracing::field::Empty,
            roll.result = tracing::field::Empty,
            otel.status_code = tracing::field::Empty,
        )
    )]
    pub async fn roll(&self, player: &PlayerName) -> Result<RollOutcome, ApplicationError> {
        let span = Span::current();
        info!(
            player.name = %player,
            player.anonymous = player.is_anonymous(),
            "determine player"
        );

        let bound = self.classifier.classify(player);
        span.record("roll.bound", bound.max());

        let outcome = self.engine.roll(bound).inspect_err(|_| {
            span.record("otel.status_code", "ERROR");
        })?;

        self.faults.maybe_delay().await;
        if let Err(err) = self.faults.check_error() {
            span.record("otel.status_code", "ERROR");
            warn!(player.name = %player, error = %err, "roll failed");
            return Err(err.into());
        }

        span.record("roll.result", outcome.value());
        self.metrics.record_roll(outcome);
        info!(result = outcome.value(), "{player} is rolling the dice: {outcome}");

        Ok(outcome)
    }

    /// Fault rates in effect
    pub const fn fault_config(&self) -> FaultConfig {
        self.faults.config()
    }

    /// Fault injection counters
    pub fn fault_stats(&self) -> FaultStatsSnapshot {
        self.faults.stats()
    }
}
