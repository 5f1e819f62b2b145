//! Fault injection for the roll pipeline
//!
//! Two independent gates decide per request whether to fail the request
//! (error gate) and whether to pause it first (delay gate). Each gate draws
//! a number in `[0, 100)` and triggers when the draw is below its rate.
//!
//! # Example
//!
//! ```ignore
//! use application::{FaultConfig, FaultInjector};
//! use domain::FaultRate;
//!
//! let injector = FaultInjector::new(
//!     FaultConfig::new(FaultRate::new(10)?, FaultRate::new(25)?),
//!     random,
//! );
//!
//! injector.maybe_delay().await;
//! injector.check_error()?;
//! ```

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use domain::FaultRate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{Instrument, Span, debug, error, info, info_span};

use crate::ports::RandomSource;

/// Shortest induced delay
pub const DELAY_BASE: Duration = Duration::from_secs(2);

/// Granularity of the random part of an induced delay
pub const DELAY_STEP: Duration = Duration::from_secs(1);

/// Largest number of steps added on top of [`DELAY_BASE`]
pub const DELAY_MAX_EXTRA_STEPS: u32 = 2;

/// Gates draw from `[0, GATE_RANGE)`
const GATE_RANGE: u32 = 100;

/// Fault rates, fixed at startup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaultConfig {
    /// Percentage of requests that fail
    #[serde(default)]
    pub error_rate: FaultRate,
    /// Percentage of requests that are delayed
    #[serde(default)]
    pub delay_rate: FaultRate,
}

impl FaultConfig {
    /// Create a fault configuration
    #[must_use]
    pub const fn new(error_rate: FaultRate, delay_rate: FaultRate) -> Self {
        Self {
            error_rate,
            delay_rate,
        }
    }

    /// No faults at all
    #[must_use]
    pub const fn disabled() -> Self {
        Self::new(FaultRate::NEVER, FaultRate::NEVER)
    }
}

/// Outcome of evaluating a gate once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateDecision {
    /// The number drawn from `[0, 100)`
    pub draw: u32,
    /// Whether the gate fired
    pub triggered: bool,
}

/// A probabilistic yes/no decision point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaultGate {
    rate: FaultRate,
}

impl FaultGate {
    /// Create a gate for the given rate
    #[must_use]
    pub const fn new(rate: FaultRate) -> Self {
        Self { rate }
    }

    /// The gate's rate
    #[must_use]
    pub const fn rate(self) -> FaultRate {
        self.rate
    }

    /// Whether a given draw fires this gate
    #[must_use]
    pub const fn should_trigger(self, draw: u32) -> bool {
        draw < self.rate.value() as u32
    }

    /// Draw once and decide
    pub fn evaluate(self, random: &dyn RandomSource) -> GateDecision {
        let draw = random.below(GATE_RANGE);
        GateDecision {
            draw,
            triggered: self.should_trigger(draw),
        }
    }
}

/// Error produced when the error gate fires
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InjectedError {
    /// The draw fell below the configured error rate
    #[error("number({number}) < rate({rate})")]
    Triggered { number: u32, rate: u8 },
}

#[derive(Debug, Default)]
struct FaultStats {
    errors_injected: AtomicU64,
    delays_injected: AtomicU64,
    delay_ms_total: AtomicU64,
}

impl FaultStats {
    fn record_error(&self) {
        self.errors_injected.fetch_add(1, Ordering::Relaxed);
    }

    #[allow(clippy::cast_possible_truncation)]
    fn record_delay(&self, delay: Duration) {
        self.delays_injected.fetch_add(1, Ordering::Relaxed);
        self.delay_ms_total
            .fetch_add(delay.as_millis() as u64, Ordering::Relaxed);
    }

    fn snapshot(&self) -> FaultStatsSnapshot {
        FaultStatsSnapshot {
            errors_injected: self.errors_injected.load(Ordering::Relaxed),
            delays_injected: self.delays_injected.load(Ordering::Relaxed),
            delay_ms_total: self.delay_ms_total.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of the injector's counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FaultStatsSnapshot {
    /// Requests failed by the error gate
    pub errors_injected: u64,
    /// Requests paused by the delay gate
    pub delays_injected: u64,
    /// Sum of all induced pauses in milliseconds
    pub delay_ms_total: u64,
}

/// Evaluates the error and delay gates for a request
pub struct FaultInjector {
    error_gate: FaultGate,
    delay_gate: FaultGate,
    random: Arc<dyn RandomSource>,
    stats: FaultStats,
}

impl fmt::Debug for FaultInjector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FaultInjector")
            .field("error_gate", &self.error_gate)
            .field("delay_gate", &self.delay_gate)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl FaultInjector {
    /// Create an injector for the given rates
    pub fn new(config: FaultConfig, random: Arc<dyn RandomSource>) -> Self {
        Self {
            error_gate: FaultGate::new(config.error_rate),
            delay_gate: FaultGate::new(config.delay_rate),
            random,
            stats: FaultStats::default(),
        }
    }

    /// Rates this injector was built with
    pub const fn config(&self) -> FaultConfig {
        FaultConfig::new(self.error_gate.rate(), self.delay_gate.rate())
    }

    /// Current counters
    pub fn stats(&self) -> FaultStatsSnapshot {
        self.stats.snapshot()
    }

    /// Pick a pause length in `[DELAY_BASE, DELAY_BASE + 2 * DELAY_STEP]`
    fn sample_delay(&self) -> Duration {
        let steps = self
            .random
            .below(DELAY_MAX_EXTRA_STEPS + 1)
            .min(DELAY_MAX_EXTRA_STEPS);
        DELAY_BASE + DELAY_STEP * steps
    }

    /// Evaluate the delay gate and sleep if it fires
    ///
    /// Only the calling task is suspended. Returns the induced pause, if any.
    pub async fn maybe_delay(&self) -> Option<Duration> {
        let span = info_span!(
            "cause_delay",
            fault.rate = self.delay_gate.rate().value(),
            fault.delay_ms = tracing::field::Empty,
        );

        async {
            let decision = self.delay_gate.evaluate(self.random.as_ref());
            info!(number = decision.draw, "roll");
            if !decision.triggered {
                return None;
            }

            let delay = self.sample_delay();
            #[allow(clippy::cast_possible_truncation)]
            let delay_ms = delay.as_millis() as u64;
            Span::current().record("fault.delay_ms", delay_ms);
            debug!(delay_ms, "injecting delay");

            self.stats.record_delay(delay);
            tokio::time::sleep(delay).await;
            Some(delay)
        }
        .instrument(span)
        .await
    }

    /// Evaluate the error gate
    ///
    /// On failure the `cause_error` span is marked with an error status and
    /// the error is attached as a structured event.
    pub fn check_error(&self) -> Result<(), InjectedError> {
        let span = info_span!(
            "cause_error",
            fault.rate = self.error_gate.rate().value(),
            otel.status_code = tracing::field::Empty,
            otel.status_message = tracing::field::Empty,
        );
        let _guard = span.enter();

        let decision = self.error_gate.evaluate(self.random.as_ref());
        info!(number = decision.draw, "roll");
        if !decision.triggered {
            return Ok(());
        }

        let err = InjectedError::Triggered {
            number: decision.draw,
            rate: self.error_gate.rate().value(),
        };
        span.record("otel.status_code", "ERROR");
        span.record("otel.status_message", "some error occurred");
        error!(error = &err as &dyn std::error::Error, "injected error");

        self.stats.record_error();
        Err(err)
    }
}
