//! Application services - Use case implementations

mod fault_injector;
mod identity_classifier;
mod roll_engine;
mod roll_service;

pub use fault_injector::{
    DELAY_BASE, DELAY_MAX_EXTRA_STEPS, DELAY_STEP, FaultConfig, FaultGate, FaultInjector,
    FaultStatsSnapshot, GateDecision, InjectedError,
};
pub use identity_classifier::{IdentityClassifier, IdentityConfig, PRIVILEGED_PLAYER_DIGEST};
pub use roll_engine::RollEngine;
pub use roll_service::RollService;
