//! Deterministic core of the YenQuit cessation app: smoke-free streaks,
//! Fagerström dependence assessment and onboarding wizard state.

pub mod assessment;
pub mod config;
pub mod error;
pub mod progress;
pub mod telemetry;
pub mod wizard;
