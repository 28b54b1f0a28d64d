//! fpbridge Library
//!
//! Line-oriented command bridge for R30x/R50x-family fingerprint sensors:
//! text commands in, confirmation codes out, one packet round-trip per line.

pub mod cli;
pub mod core;
pub mod domain;
pub mod infrastructure;

pub use crate::core::dispatcher::{Dispatcher, RunSummary, NO_FINGER_ID, UNKNOWN_COMMAND};
pub use crate::core::output::DiagnosticEcho;
pub use crate::core::sensor::{status, FingerprintSensor, LedSettings};
pub use domain::config::BridgeConfig;
pub use domain::error::{BridgeError, BridgeResult};
pub use infrastructure::sensor::SensorDriver;
