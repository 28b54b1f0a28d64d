// Core module - Command dispatch and sensor abstraction
pub mod command;
pub mod dispatcher;
pub mod output;
pub mod sensor;

pub use command::CommandLine;
pub use dispatcher::{Dispatcher, RunSummary};
pub use output::DiagnosticEcho;
pub use sensor::{status, FingerprintSensor, LedSettings};
