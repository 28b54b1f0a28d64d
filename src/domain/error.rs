use thiserror::Error;

/// Bridge unified error type
///
/// Every variant is fatal for the read loop. Sensor-side failures that the
/// device reports through a confirmation code are not errors; they are
/// printed as results.
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing argument '{name}' (position {position}) for command '{command}'")]
    MissingArgument {
        command: String,
        position: usize,
        name: &'static str,
    },

    #[error("Invalid argument '{name}' for command '{command}': '{value}' is not an integer")]
    InvalidArgument {
        command: String,
        name: &'static str,
        value: String,
    },

    #[error("Value {value} for '{name}' does not fit in the sensor packet")]
    OutOfRange { name: &'static str, value: i64 },

    #[error("Timed out waiting for sensor reply ({received} of {expected} bytes)")]
    Timeout { expected: usize, received: usize },

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Sensor rejected {operation}: confirmation code {code:#04x}")]
    Sensor { operation: &'static str, code: u8 },
}

pub type BridgeResult<T> = Result<T, BridgeError>;
