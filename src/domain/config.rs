use serde::{Deserialize, Serialize};

/// Bridge configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Serial link settings
    #[serde(default)]
    pub serial: SerialSettings,
    /// Sensor addressing
    #[serde(default)]
    pub sensor: SensorSettings,
    /// Dispatcher behaviour
    #[serde(default)]
    pub bridge: BridgeSettings,
}

/// Serial port settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerialSettings {
    /// Device path
    #[serde(default = "default_port")]
    pub port: String,
    /// Baud rate
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,
    #[serde(default = "default_data_bits")]
    pub data_bits: u8,
    #[serde(default = "default_stop_bits")]
    pub stop_bits: u8,
    #[serde(default)]
    pub parity: ParityConfig,
    #[serde(default)]
    pub flow_control: FlowControlConfig,
    /// Read timeout in milliseconds
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,
}

/// Sensor packet addressing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorSettings {
    /// Module address written into every packet header
    #[serde(default = "default_address")]
    pub address: u32,
    /// Handshake password
    #[serde(default)]
    pub password: u32,
}

/// Dispatcher settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BridgeSettings {
    /// Echo `CMD:`/`RES:` lines to the diagnostic stream
    #[serde(default)]
    pub echo: bool,
    /// Log filter used when RUST_LOG is unset
    #[serde(default)]
    pub log_level: Option<String>,
}

/// Parity configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParityConfig {
    #[default]
    None,
    Odd,
    Even,
}

/// Flow control configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowControlConfig {
    #[default]
    None,
    Hardware,
    Software,
}

// Default value functions
pub fn default_port() -> String {
    if cfg!(target_os = "linux") {
        "/dev/ttyS2".to_string()
    } else if cfg!(windows) {
        "COM3".to_string()
    } else {
        "/dev/tty.usbserial".to_string()
    }
}

pub fn default_baud_rate() -> u32 {
    57600
}

fn default_data_bits() -> u8 {
    8
}

fn default_stop_bits() -> u8 {
    1
}

fn default_timeout() -> u64 {
    1000
}

fn default_address() -> u32 {
    0xFFFF_FFFF
}

impl Default for SerialSettings {
    fn default() -> Self {
        Self {
            port: default_port(),
            baud_rate: default_baud_rate(),
            data_bits: default_data_bits(),
            stop_bits: default_stop_bits(),
            parity: ParityConfig::default(),
            flow_control: FlowControlConfig::default(),
            timeout_ms: default_timeout(),
        }
    }
}

impl Default for SensorSettings {
    fn default() -> Self {
        Self {
            address: default_address(),
            password: 0,
        }
    }
}
