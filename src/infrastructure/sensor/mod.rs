// Sensor module - Packet protocol driver for UART fingerprint sensors
pub mod driver;
pub mod packet;

pub use driver::{SensorDriver, SystemParameters};
