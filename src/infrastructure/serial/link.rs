use crate::domain::config::{FlowControlConfig, ParityConfig, SerialSettings};
use crate::domain::error::{BridgeError, BridgeResult};
use serialport::SerialPort;
use std::io::{self, Read, Write};
use std::time::Duration;
use tracing::{debug, info};

/// Exclusively owned serial connection.
///
/// The port is opened by `open` and closed when the link is dropped.
pub struct SerialLink {
    port: Box<dyn SerialPort>,
    name: String,
}

impl SerialLink {
    pub fn open(settings: &SerialSettings) -> BridgeResult<Self> {
        let data_bits = match settings.data_bits {
            5 => serialport::DataBits::Five,
            6 => serialport::DataBits::Six,
            7 => serialport::DataBits::Seven,
            8 => serialport::DataBits::Eight,
            other => {
                return Err(BridgeError::Config {
                    message: format!("Invalid data bits: {}", other),
                })
            }
        };

        let stop_bits = match settings.stop_bits {
            1 => serialport::StopBits::One,
            2 => serialport::StopBits::Two,
            other => {
                return Err(BridgeError::Config {
                    message: format!("Invalid stop bits: {}", other),
                })
            }
        };

        let parity = match settings.parity {
            ParityConfig::None => serialport::Parity::None,
            ParityConfig::Even => serialport::Parity::Even,
            ParityConfig::Odd => serialport::Parity::Odd,
        };

        let flow_control = match settings.flow_control {
            FlowControlConfig::None => serialport::FlowControl::None,
            FlowControlConfig::Software => serialport::FlowControl::Software,
            FlowControlConfig::Hardware => serialport::FlowControl::Hardware,
        };

        let port = serialport::new(&settings.port, settings.baud_rate)
            .data_bits(data_bits)
            .stop_bits(stop_bits)
            .parity(parity)
            .flow_control(flow_control)
            .timeout(Duration::from_millis(settings.timeout_ms))
            .open()?;

        info!("Serial port {} opened at {} baud", settings.port, settings.baud_rate);

        Ok(Self {
            port,
            name: settings.port.clone(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Read for SerialLink {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.port.read(buf)
    }
}

impl Write for SerialLink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.port.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.port.flush()
    }
}

impl Drop for SerialLink {
    fn drop(&mut self) {
        debug!("Serial port {} closed", self.name);
    }
}

/// Names of the serial ports present on this machine.
pub fn list_ports() -> BridgeResult<Vec<String>> {
    let ports = serialport::available_ports()?;
    Ok(ports.into_iter().map(|port| port.port_name).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_nonexistent_port_fails() {
        let settings = SerialSettings {
            port: "/definitely/not/a/serial/port".to_string(),
            ..SerialSettings::default()
        };
        assert!(matches!(SerialLink::open(&settings), Err(BridgeError::Serial(_))));
    }

    #[test]
    fn test_invalid_data_bits_rejected_before_open() {
        let settings = SerialSettings {
            data_bits: 9,
            ..SerialSettings::default()
        };
        let err = SerialLink::open(&settings).err().unwrap();
        assert!(err.to_string().contains("Invalid data bits"));
    }

    #[test]
    fn test_invalid_stop_bits_rejected_before_open() {
        let settings = SerialSettings {
            stop_bits: 3,
            ..SerialSettings::default()
        };
        let err = SerialLink::open(&settings).err().unwrap();
        assert!(err.to_string().contains("Invalid stop bits"));
    }
}
