use crate::domain::config::BridgeConfig;
use clap::Parser;
use std::path::PathBuf;

/// Command line arguments for fpbridge
#[derive(Parser, Debug)]
#[command(
    name = "fpbridge",
    version = env!("CARGO_PKG_VERSION"),
    about = "Relay stdin commands to a UART fingerprint sensor",
    long_about = "Reads one command per line from stdin (read_templates, get_image, image_2_tz, \
                  finger_search, delete_model, create_model, store_model, set_led), runs it on \
                  the fingerprint sensor and prints the resulting code(s) to stdout."
)]
pub struct Args {
    /// Serial device path [default: /dev/ttyS2 on Linux]
    pub device: Option<String>,

    /// Baud rate [default: 57600]
    pub baud: Option<u32>,

    /// Echo `CMD:`/`RES:` lines to stderr
    #[arg(short, long)]
    pub echo: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Serial read timeout in milliseconds
    #[arg(short, long)]
    pub timeout_ms: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// List available serial ports and exit
    #[arg(long)]
    pub list_ports: bool,
}

impl Args {
    /// Overlay command line values on a loaded configuration.
    pub fn apply(&self, config: &mut BridgeConfig) {
        if let Some(device) = &self.device {
            config.serial.port = device.clone();
        }
        if let Some(baud) = self.baud {
            config.serial.baud_rate = baud;
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.serial.timeout_ms = timeout_ms;
        }
        if self.echo {
            config.bridge.echo = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_positionals() {
        let args = Args::parse_from(["fpbridge", "/dev/ttyUSB1", "115200"]);
        assert_eq!(args.device.as_deref(), Some("/dev/ttyUSB1"));
        assert_eq!(args.baud, Some(115200));
        assert!(!args.echo);
    }

    #[test]
    fn test_no_arguments_keeps_config() {
        let args = Args::parse_from(["fpbridge"]);
        let mut config = BridgeConfig::default();
        config.serial.port = "/dev/ttyAMA0".to_string();
        config.bridge.echo = true;

        args.apply(&mut config);
        assert_eq!(config.serial.port, "/dev/ttyAMA0");
        assert_eq!(config.serial.baud_rate, 57600);
        assert!(config.bridge.echo);
    }

    #[test]
    fn test_cli_overrides_config() {
        let args = Args::parse_from(["fpbridge", "COM7", "9600", "--echo", "--timeout-ms", "300"]);
        let mut config = BridgeConfig::default();

        args.apply(&mut config);
        assert_eq!(config.serial.port, "COM7");
        assert_eq!(config.serial.baud_rate, 9600);
        assert_eq!(config.serial.timeout_ms, 300);
        assert!(config.bridge.echo);
    }

    #[test]
    fn test_rejects_non_numeric_baud() {
        assert!(Args::try_parse_from(["fpbridge", "/dev/ttyS0", "fast"]).is_err());
    }
}
