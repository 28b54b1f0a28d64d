use crate::cli::args::Args;
use crate::core::{DiagnosticEcho, Dispatcher};
use crate::domain::config::BridgeConfig;
use crate::domain::error::BridgeError;
use crate::infrastructure::config::ConfigManager;
use crate::infrastructure::logging::{init_logging, DEFAULT_FILTER, VERBOSE_FILTER};
use crate::infrastructure::sensor::SensorDriver;
use crate::infrastructure::serial::{list_ports, SerialLink};
use anyhow::Context;
use std::io::{self, Write};
use tracing::{debug, info};

/// Execute the bridge for the parsed command line.
pub fn execute(args: Args) -> anyhow::Result<()> {
    if args.list_ports {
        start_logging(if args.verbose { VERBOSE_FILTER } else { DEFAULT_FILTER })?;
        let mut stdout = io::stdout().lock();
        for port in list_ports().context("Failed to list serial ports")? {
            writeln!(stdout, "{}", port)?;
        }
        return Ok(());
    }

    let manager = ConfigManager::new();
    let source = manager.locate(args.config.as_deref());
    let mut config = match &source {
        Some(path) => manager.load_config_from_path(path)?,
        None => BridgeConfig::default(),
    };
    args.apply(&mut config);

    let filter = if args.verbose {
        VERBOSE_FILTER.to_string()
    } else {
        config
            .bridge
            .log_level
            .clone()
            .unwrap_or_else(|| DEFAULT_FILTER.to_string())
    };
    start_logging(&filter)?;

    match &source {
        Some(path) => debug!("Loaded configuration from {}", path.display()),
        None => debug!("No configuration file found, using defaults"),
    }

    run_bridge(&config)
}

fn start_logging(filter: &str) -> Result<(), BridgeError> {
    init_logging(filter).map_err(|e| BridgeError::Config {
        message: format!("Failed to initialize logging: {}", e),
    })
}

fn run_bridge(config: &BridgeConfig) -> anyhow::Result<()> {
    let link = SerialLink::open(&config.serial)
        .with_context(|| format!("Failed to open {}", config.serial.port))?;
    let sensor = SensorDriver::open(link, &config.sensor)
        .with_context(|| format!("No fingerprint sensor answering on {}", config.serial.port))?;

    let mut dispatcher = Dispatcher::new(sensor);
    let mut stderr = io::stderr();
    let echo = if config.bridge.echo {
        DiagnosticEcho::new(Some(&mut stderr as &mut dyn Write))
    } else {
        DiagnosticEcho::disabled()
    };

    let summary = dispatcher.run(io::stdin().lock(), io::stdout().lock(), echo)?;

    let link = dispatcher.into_sensor().into_inner();
    info!("Closing {} after {} command(s)", link.name(), summary.commands);
    Ok(())
}
