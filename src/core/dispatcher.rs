use crate::core::command::CommandLine;
use crate::core::output::{DiagnosticEcho, ResponseWriter};
use crate::core::sensor::{status, FingerprintSensor, LedSettings};
use crate::domain::error::BridgeResult;
use std::collections::HashMap;
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};

/// Printed for a command name that is not in the table.
pub const UNKNOWN_COMMAND: i64 = -1;

/// Printed as the second `finger_search` line when the search did not succeed.
pub const NO_FINGER_ID: i64 = -1;

/// Handler signature shared by every entry of the command table.
pub type Handler<S> = fn(&mut S, &CommandLine<'_>) -> BridgeResult<Vec<i64>>;

/// Counters reported when the read loop reaches end-of-stream.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Non-blank lines processed
    pub commands: usize,
    /// Lines whose command name was not recognized
    pub unrecognized: usize,
}

/// Read-eval-print loop relaying text commands to a fingerprint sensor.
///
/// The dispatcher owns the sensor for its whole lifetime; dropping the
/// dispatcher releases the sensor and whatever connection it holds.
pub struct Dispatcher<S: FingerprintSensor> {
    sensor: S,
    handlers: HashMap<&'static str, Handler<S>>,
}

impl<S: FingerprintSensor> Dispatcher<S> {
    pub fn new(sensor: S) -> Self {
        let mut handlers: HashMap<&'static str, Handler<S>> = HashMap::new();
        handlers.insert("read_templates", read_templates::<S>);
        handlers.insert("get_image", get_image::<S>);
        handlers.insert("image_2_tz", image_2_tz::<S>);
        handlers.insert("finger_search", finger_search::<S>);
        handlers.insert("delete_model", delete_model::<S>);
        handlers.insert("create_model", create_model::<S>);
        handlers.insert("store_model", store_model::<S>);
        handlers.insert("set_led", set_led::<S>);

        Self { sensor, handlers }
    }

    /// Names of all recognized commands, sorted.
    pub fn command_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.handlers.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn is_known(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Execute one tokenized command and return the values to print.
    ///
    /// Unknown commands yield `[-1]` without touching the sensor.
    pub fn dispatch(&mut self, line: &CommandLine<'_>) -> BridgeResult<Vec<i64>> {
        match self.handlers.get(line.name()).copied() {
            Some(handler) => handler(&mut self.sensor, line),
            None => {
                warn!("Unrecognized command '{}'", line.name());
                Ok(vec![UNKNOWN_COMMAND])
            }
        }
    }

    /// Process `input` until end-of-stream, writing results to `output`.
    ///
    /// Any error aborts the loop and is returned; results already written
    /// stay written.
    pub fn run<R, W>(
        &mut self,
        input: R,
        output: W,
        mut echo: DiagnosticEcho<'_>,
    ) -> BridgeResult<RunSummary>
    where
        R: BufRead,
        W: Write,
    {
        let mut writer = ResponseWriter::new(output);
        let mut summary = RunSummary::default();

        for raw in input.lines() {
            let raw = raw?;
            let Some(line) = CommandLine::parse(&raw) else {
                continue;
            };

            summary.commands += 1;
            echo.command(raw.trim())?;

            if !self.is_known(line.name()) {
                summary.unrecognized += 1;
            }

            debug!("Dispatching '{}' with {} argument(s)", line.name(), line.args().len());
            let values = self.dispatch(&line)?;
            writer.write_response(&values)?;

            if let Some(&first) = values.first() {
                echo.result(first)?;
            }
        }

        info!(
            "Input closed after {} command(s), {} unrecognized",
            summary.commands, summary.unrecognized
        );
        Ok(summary)
    }

    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }

    /// Give up the dispatcher and hand back the sensor.
    pub fn into_sensor(self) -> S {
        self.sensor
    }
}

fn status_value(operation: &str, code: u8) -> i64 {
    if code != status::OK {
        debug!("{} returned {:#04x} ({})", operation, code, status::describe(code));
    }
    i64::from(code)
}

fn read_templates<S: FingerprintSensor>(sensor: &mut S, _line: &CommandLine<'_>) -> BridgeResult<Vec<i64>> {
    Ok(vec![status_value("read_templates", sensor.read_templates()?)])
}

fn get_image<S: FingerprintSensor>(sensor: &mut S, _line: &CommandLine<'_>) -> BridgeResult<Vec<i64>> {
    Ok(vec![status_value("get_image", sensor.get_image()?)])
}

fn image_2_tz<S: FingerprintSensor>(sensor: &mut S, line: &CommandLine<'_>) -> BridgeResult<Vec<i64>> {
    let slot = line.required(1, "slot")?;
    Ok(vec![status_value("image_2_tz", sensor.image_2_tz(slot)?)])
}

fn finger_search<S: FingerprintSensor>(sensor: &mut S, _line: &CommandLine<'_>) -> BridgeResult<Vec<i64>> {
    let result = sensor.finger_search()?;
    let finger_id = if result == status::OK {
        i64::from(sensor.finger_id())
    } else {
        NO_FINGER_ID
    };
    Ok(vec![status_value("finger_search", result), finger_id])
}

fn delete_model<S: FingerprintSensor>(sensor: &mut S, line: &CommandLine<'_>) -> BridgeResult<Vec<i64>> {
    let location = line.required(1, "location")?;
    Ok(vec![status_value("delete_model", sensor.delete_model(location)?)])
}

fn create_model<S: FingerprintSensor>(sensor: &mut S, _line: &CommandLine<'_>) -> BridgeResult<Vec<i64>> {
    Ok(vec![status_value("create_model", sensor.create_model()?)])
}

fn store_model<S: FingerprintSensor>(sensor: &mut S, line: &CommandLine<'_>) -> BridgeResult<Vec<i64>> {
    let location = line.required(1, "location")?;
    Ok(vec![status_value("store_model", sensor.store_model(location)?)])
}

fn set_led<S: FingerprintSensor>(sensor: &mut S, line: &CommandLine<'_>) -> BridgeResult<Vec<i64>> {
    let led = LedSettings {
        color: line.optional(1, "color", LedSettings::DEFAULT_COLOR)?,
        mode: line.optional(2, "mode", LedSettings::DEFAULT_MODE)?,
        speed: line.optional_prefixed(3, "speed", LedSettings::DEFAULT_SPEED)?,
        cycles: line.optional(4, "cycles", LedSettings::DEFAULT_CYCLES)?,
    };
    Ok(vec![status_value("set_led", sensor.set_led(led)?)])
}
