/*
[INPUT]:  Serial link settings (device path, baud rate, read timeout), sensor queries
[OUTPUT]: Boolean sensor states and fire-and-forget actuator commands
[POS]:    Serial layer - owning client for the desk microcontroller link
[UPDATE]: When link lifecycle or query semantics change
*/

use std::io::{self, BufRead, BufReader, Read, Write};
use std::time::Duration;

use serialport::SerialPort;
use tracing::{debug, error, info, warn};

use crate::error::{DeskError, Result};
use crate::serial::protocol::{ActuatorCommand, SensorName, SensorResponse};

/// Serial link configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialConfig {
    pub port: String,
    pub baud_rate: u32,
    pub read_timeout: Duration,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: "/dev/ttyUSB0".to_string(),
            baud_rate: 9600,
            read_timeout: Duration::from_secs(10),
        }
    }
}

/// Open a serial device with a bounded read timeout.
pub fn open_port(config: &SerialConfig) -> Result<Box<dyn SerialPort>> {
    let port = serialport::new(&config.port, config.baud_rate)
        .timeout(config.read_timeout)
        .open()?;
    Ok(port)
}

/// Sensor access as seen by the game controller.
pub trait SensorBus {
    /// Query a sensor. Silence and garbage both read as `false`; a lost
    /// link is an error.
    fn query(&mut self, sensor: SensorName) -> Result<bool>;

    /// Send an actuator command without waiting for a reply.
    fn command(&mut self, command: ActuatorCommand);

    /// Issue `cleanup` and stop using the link. Idempotent.
    fn shutdown(&mut self);
}

/// Client owning the microcontroller link.
///
/// Dropping the client issues `cleanup` if [`SensorBus::shutdown`] was not
/// called, so the solenoid is released on every exit path.
pub struct SensorClient<T: Read + Write> {
    link: BufReader<T>,
    shut_down: bool,
}

impl SensorClient<Box<dyn SerialPort>> {
    /// Open the configured device and send `setup`.
    ///
    /// A device that cannot be opened is fatal; there is no retry.
    pub fn open(config: &SerialConfig) -> Result<Self> {
        let port = open_port(config)?;
        info!(
            port = %config.port,
            baud_rate = config.baud_rate,
            read_timeout_ms = config.read_timeout.as_millis() as u64,
            "sensor link opened"
        );
        let mut client = Self::new(port);
        client.send_command(ActuatorCommand::Setup)?;
        Ok(client)
    }
}

impl<T: Read + Write> SensorClient<T> {
    /// Wrap an already open transport. No command is sent.
    pub fn new(transport: T) -> Self {
        Self {
            link: BufReader::new(transport),
            shut_down: false,
        }
    }

    /// Write one newline-terminated command.
    pub fn send_command(&mut self, command: ActuatorCommand) -> Result<()> {
        self.write_line(command.wire_line())?;
        debug!(command = %command, "actuator command sent");
        Ok(())
    }

    /// Query a sensor and keep the typed reply for diagnostics.
    ///
    /// A read timeout is silence and yields an empty `Malformed` reply.
    /// Write failures, other read errors and end-of-file mean the link is gone.
    pub fn query_response(&mut self, sensor: SensorName) -> Result<SensorResponse> {
        self.write_line(&sensor.status_command()).inspect_err(|err| {
            error!(sensor = %sensor, error = %err, "sensor query write failed");
        })?;

        let line = match self.read_line() {
            Ok(line) => line,
            Err(DeskError::Io(err)) if err.kind() == io::ErrorKind::TimedOut => {
                debug!(sensor = %sensor, "no reply before read timeout");
                return Ok(SensorResponse::Malformed(String::new()));
            }
            Err(err) => {
                error!(sensor = %sensor, error = %err, "sensor link lost");
                return Err(err);
            }
        };

        let response = SensorResponse::parse(sensor, &line);
        if let SensorResponse::Malformed(raw) = &response {
            if !raw.is_empty() {
                warn!(sensor = %sensor, line = %raw, "unexpected sensor reply");
            }
        }
        Ok(response)
    }

    /// `true` only for an exact "<name> activated: true" reply.
    pub fn query_sensor(&mut self, sensor: SensorName) -> Result<bool> {
        Ok(self.query_response(sensor)?.is_activated())
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        let port = self.link.get_mut();
        port.write_all(line.as_bytes())?;
        port.write_all(b"\n")?;
        port.flush()?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<String> {
        let mut raw = Vec::new();
        if self.link.read_until(b'\n', &mut raw)? == 0 {
            return Err(DeskError::Io(io::Error::from(io::ErrorKind::UnexpectedEof)));
        }
        Ok(String::from_utf8_lossy(&raw).into_owned())
    }
}

impl<T: Read + Write> SensorBus for SensorClient<T> {
    fn query(&mut self, sensor: SensorName) -> Result<bool> {
        self.query_sensor(sensor)
    }

    fn command(&mut self, command: ActuatorCommand) {
        if let Err(err) = self.send_command(command) {
            error!(command = %command, error = %err, "actuator command failed");
        }
    }

    fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        match self.send_command(ActuatorCommand::Cleanup) {
            Ok(()) => info!("sensor link cleaned up"),
            Err(err) => error!(error = %err, "cleanup command failed"),
        }
    }
}

impl<T: Read + Write> Drop for SensorClient<T> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
