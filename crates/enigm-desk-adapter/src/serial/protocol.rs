/*
[INPUT]:  Sensor names, actuator commands, raw response lines from the microcontroller
[OUTPUT]: Wire command lines and typed sensor responses
[POS]:    Serial layer - line protocol spoken with the desk microcontroller
[UPDATE]: When the microcontroller firmware adds commands or changes reply wording
*/

use std::fmt;
use std::str::FromStr;

use crate::error::DeskError;

/// Sensors wired to the desk microcontroller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorName {
    /// Force-sensitive resistor under the picture frame
    PressureSensor,
    /// Weight sensor under the desk top
    LoadCell,
}

impl SensorName {
    pub const ALL: [SensorName; 2] = [SensorName::PressureSensor, SensorName::LoadCell];

    /// Name used on the wire
    pub fn wire_name(self) -> &'static str {
        match self {
            SensorName::PressureSensor => "fsr",
            SensorName::LoadCell => "load cell",
        }
    }

    /// Status query line, without the trailing newline
    pub fn status_command(self) -> String {
        format!("status update {}", self.wire_name())
    }

    /// The only reply line meaning "activated"
    pub fn activated_line(self) -> String {
        format!("{} activated: true", self.wire_name())
    }

    fn deactivated_line(self) -> String {
        format!("{} activated: false", self.wire_name())
    }
}

impl fmt::Display for SensorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for SensorName {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fsr" => Ok(SensorName::PressureSensor),
            "load cell" => Ok(SensorName::LoadCell),
            other => Err(DeskError::InvalidSensorName(other.to_string())),
        }
    }
}

/// Fire-and-forget commands; no reply is awaited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCommand {
    /// Reset sensor latches and arm the solenoid
    Setup,
    /// Reset latches and release the solenoid before shutdown
    Cleanup,
    /// Release the locking solenoid
    DeactivateSolenoid,
}

impl ActuatorCommand {
    pub fn wire_line(self) -> &'static str {
        match self {
            ActuatorCommand::Setup => "setup",
            ActuatorCommand::Cleanup => "cleanup",
            // firmware spelling
            ActuatorCommand::DeactivateSolenoid => "deactivate solenoide",
        }
    }
}

impl fmt::Display for ActuatorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_line())
    }
}

/// Decoded reply to a status query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SensorResponse {
    Activated,
    NotActivated,
    /// Anything else, including silence. Carries the trimmed line.
    Malformed(String),
}

impl SensorResponse {
    /// Parse one reply line for the given sensor.
    ///
    /// Trailing whitespace is stripped before an exact comparison.
    pub fn parse(sensor: SensorName, line: &str) -> Self {
        let line = line.trim_end();
        if line == sensor.activated_line() {
            SensorResponse::Activated
        } else if line == sensor.deactivated_line() {
            SensorResponse::NotActivated
        } else {
            SensorResponse::Malformed(line.to_string())
        }
    }

    /// Only a confirmed activation counts.
    pub fn is_activated(&self) -> bool {
        matches!(self, SensorResponse::Activated)
    }
}
