/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public desk hardware adapter surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod error;
pub mod media;
pub mod rfid;
pub mod serial;

pub use error::{DeskError, Result};

// Re-export commonly used types from media
pub use media::{list_pictures, ClueSource, FloppyConfig, FloppyDrive};

// Re-export commonly used types from rfid
pub use rfid::{CardIdentifier, CardScanner, RfidReader, SerialTagDevice, TagDevice, CARD_ID_LEN};

// Re-export commonly used types from serial
pub use serial::{
    ActuatorCommand,
    SensorClient,
    SensorName,
    SensorBus,
    SensorResponse,
    SerialConfig,
};
