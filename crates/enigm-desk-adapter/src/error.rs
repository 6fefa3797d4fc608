/*
[INPUT]:  Error sources (serial link, tag bridge, removable media, caller input)
[OUTPUT]: Structured error type with recoverability hints
[POS]:    Error handling layer - unified error type for the whole adapter crate
[UPDATE]: When adding new hardware collaborators or error sources
*/

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the desk hardware adapter
#[derive(Error, Debug)]
pub enum DeskError {
    /// Serial device could not be opened or configured
    #[error("Serial link error: {0}")]
    Serial(#[from] serialport::Error),

    /// Read or write on an open link failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Sensor name outside the two sensors wired to the desk
    #[error("Unknown sensor name: {0:?}")]
    InvalidSensorName(String),

    /// Card identifier with the wrong number of bytes
    #[error("Card identifier must be {expected} bytes, got {actual}")]
    InvalidCardLength { expected: usize, actual: usize },

    /// Tag bridge reported an anticollision failure
    #[error("RFID anticollision failed: {0}")]
    Anticollision(String),

    /// Tag bridge answered something outside its line protocol
    #[error("Unexpected tag bridge reply: {0:?}")]
    BridgeReply(String),

    /// Mount or unmount shell command could not be spawned
    #[error("Media command `{command}` failed: {source}")]
    MediaCommand {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Clue file missing or unreadable
    #[error("Cannot read clue file {path}: {source}")]
    ClueUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Clue path does not point at a text file
    #[error("Clue file must be a .txt file: {0}")]
    NotTextFile(PathBuf),
}

impl DeskError {
    /// Hardware conditions the game absorbs and shows in-band.
    ///
    /// Logic errors (bad sensor name, bad identifier length) and link
    /// failures are not recoverable.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            DeskError::Anticollision(_)
                | DeskError::BridgeReply(_)
                | DeskError::MediaCommand { .. }
                | DeskError::ClueUnreadable { .. }
        )
    }

    /// Check if error indicates a defect in the calling code
    pub fn is_logic_error(&self) -> bool {
        matches!(
            self,
            DeskError::InvalidSensorName(_)
                | DeskError::InvalidCardLength { .. }
                | DeskError::NotTextFile(_)
        )
    }
}

/// Result type alias for adapter operations
pub type Result<T> = std::result::Result<T, DeskError>;
