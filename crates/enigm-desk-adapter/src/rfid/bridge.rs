/*
[INPUT]:  Serial link to the RFID bridge microcontroller
[OUTPUT]: TagDevice implementation speaking the bridge line protocol
[POS]:    RFID layer - serial tag bridge
[UPDATE]: When the bridge firmware changes its commands or replies
*/

use std::io::{self, BufRead, BufReader, Read, Write};

use serialport::SerialPort;
use tracing::{debug, warn};

use crate::error::{DeskError, Result};
use crate::rfid::reader::TagDevice;
use crate::serial::client::{open_port, SerialConfig};

const TAG_PRESENT: &str = "tag present";
const UID_PREFIX: &str = "uid:";
const ERROR_PREFIX: &str = "error:";

/// Read timeouts tolerated while waiting for the anticollision answer
const ANTICOLL_MAX_TIMEOUTS: usize = 5;

/// Tag device behind a line-oriented serial bridge.
pub struct SerialTagDevice<T: Read + Write> {
    link: BufReader<T>,
}

impl SerialTagDevice<Box<dyn SerialPort>> {
    pub fn open(config: &SerialConfig) -> Result<Self> {
        let port = open_port(config)?;
        debug!(port = %config.port, "rfid bridge opened");
        Ok(Self::new(port))
    }
}

impl<T: Read + Write> SerialTagDevice<T> {
    pub fn new(transport: T) -> Self {
        Self {
            link: BufReader::new(transport),
        }
    }

    fn send(&mut self, line: &str) -> Result<()> {
        let port = self.link.get_mut();
        port.write_all(line.as_bytes())?;
        port.write_all(b"\n")?;
        port.flush()?;
        Ok(())
    }

    /// `Ok(None)` on read timeout.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut raw = Vec::new();
        match self.link.read_until(b'\n', &mut raw) {
            Ok(0) => Err(DeskError::Io(io::Error::from(io::ErrorKind::UnexpectedEof))),
            Ok(_) => Ok(Some(String::from_utf8_lossy(&raw).trim().to_string())),
            Err(err) if err.kind() == io::ErrorKind::TimedOut => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Best effort; a dead bridge surfaces on the next scan.
    fn send_quiet(&mut self, line: &str) {
        if let Err(err) = self.send(line) {
            warn!(command = line, error = %err, "rfid bridge command failed");
        }
    }
}

impl<T: Read + Write> TagDevice for SerialTagDevice<T> {
    fn wait_for_tag(&mut self) -> Result<()> {
        self.send("rfid wait")?;
        loop {
            match self.read_line()? {
                Some(line) if line == TAG_PRESENT => return Ok(()),
                Some(line) => debug!(line = %line, "ignoring bridge line while waiting"),
                None => {}
            }
        }
    }

    fn request(&mut self) -> Result<()> {
        self.send("rfid request")
    }

    fn anticollision(&mut self) -> Result<Vec<u8>> {
        self.send("rfid anticoll")?;
        let mut line = None;
        for _ in 0..ANTICOLL_MAX_TIMEOUTS {
            line = self.read_line()?;
            if line.is_some() {
                break;
            }
        }
        let Some(line) = line else {
            return Err(DeskError::BridgeReply("no anticollision reply".to_string()));
        };

        if let Some(hex_bytes) = line.strip_prefix(UID_PREFIX) {
            let compact: String = hex_bytes.split_whitespace().collect();
            return hex::decode(&compact).map_err(|_| DeskError::BridgeReply(line.clone()));
        }
        if let Some(reason) = line.strip_prefix(ERROR_PREFIX) {
            return Err(DeskError::Anticollision(reason.trim().to_string()));
        }
        Err(DeskError::BridgeReply(line))
    }

    fn deauthenticate(&mut self) {
        self.send_quiet("rfid deauth");
    }

    fn release(&mut self) {
        self.send_quiet("rfid release");
    }
}
