/*
[INPUT]:  Low-level tag device steps (wait, request, anticollision, deauth, release)
[OUTPUT]: One card identifier per scan, or a scan failure
[POS]:    RFID layer - scan sequencing with guaranteed reader release
[UPDATE]: When the scan sequence or release guarantees change
*/

use tracing::{debug, info, warn};

use crate::error::{DeskError, Result};
use crate::rfid::card::{CardIdentifier, CARD_ID_LEN};

/// Low-level steps of one exchange with a tag reader.
pub trait TagDevice {
    /// Block until a tag is in the field.
    fn wait_for_tag(&mut self) -> Result<()>;

    /// Ask the present tag to answer.
    fn request(&mut self) -> Result<()>;

    /// Run anticollision and return the raw UID bytes.
    fn anticollision(&mut self) -> Result<Vec<u8>>;

    fn deauthenticate(&mut self);

    /// Put the reader back in its idle state.
    fn release(&mut self);
}

/// Card scanning as seen by the game controller.
pub trait CardScanner {
    /// Block until a tag is presented. Low-level failures come back as `Err`.
    fn scan(&mut self) -> Result<CardIdentifier>;
}

/// Reader driving one [`TagDevice`] exchange per scan.
#[derive(Debug)]
pub struct RfidReader<D: TagDevice> {
    device: D,
}

impl<D: TagDevice> RfidReader<D> {
    pub fn new(device: D) -> Self {
        Self { device }
    }

    pub fn device(&self) -> &D {
        &self.device
    }
}

impl<D: TagDevice> CardScanner for RfidReader<D> {
    fn scan(&mut self) -> Result<CardIdentifier> {
        let mut session = ReaderSession::new(&mut self.device);
        session.device.wait_for_tag()?;
        if let Err(err) = session.device.request() {
            // anticollision still decides the outcome
            debug!(error = %err, "tag request failed");
        }
        let uid = session.device.anticollision()?;
        let card = first_card_bytes(&uid)?;
        info!(card = %card, "tag scanned");
        Ok(card)
    }
}

/// Anticollision returns the UID plus check byte; the first five bytes identify the card.
fn first_card_bytes(uid: &[u8]) -> Result<CardIdentifier> {
    if uid.len() < CARD_ID_LEN {
        warn!(len = uid.len(), "short UID from tag device");
        return Err(DeskError::BridgeReply(format!(
            "uid of {} bytes",
            uid.len()
        )));
    }
    CardIdentifier::try_from(&uid[..CARD_ID_LEN])
}

/// Deauthenticates and releases the device when dropped.
struct ReaderSession<'a, D: TagDevice> {
    device: &'a mut D,
}

impl<'a, D: TagDevice> ReaderSession<'a, D> {
    fn new(device: &'a mut D) -> Self {
        Self { device }
    }
}

impl<D: TagDevice> Drop for ReaderSession<'_, D> {
    fn drop(&mut self) {
        self.device.deauthenticate();
        self.device.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_card_bytes_ignores_check_byte() {
        let card = first_card_bytes(&[25, 201, 83, 179, 48, 0xAA]).unwrap();
        assert_eq!(card, CardIdentifier::new([25, 201, 83, 179, 48]));
    }

    #[test]
    fn test_short_uid_is_a_scan_failure() {
        let err = first_card_bytes(&[1, 2, 3]).unwrap_err();
        assert!(err.is_recoverable());
    }
}
