/*
[INPUT]:  Raw UID bytes from the tag bridge or configuration
[OUTPUT]: Fixed-length card identifiers with exact positional equality
[POS]:    RFID layer - card identity type
[UPDATE]: When supporting tags with other UID lengths
*/

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DeskError;

/// Number of bytes read from a tag during anticollision
pub const CARD_ID_LEN: usize = 5;

/// Five-byte card identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct CardIdentifier([u8; CARD_ID_LEN]);

impl CardIdentifier {
    pub const fn new(bytes: [u8; CARD_ID_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; CARD_ID_LEN] {
        &self.0
    }
}

impl From<[u8; CARD_ID_LEN]> for CardIdentifier {
    fn from(bytes: [u8; CARD_ID_LEN]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for CardIdentifier {
    type Error = DeskError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; CARD_ID_LEN] =
            bytes.try_into().map_err(|_| DeskError::InvalidCardLength {
                expected: CARD_ID_LEN,
                actual: bytes.len(),
            })?;
        Ok(Self(bytes))
    }
}

impl TryFrom<Vec<u8>> for CardIdentifier {
    type Error = DeskError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        Self::try_from(bytes.as_slice())
    }
}

impl From<CardIdentifier> for Vec<u8> {
    fn from(card: CardIdentifier) -> Self {
        card.0.to_vec()
    }
}

impl fmt::Display for CardIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e] = self.0;
        write!(f, "[{a}, {b}, {c}, {d}, {e}]")
    }
}
