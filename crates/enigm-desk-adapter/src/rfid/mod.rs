/*
[INPUT]:  Tag reader hardware behind a TagDevice
[OUTPUT]: Card identifiers or scan failures
[POS]:    RFID layer - card identity reading
[UPDATE]: When adding tag devices or changing scan semantics
*/

pub mod bridge;
pub mod card;
pub mod reader;

pub use bridge::SerialTagDevice;
pub use card::{CardIdentifier, CARD_ID_LEN};
pub use reader::{CardScanner, RfidReader, TagDevice};
