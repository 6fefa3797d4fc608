/*
[INPUT]:  Removable media and local picture folders
[OUTPUT]: Clue text and picture lists
[POS]:    Media layer - filesystem-facing collaborators
[UPDATE]: When adding media sources
*/

pub mod floppy;
pub mod pictures;

pub use floppy::{read_txt, ClueSource, FloppyConfig, FloppyDrive};
pub use pictures::list_pictures;
