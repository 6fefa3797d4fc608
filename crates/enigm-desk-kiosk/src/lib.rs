/*
[INPUT]:  Public API exports for the enigm-desk-kiosk crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod clock;
pub mod config;
pub mod controller;
pub mod phase;
pub mod regions;
pub mod screen;
pub mod unlock;

// Re-export main types for convenience
pub use clock::{Clock, SystemClock};
pub use config::KioskConfig;
pub use controller::{GameController, GameTiming, Hardware, KioskError, SessionEnd, Surface};
pub use phase::{route_tap, GamePhase, TapAction};
pub use regions::{Point, ScreenGeometry, TapRegion};
pub use screen::{Display, InputEvent, InputSource, Screen};
pub use unlock::{TaskUnlockEngine, UnlockOutcome, TASK_COUNT};
