/*
[INPUT]:  Current game phase, classified tap region, win condition
[OUTPUT]: Tap routing decisions (navigate, quit, ignore)
[POS]:    Game domain logic - phase enumeration and tap transition table
[UPDATE]: When phases or tap navigation rules change
*/

use std::fmt;

use crate::regions::TapRegion;

/// Kiosk phases, exactly one active at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamePhase {
    PictureFrame,
    WaitLoadCell,
    SelectionHub,
    FloppyView,
    RfidView,
    WinScreen,
}

impl GamePhase {
    /// Phases driven by sensor polling rather than taps
    pub fn is_polling(self) -> bool {
        matches!(self, GamePhase::PictureFrame | GamePhase::WaitLoadCell)
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GamePhase::PictureFrame => "picture-frame",
            GamePhase::WaitLoadCell => "wait-load-cell",
            GamePhase::SelectionHub => "selection-hub",
            GamePhase::FloppyView => "floppy-view",
            GamePhase::RfidView => "rfid-view",
            GamePhase::WinScreen => "win-screen",
        };
        f.write_str(name)
    }
}

/// What a tap asks the controller to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapAction {
    Navigate(GamePhase),
    /// Release the actuator and end the session
    Quit,
    Ignore,
}

/// Route a tap. `won` is the current win condition.
pub fn route_tap(phase: GamePhase, region: TapRegion, won: bool) -> TapAction {
    match (phase, region) {
        (_, TapRegion::TopRight) => TapAction::Quit,
        (phase, _) if phase.is_polling() => TapAction::Ignore,
        (GamePhase::WinScreen, _) => TapAction::Ignore,
        (_, TapRegion::Bottom) if won => TapAction::Navigate(GamePhase::WinScreen),
        _ if won => TapAction::Ignore,
        (GamePhase::SelectionHub, TapRegion::Left) => TapAction::Navigate(GamePhase::FloppyView),
        (GamePhase::SelectionHub, TapRegion::Right) => TapAction::Navigate(GamePhase::RfidView),
        (GamePhase::FloppyView | GamePhase::RfidView, TapRegion::TopLeft) => {
            TapAction::Navigate(GamePhase::SelectionHub)
        }
        _ => TapAction::Ignore,
    }
}
