/*
[INPUT]:  Game phase, roster progress, unlock and media outcomes
[OUTPUT]: Screen view-model plus the display/input collaborator traits
[POS]:    Presentation boundary - what the controller asks the display to show
[UPDATE]: When screens, in-band messages or input events change
*/

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crate::regions::Point;
use crate::unlock::{UnlockOutcome, TASK_COUNT};

pub const HUB_TITLE: &str = "Tap your choice: ";
pub const FLOPPY_TITLE: &str = "Reading data from Floppy Disk: ";
pub const RFID_TITLE: &str = "RFID SCAN: ";
pub const WIN_TITLE: &str = "Well Done: Desk is now open";
pub const MEDIA_ERROR_TEXT: &str = "An error occurred";
pub const WIN_PROMPT_TEXT: &str = "Click here to access win screen";

/// Clues longer than this render in compact style
pub const COMPACT_CLUE_CHARS: usize = 300;

/// User input delivered to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Tap(Point),
    /// Dedicated exit key
    Exit,
}

/// Full-screen output surface
pub trait Display {
    fn render(&mut self, screen: &Screen) -> io::Result<()>;
}

/// Source of taps and key presses
pub trait InputSource {
    /// Wait up to `timeout` for the next event. A zero timeout never blocks.
    fn poll_event(&mut self, timeout: Duration) -> io::Result<Option<InputEvent>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Footer {
    Progress([bool; TASK_COUNT]),
    WinPrompt,
}

/// Header, back button and footer shared by the interactive screens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chrome {
    pub title: &'static str,
    pub back_button: bool,
    pub footer: Footer,
}

impl Chrome {
    /// Sub-views (`back == true`) swap the back button for the win prompt once the game is won.
    pub fn new(title: &'static str, back: bool, progress: [bool; TASK_COUNT], won: bool) -> Self {
        let footer = if back && won {
            Footer::WinPrompt
        } else {
            Footer::Progress(progress)
        };
        Self {
            title,
            back_button: back && !won,
            footer,
        }
    }
}

/// Outcome shown after an RFID scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RfidOutcome {
    Unlock(UnlockOutcome),
    ScanFailed,
}

impl RfidOutcome {
    pub fn headline(&self) -> &'static str {
        match self {
            RfidOutcome::Unlock(_) => "Badge Scanned successfully",
            RfidOutcome::ScanFailed => "Error scan badge",
        }
    }

    pub fn detail(&self) -> Option<String> {
        match self {
            RfidOutcome::Unlock(UnlockOutcome::NewlyCompleted(index)) => {
                Some(format!("Task {} has been completed", index + 1))
            }
            RfidOutcome::Unlock(UnlockOutcome::AlreadyCompleted(index)) => {
                Some(format!("Task {} has already been completed", index + 1))
            }
            RfidOutcome::Unlock(UnlockOutcome::OutOfOrder(_)) => Some("Wrong order".to_string()),
            RfidOutcome::Unlock(UnlockOutcome::UnknownCard) => Some("Wrong Card".to_string()),
            RfidOutcome::ScanFailed => None,
        }
    }

    /// Penalty warning. No chance counter sits behind it.
    pub fn warning(&self) -> Option<&'static str> {
        match self {
            RfidOutcome::Unlock(UnlockOutcome::OutOfOrder(_) | UnlockOutcome::UnknownCard) => {
                Some("One less chance available, careful now !")
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Decoy picture; `None` when the folder is empty
    PictureFrame { picture: Option<PathBuf> },
    DeskError,
    LoadCellClue,
    SelectionHub { chrome: Chrome },
    FloppyLoading { chrome: Chrome },
    FloppyClue { chrome: Chrome, text: String, compact: bool },
    RfidScanning { chrome: Chrome },
    RfidResult { chrome: Chrome, outcome: RfidOutcome },
    Win { chrome: Chrome },
}

impl Screen {
    pub fn floppy_clue(chrome: Chrome, text: String) -> Self {
        let compact = text.chars().count() > COMPACT_CLUE_CHARS;
        Screen::FloppyClue {
            chrome,
            text,
            compact,
        }
    }

    pub fn chrome(&self) -> Option<&Chrome> {
        match self {
            Screen::SelectionHub { chrome }
            | Screen::FloppyLoading { chrome }
            | Screen::FloppyClue { chrome, .. }
            | Screen::RfidScanning { chrome }
            | Screen::RfidResult { chrome, .. }
            | Screen::Win { chrome } => Some(chrome),
            Screen::PictureFrame { .. } | Screen::DeskError | Screen::LoadCellClue => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chrome_before_win() {
        let progress = [true, false, false, false, false];
        let chrome = Chrome::new(RFID_TITLE, true, progress, false);
        assert!(chrome.back_button);
        assert_eq!(chrome.footer, Footer::Progress(progress));
    }

    #[test]
    fn test_chrome_after_win() {
        let sub_view = Chrome::new(FLOPPY_TITLE, true, [true; TASK_COUNT], true);
        assert!(!sub_view.back_button);
        assert_eq!(sub_view.footer, Footer::WinPrompt);

        let hub = Chrome::new(HUB_TITLE, false, [true; TASK_COUNT], true);
        assert_eq!(hub.footer, Footer::Progress([true; TASK_COUNT]));
    }

    #[test]
    fn test_long_clue_is_compact() {
        let chrome = Chrome::new(FLOPPY_TITLE, true, [false; TASK_COUNT], false);
        let short = Screen::floppy_clue(chrome.clone(), "x".repeat(COMPACT_CLUE_CHARS));
        let long = Screen::floppy_clue(chrome, "x".repeat(COMPACT_CLUE_CHARS + 1));

        assert!(matches!(short, Screen::FloppyClue { compact: false, .. }));
        assert!(matches!(long, Screen::FloppyClue { compact: true, .. }));
    }

    #[test]
    fn test_rfid_messages() {
        let done = RfidOutcome::Unlock(UnlockOutcome::NewlyCompleted(2));
        assert_eq!(done.detail().as_deref(), Some("Task 3 has been completed"));
        assert_eq!(done.warning(), None);

        let wrong = RfidOutcome::Unlock(UnlockOutcome::OutOfOrder(4));
        assert_eq!(wrong.detail().as_deref(), Some("Wrong order"));
        assert!(wrong.warning().is_some());

        assert_eq!(RfidOutcome::ScanFailed.headline(), "Error scan badge");
        assert_eq!(RfidOutcome::ScanFailed.detail(), None);
    }
}
