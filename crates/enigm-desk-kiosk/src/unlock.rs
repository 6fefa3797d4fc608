/*
[INPUT]:  Ordered roster of card identifiers, scanned card identifiers
[OUTPUT]: Unlock outcomes and the win condition
[POS]:    Game domain logic - ordered-unlock rule engine for the RFID tasks
[UPDATE]: When unlock rules or roster size change
*/

use enigm_desk_adapter::CardIdentifier;

/// Number of RFID-gated tasks
pub const TASK_COUNT: usize = 5;

/// One roster slot; the slot index is the required unlock position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RosterSlot {
    pub card: CardIdentifier,
    pub completed: bool,
}

/// Result of applying one scanned card to the roster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlockOutcome {
    NewlyCompleted(usize),
    AlreadyCompleted(usize),
    /// The previous task is still locked. Nothing changes.
    OutOfOrder(usize),
    UnknownCard,
}

/// Engine owning the task roster for the whole session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskUnlockEngine {
    roster: [RosterSlot; TASK_COUNT],
}

impl TaskUnlockEngine {
    /// Create a roster with every task locked
    pub fn new(cards: [CardIdentifier; TASK_COUNT]) -> Self {
        Self {
            roster: cards.map(|card| RosterSlot {
                card,
                completed: false,
            }),
        }
    }

    /// Apply a scanned card. First matching slot wins.
    pub fn apply(&mut self, card: &CardIdentifier) -> UnlockOutcome {
        let Some(index) = self.roster.iter().position(|slot| slot.card == *card) else {
            return UnlockOutcome::UnknownCard;
        };

        if self.roster[index].completed {
            return UnlockOutcome::AlreadyCompleted(index);
        }
        if index > 0 && !self.roster[index - 1].completed {
            return UnlockOutcome::OutOfOrder(index);
        }

        self.roster[index].completed = true;
        UnlockOutcome::NewlyCompleted(index)
    }

    /// Win condition, evaluated on every call
    pub fn all_completed(&self) -> bool {
        self.roster.iter().all(|slot| slot.completed)
    }

    pub fn progress(&self) -> [bool; TASK_COUNT] {
        self.roster.map(|slot| slot.completed)
    }

    pub fn roster(&self) -> &[RosterSlot; TASK_COUNT] {
        &self.roster
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(tag: u8) -> CardIdentifier {
        CardIdentifier::new([tag, tag, tag, tag, tag])
    }

    fn engine() -> TaskUnlockEngine {
        TaskUnlockEngine::new([card(b'A'), card(b'B'), card(b'C'), card(b'D'), card(b'E')])
    }

    #[test]
    fn test_initial_roster_locked() {
        let engine = engine();
        assert_eq!(engine.progress(), [false; TASK_COUNT]);
        assert!(!engine.all_completed());
    }

    #[test]
    fn test_ordered_scenario() {
        let mut engine = engine();
        let before = engine.clone();

        assert_eq!(engine.apply(&card(b'C')), UnlockOutcome::OutOfOrder(2));
        assert_eq!(engine, before);

        assert_eq!(engine.apply(&card(b'A')), UnlockOutcome::NewlyCompleted(0));
        assert_eq!(engine.apply(&card(b'A')), UnlockOutcome::AlreadyCompleted(0));
        assert_eq!(engine.apply(&card(b'B')), UnlockOutcome::NewlyCompleted(1));
        assert_eq!(engine.progress(), [true, true, false, false, false]);
    }

    #[test]
    fn test_unknown_card_leaves_roster_unchanged() {
        let mut engine = engine();
        engine.apply(&card(b'A'));
        let before = engine.clone();

        let stranger = CardIdentifier::new([b'A', b'A', b'A', b'A', b'B']);
        assert_eq!(engine.apply(&stranger), UnlockOutcome::UnknownCard);
        assert_eq!(engine, before);
    }

    #[test]
    fn test_out_of_order_for_every_later_slot() {
        for (index, tag) in [b'B', b'C', b'D', b'E'].into_iter().enumerate() {
            let mut engine = engine();
            assert_eq!(engine.apply(&card(tag)), UnlockOutcome::OutOfOrder(index + 1));
            assert!(!engine.roster()[index + 1].completed);
        }
    }

    #[test]
    fn test_duplicate_completed_scan_is_never_out_of_order() {
        let mut engine = engine();
        engine.apply(&card(b'A'));
        engine.apply(&card(b'B'));

        // B is done even though C, D, E are not; rescanning B reports AlreadyCompleted
        assert_eq!(engine.apply(&card(b'B')), UnlockOutcome::AlreadyCompleted(1));
        assert_eq!(engine.apply(&card(b'B')), UnlockOutcome::AlreadyCompleted(1));
        assert_eq!(engine.progress(), [true, true, false, false, false]);
    }

    #[test]
    fn test_win_condition_is_monotonic() {
        let mut engine = engine();
        for (index, tag) in [b'A', b'B', b'C', b'D', b'E'].into_iter().enumerate() {
            assert!(!engine.all_completed());
            assert_eq!(engine.apply(&card(tag)), UnlockOutcome::NewlyCompleted(index));
        }
        assert!(engine.all_completed());

        for tag in [b'C', b'Z', b'A'] {
            engine.apply(&card(tag));
            assert!(engine.all_completed());
        }
    }

    #[test]
    fn test_first_match_wins_on_duplicate_identifiers() {
        let mut engine =
            TaskUnlockEngine::new([card(b'A'), card(b'A'), card(b'C'), card(b'D'), card(b'E')]);
        assert_eq!(engine.apply(&card(b'A')), UnlockOutcome::NewlyCompleted(0));
        assert_eq!(engine.apply(&card(b'A')), UnlockOutcome::AlreadyCompleted(0));
    }
}
