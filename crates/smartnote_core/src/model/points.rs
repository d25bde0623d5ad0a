//! Points ledger and achievement table.
//!
//! # Responsibility
//! - Accumulate the gamification score awarded by user actions.
//! - Derive achievement labels from the running total.
//!
//! # Invariants
//! - The total never decreases.
//! - Achievements are independent thresholds, not exclusive tiers.

use serde::{Deserialize, Serialize};

/// Points for saving a typed note.
pub const TYPED_NOTE_POINTS: u64 = 5;
/// Points for a dictated utterance recorded as a note.
pub const VOICE_NOTE_POINTS: u64 = 8;
/// Points for a dictated utterance scheduled as a todo.
pub const VOICE_TODO_POINTS: u64 = 10;
/// Points for adding a typed todo.
pub const TYPED_TODO_POINTS: u64 = 5;
/// Points for completing a todo.
pub const COMPLETED_TODO_POINTS: u64 = 10;

/// Achievement unlocked once the total reaches `threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Achievement {
    pub threshold: u64,
    pub label: &'static str,
}

/// Ascending by threshold.
pub const ACHIEVEMENTS: &[Achievement] = &[
    Achievement {
        threshold: 25,
        label: "Goal Getter",
    },
    Achievement {
        threshold: 50,
        label: "Productivity Master",
    },
    Achievement {
        threshold: 100,
        label: "Note-Taking Pro",
    },
];

/// Running score. Serialized as a bare integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointsLedger(u64);

impl PointsLedger {
    pub fn new(total: u64) -> Self {
        Self(total)
    }

    pub fn total(&self) -> u64 {
        self.0
    }

    /// Adds `amount` to the total and returns achievements crossed by it.
    pub fn award(&mut self, amount: u64) -> Vec<Achievement> {
        let before = self.0;
        self.0 = self.0.saturating_add(amount);
        ACHIEVEMENTS
            .iter()
            .filter(|achievement| before < achievement.threshold && achievement.threshold <= self.0)
            .copied()
            .collect()
    }

    /// Returns every achievement the current total qualifies for.
    pub fn achievements(&self) -> Vec<Achievement> {
        achievements_for(self.0)
    }
}

/// Pure threshold evaluation, ascending by threshold.
pub fn achievements_for(total: u64) -> Vec<Achievement> {
    ACHIEVEMENTS
        .iter()
        .filter(|achievement| achievement.threshold <= total)
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{achievements_for, PointsLedger};

    fn labels(total: u64) -> Vec<&'static str> {
        achievements_for(total)
            .into_iter()
            .map(|achievement| achievement.label)
            .collect()
    }

    #[test]
    fn thresholds_are_inclusive_and_independent() {
        assert!(labels(24).is_empty());
        assert_eq!(labels(25), vec!["Goal Getter"]);
        assert_eq!(labels(50), vec!["Goal Getter", "Productivity Master"]);
        assert_eq!(
            labels(250),
            vec!["Goal Getter", "Productivity Master", "Note-Taking Pro"]
        );
    }

    #[test]
    fn award_reports_only_newly_crossed_thresholds() {
        let mut ledger = PointsLedger::new(20);
        let unlocked = ledger.award(10);
        assert_eq!(ledger.total(), 30);
        assert_eq!(unlocked.len(), 1);
        assert_eq!(unlocked[0].label, "Goal Getter");

        assert!(ledger.award(5).is_empty());
        assert_eq!(ledger.award(100).len(), 2);
    }

    #[test]
    fn award_saturates_instead_of_wrapping() {
        let mut ledger = PointsLedger::new(u64::MAX - 1);
        ledger.award(10);
        assert_eq!(ledger.total(), u64::MAX);
    }
}
