//! Score, difficulty level and the enemy budget.

use serde::{Deserialize, Serialize};

/// Lowest difficulty level.
pub const MIN_LEVEL: u32 = 1;
/// Highest difficulty level.
pub const MAX_LEVEL: u32 = 10;

/// Difficulty level for a score: `clamp(floor(sqrt(score)), 1, 10)`.
///
/// ```
/// use archer_core::scoring::level_for;
///
/// assert_eq!(level_for(0), 1);
/// assert_eq!(level_for(15), 3);
/// assert_eq!(level_for(16), 4);
/// assert_eq!(level_for(1_000), 10);
/// ```
#[must_use]
pub fn level_for(score: u32) -> u32 {
    (MIN_LEVEL..=MAX_LEVEL)
        .rev()
        .find(|level| level * level <= score)
        .unwrap_or(MIN_LEVEL)
}

/// Session progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    score: u32,
    total: u32,
    remaining: u32,
    level: u32,
}

/// Changes caused by one kill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KillOutcome {
    /// Score after the kill.
    pub score: u32,
    /// New level, if it changed.
    pub level_changed: Option<u32>,
}

impl Scoreboard {
    /// A fresh board for a session of `total` enemies.
    #[must_use]
    pub fn new(total: u32) -> Self {
        Self {
            score: 0,
            total,
            remaining: total,
            level: level_for(0),
        }
    }

    /// Enemies destroyed so far.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Enemies in the session.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.total
    }

    /// Enemies not yet spawned.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Current difficulty level. Never decreases.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// True once every enemy of the session has been destroyed.
    #[must_use]
    pub const fn is_won(&self) -> bool {
        self.score >= self.total
    }

    /// Counts one destroyed enemy and recomputes the level.
    pub fn record_kill(&mut self) -> KillOutcome {
        self.score = self.score.saturating_add(1);
        let level = level_for(self.score);
        let level_changed = (level != self.level).then_some(level);
        self.level = level;
        KillOutcome {
            score: self.score,
            level_changed,
        }
    }

    /// Takes one enemy from the budget. Returns the new remaining count, or
    /// `None` when the budget is spent.
    pub fn claim_spawn(&mut self) -> Option<u32> {
        self.remaining = self.remaining.checked_sub(1)?;
        Some(self.remaining)
    }
}
