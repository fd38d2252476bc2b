//! Cyclic outcome rule: rock-paper-scissors generalized to any odd move count.

use super::moves::{wrap, MoveId, MoveSet};
use super::table::HelpTable;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of a round, always from the user's perspective
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundOutcome {
    Win,
    Lose,
    Draw,
}

impl RoundOutcome {
    /// Short label used in the help table
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundOutcome::Win => "Win",
            RoundOutcome::Lose => "Lose",
            RoundOutcome::Draw => "Draw",
        }
    }

    /// Sentence announced to the user after a round
    pub fn verdict(&self) -> &'static str {
        match self {
            RoundOutcome::Win => "You win!",
            RoundOutcome::Lose => "You lose!",
            RoundOutcome::Draw => "Draw",
        }
    }

    /// The same round seen from the other side
    pub fn opposite(&self) -> RoundOutcome {
        match self {
            RoundOutcome::Win => RoundOutcome::Lose,
            RoundOutcome::Lose => RoundOutcome::Win,
            RoundOutcome::Draw => RoundOutcome::Draw,
        }
    }
}

impl fmt::Display for RoundOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Decides rounds over a fixed `MoveSet`.
///
/// The computer wins when its move sits within `half` steps ahead of the
/// user's move on the cycle; the user wins otherwise.
#[derive(Clone, Debug)]
pub struct OutcomeRule {
    moves: MoveSet,
    half: usize,
}

impl OutcomeRule {
    /// Create the rule for `moves`, fixing `half = N div 2`
    pub fn new(moves: MoveSet) -> Self {
        let half = moves.half();
        Self { moves, half }
    }

    /// The move set this rule decides over
    pub fn moves(&self) -> &MoveSet {
        &self.moves
    }

    /// How many moves each move beats
    pub fn half(&self) -> usize {
        self.half
    }

    /// Decide a round by move names
    pub fn decide(&self, user_move: &str, computer_move: &str) -> Result<RoundOutcome> {
        let user = self.moves.index_of(user_move)?;
        let computer = self.moves.index_of(computer_move)?;
        Ok(self.outcome(user.index(), computer.index()))
    }

    /// Decide a round by move ids; ids from another set are rejected
    pub fn decide_ids(&self, user: MoveId, computer: MoveId) -> Result<RoundOutcome> {
        let user = self.moves.check(user)?;
        let computer = self.moves.check(computer)?;
        Ok(self.outcome(user.index(), computer.index()))
    }

    fn outcome(&self, user: usize, computer: usize) -> RoundOutcome {
        if user == computer {
            return RoundOutcome::Draw;
        }
        let delta = wrap(computer as isize - user as isize, self.moves.len());
        if delta <= self.half {
            RoundOutcome::Lose
        } else {
            RoundOutcome::Win
        }
    }

    /// Full N x N grid: row = computer's move, column = user's move.
    pub fn pairwise_table(&self) -> HelpTable {
        let cells = self
            .moves
            .ids()
            .map(|computer| {
                self.moves
                    .ids()
                    .map(|user| self.outcome(user.index(), computer.index()))
                    .collect()
            })
            .collect();
        HelpTable::new(self.moves.names().to_vec(), cells)
    }
}
