//! Move sets and move positions on the cycle.

use crate::error::{GameError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Smallest playable move count
pub const MIN_MOVES: usize = 3;

/// Largest accepted move count; keeps the N x N help table and menu bounded
pub const MAX_MOVES: usize = 501;

/// Names every standard move set starts with
const BASE_MOVES: [&str; 3] = ["rock", "paper", "scissors"];

/// Position of a move within its `MoveSet` (0-based)
///
/// Only obtainable from a `MoveSet`; other sets re-check it before use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct MoveId(usize);

impl MoveId {
    /// Get the 0-based position
    pub fn index(&self) -> usize {
        self.0
    }

    /// Get the 1-based menu number
    pub fn choice(&self) -> usize {
        self.0 + 1
    }
}

impl fmt::Display for MoveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.choice())
    }
}

/// Reduce `value` into `[0, modulus)`, including for negative values.
pub fn wrap(value: isize, modulus: usize) -> usize {
    value.rem_euclid(modulus as isize) as usize
}

/// Check that `count` is odd and within `MIN_MOVES..=MAX_MOVES`
pub fn validate_move_count(count: usize) -> Result<()> {
    if !(MIN_MOVES..=MAX_MOVES).contains(&count) || count % 2 == 0 {
        return Err(GameError::InvalidMoveCount(count));
    }
    Ok(())
}

/// Ordered, immutable list of distinct move names.
///
/// Order defines the cycle: each move beats the `half()` moves that
/// precede it and loses to the `half()` moves that follow it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MoveSet {
    names: Vec<String>,
}

impl MoveSet {
    /// Create from custom move names
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        validate_move_count(names.len())?;

        let mut seen = HashSet::with_capacity(names.len());
        for name in &names {
            if name.trim().is_empty() {
                return Err(GameError::InvalidMove);
            }
            if is_reserved(name) {
                return Err(GameError::ReservedMoveName(name.clone()));
            }
            if !seen.insert(name.as_str()) {
                return Err(GameError::DuplicateMove(name.clone()));
            }
        }

        Ok(Self { names })
    }

    /// Create the default set: rock, paper, scissors, then "4th move", "5th move", ...
    pub fn standard(count: usize) -> Result<Self> {
        validate_move_count(count)?;
        let names = BASE_MOVES
            .iter()
            .map(|name| name.to_string())
            .chain((BASE_MOVES.len() + 1..=count).map(|n| format!("{} move", ordinal(n))))
            .collect::<Vec<_>>();
        Self::new(names)
    }

    /// Number of moves (N)
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false: a valid set has at least `MIN_MOVES` entries
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// How many moves each move beats (N div 2)
    pub fn half(&self) -> usize {
        self.names.len() / 2
    }

    /// Name of the move at `id`; `InvalidChoice` if `id` lies outside this set
    pub fn name(&self, id: MoveId) -> Result<&str> {
        self.names
            .get(id.0)
            .map(String::as_str)
            .ok_or(GameError::InvalidChoice {
                choice: id.choice(),
                max: self.names.len(),
            })
    }

    /// Check that `id` is a position in this set
    pub fn check(&self, id: MoveId) -> Result<MoveId> {
        self.name(id).map(|_| id)
    }

    /// Look up a move by 0-based position
    pub fn get(&self, index: usize) -> Option<MoveId> {
        (index < self.names.len()).then_some(MoveId(index))
    }

    /// Look up a move by exact name
    pub fn index_of(&self, name: &str) -> Result<MoveId> {
        if name.is_empty() {
            return Err(GameError::InvalidMove);
        }
        self.names
            .iter()
            .position(|candidate| candidate == name)
            .map(MoveId)
            .ok_or_else(|| GameError::UnknownMove(name.to_string()))
    }

    /// Resolve a 1-based menu choice
    pub fn resolve_choice(&self, choice: usize) -> Result<MoveId> {
        choice
            .checked_sub(1)
            .and_then(|index| self.get(index))
            .ok_or(GameError::InvalidChoice {
                choice,
                max: self.names.len(),
            })
    }

    /// All move ids in cycle order
    pub fn ids(&self) -> impl Iterator<Item = MoveId> + '_ {
        (0..self.names.len()).map(MoveId)
    }

    /// All move names in cycle order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Move set shifted left by `k` positions (`k` taken mod N)
    pub fn rotated(&self, k: usize) -> Self {
        let shift = k % self.names.len();
        let mut names = self.names.clone();
        names.rotate_left(shift);
        Self { names }
    }
}

impl<'de> Deserialize<'de> for MoveSet {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            names: Vec<String>,
        }
        let raw = Raw::deserialize(d)?;
        MoveSet::new(raw.names).map_err(serde::de::Error::custom)
    }
}

/// Names the menu reads as commands: menu numbers, `0` (exit) and `?` (help)
fn is_reserved(name: &str) -> bool {
    name == "?" || name.parse::<usize>().is_ok()
}

fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}
