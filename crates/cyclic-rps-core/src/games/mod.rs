//! Move sets and the cyclic outcome rule.

mod moves;
mod rules;
mod table;

pub use moves::{validate_move_count, wrap, MoveId, MoveSet, MAX_MOVES, MIN_MOVES};
pub use rules::{OutcomeRule, RoundOutcome};
pub use table::{HelpTable, CORNER_LABEL};
