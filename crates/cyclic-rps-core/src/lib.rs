//! Cyclic Rock-Paper-Scissors Core Library
//!
//! Commit-reveal fairness for rock-paper-scissors generalized to any odd
//! number of moves: the computer commits to its move with an HMAC before
//! the user chooses, then reveals the key so the commitment can be checked.

pub mod crypto;
pub mod error;
pub mod games;
pub mod protocol;

pub use crypto::{
    commit, generate_key, verify, verify_reveal, Commitment, SecretGenerator, SecretKey,
};
pub use error::{GameError, Result};
pub use games::{HelpTable, MoveId, MoveSet, OutcomeRule, RoundOutcome, MAX_MOVES, MIN_MOVES};
pub use protocol::{CommitMessage, RevealMessage, RoundReport, Session, SessionId};
